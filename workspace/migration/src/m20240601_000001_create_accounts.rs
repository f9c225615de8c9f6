use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Email).unique_key())
                    .col(string(Users::Password))
                    .col(boolean(Users::IsActive).default(true))
                    .col(boolean(Users::IsStaff).default(false))
                    .col(boolean(Users::IsSuperuser).default(false))
                    .col(timestamp_with_time_zone(Users::DateJoined))
                    .col(timestamp_with_time_zone_null(Users::LastLogin))
                    .to_owned(),
            )
            .await?;

        // Create user_profiles table, at most one row per user
        manager
            .create_table(
                Table::create()
                    .table(UserProfiles::Table)
                    .if_not_exists()
                    .col(pk_auto(UserProfiles::Id))
                    .col(integer(UserProfiles::UserId).unique_key())
                    .col(string_len_null(UserProfiles::FirstName, 200))
                    .col(string_len_null(UserProfiles::LastName, 200))
                    .col(string_len_null(UserProfiles::Gender, 200))
                    .col(string_len_null(UserProfiles::PhoneNumber, 200))
                    .col(string_len_null(UserProfiles::Address, 200))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_profiles_user")
                            .from(UserProfiles::Table, UserProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create user_videos table
        manager
            .create_table(
                Table::create()
                    .table(UserVideos::Table)
                    .if_not_exists()
                    .col(pk_auto(UserVideos::Id))
                    .col(integer(UserVideos::UserId))
                    .col(string_len_null(UserVideos::VideoTitle, 200))
                    .col(string_len_null(UserVideos::VideoDuration, 200))
                    .col(string_len_null(UserVideos::VideoImage, 200))
                    .col(string_len_null(UserVideos::VideoText, 200))
                    .col(string_len_null(UserVideos::VideoEffect, 200))
                    .col(date(UserVideos::DateCreated))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_videos_user")
                            .from(UserVideos::Table, UserVideos::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_videos_user_id")
                    .table(UserVideos::Table)
                    .col(UserVideos::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserVideos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    Password,
    IsActive,
    IsStaff,
    IsSuperuser,
    DateJoined,
    LastLogin,
}

#[derive(DeriveIden)]
enum UserProfiles {
    Table,
    Id,
    UserId,
    FirstName,
    LastName,
    Gender,
    PhoneNumber,
    Address,
}

#[derive(DeriveIden)]
enum UserVideos {
    Table,
    Id,
    UserId,
    VideoTitle,
    VideoDuration,
    VideoImage,
    VideoText,
    VideoEffect,
    DateCreated,
}
