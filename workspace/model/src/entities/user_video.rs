use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

/// Metadata of a video owned by a user.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_videos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub video_title: Option<String>,
    /// Free-form duration text, e.g. "00:42".
    pub video_duration: Option<String>,
    /// Reference to the display image (path or URL).
    pub video_image: Option<String>,
    /// Caption text.
    pub video_text: Option<String>,
    /// Name of the effect applied to the video.
    pub video_effect: Option<String>,
    /// Set once when the row is inserted.
    pub date_created: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert {
            if self.date_created.is_not_set() {
                self.date_created = Set(chrono::Utc::now().date_naive());
            }
        } else {
            // creation date is immutable
            self.date_created = NotSet;
        }
        Ok(self)
    }
}
