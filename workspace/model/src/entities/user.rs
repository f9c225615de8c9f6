use sea_orm::entity::prelude::*;
use sea_orm::Set;

/// A registered account. The email address is the login identity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Login key, unique across all users. Stored with a lowercased domain part.
    #[sea_orm(unique)]
    pub email: String,
    /// bcrypt hash of the password. Never the plaintext.
    pub password: String,
    #[sea_orm(default_value = "true")]
    pub is_active: bool,
    #[sea_orm(default_value = "false")]
    pub is_staff: bool,
    #[sea_orm(default_value = "false")]
    pub is_superuser: bool,
    pub date_joined: DateTimeUtc,
    /// Updated on every successful login.
    pub last_login: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A user has at most one profile.
    #[sea_orm(has_one = "super::user_profile::Entity")]
    UserProfile,
    /// A user can own multiple videos.
    #[sea_orm(has_many = "super::user_video::Entity")]
    UserVideo,
}

impl Related<super::user_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserProfile.def()
    }
}

impl Related<super::user_video::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserVideo.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && self.date_joined.is_not_set() {
            self.date_joined = Set(chrono::Utc::now());
        }
        Ok(self)
    }
}
