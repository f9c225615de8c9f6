//! SeaORM entity modules for accounts, their profile and their videos.

pub mod user;
pub mod user_profile;
pub mod user_video;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::user::Entity as User;
    pub use super::user_profile::Entity as UserProfile;
    pub use super::user_video::Entity as UserVideo;
}
