pub mod health;
pub mod profile;
pub mod registration;
pub mod session;
pub mod videos;
