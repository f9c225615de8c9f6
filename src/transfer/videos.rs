use chrono::NaiveDate;
use model::entities::user_video;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Video fields accepted from clients. Owner and creation date are set by the server.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct VideoPayload {
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub video_title: Option<String>,
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub video_duration: Option<String>,
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub video_image: Option<String>,
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub video_text: Option<String>,
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub video_effect: Option<String>,
}

impl VideoPayload {
    pub fn new_video(self, user_id: i32) -> user_video::ActiveModel {
        user_video::ActiveModel {
            user_id: Set(user_id),
            video_title: Set(self.video_title),
            video_duration: Set(self.video_duration),
            video_image: Set(self.video_image),
            video_text: Set(self.video_text),
            video_effect: Set(self.video_effect),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VideoResponse {
    pub id: i32,
    /// Owner user id
    pub user: i32,
    pub video_title: Option<String>,
    pub video_duration: Option<String>,
    pub video_image: Option<String>,
    pub video_text: Option<String>,
    pub video_effect: Option<String>,
    pub date_created: NaiveDate,
}

impl From<user_video::Model> for VideoResponse {
    fn from(model: user_video::Model) -> Self {
        Self {
            id: model.id,
            user: model.user_id,
            video_title: model.video_title,
            video_duration: model.video_duration,
            video_image: model.video_image,
            video_text: model.video_text,
            video_effect: model.video_effect,
            date_created: model.date_created,
        }
    }
}

/// Query parameters for listing videos
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct VideoListQuery {
    /// Page number, starting at 1. Without it every video is returned.
    #[validate(range(min = 1, max = 10000))]
    pub page: Option<u64>,
    /// Page size (default: 50)
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<u64>,
}

/// Placeholder answer of the video update endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MethodEchoResponse {
    pub method: String,
}

impl MethodEchoResponse {
    pub fn new(method: &str) -> Self {
        Self {
            method: method.to_string(),
        }
    }
}
