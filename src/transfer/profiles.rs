use model::entities::user_profile;
use sea_orm::{ActiveValue, IntoActiveModel, Set};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Profile fields accepted from clients. The owner is always the caller.
///
/// Each field is `None` when left out of the body and `Some(None)` when sent
/// as `null`, so an update can tell "keep" from "clear".
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct ProfilePayload {
    #[serde(default, deserialize_with = "explicit_null", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub gender: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub phone_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub address: Option<Option<String>>,
}

/// Only called for keys present in the body; absent keys fall back to `default`.
fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

fn apply(column: &mut ActiveValue<Option<String>>, value: Option<Option<String>>) {
    if let Some(value) = value {
        *column = Set(value);
    }
}

impl ProfilePayload {
    /// New profile row owned by `user_id`
    pub fn new_profile(self, user_id: i32) -> user_profile::ActiveModel {
        user_profile::ActiveModel {
            user_id: Set(user_id),
            first_name: Set(self.first_name.flatten()),
            last_name: Set(self.last_name.flatten()),
            gender: Set(self.gender.flatten()),
            phone_number: Set(self.phone_number.flatten()),
            address: Set(self.address.flatten()),
            ..Default::default()
        }
    }

    /// Update `existing` with the fields present in the payload.
    ///
    /// A field sent as `null` is cleared; a field left out keeps its value.
    /// Used by both PUT and PATCH, since every profile field is optional.
    pub fn apply_to(self, existing: user_profile::Model) -> user_profile::ActiveModel {
        let mut profile = existing.into_active_model();
        apply(&mut profile.first_name, self.first_name);
        apply(&mut profile.last_name, self.last_name);
        apply(&mut profile.gender, self.gender);
        apply(&mut profile.phone_number, self.phone_number);
        apply(&mut profile.address, self.address);
        profile
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub id: i32,
    /// Owner user id
    pub user: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

impl From<user_profile::Model> for ProfileResponse {
    fn from(model: user_profile::Model) -> Self {
        Self {
            id: model.id,
            user: model.user_id,
            first_name: model.first_name,
            last_name: model.last_name,
            gender: model.gender,
            phone_number: model.phone_number,
            address: model.address,
        }
    }
}
