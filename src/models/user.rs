use mongodb::bson::serde_helpers::hex_string_as_object_id;
use serde::{Deserialize, Serialize};

/// Registration form as submitted by the client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college_name: String,
    pub year_of_study: String,
}

/// Persisted registration. (email, phone) is unique across the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_id", with = "hex_string_as_object_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college_name: String,
    pub year_of_study: String,
}

impl UserRecord {
    pub fn from_input(id: String, input: RegistrationInput) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            college_name: input.college_name,
            year_of_study: input.year_of_study,
        }
    }
}
