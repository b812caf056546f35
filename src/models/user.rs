use std::borrow::Cow;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub address: String,
    pub avatar: String,
    pub status: String,
    pub job: String,
    pub pet: String,
    pub identical: String,
}

impl User {
    /// Display value of the composite `fullName` column.
    pub fn full_name(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{} {}", self.first_name, self.last_name))
    }
}

/// Payload of `POST /users`. The server fills in the remaining fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub job: String,
    pub pet: String,
}
