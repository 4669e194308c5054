//! Module with response bodies of the user store's REST API
use serde::Deserialize;

use super::UserId;

/// Answer to `POST /users`. The store also sends a human readable message, which is dropped.
#[derive(Deserialize, Debug, PartialEq)]
pub struct CreatedUser {
    pub id: UserId,
}

/// Error body. Validation and server failures come as `error`, missing rows as `message`.
#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_detail(self) -> Option<String> {
        self.error.or(self.message)
    }
}
