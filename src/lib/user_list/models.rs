use std::{convert::Infallible, fmt, path::PathBuf, str::FromStr};

use clap::Parser;
use serde::{Deserialize, Serialize};

pub mod api_model;

/// Identifier assigned by the remote user store.
/// The store in use hands out integer primary keys, but nothing here relies on that,
/// so string ids are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum UserId {
    Number(u64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(id) => write!(f, "{}", id),
            UserId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for UserId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<u64>() {
            Ok(id) => UserId::Number(id),
            Err(_) => UserId::Text(s.to_owned()),
        })
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        UserId::Number(id)
    }
}

/// A user record as the remote store lists it.
/// Any extra columns the store sends along are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Body of create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserFields {
    pub name: String,
    pub email: String,
}

/// Contents of the create/edit form.
/// `target_id` is `None` while creating and holds the edited user's id while editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDraft {
    pub name: String,
    pub email: String,
    pub target_id: Option<UserId>,
}

impl EditDraft {
    pub fn for_user(user: &User) -> Self {
        EditDraft {
            name: user.name.clone(),
            email: user.email.clone(),
            target_id: Some(user.id.clone()),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.target_id.is_some()
    }

    pub fn fields(&self) -> UserFields {
        UserFields {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// A model for describing ARGS of the tool.
/// Consists of:
/// 1. Path to config.json, that contains the remote store address and request timeout.
/// 2. Optional base URL of the remote store, overriding whatever the config says.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, value_name = "FILE", default_value = "config.json")]
    pub config_json_path: PathBuf,
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

/// A model for describing configuration of the tool.
/// Consists of:
/// 1. Base URL of the remote user store
/// 2. Timeout for a single request, in seconds
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: "http://127.0.0.1:5000".to_owned(),
            request_timeout_secs: 10,
        }
    }
}
