use std::time::Duration;

use log::{debug, info, warn};
use reqwest::{Client, Response, Url};

use super::{
    error::{ConfigError, Operation, RemoteCallFailed},
    models::{
        api_model::{CreatedUser, ErrorBody},
        User, UserFields, UserId,
    },
};

/// A trait, necessary for every entity that will act as the system of record for users.
#[allow(async_fn_in_trait)]
pub trait UserStore {
    async fn list_users(&self) -> Result<Vec<User>, RemoteCallFailed>;

    /// Returns the id the store assigned to the new user.
    async fn create_user(&self, fields: &UserFields) -> Result<UserId, RemoteCallFailed>;

    async fn update_user(&self, id: &UserId, fields: &UserFields) -> Result<(), RemoteCallFailed>;

    async fn delete_user(&self, id: &UserId) -> Result<(), RemoteCallFailed>;
}

/// Talks to the user store's REST API.
#[derive(Debug, Clone)]
pub struct HttpUserStore {
    client: Client,
    base_url: Url,
}

impl HttpUserStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let parsed = Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: base_url.to_owned(),
            source,
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedBaseUrl(base_url.to_owned()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpUserStore {
            client,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `/users` or `/users/{id}` below the base URL, with the id encoded as one segment.
    fn users_url(&self, id: Option<&UserId>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("users");
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        url
    }

    /// Pings the root endpoint, which the store answers with a status message.
    pub async fn check_health(&self) -> Result<(), reqwest::Error> {
        info!("Checking user store at {}", self.base_url);
        self.client
            .get(self.base_url.clone())
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/* turn a non-success status into a failure, keeping whatever the store said about it */
async fn expect_success(
    operation: Operation,
    response: Response,
) -> Result<Response, RemoteCallFailed> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(ErrorBody::into_detail);
    warn!("{} request answered with {} ({:?})", operation, status, detail);
    Err(RemoteCallFailed::status(operation, status, detail))
}

/// Allows HttpUserStore to serve as the remote store via plain REST requests.
impl UserStore for HttpUserStore {
    async fn list_users(&self) -> Result<Vec<User>, RemoteCallFailed> {
        let url = self.users_url(None);
        info!("GET {}", url);
        let transport = |err: reqwest::Error| RemoteCallFailed::transport(Operation::List, err);
        let response = self.client.get(url).send().await.map_err(transport)?;
        let users: Vec<User> = expect_success(Operation::List, response)
            .await?
            .json()
            .await
            .map_err(transport)?;
        debug!("Store listed {} users", users.len());
        Ok(users)
    }

    async fn create_user(&self, fields: &UserFields) -> Result<UserId, RemoteCallFailed> {
        let url = self.users_url(None);
        info!("POST {}", url);
        let transport = |err: reqwest::Error| RemoteCallFailed::transport(Operation::Create, err);
        let response = self
            .client
            .post(url)
            .json(fields)
            .send()
            .await
            .map_err(transport)?;
        let created: CreatedUser = expect_success(Operation::Create, response)
            .await?
            .json()
            .await
            .map_err(transport)?;
        debug!("Store assigned id {} to {}", created.id, fields.name);
        Ok(created.id)
    }

    async fn update_user(&self, id: &UserId, fields: &UserFields) -> Result<(), RemoteCallFailed> {
        let url = self.users_url(Some(id));
        info!("PUT {}", url);
        let response = self
            .client
            .put(url)
            .json(fields)
            .send()
            .await
            .map_err(|err| RemoteCallFailed::transport(Operation::Update, err))?;
        expect_success(Operation::Update, response).await?;
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), RemoteCallFailed> {
        let url = self.users_url(Some(id));
        info!("DELETE {}", url);
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|err| RemoteCallFailed::transport(Operation::Delete, err))?;
        expect_success(Operation::Delete, response).await?;
        Ok(())
    }
}
