//! Explicit session context.
//!
//! Every collaborator call takes a `&Session` instead of reading the auth token
//! or the current user from some global store. The UI owns one `Session` and
//! hands clones to background tasks.

use serde::{Deserialize, Serialize};
use ustr::Ustr;

use crate::BusinessConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::{Client, RequestBuilder};

/// The signed-in user, as far as the front-end cares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub role_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct Session {
    api_url: Ustr,
    token: Option<String>,
    user: Option<SessionUser>,
}

impl Session {
    pub fn new(api_url: impl Into<Ustr>) -> Self {
        Self {
            api_url: api_url.into(),
            token: None,
            user: None,
        }
    }

    /// Build an anonymous-or-token session from the loaded configuration.
    pub fn from_config(config: &BusinessConfig) -> Self {
        Self {
            api_url: config.api_url(),
            token: config.api_token.clone(),
            user: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_user(mut self, user: SessionUser) -> Self {
        self.user = Some(user);
        self
    }

    pub fn api_url(&self) -> Ustr {
        self.api_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Resolve `path` against the API base, e.g. `"/roles"` → `".../api/roles"`.
    pub fn endpoint(&self, path: &str) -> ApiResult<String> {
        let base = self.api_url.as_str().trim();
        if base.is_empty() {
            return Err(ApiError::MissingBaseUrl);
        }
        let path = path.trim_start_matches('/');
        Ok(format!("{}/{path}", base.trim_end_matches('/')))
    }

    pub fn get(&self, path: &str) -> ApiResult<RequestBuilder> {
        Ok(Client::get(self.endpoint(path)?).bearer(self.token()))
    }

    pub fn post(&self, path: &str) -> ApiResult<RequestBuilder> {
        Ok(Client::post(self.endpoint(path)?).bearer(self.token()))
    }

    pub fn put(&self, path: &str) -> ApiResult<RequestBuilder> {
        Ok(Client::put(self.endpoint(path)?).bearer(self.token()))
    }

    pub fn delete(&self, path: &str) -> ApiResult<RequestBuilder> {
        Ok(Client::delete(self.endpoint(path)?).bearer(self.token()))
    }
}
