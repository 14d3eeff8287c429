//! Request/response envelopes shared by every collaborator endpoint.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::http::Response;

/// Query for any paginated list endpoint: `?page=&per_page=&search=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: usize,
    pub per_page: usize,
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
            search: None,
        }
    }

    /// Attach a search term; blank terms are dropped.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.trim().is_empty() {
            None
        } else {
            Some(search)
        };
        self
    }

    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_owned(), self.page.to_string()),
            ("per_page".to_owned(), self.per_page.to_string()),
        ];
        if let Some(search) = &self.search {
            params.push(("search".to_owned(), search.clone()));
        }
        params
    }
}

/// `{ data: T[], total, page? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub page: Option<usize>,
}

impl<T> ListResponse<T> {
    /// Total row count, never smaller than what this page actually carried.
    pub fn total_items(&self) -> usize {
        self.total.max(self.data.len())
    }
}

/// `{ success, message?, data? }` returned by create/update/delete endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationResponse<T = serde_json::Value> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> MutationResponse<T> {
    /// Turn `success: false` into [`ApiError::Rejected`].
    pub fn into_result(self) -> ApiResult<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(ApiError::Rejected(
                self.message
                    .unwrap_or_else(|| "The request was rejected".to_owned()),
            ))
        }
    }
}

/// Check the status code and decode the JSON body.
///
/// Non-2xx responses surface the backend's `message` field when present.
pub(crate) fn decode<T: DeserializeOwned>(response: &Response, what: &'static str) -> ApiResult<T> {
    if !response.is_success() {
        #[derive(Deserialize)]
        struct ErrorBody {
            message: Option<String>,
        }

        let message = response
            .json::<ErrorBody>()
            .ok()
            .and_then(|body| body.message);
        return Err(ApiError::Status {
            status: response.status,
            message,
        });
    }

    response.json().map_err(|e| ApiError::decode(what, e))
}
