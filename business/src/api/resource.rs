//! Generic CRUD collaborator for list/form entity screens.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{ListQuery, ListResponse, MutationResponse, decode};
use crate::error::ApiResult;
use crate::session::Session;

/// REST resource rooted at `path`, e.g. `"/users"`.
///
/// - `GET    {path}?page=&per_page=&search=` → [`ListResponse<T>`]
/// - `POST   {path}`                          → [`MutationResponse`]
/// - `PUT    {path}/{id}`                     → [`MutationResponse`]
/// - `DELETE {path}/{id}`                     → [`MutationResponse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceApi<T> {
    path: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> ResourceApi<T> {
    pub const fn new(path: &'static str) -> Self {
        Self {
            path,
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    fn item_path(&self, id: impl std::fmt::Display) -> String {
        format!("{}/{id}", self.path.trim_end_matches('/'))
    }

    pub async fn list(&self, session: &Session, query: &ListQuery) -> ApiResult<ListResponse<T>> {
        let response = session
            .get(self.path)?
            .query(query.to_params())
            .send()
            .await?;
        decode(&response, "list response")
    }

    pub async fn create<B: Serialize>(
        &self,
        session: &Session,
        body: &B,
    ) -> ApiResult<MutationResponse> {
        let response = session
            .post(self.path)?
            .json(body)
            .map_err(|e| crate::error::ApiError::decode("request body", e))?
            .send()
            .await?;
        decode::<MutationResponse>(&response, "create response")?.into_result()
    }

    pub async fn update<B: Serialize>(
        &self,
        session: &Session,
        id: i64,
        body: &B,
    ) -> ApiResult<MutationResponse> {
        let response = session
            .put(&self.item_path(id))?
            .json(body)
            .map_err(|e| crate::error::ApiError::decode("request body", e))?
            .send()
            .await?;
        decode::<MutationResponse>(&response, "update response")?.into_result()
    }

    pub async fn delete(&self, session: &Session, id: i64) -> ApiResult<MutationResponse> {
        let response = session.delete(&self.item_path(id))?.send().await?;
        decode::<MutationResponse>(&response, "delete response")?.into_result()
    }
}
