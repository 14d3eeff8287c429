//! Role and menu endpoints backing the permission editor.

use serde::{Deserialize, Serialize};

use super::types::{MutationResponse, decode};
use crate::error::{ApiError, ApiResult};
use crate::http::Response;
use crate::menu::{MenuPermission, MenuRecord, Role};
use crate::session::Session;

/// Catalog plus one role's sparse assignments, fetched together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleMenus {
    pub catalog: Vec<MenuRecord>,
    pub assigned: Vec<MenuRecord>,
}

/// List endpoints here answer either `{ "data": [...] }` or a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Wrapped { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

fn decode_listing<T: serde::de::DeserializeOwned>(
    response: &Response,
    what: &'static str,
) -> ApiResult<Vec<T>> {
    decode::<Listing<T>>(response, what).map(Listing::into_vec)
}

#[derive(Serialize)]
struct SaveMenusBody<'a> {
    menus: &'a [MenuPermission],
}

pub async fn list_roles(session: &Session) -> ApiResult<Vec<Role>> {
    let response = session.get("/roles")?.send().await?;
    decode_listing(&response, "roles")
}

/// The global menu catalog (no permission flags).
pub async fn list_menus(session: &Session) -> ApiResult<Vec<MenuRecord>> {
    let response = session.get("/menus")?.send().await?;
    decode_listing(&response, "menus")
}

/// Menus assigned to `role_id`, with their permission flags.
pub async fn list_role_menus(session: &Session, role_id: i64) -> ApiResult<Vec<MenuRecord>> {
    let response = session
        .get(&format!("/roles/{role_id}/menus"))?
        .send()
        .await?;
    decode_listing(&response, "role menus")
}

/// Fetch catalog and assignments concurrently.
pub async fn load_role_menus(session: &Session, role_id: i64) -> ApiResult<RoleMenus> {
    let (catalog, assigned) = tokio::join!(list_menus(session), list_role_menus(session, role_id));
    Ok(RoleMenus {
        catalog: catalog?,
        assigned: assigned?,
    })
}

/// Replace every menu permission of `role_id` in one request.
pub async fn update_role_menus(
    session: &Session,
    role_id: i64,
    menus: &[MenuPermission],
) -> ApiResult<()> {
    let response = session
        .put(&format!("/roles/{role_id}/menus"))?
        .json(&SaveMenusBody { menus })
        .map_err(|e| ApiError::decode("menu payload", e))?
        .send()
        .await?;

    decode::<MutationResponse>(&response, "save response")?.into_result()?;
    log::info!("saved {} menu permissions for role {role_id}", menus.len());
    Ok(())
}
