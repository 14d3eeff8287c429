//! Pages reachable from the top menu bar:
//! - `users_page`: server-paginated users table
//! - `role_menus_page`: role → menu permission editor

mod role_menus_page;
mod users_page;

pub use role_menus_page::RoleMenusPage;
pub use users_page::{USERS, UserField, UserRecord, UsersPage};
