//! Role → menu permission editor widgets.

mod panel;
mod tree;

pub use panel::{RoleMenusAction, role_menus_panel};
