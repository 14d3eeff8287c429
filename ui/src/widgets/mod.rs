pub mod data_table;
pub mod role_menus;

pub use data_table::{TableResponse, show_data_table};
pub use role_menus::{RoleMenusAction, role_menus_panel};
