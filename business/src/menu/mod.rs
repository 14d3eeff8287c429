//! Menu permission tree for role-based access control.

mod editor;
mod model;
mod tree;

pub use editor::{EditorPhase, RoleMenuEditor, SaveRequest};
pub use model::{MenuId, MenuNode, MenuPermission, MenuRecord, Permission, Permissions, Role};
pub use tree::{MenuTree, ModuleGroup, TreeRow};
