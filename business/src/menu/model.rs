//! Menu catalog records, permission bits and the save payload.

use serde::{Deserialize, Serialize};
use ustr::Ustr;

use crate::api::lenient;

/// Numeric menu identifier (the backend may send it as a string).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuId(pub i64);

impl std::fmt::Display for MenuId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the six grantable capabilities on a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    Create,
    Update,
    Delete,
    Import,
    Export,
    Print,
}

impl Permission {
    /// Display order of the capability columns.
    pub const ALL: [Self; 6] = [
        Self::Create,
        Self::Update,
        Self::Delete,
        Self::Import,
        Self::Export,
        Self::Print,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
            Self::Import => "Import",
            Self::Export => "Export",
            Self::Print => "Print",
        }
    }
}

/// The six permission bits of a menu node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(rename = "can_create", default, deserialize_with = "lenient::flag")]
    pub create: bool,
    #[serde(rename = "can_update", default, deserialize_with = "lenient::flag")]
    pub update: bool,
    #[serde(rename = "can_delete", default, deserialize_with = "lenient::flag")]
    pub delete: bool,
    #[serde(rename = "can_import", default, deserialize_with = "lenient::flag")]
    pub import: bool,
    #[serde(rename = "can_export", default, deserialize_with = "lenient::flag")]
    pub export: bool,
    #[serde(rename = "can_print", default, deserialize_with = "lenient::flag")]
    pub print: bool,
}

impl Permissions {
    pub const NONE: Self = Self {
        create: false,
        update: false,
        delete: false,
        import: false,
        export: false,
        print: false,
    };

    pub fn get(&self, permission: Permission) -> bool {
        match permission {
            Permission::Create => self.create,
            Permission::Update => self.update,
            Permission::Delete => self.delete,
            Permission::Import => self.import,
            Permission::Export => self.export,
            Permission::Print => self.print,
        }
    }

    pub fn set(&mut self, permission: Permission, value: bool) {
        let bit = match permission {
            Permission::Create => &mut self.create,
            Permission::Update => &mut self.update,
            Permission::Delete => &mut self.delete,
            Permission::Import => &mut self.import,
            Permission::Export => &mut self.export,
            Permission::Print => &mut self.print,
        };
        *bit = value;
    }

    /// True when at least one bit is granted.
    pub fn any(&self) -> bool {
        Permission::ALL.iter().any(|p| self.get(*p))
    }
}

/// A menu row as returned by `GET /menus` (catalog, flags absent) or
/// `GET /roles/{id}/menus` (assignment, flags present).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuRecord {
    #[serde(deserialize_with = "lenient::id")]
    pub menu_id: i64,
    #[serde(default)]
    pub menu_name: String,
    #[serde(default)]
    pub menu_code: String,
    #[serde(default)]
    pub module_code: String,
    #[serde(default, deserialize_with = "lenient::optional_id")]
    pub parent_menu_id: Option<i64>,
    #[serde(flatten)]
    pub permissions: Permissions,
}

impl MenuRecord {
    pub fn id(&self) -> MenuId {
        MenuId(self.menu_id)
    }
}

/// A node of the editable permission tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    pub id: MenuId,
    pub name: String,
    pub code: String,
    pub module_code: Ustr,
    pub parent_id: Option<MenuId>,
    pub permissions: Permissions,
}

impl MenuNode {
    /// Build a node from catalog data, taking permission bits from `assignment`.
    pub fn from_record(record: &MenuRecord, assignment: Option<&MenuRecord>) -> Self {
        Self {
            id: record.id(),
            name: record.menu_name.clone(),
            code: record.menu_code.clone(),
            module_code: Ustr::from(record.module_code.trim()),
            parent_id: record.parent_menu_id.map(MenuId),
            permissions: assignment
                .map(|a| a.permissions)
                .unwrap_or(Permissions::NONE),
        }
    }

    /// Derived: the role holds at least one capability on this menu.
    pub fn is_assigned(&self) -> bool {
        self.permissions.any()
    }

    pub fn to_permission(&self) -> MenuPermission {
        MenuPermission {
            menu_id: self.id,
            permissions: self.permissions,
            is_assigned: self.is_assigned(),
        }
    }
}

/// One entry of the bulk `PUT /roles/{id}/menus` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuPermission {
    pub menu_id: MenuId,
    #[serde(flatten)]
    pub permissions: Permissions,
    pub is_assigned: bool,
}

/// A role as listed by `GET /roles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(deserialize_with = "lenient::id")]
    pub role_id: i64,
    #[serde(default)]
    pub role_name: String,
    #[serde(default)]
    pub description: Option<String>,
}
