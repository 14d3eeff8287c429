//! Role → menu permission editor.
//!
//! Owns the merged tree for the currently selected role and drives the
//! `NoRoleSelected → Loading → Loaded → Saving → Loaded` cycle. IO happens
//! elsewhere; the editor hands out request tickets and accepts results.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use ustr::Ustr;

use super::model::{MenuId, MenuPermission, Permission, Role};
use super::tree::MenuTree;
use crate::api::roles::RoleMenus;
use crate::error::ApiResult;
use crate::sequence::{RequestSequence, RequestTicket};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorPhase {
    #[default]
    NoRoleSelected,
    Loading {
        role_id: i64,
        ticket: RequestTicket,
    },
    Loaded {
        role_id: i64,
    },
    Saving {
        role_id: i64,
        ticket: RequestTicket,
    },
}

impl EditorPhase {
    pub fn role_id(&self) -> Option<i64> {
        match self {
            Self::NoRoleSelected => None,
            Self::Loading { role_id, .. }
            | Self::Loaded { role_id }
            | Self::Saving { role_id, .. } => Some(*role_id),
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Loading { .. } | Self::Saving { .. })
    }
}

/// A save the caller should perform: `PUT /roles/{role_id}/menus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub ticket: RequestTicket,
    pub role_id: i64,
    pub menus: Vec<MenuPermission>,
}

#[derive(Debug, Default)]
pub struct RoleMenuEditor {
    phase: EditorPhase,
    roles: Vec<Role>,
    tree: MenuTree,
    collapsed: HashSet<Ustr>,
    sequence: RequestSequence,
    dirty: bool,
    last_error: Option<String>,
    last_saved: Option<DateTime<Utc>>,
}

impl RoleMenuEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn selected_role(&self) -> Option<&Role> {
        let role_id = self.phase.role_id()?;
        self.roles.iter().find(|r| r.role_id == role_id)
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn set_roles(&mut self, roles: Vec<Role>) {
        self.roles = roles;
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Start loading `role_id`, discarding whatever tree was on screen.
    ///
    /// The returned ticket must accompany the load result. Refused while a
    /// save is in flight so its outcome is always reported.
    pub fn select_role(&mut self, role_id: i64) -> Option<RequestTicket> {
        if let EditorPhase::Saving { role_id: saving, .. } = self.phase {
            log::debug!("not switching to role {role_id} while role {saving} is saving");
            return None;
        }
        let ticket = self.sequence.issue();
        self.reset_tree();
        self.last_error = None;
        self.phase = EditorPhase::Loading { role_id, ticket };
        log::debug!("loading menus for role {role_id} (ticket {})", ticket.value());
        Some(ticket)
    }

    pub fn finish_loading(&mut self, ticket: RequestTicket, result: ApiResult<RoleMenus>) {
        let EditorPhase::Loading {
            role_id,
            ticket: expected,
        } = self.phase
        else {
            log::debug!("ignoring load result outside of Loading (ticket {})", ticket.value());
            return;
        };
        if ticket != expected || !self.sequence.is_current(ticket) {
            log::debug!("dropping stale menu load (ticket {})", ticket.value());
            return;
        }

        match result {
            Ok(menus) => {
                self.tree = MenuTree::merge(&menus.catalog, &menus.assigned);
                self.phase = EditorPhase::Loaded { role_id };
                log::info!(
                    "role {role_id}: {} menus, {} assigned",
                    self.tree.len(),
                    self.tree.assigned_count()
                );
            }
            Err(err) => {
                log::error!("failed to load menus for role {role_id}: {err}");
                self.reset_tree();
                self.last_error = Some(err.to_string());
                self.phase = EditorPhase::NoRoleSelected;
            }
        }
    }

    /// Flip one bit with cascade. Only allowed while `Loaded`.
    pub fn toggle(&mut self, id: MenuId, permission: Permission) -> Option<bool> {
        if !matches!(self.phase, EditorPhase::Loaded { .. }) {
            return None;
        }
        let value = self.tree.toggle(id, permission)?;
        self.dirty = true;
        Some(value)
    }

    pub fn is_collapsed(&self, module_code: Ustr) -> bool {
        self.collapsed.contains(&module_code)
    }

    pub fn toggle_module(&mut self, module_code: Ustr) {
        if !self.collapsed.remove(&module_code) {
            self.collapsed.insert(module_code);
        }
    }

    /// Move to `Saving` and return the bulk payload, or `None` when no role is loaded.
    pub fn begin_save(&mut self) -> Option<SaveRequest> {
        let EditorPhase::Loaded { role_id } = self.phase else {
            return None;
        };
        let ticket = self.sequence.issue();
        self.phase = EditorPhase::Saving { role_id, ticket };
        self.last_error = None;
        Some(SaveRequest {
            ticket,
            role_id,
            menus: self.tree.to_payload(),
        })
    }

    /// Back to `Loaded` either way; edits survive a failed save.
    pub fn finish_save(&mut self, ticket: RequestTicket, result: ApiResult<()>) {
        let EditorPhase::Saving {
            role_id,
            ticket: expected,
        } = self.phase
        else {
            log::debug!("ignoring save result outside of Saving (ticket {})", ticket.value());
            return;
        };
        if ticket != expected {
            log::debug!("dropping stale save result (ticket {})", ticket.value());
            return;
        }

        self.phase = EditorPhase::Loaded { role_id };
        match result {
            Ok(()) => {
                self.dirty = false;
                self.last_saved = Some(Utc::now());
                log::info!("saved menu permissions for role {role_id}");
            }
            Err(err) => {
                log::error!("failed to save menus for role {role_id}: {err}");
                self.last_error = Some(err.to_string());
            }
        }
    }

    /// Drop the tree and go back to `NoRoleSelected`; an in-flight load is
    /// ignored. Returns `false` while saving.
    pub fn cancel(&mut self) -> bool {
        if matches!(self.phase, EditorPhase::Saving { .. }) {
            return false;
        }
        self.sequence.invalidate();
        self.reset_tree();
        self.phase = EditorPhase::NoRoleSelected;
        true
    }

    fn reset_tree(&mut self) {
        self.tree = MenuTree::default();
        self.collapsed.clear();
        self.dirty = false;
    }
}
