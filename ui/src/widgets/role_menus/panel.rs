//! Role selector, save/cancel toolbar and the module groups.

use egui::{Color32, ComboBox, ScrollArea, Ui};
use erpdesk_business::menu::{EditorPhase, RoleMenuEditor};

use super::tree::render_module;

/// A request the owning page has to carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleMenusAction {
    SelectRole(i64),
    Save,
    Cancel,
    ReloadRoles,
}

pub fn role_menus_panel(ui: &mut Ui, editor: &mut RoleMenuEditor) -> Option<RoleMenusAction> {
    let mut action = None;
    let phase = editor.phase();

    // a running save pins the role until its outcome is known
    let saving = matches!(phase, EditorPhase::Saving { .. });

    ui.horizontal(|ui| {
        ui.label("Role:");
        let selected_text = editor
            .selected_role()
            .map(|role| role.role_name.clone())
            .unwrap_or_else(|| "Select role".to_owned());

        ui.add_enabled_ui(!saving, |ui| {
            ComboBox::from_id_salt("role_select")
                .selected_text(selected_text)
                .width(200.0)
                .show_ui(ui, |ui| {
                    for role in editor.roles() {
                        let selected = phase.role_id() == Some(role.role_id);
                        if ui.selectable_label(selected, &role.role_name).clicked() && !selected {
                            action = Some(RoleMenusAction::SelectRole(role.role_id));
                        }
                    }
                });
        });

        if ui.button("Reload roles").clicked() {
            action = Some(RoleMenusAction::ReloadRoles);
        }

        let loaded = matches!(phase, EditorPhase::Loaded { .. });
        if ui.add_enabled(loaded, egui::Button::new("Save")).clicked() {
            action = Some(RoleMenusAction::Save);
        }
        if ui
            .add_enabled(
                phase.role_id().is_some() && !saving,
                egui::Button::new("Cancel"),
            )
            .clicked()
        {
            action = Some(RoleMenusAction::Cancel);
        }
    });

    render_status(ui, editor);
    ui.separator();

    if matches!(phase, EditorPhase::Loaded { .. } | EditorPhase::Saving { .. }) {
        let modules = editor.tree().modules().to_vec();
        ScrollArea::vertical().show(ui, |ui| {
            for group in &modules {
                render_module(ui, editor, group);
            }
        });
    }

    action
}

fn render_status(ui: &mut Ui, editor: &RoleMenuEditor) {
    ui.horizontal(|ui| match editor.phase() {
        EditorPhase::NoRoleSelected => {
            ui.label("Select a role to edit its menu permissions.");
        }
        EditorPhase::Loading { .. } => {
            ui.spinner();
            ui.label("Loading menus...");
        }
        EditorPhase::Saving { .. } => {
            ui.spinner();
            ui.label("Saving...");
        }
        EditorPhase::Loaded { .. } => {
            let tree = editor.tree();
            ui.label(format!(
                "{} of {} menus assigned",
                tree.assigned_count(),
                tree.len()
            ));
            if editor.is_dirty() {
                ui.colored_label(Color32::from_rgb(255, 165, 0), "Unsaved changes");
            } else if let Some(saved) = editor.last_saved() {
                ui.weak(format!("Saved at {}", saved.format("%H:%M:%S")));
            }
        }
    });

    if let Some(error) = editor.last_error() {
        ui.colored_label(Color32::RED, format!("Error: {error}"));
    }
}
