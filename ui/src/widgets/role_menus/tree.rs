//! Permission grid for one module group.

use egui::{CollapsingHeader, Grid, RichText, Ui};
use erpdesk_business::menu::{EditorPhase, MenuId, ModuleGroup, Permission, RoleMenuEditor};

const INDENT: f32 = 18.0;

/// Renders a collapsible module group. Toggles are applied after the grid is
/// drawn so the cascade is visible on the next frame.
pub fn render_module(ui: &mut Ui, editor: &mut RoleMenuEditor, group: &ModuleGroup) {
    let collapsed = editor.is_collapsed(group.module_code);
    let editable = matches!(editor.phase(), EditorPhase::Loaded { .. });
    let mut toggles: Vec<(MenuId, Permission)> = Vec::new();

    let response = CollapsingHeader::new(RichText::new(group.module_code.as_str()).strong())
        .id_salt(("module", group.module_code.as_str()))
        .open(Some(!collapsed))
        .show(ui, |ui| {
            let tree = editor.tree();
            Grid::new(("module_grid", group.module_code.as_str()))
                .num_columns(Permission::ALL.len() + 2)
                .striped(true)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    ui.strong("Menu");
                    for permission in Permission::ALL {
                        ui.strong(permission.label());
                    }
                    ui.strong("Assigned");
                    ui.end_row();

                    for row in tree.module_rows(group) {
                        let Some(node) = tree.node(row.id) else {
                            continue;
                        };

                        ui.horizontal(|ui| {
                            ui.add_space(row.depth as f32 * INDENT);
                            if tree.has_children(row.id) {
                                ui.strong(&node.name);
                            } else {
                                ui.label(&node.name);
                            }
                        });

                        for permission in Permission::ALL {
                            let mut checked = node.permissions.get(permission);
                            let checkbox = ui
                                .add_enabled(editable, egui::Checkbox::without_text(&mut checked))
                                .on_hover_text(format!("{} {}", permission.label(), node.name));
                            if checkbox.changed() {
                                toggles.push((row.id, permission));
                            }
                        }

                        ui.label(if node.is_assigned() { "Yes" } else { "No" });
                        ui.end_row();
                    }
                });
        });

    if response.header_response.clicked() {
        editor.toggle_module(group.module_code);
    }
    for (id, permission) in toggles {
        editor.toggle(id, permission);
    }
}
