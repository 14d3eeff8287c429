//! Role → menu permissions page.

use egui::{Color32, Ui};
use erpdesk_business::api::roles::{self, RoleMenus};
use erpdesk_business::menu::{Role, RoleMenuEditor};
use erpdesk_business::{ApiResult, RequestTicket, Session};

use crate::tasks::TaskRunner;
use crate::widgets::{RoleMenusAction, role_menus_panel};

enum RoleMenusMsg {
    Roles(ApiResult<Vec<Role>>),
    Menus(RequestTicket, ApiResult<RoleMenus>),
    Saved(RequestTicket, ApiResult<()>),
}

pub struct RoleMenusPage {
    session: Session,
    tasks: TaskRunner,
    editor: RoleMenuEditor,
    tx: flume::Sender<RoleMenusMsg>,
    rx: flume::Receiver<RoleMenusMsg>,
    roles_error: Option<String>,
    started: bool,
}

impl RoleMenusPage {
    pub fn new(session: Session, tasks: TaskRunner) -> Self {
        let (tx, rx) = flume::unbounded();
        Self {
            session,
            tasks,
            editor: RoleMenuEditor::new(),
            tx,
            rx,
            roles_error: None,
            started: false,
        }
    }

    pub fn editor(&self) -> &RoleMenuEditor {
        &self.editor
    }

    fn load_roles(&mut self, ctx: &egui::Context) {
        let session = self.session.clone();
        self.tasks.spawn(ctx, self.tx.clone(), async move {
            RoleMenusMsg::Roles(roles::list_roles(&session).await)
        });
    }

    fn load_menus(&mut self, ctx: &egui::Context, role_id: i64) {
        let Some(ticket) = self.editor.select_role(role_id) else {
            return;
        };
        let session = self.session.clone();
        self.tasks.spawn(ctx, self.tx.clone(), async move {
            RoleMenusMsg::Menus(ticket, roles::load_role_menus(&session, role_id).await)
        });
    }

    fn save(&mut self, ctx: &egui::Context) {
        let Some(request) = self.editor.begin_save() else {
            return;
        };
        let session = self.session.clone();
        self.tasks.spawn(ctx, self.tx.clone(), async move {
            let result = roles::update_role_menus(&session, request.role_id, &request.menus).await;
            RoleMenusMsg::Saved(request.ticket, result)
        });
    }

    fn poll(&mut self) {
        for message in self.rx.try_iter() {
            match message {
                RoleMenusMsg::Roles(Ok(roles)) => {
                    self.roles_error = None;
                    self.editor.set_roles(roles);
                }
                RoleMenusMsg::Roles(Err(err)) => {
                    log::error!("failed to load roles: {err}");
                    self.roles_error = Some(err.to_string());
                }
                RoleMenusMsg::Menus(ticket, result) => self.editor.finish_loading(ticket, result),
                RoleMenusMsg::Saved(ticket, result) => self.editor.finish_save(ticket, result),
            }
        }
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        let ctx = ui.ctx().clone();
        if !self.started {
            self.started = true;
            self.load_roles(&ctx);
        }
        self.poll();

        ui.heading("Role Menu Permissions");
        if let Some(error) = &self.roles_error {
            ui.colored_label(Color32::RED, format!("Error: {error}"));
        }

        match role_menus_panel(ui, &mut self.editor) {
            Some(RoleMenusAction::SelectRole(role_id)) => self.load_menus(&ctx, role_id),
            Some(RoleMenusAction::Save) => self.save(&ctx),
            Some(RoleMenusAction::Cancel) => {
                self.editor.cancel();
            }
            Some(RoleMenusAction::ReloadRoles) => self.load_roles(&ctx),
            None => {}
        }
    }
}
