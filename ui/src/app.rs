use erpdesk_business::table::TableError;
use erpdesk_business::{BusinessConfig, Session};

use crate::pages::{RoleMenusPage, UsersPage};
use crate::tasks::TaskRunner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Users,
    RoleMenus,
}

pub struct ErpDeskApp {
    session: Session,
    page: Page,
    users: UsersPage,
    role_menus: RoleMenusPage,
}

impl ErpDeskApp {
    /// Called once before the first frame.
    pub fn new(config: &BusinessConfig, tasks: TaskRunner) -> Result<Self, TableError> {
        let session = Session::from_config(config);
        Ok(Self {
            users: UsersPage::new(
                session.clone(),
                tasks.clone(),
                config.page_size,
                config.export_dir.clone(),
            )?,
            role_menus: RoleMenusPage::new(session.clone(), tasks),
            session,
            page: Page::default(),
        })
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn set_page(&mut self, page: Page) {
        self.page = page;
    }

    pub fn users(&self) -> &UsersPage {
        &self.users
    }

    pub fn role_menus(&self) -> &RoleMenusPage {
        &self.role_menus
    }
}

impl eframe::App for ErpDeskApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.selectable_value(&mut self.page, Page::Users, "Users");
                ui.selectable_value(&mut self.page, Page::RoleMenus, "Role Menus");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(self.session.api_url().as_str());
                    if let Some(user) = self.session.user() {
                        ui.label(&user.username);
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.page {
            Page::Users => self.users.ui(ui),
            Page::RoleMenus => self.role_menus.ui(ui),
        });
    }
}
