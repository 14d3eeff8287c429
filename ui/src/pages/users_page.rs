//! Users list: a server-paginated table backed by `GET /users`.
//!
//! Every list request takes a ticket from the page's `RequestSequence`; only
//! the response to the newest request reaches the table.

use std::path::PathBuf;

use egui::{Color32, Ui};
use erpdesk_business::api::lenient;
use erpdesk_business::api::{ListQuery, ListResponse, MutationResponse, ResourceApi};
use erpdesk_business::table::{
    CellValue, Column, Columns, DataTable, RowActions, TableError, TableEvent, TableOptions,
    TableRecord,
};
use erpdesk_business::{ApiResult, RequestSequence, Sequenced, Session};
use serde::Deserialize;

use crate::tasks::TaskRunner;
use crate::widgets::show_data_table;

pub const USERS: ResourceApi<UserRecord> = ResourceApi::new("/users");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    Id,
    Username,
    Email,
    Role,
    Active,
}

impl TableRecord for UserRecord {
    type Field = UserField;

    fn value(&self, field: Self::Field) -> CellValue {
        match field {
            UserField::Id => self.id.into(),
            UserField::Username => self.username.as_str().into(),
            UserField::Email => self.email.as_str().into(),
            UserField::Role => self.role_name.clone().into(),
            UserField::Active => self.is_active.into(),
        }
    }
}

fn user_columns() -> Result<Columns<UserRecord>, TableError> {
    let columns = vec![
        Column::new(UserField::Id, "ID"),
        Column::new(UserField::Username, "Username"),
        Column::new(UserField::Email, "Email"),
        Column::new(UserField::Role, "Role"),
        Column::new(UserField::Active, "Status").with_render(|value, _| {
            match value {
                CellValue::Bool(true) => "Active",
                _ => "Inactive",
            }
            .to_owned()
        }),
    ];
    Columns::new(columns)
}

enum UsersMsg {
    Page(Sequenced<(usize, ApiResult<ListResponse<UserRecord>>)>),
    Mutation(&'static str, ApiResult<MutationResponse>),
}

/// Inline edit form for one user.
#[derive(Debug, Clone)]
struct UserForm {
    id: i64,
    username: String,
    email: String,
}

pub struct UsersPage {
    session: Session,
    tasks: TaskRunner,
    table: DataTable<UserRecord>,
    sequence: RequestSequence,
    tx: flume::Sender<UsersMsg>,
    rx: flume::Receiver<UsersMsg>,
    search: Option<String>,
    export_dir: PathBuf,
    started: bool,
    error: Option<String>,
    notice: Option<String>,
    editing: Option<UserForm>,
}

impl UsersPage {
    pub fn new(
        session: Session,
        tasks: TaskRunner,
        page_size: usize,
        export_dir: PathBuf,
    ) -> Result<Self, TableError> {
        let current_user = session.user().map(|u| u.user_id);
        let options = TableOptions::new("Users")
            .with_page_size(page_size)
            .with_actions(RowActions {
                edit: true,
                delete: true,
                row_click: false,
                refresh: true,
                external_search: true,
            })
            // nobody deletes their own account from here
            .with_can_delete(move |user: &UserRecord| Some(user.id) != current_user);
        let (tx, rx) = flume::unbounded();

        Ok(Self {
            session,
            tasks,
            table: DataTable::server(user_columns()?, options),
            sequence: RequestSequence::new(),
            tx,
            rx,
            search: None,
            export_dir,
            started: false,
            error: None,
            notice: None,
            editing: None,
        })
    }

    pub fn table(&self) -> &DataTable<UserRecord> {
        &self.table
    }

    fn request_page(&mut self, ctx: &egui::Context, page: usize) {
        let ticket = self.sequence.issue();
        let query = ListQuery::new(page, self.table.options().page_size)
            .with_search(self.search.clone().unwrap_or_default());
        self.table.set_loading(true);
        self.error = None;

        let session = self.session.clone();
        self.tasks.spawn(ctx, self.tx.clone(), async move {
            let result = USERS.list(&session, &query).await;
            UsersMsg::Page(Sequenced::new(ticket, (query.page, result)))
        });
    }

    fn mutate(&mut self, ctx: &egui::Context, what: &'static str, request: MutationRequest) {
        let session = self.session.clone();
        self.tasks.spawn(ctx, self.tx.clone(), async move {
            let result = match request {
                MutationRequest::Update(id, body) => USERS.update(&session, id, &body).await,
                MutationRequest::Delete(id) => USERS.delete(&session, id).await,
            };
            UsersMsg::Mutation(what, result)
        });
    }

    fn poll(&mut self, ctx: &egui::Context) {
        let messages: Vec<UsersMsg> = self.rx.try_iter().collect();
        for message in messages {
            match message {
                UsersMsg::Page(response) => {
                    let Some((requested, result)) = response.accept(&self.sequence) else {
                        continue;
                    };
                    match result {
                        Ok(list) => {
                            let total = list.total_items();
                            let page = list.page.unwrap_or(requested);
                            if let Some(event) = self.table.set_server_page(list.data, total, page) {
                                self.handle_event(ctx, event);
                            }
                        }
                        Err(err) => {
                            log::error!("failed to load users: {err}");
                            self.table.set_loading(false);
                            self.error = Some(err.to_string());
                        }
                    }
                }
                UsersMsg::Mutation(what, result) => match result {
                    Ok(response) => {
                        self.notice = Some(
                            response
                                .message
                                .unwrap_or_else(|| format!("User {what}")),
                        );
                        self.request_page(ctx, self.table.current_page());
                    }
                    Err(err) => {
                        log::error!("user {what} failed: {err}");
                        self.error = Some(err.to_string());
                    }
                },
            }
        }
    }

    fn handle_event(&mut self, ctx: &egui::Context, event: TableEvent) {
        match event {
            TableEvent::PageChange(page) => self.request_page(ctx, page),
            TableEvent::Search(term) => {
                self.search = (!term.is_empty()).then_some(term);
                self.request_page(ctx, 1);
            }
            TableEvent::Refresh => self.request_page(ctx, self.table.current_page()),
            TableEvent::Edit(index) => {
                self.editing = self.table.row(index).map(|user| UserForm {
                    id: user.id,
                    username: user.username.clone(),
                    email: user.email.clone(),
                });
            }
            TableEvent::Delete(index) => {
                if let Some(id) = self.table.row(index).map(|user| user.id) {
                    self.mutate(ctx, "deleted", MutationRequest::Delete(id));
                }
            }
            TableEvent::RowClick(index) => log::debug!("user row {index} clicked"),
        }
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        let ctx = ui.ctx().clone();
        if !self.started {
            self.started = true;
            self.request_page(&ctx, 1);
        }
        self.poll(&ctx);

        if let Some(error) = &self.error {
            ui.colored_label(Color32::RED, format!("Error: {error}"));
        }
        if let Some(notice) = &self.notice {
            ui.weak(notice);
        }

        let response = show_data_table(ui, &mut self.table, Some(self.export_dir.as_path()));
        match response.exported {
            Some(Ok(path)) => self.notice = Some(format!("Exported to {}", path.display())),
            Some(Err(message)) => self.error = Some(format!("Export failed: {message}")),
            None => {}
        }
        for event in response.events {
            self.handle_event(&ctx, event);
        }

        self.edit_window(&ctx);
    }

    fn edit_window(&mut self, ctx: &egui::Context) {
        let Some(form) = self.editing.as_mut() else {
            return;
        };

        let mut open = true;
        let mut save = false;
        egui::Window::new("Edit user")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("edit_user_form")
                    .num_columns(2)
                    .show(ui, |ui| {
                        ui.label("Username");
                        ui.text_edit_singleline(&mut form.username);
                        ui.end_row();
                        ui.label("Email");
                        ui.text_edit_singleline(&mut form.email);
                        ui.end_row();
                    });
                save = ui.button("Save").clicked();
            });

        if save {
            let body = serde_json::json!({
                "username": form.username.trim(),
                "email": form.email.trim(),
            });
            let id = form.id;
            self.editing = None;
            self.mutate(ctx, "updated", MutationRequest::Update(id, body));
        } else if !open {
            self.editing = None;
        }
    }
}

enum MutationRequest {
    Update(i64, serde_json::Value),
    Delete(i64),
}
