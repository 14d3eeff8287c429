//! Table state: search, sort and pagination over a row set.
//!
//! The table never performs IO. In server mode it tells the caller what to
//! fetch by returning [`TableEvent`]s; the caller answers with
//! [`DataTable::set_server_page`].

use std::fmt;
use std::sync::Arc;

use super::column::Columns;
use super::pagination::PageWindow;
use super::record::TableRecord;
use crate::config::DEFAULT_PAGE_SIZE;

/// Eligibility check for a per-row action.
pub type RowPredicate<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMode {
    /// Every row is in memory; filter, sort and paginate locally.
    Client,
    /// Only the current page is in memory.
    Server {
        total_items: usize,
        current_page: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "⬆",
            Self::Desc => "⬇",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<F> {
    pub key: F,
    pub direction: SortDirection,
}

/// Something the caller has to act on. Row indices point into the rows
/// passed to [`DataTable::set_rows`] / [`DataTable::set_server_page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    Edit(usize),
    Delete(usize),
    RowClick(usize),
    Refresh,
    Search(String),
    PageChange(usize),
}

/// Which callbacks the owning screen wired up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowActions {
    pub edit: bool,
    pub delete: bool,
    pub row_click: bool,
    pub refresh: bool,
    /// Server-side search; without it server mode only filters locally.
    pub external_search: bool,
}

impl RowActions {
    pub fn has_action_column(&self) -> bool {
        self.edit || self.delete
    }
}

pub struct TableOptions<R> {
    pub title: String,
    pub page_size: usize,
    pub actions: RowActions,
    can_edit: Option<RowPredicate<R>>,
    can_delete: Option<RowPredicate<R>>,
}

impl<R> TableOptions<R> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            page_size: DEFAULT_PAGE_SIZE,
            actions: RowActions::default(),
            can_edit: None,
            can_delete: None,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_actions(mut self, actions: RowActions) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_can_edit(mut self, predicate: impl Fn(&R) -> bool + Send + Sync + 'static) -> Self {
        self.can_edit = Some(Arc::new(predicate));
        self
    }

    pub fn with_can_delete(
        mut self,
        predicate: impl Fn(&R) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.can_delete = Some(Arc::new(predicate));
        self
    }

    pub fn can_edit(&self, row: &R) -> bool {
        self.can_edit.as_ref().is_none_or(|p| p(row))
    }

    pub fn can_delete(&self, row: &R) -> bool {
        self.can_delete.as_ref().is_none_or(|p| p(row))
    }
}

impl<R> Default for TableOptions<R> {
    fn default() -> Self {
        Self::new("")
    }
}

impl<R> fmt::Debug for TableOptions<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableOptions")
            .field("title", &self.title)
            .field("page_size", &self.page_size)
            .field("actions", &self.actions)
            .field("can_edit", &self.can_edit.is_some())
            .field("can_delete", &self.can_delete.is_some())
            .finish()
    }
}

pub struct DataTable<R: TableRecord> {
    columns: Columns<R>,
    options: TableOptions<R>,
    rows: Vec<R>,
    mode: TableMode,
    search: String,
    sort: Option<SortState<R::Field>>,
    /// Client-mode page; server mode reads `TableMode::Server::current_page`.
    page: usize,
    loading: bool,
    /// Last term handed to the caller as `TableEvent::Search`.
    dispatched_search: Option<String>,
    /// Indices into `rows` after filtering and sorting.
    visible: Vec<usize>,
}

impl<R: TableRecord> DataTable<R> {
    /// A client-paginated table.
    pub fn new(columns: Columns<R>, options: TableOptions<R>) -> Self {
        Self {
            columns,
            options,
            rows: Vec::new(),
            mode: TableMode::Client,
            search: String::new(),
            sort: None,
            page: 1,
            loading: false,
            dispatched_search: None,
            visible: Vec::new(),
        }
    }

    /// A server-paginated table, empty until the first [`Self::set_server_page`].
    pub fn server(columns: Columns<R>, options: TableOptions<R>) -> Self {
        Self {
            mode: TableMode::Server {
                total_items: 0,
                current_page: 1,
            },
            ..Self::new(columns, options)
        }
    }

    pub fn columns(&self) -> &Columns<R> {
        &self.columns
    }

    pub fn options(&self) -> &TableOptions<R> {
        &self.options
    }

    pub fn mode(&self) -> TableMode {
        self.mode
    }

    pub fn is_server(&self) -> bool {
        matches!(self.mode, TableMode::Server { .. })
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&R> {
        self.rows.get(index)
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<SortState<R::Field>> {
        self.sort
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Replace the row set. In server mode the page and total are kept.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.loading = false;
        self.recompute();
    }

    /// Install one server page. Re-runs the search escalation check, which
    /// never fires twice for the same term.
    pub fn set_server_page(
        &mut self,
        rows: Vec<R>,
        total_items: usize,
        current_page: usize,
    ) -> Option<TableEvent> {
        self.mode = TableMode::Server {
            total_items,
            current_page: current_page.max(1),
        };
        self.set_rows(rows);
        self.escalate_search()
    }

    /// Update the search term.
    pub fn search(&mut self, term: impl Into<String>) -> Option<TableEvent> {
        let term = term.into();
        if term == self.search {
            return None;
        }
        self.search = term;
        self.recompute();

        match self.mode {
            TableMode::Client => {
                self.page = 1;
                None
            }
            TableMode::Server { .. } => self.escalate_search(),
        }
    }

    fn escalate_search(&mut self) -> Option<TableEvent> {
        if !self.is_server() || !self.options.actions.external_search {
            return None;
        }

        if self.search.trim().is_empty() {
            return self
                .dispatched_search
                .take()
                .map(|_| TableEvent::Search(String::new()));
        }
        if !self.visible.is_empty() || self.dispatched_search.as_deref() == Some(self.search.as_str())
        {
            return None;
        }

        let term = self.search.clone();
        log::debug!("no local match for {term:?}, asking the server");
        self.dispatched_search = Some(term.clone());
        Some(TableEvent::Search(term))
    }

    /// Same key toggles asc/desc, a new key starts ascending.
    pub fn sort_by(&mut self, key: R::Field) {
        let direction = match self.sort {
            Some(sort) if sort.key == key => sort.direction.toggled(),
            _ => SortDirection::Asc,
        };
        self.sort = Some(SortState { key, direction });
        self.recompute();
    }

    pub fn current_page(&self) -> usize {
        self.window().page
    }

    pub fn total_pages(&self) -> usize {
        self.window().total_pages()
    }

    /// Rows after filtering, before pagination (server mode: this page only).
    pub fn filtered_count(&self) -> usize {
        self.visible.len()
    }

    /// `total_items` in server mode, the filtered count otherwise.
    pub fn total_items(&self) -> usize {
        match self.mode {
            TableMode::Client => self.visible.len(),
            TableMode::Server { total_items, .. } => total_items,
        }
    }

    pub fn window(&self) -> PageWindow {
        match self.mode {
            TableMode::Client => {
                PageWindow::new(self.page, self.options.page_size, self.visible.len())
            }
            TableMode::Server {
                total_items,
                current_page,
            } => PageWindow::new(current_page, self.options.page_size, total_items),
        }
    }

    /// Move to `page`, clamped to `[1, total_pages]`.
    pub fn go_to_page(&mut self, page: usize) -> Option<TableEvent> {
        let window = self.window();
        let page = window.clamp(page);
        match self.mode {
            TableMode::Client => {
                self.page = page;
                None
            }
            TableMode::Server { current_page, .. } => {
                (page != current_page).then_some(TableEvent::PageChange(page))
            }
        }
    }

    /// `(row index, row)` pairs shown on the current page.
    pub fn page_rows(&self) -> Vec<(usize, &R)> {
        let indices = match self.mode {
            TableMode::Client => {
                let range = self.window().range();
                &self.visible[range]
            }
            TableMode::Server { .. } => &self.visible[..],
        };
        indices.iter().map(|i| (*i, &self.rows[*i])).collect()
    }

    /// Every row passing the filter, in sort order.
    pub fn filtered_rows(&self) -> impl Iterator<Item = &R> {
        self.visible.iter().map(|i| &self.rows[*i])
    }

    /// Label under the table, see [`PageWindow::label`].
    pub fn pagination_label(&self) -> String {
        let filtered_from = (self.mode == TableMode::Client && self.filter_term().is_some())
            .then_some(self.rows.len());
        self.window().label(filtered_from)
    }

    pub fn edit(&self, index: usize) -> Option<TableEvent> {
        let row = self.rows.get(index)?;
        (self.options.actions.edit && self.options.can_edit(row)).then_some(TableEvent::Edit(index))
    }

    pub fn delete(&self, index: usize) -> Option<TableEvent> {
        let row = self.rows.get(index)?;
        (self.options.actions.delete && self.options.can_delete(row))
            .then_some(TableEvent::Delete(index))
    }

    pub fn row_click(&self, index: usize) -> Option<TableEvent> {
        self.rows.get(index)?;
        self.options
            .actions
            .row_click
            .then_some(TableEvent::RowClick(index))
    }

    pub fn refresh(&self) -> Option<TableEvent> {
        self.options.actions.refresh.then_some(TableEvent::Refresh)
    }

    /// The lower-cased term the local filter applies, if any. A blank term
    /// filters nothing; otherwise the term is matched as typed, spaces included.
    ///
    /// Once a term went to the server, the rows it returns are already the
    /// search result and are not filtered again.
    fn filter_term(&self) -> Option<String> {
        let term = self.search.as_str();
        if term.trim().is_empty()
            || (self.is_server() && self.dispatched_search.as_deref() == Some(term))
        {
            return None;
        }
        Some(term.to_lowercase())
    }

    fn matches(&self, row: &R, term: &str) -> bool {
        self.columns
            .iter()
            .any(|column| column.value(row).search_text().contains(term))
    }

    fn recompute(&mut self) {
        let term = self.filter_term();
        let mut visible: Vec<usize> = (0..self.rows.len())
            .filter(|i| term.as_deref().is_none_or(|t| self.matches(&self.rows[*i], t)))
            .collect();

        if let Some(sort) = self.sort {
            // sort_by is stable, equal keys keep their incoming order
            visible.sort_by(|a, b| {
                let ord = self.rows[*a]
                    .value(sort.key)
                    .sort_cmp(&self.rows[*b].value(sort.key));
                match sort.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        self.visible = visible;
        if self.mode == TableMode::Client {
            self.page = self.window().page;
        }
    }
}

impl<R: TableRecord + fmt::Debug> fmt::Debug for DataTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("title", &self.options.title)
            .field("mode", &self.mode)
            .field("rows", &self.rows.len())
            .field("search", &self.search)
            .field("sort", &self.sort)
            .field("page", &self.current_page())
            .field("loading", &self.loading)
            .finish()
    }
}
