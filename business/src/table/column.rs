use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::error::TableError;
use super::record::TableRecord;
use super::value::CellValue;

/// Formats a cell for display; receives the whole record for derived columns.
pub type Renderer<R> = Arc<dyn Fn(&CellValue, &R) -> String + Send + Sync>;

pub struct Column<R: TableRecord> {
    pub key: R::Field,
    pub label: String,
    render: Option<Renderer<R>>,
}

impl<R: TableRecord> Column<R> {
    pub fn new(key: R::Field, label: impl Into<String>) -> Self {
        Self {
            key,
            label: label.into(),
            render: None,
        }
    }

    pub fn with_render(
        mut self,
        render: impl Fn(&CellValue, &R) -> String + Send + Sync + 'static,
    ) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn has_renderer(&self) -> bool {
        self.render.is_some()
    }

    pub fn value(&self, record: &R) -> CellValue {
        record.value(self.key)
    }

    /// Display text for `record`: the renderer's output, or the raw value.
    pub fn display(&self, record: &R) -> String {
        let value = self.value(record);
        match &self.render {
            Some(render) => render(&value, record),
            None => value.to_string(),
        }
    }
}

impl<R: TableRecord> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            label: self.label.clone(),
            render: self.render.clone(),
        }
    }
}

impl<R: TableRecord> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("render", &self.render.is_some())
            .finish()
    }
}

/// An ordered column set with unique keys.
#[derive(Debug)]
pub struct Columns<R: TableRecord>(Vec<Column<R>>);

impl<R: TableRecord> Columns<R> {
    pub fn new(columns: Vec<Column<R>>) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.key) {
                return Err(TableError::DuplicateColumn(format!("{:?}", column.key)));
            }
        }
        Ok(Self(columns))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column<R>> {
        self.0.iter()
    }

    pub fn get(&self, key: R::Field) -> Option<&Column<R>> {
        self.0.iter().find(|c| c.key == key)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.0.iter().map(|c| c.label.as_str()).collect()
    }
}

impl<R: TableRecord> Clone for Columns<R> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<'a, R: TableRecord> IntoIterator for &'a Columns<R> {
    type Item = &'a Column<R>;
    type IntoIter = std::slice::Iter<'a, Column<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
