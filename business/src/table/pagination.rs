use std::ops::Range;

/// One page of a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

impl PageWindow {
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let mut window = Self {
            page,
            page_size: page_size.max(1),
            total,
        };
        window.page = window.clamp(page);
        window
    }

    /// `ceil(total / page_size)`; zero for an empty result.
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    /// Clamp a requested page into `[1, total_pages]`.
    pub fn clamp(&self, page: usize) -> usize {
        page.clamp(1, self.total_pages().max(1))
    }

    /// Offset of the first row on this page.
    pub fn start(&self) -> usize {
        (self.page - 1) * self.page_size
    }

    /// Row range of this page, within `0..total`.
    pub fn range(&self) -> Range<usize> {
        let start = self.start().min(self.total);
        start..(start + self.page_size).min(self.total)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// "Showing 11 to 20 of 57 entries", with the unfiltered count appended
    /// when a client-side filter narrowed the rows.
    pub fn label(&self, filtered_from: Option<usize>) -> String {
        let range = self.range();
        let (first, last) = if range.is_empty() {
            (0, 0)
        } else {
            (range.start + 1, range.end)
        };
        let mut label = format!("Showing {first} to {last} of {} entries", self.total);
        if let Some(all) = filtered_from {
            label.push_str(&format!(" (filtered from {all} total)"));
        }
        label
    }
}
