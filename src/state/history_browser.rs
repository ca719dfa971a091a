//! Pagination and selection over the history log.

use super::{HistoryItem, HistoryLog};

/// Slice of `items` shown on a 1-based `page`.
///
/// Pages past the end are empty. A page size of zero is treated as one.
pub fn page(items: &[HistoryItem], page: usize, page_size: usize) -> &[HistoryItem] {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// Number of pages for `count` items, never less than one.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Which history page is visible and which entry is selected.
///
/// The selection is kept consistent with the visible page: whenever the page
/// changes or the selected entry disappears, the first entry of the visible
/// page is selected instead (or nothing, on an empty page).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryBrowser {
    current_page: usize,
    page_size: usize,
    selected_id: Option<String>,
}

impl Default for HistoryBrowser {
    fn default() -> Self {
        Self::new(10)
    }
}

impl HistoryBrowser {
    /// Create a browser on page 1 with nothing selected.
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            selected_id: None,
        }
    }

    /// Current 1-based page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Entries per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Id of the selected entry.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Number of pages for the given log.
    pub fn total_pages(&self, log: &HistoryLog) -> usize {
        total_pages(log.len(), self.page_size)
    }

    /// Entries on the current page.
    pub fn visible<'a>(&self, log: &'a HistoryLog) -> &'a [HistoryItem] {
        page(log.list(), self.current_page, self.page_size)
    }

    /// The selected entry, looked up in the whole log.
    pub fn selected<'a>(&self, log: &'a HistoryLog) -> Option<&'a HistoryItem> {
        self.selected_id.as_deref().and_then(|id| log.get(id))
    }

    /// Move to `page`, clamped to the valid range.
    pub fn go_to_page(&mut self, log: &HistoryLog, page: usize) {
        self.current_page = page.clamp(1, self.total_pages(log));
        self.reconcile_selection(log);
    }

    /// Move one page forward, if there is one.
    pub fn next_page(&mut self, log: &HistoryLog) {
        self.go_to_page(log, self.current_page + 1);
    }

    /// Move one page back, if there is one.
    pub fn prev_page(&mut self, log: &HistoryLog) {
        self.go_to_page(log, self.current_page.saturating_sub(1));
    }

    /// Change the page size and return to the first page.
    pub fn set_page_size(&mut self, log: &HistoryLog, page_size: usize) {
        self.page_size = page_size.max(1);
        self.go_to_page(log, 1);
    }

    /// Select an entry anywhere in the log, moving to the page that holds it.
    ///
    /// Unknown ids leave the browser unchanged.
    pub fn select<'a>(&mut self, log: &'a HistoryLog, id: &str) -> Option<&'a HistoryItem> {
        let index = log.position(id)?;
        self.current_page = index / self.page_size + 1;
        self.selected_id = Some(id.to_string());
        log.get(id)
    }

    /// Drop the selection.
    pub fn clear_selection(&mut self) {
        self.selected_id = None;
    }

    /// Update after `removed_id` has been taken out of `log`.
    pub fn on_removed(&mut self, log: &HistoryLog, removed_id: &str) {
        if self.selected_id.as_deref() == Some(removed_id) {
            self.selected_id = None;
        }
        self.go_to_page(log, self.current_page);
    }

    /// Update after the log has been emptied.
    pub fn on_cleared(&mut self) {
        self.current_page = 1;
        self.selected_id = None;
    }

    /// Update after a new entry was added at the head of the log.
    pub fn on_appended(&mut self, log: &HistoryLog) {
        self.go_to_page(log, self.current_page);
    }

    fn reconcile_selection(&mut self, log: &HistoryLog) {
        let visible = self.visible(log);
        let on_page = self
            .selected_id
            .as_deref()
            .is_some_and(|id| visible.iter().any(|item| item.id == id));
        if !on_page {
            self.selected_id = visible.first().map(|item| item.id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MarketData;
    use crate::storage::MemoryStorage;

    fn log_with(count: usize) -> HistoryLog {
        let mut log = HistoryLog::open(Box::new(MemoryStorage::new()));
        for i in 0..count {
            log.append(format!("Sector {i}"), MarketData::new("x"));
        }
        log
    }

    #[test]
    fn test_page_lengths() {
        let log = log_with(23);
        let items = log.list();
        for (p, n) in [(1, 10), (2, 10), (3, 10), (4, 10), (1, 50), (3, 7), (4, 7)] {
            let expected = n.min(23_usize.saturating_sub((p - 1) * n));
            assert_eq!(page(items, p, n).len(), expected, "page {p} size {n}");
        }
        assert_eq!(page(items, 0, 10).len(), 10);
    }

    #[test]
    fn test_page_contents_are_contiguous() {
        let log = log_with(23);
        let second = page(log.list(), 2, 10);
        assert_eq!(second.len(), 10);
        assert_eq!(second[0].id, log.list()[10].id);
        assert_eq!(page(log.list(), 3, 10).len(), 3);
        assert!(page(log.list(), 4, 10).is_empty());
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(50, 10), 5);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_page_change_falls_back_to_first_item() {
        let log = log_with(15);
        let mut browser = HistoryBrowser::new(10);
        browser.go_to_page(&log, 1);
        assert_eq!(browser.selected_id(), Some(log.list()[0].id.as_str()));

        browser.next_page(&log);
        assert_eq!(browser.current_page(), 2);
        assert_eq!(browser.selected_id(), Some(log.list()[10].id.as_str()));

        browser.next_page(&log);
        assert_eq!(browser.current_page(), 2);
    }

    #[test]
    fn test_selection_on_page_is_kept() {
        let log = log_with(15);
        let mut browser = HistoryBrowser::new(10);
        let id = log.list()[4].id.clone();
        browser.select(&log, &id);
        browser.go_to_page(&log, 1);
        assert_eq!(browser.selected_id(), Some(id.as_str()));
    }

    #[test]
    fn test_empty_page_has_no_selection() {
        let log = log_with(0);
        let mut browser = HistoryBrowser::new(10);
        browser.go_to_page(&log, 3);
        assert_eq!(browser.current_page(), 1);
        assert_eq!(browser.selected_id(), None);
        assert_eq!(browser.total_pages(&log), 1);
    }

    #[test]
    fn test_select_searches_whole_log() {
        let log = log_with(25);
        let mut browser = HistoryBrowser::new(10);
        let id = log.list()[21].id.clone();

        let item = browser.select(&log, &id).unwrap();
        assert_eq!(item.sector, "Sector 3");
        assert_eq!(browser.current_page(), 3);
        assert!(browser.select(&log, "missing").is_none());
        assert_eq!(browser.selected_id(), Some(id.as_str()));
    }

    #[test]
    fn test_removing_selected_selects_first_remaining() {
        let mut log = log_with(3);
        let mut browser = HistoryBrowser::new(10);
        let first = log.list()[0].id.clone();
        let second = log.list()[1].id.clone();
        browser.select(&log, &first);

        log.remove(&first);
        browser.on_removed(&log, &first);
        assert_eq!(browser.selected_id(), Some(second.as_str()));
    }

    #[test]
    fn test_removing_last_clears_selection() {
        let mut log = log_with(1);
        let mut browser = HistoryBrowser::new(10);
        let only = log.list()[0].id.clone();
        browser.select(&log, &only);

        log.remove(&only);
        browser.on_removed(&log, &only);
        assert_eq!(browser.selected_id(), None);
    }

    #[test]
    fn test_removing_other_keeps_selection() {
        let mut log = log_with(3);
        let mut browser = HistoryBrowser::new(10);
        let keep = log.list()[2].id.clone();
        let drop = log.list()[0].id.clone();
        browser.select(&log, &keep);

        log.remove(&drop);
        browser.on_removed(&log, &drop);
        assert_eq!(browser.selected_id(), Some(keep.as_str()));
    }

    #[test]
    fn test_removal_on_last_page_clamps() {
        let mut log = log_with(11);
        let mut browser = HistoryBrowser::new(10);
        let last = log.list()[10].id.clone();
        browser.select(&log, &last);
        assert_eq!(browser.current_page(), 2);

        log.remove(&last);
        browser.on_removed(&log, &last);
        assert_eq!(browser.current_page(), 1);
        assert_eq!(browser.selected_id(), Some(log.list()[0].id.as_str()));
    }
}
