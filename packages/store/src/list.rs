//! # List view controller
//!
//! [`ListController`] owns the snapshot produced by one fetch, the user's
//! [`ListQuery`] and a [`Pagination`]. The visible rows are recomputed from
//! those three on demand; nothing is cached between calls.
//!
//! Mutations after a successful API call go through [`ListAction`]:
//!
//! | Action | Meaning |
//! |--------|---------|
//! | `Replace` | A full refetch arrived; it supersedes every earlier optimistic change. |
//! | `Remove` | A delete succeeded; drop the row locally. |
//! | `Patch` | An update succeeded; overwrite the patched fields locally. |
//!
//! There is no identity map and no reconciliation: an optimistic change only
//! lives until the next `Replace`.
//!
//! [`DeleteConfirmation`] is the two-phase "are you sure?" state used by every
//! row-level delete button.

use std::fmt::Debug;

use crate::filter::{filter_records, ListQuery};
use crate::pagination::Pagination;

/// A record the list view controller can search, filter and patch.
pub trait Record: Clone {
    type Id: Clone + PartialEq + Debug;
    type Patch;

    fn id(&self) -> Self::Id;

    /// Free-text fields matched by the search box. `None` never matches.
    fn search_fields(&self) -> Vec<Option<&str>>;

    /// Value of a categorical field, compared verbatim against filter selections.
    fn field(&self, name: &str) -> Option<String>;

    fn apply_patch(&mut self, patch: &Self::Patch);
}

/// Reducer-style transition applied to the last-fetched snapshot.
pub enum ListAction<T: Record> {
    Replace(Vec<T>),
    Remove(T::Id),
    Patch(T::Id, T::Patch),
}

/// Snapshot + query + pagination for one list page.
#[derive(Clone, Debug)]
pub struct ListController<T: Record> {
    records: Vec<T>,
    query: ListQuery,
    pagination: Pagination,
}

impl<T: Record> ListController<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            query: ListQuery::default(),
            pagination: Pagination::new(page_size),
        }
    }

    /// The last-fetched snapshot, unfiltered.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// All rows passing the current query, in snapshot order.
    pub fn visible(&self) -> Vec<&T> {
        filter_records(&self.records, &self.query)
    }

    pub fn visible_len(&self) -> usize {
        self.visible().len()
    }

    /// Rows of the current (clamped) page.
    pub fn page_items(&self) -> Vec<T> {
        let visible = self.visible();
        let range = self.pagination.range(visible.len());
        visible[range].iter().map(|r| (*r).clone()).collect()
    }

    /// Zero-based current page for the visible rows.
    pub fn current_page(&self) -> usize {
        self.pagination.current(self.visible_len())
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count(self.visible_len())
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query.text = text.into();
        self.reclamp();
    }

    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.query.set_filter(field, value);
        self.reclamp();
    }

    pub fn clear_filter(&mut self, field: &str) {
        self.query.filters.remove(field);
        self.reclamp();
    }

    pub fn set_page(&mut self, page: usize) {
        let len = self.visible_len();
        self.pagination.go_to(page, len);
    }

    pub fn next_page(&mut self) {
        let len = self.visible_len();
        self.pagination.next(len);
    }

    pub fn prev_page(&mut self) {
        let len = self.visible_len();
        self.pagination.prev(len);
    }

    /// Apply a reducer transition to the snapshot.
    ///
    /// Returns `false` when a `Remove` or `Patch` targets an id that is not in
    /// the snapshot; the snapshot is left untouched in that case.
    pub fn apply(&mut self, action: ListAction<T>) -> bool {
        let changed = match action {
            ListAction::Replace(records) => {
                self.records = records;
                true
            }
            ListAction::Remove(id) => {
                let before = self.records.len();
                self.records.retain(|r| r.id() != id);
                self.records.len() != before
            }
            ListAction::Patch(id, patch) => {
                match self.records.iter_mut().find(|r| r.id() == id) {
                    Some(record) => {
                        record.apply_patch(&patch);
                        true
                    }
                    None => false,
                }
            }
        };
        self.reclamp();
        changed
    }

    pub fn find(&self, id: &T::Id) -> Option<&T> {
        self.records.iter().find(|r| &r.id() == id)
    }

    fn reclamp(&mut self) {
        let len = self.visible_len();
        self.pagination.clamp(len);
    }
}

impl<T: Record> Default for ListController<T> {
    fn default() -> Self {
        Self::new(Pagination::default().page_size())
    }
}

/// Two-phase delete: open a confirmation, then confirm or cancel.
///
/// Opening never contacts the backend. [`confirm`](Self::confirm) hands out the
/// pending id exactly once, so a double click issues at most one request.
#[derive(Clone, Debug, PartialEq)]
pub enum DeleteConfirmation<Id> {
    Idle,
    Pending(Id),
}

impl<Id: Clone> DeleteConfirmation<Id> {
    pub fn request(&mut self, id: Id) {
        *self = DeleteConfirmation::Pending(id);
    }

    /// Take the pending id, returning to `Idle`.
    pub fn confirm(&mut self) -> Option<Id> {
        match std::mem::replace(self, DeleteConfirmation::Idle) {
            DeleteConfirmation::Pending(id) => Some(id),
            DeleteConfirmation::Idle => None,
        }
    }

    pub fn cancel(&mut self) {
        *self = DeleteConfirmation::Idle;
    }

    pub fn pending(&self) -> Option<&Id> {
        match self {
            DeleteConfirmation::Pending(id) => Some(id),
            DeleteConfirmation::Idle => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, DeleteConfirmation::Pending(_))
    }
}

impl<Id> Default for DeleteConfirmation<Id> {
    fn default() -> Self {
        DeleteConfirmation::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Notification, MarkRead, Surat, SuratPatch, SuratStatus};

    fn surat(id: i64, status: SuratStatus) -> Surat {
        Surat {
            id,
            asal_instansi: Some(format!("Dinas {id}")),
            nomor_surat: Some(format!("{id}/X/2024")),
            tujuan_jabatan: Some("Sekretaris".to_string()),
            keterangan: None,
            status,
            created_at: None,
            processed_at: None,
            disposisi: Default::default(),
            photos: Vec::new(),
        }
    }

    fn controller_with(n: i64, page_size: usize) -> ListController<Surat> {
        let mut list = ListController::new(page_size);
        let records = (1..=n)
            .map(|id| {
                let status = if id % 2 == 0 {
                    SuratStatus::Processed
                } else {
                    SuratStatus::Pending
                };
                surat(id, status)
            })
            .collect();
        list.apply(ListAction::Replace(records));
        list
    }

    #[test]
    fn test_page_items() {
        let mut list = controller_with(12, 5);
        assert_eq!(list.page_count(), 3);
        list.set_page(2);
        let ids: Vec<i64> = list.page_items().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![11, 12]);
    }

    #[test]
    fn test_filter_clamps_page() {
        let mut list = controller_with(30, 5);
        list.set_page(5);
        assert_eq!(list.current_page(), 5);

        // Narrow to the 15 processed letters: pages 0..=2
        list.set_filter("status", "processed");
        assert_eq!(list.current_page(), 2);
        assert!(!list.page_items().is_empty());

        // A search matching a single letter lands on page 0
        list.set_query("Dinas 14");
        assert_eq!(list.current_page(), 0);
        let ids: Vec<i64> = list.page_items().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![14]);
    }

    #[test]
    fn test_remove_clamps_page() {
        let mut list = controller_with(6, 5);
        list.set_page(1);
        assert_eq!(list.page_items().len(), 1);
        assert!(list.apply(ListAction::Remove(6)));
        assert_eq!(list.current_page(), 0);
        assert_eq!(list.page_items().len(), 5);
    }

    #[test]
    fn test_patch_and_replace() {
        let mut list = controller_with(3, 10);
        let patch = SuratPatch {
            status: Some(SuratStatus::Processed),
            ..Default::default()
        };
        assert!(list.apply(ListAction::Patch(1, patch)));
        assert_eq!(list.find(&1).map(|s| s.status), Some(SuratStatus::Processed));

        // Refetch supersedes the optimistic change
        list.apply(ListAction::Replace(vec![surat(1, SuratStatus::Pending)]));
        assert_eq!(list.find(&1).map(|s| s.status), Some(SuratStatus::Pending));
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut list = controller_with(3, 10);
        assert!(!list.apply(ListAction::Remove(99)));
        assert!(!list.apply(ListAction::Patch(99, SuratPatch::default())));
        assert_eq!(list.records().len(), 3);
    }

    #[test]
    fn test_mark_notification_read() {
        let mut list: ListController<Notification> = ListController::default();
        list.apply(ListAction::Replace(vec![Notification {
            id: 7,
            message: "Surat baru".to_string(),
            is_read: false,
            surat_id: Some(1),
            created_at: None,
        }]));
        list.set_filter("is_read", "unread");
        assert_eq!(list.visible_len(), 1);
        list.apply(ListAction::Patch(7, MarkRead));
        assert_eq!(list.visible_len(), 0);
    }

    #[test]
    fn test_delete_confirmation_flow() {
        let mut requests = 0;
        let mut confirm: DeleteConfirmation<i64> = DeleteConfirmation::default();

        // Opening the dialog issues nothing
        confirm.request(4);
        assert!(confirm.is_open());
        assert_eq!(requests, 0);

        // Cancel issues nothing
        confirm.cancel();
        if confirm.confirm().is_some() {
            requests += 1;
        }
        assert_eq!(requests, 0);

        // Confirm issues exactly one, even when clicked twice
        confirm.request(4);
        for _ in 0..2 {
            if let Some(id) = confirm.confirm() {
                assert_eq!(id, 4);
                requests += 1;
            }
        }
        assert_eq!(requests, 1);
        assert!(!confirm.is_open());
    }
}
