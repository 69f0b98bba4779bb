//! Glue between a [`ListController`] and the network.
//!
//! Every table page holds one [`RecordList`]: the controller in a signal, the
//! last load error, and a [`Gateway`] so re-renders cannot start a second
//! fetch of the same collection while one is running.

use std::future::Future;

use api::{ApiError, Gateway};
use dioxus::prelude::*;
use store::{ClientConfig, DeleteConfirmation, ListAction, ListController, Record};

/// The page's client config, or defaults when the app provided none.
pub fn use_client_config() -> ClientConfig {
    try_use_context::<ClientConfig>().unwrap_or_default()
}

pub struct RecordList<T: Record + 'static> {
    pub controller: Signal<ListController<T>>,
    pub error: Signal<Option<ApiError>>,
    pub loading: Signal<bool>,
    pub confirm: Signal<DeleteConfirmation<T::Id>>,
    gateway: Gateway,
}

impl<T: Record + 'static> Clone for RecordList<T> {
    fn clone(&self) -> Self {
        Self {
            controller: self.controller,
            error: self.error,
            loading: self.loading,
            confirm: self.confirm,
            gateway: self.gateway.clone(),
        }
    }
}

impl<T: Record + 'static> PartialEq for RecordList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.controller == other.controller
    }
}

pub fn use_record_list<T: Record + 'static>() -> RecordList<T> {
    let page_size = use_client_config().lists.page_size;
    let controller = use_signal(|| ListController::new(page_size));
    let error = use_signal(|| None);
    let loading = use_signal(|| false);
    let confirm = use_signal(DeleteConfirmation::default);
    let gateway = use_hook(Gateway::new);
    RecordList {
        controller,
        error,
        loading,
        confirm,
        gateway,
    }
}

impl<T: Record + 'static> RecordList<T> {
    /// Fetch the collection and replace the snapshot. Skipped while a
    /// previous fetch is still running.
    pub fn load<F>(&self, call: F)
    where
        F: Future<Output = Result<Vec<T>, ApiError>> + 'static,
    {
        let mut this = self.clone();
        spawn(async move {
            this.loading.set(true);
            match this.gateway.fetch(call).await {
                None => return,
                Some(Ok(records)) => {
                    this.controller.write().apply(ListAction::Replace(records));
                    this.error.set(None);
                }
                Some(Err(e)) => {
                    tracing::warn!("list load failed: {}", e);
                    this.error.set(Some(e));
                }
            }
            this.loading.set(false);
        });
    }

    pub fn apply(&self, action: ListAction<T>) {
        let mut controller = self.controller;
        controller.write().apply(action);
    }

    pub fn is_loading(&self) -> bool {
        (self.loading)()
    }
}
