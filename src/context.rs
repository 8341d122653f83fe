//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::state::{AppState, Notice};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    state: StoredValue<AppState>,
    /// Bumped after every operation; views read it to re-project the state
    pub revision: ReadSignal<u64>,
    set_revision: WriteSignal<u64>,
    /// Latest notice for the toast
    pub notice: ReadSignal<Option<Notice>>,
    set_notice: WriteSignal<Option<Notice>>,
    pub authenticated: ReadSignal<bool>,
    set_authenticated: WriteSignal<bool>,
}

impl AppContext {
    pub fn new(state: AppState) -> Self {
        let (revision, set_revision) = signal(0u64);
        let (notice, set_notice) = signal::<Option<Notice>>(None);
        let (authenticated, set_authenticated) = signal(false);
        Self {
            state: StoredValue::new(state),
            revision,
            set_revision,
            notice,
            set_notice,
            authenticated,
            set_authenticated,
        }
    }

    pub fn state(&self) -> AppState {
        self.state.get_value()
    }

    /// Re-render from the current state
    pub fn refresh(&self) {
        let state = self.state();
        self.set_authenticated.set(state.is_authenticated());
        if state.notice() != self.notice.get_untracked() {
            self.set_notice.set(state.notice());
        }
        self.set_revision.update(|v| *v += 1);
    }

    /// Run an operation in the background, re-rendering before and after
    pub fn run<F>(&self, operation: F)
    where
        F: Future + 'static,
    {
        let ctx = *self;
        ctx.refresh();
        spawn_local(async move {
            operation.await;
            ctx.refresh();
        });
    }

    pub fn dismiss_notice(&self, seq: u64) {
        self.state().dismiss_notice(seq);
        self.refresh();
    }
}
