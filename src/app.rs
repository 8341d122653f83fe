//! Notes & Todo Frontend App
//!
//! Root component: auth screen or the four-column workspace.

use std::sync::Arc;

use leptos::prelude::*;

use crate::components::{
    AuthPanel, Header, NoteEditor, NotesColumn, Toast, TodoListEditor, TodoListsColumn,
};
use crate::config::ClientConfig;
use crate::context::AppContext;
use crate::state::AppState;
use crate::storage::{BrowserStorage, MemoryStorage, TokenStorage};
use crate::transport::ReqwestTransport;

fn token_storage() -> Arc<dyn TokenStorage> {
    if BrowserStorage::is_available() {
        Arc::new(BrowserStorage)
    } else {
        log::warn!("localStorage unavailable, session will not survive a reload");
        Arc::new(MemoryStorage::new())
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::load();
    let state = AppState::new(config, Arc::new(ReqwestTransport::new()), token_storage());

    let ctx = AppContext::new(state);
    provide_context(ctx);

    // Restore a persisted session once on mount
    Effect::new(move |_| {
        let state = ctx.state();
        ctx.run(async move { state.start().await });
    });

    view! {
        <div class="app">
            <Header />
            <Show
                when=move || ctx.authenticated.get()
                fallback=|| view! { <AuthPanel /> }
            >
                <main class="content">
                    <NotesColumn />
                    <NoteEditor />
                    <TodoListsColumn />
                    <TodoListEditor />
                </main>
            </Show>
            <Toast />
        </div>
    }
}
