//! Header Component

use leptos::prelude::*;

use crate::context::AppContext;

/// Title bar with the welcome message and logout button
#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let welcome = move || {
        ctx.revision.get();
        ctx.state().welcome()
    };

    view! {
        <header class="app-header">
            <h1>"Notes & Todos"</h1>
            <Show when=move || ctx.authenticated.get()>
                <div class="user-info">
                    <span class="welcome-message">{welcome}</span>
                    <button
                        class="btn"
                        on:click=move |_| {
                            ctx.state().logout();
                            ctx.refresh();
                        }
                    >
                        "Logout"
                    </button>
                </div>
            </Show>
        </header>
    }
}
