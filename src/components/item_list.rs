//! Item List Component
//!
//! Clickable list shared by the notes and todo-list columns.

use leptos::prelude::*;

use crate::view::ListEntry;

#[component]
pub fn ItemList(
    #[prop(into)] entries: Signal<Vec<ListEntry>>,
    #[prop(into)] on_select: Callback<u64>,
    #[prop(into)] empty_text: String,
) -> impl IntoView {
    view! {
        <ul class="item-list">
            <Show when=move || entries.with(|e| e.is_empty())>
                <li class="item-list-empty">{empty_text.clone()}</li>
            </Show>
            <For
                each=move || entries.get()
                key=|entry| (entry.id, entry.label.clone(), entry.active)
                children=move |entry| {
                    let id = entry.id;
                    view! {
                        <li
                            class=if entry.active { "list-item active" } else { "list-item" }
                            on:click=move |_| on_select.run(id)
                        >
                            {entry.label}
                        </li>
                    }
                }
            />
        </ul>
    }
}
