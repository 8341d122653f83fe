//! Todo-Lists Column Component

use leptos::prelude::*;

use crate::components::ItemList;
use crate::context::AppContext;
use crate::view::todo_list_entries;

/// Todo lists with search and "New List"
#[component]
pub fn TodoListsColumn() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (query, set_query) = signal(String::new());

    let entries = Signal::derive(move || {
        ctx.revision.get();
        let lists = ctx.state().todo_lists;
        todo_list_entries(&lists.lists(), lists.current_id())
    });

    let search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let state = ctx.state();
        let q = query.get();
        ctx.run(async move { state.search_todo_lists(&q).await });
    };

    let select = move |id: u64| ctx.run(ctx.state().select_todo_list(id));

    view! {
        <section class="column todo-lists-column">
            <div class="column-header">
                <h2>"Todo Lists"</h2>
                <button
                    class="btn primary"
                    on:click=move |_| {
                        ctx.state().new_todo_list();
                        ctx.refresh();
                    }
                >
                    "New List"
                </button>
            </div>
            <form class="search-form" on:submit=search>
                <input
                    type="search"
                    placeholder="Search lists..."
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <button type="submit" class="btn">"Search"</button>
            </form>
            <ItemList entries=entries on_select=select empty_text="No todo lists yet" />
        </section>
    }
}
