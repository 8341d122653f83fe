//! Notes Column Component
//!
//! Notes list with search, tag filter and "New Note".

use leptos::prelude::*;

use crate::components::ItemList;
use crate::context::AppContext;
use crate::controllers::NoteFilter;
use crate::view::note_entries;

#[component]
pub fn NotesColumn() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (query, set_query) = signal(String::new());

    let entries = Signal::derive(move || {
        ctx.revision.get();
        let notes = ctx.state().notes;
        note_entries(&notes.notes(), notes.pane_state().id())
    });
    let tags = move || {
        ctx.revision.get();
        ctx.state().tags()
    };
    let active_tag = move || {
        ctx.revision.get();
        match ctx.state().notes.filter() {
            NoteFilter::Tag(tag) => tag,
            _ => String::new(),
        }
    };

    let search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let state = ctx.state();
        let q = query.get();
        ctx.run(async move { state.search_notes(&q).await });
    };

    let filter_by_tag = move |ev: web_sys::Event| {
        let tag = event_target_value(&ev);
        set_query.set(String::new());
        let state = ctx.state();
        ctx.run(async move { state.filter_notes_by_tag(&tag).await });
    };

    let select = move |id: u64| ctx.run(ctx.state().select_note(id));

    view! {
        <section class="column notes-column">
            <div class="column-header">
                <h2>"Notes"</h2>
                <button
                    class="btn primary"
                    on:click=move |_| {
                        ctx.state().new_note();
                        ctx.refresh();
                    }
                >
                    "New Note"
                </button>
            </div>
            <form class="search-form" on:submit=search>
                <input
                    type="search"
                    placeholder="Search notes..."
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <button type="submit" class="btn">"Search"</button>
            </form>
            <select class="tag-filter" prop:value=active_tag on:change=filter_by_tag>
                <option value="">"All tags"</option>
                <For
                    each=tags
                    key=|tag| tag.name.clone()
                    children=|tag| {
                        let name = tag.name;
                        view! { <option value=name.clone()>{name.clone()}</option> }
                    }
                />
            </select>
            <ItemList entries=entries on_select=select empty_text="No notes yet" />
        </section>
    }
}
