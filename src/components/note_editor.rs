//! Note Editor Component
//!
//! Detail form for the open note. Unsaved edits are lost on navigation.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::controllers::{BrowserConfirm, PaneState};
use crate::view::{note_form, NoteForm};

#[component]
pub fn NoteEditor() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let pane = Memo::new(move |_| {
        ctx.revision.get();
        ctx.state().notes.pane_state()
    });
    let current = Memo::new(move |_| {
        ctx.revision.get();
        ctx.state().notes.current()
    });
    let form = RwSignal::new(NoteForm::default());

    // Reload the form when another note (or a new server copy) arrives
    Effect::new(move |_| {
        pane.track();
        form.set(note_form(current.get().as_ref()));
    });

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let state = ctx.state();
        let current = form.get();
        ctx.run(async move { state.save_note(&current).await });
    };

    let delete = move |_: web_sys::MouseEvent| {
        let state = ctx.state();
        ctx.run(async move { state.delete_note(&BrowserConfirm).await });
    };

    let heading = move || match pane.get() {
        PaneState::Editing => "New Note",
        _ => "Edit Note",
    };

    view! {
        <Show when=move || pane.get().is_open()>
            <section class="column editor note-editor">
                <h2>{heading}</h2>
                <form on:submit=save>
                    <input
                        type="text"
                        placeholder="Title"
                        prop:value=move || form.with(|f| f.title.clone())
                        on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
                    />
                    <textarea
                        placeholder="Content"
                        prop:value=move || form.with(|f| f.content.clone())
                        on:input=move |ev| form.update(|f| f.content = event_target_value(&ev))
                    ></textarea>
                    <input
                        type="text"
                        placeholder="Tags (comma separated)"
                        prop:value=move || form.with(|f| f.tags.clone())
                        on:input=move |ev| form.update(|f| f.tags = event_target_value(&ev))
                    />
                    <div class="editor-actions">
                        <button type="submit" class="btn primary">"Save"</button>
                        <Show when=move || pane.get().id().is_some()>
                            <button type="button" class="btn danger" on:click=delete>"Delete"</button>
                        </Show>
                        <button
                            type="button"
                            class="btn"
                            on:click=move |_| {
                                ctx.state().close_note();
                                ctx.refresh();
                            }
                        >
                            "Close"
                        </button>
                    </div>
                </form>
            </section>
        </Show>
    }
}
