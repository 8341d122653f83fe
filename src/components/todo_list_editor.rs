//! Todo-List Editor Component
//!
//! Detail form for the open todo list, with its tasks underneath.

use leptos::prelude::*;

use crate::components::TaskList;
use crate::context::AppContext;
use crate::controllers::{BrowserConfirm, PaneState};
use crate::view::{todo_list_form, TodoListForm};

#[component]
pub fn TodoListEditor() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let pane = Memo::new(move |_| {
        ctx.revision.get();
        ctx.state().todo_lists.pane_state()
    });
    let current = Memo::new(move |_| {
        ctx.revision.get();
        ctx.state().todo_lists.current()
    });
    let form = RwSignal::new(TodoListForm::default());

    Effect::new(move |_| {
        pane.track();
        form.set(todo_list_form(current.get().as_ref()));
    });

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let state = ctx.state();
        let current = form.get();
        ctx.run(async move { state.save_todo_list(&current).await });
    };

    let delete = move |_: web_sys::MouseEvent| {
        let state = ctx.state();
        ctx.run(async move { state.delete_todo_list(&BrowserConfirm).await });
    };

    view! {
        <Show when=move || pane.get().is_open()>
            <section class="column editor todo-list-editor">
                <h2>{move || if pane.get() == PaneState::Editing { "New Todo List" } else { "Edit Todo List" }}</h2>
                <form on:submit=save>
                    <input
                        type="text"
                        placeholder="Name"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                    <textarea
                        placeholder="Description"
                        prop:value=move || form.with(|f| f.description.clone())
                        on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                    ></textarea>
                    <div class="editor-actions">
                        <button type="submit" class="btn primary">"Save"</button>
                        <Show when=move || pane.get().id().is_some()>
                            <button type="button" class="btn danger" on:click=delete>"Delete"</button>
                        </Show>
                        <button
                            type="button"
                            class="btn"
                            on:click=move |_| {
                                ctx.state().close_todo_list();
                                ctx.refresh();
                            }
                        >
                            "Close"
                        </button>
                    </div>
                </form>
                <Show when=move || pane.get().id().is_some()>
                    <TaskList />
                </Show>
            </section>
        </Show>
    }
}
