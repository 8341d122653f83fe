//! Task List Component
//!
//! Tasks of the open todo list: status tabs, add/edit input and rows.

use leptos::prelude::*;

use crate::components::DeleteConfirmButton;
use crate::context::AppContext;
use crate::controllers::{Confirmed, TaskStatusFilter};
use crate::models::{TaskPriority, TaskStatus};
use crate::view::{task_row, TaskRow};

const FILTER_TABS: [(&str, TaskStatusFilter); 3] = [
    ("All", TaskStatusFilter::All),
    ("Pending", TaskStatusFilter::Only(TaskStatus::Pending)),
    ("Completed", TaskStatusFilter::Only(TaskStatus::Completed)),
];

#[component]
pub fn TaskList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let rows = move || {
        ctx.revision.get();
        let tasks = ctx.state().tasks;
        tasks
            .tasks()
            .iter()
            .map(|t| task_row(t, tasks.displayed_status(t)))
            .collect::<Vec<_>>()
    };
    let filter = move || {
        ctx.revision.get();
        ctx.state().tasks.filter()
    };

    view! {
        <div class="tasks">
            <h3>"Tasks"</h3>
            <div class="status-tabs">
                {FILTER_TABS
                    .into_iter()
                    .map(|(label, tab)| {
                        view! {
                            <button
                                class=move || if filter() == tab { "status-tab active" } else { "status-tab" }
                                on:click=move |_| {
                                    let state = ctx.state();
                                    ctx.run(async move { state.filter_tasks(tab).await });
                                }
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <TaskInput />
            <ul class="task-list">
                <For
                    each=rows
                    key=|row| (row.id, row.checked, row.title.clone(), row.priority)
                    children=|row| view! { <TaskRowView row=row /> }
                />
            </ul>
        </div>
    }
}

/// Add-task input; Enter submits. Doubles as the edit field for a selected task.
#[component]
fn TaskInput() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (title, set_title) = signal(String::new());
    let (priority, set_priority) = signal(TaskPriority::Medium);

    let selected = Memo::new(move |_| {
        ctx.revision.get();
        ctx.state().tasks.selected()
    });

    // Load a task picked for editing
    Effect::new(move |_| {
        if let Some(task) = selected.get() {
            set_title.set(task.title);
            set_priority.set(task.priority);
        }
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let state = ctx.state();
        let (text, chosen) = (title.get(), priority.get());
        ctx.run(async move {
            if state.save_task(&text, chosen).await {
                set_title.set(String::new());
                set_priority.set(TaskPriority::Medium);
            }
        });
    };

    view! {
        <form class="add-task-form" on:submit=submit>
            <input
                type="text"
                placeholder="Add a task..."
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <select
                class="priority-select"
                prop:value=move || priority.get().as_str()
                on:change=move |ev| {
                    if let Some(p) = TaskPriority::parse(&event_target_value(&ev)) {
                        set_priority.set(p);
                    }
                }
            >
                {TaskPriority::ALL
                    .into_iter()
                    .map(|p| view! { <option value=p.as_str()>{p.label()}</option> })
                    .collect_view()}
            </select>
            <button type="submit" class="btn primary">
                {move || if selected.with(Option::is_some) { "Update" } else { "Add" }}
            </button>
            <Show when=move || selected.with(Option::is_some)>
                <button
                    type="button"
                    class="btn"
                    on:click=move |_| {
                        ctx.state().cancel_task_edit();
                        set_title.set(String::new());
                        set_priority.set(TaskPriority::Medium);
                        ctx.refresh();
                    }
                >
                    "Cancel"
                </button>
            </Show>
        </form>
    }
}

#[component]
fn TaskRowView(row: TaskRow) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let id = row.id;
    let class = row.class();
    let badge_class = row.badge_class();

    view! {
        <li class=class>
            <input
                type="checkbox"
                class="task-checkbox"
                prop:checked=row.checked
                on:change=move |ev| ctx.run(ctx.state().toggle_task(id, event_target_checked(&ev)))
            />
            <span
                class="task-text"
                on:click=move |_| {
                    let state = ctx.state();
                    ctx.run(async move { state.edit_task(id).await });
                }
            >
                {row.title}
            </span>
            <span class=badge_class>{row.priority.label()}</span>
            {row.due_date.map(|due| view! { <span class="due-date">{due}</span> })}
            <div class="task-actions">
                <DeleteConfirmButton
                    button_class="btn danger"
                    on_confirm=move |_| {
                        let state = ctx.state();
                        ctx.run(async move { state.delete_task(id, &Confirmed).await });
                    }
                />
            </div>
        </li>
    }
}
