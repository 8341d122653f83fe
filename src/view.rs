//! View Projections
//!
//! Pure functions from models to what the components render. Nothing here
//! touches the DOM, so the forms and rows can be checked headlessly.

use chrono::NaiveDateTime;

use crate::models::{Note, NoteFields, Task, TaskPriority, TaskStatus, TodoList, TodoListFields};

/// Split a comma-separated tag input, trimming and dropping blanks
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// One clickable row of a collection list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub id: u64,
    pub label: String,
    pub active: bool,
}

pub fn note_entries(notes: &[Note], current: Option<u64>) -> Vec<ListEntry> {
    notes
        .iter()
        .filter_map(|n| {
            let id = n.id?;
            Some(ListEntry { id, label: n.title.clone(), active: current == Some(id) })
        })
        .collect()
}

pub fn todo_list_entries(lists: &[TodoList], current: Option<u64>) -> Vec<ListEntry> {
    lists
        .iter()
        .filter_map(|l| {
            let id = l.id?;
            Some(ListEntry { id, label: l.name.clone(), active: current == Some(id) })
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub id: Option<u64>,
    pub title: String,
    pub content: String,
    /// Tag names joined with ", "
    pub tags: String,
}

impl NoteForm {
    pub fn to_fields(&self) -> NoteFields {
        NoteFields {
            title: self.title.trim().to_string(),
            content: self.content.clone(),
            tags: parse_tags(&self.tags),
        }
    }
}

/// Form for a note, or an empty one for a new note
pub fn note_form(note: Option<&Note>) -> NoteForm {
    let Some(note) = note else {
        return NoteForm::default();
    };
    NoteForm {
        id: note.id,
        title: note.title.clone(),
        content: note.content.clone().unwrap_or_default(),
        tags: note
            .tags
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoListForm {
    pub id: Option<u64>,
    pub name: String,
    pub description: String,
}

impl TodoListForm {
    pub fn to_fields(&self) -> TodoListFields {
        TodoListFields {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
        }
    }
}

pub fn todo_list_form(list: Option<&TodoList>) -> TodoListForm {
    list.map(|l| TodoListForm {
        id: l.id,
        name: l.name.clone(),
        description: l.description.clone().unwrap_or_default(),
    })
    .unwrap_or_default()
}

/// What one task row shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: u64,
    pub title: String,
    pub checked: bool,
    pub priority: TaskPriority,
    pub due_date: Option<String>,
}

impl TaskRow {
    pub fn class(&self) -> &'static str {
        if self.checked {
            "task-item completed"
        } else {
            "task-item"
        }
    }

    pub fn badge_class(&self) -> String {
        format!("priority-badge priority-{}", self.priority.as_str().to_lowercase())
    }
}

/// Row for `task`, showing `displayed` as its status (the requested one
/// while a toggle is in flight)
pub fn task_row(task: &Task, displayed: TaskStatus) -> TaskRow {
    TaskRow {
        id: task.id,
        title: task.title.clone(),
        checked: displayed.is_completed(),
        priority: task.priority,
        due_date: task.due_date.map(format_due),
    }
}

fn format_due(due: NaiveDateTime) -> String {
    due.format("%Y-%m-%d").to_string()
}
