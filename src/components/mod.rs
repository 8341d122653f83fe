//! UI Components
//!
//! Leptos components. They read the app state through `AppContext` and
//! are the only code that touches the DOM.

mod auth_panel;
mod delete_confirm_button;
mod header;
mod item_list;
mod note_editor;
mod notes_column;
mod task_list;
mod toast;
mod todo_list_editor;
mod todo_lists_column;

pub use auth_panel::AuthPanel;
pub use delete_confirm_button::DeleteConfirmButton;
pub use header::Header;
pub use item_list::ItemList;
pub use note_editor::NoteEditor;
pub use notes_column::NotesColumn;
pub use task_list::TaskList;
pub use toast::Toast;
pub use todo_list_editor::TodoListEditor;
pub use todo_lists_column::TodoListsColumn;
