//! Collection Controllers
//!
//! One controller per collection. Each holds the last-fetched items and the
//! single open item, and never touches the DOM.

mod detail;
mod notes;
mod tasks;
mod todo_lists;

pub use detail::{DetailPane, Generation, Outcome, PaneState};
pub use notes::{NoteFilter, NotesController};
pub use tasks::{TaskStatusFilter, TasksController, ToggleState};
pub use todo_lists::TodoListsController;

/// Asks the user to confirm a destructive action
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// Confirmation already given elsewhere (an inline confirm button)
pub struct Confirmed;

impl Confirm for Confirmed {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// `window.confirm`
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

/// Lock a controller's state, ignoring poisoning (single-threaded UI)
fn lock<T>(mutex: &std::sync::Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
