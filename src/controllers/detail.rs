//! Detail Pane State
//!
//! Which item a detail form shows, plus a request generation that lets a
//! controller drop responses for a selection the user already left.

/// What the detail form currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaneState {
    #[default]
    Empty,
    /// A persisted item
    Viewing(u64),
    /// A new, unsaved item
    Editing,
}

impl PaneState {
    pub fn id(self) -> Option<u64> {
        match self {
            PaneState::Viewing(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_open(self) -> bool {
        self != PaneState::Empty
    }
}

/// Ticket taken when a request starts; compared again when it completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// Result of an operation whose response may arrive too late to matter
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Applied(T),
    /// The pane moved on while the request was in flight; nothing was changed
    Discarded,
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Discarded => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct DetailPane {
    state: PaneState,
    generation: u64,
}

impl DetailPane {
    pub fn state(&self) -> PaneState {
        self.state
    }

    pub fn current_id(&self) -> Option<u64> {
        self.state.id()
    }

    /// Start a navigation: anything still in flight becomes stale
    pub fn begin(&mut self) -> Generation {
        self.generation += 1;
        Generation(self.generation)
    }

    /// Ticket for a request that must not invalidate the others (save, refresh)
    pub fn ticket(&self) -> Generation {
        Generation(self.generation)
    }

    pub fn is_current(&self, ticket: Generation) -> bool {
        self.generation == ticket.0
    }

    pub fn show(&mut self, id: u64) {
        self.state = PaneState::Viewing(id);
    }

    pub fn edit_new(&mut self) {
        self.begin();
        self.state = PaneState::Editing;
    }

    pub fn close(&mut self) {
        self.begin();
        self.state = PaneState::Empty;
    }
}
