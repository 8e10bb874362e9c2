use crate::state::State;
use crate::types::{Connection, Direction, Origin};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Process
// ---------------------------------------------------------------------------

/// The smallest unit that advances through the workflow. Owned by exactly
/// one partner; never mutated in place — every change goes through
/// `update`, which returns a fresh value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub id: String,
    pub name: String,
    pub state: State,
    pub connection: Connection,
    pub direction: Direction,
    pub origin: Origin,
    #[serde(default = "default_saved_state")]
    pub saved_state: State,
}

fn default_saved_state() -> State {
    State::Start
}

// ---------------------------------------------------------------------------
// ProcessUpdate
// ---------------------------------------------------------------------------

/// Field changes for a copy-on-write `Process::update`. `None` leaves the
/// field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProcessUpdate {
    pub name: Option<String>,
    pub state: Option<State>,
    pub saved_state: Option<State>,
}

impl ProcessUpdate {
    pub fn state(state: State) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }
}

impl Process {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        connection: Connection,
        direction: Direction,
        origin: Origin,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state: State::Start,
            connection,
            direction,
            origin,
            saved_state: State::Start,
        }
    }

    pub fn update(&self, update: ProcessUpdate) -> Process {
        let mut next = self.clone();
        if let Some(name) = update.name {
            next.name = name;
        }
        if let Some(state) = update.state {
            next.state = state;
        }
        if let Some(saved_state) = update.saved_state {
            next.saved_state = saved_state;
        }
        next
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
