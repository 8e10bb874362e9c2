use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Position of a process along its migration journey.
///
/// `Same` and `Dummy` are sentinels that only ever appear as edge
/// destinations in the transition table; no process is ever in either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    Start,
    MigrationLetterSent,
    ConnectionTestScheduled,
    ConnectionTestPassed,
    ConnectionTestFailed,
    CutoverScheduled,
    CutoverComplete,
    ReleaseComplete,
    MigrationPostponed,
    Ejected,
    Same,
    Dummy,
}

impl State {
    pub fn all() -> &'static [State] {
        &[
            State::Start,
            State::MigrationLetterSent,
            State::ConnectionTestScheduled,
            State::ConnectionTestPassed,
            State::ConnectionTestFailed,
            State::CutoverScheduled,
            State::CutoverComplete,
            State::ReleaseComplete,
            State::MigrationPostponed,
            State::Ejected,
            State::Same,
            State::Dummy,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            State::Start => "start",
            State::MigrationLetterSent => "migration_letter_sent",
            State::ConnectionTestScheduled => "connection_test_scheduled",
            State::ConnectionTestPassed => "connection_test_passed",
            State::ConnectionTestFailed => "connection_test_failed",
            State::CutoverScheduled => "cutover_scheduled",
            State::CutoverComplete => "cutover_complete",
            State::ReleaseComplete => "release_complete",
            State::MigrationPostponed => "migration_postponed",
            State::Ejected => "ejected",
            State::Same => "same",
            State::Dummy => "dummy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            State::Start => "Not started",
            State::MigrationLetterSent => "Migration letter sent",
            State::ConnectionTestScheduled => "Connection test scheduled",
            State::ConnectionTestPassed => "Connection test passed",
            State::ConnectionTestFailed => "Connection test failed",
            State::CutoverScheduled => "Cutover scheduled",
            State::CutoverComplete => "Cutover complete",
            State::ReleaseComplete => "Release complete",
            State::MigrationPostponed => "Migration postponed",
            State::Ejected => "Ejected",
            State::Same => "(same)",
            State::Dummy => "(dummy)",
        }
    }

    // ---------------------------------------------------------------------------
    // Capability flags
    // ---------------------------------------------------------------------------

    pub fn is_along_main_path(self) -> bool {
        matches!(
            self,
            State::Start
                | State::MigrationLetterSent
                | State::ConnectionTestScheduled
                | State::ConnectionTestPassed
                | State::CutoverScheduled
                | State::CutoverComplete
                | State::ReleaseComplete
        )
    }

    pub fn is_awaiting_reply(self) -> bool {
        matches!(self, State::MigrationLetterSent | State::CutoverScheduled)
    }

    pub fn is_error_state(self) -> bool {
        matches!(self, State::ConnectionTestFailed)
    }

    pub fn is_start_state(self) -> bool {
        matches!(self, State::Start)
    }

    pub fn is_end_state(self) -> bool {
        matches!(self, State::ReleaseComplete)
    }

    pub fn is_sentinel(self) -> bool {
        matches!(self, State::Same | State::Dummy)
    }

    /// Display color, by fixed priority: error, then awaiting-reply,
    /// then main-path, then none.
    pub fn color(self) -> StateColor {
        if self.is_error_state() {
            StateColor::Error
        } else if self.is_awaiting_reply() {
            StateColor::Warning
        } else if self.is_along_main_path() {
            StateColor::Primary
        } else {
            StateColor::None
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for State {
    type Err = crate::error::WhiteGloveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        State::all()
            .iter()
            .find(|state| state.as_str() == s)
            .copied()
            .ok_or_else(|| crate::error::WhiteGloveError::UnknownState(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// StateColor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateColor {
    Error,
    Warning,
    Primary,
    None,
}

impl StateColor {
    pub fn as_str(self) -> &'static str {
        match self {
            StateColor::Error => "error",
            StateColor::Warning => "warning",
            StateColor::Primary => "primary",
            StateColor::None => "none",
        }
    }
}

impl fmt::Display for StateColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
