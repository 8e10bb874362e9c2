use crate::action::Action;
use crate::state::State;

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// One declared transition: performing `action` on a process at `from`
/// moves it to `to`. A destination of `State::Same` leaves the process
/// where it is; `State::Dummy` is a placeholder with the same effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: State,
    pub action: Action,
    pub to: State,
}

impl Edge {
    pub const fn new(from: State, action: Action, to: State) -> Self {
        Self { from, action, to }
    }
}

// ---------------------------------------------------------------------------
// White-Gloves transition table
// ---------------------------------------------------------------------------

/// The complete adjacency list of the White-Gloves workflow graph.
/// Declaration order is meaningful: it breaks rank ties in menus and
/// picks the edge when several could match a process.
pub const WHITE_GLOVES_EDGES: &[Edge] = &[
    // Letter family: one variant per connection type, all leaving Start.
    Edge::new(
        State::Start,
        Action::SendMigrationLetterAs2,
        State::MigrationLetterSent,
    ),
    Edge::new(
        State::Start,
        Action::SendMigrationLetterSftp,
        State::MigrationLetterSent,
    ),
    Edge::new(
        State::Start,
        Action::SendMigrationLetterHttps,
        State::MigrationLetterSent,
    ),
    // Connection test loop
    Edge::new(
        State::MigrationLetterSent,
        Action::ScheduleConnectionTest,
        State::ConnectionTestScheduled,
    ),
    Edge::new(
        State::ConnectionTestScheduled,
        Action::RecordTestPassed,
        State::ConnectionTestPassed,
    ),
    Edge::new(
        State::ConnectionTestScheduled,
        Action::RecordTestFailed,
        State::ConnectionTestFailed,
    ),
    Edge::new(
        State::ConnectionTestFailed,
        Action::RetryConnectionTest,
        State::ConnectionTestScheduled,
    ),
    // Cutover
    Edge::new(
        State::ConnectionTestPassed,
        Action::ScheduleCutover,
        State::CutoverScheduled,
    ),
    Edge::new(
        State::CutoverScheduled,
        Action::ConfirmCutoverInbound,
        State::CutoverComplete,
    ),
    Edge::new(
        State::CutoverScheduled,
        Action::ConfirmCutoverOutbound,
        State::CutoverComplete,
    ),
    Edge::new(State::CutoverComplete, Action::DecommissionLegacy, State::Same),
    Edge::new(
        State::CutoverComplete,
        Action::MarkReleaseComplete,
        State::ReleaseComplete,
    ),
    // Postpone is offered anywhere before cutover completes; it saves the
    // departure state so RestartMigration can return to it. The restart
    // edge routes to Dummy because its real destination is the saved state.
    Edge::new(State::Start, Action::PostponeMigration, State::MigrationPostponed),
    Edge::new(
        State::MigrationLetterSent,
        Action::PostponeMigration,
        State::MigrationPostponed,
    ),
    Edge::new(
        State::ConnectionTestScheduled,
        Action::PostponeMigration,
        State::MigrationPostponed,
    ),
    Edge::new(
        State::ConnectionTestPassed,
        Action::PostponeMigration,
        State::MigrationPostponed,
    ),
    Edge::new(
        State::ConnectionTestFailed,
        Action::PostponeMigration,
        State::MigrationPostponed,
    ),
    Edge::new(
        State::CutoverScheduled,
        Action::PostponeMigration,
        State::MigrationPostponed,
    ),
    Edge::new(State::MigrationPostponed, Action::RestartMigration, State::Dummy),
    // Eject
    Edge::new(State::Start, Action::Eject, State::Ejected),
    Edge::new(State::MigrationLetterSent, Action::Eject, State::Ejected),
    Edge::new(State::ConnectionTestScheduled, Action::Eject, State::Ejected),
    Edge::new(State::ConnectionTestPassed, Action::Eject, State::Ejected),
    Edge::new(State::ConnectionTestFailed, Action::Eject, State::Ejected),
    Edge::new(State::CutoverScheduled, Action::Eject, State::Ejected),
    Edge::new(State::MigrationPostponed, Action::Eject, State::Ejected),
    // Reminders self-loop on the awaiting-reply states
    Edge::new(State::MigrationLetterSent, Action::SendReminder, State::Same),
    Edge::new(State::CutoverScheduled, Action::SendReminder, State::Same),
    // Ad hoc mail is available from every live state
    Edge::new(State::Start, Action::SendEmail, State::Same),
    Edge::new(State::MigrationLetterSent, Action::SendEmail, State::Same),
    Edge::new(State::ConnectionTestScheduled, Action::SendEmail, State::Same),
    Edge::new(State::ConnectionTestPassed, Action::SendEmail, State::Same),
    Edge::new(State::ConnectionTestFailed, Action::SendEmail, State::Same),
    Edge::new(State::CutoverScheduled, Action::SendEmail, State::Same),
    Edge::new(State::CutoverComplete, Action::SendEmail, State::Same),
    Edge::new(State::ReleaseComplete, Action::SendEmail, State::Same),
    Edge::new(State::MigrationPostponed, Action::SendEmail, State::Same),
    Edge::new(State::Ejected, Action::SendEmail, State::Same),
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
