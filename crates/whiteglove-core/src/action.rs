use crate::state::State;
use crate::types::{Connection, Direction, Origin};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A named operation that can move processes between states.
///
/// Connection-specific variants (e.g. the migration-letter family) collapse
/// to a family head for display; the engine expands the head back into its
/// variants at execution time. Families nest exactly one level: a variant's
/// `family()` is always a head, never another variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    SendMigrationLetter,
    SendMigrationLetterAs2,
    SendMigrationLetterSftp,
    SendMigrationLetterHttps,
    ScheduleConnectionTest,
    RecordTestPassed,
    RecordTestFailed,
    RetryConnectionTest,
    ScheduleCutover,
    ConfirmCutover,
    ConfirmCutoverInbound,
    ConfirmCutoverOutbound,
    DecommissionLegacy,
    MarkReleaseComplete,
    Eject,
    PostponeMigration,
    RestartMigration,
    SendReminder,
    SendEmail,
}

impl Action {
    pub fn all() -> &'static [Action] {
        &[
            Action::SendMigrationLetter,
            Action::SendMigrationLetterAs2,
            Action::SendMigrationLetterSftp,
            Action::SendMigrationLetterHttps,
            Action::ScheduleConnectionTest,
            Action::RecordTestPassed,
            Action::RecordTestFailed,
            Action::RetryConnectionTest,
            Action::ScheduleCutover,
            Action::ConfirmCutover,
            Action::ConfirmCutoverInbound,
            Action::ConfirmCutoverOutbound,
            Action::DecommissionLegacy,
            Action::MarkReleaseComplete,
            Action::Eject,
            Action::PostponeMigration,
            Action::RestartMigration,
            Action::SendReminder,
            Action::SendEmail,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::SendMigrationLetter => "send_migration_letter",
            Action::SendMigrationLetterAs2 => "send_migration_letter_as2",
            Action::SendMigrationLetterSftp => "send_migration_letter_sftp",
            Action::SendMigrationLetterHttps => "send_migration_letter_https",
            Action::ScheduleConnectionTest => "schedule_connection_test",
            Action::RecordTestPassed => "record_test_passed",
            Action::RecordTestFailed => "record_test_failed",
            Action::RetryConnectionTest => "retry_connection_test",
            Action::ScheduleCutover => "schedule_cutover",
            Action::ConfirmCutover => "confirm_cutover",
            Action::ConfirmCutoverInbound => "confirm_cutover_inbound",
            Action::ConfirmCutoverOutbound => "confirm_cutover_outbound",
            Action::DecommissionLegacy => "decommission_legacy",
            Action::MarkReleaseComplete => "mark_release_complete",
            Action::Eject => "eject",
            Action::PostponeMigration => "postpone_migration",
            Action::RestartMigration => "restart_migration",
            Action::SendReminder => "send_reminder",
            Action::SendEmail => "send_email",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::SendMigrationLetter => "Send migration letter",
            Action::SendMigrationLetterAs2 => "Send migration letter (AS2)",
            Action::SendMigrationLetterSftp => "Send migration letter (SFTP)",
            Action::SendMigrationLetterHttps => "Send migration letter (HTTPS)",
            Action::ScheduleConnectionTest => "Schedule connection test",
            Action::RecordTestPassed => "Record test passed",
            Action::RecordTestFailed => "Record test failed",
            Action::RetryConnectionTest => "Retry connection test",
            Action::ScheduleCutover => "Schedule cutover",
            Action::ConfirmCutover => "Confirm cutover",
            Action::ConfirmCutoverInbound => "Confirm cutover (inbound)",
            Action::ConfirmCutoverOutbound => "Confirm cutover (outbound)",
            Action::DecommissionLegacy => "Decommission legacy endpoint",
            Action::MarkReleaseComplete => "Mark release complete",
            Action::Eject => "Eject from release",
            Action::PostponeMigration => "Postpone migration",
            Action::RestartMigration => "Restart migration",
            Action::SendReminder => "Send reminder",
            Action::SendEmail => "Send email",
        }
    }

    // ---------------------------------------------------------------------------
    // Metadata
    // ---------------------------------------------------------------------------

    /// Menu ordering rank. Ties are broken by edge declaration order.
    pub fn rank(self) -> u32 {
        match self {
            Action::SendMigrationLetter
            | Action::SendMigrationLetterAs2
            | Action::SendMigrationLetterSftp
            | Action::SendMigrationLetterHttps => 10,
            Action::ScheduleConnectionTest => 20,
            Action::RecordTestPassed => 21,
            Action::RecordTestFailed => 22,
            Action::RetryConnectionTest => 23,
            Action::ScheduleCutover => 30,
            Action::ConfirmCutover
            | Action::ConfirmCutoverInbound
            | Action::ConfirmCutoverOutbound => 31,
            Action::DecommissionLegacy => 40,
            Action::MarkReleaseComplete => 50,
            Action::Eject => 60,
            Action::PostponeMigration => 70,
            Action::RestartMigration => 71,
            Action::SendReminder => 80,
            Action::SendEmail => 90,
        }
    }

    /// The family head this action collapses to in menus, if any.
    pub fn family(self) -> Option<Action> {
        match self {
            Action::SendMigrationLetterAs2
            | Action::SendMigrationLetterSftp
            | Action::SendMigrationLetterHttps => Some(Action::SendMigrationLetter),
            Action::ConfirmCutoverInbound | Action::ConfirmCutoverOutbound => {
                Some(Action::ConfirmCutover)
            }
            _ => None,
        }
    }

    /// Applies to every process of a release, not just the selection.
    /// Selection expansion and confirmation are caller policies.
    pub fn is_release_action(self) -> bool {
        matches!(self, Action::MarkReleaseComplete)
    }

    pub fn saves_state(self) -> bool {
        matches!(self, Action::PostponeMigration)
    }

    pub fn restores_state(self) -> bool {
        matches!(self, Action::RestartMigration)
    }

    pub fn email_template(self) -> Option<&'static str> {
        match self {
            Action::SendMigrationLetterAs2 => Some("MIGRATION_LETTER_AS2"),
            Action::SendMigrationLetterSftp => Some("MIGRATION_LETTER_SFTP"),
            Action::SendMigrationLetterHttps => Some("MIGRATION_LETTER_HTTPS"),
            Action::ScheduleConnectionTest => Some("CONNECTION_TEST_INSTRUCTIONS"),
            Action::RetryConnectionTest => Some("CONNECTION_TEST_RETRY"),
            Action::ScheduleCutover => Some("CUTOVER_NOTICE"),
            Action::ConfirmCutoverInbound => Some("GO_LIVE_INBOUND"),
            Action::ConfirmCutoverOutbound => Some("GO_LIVE_OUTBOUND"),
            Action::DecommissionLegacy => Some("DECOMMISSION_NOTICE"),
            Action::MarkReleaseComplete => Some("RELEASE_COMPLETE_NOTICE"),
            Action::Eject => Some("EJECT_NOTICE"),
            Action::PostponeMigration => Some("MIGRATION_POSTPONED"),
            Action::SendReminder => Some("REMINDER"),
            Action::SendEmail => Some("AD_HOC"),
            _ => None,
        }
    }

    pub fn triggers_email(self) -> bool {
        self.email_template().is_some()
    }

    // ---------------------------------------------------------------------------
    // Facet allow-lists
    // ---------------------------------------------------------------------------

    /// Informational only: the engine gates on edge source states, not on
    /// this list. Kept in sync with the transition table for the actions
    /// that are state-restricted.
    pub fn states(self) -> &'static [State] {
        match self {
            Action::SendMigrationLetterAs2
            | Action::SendMigrationLetterSftp
            | Action::SendMigrationLetterHttps => &[State::Start],
            Action::ScheduleConnectionTest => &[State::MigrationLetterSent],
            Action::RecordTestPassed | Action::RecordTestFailed => {
                &[State::ConnectionTestScheduled]
            }
            Action::RetryConnectionTest => &[State::ConnectionTestFailed],
            Action::ScheduleCutover => &[State::ConnectionTestPassed],
            Action::ConfirmCutoverInbound | Action::ConfirmCutoverOutbound => {
                &[State::CutoverScheduled]
            }
            Action::DecommissionLegacy | Action::MarkReleaseComplete => &[State::CutoverComplete],
            Action::RestartMigration => &[State::MigrationPostponed],
            Action::SendReminder => &[State::MigrationLetterSent, State::CutoverScheduled],
            _ => &[],
        }
    }

    pub fn connections(self) -> &'static [Connection] {
        match self {
            Action::SendMigrationLetterAs2 => &[Connection::As2],
            Action::SendMigrationLetterSftp => &[Connection::Sftp],
            Action::SendMigrationLetterHttps => &[Connection::Https],
            _ => &[],
        }
    }

    pub fn directions(self) -> &'static [Direction] {
        match self {
            Action::ConfirmCutoverInbound => &[Direction::Inbound],
            Action::ConfirmCutoverOutbound => &[Direction::Outbound],
            _ => &[],
        }
    }

    pub fn origins(self) -> &'static [Origin] {
        match self {
            Action::DecommissionLegacy => &[Origin::OnPrem],
            _ => &[],
        }
    }

    // ---------------------------------------------------------------------------
    // Facet predicates
    // ---------------------------------------------------------------------------
    //
    // An empty allow-list means "no restriction", never "matches nothing".
    // A non-empty list matches if it intersects the supplied values.

    pub fn accepts_states(self, values: &[State]) -> bool {
        accepts(self.states(), values)
    }

    pub fn accepts_connections(self, values: &[Connection]) -> bool {
        accepts(self.connections(), values)
    }

    pub fn accepts_directions(self, values: &[Direction]) -> bool {
        accepts(self.directions(), values)
    }

    pub fn accepts_origins(self, values: &[Origin]) -> bool {
        accepts(self.origins(), values)
    }
}

fn accepts<T: PartialEq>(allowed: &[T], values: &[T]) -> bool {
    allowed.is_empty() || values.iter().any(|v| allowed.contains(v))
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Action {
    type Err = crate::error::WhiteGloveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::all()
            .iter()
            .find(|action| action.as_str() == s)
            .copied()
            .ok_or_else(|| crate::error::WhiteGloveError::UnknownAction(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn action_roundtrip() {
        for action in Action::all() {
            let parsed = Action::from_str(action.as_str()).unwrap();
            assert_eq!(*action, parsed);
        }
    }

    #[test]
    fn families_nest_one_level() {
        for action in Action::all() {
            if let Some(head) = action.family() {
                assert!(
                    head.family().is_none(),
                    "{action} collapses to {head}, which is itself a variant"
                );
            }
        }
    }

    #[test]
    fn variants_share_their_heads_rank() {
        for action in Action::all() {
            if let Some(head) = action.family() {
                assert_eq!(action.rank(), head.rank());
            }
        }
    }

    #[test]
    fn family_heads_carry_no_facets_or_template() {
        for action in Action::all() {
            if Action::all().iter().any(|a| a.family() == Some(*action)) {
                assert!(action.email_template().is_none());
                assert!(action.connections().is_empty());
                assert!(action.directions().is_empty());
                assert!(action.origins().is_empty());
            }
        }
    }

    #[test]
    fn empty_allow_list_matches_anything() {
        assert!(Action::Eject.accepts_connections(&[Connection::As2]));
        assert!(Action::Eject.accepts_connections(&[]));
        assert!(Action::Eject.accepts_directions(&[Direction::Outbound]));
        assert!(Action::Eject.accepts_origins(&[Origin::Cloud]));
        assert!(Action::Eject.accepts_states(&[State::Ejected]));
    }

    #[test]
    fn non_empty_allow_list_intersects() {
        let letter = Action::SendMigrationLetterAs2;
        assert!(letter.accepts_connections(&[Connection::As2]));
        // OR semantics: one match in the supplied set is enough
        assert!(letter.accepts_connections(&[Connection::Sftp, Connection::As2]));
        assert!(!letter.accepts_connections(&[Connection::Sftp]));
        // restricted facet against an empty value set does not match
        assert!(!letter.accepts_connections(&[]));
    }

    #[test]
    fn direction_restricted_variants() {
        assert!(Action::ConfirmCutoverInbound.accepts_directions(&[Direction::Inbound]));
        assert!(!Action::ConfirmCutoverInbound.accepts_directions(&[Direction::Outbound]));
        assert!(Action::ConfirmCutoverOutbound.accepts_directions(&[Direction::Outbound]));
    }

    #[test]
    fn origin_restricted_decommission() {
        assert!(Action::DecommissionLegacy.accepts_origins(&[Origin::OnPrem]));
        assert!(!Action::DecommissionLegacy.accepts_origins(&[Origin::Cloud]));
    }

    #[test]
    fn triggers_email_tracks_template() {
        for action in Action::all() {
            assert_eq!(action.triggers_email(), action.email_template().is_some());
        }
        assert!(Action::SendReminder.triggers_email());
        assert!(!Action::RecordTestPassed.triggers_email());
    }

    #[test]
    fn save_restore_flags_are_disjoint() {
        for action in Action::all() {
            assert!(!(action.saves_state() && action.restores_state()));
        }
    }

    #[test]
    fn release_action_flag() {
        assert!(Action::MarkReleaseComplete.is_release_action());
        assert!(!Action::Eject.is_release_action());
    }

    #[test]
    fn states_list_is_informational_and_in_table() {
        use crate::edge::WHITE_GLOVES_EDGES;
        // Where an action declares a state allow-list, the transition table
        // has an edge for each declared source state.
        for action in Action::all() {
            for state in action.states() {
                assert!(
                    WHITE_GLOVES_EDGES
                        .iter()
                        .any(|e| e.action == *action && e.from == *state),
                    "{action} declares {state} but the table has no such edge"
                );
            }
        }
    }
}
