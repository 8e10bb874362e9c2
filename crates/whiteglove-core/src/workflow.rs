use crate::action::Action;
use crate::edge::{Edge, WHITE_GLOVES_EDGES};
use crate::partner::Partner;
use crate::process::{Process, ProcessUpdate};
use crate::release::Release;
use crate::state::State;
use crate::types::{Connection, Direction, Origin};

// ---------------------------------------------------------------------------
// ExecutionOutcome
// ---------------------------------------------------------------------------

/// Result of one `execute_action` call: the rewritten release and one
/// human-readable line per distinct (partner, template) notification.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionOutcome {
    pub release: Release,
    pub email_logs: Vec<String>,
}

// ---------------------------------------------------------------------------
// EmailBatch
// ---------------------------------------------------------------------------

/// Deduplicating notification collector. Several processes of one partner
/// transitioning via the same template collapse to a single entry; order
/// is template-then-partner, both by first record.
#[derive(Debug, Default)]
struct EmailBatch {
    templates: Vec<(&'static str, Vec<(String, String)>)>,
}

impl EmailBatch {
    fn record(&mut self, template: &'static str, partner: &Partner) {
        let idx = match self.templates.iter().position(|(t, _)| *t == template) {
            Some(idx) => idx,
            None => {
                self.templates.push((template, Vec::new()));
                self.templates.len() - 1
            }
        };
        let partners = &mut self.templates[idx].1;
        if !partners.iter().any(|(id, _)| id == &partner.id) {
            partners.push((partner.id.clone(), partner.name.clone()));
        }
    }

    fn lines(self) -> Vec<String> {
        self.templates
            .into_iter()
            .flat_map(|(template, partners)| {
                partners
                    .into_iter()
                    .map(move |(_, name)| format!("{name} → {template}"))
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

/// The process-flow engine: a transition table plus the two operations the
/// caller drives it with. Stateless and pure — both operations are
/// functions of their inputs and the static action metadata.
#[derive(Debug, Clone)]
pub struct Workflow {
    edges: Vec<Edge>,
}

impl Workflow {
    pub fn new(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    /// The production White-Gloves table.
    pub fn white_gloves() -> Self {
        Self::new(WHITE_GLOVES_EDGES.to_vec())
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Actions plausibly offerable for this selection, rank ascending,
    /// variants collapsed to their family heads, deduplicated.
    ///
    /// Eligibility here is deliberately permissive: each facet is matched
    /// against the *union* over the whole selection, so a mixed selection
    /// surfaces an action as long as any member could use it. Individual
    /// eligibility is re-checked per process at execution time.
    pub fn available_actions(&self, processes: &[Process]) -> Vec<Action> {
        let mut states: Vec<State> = Vec::new();
        let mut connections: Vec<Connection> = Vec::new();
        let mut directions: Vec<Direction> = Vec::new();
        let mut origins: Vec<Origin> = Vec::new();
        for process in processes {
            push_unique(&mut states, process.state);
            push_unique(&mut connections, process.connection);
            push_unique(&mut directions, process.direction);
            push_unique(&mut origins, process.origin);
        }

        let mut matched: Vec<&Edge> = self
            .edges
            .iter()
            .filter(|edge| {
                states.contains(&edge.from)
                    && edge.action.accepts_connections(&connections)
                    && edge.action.accepts_directions(&directions)
                    && edge.action.accepts_origins(&origins)
            })
            .collect();
        // stable: rank ties keep edge declaration order
        matched.sort_by_key(|edge| edge.action.rank());

        let mut actions: Vec<Action> = Vec::new();
        for edge in matched {
            let display = edge.action.family().unwrap_or(edge.action);
            push_unique(&mut actions, display);
        }
        actions
    }

    /// Apply one chosen action (and its variant siblings) across a
    /// selection. Each process is matched individually against its own
    /// connection, direction and origin; processes with no eligible edge
    /// are skipped without error — the best-effort batch policy.
    pub fn execute_action(
        &self,
        action: Action,
        release: &Release,
        processes: &[Process],
    ) -> ExecutionOutcome {
        // Re-expand the family detail that menu collapsing discarded.
        let to_apply: Vec<Action> = Action::all()
            .iter()
            .copied()
            .filter(|a| *a == action || a.family() == Some(action))
            .collect();

        let mut plan: Vec<(&Process, Action, State)> = Vec::new();
        for process in processes {
            let edge = self.edges.iter().find(|edge| {
                edge.from == process.state
                    && to_apply.contains(&edge.action)
                    && edge.action.accepts_connections(&[process.connection])
                    && edge.action.accepts_directions(&[process.direction])
                    && edge.action.accepts_origins(&[process.origin])
            });
            match edge {
                Some(edge) => plan.push((process, edge.action, edge.to)),
                None => tracing::debug!(
                    process = %process.id,
                    action = %action,
                    "no eligible edge, process left unchanged"
                ),
            }
        }

        let mut next = release.clone();
        let mut batch = EmailBatch::default();
        for (process, resolved, destination) in plan {
            if let Some(template) = resolved.email_template() {
                if let Some(partner) = release.find_partner_for_process(&process.id) {
                    batch.record(template, partner);
                }
            }

            // Same and Dummy both mean "no destination semantics".
            let target = (!destination.is_sentinel()).then_some(destination);
            let update = if resolved.saves_state() {
                ProcessUpdate {
                    saved_state: Some(process.state),
                    state: target,
                    ..ProcessUpdate::default()
                }
            } else if resolved.restores_state() {
                ProcessUpdate::state(process.saved_state)
            } else if let Some(target) = target {
                ProcessUpdate::state(target)
            } else {
                continue;
            };
            next = next.update_process(&process.id, update);
        }

        ExecutionOutcome {
            release: next,
            email_logs: batch.lines(),
        }
    }
}

fn push_unique<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if !values.contains(&value) {
        values.push(value);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn epoch() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-15T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn process(
        id: &str,
        name: &str,
        connection: Connection,
        direction: Direction,
        origin: Origin,
    ) -> Process {
        Process::new(id, name, connection, direction, origin)
    }

    fn at(p: Process, state: State) -> Process {
        p.update(ProcessUpdate::state(state))
    }

    /// One partner "AS2 Partner" owning two AS2 processes at Start.
    fn as2_release() -> Release {
        Release {
            name: "wave-1".to_string(),
            created_at: epoch(),
            partners: vec![Partner::with_processes(
                "as2-partner",
                "AS2 Partner",
                vec![
                    process("p-1", "Invoices", Connection::As2, Direction::Inbound, Origin::OnPrem),
                    process("p-2", "Orders", Connection::As2, Direction::Outbound, Origin::OnPrem),
                ],
            )],
        }
    }

    #[test]
    fn empty_selection_yields_no_actions() {
        let workflow = Workflow::white_gloves();
        assert!(workflow.available_actions(&[]).is_empty());
    }

    #[test]
    fn white_gloves_uses_the_production_table() {
        let workflow = Workflow::white_gloves();
        assert_eq!(workflow.edges(), WHITE_GLOVES_EDGES);
    }

    #[test]
    fn start_menu_for_as2_selection() {
        let workflow = Workflow::white_gloves();
        let release = as2_release();
        let menu = workflow.available_actions(&release.all_processes());
        assert_eq!(
            menu,
            vec![
                Action::SendMigrationLetter,
                Action::Eject,
                Action::PostponeMigration,
                Action::SendEmail,
            ]
        );
    }

    #[test]
    fn menu_collapses_variants_without_duplicates() {
        let workflow = Workflow::white_gloves();
        // Mixed connections: both letter variants match, the head appears once.
        let selection = vec![
            process("a", "A", Connection::As2, Direction::Inbound, Origin::OnPrem),
            process("b", "B", Connection::Sftp, Direction::Inbound, Origin::Cloud),
        ];
        let menu = workflow.available_actions(&selection);
        assert_eq!(
            menu.iter()
                .filter(|a| **a == Action::SendMigrationLetter)
                .count(),
            1
        );
        // Nothing surfaces twice, whatever the selection.
        let mut seen = Vec::new();
        for action in &menu {
            assert!(!seen.contains(action), "{action} appears twice");
            seen.push(*action);
        }
    }

    #[test]
    fn aggregate_matching_is_permissive_across_selection() {
        let workflow = Workflow::white_gloves();
        // One process is past Start; the letter family still surfaces
        // because the other member's state is in the aggregate set.
        let selection = vec![
            at(
                process("a", "A", Connection::As2, Direction::Inbound, Origin::OnPrem),
                State::MigrationLetterSent,
            ),
            process("b", "B", Connection::As2, Direction::Inbound, Origin::OnPrem),
        ];
        let menu = workflow.available_actions(&selection);
        assert!(menu.contains(&Action::SendMigrationLetter));
        assert!(menu.contains(&Action::ScheduleConnectionTest));
    }

    #[test]
    fn execute_letter_scenario() {
        let workflow = Workflow::white_gloves();
        let release = as2_release();
        let outcome = workflow.execute_action(
            Action::SendMigrationLetter,
            &release,
            &release.all_processes(),
        );

        for p in outcome.release.processes() {
            assert_eq!(p.state, State::MigrationLetterSent);
        }
        // Two processes, one partner, one template: exactly one line.
        assert_eq!(outcome.email_logs, vec!["AS2 Partner → MIGRATION_LETTER_AS2"]);
        // Input release untouched.
        for p in release.processes() {
            assert_eq!(p.state, State::Start);
        }
    }

    #[test]
    fn executing_a_variant_directly_works() {
        let workflow = Workflow::white_gloves();
        let release = Release {
            name: "wave-1".to_string(),
            created_at: epoch(),
            partners: vec![Partner::with_processes(
                "globex",
                "Globex",
                vec![process("p-1", "Feeds", Connection::Sftp, Direction::Inbound, Origin::Cloud)],
            )],
        };
        let outcome = workflow.execute_action(
            Action::SendMigrationLetterSftp,
            &release,
            &release.all_processes(),
        );
        assert_eq!(
            outcome.release.processes().next().unwrap().state,
            State::MigrationLetterSent
        );
        assert_eq!(outcome.email_logs, vec!["Globex → MIGRATION_LETTER_SFTP"]);
    }

    #[test]
    fn unmatched_processes_are_skipped_silently() {
        let workflow = Workflow::white_gloves();
        let mut release = as2_release();
        release.partners[0].processes = vec![at(
            process("p-1", "Invoices", Connection::As2, Direction::Inbound, Origin::OnPrem),
            State::ReleaseComplete,
        )];

        let outcome = workflow.execute_action(
            Action::SendMigrationLetter,
            &release,
            &release.all_processes(),
        );
        assert_eq!(outcome.release, release);
        assert!(outcome.email_logs.is_empty());
    }

    #[test]
    fn mixed_selection_applies_where_it_can() {
        let workflow = Workflow::white_gloves();
        let release = Release {
            name: "wave-1".to_string(),
            created_at: epoch(),
            partners: vec![Partner::with_processes(
                "acme",
                "Acme",
                vec![
                    process("p-1", "Invoices", Connection::As2, Direction::Inbound, Origin::OnPrem),
                    at(
                        process("p-2", "Orders", Connection::As2, Direction::Inbound, Origin::OnPrem),
                        State::Ejected,
                    ),
                ],
            )],
        };
        let outcome = workflow.execute_action(
            Action::SendMigrationLetter,
            &release,
            &release.all_processes(),
        );
        assert_eq!(
            outcome.release.partner("acme").unwrap().process("p-1").unwrap().state,
            State::MigrationLetterSent
        );
        assert_eq!(
            outcome.release.partner("acme").unwrap().process("p-2").unwrap().state,
            State::Ejected
        );
    }

    #[test]
    fn same_destination_never_changes_state() {
        let workflow = Workflow::white_gloves();
        let release = Release {
            name: "wave-1".to_string(),
            created_at: epoch(),
            partners: vec![Partner::with_processes(
                "acme",
                "Acme",
                vec![at(
                    process("p-1", "Invoices", Connection::As2, Direction::Inbound, Origin::OnPrem),
                    State::MigrationLetterSent,
                )],
            )],
        };
        let outcome =
            workflow.execute_action(Action::SendReminder, &release, &release.all_processes());
        assert_eq!(
            outcome.release.processes().next().unwrap().state,
            State::MigrationLetterSent
        );
        // The edge matched, so the reminder mail is still logged.
        assert_eq!(outcome.email_logs, vec!["Acme → REMINDER"]);
    }

    #[test]
    fn dummy_destination_behaves_like_same() {
        // Regression pin: an edge routing to Dummy leaves the state alone.
        let workflow = Workflow::new(vec![Edge::new(
            State::ConnectionTestPassed,
            Action::ScheduleCutover,
            State::Dummy,
        )]);
        let release = Release {
            name: "wave-1".to_string(),
            created_at: epoch(),
            partners: vec![Partner::with_processes(
                "acme",
                "Acme",
                vec![at(
                    process("p-1", "Invoices", Connection::As2, Direction::Inbound, Origin::OnPrem),
                    State::ConnectionTestPassed,
                )],
            )],
        };
        let outcome =
            workflow.execute_action(Action::ScheduleCutover, &release, &release.all_processes());
        assert_eq!(
            outcome.release.processes().next().unwrap().state,
            State::ConnectionTestPassed
        );
        assert_eq!(outcome.email_logs, vec!["Acme → CUTOVER_NOTICE"]);
    }

    #[test]
    fn postpone_saves_and_restart_restores() {
        let workflow = Workflow::white_gloves();
        let release = Release {
            name: "wave-1".to_string(),
            created_at: epoch(),
            partners: vec![Partner::with_processes(
                "acme",
                "Acme",
                vec![at(
                    process("p-1", "Invoices", Connection::As2, Direction::Inbound, Origin::OnPrem),
                    State::ConnectionTestPassed,
                )],
            )],
        };

        let postponed = workflow.execute_action(
            Action::PostponeMigration,
            &release,
            &release.all_processes(),
        );
        let p = postponed.release.processes().next().unwrap().clone();
        assert_eq!(p.state, State::MigrationPostponed);
        assert_eq!(p.saved_state, State::ConnectionTestPassed);
        assert_eq!(postponed.email_logs, vec!["Acme → MIGRATION_POSTPONED"]);

        // An intervening self-loop action does not disturb the round trip.
        let nudged = workflow.execute_action(
            Action::SendEmail,
            &postponed.release,
            &postponed.release.all_processes(),
        );

        let restarted = workflow.execute_action(
            Action::RestartMigration,
            &nudged.release,
            &nudged.release.all_processes(),
        );
        assert_eq!(
            restarted.release.processes().next().unwrap().state,
            State::ConnectionTestPassed
        );
        // RestartMigration carries no template.
        assert!(restarted.email_logs.is_empty());
    }

    #[test]
    fn email_lines_order_template_then_partner() {
        let workflow = Workflow::white_gloves();
        let release = Release {
            name: "wave-1".to_string(),
            created_at: epoch(),
            partners: vec![
                Partner::with_processes(
                    "acme",
                    "Acme",
                    vec![process("p-1", "Invoices", Connection::As2, Direction::Inbound, Origin::OnPrem)],
                ),
                Partner::with_processes(
                    "globex",
                    "Globex",
                    vec![process("p-2", "Feeds", Connection::Sftp, Direction::Inbound, Origin::Cloud)],
                ),
                Partner::with_processes(
                    "initech",
                    "Initech",
                    vec![process("p-3", "Reports", Connection::As2, Direction::Outbound, Origin::OnPrem)],
                ),
            ],
        };
        let outcome = workflow.execute_action(
            Action::SendMigrationLetter,
            &release,
            &release.all_processes(),
        );
        // AS2 template first (recorded first), its partners in plan order,
        // then the SFTP template.
        assert_eq!(
            outcome.email_logs,
            vec![
                "Acme → MIGRATION_LETTER_AS2",
                "Initech → MIGRATION_LETTER_AS2",
                "Globex → MIGRATION_LETTER_SFTP",
            ]
        );
    }

    #[test]
    fn direction_variants_resolve_per_process() {
        let workflow = Workflow::white_gloves();
        let release = Release {
            name: "wave-1".to_string(),
            created_at: epoch(),
            partners: vec![Partner::with_processes(
                "acme",
                "Acme",
                vec![
                    at(
                        process("p-1", "Invoices", Connection::As2, Direction::Inbound, Origin::OnPrem),
                        State::CutoverScheduled,
                    ),
                    at(
                        process("p-2", "Orders", Connection::As2, Direction::Outbound, Origin::OnPrem),
                        State::CutoverScheduled,
                    ),
                ],
            )],
        };
        let outcome = workflow.execute_action(
            Action::ConfirmCutover,
            &release,
            &release.all_processes(),
        );
        for p in outcome.release.processes() {
            assert_eq!(p.state, State::CutoverComplete);
        }
        assert_eq!(
            outcome.email_logs,
            vec!["Acme → GO_LIVE_INBOUND", "Acme → GO_LIVE_OUTBOUND"]
        );
    }

    #[test]
    fn origin_restriction_gates_the_menu() {
        let workflow = Workflow::white_gloves();
        let cloud = vec![at(
            process("p-1", "Feeds", Connection::Https, Direction::Inbound, Origin::Cloud),
            State::CutoverComplete,
        )];
        let on_prem = vec![at(
            process("p-2", "Invoices", Connection::As2, Direction::Inbound, Origin::OnPrem),
            State::CutoverComplete,
        )];

        assert!(!workflow
            .available_actions(&cloud)
            .contains(&Action::DecommissionLegacy));
        assert!(workflow
            .available_actions(&on_prem)
            .contains(&Action::DecommissionLegacy));
    }

    #[test]
    fn release_action_transitions_only_supplied_processes() {
        // The engine applies no selection expansion for release actions;
        // widening the selection is the caller's job.
        let workflow = Workflow::white_gloves();
        let release = Release {
            name: "wave-1".to_string(),
            created_at: epoch(),
            partners: vec![
                Partner::with_processes(
                    "acme",
                    "Acme",
                    vec![at(
                        process("p-1", "Invoices", Connection::As2, Direction::Inbound, Origin::OnPrem),
                        State::CutoverComplete,
                    )],
                ),
                Partner::with_processes(
                    "globex",
                    "Globex",
                    vec![at(
                        process("p-2", "Feeds", Connection::Sftp, Direction::Inbound, Origin::Cloud),
                        State::CutoverComplete,
                    )],
                ),
            ],
        };
        assert!(Action::MarkReleaseComplete.is_release_action());

        let partial: Vec<Process> = release.partner("acme").unwrap().processes.clone();
        let outcome = workflow.execute_action(Action::MarkReleaseComplete, &release, &partial);

        assert_eq!(
            outcome.release.partner("acme").unwrap().process("p-1").unwrap().state,
            State::ReleaseComplete
        );
        assert_eq!(
            outcome.release.partner("globex").unwrap().process("p-2").unwrap().state,
            State::CutoverComplete
        );
        assert_eq!(outcome.email_logs, vec!["Acme → RELEASE_COMPLETE_NOTICE"]);
    }

    #[test]
    fn processes_outside_the_release_are_harmless() {
        let workflow = Workflow::white_gloves();
        let release = as2_release();
        let stray = process("stray", "Stray", Connection::As2, Direction::Inbound, Origin::OnPrem);

        let outcome = workflow.execute_action(Action::SendMigrationLetter, &release, &[stray]);
        // The edge matches, but the tree has no such process and no owning
        // partner: nothing changes and nothing is logged.
        assert_eq!(outcome.release, release);
        assert!(outcome.email_logs.is_empty());
    }
}
