use crate::cmd::select_processes;
use crate::output::print_json;
use anyhow::{bail, Context};
use std::path::Path;
use std::str::FromStr;
use whiteglove_core::action::Action;
use whiteglove_core::release::Release;
use whiteglove_core::workflow::Workflow;

pub fn run(
    root: &Path,
    action_str: &str,
    partner: Option<&str>,
    checked: bool,
    yes: bool,
    json: bool,
) -> anyhow::Result<()> {
    let action =
        Action::from_str(action_str).with_context(|| format!("unknown action: {action_str}"))?;
    let release = Release::load(root).context("failed to load release")?;

    // Release-wide actions affect every process, whatever was selected.
    // The engine applies no expansion itself; widening the selection and
    // demanding confirmation are this layer's responsibilities.
    let selection = if action.is_release_action() {
        if !yes {
            bail!(
                "'{action_str}' applies to the whole release; re-run with --yes to confirm"
            );
        }
        release.all_processes()
    } else {
        select_processes(&release, partner, checked)?
    };

    if selection.is_empty() {
        bail!("selection is empty; nothing to do");
    }

    let workflow = Workflow::white_gloves();
    let outcome = workflow.execute_action(action, &release, &selection);
    outcome
        .release
        .save(root)
        .context("failed to save release snapshot")?;
    tracing::info!(action = %action, processes = selection.len(), "executed action");

    if json {
        print_json(&serde_json::json!({
            "action": action.as_str(),
            "selected": selection.len(),
            "email_logs": outcome.email_logs,
        }))?;
        return Ok(());
    }

    println!("Executed {action} across {} process(es)", selection.len());
    if outcome.email_logs.is_empty() {
        println!("No notifications.");
    } else {
        println!("Notifications:");
        for line in &outcome.email_logs {
            println!("  {line}");
        }
    }
    Ok(())
}
