use crate::cmd::select_processes;
use crate::output::{print_json, print_table};
use anyhow::Context;
use std::path::Path;
use whiteglove_core::release::Release;
use whiteglove_core::workflow::Workflow;

pub fn run(root: &Path, partner: Option<&str>, checked: bool, json: bool) -> anyhow::Result<()> {
    let release = Release::load(root).context("failed to load release")?;
    let selection = select_processes(&release, partner, checked)?;
    let workflow = Workflow::white_gloves();
    let actions = workflow.available_actions(&selection);

    if json {
        let entries: Vec<_> = actions
            .iter()
            .map(|a| {
                serde_json::json!({
                    "action": a.as_str(),
                    "label": a.label(),
                    "rank": a.rank(),
                    "release_action": a.is_release_action(),
                })
            })
            .collect();
        print_json(&entries)?;
        return Ok(());
    }

    if actions.is_empty() {
        println!("No applicable actions.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = actions
        .iter()
        .map(|a| {
            vec![
                a.as_str().to_string(),
                a.label().to_string(),
                if a.is_release_action() {
                    "release-wide".to_string()
                } else {
                    String::new()
                },
            ]
        })
        .collect();
    print_table(&["ACTION", "LABEL", "SCOPE"], &rows);
    Ok(())
}
