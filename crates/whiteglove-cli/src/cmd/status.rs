use crate::output::{print_json, print_table};
use anyhow::Context;
use std::path::Path;
use whiteglove_core::release::Release;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let release = Release::load(root).context("failed to load release")?;

    if json {
        print_json(&release)?;
        return Ok(());
    }

    println!(
        "Release: {} ({} partners, {} processes)",
        release.name,
        release.partners.len(),
        release.processes().count()
    );

    if release.partners.is_empty() {
        println!("No partners yet. Add one with 'whiteglove partner add'.");
        return Ok(());
    }

    let mut rows = Vec::new();
    for partner in &release.partners {
        for process in &partner.processes {
            rows.push(vec![
                if partner.checked {
                    format!("{} *", partner.id)
                } else {
                    partner.id.clone()
                },
                process.id.clone(),
                process.name.clone(),
                process.state.to_string(),
                process.state.color().to_string(),
                process.connection.to_string(),
                process.direction.to_string(),
                process.origin.to_string(),
            ]);
        }
    }
    print_table(
        &[
            "PARTNER", "PROCESS", "NAME", "STATE", "COLOR", "CONN", "DIR", "ORIGIN",
        ],
        &rows,
    );
    Ok(())
}
