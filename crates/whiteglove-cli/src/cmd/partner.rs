use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use whiteglove_core::partner::{Partner, PartnerUpdate};
use whiteglove_core::paths;
use whiteglove_core::release::Release;

#[derive(Subcommand)]
pub enum PartnerSubcommand {
    /// Add a partner to the release
    Add {
        id: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Mark a partner as checked (bulk selection)
    Check { id: String },
    /// Clear a partner's checked flag
    Uncheck { id: String },
    /// List partners
    List,
}

pub fn run(root: &Path, subcmd: PartnerSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        PartnerSubcommand::Add { id, name } => add(root, &id, name, json),
        PartnerSubcommand::Check { id } => set_checked(root, &id, true, json),
        PartnerSubcommand::Uncheck { id } => set_checked(root, &id, false, json),
        PartnerSubcommand::List => list(root, json),
    }
}

fn add(root: &Path, id: &str, name: Option<String>, json: bool) -> anyhow::Result<()> {
    paths::validate_id(id)?;
    let name = name.unwrap_or_else(|| id.replace('-', " "));

    let release = Release::load(root).context("failed to load release")?;
    let release = release
        .add_partner(Partner::new(id, &name))
        .with_context(|| format!("failed to add partner '{id}'"))?;
    release.save(root).context("failed to save release")?;

    if json {
        print_json(&serde_json::json!({ "id": id, "name": name }))?;
    } else {
        println!("Added partner: {id} — {name}");
    }
    Ok(())
}

fn set_checked(root: &Path, id: &str, checked: bool, json: bool) -> anyhow::Result<()> {
    let release = Release::load(root).context("failed to load release")?;
    if release.partner(id).is_none() {
        anyhow::bail!("partner '{id}' not found");
    }
    let release = release.update_partner(id, PartnerUpdate::checked(checked));
    release.save(root).context("failed to save release")?;

    if json {
        print_json(&serde_json::json!({ "id": id, "checked": checked }))?;
    } else {
        println!(
            "Partner {id} is now {}",
            if checked { "checked" } else { "unchecked" }
        );
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let release = Release::load(root).context("failed to load release")?;

    if json {
        let entries: Vec<_> = release
            .partners
            .iter()
            .map(|p| {
                serde_json::json!({
                    "id": p.id,
                    "name": p.name,
                    "checked": p.checked,
                    "processes": p.processes.len(),
                })
            })
            .collect();
        print_json(&entries)?;
        return Ok(());
    }

    if release.partners.is_empty() {
        println!("No partners yet.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = release
        .partners
        .iter()
        .map(|p| {
            vec![
                p.id.clone(),
                p.name.clone(),
                if p.checked { "checked".to_string() } else { String::new() },
                p.processes.len().to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "CHECKED", "PROCESSES"], &rows);
    Ok(())
}
