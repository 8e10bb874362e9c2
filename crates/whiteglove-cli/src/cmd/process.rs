use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use std::str::FromStr;
use whiteglove_core::paths;
use whiteglove_core::process::Process;
use whiteglove_core::release::Release;
use whiteglove_core::types::{Connection, Direction, Origin};

#[derive(Subcommand)]
pub enum ProcessSubcommand {
    /// Add a process to a partner
    Add {
        /// Owning partner id
        #[arg(long)]
        partner: String,

        id: String,

        #[arg(long)]
        name: Option<String>,

        /// Connection type: as2, sftp or https
        #[arg(long)]
        connection: String,

        /// Direction: inbound or outbound
        #[arg(long)]
        direction: String,

        /// Origin: on_prem or cloud
        #[arg(long)]
        origin: String,
    },
    /// List processes
    List,
}

pub fn run(root: &Path, subcmd: ProcessSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ProcessSubcommand::Add {
            partner,
            id,
            name,
            connection,
            direction,
            origin,
        } => add(root, &partner, &id, name, &connection, &direction, &origin, json),
        ProcessSubcommand::List => list(root, json),
    }
}

#[allow(clippy::too_many_arguments)]
fn add(
    root: &Path,
    partner_id: &str,
    id: &str,
    name: Option<String>,
    connection: &str,
    direction: &str,
    origin: &str,
    json: bool,
) -> anyhow::Result<()> {
    paths::validate_id(id)?;
    let connection = Connection::from_str(connection)?;
    let direction = Direction::from_str(direction)?;
    let origin = Origin::from_str(origin)?;
    let name = name.unwrap_or_else(|| id.replace('-', " "));

    let release = Release::load(root).context("failed to load release")?;
    let process = Process::new(id, &name, connection, direction, origin);
    let release = release
        .add_process(partner_id, process)
        .with_context(|| format!("failed to add process '{id}'"))?;
    release.save(root).context("failed to save release")?;

    if json {
        print_json(&serde_json::json!({
            "id": id,
            "partner": partner_id,
            "name": name,
        }))?;
    } else {
        println!("Added process {id} to partner {partner_id}");
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let release = Release::load(root).context("failed to load release")?;

    if json {
        let entries: Vec<_> = release
            .partners
            .iter()
            .flat_map(|partner| {
                partner.processes.iter().map(|p| {
                    serde_json::json!({
                        "id": p.id,
                        "partner": partner.id,
                        "name": p.name,
                        "state": p.state.to_string(),
                        "connection": p.connection.to_string(),
                        "direction": p.direction.to_string(),
                        "origin": p.origin.to_string(),
                    })
                })
            })
            .collect();
        print_json(&entries)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = release
        .partners
        .iter()
        .flat_map(|partner| {
            partner.processes.iter().map(|p| {
                vec![
                    p.id.clone(),
                    partner.id.clone(),
                    p.name.clone(),
                    p.state.to_string(),
                ]
            })
        })
        .collect();

    if rows.is_empty() {
        println!("No processes yet.");
        return Ok(());
    }
    print_table(&["ID", "PARTNER", "NAME", "STATE"], &rows);
    Ok(())
}
