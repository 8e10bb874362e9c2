use crate::output::print_json;
use anyhow::{bail, Context};
use chrono::Utc;
use std::path::Path;
use whiteglove_core::partner::Partner;
use whiteglove_core::process::Process;
use whiteglove_core::release::Release;
use whiteglove_core::types::{Connection, Direction, Origin};

pub fn run(root: &Path, name: &str, sample: bool, json: bool) -> anyhow::Result<()> {
    if Release::exists(root) {
        bail!(
            "release already exists at {}",
            whiteglove_core::paths::release_path(root).display()
        );
    }

    let mut release = Release::create(root, name, Utc::now())
        .context("failed to write release snapshot")?;
    if sample {
        release = seed_sample(&release)?;
        release.save(root).context("failed to write release snapshot")?;
    }

    if json {
        print_json(&release)?;
    } else {
        println!("Initialized release '{name}'");
        if sample {
            println!("Seeded sample partners: as2-partner, sftp-partner");
        }
        println!("Next: whiteglove status");
    }
    Ok(())
}

/// The two-partner demo tree used by docs and tests: one AS2 partner with
/// two processes at the start state, one SFTP partner with mixed
/// direction and origin.
fn seed_sample(release: &Release) -> anyhow::Result<Release> {
    let as2 = Partner::with_processes(
        "as2-partner",
        "AS2 Partner",
        vec![
            Process::new(
                "p-1001",
                "Invoices",
                Connection::As2,
                Direction::Inbound,
                Origin::OnPrem,
            ),
            Process::new(
                "p-1002",
                "Orders",
                Connection::As2,
                Direction::Outbound,
                Origin::OnPrem,
            ),
        ],
    );
    let sftp = Partner::with_processes(
        "sftp-partner",
        "SFTP Partner",
        vec![
            Process::new(
                "p-2001",
                "Shipments",
                Connection::Sftp,
                Direction::Inbound,
                Origin::Cloud,
            ),
            Process::new(
                "p-2002",
                "Remittances",
                Connection::Sftp,
                Direction::Outbound,
                Origin::OnPrem,
            ),
        ],
    );
    let release = release.add_partner(as2)?;
    let release = release.add_partner(sftp)?;
    Ok(release)
}
