pub mod actions;
pub mod init;
pub mod partner;
pub mod process;
pub mod run;
pub mod status;

use anyhow::bail;
use whiteglove_core::process::Process;
use whiteglove_core::release::Release;

/// Resolve the process selection the way the UI defines it: the whole
/// release by default, one partner's processes with `--partner`, or the
/// checked partners' processes with `--checked`.
pub fn select_processes(
    release: &Release,
    partner: Option<&str>,
    checked: bool,
) -> anyhow::Result<Vec<Process>> {
    if let Some(partner_id) = partner {
        match release.partner(partner_id) {
            Some(partner) => Ok(partner.processes.clone()),
            None => bail!("partner '{partner_id}' not found"),
        }
    } else if checked {
        Ok(release.checked_processes())
    } else {
        Ok(release.all_processes())
    }
}
