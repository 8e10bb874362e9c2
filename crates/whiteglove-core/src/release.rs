use crate::error::{Result, WhiteGloveError};
use crate::partner::{Partner, PartnerUpdate};
use crate::paths;
use crate::process::{Process, ProcessUpdate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Release
// ---------------------------------------------------------------------------

/// The top-level batch of partners undergoing a coordinated migration.
/// Root of the ownership tree; every mutation returns a new `Release`.
/// The timestamp is supplied by the caller at construction — nothing in
/// this crate's engine reads the clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub partners: Vec<Partner>,
}

// ---------------------------------------------------------------------------
// ReleaseUpdate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ReleaseUpdate {
    pub name: Option<String>,
}

impl Release {
    pub fn new(name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            created_at,
            partners: Vec::new(),
        }
    }

    pub fn update(&self, update: ReleaseUpdate) -> Release {
        let mut next = self.clone();
        if let Some(name) = update.name {
            next.name = name;
        }
        next
    }

    // ---------------------------------------------------------------------------
    // Tree construction
    // ---------------------------------------------------------------------------

    pub fn add_partner(&self, partner: Partner) -> Result<Release> {
        if self.partner(&partner.id).is_some() {
            return Err(WhiteGloveError::PartnerExists(partner.id));
        }
        let mut next = self.clone();
        next.partners.push(partner);
        Ok(next)
    }

    /// Attach a process to an existing partner. Process ids must be unique
    /// within the partner; release-wide uniqueness is the caller's
    /// convention and is what keeps `update_process` unambiguous.
    pub fn add_process(&self, partner_id: &str, process: Process) -> Result<Release> {
        let mut next = self.clone();
        let partner = next
            .partners
            .iter_mut()
            .find(|p| p.id == partner_id)
            .ok_or_else(|| WhiteGloveError::PartnerNotFound(partner_id.to_string()))?;
        if partner.contains_process(&process.id) {
            return Err(WhiteGloveError::ProcessExists(process.id));
        }
        partner.processes.push(process);
        Ok(next)
    }

    // ---------------------------------------------------------------------------
    // Tree queries
    // ---------------------------------------------------------------------------

    pub fn partner(&self, partner_id: &str) -> Option<&Partner> {
        self.partners.iter().find(|p| p.id == partner_id)
    }

    /// The partner owning the given process id; first match wins.
    pub fn find_partner_for_process(&self, process_id: &str) -> Option<&Partner> {
        self.partners.iter().find(|p| p.contains_process(process_id))
    }

    /// Owning partners of the given processes, deduplicated, in
    /// first-encounter order. Processes not found in the tree contribute
    /// nothing.
    pub fn find_partners_for_processes(&self, processes: &[Process]) -> Vec<&Partner> {
        let mut found: Vec<&Partner> = Vec::new();
        for process in processes {
            if let Some(partner) = self.find_partner_for_process(&process.id) {
                if !found.iter().any(|p| p.id == partner.id) {
                    found.push(partner);
                }
            }
        }
        found
    }

    pub fn processes(&self) -> impl Iterator<Item = &Process> {
        self.partners.iter().flat_map(|p| p.processes.iter())
    }

    pub fn all_processes(&self) -> Vec<Process> {
        self.processes().cloned().collect()
    }

    pub fn checked_processes(&self) -> Vec<Process> {
        self.partners
            .iter()
            .filter(|p| p.checked)
            .flat_map(|p| p.processes.iter().cloned())
            .collect()
    }

    // ---------------------------------------------------------------------------
    // Copy-on-write updates
    // ---------------------------------------------------------------------------

    /// Delegate to the first partner containing the process id; a miss
    /// returns the release unchanged. Never touches a second partner even
    /// if ids were (wrongly) duplicated across partners.
    pub fn update_process(&self, process_id: &str, update: ProcessUpdate) -> Release {
        let mut next = self.clone();
        if let Some(slot) = next
            .partners
            .iter_mut()
            .find(|p| p.contains_process(process_id))
        {
            *slot = slot.update_process(process_id, update);
        }
        next
    }

    pub fn update_partner(&self, partner_id: &str, update: PartnerUpdate) -> Release {
        let mut next = self.clone();
        if let Some(slot) = next.partners.iter_mut().find(|p| p.id == partner_id) {
            *slot = slot.update(update);
        }
        next
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    /// Create and persist a fresh release snapshot. Refuses to overwrite
    /// an existing one.
    pub fn create(root: &Path, name: impl Into<String>, created_at: DateTime<Utc>) -> Result<Self> {
        let name = name.into();
        if Self::exists(root) {
            return Err(WhiteGloveError::ReleaseExists(name));
        }
        let release = Self::new(name, created_at);
        release.save(root)?;
        Ok(release)
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::release_path(root);
        if !path.exists() {
            return Err(WhiteGloveError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let release: Release = serde_yaml::from_str(&data)?;
        Ok(release)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::release_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn exists(root: &Path) -> bool {
        paths::release_path(root).exists()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
