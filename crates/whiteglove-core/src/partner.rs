use crate::process::{Process, ProcessUpdate};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Partner
// ---------------------------------------------------------------------------

/// An external counterparty grouping one or more processes. The `checked`
/// flag is the caller's bulk-selection marker and has no meaning to the
/// engine itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub checked: bool,
    pub processes: Vec<Process>,
}

// ---------------------------------------------------------------------------
// PartnerUpdate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct PartnerUpdate {
    pub name: Option<String>,
    pub checked: Option<bool>,
}

impl PartnerUpdate {
    pub fn checked(checked: bool) -> Self {
        Self {
            checked: Some(checked),
            ..Self::default()
        }
    }
}

impl Partner {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            checked: false,
            processes: Vec::new(),
        }
    }

    pub fn with_processes(
        id: impl Into<String>,
        name: impl Into<String>,
        processes: Vec<Process>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            checked: false,
            processes,
        }
    }

    pub fn update(&self, update: PartnerUpdate) -> Partner {
        let mut next = self.clone();
        if let Some(name) = update.name {
            next.name = name;
        }
        if let Some(checked) = update.checked {
            next.checked = checked;
        }
        next
    }

    /// Replace the process with the given id via its own `update`. A miss
    /// returns the partner unchanged.
    pub fn update_process(&self, process_id: &str, update: ProcessUpdate) -> Partner {
        let mut next = self.clone();
        if let Some(slot) = next.processes.iter_mut().find(|p| p.id == process_id) {
            *slot = slot.update(update);
        }
        next
    }

    pub fn process(&self, process_id: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.id == process_id)
    }

    pub fn contains_process(&self, process_id: &str) -> bool {
        self.process(process_id).is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
