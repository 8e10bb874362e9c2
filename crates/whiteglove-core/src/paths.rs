use crate::error::{Result, WhiteGloveError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

pub const WHITEGLOVE_DIR: &str = ".whiteglove";
pub const RELEASE_FILE: &str = ".whiteglove/release.yaml";

pub fn release_path(root: &Path) -> PathBuf {
    root.join(RELEASE_FILE)
}

// ---------------------------------------------------------------------------
// Id validation
// ---------------------------------------------------------------------------
//
// Partner and process ids are always caller-supplied; the engine never
// generates identifiers.

static ID_RE: OnceLock<Regex> = OnceLock::new();

fn id_re() -> &'static Regex {
    ID_RE.get_or_init(|| Regex::new(r"^[a-z0-9](?:[a-z0-9\-]*[a-z0-9])?$").unwrap())
}

pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() || id.len() > 48 || !id_re().is_match(id) {
        return Err(WhiteGloveError::InvalidId(id.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
