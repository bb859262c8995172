//! Snapshot loading from a member/link export on disk.
//!
//! The engine itself never touches the filesystem; this is the outer shell
//! used by the CLI. JSON and YAML exports are accepted.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{KinshipError, Result};
use crate::graph::{Link, Member};

/// One consistent read of the host's members and links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Snapshot {
    /// Load a snapshot, picking the format from the file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let snapshot = match ext.as_deref() {
            Some("json") => Self::from_json(&fs::read_to_string(path)?)?,
            Some("yaml") | Some("yml") => Self::from_yaml(&fs::read_to_string(path)?)?,
            _ => return Err(KinshipError::UnsupportedFormat(path.to_path_buf())),
        };
        debug!(
            path = %path.display(),
            members = snapshot.members.len(),
            links = snapshot.links.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}
