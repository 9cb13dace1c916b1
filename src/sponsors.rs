use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const GITHUB_PROFILE_BASE: &str = "https://github.com";

/// A single supporter. Its position in the list drives layout and element ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sponsor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SponsorFile {
    sponsors: Vec<Sponsor>,
}

impl Sponsor {
    /// The GitHub handle, if one is set and non-empty.
    pub fn handle(&self) -> Option<&str> {
        self.github.as_deref().filter(|handle| !handle.is_empty())
    }

    /// Link target for the avatar: the GitHub profile, or `#` without a handle.
    pub fn link(&self) -> String {
        match self.handle() {
            Some(handle) => format!("{GITHUB_PROFILE_BASE}/{handle}"),
            None => "#".to_string(),
        }
    }
}

pub fn parse_sponsors(content: &str) -> Result<Vec<Sponsor>> {
    let file: SponsorFile = serde_json::from_str(content)?;
    Ok(file.sponsors)
}

/// Reads the sponsor list from `path`, or from stdin when `path` is `-`.
pub fn load_sponsors(path: &Path) -> Result<Vec<Sponsor>> {
    let content = if path.to_str() == Some("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|source| Error::Read {
                path: path.to_path_buf(),
                source,
            })?;
        buffer
    } else {
        std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?
    };

    parse_sponsors(&content)
}
