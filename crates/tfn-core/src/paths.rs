//! Standard paths used by tfn

use std::path::PathBuf;

use crate::consts::ENV_FILE;

/// Standard tfn paths
#[derive(Debug, Clone, Default)]
pub struct Paths {
    /// Home directory, if it could be determined
    pub home: Option<PathBuf>,
}

impl Paths {
    pub fn new() -> Self {
        Self {
            home: dirs::home_dir(),
        }
    }

    /// Paths rooted at an explicit home directory
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    /// Credential dotfile (~/.tfn.env)
    pub fn env_file(&self) -> Option<PathBuf> {
        self.home.as_ref().map(|home| home.join(ENV_FILE))
    }
}
