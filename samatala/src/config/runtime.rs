//! Runtime configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Execution settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuntimeSection {
    /// Process clusters in parallel
    #[serde(default = "defaults::enabled")]
    pub parallel: bool,
}

impl Default for RuntimeSection {
    fn default() -> Self {
        Self { parallel: true }
    }
}
