//! Configuration for the resolver module.

use serde::{Deserialize, Serialize};

/// Controls how the encoder is located and installed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Run the host package manager when the encoder is missing.
    #[serde(default = "default_auto_install")]
    pub auto_install: bool,

    /// Search path used instead of `PATH`, in the platform's `PATH` syntax.
    #[serde(default)]
    pub search_path: Option<String>,
}

fn default_auto_install() -> bool {
    true
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            auto_install: default_auto_install(),
            search_path: None,
        }
    }
}
