//! Testing utilities and mock implementations.
//!
//! The converter and the dependency resolver only touch the outside world
//! through [`crate::process::ProcessRunner`], so [`MockRunner`] is enough to
//! drive them end to end without a real ffmpeg or package manager.

mod mock_runner;

pub use mock_runner::MockRunner;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::{Path, PathBuf};

    use crate::config::Config;

    /// A config whose executable lookups are confined to `search_dir`,
    /// so tests never pick up tools installed on the host.
    pub fn isolated_config(search_dir: &Path) -> Config {
        let mut config = Config::default();
        config.resolver.search_path = Some(search_dir.display().to_string());
        config
    }

    /// Create an empty file to stand in for a video.
    pub fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"").expect("Failed to create fixture file");
        path
    }

    /// Create an executable stub named `name` in `dir`.
    pub fn fake_executable(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"#!/bin/sh\nexit 0\n").expect("Failed to create stub executable");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                .expect("Failed to mark stub executable");
        }

        path
    }
}
