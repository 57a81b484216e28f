//! Host operating system families and their package-manager installers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::process::CommandSpec;

/// Prefix used to run the Linux package manager as root.
pub const SUDO: &str = "sudo";

/// Operating system families we know how to install ffmpeg on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostOs {
    Windows,
    MacOs,
    Linux,
}

impl HostOs {
    /// Maps an OS identifier (as in `std::env::consts::OS`) to a family.
    ///
    /// Returns `None` for anything we have no installer for.
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        match identifier.trim().to_ascii_lowercase().as_str() {
            "windows" => Some(Self::Windows),
            "macos" | "darwin" => Some(Self::MacOs),
            "linux" => Some(Self::Linux),
            _ => None,
        }
    }

    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
        }
    }

    /// The package manager binary that must be present to install.
    pub fn package_manager(&self) -> &'static str {
        match self {
            Self::Windows => "choco",
            Self::MacOs => "brew",
            Self::Linux => "apt-get",
        }
    }

    /// Whether the package manager needs root, i.e. a `sudo` prefix when
    /// not already running as root.
    pub fn needs_root(&self) -> bool {
        matches!(self, Self::Linux)
    }

    /// The fixed installer invocation for this family, without elevation.
    pub fn install_command(&self) -> CommandSpec {
        let args: &[&str] = match self {
            Self::Windows => &["install", "ffmpeg-full", "-y"],
            Self::MacOs => &["install", "ffmpeg"],
            Self::Linux => &["install", "-y", "ffmpeg"],
        };
        CommandSpec::new(self.package_manager()).args(args.iter().copied())
    }

    /// The installer invocation wrapped in `sudo`.
    pub fn elevated_install_command(&self) -> CommandSpec {
        let command = self.install_command();
        CommandSpec::new(SUDO)
            .arg(command.program.display().to_string())
            .args(command.args)
    }

    /// Extra places ffmpeg is known to land that may not be on `PATH` yet.
    pub fn well_known_encoder_paths(&self) -> &'static [&'static str] {
        match self {
            Self::Windows => &[
                r"C:\ProgramData\chocolatey\lib\ffmpeg-full\tools\ffmpeg\bin\ffmpeg.exe",
                r"C:\ProgramData\chocolatey\lib\ffmpeg\tools\ffmpeg\bin\ffmpeg.exe",
                r"C:\ffmpeg\bin\ffmpeg.exe",
            ],
            Self::MacOs | Self::Linux => &[],
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_identifier() {
        assert_eq!(HostOs::from_identifier("windows"), Some(HostOs::Windows));
        assert_eq!(HostOs::from_identifier("macos"), Some(HostOs::MacOs));
        assert_eq!(HostOs::from_identifier("Darwin"), Some(HostOs::MacOs));
        assert_eq!(HostOs::from_identifier("linux"), Some(HostOs::Linux));
    }

    #[test]
    fn test_unsupported_identifiers() {
        for id in ["freebsd", "openbsd", "android", "ios", "solaris", "", "plan9"] {
            assert_eq!(HostOs::from_identifier(id), None, "{id} should be unsupported");
        }
    }

    #[test]
    fn test_identifier_round_trip() {
        for os in [HostOs::Windows, HostOs::MacOs, HostOs::Linux] {
            assert_eq!(HostOs::from_identifier(os.identifier()), Some(os));
        }
    }

    #[test]
    fn test_install_commands() {
        let windows = HostOs::Windows.install_command();
        assert_eq!(windows.program, PathBuf::from("choco"));
        assert_eq!(windows.args, vec!["install", "ffmpeg-full", "-y"]);

        let macos = HostOs::MacOs.install_command();
        assert_eq!(macos.to_string(), "brew install ffmpeg");

        let linux = HostOs::Linux.install_command();
        assert_eq!(linux.to_string(), "apt-get install -y ffmpeg");
        assert_eq!(
            HostOs::Linux.elevated_install_command().to_string(),
            "sudo apt-get install -y ffmpeg"
        );
    }

    #[test]
    fn test_install_command_starts_with_package_manager() {
        for os in [HostOs::Windows, HostOs::MacOs, HostOs::Linux] {
            assert_eq!(os.install_command().program, PathBuf::from(os.package_manager()));
        }
        assert!(HostOs::Linux.needs_root());
        assert!(!HostOs::MacOs.needs_root());
        assert!(!HostOs::Windows.needs_root());
    }
}
