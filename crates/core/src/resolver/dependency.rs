//! Locating ffmpeg and installing it when it is missing.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::config::ResolverConfig;
use super::error::InstallError;
use super::host_os::{HostOs, SUDO};
use crate::config::Config;
use crate::process::{CommandSpec, ProcessRunner};

/// Directory next to the executable that may hold a bundled ffmpeg.
const BUNDLED_DIR: &str = "ffmpeg";

/// Makes sure the encoder can be run, installing it if needed.
pub struct DependencyResolver<R> {
    encoder: PathBuf,
    config: ResolverConfig,
    host_os: String,
    exe_dir: Option<PathBuf>,
    as_root: bool,
    runner: R,
}

impl<R: ProcessRunner> DependencyResolver<R> {
    /// Creates a resolver for the running host.
    pub fn new(config: &Config, runner: R) -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));

        Self {
            encoder: config.encoder.path.clone(),
            config: config.resolver.clone(),
            host_os: std::env::consts::OS.to_string(),
            exe_dir,
            as_root: running_as_root(),
            runner,
        }
    }

    /// Pretends to run on the OS named by `identifier`.
    pub fn with_host_os(mut self, identifier: impl Into<String>) -> Self {
        self.host_os = identifier.into();
        self
    }

    /// Sets the directory searched for a bundled `ffmpeg/` folder.
    pub fn with_exe_dir(mut self, exe_dir: Option<PathBuf>) -> Self {
        self.exe_dir = exe_dir;
        self
    }

    /// Overrides whether the process is treated as running as root.
    pub fn with_root(mut self, as_root: bool) -> Self {
        self.as_root = as_root;
        self
    }

    /// Succeeds once the encoder is available, installing it if necessary.
    pub async fn ensure_tool_available(&self) -> Result<(), InstallError> {
        self.resolve().await.map(|_| ())
    }

    /// Like [`ensure_tool_available`](Self::ensure_tool_available), but
    /// returns the path the encoder should be run from.
    pub async fn resolve(&self) -> Result<PathBuf, InstallError> {
        let os = HostOs::from_identifier(&self.host_os);

        if let Some(found) = self.locate(os) {
            debug!("Found encoder at {}", found.display());
            return Ok(found);
        }

        if !self.config.auto_install {
            return Err(InstallError::EncoderMissing {
                encoder: self.encoder.clone(),
            });
        }

        let os = os.ok_or_else(|| InstallError::UnsupportedOs {
            os: self.host_os.clone(),
        })?;

        warn!("{} not found, installing it for {}", self.encoder.display(), os);
        self.install(os).await?;

        match self.locate(Some(os)) {
            Some(found) => {
                info!("Encoder installed at {}", found.display());
                Ok(found)
            }
            None => {
                // Package managers often only update PATH for new shells
                warn!(
                    "Installer succeeded but {} is not visible yet; falling back to the configured name",
                    self.encoder.display()
                );
                Ok(self.encoder.clone())
            }
        }
    }

    /// Looks for the encoder on disk without spawning anything.
    ///
    /// Candidates, in order: the configured path if it has a directory part,
    /// a bundled copy next to the executable, the search path, and finally
    /// any OS-specific well-known locations.
    pub fn locate(&self, os: Option<HostOs>) -> Option<PathBuf> {
        let explicit = self.encoder.is_absolute() || self.encoder.components().count() > 1;
        if explicit {
            if self.encoder.is_file() {
                return Some(self.encoder.clone());
            }
            warn!(
                "Configured encoder {} does not exist, looking it up by name",
                self.encoder.display()
            );
        }

        let name = self.encoder.file_name()?;

        if let Some(dir) = &self.exe_dir {
            let mut bundled_name = name.to_os_string();
            bundled_name.push(std::env::consts::EXE_SUFFIX);
            let bundled = dir.join(BUNDLED_DIR).join(bundled_name);
            if bundled.is_file() {
                return Some(bundled);
            }
        }

        if let Ok(found) = self.which(name) {
            return Some(found);
        }

        os.into_iter()
            .flat_map(|os| os.well_known_encoder_paths())
            .map(PathBuf::from)
            .find(|candidate| candidate.is_file())
    }

    /// Runs the package manager for `os` once.
    async fn install(&self, os: HostOs) -> Result<(), InstallError> {
        let manager = os.package_manager();
        if self.which(manager).is_err() {
            return Err(InstallError::InstallerMissing {
                program: manager.to_string(),
            });
        }

        let command = self.installer_command(os);
        let program = command.program.display().to_string();

        info!("Running installer: {}", command);
        let exit = self.runner.run(&command).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                InstallError::InstallerMissing {
                    program: program.clone(),
                }
            } else {
                InstallError::Io(e)
            }
        })?;

        if !exit.success() {
            return Err(InstallError::InstallerFailed {
                command: command.to_string(),
                code: exit.code,
            });
        }

        Ok(())
    }

    /// The install command, prefixed with `sudo` when the package manager
    /// needs root and we are not root already.
    fn installer_command(&self, os: HostOs) -> CommandSpec {
        if !os.needs_root() || self.as_root {
            return os.install_command();
        }

        if self.which(SUDO).is_ok() {
            os.elevated_install_command()
        } else {
            warn!("{} not found, running {} without it", SUDO, os.package_manager());
            os.install_command()
        }
    }

    fn which(&self, name: impl AsRef<OsStr>) -> which::Result<PathBuf> {
        match &self.config.search_path {
            Some(paths) => {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                which::which_in(name, Some(paths), cwd)
            }
            None => which::which(name),
        }
    }
}

#[cfg(unix)]
fn running_as_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
fn running_as_root() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::isolated_config;
    use crate::testing::MockRunner;
    use tempfile::TempDir;

    fn resolver(config: &Config, os: &str) -> (DependencyResolver<MockRunner>, MockRunner) {
        let runner = MockRunner::new();
        let resolver = DependencyResolver::new(config, runner.clone())
            .with_host_os(os)
            .with_exe_dir(None);
        (resolver, runner)
    }

    #[tokio::test]
    async fn test_unsupported_os_never_spawns() {
        let search = TempDir::new().unwrap();
        let config = isolated_config(search.path());

        for id in ["freebsd", "haiku", "plan9", ""] {
            let (resolver, runner) = resolver(&config, id);
            let result = resolver.ensure_tool_available().await;
            assert!(
                matches!(result, Err(InstallError::UnsupportedOs { ref os }) if os == id),
                "unexpected result for {id:?}: {result:?}"
            );
            assert_eq!(runner.call_count().await, 0);
        }
    }

    #[tokio::test]
    async fn test_auto_install_disabled() {
        let search = TempDir::new().unwrap();
        let mut config = isolated_config(search.path());
        config.resolver.auto_install = false;

        let (resolver, runner) = resolver(&config, "linux");
        let result = resolver.ensure_tool_available().await;

        assert!(matches!(result, Err(InstallError::EncoderMissing { .. })));
        assert_eq!(runner.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_installer_missing_never_spawns() {
        let search = TempDir::new().unwrap();
        let config = isolated_config(search.path());

        let (resolver, runner) = resolver(&config, "macos");
        let result = resolver.ensure_tool_available().await;

        assert!(matches!(
            result,
            Err(InstallError::InstallerMissing { ref program }) if program == "brew"
        ));
        assert_eq!(runner.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_explicit_encoder_path() {
        let dir = TempDir::new().unwrap();
        let binary = dir.path().join("my-ffmpeg");
        std::fs::write(&binary, b"").unwrap();

        let mut config = isolated_config(dir.path());
        config.encoder.path = binary.clone();

        let (resolver, runner) = resolver(&config, "linux");
        assert_eq!(resolver.resolve().await.unwrap(), binary);
        assert_eq!(runner.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_bundled_encoder_is_preferred() {
        let exe_dir = TempDir::new().unwrap();
        let search = TempDir::new().unwrap();
        let bundled_dir = exe_dir.path().join("ffmpeg");
        std::fs::create_dir(&bundled_dir).unwrap();
        let bundled = bundled_dir.join(format!("ffmpeg{}", std::env::consts::EXE_SUFFIX));
        std::fs::write(&bundled, b"").unwrap();

        let config = isolated_config(search.path());
        let (resolver, runner) = resolver(&config, "linux");
        let resolver = resolver.with_exe_dir(Some(exe_dir.path().to_path_buf()));

        assert_eq!(resolver.resolve().await.unwrap(), bundled);
        assert_eq!(runner.call_count().await, 0);
    }
}
