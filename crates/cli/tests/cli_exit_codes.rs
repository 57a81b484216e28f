//! Exit status of the `mov2mp4` binary, driven against a stub ffmpeg.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::Output;

use tempfile::TempDir;

/// A scratch working directory plus a directory holding the stub tools.
struct Workspace {
    work: TempDir,
    bin: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            work: TempDir::new().unwrap(),
            bin: TempDir::new().unwrap(),
        }
    }

    /// Install a shell script named `ffmpeg` on the stub search path.
    fn ffmpeg(&self, body: &str) -> PathBuf {
        let path = self.bin.path().join("ffmpeg");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn touch(&self, name: &str) -> PathBuf {
        let path = self.work.path().join(name);
        std::fs::write(&path, b"").unwrap();
        path
    }

    fn command(&self, args: &[&str]) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(env!("CARGO_BIN_EXE_mov2mp4"));
        command
            .args(args)
            .current_dir(self.work.path())
            .env_remove("MOV2MP4_CONFIG")
            .env("MOV2MP4_RESOLVER__SEARCH_PATH", self.bin.path())
            .env("MOV2MP4_RESOLVER__AUTO_INSTALL", "false")
            .env("RUST_LOG", "error")
            .kill_on_drop(true);
        command
    }

    async fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .await
            .expect("Failed to run mov2mp4")
    }
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[tokio::test]
async fn test_successful_conversion_exits_zero() {
    let ws = Workspace::new();
    ws.ffmpeg("exit 0");
    ws.touch("clip.mov");

    let output = ws.run(&["convert", "clip.mov", "--quality", "high"]).await;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
}

#[tokio::test]
async fn test_missing_input_exits_one() {
    let ws = Workspace::new();
    ws.ffmpeg("exit 0");

    let output = ws.run(&["convert", "nope.mov"]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("nope.mov"));
}

#[tokio::test]
async fn test_encoder_failure_exits_one() {
    let ws = Workspace::new();
    ws.ffmpeg("exit 3");
    ws.touch("clip.mov");

    let output = ws.run(&["convert", "clip.mov"]).await;

    assert_eq!(output.status.code(), Some(1));
}

#[tokio::test]
async fn test_batch_with_one_failure_exits_one() {
    let ws = Workspace::new();
    ws.ffmpeg(r#"case "$*" in *bad.mov*) exit 1 ;; esac
exit 0"#);
    ws.touch("a.mov");
    ws.touch("bad.mov");
    ws.touch("c.mov");

    let output = ws.run(&["convert", "a.mov", "bad.mov", "c.mov"]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("1 of 3 conversions failed"),
        "stderr: {}",
        stderr(&output)
    );
}

#[tokio::test]
async fn test_unknown_quality_is_usage_error() {
    let ws = Workspace::new();
    ws.touch("clip.mov");

    let output = ws.run(&["convert", "clip.mov", "--quality", "ultra"]).await;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("ultra"));
}

#[tokio::test]
async fn test_check_prints_resolved_encoder() {
    let ws = Workspace::new();
    let ffmpeg = ws.ffmpeg("exit 0");

    let output = ws.run(&["check"]).await;

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), ffmpeg.display().to_string());
}

#[tokio::test]
async fn test_check_without_encoder_exits_one() {
    let ws = Workspace::new();

    let output = ws.run(&["check", "--no-install"]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

/// True once `pid` is gone or only a zombie waiting to be reaped.
#[cfg(target_os = "linux")]
fn process_exited(pid: &str) -> bool {
    match std::fs::read_to_string(format!("/proc/{}/stat", pid)) {
        Ok(stat) => stat
            .rsplit_once(')')
            .map(|(_, rest)| rest.trim_start().starts_with('Z'))
            .unwrap_or(false),
        Err(_) => true,
    }
}

#[cfg(target_os = "linux")]
fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        std::thread::sleep(std::time::Duration::from_millis(50));
    }
    false
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_sigterm_stops_running_encoder() {
    let ws = Workspace::new();
    let pid_file = ws.work.path().join("ffmpeg.pid");
    ws.ffmpeg(&format!("echo $$ > '{}'\nexec sleep 30", pid_file.display()));
    ws.touch("clip.mov");

    let mut parent = ws.command(&["convert", "clip.mov"]).spawn().unwrap();

    assert!(
        wait_until(|| std::fs::read_to_string(&pid_file).is_ok_and(|s| !s.trim().is_empty())),
        "encoder never started"
    );
    let encoder_pid = std::fs::read_to_string(&pid_file).unwrap().trim().to_string();

    let parent_pid = parent.id().unwrap().to_string();
    let killed = std::process::Command::new("kill")
        .args(["-TERM", &parent_pid])
        .status()
        .unwrap();
    assert!(killed.success());

    let status = parent.wait().await.unwrap();
    assert_eq!(status.code(), Some(1));

    assert!(
        wait_until(|| process_exited(&encoder_pid)),
        "encoder {} outlived mov2mp4",
        encoder_pid
    );
}

