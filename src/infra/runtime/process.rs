//! External process execution for the scout collaborator.
//!
//! Arguments are handed to the OS as discrete argv tokens; nothing goes
//! through a shell.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("{0} not found in PATH")]
    NotFound(String),
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("process error: {0}")]
    Io(#[from] std::io::Error),
    #[error("command timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
}

/// Captured result of one finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn status_text(&self) -> String {
        match self.code {
            Some(code) => format!("exit status {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs the resolved executable with the given arguments.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, args: &[String]) -> Result<CommandOutput, RunnerError>;
}

#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), timeout: None }
    }

    /// Kill the child and fail the call if it runs longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, args: &[String]) -> Result<CommandOutput, RunnerError> {
        tracing::debug!(program = %self.program.display(), args = ?args, "spawning");
        let start = Instant::now();
        let child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RunnerError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| RunnerError::TimedOut(limit))??,
            None => child.wait_with_output().await?,
        };

        let out = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
            code: output.status.code(),
        };
        tracing::debug!(
            success = out.success,
            code = ?out.code,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "process finished"
        );
        Ok(out)
    }
}

/// Locate `name` once at startup. A name containing a path separator is
/// checked directly; a bare name is searched along `PATH`.
pub fn resolve_executable(name: &str) -> Result<PathBuf, RunnerError> {
    let direct = Path::new(name);
    if direct.components().count() > 1 {
        return if is_executable(direct) {
            Ok(direct.to_path_buf())
        } else {
            Err(RunnerError::NotFound(name.to_string()))
        };
    }

    let path_var =
        std::env::var_os("PATH").ok_or_else(|| RunnerError::NotFound(name.to_string()))?;
    search_path(name, &path_var).ok_or_else(|| RunnerError::NotFound(name.to_string()))
}

/// First executable match along a `PATH`-style list.
fn search_path(name: &str, path_var: &OsStr) -> Option<PathBuf> {
    for segment in std::env::split_paths(path_var) {
        let candidate = segment.join(name);
        if is_executable(&candidate) {
            return Some(candidate);
        }
        if cfg!(windows) {
            let exe = candidate.with_extension("exe");
            if is_executable(&exe) {
                return Some(exe);
            }
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn status_text_reports_exit_code() {
        let out = CommandOutput { code: Some(2), ..Default::default() };
        assert_eq!(out.status_text(), "exit status 2");
        let killed = CommandOutput { code: None, ..Default::default() };
        assert_eq!(killed.status_text(), "terminated by signal");
    }

    #[test]
    fn unknown_binary_is_not_found() {
        let err = resolve_executable("definitely-not-a-real-binary-4f1c").unwrap_err();
        assert!(err.to_string().contains("not found in PATH"));
    }

    #[test]
    fn missing_explicit_path_is_not_found() {
        assert!(resolve_executable("/nonexistent/dir/docker").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn resolves_sh_from_path() {
        let p = resolve_executable("sh").unwrap();
        assert!(p.is_file());
    }

    #[cfg(unix)]
    fn scratch_file(dir: &Path, mode: u32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join("docker");
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn non_executable_explicit_path_is_not_found() {
        let dir = std::env::temp_dir().join(format!("scout-runner-noexec-{}", std::process::id()));
        let path = scratch_file(&dir, 0o644);
        let err = resolve_executable(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, RunnerError::NotFound(_)));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[cfg(unix)]
    #[test]
    fn path_search_skips_non_executable_entries() {
        let root = std::env::temp_dir().join(format!("scout-runner-path-{}", std::process::id()));
        let plain = root.join("plain");
        let bin = root.join("bin");
        scratch_file(&plain, 0o644);
        let expected = scratch_file(&bin, 0o755);

        let path_var = std::env::join_paths([&plain, &bin]).unwrap();
        assert_eq!(search_path("docker", &path_var), Some(expected));
        assert_eq!(search_path("docker", &std::env::join_paths([&plain]).unwrap()), None);
        let _ = std::fs::remove_dir_all(root);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_stdout_and_stderr() {
        let runner = ProcessRunner::new("/bin/sh");
        let out = runner
            .run(&args(&["-c", "echo out; echo err >&2"]))
            .await
            .unwrap();
        assert!(out.success);
        assert_eq!(out.stdout, "out\n");
        assert_eq!(out.stderr, "err\n");
        assert_eq!(out.code, Some(0));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn reports_non_zero_exit_without_error() {
        let runner = ProcessRunner::new("/bin/sh");
        let out = runner.run(&args(&["-c", "echo partial; exit 3"])).await.unwrap();
        assert!(!out.success);
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stdout, "partial\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn arguments_are_not_shell_expanded() {
        let runner = ProcessRunner::new("/bin/sh");
        let out = runner
            .run(&args(&["-c", "printf '%s' \"$1\"", "sh", "$(echo injected); ls"]))
            .await
            .unwrap();
        assert_eq!(out.stdout, "$(echo injected); ls");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn times_out_long_running_commands() {
        let runner = ProcessRunner::new("/bin/sh").with_timeout(Some(Duration::from_millis(100)));
        let err = runner.run(&args(&["-c", "sleep 5"])).await.unwrap_err();
        assert!(matches!(err, RunnerError::TimedOut(_)));
    }

    #[tokio::test]
    async fn spawn_failure_is_reported() {
        let runner = ProcessRunner::new("/nonexistent/dir/docker");
        let err = runner.run(&args(&["scout", "version"])).await.unwrap_err();
        assert!(matches!(err, RunnerError::Spawn { .. }));
    }
}
