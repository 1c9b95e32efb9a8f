use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Logical command issued to the outside world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Report the station's archive interval
    ArchivePeriod,
    /// Report current conditions
    LiveConditions,
    /// Dump archive records, optionally since an instant
    ArchiveDump,
    /// Anything not addressed to the station (e.g. the clock-sync probe)
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub kind: CommandKind,
    pub program: String,
    pub args: Vec<String>,
}

impl CommandRequest {
    #[must_use]
    pub fn render(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Captured result of one command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub code: Option<i32>,
    pub signal: Option<i32>,
}

impl CommandOutput {
    /// Output of a command that exited with status 0.
    #[must_use]
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            code: Some(0),
            signal: None,
        }
    }

    /// Output of a command that exited with a non-zero status.
    #[must_use]
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            code: Some(code),
            signal: None,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == Some(0) && self.signal.is_none()
    }

    /// Stdout of a successful run; anything else becomes `AppError::Command`
    /// carrying the captured stderr, so failed output is never parsed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Command` on a non-zero exit or a signal.
    pub fn into_stdout(self, command: &str) -> AppResult<String> {
        if self.is_success() {
            return Ok(self.stdout);
        }
        Err(AppError::Command {
            command: command.to_string(),
            code: self.code,
            signal: self.signal,
            stderr: self.stderr.trim().to_string(),
        })
    }
}

/// Runs external commands. Implementations may block for the duration of
/// the call; callers serialize access.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command and capture its output. A non-zero exit is *not* an
    /// error at this level.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned or times out.
    async fn run(&self, request: &CommandRequest) -> AppResult<CommandOutput>;
}

/// Runs commands as child processes.
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    /// `timeout_secs == 0` disables the timeout.
    #[must_use]
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        }
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, request: &CommandRequest) -> AppResult<CommandOutput> {
        let mut command = tokio::process::Command::new(&request.program);
        command
            .args(&request.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(command = %request.render(), "Running command");

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, command.output())
                .await
                .map_err(|_| AppError::CommandTimeout {
                    command: request.render(),
                    timeout_secs: limit.as_secs(),
                })??,
            None => command.output().await?,
        };

        #[cfg(unix)]
        let signal = {
            use std::os::unix::process::ExitStatusExt;
            output.status.signal()
        };
        #[cfg(not(unix))]
        let signal = None;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
            signal,
        })
    }
}

/// Replays captured station output from a directory instead of talking to
/// the console. Used for development without hardware.
pub struct FixtureRunner {
    dir: PathBuf,
}

impl FixtureRunner {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn fixture_file(kind: CommandKind) -> Option<&'static str> {
        match kind {
            CommandKind::ArchivePeriod => Some("archivePeriod.out"),
            CommandKind::LiveConditions => Some("liveRecord.out"),
            CommandKind::ArchiveDump => Some("archiveRecord.out"),
            CommandKind::Other => None,
        }
    }
}

#[async_trait]
impl CommandRunner for FixtureRunner {
    async fn run(&self, request: &CommandRequest) -> AppResult<CommandOutput> {
        let Some(file) = Self::fixture_file(request.kind) else {
            return Ok(CommandOutput::failure(
                127,
                format!("no fixture for `{}`", request.render()),
            ));
        };

        let path = self.dir.join(file);
        match tokio::fs::read_to_string(&path).await {
            Ok(stdout) => Ok(CommandOutput::success(stdout)),
            Err(e) => Ok(CommandOutput::failure(
                1,
                format!("{}: {e}", path.display()),
            )),
        }
    }
}
