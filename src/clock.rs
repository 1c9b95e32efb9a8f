use async_trait::async_trait;
use std::sync::Arc;

use crate::station::command::{CommandKind, CommandRequest, CommandRunner};

/// Reports whether the host clock is synchronized to a trusted source.
#[async_trait]
pub trait ClockOracle: Send + Sync {
    async fn is_synchronized(&self) -> bool;
}

/// Asks the system (by default `timedatectl`) whether NTP sync is active.
/// Any failure to get an answer counts as "not synchronized".
pub struct CommandClockOracle {
    runner: Arc<dyn CommandRunner>,
    command: Vec<String>,
}

impl CommandClockOracle {
    #[must_use]
    pub fn new(runner: Arc<dyn CommandRunner>, command: Vec<String>) -> Self {
        Self { runner, command }
    }
}

#[async_trait]
impl ClockOracle for CommandClockOracle {
    async fn is_synchronized(&self) -> bool {
        let Some((program, args)) = self.command.split_first() else {
            tracing::warn!("No clock sync command configured");
            return false;
        };

        let request = CommandRequest {
            kind: CommandKind::Other,
            program: program.clone(),
            args: args.to_vec(),
        };

        match self.runner.run(&request).await {
            Ok(output) if output.is_success() => matches!(
                output.stdout.trim().to_lowercase().as_str(),
                "yes" | "true" | "1"
            ),
            Ok(output) => {
                tracing::warn!(
                    command = %request.render(),
                    code = ?output.code,
                    stderr = %output.stderr.trim(),
                    "Clock sync check failed"
                );
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Clock sync check failed");
                false
            }
        }
    }
}

/// Oracle for deployments that don't gate live writes on clock sync.
pub struct AssumeSynced;

#[async_trait]
impl ClockOracle for AssumeSynced {
    async fn is_synchronized(&self) -> bool {
        true
    }
}
