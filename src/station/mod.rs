pub mod client;
pub mod command;
pub mod mappings;
pub mod models;
pub mod parser;

pub use client::{StationClient, StationTimezone};
pub use command::{CommandKind, CommandOutput, CommandRequest, CommandRunner};
pub use models::{ArchiveRecord, LiveConditions};
