pub mod gate;
pub mod scheduler;
pub mod watermark;
pub mod worker;

pub use gate::{LiveWrite, PersistenceGate};
pub use watermark::SyncWatermark;
pub use worker::{ArchiveOutcome, SyncPhase, SyncWorker, TickReport};
