pub mod state;

pub use state::{AppState, SharedStatus, SyncStatus};
