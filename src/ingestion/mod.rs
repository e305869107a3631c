pub mod change_listener;
pub mod pipeline;

pub use change_listener::run_change_listener;
pub use pipeline::{run_refresh_cycle, CycleOutcome, RefreshContext};
