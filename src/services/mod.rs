pub mod page_rotation;
pub mod presenter;
pub mod scheduler;

pub use page_rotation::run_page_rotation;
pub use presenter::run_presenter;
pub use scheduler::{run_refresh_scheduler, should_refresh, Debouncer};
