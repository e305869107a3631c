pub mod health;
pub mod leaderboard;
pub mod metrics;
pub mod notifications;
pub mod ws;

#[cfg(any(debug_assertions, feature = "test-hooks"))]
pub mod debug;
