pub mod health;
pub mod metrics;
pub mod workers_handler;

pub use health::health_check;
#[cfg(test)]
pub use metrics::detached_metrics;
pub use metrics::{metrics_handler, setup_metrics_recorder, MetricsState};
