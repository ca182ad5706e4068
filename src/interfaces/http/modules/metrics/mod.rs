pub mod handlers;

pub use handlers::{prometheus_metrics, MetricsState};
