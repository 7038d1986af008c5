pub mod agents;
pub mod booking;
pub mod dispatch;
pub mod distributions;
pub mod executor;
pub mod logging;
pub mod pool;
pub mod region;
pub mod scenario;
pub mod telemetry;
pub mod telemetry_export;
#[cfg(feature = "test-helpers")]
pub mod test_helpers;
