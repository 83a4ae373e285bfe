// Wheel of fate core modules
pub mod prelude;
pub mod tracer;
pub mod wheel;

// Re-exports
pub use wheel::WheelOfFate;
pub use wheel::error::FateError;
pub use wheel::fate_table::signature_of;
pub use wheel::trace::{TRACE_HEADER, TraceStep};
