//! Convenient imports for consumers of fate-core
//!
//! Pull in everything commonly needed in one line:
//! ```rust
//! use fate_core::prelude::*;
//! ```

// Main wheel API
pub use crate::wheel::WheelOfFate;
pub use crate::wheel::error::FateError;
pub use crate::wheel::ring::EntryId;
pub use crate::wheel::trace::{TRACE_HEADER, TraceStep};

// Traits that users might need
pub use crate::tracer::Traceable;

// Macros
pub use crate::trace_dump;
