//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic milliseconds for the spawn timer)
//! - Input (one debounced activate trigger)
//! - Storage (LocalStorage on web, a text file on native)

pub mod input;
pub mod storage;
pub mod time;

pub use input::{ActivateLatch, PressSource};
pub use time::{Clock, ManualClock, SystemClock};
