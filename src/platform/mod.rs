//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (wall clock for saves and session timing)
//! - Storage (LocalStorage on web, `MemoryStore` natively)

#[cfg(target_arch = "wasm32")]
pub mod storage;
pub mod time;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
pub use time::{Clock, ManualClock, SystemClock};
