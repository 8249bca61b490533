//! Scheduling domain models.
//!
//! Provides the input and output types shared by every policy.
//!
//! | Type | Role |
//! |------|------|
//! | Process | Arrival, burst and priority of one job |
//! | ProcessSet | Validated, non-empty input to a simulation |
//! | ExecutionInterval | One process holding the CPU over `[start, end)` |
//! | Timeline | Chronological, non-overlapping intervals |

mod process;
mod timeline;

pub use process::{Process, ProcessSet};
pub use timeline::{ExecutionInterval, Timeline, TIME_EPSILON};
