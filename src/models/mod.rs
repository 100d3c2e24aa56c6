//! Core data models for the play tracker.

mod personnel;
mod play;
mod report;

pub use personnel::*;
pub use play::*;
pub use report::*;
