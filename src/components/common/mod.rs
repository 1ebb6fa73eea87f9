//! Small building blocks shared by the editor panels.
mod fields;

pub use fields::{CommitTextField, LiveTextField};
