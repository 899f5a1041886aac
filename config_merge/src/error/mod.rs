//! Error types produced while merging configuration trees.

mod constructors;
mod types;

pub use types::{ComposeError, MergeError, MergeErrorKind};

#[cfg(test)]
mod tests;
