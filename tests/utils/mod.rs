pub mod actions;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use actions::match_entry;
pub use setup::{TestSetup, TestSetupBuilder};
