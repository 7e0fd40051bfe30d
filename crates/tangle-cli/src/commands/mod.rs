//! Command implementations for the tangle CLI.
//!
//! - [`analyze`] - Suggestions, graph JSON, Mermaid or force-graph output for
//!   one component file

pub mod analyze;

pub use analyze::execute as analyze_execute;
