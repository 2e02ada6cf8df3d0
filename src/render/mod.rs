//! Prompt renderer.
//!
//! Turns a selection, free text and persona into the final structured
//! prompt. Rendering is deterministic: the same inputs always produce the
//! same bytes.

mod prompt;
mod report;
pub mod sections;


// Re-export public API
pub use prompt::{constraint_lines, render_prompt};
pub use report::BuildReport;
