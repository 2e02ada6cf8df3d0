//! Command parser: one-line `bar build ...` strings to selection state
//! and back.
//!
//! Input shape:
//!
//! ```text
//! [bar] [build] { token | key=value }* [--subject "..."] [--addendum "..."]
//! ```
//!
//! Bare tokens are classified through a token -> axis index built from the
//! grammar. `voice=`, `audience=`, `tone=`, `intent=` and `persona=` set the
//! persona state; persona values may be given in slug form (`as-designer`).

mod command;
mod serialize;
mod types;


// Re-export public API
pub use command::parse_command;
pub use serialize::to_command;
pub use types::ParseResult;
