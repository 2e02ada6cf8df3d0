//! Conflict and composition resolver.
//!
//! Surfaces advisory relationships between selected tokens:
//! - hard conflicts from `hierarchy.axis_incompatibilities`
//! - cautionary pairings from `cross_axis_composition`, reported as
//!   conflicts and used for chip traffic lights
//! - soft-cap overflows from `hierarchy.axis_soft_caps`
//!
//! Nothing here fails: rules that point at unselected or unknown tokens
//! simply produce nothing.

mod chip;
mod conflicts;
mod types;


// Re-export public API
pub use chip::{get_chip_state, get_chip_state_with_reason, get_reverse_chip_state};
pub use conflicts::{find_conflicts, soft_cap_overflows};
pub use types::{ChipReason, ChipState, Conflict, ConflictKind, SoftCapOverflow};
