//! The prompt grammar: typed model, accessors and loading.
//!
//! The grammar is a JSON document describing every axis, its tokens and
//! their metadata, the task pseudo-axis, persona presets and free-form
//! persona values, incompatibility rules and cross-axis composition
//! advisories. Once loaded it is an immutable snapshot; nothing in the crate
//! mutates it.

mod accessors;
mod loader;
mod model;


// Re-export public API
pub use accessors::{
    MethodGroup, TokenMeta, axis_soft_cap, get_axis_tokens, get_composition_data,
    get_method_tokens_by_category, get_persona_axis_tokens_meta, get_persona_intent_tokens,
    get_persona_presets, get_starter_packs, get_task_tokens, get_usage_patterns, to_persona_slug,
};
pub use loader::GrammarCache;
pub use model::{
    AxisMap, AxisSection, Composition, CompositionEntry, CompositionTable, DanglingRule, Grammar,
    HierarchySection, IntentSection, PersonaPreset, PersonaSection, StarterPack, TaskSection,
    TokenCollision, TokenMap, UsagePattern,
};
