//! visado-interchange: checklist schema types and normalization.
//!
//! Two JSON shapes describe a checklist to clients: the canonical
//! "brain" schema ([`ChecklistBrainOutput`]) and the legacy schema
//! ([`LegacyChecklistResponse`]) kept for backward compatibility. This
//! crate holds both sets of wire types, the bidirectional adapter
//! between them, and [`detect_and_parse`], which classifies an
//! externally generated payload without ever failing.

pub mod adapter;
pub mod detect;
pub mod fallback;
pub mod types;

pub use adapter::{summarize_profile, to_brain_output, to_legacy, DEFAULT_DISCLAIMER};
pub use detect::{detect_and_normalize, detect_and_parse, DetectedChecklist, DetectedFormat};
pub use fallback::fallback_checklist;
pub use types::{
    ChecklistBrainItem, ChecklistBrainOutput, DestinationContext, ItemPriority, ItemStatus,
    LegacyCategory, LegacyChecklistItem, LegacyChecklistResponse,
};
