use crate::bank::Trait;
use thiserror::Error;

/// Failure modes surfaced by the DOSE core, per component.
///
/// Kernel- and posterior-level faults (`InvalidItem`, `DegeneratePosterior`)
/// are fatal to the session that triggered them. `NoItemsAvailable` indicates
/// a controller bug, not a recoverable condition. `ProtocolViolation` and
/// `InvalidResponse` are recoverable: the caller is told and state is
/// unchanged. `UnknownSession` belongs to whatever interface layer tracks
/// session identities; the core itself never raises it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DoseError {
    #[error("item {item} is malformed: {reason}")]
    InvalidItem { item: u8, reason: String },

    #[error("posterior for trait {trait_tag:?} underflowed to zero")]
    DegeneratePosterior { trait_tag: Trait },

    #[error("no unused items remain for trait {trait_tag:?}")]
    NoItemsAvailable { trait_tag: Trait },

    #[error("protocol violation: expected state {expected}, was in {actual}")]
    ProtocolViolation {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("response {value} is outside the valid range 1..=7")]
    InvalidResponse { value: u8 },

    #[error("unknown session {session_id}")]
    UnknownSession { session_id: String },
}

pub type DoseResult<T> = Result<T, DoseError>;
