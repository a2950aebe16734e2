//! Error taxonomy for cell building, parsing, and opcode dispatch.

use crate::scheme::Namespace;

/// All failure modes of the codec layer.
///
/// `OpcodeMismatch`, `UnknownOpcode`, `Range`, and `Structural` are per-message
/// conditions reported to the caller. `RegistryConflict` is a build-time defect
/// in the opcode table and aborts registry construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("opcode mismatch: expected {expected:#010x}, read {found:#010x}")]
    OpcodeMismatch { expected: u32, found: u32 },
    #[error("unknown opcode {opcode:#010x} in {namespace} namespace")]
    UnknownOpcode { namespace: Namespace, opcode: u32 },
    #[error("value out of range: {0}")]
    Range(String),
    #[error("malformed cell structure: {0}")]
    Structural(String),
    #[error("duplicate opcode {opcode:#010x} in {namespace} namespace: {first} and {second}")]
    RegistryConflict {
        namespace: Namespace,
        opcode: u32,
        first: &'static str,
        second: &'static str,
    },
}
