//! Checkpoint error types.

use thiserror::Error;

/// Errors raised while saving or restoring a session checkpoint.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Encoding the checkpoint to JSON or binary failed
    #[error("could not encode checkpoint: {0}")]
    Encode(String),

    /// Decoding a checkpoint from JSON or binary failed
    #[error("could not decode checkpoint: {0}")]
    Decode(String),

    /// The checkpoint was written by an incompatible format version
    #[error("checkpoint format version {found} is not supported (this build reads version {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The checkpointed memory violates the engine's structural
    /// invariants and cannot be restored
    #[error("checkpointed memory is inconsistent: {0}")]
    InconsistentMemory(String),
}
