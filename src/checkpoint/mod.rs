//! Checkpoint and resume for calculator sessions.
//!
//! A checkpoint captures everything an engine holds, the memory
//! snapshot plus the diagnostic transition log, in a serializable
//! form, so a session can survive a process restart. JSON is offered
//! for inspectability, bincode for compactness; both carry a format
//! version that is checked on restore.

use crate::core::TransitionLog;
use crate::engine::{Engine, EngineSnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for the checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable capture of one engine's session.
///
/// The signal sink is deliberately not captured (callbacks are not
/// serializable); a restored engine starts with no sink installed.
///
/// # Example
///
/// ```rust
/// use tally::checkpoint::Checkpoint;
/// use tally::core::InputToken;
/// use tally::engine::Engine;
///
/// let mut engine = Engine::new();
/// for token in InputToken::script("12+3") {
///     engine.apply(token);
/// }
///
/// let json = Checkpoint::capture(&engine).to_json().unwrap();
/// let mut resumed = Checkpoint::from_json(&json).unwrap().restore().unwrap();
///
/// let snapshot = resumed.apply(InputToken::Equal);
/// assert_eq!(snapshot.result, Some(15.0));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When the checkpoint was taken
    pub timestamp: DateTime<Utc>,

    /// The engine memory at capture time
    pub snapshot: EngineSnapshot,

    /// The diagnostic transition log at capture time
    pub log: TransitionLog,
}

impl Checkpoint {
    /// Capture the current session of an engine.
    pub fn capture(engine: &Engine) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            snapshot: engine.snapshot(),
            log: engine.log().clone(),
        }
    }

    /// Rebuild an engine from this checkpoint.
    ///
    /// Decimal flags are rederived from the operand texts, which is
    /// lossless: a buffer's flag is set exactly when its text contains
    /// a decimal point.
    pub fn restore(&self) -> Result<Engine, CheckpointError> {
        Engine::from_snapshot(&self.snapshot, self.log.clone()).ok_or_else(|| {
            CheckpointError::InconsistentMemory(format!(
                "fields do not match state {}",
                self.snapshot.state.name()
            ))
        })
    }

    /// Encode to a JSON string.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::Encode(e.to_string()))
    }

    /// Decode from a JSON string, checking the format version.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self =
            serde_json::from_str(json).map_err(|e| CheckpointError::Decode(e.to_string()))?;
        checkpoint.check_version()
    }

    /// Encode to compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::Encode(e.to_string()))
    }

    /// Decode from binary, checking the format version.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self =
            bincode::deserialize(bytes).map_err(|e| CheckpointError::Decode(e.to_string()))?;
        checkpoint.check_version()
    }

    fn check_version(self) -> Result<Self, CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(self)
    }
}
