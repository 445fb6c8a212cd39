//! The expression engine and its snapshot interface.
//!
//! [`Engine`] consumes [`InputToken`](crate::core::InputToken)s and
//! emits [`EngineSnapshot`]s; a display sink renders the snapshots and
//! an input source produces the tokens. Errors travel through the
//! [`SignalSink`] side-channel rather than through return values, since
//! no engine error is fatal.

mod error;
mod machine;
mod snapshot;

pub use error::{EngineError, SignalSink};
pub use machine::Engine;
pub use snapshot::{format_result, EngineSnapshot, DISPLAY_FRACTION_DIGITS};
