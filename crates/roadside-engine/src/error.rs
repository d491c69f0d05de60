use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the roadside engine.
///
/// None of these escape a public event entry point; they are logged and dropped.
#[derive(Debug, Error)]
pub enum Error {
    /// The companion channel has been closed by the receiver.
    #[error("companion channel closed")]
    ChannelClosed,

    /// The UI-thread hand-off queue has been closed.
    #[error("hand-off queue closed")]
    HandOffClosed,

    /// An external URL could not be opened.
    #[error("failed to open {url}: {message}")]
    Open {
        /// URL that was attempted.
        url: String,
        /// Reason reported by the opener.
        message: String,
    },

    /// The notification scheduler refused a request.
    #[error("notification scheduling failed: {0}")]
    Schedule(String),
}
