use roadside_protocol::Coordinate;

use crate::navigation::Navigation;

/// Mutable state of one head-unit session.
///
/// Owned by the [`Engine`](crate::Engine) behind a single lock; every event
/// holds that lock from start to finish.
#[derive(Default)]
pub(crate) struct SessionState {
    /// Template stack and interface handle.
    pub(crate) nav: Navigation,
    /// Location of the most recent booking-success flow.
    pub(crate) last_booking: Option<Coordinate>,
}

impl SessionState {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}
