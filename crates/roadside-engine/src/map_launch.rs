//! Map launch decision and the external hand-off executor.
//!
//! [`MapLaunchResolver::open`] decides between the in-car map template and an
//! external hand-off. Hand-offs are queued as [`HandOff`] requests and drained
//! by [`run_handoffs`] on the UI-owning context, so the caller never waits on
//! the opener.

use std::sync::Arc;

use roadside_config::{Maps, Strings};
use roadside_protocol::Coordinate;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    Error, Result,
    deps::UrlOpener,
    navigation::Navigation,
    template::{Template, poi_map},
};

/// Request to open an external map application.
#[derive(Debug, Clone, PartialEq)]
pub struct HandOff {
    /// Location being handed off.
    pub coordinate: Coordinate,
    /// Deep link for the preferred map application.
    pub primary: String,
    /// Web map URL used when the primary application is unavailable.
    pub fallback: String,
}

/// Sender half of the UI-thread hand-off queue.
pub type HandOffTx = mpsc::UnboundedSender<HandOff>;
/// Receiver half of the UI-thread hand-off queue.
pub type HandOffRx = mpsc::UnboundedReceiver<HandOff>;

/// Create the hand-off queue (sender, receiver).
pub fn handoff_channel() -> (HandOffTx, HandOffRx) {
    mpsc::unbounded_channel()
}

/// Outcome of a map launch decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapLaunch {
    /// A point-of-interest template was pushed on the head unit.
    InCar(Coordinate),
    /// An external hand-off was queued.
    HandOff(Coordinate),
}

/// Decides where a map is shown.
#[derive(Clone)]
pub(crate) struct MapLaunchResolver {
    maps: Maps,
    strings: Strings,
    tx: HandOffTx,
}

impl MapLaunchResolver {
    pub(crate) fn new(maps: Maps, strings: Strings, tx: HandOffTx) -> Self {
        Self { maps, strings, tx }
    }

    /// Show `coordinate` in-car when an interface is connected, otherwise hand off.
    pub(crate) fn open(&self, nav: &mut Navigation, coordinate: Coordinate) -> MapLaunch {
        if nav.is_connected() {
            self.open_in_car(nav, coordinate)
        } else {
            self.hand_off(coordinate)
        }
    }

    /// Push the point-of-interest template; falls back to a hand-off if the
    /// interface went away.
    pub(crate) fn open_in_car(&self, nav: &mut Navigation, coordinate: Coordinate) -> MapLaunch {
        let poi = Template::PointOfInterest(poi_map(&self.strings, coordinate));
        if nav.push(poi) {
            info!(lat = coordinate.latitude, lng = coordinate.longitude, "map_in_car");
            MapLaunch::InCar(coordinate)
        } else {
            self.hand_off(coordinate)
        }
    }

    /// Queue an external hand-off. Never blocks and never fails the caller.
    pub(crate) fn hand_off(&self, coordinate: Coordinate) -> MapLaunch {
        let req = HandOff {
            coordinate,
            primary: self.maps.primary_url(coordinate),
            fallback: self.maps.fallback_url(coordinate),
        };
        info!(lat = coordinate.latitude, lng = coordinate.longitude, "map_handoff");
        if self.tx.send(req).is_err() {
            warn!("{}", Error::HandOffClosed);
        }
        MapLaunch::HandOff(coordinate)
    }
}

/// Open a hand-off request: the primary deep link when its application is
/// available, the web fallback otherwise. Returns the URL that was opened.
pub fn perform_handoff<'a>(opener: &dyn UrlOpener, req: &'a HandOff) -> Result<&'a str> {
    if opener.can_open(&req.primary) {
        match opener.open(&req.primary) {
            Ok(()) => return Ok(&req.primary),
            Err(e) => debug!(error = %e, "primary map link failed; using fallback"),
        }
    } else {
        debug!(url = %req.primary, "primary map application unavailable");
    }
    opener.open(&req.fallback)?;
    Ok(&req.fallback)
}

/// Drain the hand-off queue on the UI-owning context until every sender is gone.
///
/// Failures are logged and dropped; there is no retry beyond the one fallback.
pub async fn run_handoffs(mut rx: HandOffRx, opener: Arc<dyn UrlOpener>) {
    while let Some(req) = rx.recv().await {
        match perform_handoff(opener.as_ref(), &req) {
            Ok(url) => debug!(url, "map hand-off opened"),
            Err(e) => warn!(error = %e, "map hand-off failed"),
        }
    }
    debug!("hand-off queue closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockOpener;

    fn request() -> HandOff {
        let maps = Maps::default();
        let c = Coordinate::new(1.0, 2.0);
        HandOff {
            coordinate: c,
            primary: maps.primary_url(c),
            fallback: maps.fallback_url(c),
        }
    }

    #[test]
    fn primary_used_when_available() {
        let opener = MockOpener::with_primary_app();
        let req = request();
        assert_eq!(
            perform_handoff(&opener, &req).unwrap(),
            "comgooglemaps://?q=1.0,2.0&directionsmode=driving"
        );
        assert_eq!(opener.opened(), vec![req.primary.clone()]);
    }

    #[test]
    fn fallback_used_when_primary_missing() {
        let opener = MockOpener::without_primary_app();
        let req = request();
        assert_eq!(perform_handoff(&opener, &req).unwrap(), "http://maps.apple.com/?q=1.0,2.0");
        assert_eq!(opener.opened(), vec![req.fallback.clone()]);
    }

    #[test]
    fn fallback_used_when_primary_open_fails() {
        let opener = MockOpener::with_primary_app();
        opener.fail_on("comgooglemaps://");
        let req = request();
        assert_eq!(perform_handoff(&opener, &req).unwrap(), req.fallback);
    }

    #[test]
    fn double_failure_is_reported_not_retried() {
        let opener = MockOpener::without_primary_app();
        opener.fail_on("http://");
        let req = request();
        assert!(matches!(perform_handoff(&opener, &req), Err(Error::Open { .. })));
        assert!(opener.opened().is_empty());
    }

    #[tokio::test]
    async fn executor_drains_until_closed() {
        let (tx, rx) = handoff_channel();
        let opener = Arc::new(MockOpener::without_primary_app());
        tx.send(request()).unwrap();
        tx.send(request()).unwrap();
        drop(tx);
        run_handoffs(rx, opener.clone()).await;
        assert_eq!(opener.opened().len(), 2);
    }

    #[test]
    fn closed_queue_is_not_fatal() {
        let (tx, rx) = handoff_channel();
        drop(rx);
        let resolver = MapLaunchResolver::new(Maps::default(), Strings::default(), tx);
        let c = Coordinate::new(5.0, 6.0);
        assert_eq!(resolver.hand_off(c), MapLaunch::HandOff(c));
    }
}
