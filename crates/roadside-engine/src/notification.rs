use std::sync::Arc;

use roadside_config::NotificationText;
use roadside_protocol::{
    Coordinate,
    rpc::{BOOKING_SUCCESS_ID, BookingPayload, PAYLOAD_LAT, PAYLOAD_LNG},
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{Result, deps::NotificationScheduler};

/// A tapped local notification, as reported by the OS.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationTap {
    /// Request identifier the notification was scheduled with.
    pub identifier: String,
    /// Category identifier the notification was scheduled with.
    pub category_identifier: String,
    /// User info attached to the notification.
    pub payload: Value,
}

/// What a notification tap asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapRoute {
    /// Not ours; pass through untouched.
    Ignore,
    /// Open the map at the payload location, or the default when absent.
    OpenMap(Option<Coordinate>),
}

/// Interpret a tap. Only booking-success notifications are acted on.
pub fn route_tap(tap: &NotificationTap) -> TapRoute {
    if tap.identifier != BOOKING_SUCCESS_ID && tap.category_identifier != BOOKING_SUCCESS_ID {
        return TapRoute::Ignore;
    }
    TapRoute::OpenMap(Coordinate::from_fields(
        Some(&tap.payload),
        PAYLOAD_LAT,
        PAYLOAD_LNG,
    ))
}

/// Local notification handed to the [`NotificationScheduler`].
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRequest {
    /// Request identifier; a later request with the same one replaces it.
    pub identifier: String,
    /// Category identifier.
    pub category_identifier: String,
    /// Banner title.
    pub title: String,
    /// Banner body.
    pub body: String,
    /// Play the default sound.
    pub sound: bool,
    /// Booked location, returned on tap.
    pub payload: BookingPayload,
}

/// How a notification arriving in the foreground is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationOptions {
    /// Show a banner.
    pub banner: bool,
    /// Keep it in the notification list.
    pub list: bool,
    /// Play the sound.
    pub sound: bool,
}

/// Foreground notifications are always shown as banner, listed, with sound.
pub fn foreground_presentation() -> PresentationOptions {
    PresentationOptions {
        banner: true,
        list: true,
        sound: true,
    }
}

/// Schedules the booking-success banner.
#[derive(Clone)]
pub(crate) struct BookingNotifier {
    scheduler: Arc<dyn NotificationScheduler>,
    text: NotificationText,
}

impl BookingNotifier {
    pub(crate) fn new(scheduler: Arc<dyn NotificationScheduler>, text: NotificationText) -> Self {
        Self { scheduler, text }
    }

    /// Build the notification for a booking at `coordinate`.
    pub(crate) fn request(&self, coordinate: Coordinate) -> NotificationRequest {
        NotificationRequest {
            identifier: BOOKING_SUCCESS_ID.to_string(),
            category_identifier: BOOKING_SUCCESS_ID.to_string(),
            title: self.text.title.clone(),
            body: self.text.body.clone(),
            sound: true,
            payload: coordinate.into(),
        }
    }

    /// Schedule the banner. Failures are logged only.
    pub(crate) fn notify_booking_success(&self, coordinate: Coordinate) {
        let req = self.request(coordinate);
        info!(title = %req.title, text = %req.body, "notification_display");
        if let Err(e) = self.try_schedule(req) {
            warn!(error = %e, "booking notification not scheduled");
        }
    }

    fn try_schedule(&self, req: NotificationRequest) -> Result<()> {
        self.scheduler.schedule(req)?;
        debug!("booking notification scheduled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::MockScheduler;

    fn tap(id: &str, cat: &str, payload: Value) -> NotificationTap {
        NotificationTap {
            identifier: id.into(),
            category_identifier: cat.into(),
            payload,
        }
    }

    #[test]
    fn only_booking_success_is_routed() {
        assert_eq!(route_tap(&tap("promo", "marketing", json!({}))), TapRoute::Ignore);
        assert_eq!(
            route_tap(&tap("booking_success", "", json!({"lat": 3.0, "lng": 4.0}))),
            TapRoute::OpenMap(Some(Coordinate::new(3.0, 4.0)))
        );
        assert_eq!(
            route_tap(&tap("other", "booking_success", json!({"lat": 3.0}))),
            TapRoute::OpenMap(None)
        );
        assert_eq!(
            route_tap(&tap("booking_success", "", json!({"lat": "3", "lng": 4.0}))),
            TapRoute::OpenMap(None)
        );
    }

    #[test]
    fn request_carries_coordinate() {
        let sched = Arc::new(MockScheduler::new());
        let notifier = BookingNotifier::new(sched.clone(), NotificationText::default());
        notifier.notify_booking_success(Coordinate::new(1.0, 2.0));
        let reqs = sched.requests();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].identifier, "booking_success");
        assert_eq!(reqs[0].title, "Booking Successful!");
        assert_eq!(reqs[0].body, "Tap to view location on CarPlay map");
        assert_eq!(reqs[0].payload, BookingPayload { lat: 1.0, lng: 2.0 });
    }

    #[test]
    fn scheduler_failure_is_swallowed() {
        let sched = Arc::new(MockScheduler::failing());
        let notifier = BookingNotifier::new(sched.clone(), NotificationText::default());
        notifier.notify_booking_success(Coordinate::DEFAULT);
        assert!(sched.requests().is_empty());
    }
}
