//! Typed command definitions for the companion bridge.
//!
//! This module defines the method names, argument structures, and replies
//! exchanged with the companion layer over the named command channel.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Coordinate;

/// Identifier and category identifier of the booking-success notification.
pub const BOOKING_SUCCESS_ID: &str = "booking_success";

/// Argument keys carried by `showBookingSuccess`.
pub const ARG_LATITUDE: &str = "latitude";
/// See [`ARG_LATITUDE`].
pub const ARG_LONGITUDE: &str = "longitude";

/// Payload keys carried by the booking-success notification.
pub const PAYLOAD_LAT: &str = "lat";
/// See [`PAYLOAD_LAT`].
pub const PAYLOAD_LNG: &str = "lng";

/// Methods exchanged over the bridge, in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeMethod {
    /// Inbound UI refresh hook.
    UpdateCarPlayUi,
    /// Inbound request to run the booking-success flow.
    ShowBookingSuccess,
    /// Outbound booking request for a confirmed category.
    BookService,
}

impl BridgeMethod {
    /// Stable string name for the method on the channel.
    pub fn as_str(&self) -> &'static str {
        match self {
            BridgeMethod::UpdateCarPlayUi => "updateCarPlayUI",
            BridgeMethod::ShowBookingSuccess => "showBookingSuccess",
            BridgeMethod::BookService => "bookService",
        }
    }

    /// Parse a method name received over the channel.
    pub fn try_from_str(s: &str) -> Option<Self> {
        match s {
            "updateCarPlayUI" => Some(BridgeMethod::UpdateCarPlayUi),
            "showBookingSuccess" => Some(BridgeMethod::ShowBookingSuccess),
            "bookService" => Some(BridgeMethod::BookService),
            _ => None,
        }
    }
}

/// A validated inbound command.
///
/// Arguments are already resolved: malformed coordinates arrive here as `None`
/// and are never surfaced as errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InboundCommand {
    /// No-op refresh hook.
    UpdateUi,
    /// Show the booking-success flow at the given location, if one was supplied.
    ShowBookingSuccess(Option<Coordinate>),
}

impl InboundCommand {
    /// Parse a raw method call. Returns `None` for methods this surface does not handle.
    pub fn parse(method: &str, args: Option<&Value>) -> Option<Self> {
        match BridgeMethod::try_from_str(method)? {
            BridgeMethod::UpdateCarPlayUi => Some(Self::UpdateUi),
            BridgeMethod::ShowBookingSuccess => Some(Self::ShowBookingSuccess(
                Coordinate::from_fields(args, ARG_LATITUDE, ARG_LONGITUDE),
            )),
            // Outbound only; a companion echoing it back is not handled here.
            BridgeMethod::BookService => None,
        }
    }
}

/// Reply returned to the companion layer for an inbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reply {
    /// Call handled; carries no value.
    Ack,
    /// Method is not handled by this surface. Not an error.
    Unimplemented,
}

/// Arguments of the outbound `bookService` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookServiceArgs {
    /// Display name of the confirmed category.
    pub category_name: String,
}

/// Payload attached to the booking-success notification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookingPayload {
    /// Latitude of the booked location.
    pub lat: f64,
    /// Longitude of the booked location.
    pub lng: f64,
}

impl From<Coordinate> for BookingPayload {
    fn from(c: Coordinate) -> Self {
        Self {
            lat: c.latitude,
            lng: c.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn method_names_are_stable() {
        for m in [
            BridgeMethod::UpdateCarPlayUi,
            BridgeMethod::ShowBookingSuccess,
            BridgeMethod::BookService,
        ] {
            assert_eq!(BridgeMethod::try_from_str(m.as_str()), Some(m));
        }
        assert_eq!(BridgeMethod::try_from_str("updateCarplayUI"), None);
    }

    #[test]
    fn parse_inbound_commands() {
        assert_eq!(
            InboundCommand::parse("updateCarPlayUI", Some(&json!({"junk": true}))),
            Some(InboundCommand::UpdateUi)
        );
        assert_eq!(
            InboundCommand::parse(
                "showBookingSuccess",
                Some(&json!({"latitude": 1.0, "longitude": 2.0}))
            ),
            Some(InboundCommand::ShowBookingSuccess(Some(Coordinate::new(1.0, 2.0))))
        );
        assert_eq!(
            InboundCommand::parse("showBookingSuccess", Some(&json!({"latitude": null}))),
            Some(InboundCommand::ShowBookingSuccess(None))
        );
        assert_eq!(InboundCommand::parse("bookService", None), None);
        assert_eq!(InboundCommand::parse("reboot", None), None);
    }

    #[test]
    fn book_service_args_use_camel_case() {
        let args = BookServiceArgs {
            category_name: "Flat Tyre".into(),
        };
        assert_eq!(
            serde_json::to_value(&args).unwrap(),
            json!({"categoryName": "Flat Tyre"})
        );
        let payload = serde_json::to_value(BookingPayload::from(Coordinate::new(3.0, 4.0))).unwrap();
        assert_eq!(payload, json!({"lat": 3.0, "lng": 4.0}));
    }
}
