//! Shared protocol types for the roadside assistance head-unit surface.
//!
//! Value types used by every component ([`Coordinate`], [`ServiceCategory`]),
//! the messages sent toward the companion layer ([`ToCompanion`]), and the
//! typed bridge command definitions in [`rpc`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod rpc;

/// A geographic position. No validation beyond both parts being finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Degrees north of the equator.
    pub latitude: f64,
    /// Degrees east of the prime meridian.
    pub longitude: f64,
}

impl Coordinate {
    /// Location used whenever a coordinate is not supplied.
    pub const DEFAULT: Self = Self {
        latitude: 25.1972,
        longitude: 55.2744,
    };

    /// Construct a coordinate from its parts.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Read a coordinate out of two fields of a JSON mapping.
    ///
    /// Returns `None` unless `args` is an object holding both keys as finite numbers.
    pub fn from_fields(args: Option<&Value>, lat_key: &str, lng_key: &str) -> Option<Self> {
        let map = args?.as_object()?;
        let lat = map.get(lat_key)?.as_f64()?;
        let lng = map.get(lng_key)?.as_f64()?;
        Some(Self::new(lat, lng)).filter(Self::is_finite)
    }

    /// True when neither part is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Render as the `{lat},{lng}` pair used in map queries.
    ///
    /// Whole degrees keep their decimal point (`1.0`, not `1`).
    pub fn query_pair(&self) -> String {
        format!("{:?},{:?}", self.latitude, self.longitude)
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Substitute `default` when no coordinate was supplied.
///
/// Both the command entry point and the notification entry point go through
/// this function so defaulting behaves the same everywhere.
pub fn resolve_coordinate(input: Option<Coordinate>, default: Coordinate) -> Coordinate {
    input.unwrap_or(default)
}

/// Roadside service the driver can request. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceCategory {
    /// Emergency charging.
    ChargingStation,
    /// Tyre repair or replacement.
    FlatTyre,
    /// Battery boost or replacement.
    LowBattery,
    /// Engine or other mechanical repair.
    MechanicalIssue,
    /// Towing to a workshop.
    TowPickup,
    /// Anything else.
    Other,
}

impl ServiceCategory {
    /// Every category, in root list order.
    pub const ALL: [Self; 6] = [
        Self::ChargingStation,
        Self::FlatTyre,
        Self::LowBattery,
        Self::MechanicalIssue,
        Self::TowPickup,
        Self::Other,
    ];

    /// Identity of the category; sent as `categoryName` when booking.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ChargingStation => "Charging Station",
            Self::FlatTyre => "Flat Tyre",
            Self::LowBattery => "Low Battery",
            Self::MechanicalIssue => "Mechanical Issue",
            Self::TowPickup => "Tow / Pickup Required",
            Self::Other => "Other",
        }
    }

    /// Short label shown on the root list row.
    pub fn row_text(&self) -> &'static str {
        match self {
            Self::TowPickup => "Tow / Pickup",
            other => other.display_name(),
        }
    }

    /// Secondary line shown under the row text.
    pub fn detail_text(&self) -> &'static str {
        match self {
            Self::ChargingStation => "Emergency charging support",
            Self::FlatTyre => "Tyre repair or replacement",
            Self::LowBattery => "Battery boost or replacement",
            Self::MechanicalIssue => "Engine or mechanical repair",
            Self::TowPickup => "Emergency towing service",
            Self::Other => "Other emergency assistance",
        }
    }

    /// Look a category up by its display name.
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.display_name() == name)
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// IPC-related helpers: channel aliases and message codec.
pub mod ipc {
    use super::ToCompanion;

    /// Tokio unbounded sender for messages bound for the companion layer.
    pub type CompanionTx = tokio::sync::mpsc::UnboundedSender<ToCompanion>;
    /// Tokio unbounded receiver for messages bound for the companion layer.
    pub type CompanionRx = tokio::sync::mpsc::UnboundedReceiver<ToCompanion>;

    /// Create a standard companion channel (sender, receiver).
    pub fn companion_channel() -> (CompanionTx, CompanionRx) {
        tokio::sync::mpsc::unbounded_channel::<ToCompanion>()
    }

    /// Encoding of outbound messages into bridge calls.
    pub mod codec;
}

/// Messages sent from the head-unit surface to the companion layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ToCompanion {
    /// Outbound `bookService` command for a confirmed category.
    BookService(rpc::BookServiceArgs),

    /// Streaming log message from the engine
    Log {
        /// Level name (`INFO`, `WARN`, ...).
        level: String,
        /// Module path of the event.
        target: String,
        /// Rendered message with its fields appended.
        message: String,
    },
}

impl ToCompanion {
    /// Bridge method name for messages that map onto a channel command.
    pub fn method(&self) -> Option<rpc::BridgeMethod> {
        match self {
            Self::BookService(_) => Some(rpc::BridgeMethod::BookService),
            Self::Log { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn categories_keep_display_order() {
        let names: Vec<_> = ServiceCategory::ALL.iter().map(|c| c.display_name()).collect();
        assert_eq!(
            names,
            [
                "Charging Station",
                "Flat Tyre",
                "Low Battery",
                "Mechanical Issue",
                "Tow / Pickup Required",
                "Other"
            ]
        );
        assert_eq!(ServiceCategory::TowPickup.row_text(), "Tow / Pickup");
        assert_eq!(
            ServiceCategory::from_display_name("Low Battery"),
            Some(ServiceCategory::LowBattery)
        );
        assert_eq!(ServiceCategory::from_display_name("Tow / Pickup"), None);
    }

    #[test]
    fn coordinate_fields_require_both_numbers() {
        let args = json!({"latitude": 1.0, "longitude": 2.0});
        assert_eq!(
            Coordinate::from_fields(Some(&args), "latitude", "longitude"),
            Some(Coordinate::new(1.0, 2.0))
        );

        let ints = json!({"lat": 3, "lng": 4});
        assert_eq!(
            Coordinate::from_fields(Some(&ints), "lat", "lng"),
            Some(Coordinate::new(3.0, 4.0))
        );

        let missing = json!({"latitude": 1.0});
        assert_eq!(Coordinate::from_fields(Some(&missing), "latitude", "longitude"), None);

        let wrong_type = json!({"latitude": "1.0", "longitude": 2.0});
        assert_eq!(Coordinate::from_fields(Some(&wrong_type), "latitude", "longitude"), None);

        let not_a_map = json!([1.0, 2.0]);
        assert_eq!(Coordinate::from_fields(Some(&not_a_map), "latitude", "longitude"), None);
        assert_eq!(Coordinate::from_fields(None, "latitude", "longitude"), None);
    }

    #[test]
    fn resolve_substitutes_default() {
        assert_eq!(resolve_coordinate(None, Coordinate::DEFAULT), Coordinate::new(25.1972, 55.2744));
        assert_eq!(
            resolve_coordinate(Some(Coordinate::new(1.0, 2.0)), Coordinate::DEFAULT),
            Coordinate::new(1.0, 2.0)
        );
        assert_eq!(Coordinate::new(1.5, -2.0).query_pair(), "1.5,-2.0");
        assert_eq!(Coordinate::new(1.0, 2.0).query_pair(), "1.0,2.0");
        assert_eq!(Coordinate::DEFAULT.query_pair(), "25.1972,55.2744");
    }

    #[test]
    fn non_finite_parts_are_rejected() {
        assert!(!Coordinate::new(f64::INFINITY, 0.0).is_finite());
        assert!(!Coordinate::new(0.0, f64::NAN).is_finite());
        assert!(Coordinate::DEFAULT.is_finite());
    }
}
