// Defaults for the head-unit surface configuration

/// Name of the command channel shared with the companion layer.
pub(crate) const CHANNEL_NAME: &str = "com.onecharge.carplay";

// Map hand-off
pub(crate) const MAPS_PRIMARY: &str = "comgooglemaps://";
pub(crate) const MAPS_FALLBACK: &str = "http://maps.apple.com/";
pub(crate) const MAPS_DIRECTIONS_MODE: &str = "driving";

// Booking-success notification
pub(crate) const NOTIFY_TITLE: &str = "Booking Successful!";
pub(crate) const NOTIFY_BODY: &str = "Tap to view location on CarPlay map";

// Template strings
pub(crate) const ROOT_TITLE: &str = "OneCharge";
pub(crate) const SECTION_HEADER: &str = "Our Services";
pub(crate) const MAP_TITLE: &str = "Map View";
pub(crate) const POI_TITLE: &str = "Reserved Charger";
pub(crate) const POI_SUBTITLE: &str = "OneCharge station";
pub(crate) const POI_SUMMARY: &str = "Tap to start navigation";
pub(crate) const POI_DETAIL_TITLE: &str = "Ready to charge";
pub(crate) const POI_DETAIL_SUBTITLE: &str = "Booking Confirmed";
pub(crate) const POI_DETAIL_SUMMARY: &str = "Drive to this location";

// Serde default functions
pub(crate) fn default_channel_name() -> String {
    CHANNEL_NAME.to_string()
}
