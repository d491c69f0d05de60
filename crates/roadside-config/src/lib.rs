//! Configuration for the roadside head-unit surface.
//!
//! Every field has a default matching the shipped product, so an empty RON
//! document `()` is a valid configuration. Unknown fields are rejected.

use std::{fs, path::Path};

use roadside_protocol::Coordinate;
use serde::Deserialize;
use tracing::debug;

mod defaults;
mod error;

pub use error::Error;

/// Convenient result type for configuration loading.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Name of the command channel shared with the companion layer.
    pub channel_name: String,
    /// Location substituted whenever a coordinate is missing or malformed.
    pub default_coordinate: Coordinate,
    /// External map hand-off targets.
    pub maps: Maps,
    /// Text of the booking-success local notification.
    pub notification: NotificationText,
    /// Labels used by the head-unit templates.
    pub strings: Strings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channel_name: defaults::default_channel_name(),
            default_coordinate: Coordinate::DEFAULT,
            maps: Maps::default(),
            notification: NotificationText::default(),
            strings: Strings::default(),
        }
    }
}

impl Config {
    /// Parse a configuration from RON text.
    pub fn from_ron(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot be used.
    fn validate(&self) -> Result<()> {
        if !self.default_coordinate.is_finite() {
            return Err(Error::Invalid {
                path: None,
                message: format!(
                    "default_coordinate must be finite, got {}",
                    self.default_coordinate
                ),
            });
        }
        Ok(())
    }

    /// Read and parse a RON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let text = fs::read_to_string(path).map_err(|e| Error::Read {
            path: Some(path.to_path_buf()),
            message: e.to_string(),
        })?;
        Self::from_ron(&text).map_err(|e| e.with_path(path.to_path_buf()))
    }

    /// Substitute the configured default when no coordinate was supplied.
    pub fn resolve_coordinate(&self, input: Option<Coordinate>) -> Coordinate {
        roadside_protocol::resolve_coordinate(input, self.default_coordinate)
    }
}

/// External map application hand-off.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Maps {
    /// Deep-link base of the preferred external map application.
    pub primary: String,
    /// Web map base used when the primary application is unavailable.
    pub fallback: String,
    /// Directions hint appended to the primary deep link.
    pub directions_mode: String,
}

impl Default for Maps {
    fn default() -> Self {
        Self {
            primary: defaults::MAPS_PRIMARY.to_string(),
            fallback: defaults::MAPS_FALLBACK.to_string(),
            directions_mode: defaults::MAPS_DIRECTIONS_MODE.to_string(),
        }
    }
}

impl Maps {
    /// Deep link for the primary application: `{primary}?q={lat},{lng}&directionsmode={mode}`.
    pub fn primary_url(&self, c: Coordinate) -> String {
        format!(
            "{}?q={}&directionsmode={}",
            self.primary,
            c.query_pair(),
            self.directions_mode
        )
    }

    /// Web fallback: `{fallback}?q={lat},{lng}`.
    pub fn fallback_url(&self, c: Coordinate) -> String {
        format!("{}?q={}", self.fallback, c.query_pair())
    }
}

/// Content of the booking-success local notification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationText {
    /// Banner title.
    pub title: String,
    /// Banner body.
    pub body: String,
}

impl Default for NotificationText {
    fn default() -> Self {
        Self {
            title: defaults::NOTIFY_TITLE.to_string(),
            body: defaults::NOTIFY_BODY.to_string(),
        }
    }
}

/// Labels shown on the head-unit templates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Strings {
    /// Title of the root list template.
    pub root_title: String,
    /// Header of the services section in the root list.
    pub section_header: String,
    /// Title of the point-of-interest map template.
    pub map_title: String,
    /// Title of the booked point of interest.
    pub poi_title: String,
    /// Subtitle of the booked point of interest.
    pub poi_subtitle: String,
    /// Summary line of the booked point of interest.
    pub poi_summary: String,
    /// Title of the point-of-interest detail card.
    pub poi_detail_title: String,
    /// Subtitle of the detail card.
    pub poi_detail_subtitle: String,
    /// Summary line of the detail card.
    pub poi_detail_summary: String,
}

impl Default for Strings {
    fn default() -> Self {
        Self {
            root_title: defaults::ROOT_TITLE.to_string(),
            section_header: defaults::SECTION_HEADER.to_string(),
            map_title: defaults::MAP_TITLE.to_string(),
            poi_title: defaults::POI_TITLE.to_string(),
            poi_subtitle: defaults::POI_SUBTITLE.to_string(),
            poi_summary: defaults::POI_SUMMARY.to_string(),
            poi_detail_title: defaults::POI_DETAIL_TITLE.to_string(),
            poi_detail_subtitle: defaults::POI_DETAIL_SUBTITLE.to_string(),
            poi_detail_summary: defaults::POI_DETAIL_SUMMARY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = Config::from_ron("()").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.channel_name, "com.onecharge.carplay");
        assert_eq!(cfg.default_coordinate, Coordinate::new(25.1972, 55.2744));
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = Config::from_ron(
            "(default_coordinate: (latitude: 1.0, longitude: 2.0), maps: (fallback: \"https://maps.example/\"))",
        )
        .unwrap();
        assert_eq!(cfg.default_coordinate, Coordinate::new(1.0, 2.0));
        assert_eq!(cfg.maps.fallback, "https://maps.example/");
        assert_eq!(cfg.maps.primary, "comgooglemaps://");
        assert_eq!(cfg.strings, Strings::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::from_ron("(colour: \"red\")").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }), "{err:?}");
    }

    #[test]
    fn non_finite_default_coordinate_is_rejected() {
        let err =
            Config::from_ron("(default_coordinate: (latitude: inf, longitude: NaN))").unwrap_err();
        assert!(matches!(err, Error::Invalid { .. }), "{err:?}");
        assert!(err.pretty().contains("default_coordinate"));

        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "(default_coordinate: (latitude: 1.0, longitude: inf))").unwrap();
        let err = Config::load(f.path()).unwrap_err();
        assert!(matches!(err, Error::Invalid { path: Some(_), .. }), "{err:?}");
    }

    #[test]
    fn map_urls_follow_the_handoff_format() {
        let maps = Maps::default();
        let c = Coordinate::new(25.1972, 55.2744);
        assert_eq!(
            maps.primary_url(c),
            "comgooglemaps://?q=25.1972,55.2744&directionsmode=driving"
        );
        assert_eq!(maps.fallback_url(c), "http://maps.apple.com/?q=25.1972,55.2744");
        assert_eq!(
            maps.fallback_url(Coordinate::new(1.0, 2.0)),
            "http://maps.apple.com/?q=1.0,2.0"
        );
    }

    #[test]
    fn load_reports_path_on_failure() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "(channel_name: 3)").unwrap();
        let err = Config::load(f.path()).unwrap_err();
        assert!(err.pretty().contains(&f.path().display().to_string()));

        let missing = Config::load(Path::new("/nonexistent/roadside.ron")).unwrap_err();
        assert!(matches!(missing, Error::Read { path: Some(_), .. }));
    }

    #[test]
    fn resolve_uses_configured_default() {
        let mut cfg = Config::default();
        cfg.default_coordinate = Coordinate::new(-1.0, -2.0);
        assert_eq!(cfg.resolve_coordinate(None), Coordinate::new(-1.0, -2.0));
        assert_eq!(
            cfg.resolve_coordinate(Some(Coordinate::new(3.0, 4.0))),
            Coordinate::new(3.0, 4.0)
        );
    }
}
