//! Head-unit templates and the actions their controls emit.
//!
//! Templates are plain data handed to the [`TemplateHost`](crate::TemplateHost)
//! for rendering. Alert controls carry an [`Action`] instead of a callback; the
//! host reports a tapped control back through [`Engine::on_action`](crate::Engine::on_action).

use roadside_config::Strings;
use roadside_protocol::{Coordinate, ServiceCategory};
use serde::{Deserialize, Serialize};

/// What an alert control does when tapped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Book the category and close the confirmation alert.
    Confirm(ServiceCategory),
    /// Close the confirmation alert without booking.
    Cancel,
    /// Open the map at the booking location and close the alert.
    ShowOnMap(Coordinate),
    /// Close the booking-success alert.
    Dismiss,
}

/// Visual weight of an alert control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionStyle {
    /// Regular control.
    Default,
    /// Dismissive control.
    Cancel,
}

/// A control on an alert template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertAction {
    /// Button label.
    pub title: String,
    /// Visual weight.
    pub style: ActionStyle,
    /// Emitted when tapped.
    pub action: Action,
}

impl AlertAction {
    fn new(title: &str, style: ActionStyle, action: Action) -> Self {
        Self {
            title: title.to_string(),
            style,
            action,
        }
    }
}

/// Modal alert with a title and a short list of controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertTemplate {
    /// Alert headline.
    pub title: String,
    /// Controls, in display order.
    pub actions: Vec<AlertAction>,
}

impl AlertTemplate {
    /// Whether one of the controls emits `action`.
    pub fn offers(&self, action: &Action) -> bool {
        self.actions.iter().any(|a| a.action == *action)
    }
}

/// One selectable row of the root list, bound to a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRow {
    /// Primary label.
    pub text: String,
    /// Secondary line under the label.
    pub detail: String,
    /// Category selected by tapping the row.
    pub category: ServiceCategory,
}

/// A headed group of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSection {
    /// Section header.
    pub header: String,
    /// Rows in display order.
    pub rows: Vec<ListRow>,
}

/// Scrollable list; the root of the template stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTemplate {
    /// Navigation bar title.
    pub title: String,
    /// Sections in display order.
    pub sections: Vec<ListSection>,
}

impl ListTemplate {
    /// Categories bound to the rows, in display order.
    pub fn categories(&self) -> Vec<ServiceCategory> {
        self.sections
            .iter()
            .flat_map(|s| s.rows.iter().map(|r| r.category))
            .collect()
    }
}

/// A named location shown on the map template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    /// Pin location.
    pub coordinate: Coordinate,
    /// Pin title.
    pub title: String,
    /// Pin subtitle.
    pub subtitle: String,
    /// Pin summary line.
    pub summary: String,
    /// Title of the detail card.
    pub detail_title: String,
    /// Subtitle of the detail card.
    pub detail_subtitle: String,
    /// Summary line of the detail card.
    pub detail_summary: String,
}

/// Map template showing points of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiTemplate {
    /// Navigation bar title.
    pub title: String,
    /// Points shown on the map.
    pub points: Vec<PointOfInterest>,
    /// Index into `points` that starts selected.
    pub selected_index: usize,
}

/// Any template the head unit can display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Template {
    /// Root service list.
    List(ListTemplate),
    /// Modal alert.
    Alert(AlertTemplate),
    /// Map with points of interest.
    PointOfInterest(PoiTemplate),
}

impl Template {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Alert(_) => "alert",
            Self::PointOfInterest(_) => "poi",
        }
    }

    /// Title of the template.
    pub fn title(&self) -> &str {
        match self {
            Self::List(t) => &t.title,
            Self::Alert(t) => &t.title,
            Self::PointOfInterest(t) => &t.title,
        }
    }

    /// Location of the selected point of interest, for map templates.
    pub fn poi_coordinate(&self) -> Option<Coordinate> {
        match self {
            Self::PointOfInterest(t) => t.points.get(t.selected_index).map(|p| p.coordinate),
            _ => None,
        }
    }
}

/// Root list: one row per category under a single services section.
pub fn root_list(strings: &Strings) -> ListTemplate {
    let rows = ServiceCategory::ALL
        .iter()
        .map(|c| ListRow {
            text: c.row_text().to_string(),
            detail: c.detail_text().to_string(),
            category: *c,
        })
        .collect();
    ListTemplate {
        title: strings.root_title.clone(),
        sections: vec![ListSection {
            header: strings.section_header.clone(),
            rows,
        }],
    }
}

/// Confirmation alert for a selected category.
pub fn confirm_alert(category: ServiceCategory) -> AlertTemplate {
    AlertTemplate {
        title: format!("Confirm {}?", category.display_name()),
        actions: vec![
            AlertAction::new("Confirm Booking", ActionStyle::Default, Action::Confirm(category)),
            AlertAction::new("Cancel", ActionStyle::Cancel, Action::Cancel),
        ],
    }
}

/// Booking-success alert offering to show `coordinate` on the map.
pub fn booking_success_alert(coordinate: Coordinate) -> AlertTemplate {
    AlertTemplate {
        title: "Booking Successful!".to_string(),
        actions: vec![
            AlertAction::new("Show on Map", ActionStyle::Default, Action::ShowOnMap(coordinate)),
            AlertAction::new("Dismiss", ActionStyle::Cancel, Action::Dismiss),
        ],
    }
}

/// Map template with a single selected point at the booking location.
pub fn poi_map(strings: &Strings, coordinate: Coordinate) -> PoiTemplate {
    PoiTemplate {
        title: strings.map_title.clone(),
        points: vec![PointOfInterest {
            coordinate,
            title: strings.poi_title.clone(),
            subtitle: strings.poi_subtitle.clone(),
            summary: strings.poi_summary.clone(),
            detail_title: strings.poi_detail_title.clone(),
            detail_subtitle: strings.poi_detail_subtitle.clone(),
            detail_summary: strings.poi_detail_summary.clone(),
        }],
        selected_index: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_list_has_one_row_per_category() {
        let list = root_list(&Strings::default());
        assert_eq!(list.title, "OneCharge");
        assert_eq!(list.sections.len(), 1);
        assert_eq!(list.sections[0].header, "Our Services");
        assert_eq!(list.categories(), ServiceCategory::ALL.to_vec());
        let tow = &list.sections[0].rows[4];
        assert_eq!(tow.text, "Tow / Pickup");
        assert_eq!(tow.detail, "Emergency towing service");
    }

    #[test]
    fn confirm_alert_titles_category() {
        let alert = confirm_alert(ServiceCategory::FlatTyre);
        assert_eq!(alert.title, "Confirm Flat Tyre?");
        assert!(alert.offers(&Action::Confirm(ServiceCategory::FlatTyre)));
        assert!(alert.offers(&Action::Cancel));
        assert!(!alert.offers(&Action::Confirm(ServiceCategory::Other)));
        assert!(!alert.offers(&Action::Dismiss));
    }

    #[test]
    fn poi_map_selects_booking_location() {
        let c = Coordinate::new(1.0, 2.0);
        let t = Template::PointOfInterest(poi_map(&Strings::default(), c));
        assert_eq!(t.poi_coordinate(), Some(c));
        assert_eq!(t.title(), "Map View");
        assert_eq!(Template::Alert(booking_success_alert(c)).poi_coordinate(), None);
    }
}
