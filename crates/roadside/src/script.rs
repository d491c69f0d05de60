//! Session scripts: a RON list of events replayed in order.
//!
//! ```ron
//! [
//!     Connect,
//!     Select(FlatTyre),
//!     Action(Confirm(FlatTyre)),
//!     Command(method: "showBookingSuccess", args: Some("{\"latitude\": 1.0, \"longitude\": 2.0}")),
//!     Tap(identifier: "booking_success", category: "booking_success", payload: "{\"lat\": 3.0, \"lng\": 4.0}"),
//!     Disconnect,
//! ]
//! ```

use std::{fs, path::Path, sync::Arc};

use roadside_engine::{Action, Engine, NotificationTap, PoiEvent, TemplateHost};
use roadside_protocol::{Coordinate, ServiceCategory};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

/// One scripted event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum ScriptEvent {
    /// Head unit connects.
    Connect,
    /// Head unit disconnects.
    Disconnect,
    /// Head unit back control.
    Back,
    /// Root list row selected.
    Select(ServiceCategory),
    /// Alert control tapped.
    Action(Action),
    /// Inbound bridge call; `args` is JSON text.
    Command {
        /// Bridge method name.
        method: String,
        /// JSON arguments, if any.
        #[serde(default)]
        args: Option<String>,
    },
    /// Notification tapped; `payload` is JSON text.
    Tap {
        /// Notification identifier.
        identifier: String,
        /// Notification category identifier.
        category: String,
        /// JSON payload.
        payload: String,
    },
    /// Direct map launch.
    OpenMap(Option<Coordinate>),
    /// Map template callback.
    Poi(PoiScriptEvent),
}

/// Scripted map template callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PoiScriptEvent {
    /// Region changed.
    Region,
    /// Point selected.
    Point(usize),
    /// Point button selected.
    Button(usize),
}

/// Parse a script from RON text.
pub fn parse(text: &str) -> Result<Vec<ScriptEvent>> {
    Ok(ron::from_str(text)?)
}

/// Read and parse a script file.
pub fn load(path: &Path) -> Result<Vec<ScriptEvent>> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

fn json(index: usize, text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|source| Error::Json { index, source })
}

/// Apply every event to `engine`, connecting `host` on `Connect`.
pub fn replay(
    engine: &Engine,
    host: &Arc<dyn TemplateHost>,
    events: &[ScriptEvent],
) -> Result<()> {
    for (index, event) in events.iter().enumerate() {
        debug!(index, ?event, "replay");
        match event {
            ScriptEvent::Connect => engine.connect(host.clone()),
            ScriptEvent::Disconnect => engine.disconnect(),
            ScriptEvent::Back => engine.on_back(),
            ScriptEvent::Select(category) => engine.select_category(*category),
            ScriptEvent::Action(action) => engine.on_action(*action),
            ScriptEvent::Command { method, args } => {
                let args = args.as_deref().map(|a| json(index, a)).transpose()?;
                let reply = engine.handle_command(method, args.as_ref());
                println!("reply {method}: {reply:?}");
            }
            ScriptEvent::Tap {
                identifier,
                category,
                payload,
            } => {
                let tap = NotificationTap {
                    identifier: identifier.clone(),
                    category_identifier: category.clone(),
                    payload: json(index, payload)?,
                };
                if let Some(launch) = engine.on_notification_tap(&tap) {
                    println!("tap: {launch:?}");
                }
            }
            ScriptEvent::OpenMap(coordinate) => {
                println!("open_map: {:?}", engine.open_map(*coordinate));
            }
            ScriptEvent::Poi(p) => engine.on_poi_event(match p {
                PoiScriptEvent::Region => PoiEvent::RegionChanged,
                PoiScriptEvent::Point(i) => PoiEvent::PointSelected(*i),
                PoiScriptEvent::Button(i) => PoiEvent::ButtonSelected(*i),
            }),
        }
    }
    Ok(())
}
