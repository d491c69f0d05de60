//! Render `tracing` events into concise logfmt strings.
//!
//! Extracts level, target, and message from an event and renders any remaining
//! fields in `key=value` form.

use std::fmt::{Debug, Write};

use tracing::{
    Event, Metadata,
    field::{Field, Visit},
};

/// Rendered fields extracted from a tracing Event.
#[derive(Debug, Clone)]
pub struct RenderedLog {
    /// Severity level (e.g., INFO, WARN) for the event.
    pub level: String,
    /// Event target (typically the module path).
    pub target: String,
    /// Message followed by any structured fields as `key=value`.
    pub message: String,
}

/// Extract a concise triple (level, target, message) from a tracing Event.
///
/// Structured fields are appended to the message so that events such as
/// `info!(lat, lng, "map_handoff")` keep their coordinates.
pub fn render_event(event: &Event<'_>) -> RenderedLog {
    struct MsgVisitor {
        /// Captured `message` field, if present.
        msg: Option<String>,
        /// Accumulated non-message fields rendered as `key=value`.
        fields: String,
    }
    impl Visit for MsgVisitor {
        fn record_str(&mut self, field: &Field, value: &str) {
            if field.name() == "message" {
                self.msg = Some(value.to_string());
            } else {
                let _ignored = write!(&mut self.fields, "{}=\"{}\" ", field.name(), value);
            }
        }
        fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
            if field.name() == "message" {
                self.msg = Some(format!("{:?}", value));
            } else {
                let _ignored = write!(&mut self.fields, "{}={:?} ", field.name(), value);
            }
        }
    }
    let meta: &Metadata<'_> = event.metadata();
    let mut vis = MsgVisitor {
        msg: None,
        fields: String::new(),
    };
    event.record(&mut vis);
    let fields = vis.fields.trim_end();
    let rendered = match vis.msg {
        Some(m) if fields.is_empty() => m,
        Some(m) => format!("{} {}", m, fields),
        None => fields.to_string(),
    };
    RenderedLog {
        level: meta.level().to_string(),
        target: meta.target().to_string(),
        message: rendered,
    }
}
