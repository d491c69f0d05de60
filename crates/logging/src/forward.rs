//! Forward tracing events to the companion layer.
//!
//! A small tracing [`Layer`] that forwards log events over the companion
//! channel when a sink is set, so the companion app can show head-unit logs.
//!
//! Usage:
//! - Call [`set_sink`] with a [`CompanionTx`] once the bridge is up.
//! - Install the [`layer`] in your tracing subscriber. When a sink is present,
//!   events are forwarded as `ToCompanion::Log { level, target, message }`.
//! - Call [`clear_sink`] when the bridge goes away.
//!
//! The layer no-ops when no sink is set.

use std::sync::{
    OnceLock,
    atomic::{AtomicU64, Ordering},
};

use parking_lot::Mutex;
use roadside_protocol::{ToCompanion, ipc::CompanionTx};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::fmt;

/// A global sink that, when present, forwards logs to the companion layer.
static LOG_SINK: OnceLock<Mutex<Option<CompanionTx>>> = OnceLock::new();

/// Count of log events dropped because the companion channel was closed.
static LOG_DROPS: OnceLock<AtomicU64> = OnceLock::new();

/// Access the global sink.
fn sink() -> &'static Mutex<Option<CompanionTx>> {
    LOG_SINK.get_or_init(|| Mutex::new(None))
}

/// Set the forwarding sink.
pub fn set_sink(tx: CompanionTx) {
    let mut guard = sink().lock();
    *guard = Some(tx);
}

/// Clear the forwarding sink.
pub fn clear_sink() {
    let mut guard = sink().lock();
    *guard = None;
}

/// Number of events dropped since start.
pub fn dropped() -> u64 {
    LOG_DROPS
        .get_or_init(|| AtomicU64::new(0))
        .load(Ordering::SeqCst)
}

/// Tracing layer that forwards events to the companion layer when a sink is set.
pub struct ForwardLayer;

impl<S> Layer<S> for ForwardLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        // Early-exit if there is no sink set
        let tx_opt = { sink().lock().clone() };
        let Some(tx) = tx_opt else { return };

        let r = fmt::render_event(event);
        if tx
            .send(ToCompanion::Log {
                level: r.level,
                target: r.target,
                message: r.message,
            })
            .is_err()
        {
            // Receiver disappeared; clear to avoid repeated work.
            LOG_DROPS
                .get_or_init(|| AtomicU64::new(0))
                .fetch_add(1, Ordering::SeqCst);
            clear_sink();
        }
    }
}

/// Create the forwarding layer instance to add to your subscriber.
pub fn layer() -> ForwardLayer {
    ForwardLayer
}

#[cfg(test)]
mod tests {
    use roadside_protocol::ipc::companion_channel;
    use tracing_subscriber::prelude::*;

    use super::*;

    #[test]
    fn forwards_events_while_sink_is_set() {
        let (tx, mut rx) = companion_channel();
        let subscriber = tracing_subscriber::registry().with(layer());
        tracing::subscriber::with_default(subscriber, || {
            set_sink(tx);
            tracing::info!(lat = 3.0, "map_handoff");
            clear_sink();
            tracing::info!("not forwarded");
        });

        let Ok(ToCompanion::Log {
            level,
            target,
            message,
        }) = rx.try_recv()
        else {
            panic!("expected a forwarded log");
        };
        assert_eq!(level, "INFO");
        assert!(target.starts_with("logging"));
        assert_eq!(message, "map_handoff lat=3.0");
        assert!(rx.try_recv().is_err());
    }
}
