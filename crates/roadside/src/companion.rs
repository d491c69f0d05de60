//! Console rendering of what reached the companion layer.

use roadside_protocol::{ToCompanion, ipc::codec};
use tracing::error;

/// One line for `msg`: bridge calls as `channel/method (n bytes)`, logs as-is.
pub fn describe(channel: &str, msg: &ToCompanion) -> Option<String> {
    if let ToCompanion::Log {
        level,
        target,
        message,
    } = msg
    {
        return Some(format!("log: {level} {target}: {message}"));
    }
    match codec::encode_call(channel, msg) {
        Ok(call) => call.map(|c| format!("bridge: {c}")),
        Err(e) => {
            error!(error = %e, "failed to encode bridge call");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{iter, sync::Arc};

    use roadside_config::Config;
    use roadside_engine::{
        Action, Engine, handoff_channel,
        test_support::{MockHost, MockScheduler},
    };
    use roadside_protocol::{ServiceCategory, ipc::companion_channel};
    use tracing_subscriber::{prelude::*, registry};

    use super::*;

    #[test]
    fn logs_and_bookings_reach_the_companion() {
        let _guard = tracing::subscriber::set_default(registry().with(logging::forward::layer()));
        let (tx, mut rx) = companion_channel();
        let (htx, _hrx) = handoff_channel();
        logging::forward::set_sink(tx.clone());

        let engine = Engine::new(Config::default(), tx, htx, Arc::new(MockScheduler::new()));
        engine.connect(Arc::new(MockHost::new()));
        engine.select_category(ServiceCategory::FlatTyre);
        engine.on_action(Action::Confirm(ServiceCategory::FlatTyre));
        logging::forward::clear_sink();

        let lines: Vec<String> = iter::from_fn(|| rx.try_recv().ok())
            .filter_map(|m| describe("com.onecharge.carplay", &m))
            .collect();
        assert!(
            lines
                .iter()
                .any(|l| l.starts_with("bridge: com.onecharge.carplay/bookService (")),
            "{lines:?}"
        );
        assert!(
            lines
                .iter()
                .any(|l| l.starts_with("log: DEBUG") && l.contains("interface connected")),
            "{lines:?}"
        );
    }
}
