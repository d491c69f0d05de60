//! Test support utilities for roadside-engine integration/unit tests.
//! These helpers are public so the integration suite and the replay binary can
//! share them. They record every call and never touch a real device.

use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use roadside_config::Config;
use roadside_protocol::{
    ToCompanion,
    ipc::{CompanionRx, companion_channel},
};

use crate::{
    Engine, Error, HandOff, HandOffRx, NotificationRequest, NotificationScheduler, Result,
    Template, TemplateHost, UrlOpener, handoff_channel,
};

/// A call received by [`MockHost`].
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    /// [`TemplateHost::set_root`]
    SetRoot(Template),
    /// [`TemplateHost::present`]
    Present(Template),
    /// [`TemplateHost::push`]
    Push(Template),
    /// [`TemplateHost::dismiss`]
    Dismiss,
}

/// Template host that records calls.
#[derive(Default)]
pub struct MockHost {
    calls: Mutex<Vec<HostCall>>,
}

impl MockHost {
    /// A host with no calls recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().clone()
    }

    /// Templates pushed so far.
    pub fn pushed(&self) -> Vec<Template> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                HostCall::Push(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }
}

impl TemplateHost for MockHost {
    fn set_root(&self, template: &Template) {
        self.calls.lock().push(HostCall::SetRoot(template.clone()));
    }
    fn present(&self, template: &Template) {
        self.calls.lock().push(HostCall::Present(template.clone()));
    }
    fn push(&self, template: &Template) {
        self.calls.lock().push(HostCall::Push(template.clone()));
    }
    fn dismiss(&self) {
        self.calls.lock().push(HostCall::Dismiss);
    }
}

/// URL opener with a configurable set of installed applications.
pub struct MockOpener {
    /// URL prefixes `can_open` answers true for.
    installed: Vec<String>,
    /// URL prefixes whose `open` fails.
    failing: Mutex<Vec<String>>,
    opened: Mutex<Vec<String>>,
}

impl MockOpener {
    /// The primary map application is installed.
    pub fn with_primary_app() -> Self {
        Self::installed(&["comgooglemaps://"])
    }

    /// Only the web fallback is available.
    pub fn without_primary_app() -> Self {
        Self::installed(&[])
    }

    fn installed(prefixes: &[&str]) -> Self {
        Self {
            installed: prefixes.iter().map(|p| p.to_string()).collect(),
            failing: Mutex::new(Vec::new()),
            opened: Mutex::new(Vec::new()),
        }
    }

    /// Make `open` fail for URLs starting with `prefix`.
    pub fn fail_on(&self, prefix: &str) {
        self.failing.lock().push(prefix.to_string());
    }

    /// URLs opened successfully, in order.
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().clone()
    }
}

impl UrlOpener for MockOpener {
    fn can_open(&self, url: &str) -> bool {
        self.installed.iter().any(|p| url.starts_with(p.as_str()))
    }

    fn open(&self, url: &str) -> Result<()> {
        if self.failing.lock().iter().any(|p| url.starts_with(p.as_str())) {
            return Err(Error::Open {
                url: url.to_string(),
                message: "refused".to_string(),
            });
        }
        self.opened.lock().push(url.to_string());
        Ok(())
    }
}

/// Notification scheduler that records requests.
#[derive(Default)]
pub struct MockScheduler {
    fail: bool,
    requests: Mutex<Vec<NotificationRequest>>,
}

impl MockScheduler {
    /// A scheduler that accepts every request.
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheduler that refuses every request.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Requests accepted so far.
    pub fn requests(&self) -> Vec<NotificationRequest> {
        self.requests.lock().clone()
    }
}

impl NotificationScheduler for MockScheduler {
    fn schedule(&self, request: NotificationRequest) -> Result<()> {
        if self.fail {
            return Err(Error::Schedule("not authorized".into()));
        }
        self.requests.lock().push(request);
        Ok(())
    }
}

/// An engine wired to recording collaborators.
pub struct TestRig {
    /// Engine under test.
    pub engine: Engine,
    /// Receives `bookService` and forwarded logs.
    pub companion_rx: CompanionRx,
    /// Receives queued external map hand-offs.
    pub handoff_rx: HandOffRx,
    /// Host connected by [`TestRig::connected`].
    pub host: Arc<MockHost>,
    /// Scheduler the engine was built with.
    pub scheduler: Arc<MockScheduler>,
}

impl TestRig {
    /// Build a disconnected engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Build a disconnected engine with `config`.
    pub fn with_config(config: Config) -> Self {
        let (companion_tx, companion_rx) = companion_channel();
        let (handoff_tx, handoff_rx) = handoff_channel();
        let scheduler = Arc::new(MockScheduler::new());
        let engine = Engine::new(config, companion_tx, handoff_tx, scheduler.clone());
        Self {
            engine,
            companion_rx,
            handoff_rx,
            host: Arc::new(MockHost::new()),
            scheduler,
        }
    }

    /// Build an engine already connected to [`TestRig::host`].
    pub fn connected() -> Self {
        let rig = Self::new();
        rig.engine.connect(rig.host.clone());
        rig
    }

    /// Drain every message sent toward the companion layer so far.
    pub fn outbound(&mut self) -> Vec<ToCompanion> {
        let mut out = Vec::new();
        while let Ok(msg) = self.companion_rx.try_recv() {
            out.push(msg);
        }
        out
    }

    /// Drain every queued hand-off so far.
    pub fn handoffs(&mut self) -> Vec<HandOff> {
        let mut out = Vec::new();
        while let Ok(req) = self.handoff_rx.try_recv() {
            out.push(req);
        }
        out
    }
}

impl Default for TestRig {
    fn default() -> Self {
        Self::new()
    }
}

/// Receive companion messages until `pred` matches or `timeout_ms` elapses.
pub async fn recv_until<F>(rx: &mut CompanionRx, timeout_ms: u64, mut pred: F) -> bool
where
    F: FnMut(&ToCompanion) -> bool,
{
    tokio::time::timeout(Duration::from_millis(timeout_ms), async {
        while let Some(msg) = rx.recv().await {
            if pred(&msg) {
                return true;
            }
        }
        false
    })
    .await
    .unwrap_or(false)
}
