//! Roadside Engine
//!
//! The engine coordinates the head-unit ordering surface:
//! - handles inbound commands from the companion layer and emits `bookService`
//! - owns the template stack and the connect/disconnect lifecycle of the head unit
//! - decides whether a map opens in-car or is handed off to an external application
//! - routes taps on the booking-success notification
//!
//! All three event sources (command channel, notification taps, interface
//! lifecycle) enter through [`Engine`]. Each event takes the session lock once
//! and runs to completion, so no partial mutation is ever observable. The only
//! deferred work is the external map hand-off, which is queued for the UI-owning
//! context and drained by [`run_handoffs`].
use std::sync::Arc;

use parking_lot::Mutex;
use roadside_config::Config;
use roadside_protocol::{
    Coordinate, ServiceCategory,
    ipc::CompanionTx,
    rpc::{InboundCommand, Reply},
};
use serde_json::Value;
use tracing::{debug, trace, warn};

mod deps;
mod dispatcher;
mod error;
mod map_launch;
mod navigation;
mod notification;
mod scene;
mod session;
pub mod template;
pub mod test_support;

pub use deps::{NotificationScheduler, TemplateHost, UrlOpener};
pub use dispatcher::CompanionDispatcher;
pub use error::{Error, Result};
pub use map_launch::{
    HandOff, HandOffRx, HandOffTx, MapLaunch, handoff_channel, perform_handoff, run_handoffs,
};
pub use notification::{
    NotificationRequest, NotificationTap, PresentationOptions, TapRoute, foreground_presentation,
    route_tap,
};
pub use scene::{SceneRole, scene_configuration};
pub use template::{Action, Template};

use map_launch::MapLaunchResolver;
use notification::BookingNotifier;
use session::SessionState;
use template::{booking_success_alert, confirm_alert, root_list};

/// Callbacks from the point-of-interest map template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoiEvent {
    /// The driver panned or zoomed the map.
    RegionChanged,
    /// A point of interest was selected.
    PointSelected(usize),
    /// A button on a point of interest was selected.
    ButtonSelected(usize),
}

/// Engine coordinates the session state, the head-unit templates, outbound
/// commands, notifications and map hand-offs.
///
/// Construct via [`Engine::new`], then feed it interface lifecycle events
/// ([`Engine::connect`], [`Engine::disconnect`]), bridge commands
/// ([`Engine::handle_command`]), template input ([`Engine::select_category`],
/// [`Engine::on_action`]) and notification taps ([`Engine::on_notification_tap`]).
#[derive(Clone)]
pub struct Engine {
    /// Session state; one lock held for the whole of each event.
    session: Arc<Mutex<SessionState>>,
    /// Configuration
    config: Arc<Config>,
    /// Outbound half of the command channel
    companion: CompanionDispatcher,
    /// In-car versus hand-off decision
    maps: MapLaunchResolver,
    /// Booking-success banner
    notifier: BookingNotifier,
}

impl Engine {
    /// Create a new engine.
    ///
    /// - `companion_tx`: channel toward the companion layer (`bookService`, logs)
    /// - `handoff_tx`: queue drained on the UI-owning context by [`run_handoffs`]
    /// - `scheduler`: local notification collaborator
    pub fn new(
        config: Config,
        companion_tx: CompanionTx,
        handoff_tx: HandOffTx,
        scheduler: Arc<dyn NotificationScheduler>,
    ) -> Self {
        let maps = MapLaunchResolver::new(config.maps.clone(), config.strings.clone(), handoff_tx);
        let notifier = BookingNotifier::new(scheduler, config.notification.clone());
        Self {
            session: Arc::new(Mutex::new(SessionState::new())),
            config: Arc::new(config),
            companion: CompanionDispatcher::new(companion_tx),
            maps,
            notifier,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ---- interface lifecycle ----

    /// Head unit connected: store the handle and show the root list.
    pub fn connect(&self, host: Arc<dyn TemplateHost>) {
        let mut st = self.session.lock();
        if st.nav.is_connected() {
            warn!("connect while already connected; replacing interface handle");
        }
        st.nav.connect(host, root_list(&self.config.strings));
    }

    /// Head unit disconnected: drop the handle and every template on it.
    pub fn disconnect(&self) {
        self.session.lock().nav.disconnect();
    }

    /// The head unit's own back control popped the topmost pushed template.
    pub fn on_back(&self) {
        let mut st = self.session.lock();
        match st.nav.pop() {
            Some(t) => trace!(kind = t.kind(), "template popped"),
            None => debug!("back at root ignored"),
        }
    }

    // ---- command channel ----

    /// Handle an inbound bridge call.
    ///
    /// Unknown methods reply [`Reply::Unimplemented`] without touching state;
    /// malformed arguments are replaced by defaults.
    pub fn handle_command(&self, method: &str, args: Option<&Value>) -> Reply {
        match InboundCommand::parse(method, args) {
            Some(cmd) => {
                self.execute(cmd);
                Reply::Ack
            }
            None => {
                debug!(method, "unimplemented bridge method");
                Reply::Unimplemented
            }
        }
    }

    /// Run an already validated command.
    pub fn execute(&self, cmd: InboundCommand) {
        match cmd {
            InboundCommand::UpdateUi => trace!("updateCarPlayUI"),
            InboundCommand::ShowBookingSuccess(coordinate) => self.show_booking_success(coordinate),
        }
    }

    /// Booking-success flow: remember the location, schedule the banner and, when
    /// an interface is connected, present the in-car alert.
    ///
    /// The banner and the alert are independent signals; both are produced
    /// whenever possible.
    pub fn show_booking_success(&self, coordinate: Option<Coordinate>) {
        let coordinate = self.config.resolve_coordinate(coordinate);
        let mut st = self.session.lock();
        st.last_booking = Some(coordinate);
        self.notifier.notify_booking_success(coordinate);
        if !st.nav.present(booking_success_alert(coordinate)) {
            debug!(%coordinate, "no interface; booking alert not presented");
        }
    }

    // ---- template input ----

    /// A root list row was selected: ask the driver to confirm.
    pub fn select_category(&self, category: ServiceCategory) {
        let mut st = self.session.lock();
        if !st.nav.root_visible() {
            debug!(category = %category, "selection ignored; root list not visible");
            return;
        }
        st.nav.present(confirm_alert(category));
    }

    /// An alert control was tapped.
    ///
    /// Actions not offered by the currently presented alert are stale (for
    /// example delivered after a disconnect) and are ignored.
    pub fn on_action(&self, action: Action) {
        let mut st = self.session.lock();
        let offered = st.nav.presented().is_some_and(|a| a.offers(&action));
        if !offered {
            debug!(?action, "stale action ignored");
            return;
        }
        match action {
            Action::Confirm(category) => {
                self.companion.book_service(category);
                st.nav.dismiss();
            }
            Action::ShowOnMap(coordinate) => {
                self.maps.open(&mut st.nav, coordinate);
                st.nav.dismiss();
            }
            Action::Cancel | Action::Dismiss => st.nav.dismiss(),
        }
    }

    /// Callback from the point-of-interest template. No state changes.
    pub fn on_poi_event(&self, event: PoiEvent) {
        trace!(?event, "poi event");
    }

    // ---- map launch ----

    /// Show `coordinate` (or the default) on a map: in-car when connected,
    /// otherwise via an external hand-off.
    pub fn open_map(&self, coordinate: Option<Coordinate>) -> MapLaunch {
        let coordinate = self.config.resolve_coordinate(coordinate);
        let mut st = self.session.lock();
        self.maps.open(&mut st.nav, coordinate)
    }

    // ---- notifications ----

    /// A local notification was tapped.
    ///
    /// Connectivity is checked once, here; the chosen path is not re-evaluated.
    pub fn on_notification_tap(&self, tap: &NotificationTap) -> Option<MapLaunch> {
        match route_tap(tap) {
            TapRoute::Ignore => {
                trace!(identifier = %tap.identifier, "notification passed through");
                None
            }
            TapRoute::OpenMap(Some(coordinate)) => {
                let mut st = self.session.lock();
                Some(if st.nav.is_connected() {
                    self.maps.open_in_car(&mut st.nav, coordinate)
                } else {
                    self.maps.hand_off(coordinate)
                })
            }
            TapRoute::OpenMap(None) => Some(self.open_map(None)),
        }
    }

    // ---- inspection ----

    /// True between connect and disconnect.
    pub fn interface_connected(&self) -> bool {
        self.session.lock().nav.is_connected()
    }

    /// Location of the most recent booking-success flow.
    pub fn last_booking_coordinates(&self) -> Option<Coordinate> {
        self.session.lock().last_booking
    }

    /// Visible templates bottom-up; a presented alert is last.
    pub fn template_stack(&self) -> Vec<Template> {
        self.session.lock().nav.snapshot()
    }
}
