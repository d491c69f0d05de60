use std::sync::Arc;

use tracing::{debug, trace};

use crate::{
    deps::TemplateHost,
    template::{AlertTemplate, ListTemplate, Template},
};

/// Template stack of the head-unit interface plus its connection lifecycle.
///
/// The handle, the navigation stack and the presented alert are only ever
/// changed together: disconnect clears all three in one step, so no caller can
/// observe templates on a disconnected interface.
#[derive(Default)]
pub(crate) struct Navigation {
    /// Interface handle; `Some` exactly while connected.
    host: Option<Arc<dyn TemplateHost>>,
    /// Root list at index 0, pushed templates above it.
    stack: Vec<Template>,
    /// Modal alert shown above the stack, if any.
    presented: Option<AlertTemplate>,
}

impl Navigation {
    pub(crate) fn is_connected(&self) -> bool {
        self.host.is_some()
    }

    /// Store the handle and display `root` as the base of the stack.
    pub(crate) fn connect(&mut self, host: Arc<dyn TemplateHost>, root: ListTemplate) {
        let root = Template::List(root);
        host.set_root(&root);
        self.host = Some(host);
        self.stack = vec![root];
        self.presented = None;
        debug!("interface connected");
    }

    /// Drop the handle and everything that was displayed on it.
    pub(crate) fn disconnect(&mut self) {
        let had = self.stack.len() + usize::from(self.presented.is_some());
        self.host = None;
        self.stack.clear();
        self.presented = None;
        debug!(discarded = had, "interface disconnected");
    }

    /// True when the root list is the topmost visible template.
    pub(crate) fn root_visible(&self) -> bool {
        self.is_connected() && self.presented.is_none() && self.stack.len() == 1
    }

    pub(crate) fn presented(&self) -> Option<&AlertTemplate> {
        self.presented.as_ref()
    }

    /// Present `alert`, replacing any alert already shown.
    ///
    /// Returns false when there is no interface to present on.
    pub(crate) fn present(&mut self, alert: AlertTemplate) -> bool {
        let Some(host) = self.host.as_ref() else {
            return false;
        };
        if let Some(prev) = self.presented.take() {
            debug!(title = %prev.title, "replacing presented alert");
            host.dismiss();
        }
        host.present(&Template::Alert(alert.clone()));
        trace!(title = %alert.title, "alert presented");
        self.presented = Some(alert);
        true
    }

    /// Dismiss the presented alert, if any.
    pub(crate) fn dismiss(&mut self) {
        if let Some(alert) = self.presented.take() {
            if let Some(host) = self.host.as_ref() {
                host.dismiss();
            }
            trace!(title = %alert.title, "alert dismissed");
        }
    }

    /// Push `template` above the current stack. Returns false when disconnected.
    pub(crate) fn push(&mut self, template: Template) -> bool {
        let Some(host) = self.host.as_ref() else {
            return false;
        };
        host.push(&template);
        trace!(kind = template.kind(), depth = self.stack.len(), "template pushed");
        self.stack.push(template);
        true
    }

    /// Pop the topmost pushed template, never the root.
    pub(crate) fn pop(&mut self) -> Option<Template> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    /// Visible templates bottom-up, the presented alert last.
    pub(crate) fn snapshot(&self) -> Vec<Template> {
        let mut out = self.stack.clone();
        if let Some(a) = &self.presented {
            out.push(Template::Alert(a.clone()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use roadside_config::Strings;
    use roadside_protocol::{Coordinate, ServiceCategory};

    use super::*;
    use crate::{
        template::{booking_success_alert, confirm_alert, poi_map, root_list},
        test_support::{HostCall, MockHost},
    };

    fn connected() -> (Navigation, Arc<MockHost>) {
        let host = Arc::new(MockHost::new());
        let mut nav = Navigation::default();
        nav.connect(host.clone(), root_list(&Strings::default()));
        (nav, host)
    }

    #[test]
    fn connect_sets_root() {
        let (nav, host) = connected();
        assert!(nav.is_connected());
        assert!(nav.root_visible());
        assert_eq!(nav.snapshot().len(), 1);
        let calls = host.calls();
        assert!(matches!(calls.as_slice(), [HostCall::SetRoot(_)]));
    }

    #[test]
    fn present_replaces_previous_alert() {
        let (mut nav, host) = connected();
        assert!(nav.present(confirm_alert(ServiceCategory::Other)));
        assert!(nav.present(booking_success_alert(Coordinate::DEFAULT)));
        assert_eq!(nav.presented().map(|a| a.title.as_str()), Some("Booking Successful!"));
        assert_eq!(nav.snapshot().len(), 2);
        let calls = host.calls();
        assert!(matches!(
            &calls[1..],
            [HostCall::Present(_), HostCall::Dismiss, HostCall::Present(_)]
        ));
    }

    #[test]
    fn disconnect_clears_everything() {
        let (mut nav, _host) = connected();
        nav.push(Template::PointOfInterest(poi_map(&Strings::default(), Coordinate::DEFAULT)));
        nav.present(confirm_alert(ServiceCategory::FlatTyre));
        nav.disconnect();
        assert!(!nav.is_connected());
        assert!(nav.snapshot().is_empty());
        assert!(nav.presented().is_none());
    }

    #[test]
    fn nothing_reaches_a_missing_host() {
        let mut nav = Navigation::default();
        assert!(!nav.present(confirm_alert(ServiceCategory::Other)));
        assert!(!nav.push(Template::PointOfInterest(poi_map(
            &Strings::default(),
            Coordinate::DEFAULT
        ))));
        nav.dismiss();
        assert!(nav.snapshot().is_empty());
    }

    #[test]
    fn pop_keeps_root() {
        let (mut nav, _host) = connected();
        assert!(nav.pop().is_none());
        nav.push(Template::PointOfInterest(poi_map(&Strings::default(), Coordinate::DEFAULT)));
        assert!(!nav.root_visible());
        assert!(nav.pop().is_some());
        assert!(nav.root_visible());
    }
}
