use crate::{Result, notification::NotificationRequest, template::Template};

// ---- Host collaborator abstractions ----

/// Handle to the connected head-unit interface.
///
/// Every call is fire-and-forget. Implementations must not call back into the
/// engine synchronously; user input is delivered later as a separate event.
pub trait TemplateHost: Send + Sync {
    /// Replace the whole stack with `template` as the root.
    fn set_root(&self, template: &Template);
    /// Present a modal template above the current stack.
    fn present(&self, template: &Template);
    /// Push a template onto the navigation stack.
    fn push(&self, template: &Template);
    /// Dismiss the presented modal template.
    fn dismiss(&self);
}

/// Opens URLs on the device. Only ever called from the UI-owning context.
pub trait UrlOpener: Send + Sync {
    /// Whether an application is installed that can handle `url`.
    fn can_open(&self, url: &str) -> bool;
    /// Ask the system to open `url`.
    fn open(&self, url: &str) -> Result<()>;
}

/// Schedules OS-level local notifications.
pub trait NotificationScheduler: Send + Sync {
    /// Deliver `request` immediately.
    fn schedule(&self, request: NotificationRequest) -> Result<()>;
}
