//! Console collaborators: print what a real head unit, URL opener and
//! notification center would be asked to do.

use roadside_engine::{
    NotificationRequest, NotificationScheduler, Result, Template, TemplateHost, UrlOpener,
};

/// Prints template operations.
pub struct ConsoleHost;

fn describe(t: &Template) -> String {
    match t.poi_coordinate() {
        Some(c) => format!("{} \"{}\" at {}", t.kind(), t.title(), c),
        None => format!("{} \"{}\"", t.kind(), t.title()),
    }
}

impl TemplateHost for ConsoleHost {
    fn set_root(&self, template: &Template) {
        println!("head-unit: set_root {}", describe(template));
    }
    fn present(&self, template: &Template) {
        println!("head-unit: present {}", describe(template));
    }
    fn push(&self, template: &Template) {
        println!("head-unit: push {}", describe(template));
    }
    fn dismiss(&self) {
        println!("head-unit: dismiss");
    }
}

/// Prints URLs instead of opening them.
pub struct ConsoleOpener {
    /// Whether the primary map application counts as installed.
    pub primary_installed: bool,
    /// Deep-link base of the primary map application.
    pub primary_prefix: String,
}

impl UrlOpener for ConsoleOpener {
    fn can_open(&self, url: &str) -> bool {
        !url.starts_with(&self.primary_prefix) || self.primary_installed
    }

    fn open(&self, url: &str) -> Result<()> {
        println!("open: {url}");
        Ok(())
    }
}

/// Prints scheduled notifications.
pub struct ConsoleScheduler;

impl NotificationScheduler for ConsoleScheduler {
    fn schedule(&self, request: NotificationRequest) -> Result<()> {
        println!(
            "notification: {} / {} ({}, {})",
            request.title, request.body, request.payload.lat, request.payload.lng
        );
        Ok(())
    }
}
