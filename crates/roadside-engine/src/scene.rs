/// Role of a scene session requested by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneRole {
    /// The head-unit template interface.
    CarTemplateApplication,
    /// The phone's own window.
    Window,
}

/// Name of the scene configuration to use for `role`.
pub fn scene_configuration(role: SceneRole) -> &'static str {
    match role {
        SceneRole::CarTemplateApplication => "CarPlay",
        SceneRole::Window => "Default Configuration",
    }
}
