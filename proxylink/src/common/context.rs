use smol_str::SmolStr;

/// Routing context supplied by the caller when turning a descriptor into an
/// outbound configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorInfo {
    /// Outbound identifier in the engine's config.
    pub tag: SmolStr,
    /// Local port the plugin subprocess will bind.
    pub plugin_port: u16,
}

impl PriorInfo {
    pub fn new<T: Into<SmolStr>>(tag: T, plugin_port: u16) -> Self {
        Self {
            tag: tag.into(),
            plugin_port,
        }
    }
}
