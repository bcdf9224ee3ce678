use serde::Serialize;
use smol_str::SmolStr;

/// A single remote endpoint in an outbound's server list.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Server {
    pub address: SmolStr,
    pub port: u16,
    pub method: SmolStr,
    pub password: String,
}

#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
}

/// Engine-facing outbound description.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct OutboundObject {
    pub tag: SmolStr,
    pub protocol: SmolStr,
    pub settings: Settings,
}

/// Result of building a descriptor against a `PriorInfo`.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub core_outbound: OutboundObject,
    /// Comma-joined `scheme://host:port[?query]` legs, empty without a plugin.
    pub plugin_chain: String,
    pub udp_support: bool,
}
