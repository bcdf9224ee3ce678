//! Protocol descriptors parsed from share links.
pub mod shadowsocks;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::app::registry::Registry;
use crate::config::outbound::Configuration;
use crate::prelude::*;
use shadowsocks::Shadowsocks;

pub fn do_register(registry: &mut Registry) {
    shadowsocks::register(registry);
}

/// A server descriptor for one of the supported protocols.
///
/// Serialized with a `protocol` field naming the variant, which is how
/// persisted server records are stored.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "protocol")]
pub enum ServerObj {
    #[serde(rename = "shadowsocks")]
    Shadowsocks(Shadowsocks),
}

impl ServerObj {
    pub fn hostname(&self) -> &str {
        match self {
            Self::Shadowsocks(s) => &s.server,
        }
    }

    pub fn port(&self) -> u16 {
        match self {
            Self::Shadowsocks(s) => s.port,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Shadowsocks(s) => &s.name,
        }
    }

    pub fn set_name<T: Into<String>>(&mut self, name: T) {
        match self {
            Self::Shadowsocks(s) => s.name = name.into(),
        }
    }

    pub fn protocol(&self) -> &'static str {
        match self {
            Self::Shadowsocks(_) => shadowsocks::PROTOCOL,
        }
    }

    pub fn proto_to_show(&self) -> String {
        match self {
            Self::Shadowsocks(s) => s.proto_to_show(),
        }
    }

    pub fn need_plugin(&self) -> bool {
        match self {
            Self::Shadowsocks(s) => s.need_plugin(),
        }
    }

    pub fn export_to_url(&self) -> Result<String> {
        match self {
            Self::Shadowsocks(s) => s.export_to_url(),
        }
    }

    pub fn configuration(&self, info: &PriorInfo) -> Result<Configuration> {
        match self {
            Self::Shadowsocks(s) => s.configuration(info),
        }
    }

    /// Overwrites the fields of this (usually empty) descriptor from a
    /// persisted JSON record. The variant never changes.
    pub fn fill_from_json(&mut self, value: serde_json::Value) -> Result<()> {
        match self {
            Self::Shadowsocks(s) => *s = serde_json::from_value(value)?,
        }
        Ok(())
    }
}

impl fmt::Display for ServerObj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {}",
            self.name(),
            self.proto_to_show(),
            crate::utils::join_host_port(self.hostname(), self.port())
        )
    }
}

#[cfg(test)]
mod test {
    use super::shadowsocks::sip003::Sip003;
    use super::*;
    use serde_json::json;

    fn example() -> ServerObj {
        ServerObj::Shadowsocks(Shadowsocks {
            name: "MyServer".into(),
            server: "example.com".into(),
            port: 8388,
            password: "pass".into(),
            cipher: "aes-256-gcm".into(),
            plugin: Sip003::parse("obfs-local;obfs=tls;obfs-host=x"),
        })
    }

    #[test]
    fn accessors() {
        let mut obj = example();
        assert_eq!(obj.hostname(), "example.com");
        assert_eq!(obj.port(), 8388);
        assert_eq!(obj.protocol(), "shadowsocks");
        assert!(obj.need_plugin());
        obj.set_name("Renamed");
        assert_eq!(obj.name(), "Renamed");
        assert_eq!(
            obj.to_string(),
            "Renamed (shadowsocks(aes-256-gcm+tls)) example.com:8388"
        );
    }

    #[test]
    fn persisted_record_shape() {
        let value = serde_json::to_value(example()).unwrap();
        assert_eq!(
            value,
            json!({
                "protocol": "shadowsocks",
                "name": "MyServer",
                "server": "example.com",
                "port": 8388,
                "password": "pass",
                "cipher": "aes-256-gcm",
                "plugin": {
                    "name": "simple-obfs",
                    "opts": { "obfs": "tls", "host": "x", "uri": "" }
                }
            })
        );
        let back: ServerObj = serde_json::from_value(value).unwrap();
        assert_eq!(back, example());
    }

    #[test]
    fn fill_keeps_variant() {
        let mut obj = ServerObj::Shadowsocks(Shadowsocks::default());
        obj.fill_from_json(serde_json::to_value(example()).unwrap())
            .unwrap();
        assert_eq!(obj, example());

        let err = obj.fill_from_json(json!({ "server": "a" })).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
