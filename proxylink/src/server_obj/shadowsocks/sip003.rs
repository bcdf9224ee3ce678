//! SIP003 plugin strings, e.g. `obfs-local;obfs=http;obfs-host=cdn.example.com`.
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

pub const SIMPLE_OBFS: &str = "simple-obfs";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Sip003Opts {
    #[serde(default)]
    pub obfs: SmolStr,
    #[serde(default)]
    pub host: SmolStr,
    /// Always starts with `/` when set from a plugin string.
    #[serde(default)]
    pub uri: SmolStr,
}

/// An empty `name` means no plugin is configured.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Sip003 {
    #[serde(default)]
    pub name: SmolStr,
    #[serde(default)]
    pub opts: Sip003Opts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginKind<'a> {
    None,
    SimpleObfs,
    Unrecognized(&'a str),
}

fn canonical_name(name: &str) -> &str {
    match name {
        "obfs-local" | "simpleobfs" => SIMPLE_OBFS,
        _ => name,
    }
}

fn normalize_uri(uri: &str) -> SmolStr {
    if uri.starts_with('/') {
        uri.into()
    } else {
        format!("/{}", uri).into()
    }
}

impl Sip003Opts {
    /// Parses `key=value` fields separated by `;`. Unknown keys are skipped.
    pub fn parse(opts: &str) -> Self {
        let mut parsed = Self::default();
        for field in opts.split(';').filter(|f| !f.is_empty()) {
            let (key, value) = match field.split_once('=') {
                Some(kv) => kv,
                None => {
                    debug!("Ignoring SIP003 option without value: {}", field);
                    continue;
                }
            };
            match key {
                "obfs" => parsed.obfs = value.into(),
                "obfs-path" | "obfs-uri" => parsed.uri = normalize_uri(value),
                "obfs-host" => parsed.host = value.into(),
                _ => debug!("Ignoring unknown SIP003 option {}", key),
            }
        }
        parsed
    }
}

impl Sip003 {
    pub fn parse(plugin: &str) -> Self {
        let (name, opts) = plugin.split_once(';').unwrap_or((plugin, ""));
        Self {
            name: canonical_name(name).into(),
            opts: Sip003Opts::parse(opts),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    pub fn kind(&self) -> PluginKind<'_> {
        match self.name.as_str() {
            "" => PluginKind::None,
            SIMPLE_OBFS => PluginKind::SimpleObfs,
            other => PluginKind::Unrecognized(other),
        }
    }
}

impl fmt::Display for Sip003 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        let fields = [
            ("obfs", &self.opts.obfs),
            ("obfs-host", &self.opts.host),
            ("obfs-uri", &self.opts.uri),
        ];
        for (key, value) in fields.iter().filter(|(_, v)| !v.is_empty()) {
            write!(f, ";{}={}", key, value)?;
        }
        Ok(())
    }
}
