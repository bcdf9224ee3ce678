//! Scheme name to descriptor constructors.
use std::collections::HashMap;

use itertools::Itertools;

use crate::prelude::*;
use crate::server_obj::{self, ServerObj};

pub type FromLinkFn = Box<dyn Fn(&str) -> Result<ServerObj> + Send + Sync>;
pub type EmptyFn = Box<dyn Fn() -> ServerObj + Send + Sync>;

/// Built once at startup and shared read-only afterwards.
pub struct Registry {
    from_link: HashMap<&'static str, FromLinkFn>,
    empty: HashMap<&'static str, EmptyFn>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// A registry holding every supported protocol.
    pub fn new() -> Self {
        let mut this = Self::empty();
        server_obj::do_register(&mut this);
        this
    }

    /// A registry with nothing registered.
    pub fn empty() -> Self {
        Registry {
            from_link: HashMap::new(),
            empty: HashMap::new(),
        }
    }

    pub fn register_link_parser<F>(&mut self, scheme: &'static str, parse_fn: F)
    where
        F: Fn(&str) -> Result<ServerObj> + Send + Sync + 'static,
    {
        if self.from_link.contains_key(scheme) {
            panic!("Duplicate link parser {}", scheme);
        }
        info!("Registering link parser {}", scheme);
        self.from_link.insert(scheme, Box::new(parse_fn));
    }

    pub fn register_empty<F>(&mut self, scheme: &'static str, new_fn: F)
    where
        F: Fn() -> ServerObj + Send + Sync + 'static,
    {
        if self.empty.contains_key(scheme) {
            panic!("Duplicate empty factory {}", scheme);
        }
        self.empty.insert(scheme, Box::new(new_fn));
    }

    pub fn lookup(&self, scheme: &str) -> Option<(&FromLinkFn, &EmptyFn)> {
        Some((self.from_link.get(scheme)?, self.empty.get(scheme)?))
    }

    pub fn link_parser(&self, scheme: &str) -> Result<&FromLinkFn> {
        self.from_link
            .get(scheme)
            .ok_or_else(|| Error::ProtocolNotSupported(scheme.to_owned()))
    }

    pub fn empty_factory(&self, scheme: &str) -> Result<&EmptyFn> {
        self.empty
            .get(scheme)
            .ok_or_else(|| Error::ProtocolNotSupported(scheme.to_owned()))
    }

    pub fn schemes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.from_link.keys().copied().sorted()
    }

    /// Dispatches a share link to the parser registered for its scheme.
    pub fn from_link(&self, link: &str) -> Result<ServerObj> {
        let link = link.trim();
        let scheme = link
            .split_once("://")
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .ok_or_else(|| Error::InvalidParameter(format!("missing scheme in {}", link)))?;
        (self.link_parser(&scheme)?)(link)
    }

    pub fn new_empty(&self, scheme: &str) -> Result<ServerObj> {
        Ok((self.empty_factory(scheme)?)())
    }

    /// Instantiates a descriptor from a persisted JSON record carrying a
    /// `protocol` field.
    pub fn new_from_json(&self, json: &str) -> Result<ServerObj> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let protocol = value
            .get("protocol")
            .and_then(|p| p.as_str())
            .ok_or_else(|| Error::InvalidParameter("missing protocol in server record".into()))?;
        let mut obj = self.new_empty(protocol)?;
        obj.fill_from_json(value)?;
        Ok(obj)
    }

    /// Parses one link per line, skipping blank lines and links that fail.
    pub fn parse_links_lossy(&self, text: &str) -> Vec<ServerObj> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| match self.from_link(line) {
                Ok(obj) => Some(obj),
                Err(err) => {
                    warn!("Skipping link {}: {}", line, err);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const LINK: &str = "ss://YWVzLTI1Ni1nY206cGFzcw==@example.com:8388#MyServer";

    #[test]
    fn aliases_resolve_identically() {
        let registry = Registry::new();
        assert_eq!(registry.schemes().collect::<Vec<_>>(), vec!["shadowsocks", "ss"]);

        let via_ss = registry.from_link(LINK).unwrap();
        let via_long = registry
            .from_link(&LINK.replacen("ss://", "shadowsocks://", 1))
            .unwrap();
        assert_eq!(via_ss, via_long);
        assert_eq!(registry.new_empty("ss").unwrap(), registry.new_empty("shadowsocks").unwrap());
    }

    #[test]
    fn unregistered_scheme_is_not_found() {
        let registry = Registry::new();
        assert!(registry.lookup("vmess").is_none());
        assert!(matches!(
            registry.from_link("vmess://abc"),
            Err(Error::ProtocolNotSupported(s)) if s == "vmess"
        ));
        assert!(matches!(
            registry.new_empty("trojan"),
            Err(Error::ProtocolNotSupported(_))
        ));
        assert!(registry.from_link("example.com:8388").unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn partial_registry() {
        let mut registry = Registry::empty();
        assert!(registry.lookup("ss").is_none());
        server_obj::do_register(&mut registry);
        let (parse, empty) = registry.lookup("ss").unwrap();
        assert_eq!(parse(LINK).unwrap().name(), "MyServer");
        assert_eq!(empty().name(), "");
    }

    #[test]
    #[should_panic(expected = "Duplicate link parser shadowsocks")]
    fn duplicate_registration_panics() {
        let mut registry = Registry::new();
        server_obj::do_register(&mut registry);
    }

    #[test]
    fn from_json_record() {
        let registry = Registry::new();
        let obj = registry
            .new_from_json(
                r#"{"protocol":"shadowsocks","name":"n","server":"1.1.1.1","port":443,
                    "password":"pw","cipher":"chacha20-ietf-poly1305"}"#,
            )
            .unwrap();
        assert_eq!(obj.hostname(), "1.1.1.1");
        assert!(!obj.need_plugin());

        assert!(registry.new_from_json(r#"{"name":"n"}"#).unwrap_err().is_invalid_parameter());
        assert!(matches!(
            registry.new_from_json(r#"{"protocol":"vmess"}"#),
            Err(Error::ProtocolNotSupported(_))
        ));
    }

    #[test]
    fn lossy_batch() {
        let registry = Registry::new();
        let text = format!("{}\n\n  vmess://abc  \nss://!!!\n{}\n", LINK, LINK);
        assert_eq!(registry.parse_links_lossy(&text).len(), 2);
    }
}
