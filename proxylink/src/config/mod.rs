pub mod outbound;

use serde::Deserialize;
use smol_str::SmolStr;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::prelude::*;
use crate::server_obj::ServerObj;

fn default_tag() -> SmolStr {
    "proxy".into()
}

fn default_plugin_port() -> u16 {
    1080
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_tag")]
    pub tag: SmolStr,
    /// First local port handed to a plugin; later plugins count upwards.
    #[serde(default = "default_plugin_port")]
    pub plugin_port: u16,
    #[serde(default)]
    pub links: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tag: default_tag(),
            plugin_port: default_plugin_port(),
            links: Vec::new(),
        }
    }
}

impl Config {
    /// One `PriorInfo` per descriptor. Tags get a `-<index>` suffix when
    /// there is more than one descriptor, and only descriptors that need a
    /// plugin consume a plugin port.
    pub fn prior_infos(&self, objs: &[ServerObj]) -> Result<Vec<PriorInfo>> {
        let mut next_port = self.plugin_port;
        let mut infos = Vec::with_capacity(objs.len());
        for (i, obj) in objs.iter().enumerate() {
            let tag: SmolStr = if objs.len() > 1 {
                format!("{}-{}", self.tag, i).into()
            } else {
                self.tag.clone()
            };
            infos.push(PriorInfo::new(tag, next_port));
            if obj.need_plugin() {
                next_port = next_port.checked_add(1).ok_or_else(|| {
                    Error::InvalidParameter(format!("plugin ports exhausted at {}", next_port))
                })?;
            }
        }
        Ok(infos)
    }
}

pub async fn load_file(path: &str) -> Result<Config> {
    let mut file = File::open(path).await?;
    let mut buffer = String::new();

    file.read_to_string(&mut buffer).await?;
    load_string(&buffer)
}

pub fn load_string(input: &str) -> Result<Config> {
    Ok(serde_yaml::from_str(input)?)
}
