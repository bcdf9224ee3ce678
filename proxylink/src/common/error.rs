use smol_str::SmolStr;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("protocol not supported: {0}")]
    ProtocolNotSupported(String),
    #[error("unsupported shadowsocks encryption method: {0}")]
    UnsupportedMethod(SmolStr),
    #[error("unsupported obfs {obfs} of plugin {plugin}")]
    UnsupportedObfs { obfs: SmolStr, plugin: SmolStr },
    #[error("unsupported plugin {0}")]
    UnsupportedPlugin(SmolStr),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter(_))
    }
}
