pub mod app;
pub mod common;
pub mod config;
pub mod server_obj;
pub mod utils;

pub use app::registry::Registry;
pub use common::{Error, PriorInfo, Result};
pub use config::outbound::Configuration;
pub use server_obj::ServerObj;

use crate::prelude::*;

/// Parses every link and builds its configuration, pairing each descriptor
/// with the `PriorInfo` derived from `config`. Links that fail to parse are
/// skipped; build failures are returned per descriptor.
pub fn build_all(
  registry: &Registry,
  config: &config::Config,
) -> Result<Vec<(ServerObj, Result<Configuration>)>> {
  let objs = registry.parse_links_lossy(&config.links.join("\n"));
  let infos = config.prior_infos(&objs)?;
  info!("Parsed {} of {} links", objs.len(), config.links.len());

  Ok(
    objs
      .into_iter()
      .zip(infos)
      .map(|(obj, info)| {
        let conf = obj.configuration(&info);
        (obj, conf)
      })
      .collect(),
  )
}

pub mod prelude {
  pub use crate::common::{Error, PriorInfo, Result};
  pub use log::*;
  pub use smol_str::SmolStr;
}
