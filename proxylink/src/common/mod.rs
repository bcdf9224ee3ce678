mod context;
mod error;

pub use context::PriorInfo;
pub use error::{Error, Result};
