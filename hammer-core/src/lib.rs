mod args;
mod duration;
mod module;
mod registry;
mod util;

pub use ::anyhow::Context as ErrorContext;
pub use args::*;
pub use duration::*;
pub use module::*;
pub use registry::*;
pub use util::*;
pub use ::futures::future;
pub use ::serde_json::{Value, json};

/// Result type.
pub type Result<T> = anyhow::Result<T>;
/// Error type.
pub type Error = anyhow::Error;

pub use ::indoc;
