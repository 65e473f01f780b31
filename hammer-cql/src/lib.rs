mod config;
mod connection;
mod descriptor;
mod instance;
mod module;
mod resolve;

pub use config::*;
pub use connection::*;
pub use descriptor::*;
pub use instance::*;
pub use module::*;
pub use resolve::*;
pub use scylla::statement::{Consistency, batch::BatchType};
