use crate::{Result, Value, future::BoxFuture};
use std::fmt::{self, Display, Formatter};

/// Virtual user: the unit of execution a host runs scripts in.
///
/// Each VU receives its own [`Instance`] of every module it imports, so nothing
/// created by an extension is shared between VUs unless the extension shares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vu {
    pub id: u64,
}

impl Vu {
    pub const fn new(id: u64) -> Self {
        Self { id }
    }
}

impl Display for Vu {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "VU {}", self.id)
    }
}

/// Per-VU state of a module, reachable from scripts.
///
/// # Calls
/// - Hosts dispatch script calls through `call`, passing the script arguments as
///   JSON values in positional order.
/// - The returned future must be awaited to completion before the next call on
///   the same instance, the host never interleaves calls on one instance.
pub trait Instance: Send {
    /// Names of the methods scripts can call.
    fn exports(&self) -> &'static [&'static str];

    /// Invoke the exported `method` with positional `args`.
    ///
    /// Fails when `method` is not one of `exports()`.
    fn call<'s>(&'s mut self, method: &'s str, args: Vec<Value>) -> BoxFuture<'s, Result<Value>>;
}

/// Factory producing one [`Instance`] for each VU importing the module.
pub trait Module: Send + Sync {
    fn new_instance(&self, vu: Vu) -> Box<dyn Instance>;
}
