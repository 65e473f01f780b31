use crate::{Error, Instance, Module, Result, Vu};
use std::{
    collections::BTreeMap,
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

/// Modules available to scripts, keyed by import path.
///
/// The host owns the registry: extensions add themselves through their `register`
/// function before the run starts, then the host calls `instantiate` once for every
/// VU importing a path.
#[derive(Default, Clone)]
pub struct Registry {
    modules: BTreeMap<&'static str, Arc<dyn Module>>,
}

impl Registry {
    pub fn new() -> Self {
        Default::default()
    }

    /// Register `module` under `path`.
    ///
    /// Fails if another module already uses the same path.
    pub fn register(&mut self, path: &'static str, module: impl Module + 'static) -> Result<()> {
        if self.modules.contains_key(path) {
            let error = Error::msg(format!("A module is already registered as `{path}`"));
            log::error!("{:#}", error);
            return Err(error);
        }
        log::debug!("Registered module `{path}`");
        self.modules.insert(path, Arc::new(module));
        Ok(())
    }

    /// Create the instance of the module at `path` for `vu`.
    pub fn instantiate(&self, path: &str, vu: Vu) -> Result<Box<dyn Instance>> {
        let Some(module) = self.modules.get(path) else {
            let error = Error::msg(format!("Unknown module `{path}`"))
                .context(format!("While instantiating the modules of {vu}"));
            log::error!("{:#}", error);
            return Err(error);
        };
        Ok(module.new_instance(vu))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.modules.contains_key(path)
    }

    /// Registered import paths, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.modules.keys().copied()
    }
}

impl Debug for Registry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.modules.keys()).finish()
    }
}
