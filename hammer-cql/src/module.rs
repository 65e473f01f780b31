use crate::{Connection, CqlInstance, ScyllaConnection};
use hammer_core::{Instance, Module, Registry, Result, Vu};
use std::{fmt::Debug, marker::PhantomData};

/// Import path scripts use to reach the CQL module.
pub const IMPORT_PATH: &str = "hammer/x/cql";

/// Module entry for Cassandra / ScyllaDB clusters.
///
/// Stateless, it only creates a fresh [`CqlInstance`] for every VU. The connection
/// type defaults to the `scylla` driver.
pub struct CqlModule<C: Connection = ScyllaConnection> {
    _connection: PhantomData<fn() -> C>,
}

impl<C: Connection> CqlModule<C> {
    pub const fn new() -> Self {
        Self {
            _connection: PhantomData,
        }
    }
}

impl<C: Connection> Default for CqlModule<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connection> Debug for CqlModule<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(IMPORT_PATH)
    }
}

impl<C: Connection + 'static> Module for CqlModule<C> {
    fn new_instance(&self, vu: Vu) -> Box<dyn Instance> {
        log::debug!("{vu}: new `{IMPORT_PATH}` instance");
        Box::new(CqlInstance::<C>::new(vu))
    }
}

/// Register the CQL module under [`IMPORT_PATH`].
pub fn register(registry: &mut Registry) -> Result<()> {
    registry.register(IMPORT_PATH, CqlModule::<ScyllaConnection>::new())
}
