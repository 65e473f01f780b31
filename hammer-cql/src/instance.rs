use crate::{
    ClusterDescriptor, Config, Connection, IMPORT_PATH, ScyllaConnection, resolve_batch_type,
};
use hammer_core::{
    Error, Instance, Result, Value, Vu,
    future::{BoxFuture, FutureExt},
    take_arg,
};

/// Methods reachable from scripts.
pub const EXPORTS: &[&str] = &["session", "exec", "batch", "close"];

/// The CQL module state of a single VU.
///
/// Holds at most one connection at a time. Every operation takes `&mut self`, so an
/// instance is never used by two callers at once.
pub struct CqlInstance<C: Connection = ScyllaConnection> {
    vu: Vu,
    connection: Option<C>,
}

impl<C: Connection> CqlInstance<C> {
    pub fn new(vu: Vu) -> Self {
        Self {
            vu,
            connection: None,
        }
    }

    pub fn vu(&self) -> Vu {
        self.vu
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Open a session to the cluster described by `config`.
    ///
    /// The configuration is validated before any network I/O. Once the new session is
    /// established, the previous one (if any) is closed. When opening fails the
    /// previous session stays in place.
    pub async fn session(&mut self, config: Config) -> Result<()> {
        let descriptor = ClusterDescriptor::from_config(&config)?;
        let connection = C::connect(&descriptor).await?;
        if let Some(previous) = self.connection.replace(connection) {
            log::debug!("{}: replacing the previous session", self.vu);
            Self::release(self.vu, previous).await;
        }
        Ok(())
    }

    /// Execute a single statement.
    pub async fn exec(&mut self, statement: &str) -> Result<()> {
        self.connection()?.execute(statement).await
    }

    /// Execute `statements` as one batch, `batch_type` is `""`, `"unlogged"` or `"counter"`.
    pub async fn batch(&mut self, batch_type: &str, statements: &[String]) -> Result<()> {
        let batch_type = resolve_batch_type(batch_type);
        self.connection()?.batch(batch_type, statements).await
    }

    /// Release the session, does nothing when there is none.
    pub async fn close(&mut self) {
        if let Some(connection) = self.connection.take() {
            Self::release(self.vu, connection).await;
        }
    }

    fn connection(&mut self) -> Result<&mut C> {
        match self.connection.as_mut() {
            Some(connection) => Ok(connection),
            None => {
                let error = Error::msg("not connected to a cluster");
                log::error!("{}: {:#}", self.vu, error);
                Err(error)
            }
        }
    }

    async fn release(vu: Vu, connection: C) {
        match connection.disconnect().await {
            Ok(..) => log::debug!("{vu}: session closed"),
            Err(e) => log::error!("{vu}: {:#}", e.context("While closing the session")),
        }
    }
}

impl<C: Connection> Instance for CqlInstance<C> {
    fn exports(&self) -> &'static [&'static str] {
        EXPORTS
    }

    fn call<'s>(
        &'s mut self,
        method: &'s str,
        mut args: Vec<Value>,
    ) -> BoxFuture<'s, Result<Value>> {
        async move {
            match method {
                "session" => {
                    let config: Config = take_arg(&mut args, 0, "config")?;
                    self.session(config).await?;
                }
                "exec" => {
                    let statement: String = take_arg(&mut args, 0, "statement")?;
                    self.exec(&statement).await?;
                }
                "batch" => {
                    let batch_type: String = take_arg(&mut args, 0, "batch_type")?;
                    let statements: Vec<String> = take_arg(&mut args, 1, "statements")?;
                    self.batch(&batch_type, &statements).await?;
                }
                "close" => self.close().await,
                _ => {
                    let error = Error::msg(format!(
                        "`{method}` is not exported by `{IMPORT_PATH}`, available: {}",
                        EXPORTS.join(", ")
                    ));
                    log::error!("{}: {:#}", self.vu, error);
                    return Err(error);
                }
            }
            Ok(Value::Null)
        }
        .boxed()
    }
}
