use crate::ClusterDescriptor;
use hammer_core::{Error, Result, truncate_long};
use scylla::{
    client::{
        execution_profile::ExecutionProfile, session::Session, session_builder::SessionBuilder,
    },
    statement::batch::{Batch, BatchType},
};
use std::future::{self, Future};

/// Native protocol version spoken by the driver.
pub const PROTOCOL_VERSION: i32 = 4;

/// A live session to a cluster, scoped to the descriptor keyspace.
///
/// # Lifecycle
/// - `connect` performs network I/O, it completes once the driver reached the cluster
///   and switched to the keyspace.
/// - `disconnect` releases the session. Dropping the value releases it as well, but
///   without reporting failures.
pub trait Connection: Send + Sized {
    /// Open a session described by `descriptor`.
    fn connect(descriptor: &ClusterDescriptor) -> impl Future<Output = Result<Self>> + Send;

    /// Run a single statement, discarding any rows.
    fn execute(&mut self, statement: &str) -> impl Future<Output = Result<()>> + Send;

    /// Run `statements` as one batch of the given type, in order.
    fn batch(
        &mut self,
        batch_type: BatchType,
        statements: &[String],
    ) -> impl Future<Output = Result<()>> + Send;

    /// Close the session.
    fn disconnect(self) -> impl Future<Output = Result<()>> + Send {
        future::ready(Ok(()))
    }
}

/// [`Connection`] backed by the `scylla` driver, compatible with both ScyllaDB and
/// Apache Cassandra.
pub struct ScyllaConnection {
    pub(crate) session: Session,
}

impl ScyllaConnection {
    /// The underlying driver session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn session_builder(descriptor: &ClusterDescriptor) -> Result<SessionBuilder> {
        let mut builder = SessionBuilder::new()
            .known_nodes(&descriptor.hosts)
            .use_keyspace(&descriptor.keyspace, true)
            .connection_timeout(descriptor.connect_timeout)
            .default_execution_profile_handle(
                ExecutionProfile::builder()
                    .consistency(descriptor.consistency)
                    .request_timeout(Some(descriptor.request_timeout))
                    .build()
                    .into_handle(),
            );
        if let Some(version) = descriptor.protocol_version
            && version != PROTOCOL_VERSION
        {
            log::warn!(
                "Protocol version {version} was requested, the driver negotiates version {PROTOCOL_VERSION}"
            );
        }
        if let Some(credentials) = &descriptor.credentials {
            builder = builder.user(&credentials.username, &credentials.password);
        }
        if let Some(tls) = &descriptor.tls {
            builder = builder.tls_context(Some(tls.ssl_context()?));
        }
        Ok(builder)
    }
}

impl Connection for ScyllaConnection {
    async fn connect(descriptor: &ClusterDescriptor) -> Result<Self> {
        let context = || {
            format!(
                "failed to create session with `{}` (keyspace `{}`)",
                descriptor.hosts.join(", "),
                descriptor.keyspace
            )
        };
        let session = match Self::session_builder(descriptor) {
            Ok(builder) => builder.build().await.map_err(Error::new),
            Err(e) => Err(e),
        };
        match session {
            Ok(session) => {
                log::debug!(
                    "Connected to `{}` using keyspace `{}`",
                    descriptor.hosts.join(", "),
                    descriptor.keyspace
                );
                Ok(Self { session })
            }
            Err(e) => {
                let error = e.context(context());
                log::error!("{:#}", error);
                Err(error)
            }
        }
    }

    async fn execute(&mut self, statement: &str) -> Result<()> {
        match self.session.query_unpaged(statement, ()).await {
            Ok(..) => Ok(()),
            Err(e) => {
                let error = Error::new(e);
                log::error!(
                    "While executing the statement:\n{}\n{:#}",
                    truncate_long!(statement),
                    error
                );
                Err(error)
            }
        }
    }

    async fn batch(&mut self, batch_type: BatchType, statements: &[String]) -> Result<()> {
        let mut batch = Batch::new(batch_type);
        for statement in statements {
            batch.append_statement(statement.as_str());
        }
        let values = vec![(); statements.len()];
        match self.session.batch(&batch, values).await {
            Ok(..) => Ok(()),
            Err(e) => {
                let error = Error::new(e);
                log::error!(
                    "While executing a {:?} batch of {} statements:\n{:#}",
                    batch_type,
                    statements.len(),
                    error
                );
                Err(error)
            }
        }
    }

    async fn disconnect(self) -> Result<()> {
        drop(self.session);
        Ok(())
    }
}
