use crate::{Config, resolve_consistency};
use hammer_core::{Error, ErrorContext, Result, parse_duration};
use openssl::ssl::{SslContext, SslFiletype, SslMethod, SslVerifyMode};
use scylla::statement::Consistency;
use std::{path::PathBuf, time::Duration};

/// Connect and request timeout applied when the configuration does not specify one.
pub const CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything needed to open a session, resolved from a [`Config`] without any I/O.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterDescriptor {
    pub hosts: Vec<String>,
    pub keyspace: String,
    pub consistency: Consistency,
    /// Requested native protocol version, `None` when the driver picks it.
    pub protocol_version: Option<i32>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub credentials: Option<Credentials>,
    pub tls: Option<TlsOptions>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Client side TLS settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsOptions {
    pub cert_path: Option<PathBuf>,
    pub key_path: Option<PathBuf>,
    pub ca_path: Option<PathBuf>,
    pub enable_host_verification: bool,
}

impl ClusterDescriptor {
    /// Validate `config` and resolve every setting.
    ///
    /// Fails when hosts or keyspace are missing, or when the timeout cannot be parsed.
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.hosts.is_empty() || config.keyspace.is_empty() {
            let error = Error::msg("hosts and keyspace are required parameters");
            log::error!("{:#}", error);
            return Err(error);
        }
        let timeout = if config.timeout.is_empty() {
            CONNECTION_TIMEOUT
        } else {
            match parse_duration(&config.timeout) {
                Ok(v) => v,
                Err(e) => {
                    let error = Error::msg(format!("invalid timeout value: {e:#}"));
                    log::error!("{:#}", error);
                    return Err(error);
                }
            }
        };
        let credentials = if !config.username.is_empty() && !config.password.is_empty() {
            Some(Credentials {
                username: config.username.clone(),
                password: config.password.clone(),
            })
        } else {
            None
        };
        // Every branch replaces the options set by the previous ones
        let tls_config = &config.tls;
        let mut tls = None;
        if !tls_config.cert_path.is_empty() && !tls_config.key_path.is_empty() {
            tls = Some(TlsOptions {
                cert_path: Some(tls_config.cert_path.clone().into()),
                key_path: Some(tls_config.key_path.clone().into()),
                ..Default::default()
            });
        }
        if !tls_config.ca_path.is_empty() {
            tls = Some(TlsOptions {
                ca_path: Some(tls_config.ca_path.clone().into()),
                ..Default::default()
            });
        }
        if tls_config.enable_host_verification {
            tls = Some(TlsOptions {
                enable_host_verification: true,
                ..Default::default()
            });
        }
        Ok(Self {
            hosts: config.hosts.clone(),
            keyspace: config.keyspace.clone(),
            consistency: resolve_consistency(&config.consistency),
            protocol_version: (config.protocol_version != 0).then_some(config.protocol_version),
            connect_timeout: timeout,
            request_timeout: timeout,
            credentials,
            tls,
        })
    }
}

impl TlsOptions {
    /// Build the OpenSSL context used by the driver for every connection.
    pub fn ssl_context(&self) -> Result<SslContext> {
        let mut builder = SslContext::builder(SslMethod::tls())?;
        if let Some(path) = &self.cert_path {
            builder
                .set_certificate_chain_file(path)
                .with_context(|| format!("While loading the certificate `{}`", path.display()))?;
        }
        if let Some(path) = &self.key_path {
            builder
                .set_private_key_file(path, SslFiletype::PEM)
                .with_context(|| format!("While loading the private key `{}`", path.display()))?;
            builder
                .check_private_key()
                .context("The private key does not match the certificate")?;
        }
        if let Some(path) = &self.ca_path {
            builder
                .set_ca_file(path)
                .with_context(|| format!("While loading the CA file `{}`", path.display()))?;
        } else if self.enable_host_verification {
            builder.set_default_verify_paths()?;
        }
        builder.set_verify(if self.enable_host_verification {
            SslVerifyMode::PEER
        } else {
            SslVerifyMode::NONE
        });
        Ok(builder.build())
    }
}
