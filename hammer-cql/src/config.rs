use serde::{Deserialize, Serialize};

/// Connection settings passed by the script to `session`.
///
/// Every field is optional on the script side and falls back to its zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Connect and request timeout, a duration string like `"5s"`. Empty means 10 seconds.
    pub timeout: String,
    /// Contact points, `host` or `host:port`.
    pub hosts: Vec<String>,
    pub username: String,
    pub password: String,
    pub keyspace: String,
    /// Native protocol version, `0` leaves the choice to the driver.
    pub protocol_version: i32,
    /// Consistency token such as `"local_quorum"`, unknown tokens mean quorum.
    pub consistency: String,
    pub tls: TlsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TlsConfig {
    pub cert_path: String,
    pub key_path: String,
    pub ca_path: String,
    pub enable_host_verification: bool,
}
