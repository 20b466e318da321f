//! Store connection configuration
//!
//! Resolution order used by [`StoreConfig::from_env`]:
//! 1. `SURREALDB_ENDPOINT` + credentials: authenticated remote connection
//! 2. `SURREALDB_URL`: unauthenticated connection to that URL
//! 3. Local on-disk persistence under [`DEFAULT_LOCAL_PATH`]

/// Namespace used when `SURREALDB_NAMESPACE` is unset
pub const DEFAULT_NAMESPACE: &str = "kyc";

/// Database used when `SURREALDB_DATABASE` is unset
pub const DEFAULT_DATABASE: &str = "ledger";

/// Directory for local persistence when nothing else is configured
pub const DEFAULT_LOCAL_PATH: &str = ".kyc/db";

/// Credentials for an authenticated SurrealDB connection
#[derive(Clone)]
pub struct Credentials {
    /// Database username
    pub username: String,
    /// Database password
    pub password: String,
    /// Whether this is a root user (true) or database user (false)
    pub is_root: bool,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("is_root", &self.is_root)
            .finish()
    }
}

/// Connection settings for [`crate::SurrealRecordStore`]
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Engine URL (e.g. "mem://", "surrealkv://.kyc/db", "wss://host")
    pub endpoint: String,
    /// Sign-in credentials, if the endpoint requires them
    pub credentials: Option<Credentials>,
    /// Namespace (default: "kyc")
    pub namespace: String,
    /// Database name (default: "ledger")
    pub database: String,
}

impl StoreConfig {
    /// Unauthenticated configuration for any engine URL
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            credentials: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }

    /// Volatile in-process database
    pub fn in_memory() -> Self {
        Self::new("mem://")
    }

    /// On-disk SurrealKV database rooted at `path`
    pub fn local(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(format!("surrealkv://{}", path.as_ref().display()))
    }

    /// Authenticated configuration for a database user
    pub fn remote(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let mut config = Self::new(endpoint);
        config.credentials = Some(Credentials {
            username: username.into(),
            password: password.into(),
            is_root: false,
        });
        config
    }

    /// Set custom namespace
    pub fn with_namespace(mut self, ns: impl Into<String>) -> Self {
        self.namespace = ns.into();
        self
    }

    /// Set custom database
    pub fn with_database(mut self, db: impl Into<String>) -> Self {
        self.database = db.into();
        self
    }

    /// Set whether the credentials belong to a root user
    pub fn with_root(mut self, is_root: bool) -> Self {
        if let Some(credentials) = self.credentials.as_mut() {
            credentials.is_root = is_root;
        }
        self
    }

    /// Whether the endpoint stores data on the local filesystem
    pub fn is_local_path(&self) -> bool {
        self.endpoint.starts_with("surrealkv://") || self.endpoint.starts_with("rocksdb://")
    }

    /// Create from environment variables
    ///
    /// Reads:
    /// - SURREALDB_ENDPOINT, SURREALDB_USERNAME, SURREALDB_PASSWORD (remote)
    /// - SURREALDB_ROOT (optional, default: "false") - set to "true" for root users
    /// - SURREALDB_URL (fallback, unauthenticated)
    /// - SURREALDB_NAMESPACE (optional, default: "kyc")
    /// - SURREALDB_DATABASE (optional, default: "ledger")
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same resolution as [`StoreConfig::from_env`] over an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let remote = match (
            lookup("SURREALDB_ENDPOINT"),
            lookup("SURREALDB_USERNAME"),
            lookup("SURREALDB_PASSWORD"),
        ) {
            (Some(endpoint), Some(username), Some(password)) => {
                let is_root = lookup("SURREALDB_ROOT")
                    .map(|v| v.eq_ignore_ascii_case("true"))
                    .unwrap_or(false);
                Some(Self::remote(endpoint, username, password).with_root(is_root))
            }
            _ => None,
        };

        let config = remote
            .or_else(|| lookup("SURREALDB_URL").map(Self::new))
            .unwrap_or_else(|| Self::local(DEFAULT_LOCAL_PATH));

        let namespace = lookup("SURREALDB_NAMESPACE").unwrap_or_else(|| DEFAULT_NAMESPACE.into());
        let database = lookup("SURREALDB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.into());
        config.with_namespace(namespace).with_database(database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn falls_back_to_local_persistence() {
        let config = StoreConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.endpoint, "surrealkv://.kyc/db");
        assert!(config.credentials.is_none());
        assert!(config.is_local_path());
        assert_eq!(config.namespace, DEFAULT_NAMESPACE);
        assert_eq!(config.database, DEFAULT_DATABASE);
    }

    #[test]
    fn url_is_used_when_no_credentials() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("SURREALDB_URL", "mem://"),
            ("SURREALDB_ENDPOINT", "wss://ignored"),
        ]));
        assert_eq!(config.endpoint, "mem://");
        assert!(config.credentials.is_none());
    }

    #[test]
    fn remote_configuration_with_root_user() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("SURREALDB_ENDPOINT", "wss://ledger.example.com"),
            ("SURREALDB_USERNAME", "admin"),
            ("SURREALDB_PASSWORD", "secret"),
            ("SURREALDB_ROOT", "TRUE"),
            ("SURREALDB_NAMESPACE", "bank"),
        ]));
        assert_eq!(config.endpoint, "wss://ledger.example.com");
        assert_eq!(config.namespace, "bank");
        let credentials = config.credentials.expect("credentials");
        assert_eq!(credentials.username, "admin");
        assert!(credentials.is_root);
    }

    #[test]
    fn debug_output_redacts_password() {
        let config = StoreConfig::remote("wss://host", "user", "hunter2");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
