#[cfg(test)]
mod tests {
    use hammer_core::{Error, Instance, Registry, Result, Value, Vu, json};
    use hammer_cql::{
        BatchType, ClusterDescriptor, Connection, CqlInstance, CqlModule, IMPORT_PATH,
    };
    use hammer_tests::{init_logs, offline};
    use std::{
        collections::HashMap,
        sync::{Arc, LazyLock, Mutex},
    };

    type Journal = Arc<Mutex<Vec<String>>>;

    /// Journals of the mock connections, keyed by the first host.
    static JOURNALS: LazyLock<Mutex<HashMap<String, Journal>>> = LazyLock::new(Default::default);

    fn journal(host: &str) -> Journal {
        JOURNALS
            .lock()
            .unwrap()
            .entry(host.to_string())
            .or_default()
            .clone()
    }

    fn entries(host: &str) -> Vec<String> {
        journal(host).lock().unwrap().clone()
    }

    struct MockConnection {
        keyspace: String,
        journal: Journal,
    }

    impl Connection for MockConnection {
        async fn connect(descriptor: &ClusterDescriptor) -> Result<Self> {
            let host = &descriptor.hosts[0];
            if host.starts_with("unreachable") {
                return Err(Error::msg("Connection refused").context("failed to create session"));
            }
            let journal = journal(host);
            journal
                .lock()
                .unwrap()
                .push(format!("connect {}", descriptor.keyspace));
            Ok(Self {
                keyspace: descriptor.keyspace.clone(),
                journal,
            })
        }

        async fn execute(&mut self, statement: &str) -> Result<()> {
            if statement.starts_with("SELEC ") {
                return Err(Error::msg("line 1:0 no viable alternative at input 'SELEC'"));
            }
            self.journal
                .lock()
                .unwrap()
                .push(format!("execute {} {statement}", self.keyspace));
            Ok(())
        }

        async fn batch(&mut self, batch_type: BatchType, statements: &[String]) -> Result<()> {
            self.journal.lock().unwrap().push(format!(
                "batch {} {batch_type:?} {}",
                self.keyspace,
                statements.join(" | ")
            ));
            Ok(())
        }

        async fn disconnect(self) -> Result<()> {
            self.journal
                .lock()
                .unwrap()
                .push(format!("disconnect {}", self.keyspace));
            Ok(())
        }
    }

    fn config(host: &str, keyspace: &str) -> Value {
        json!({ "hosts": [host], "keyspace": keyspace })
    }

    #[tokio::test]
    async fn guard_without_cluster() {
        init_logs();
        let mut instance = CqlInstance::<MockConnection>::new(Vu::new(1));
        offline(&mut instance).await;
        assert!(!instance.is_connected());
    }

    #[tokio::test]
    async fn rejected_configuration_does_not_connect() {
        init_logs();
        let mut instance = CqlInstance::<MockConnection>::new(Vu::new(1));
        let error = instance
            .call("session", vec![json!({ "hosts": ["rejected:9042"] })])
            .await
            .expect_err("Keyspace is missing");
        assert_eq!(error.to_string(), "hosts and keyspace are required parameters");
        let error = instance
            .call(
                "session",
                vec![json!({ "hosts": ["rejected:9042"], "keyspace": "ks", "timeout": "5 s" })],
            )
            .await
            .expect_err("Timeout is malformed");
        assert!(error.to_string().starts_with("invalid timeout value: "));
        assert!(entries("rejected:9042").is_empty());
        assert!(!instance.is_connected());
    }

    #[tokio::test]
    async fn exec_and_batch() {
        init_logs();
        let mut instance = CqlInstance::<MockConnection>::new(Vu::new(2));
        instance
            .call("session", vec![config("exec:9042", "shop")])
            .await
            .expect("session failed");
        assert!(instance.is_connected());
        instance
            .call("exec", vec![json!("TRUNCATE orders")])
            .await
            .expect("exec failed");
        instance
            .call(
                "batch",
                vec![json!(""), json!(["INSERT 1", "INSERT 2", "INSERT 3"])],
            )
            .await
            .expect("batch failed");
        instance
            .call("batch", vec![json!("unlogged"), json!(["INSERT 4"])])
            .await
            .expect("batch failed");
        instance
            .call("batch", vec![json!("counter"), json!(["UPDATE c"])])
            .await
            .expect("batch failed");
        instance
            .call("batch", vec![json!("COUNTER"), json!([])])
            .await
            .expect("batch failed");
        let error = instance
            .call("exec", vec![json!("SELEC * FROM orders")])
            .await
            .expect_err("The statement is invalid");
        assert_eq!(
            error.to_string(),
            "line 1:0 no viable alternative at input 'SELEC'"
        );
        instance.call("close", vec![]).await.expect("close failed");
        assert_eq!(
            entries("exec:9042"),
            [
                "connect shop",
                "execute shop TRUNCATE orders",
                "batch shop Logged INSERT 1 | INSERT 2 | INSERT 3",
                "batch shop Unlogged INSERT 4",
                "batch shop Counter UPDATE c",
                "batch shop Logged ",
                "disconnect shop",
            ]
        );
    }

    #[tokio::test]
    async fn session_replaces_previous_handle() {
        init_logs();
        let mut instance = CqlInstance::<MockConnection>::new(Vu::new(3));
        instance
            .session(serde_json::from_value(config("replace:9042", "system")).unwrap())
            .await
            .expect("session failed");
        instance
            .session(serde_json::from_value(config("replace:9042", "test_keyspace")).unwrap())
            .await
            .expect("session failed");
        instance.exec("SELECT now() FROM local").await.expect("exec failed");
        assert_eq!(
            entries("replace:9042"),
            [
                "connect system",
                "connect test_keyspace",
                "disconnect system",
                "execute test_keyspace SELECT now() FROM local",
            ]
        );

        // A failed attempt keeps the current session
        let error = instance
            .session(serde_json::from_value(config("unreachable:9042", "other")).unwrap())
            .await
            .expect_err("The host is unreachable");
        assert!(format!("{error:#}").starts_with("failed to create session"));
        assert!(instance.is_connected());
        instance.exec("SELECT 1").await.expect("exec failed");
        assert_eq!(
            entries("replace:9042").last().map(String::as_str),
            Some("execute test_keyspace SELECT 1")
        );
    }

    #[tokio::test]
    async fn close_clears_the_handle() {
        init_logs();
        let mut instance = CqlInstance::<MockConnection>::new(Vu::new(4));
        instance.close().await;
        instance
            .session(serde_json::from_value(config("close:9042", "ks")).unwrap())
            .await
            .expect("session failed");
        instance.close().await;
        instance.close().await;
        assert!(!instance.is_connected());
        let error = instance.exec("SELECT 1").await.expect_err("Closed");
        assert_eq!(error.to_string(), "not connected to a cluster");
        let error = instance
            .batch("", &["SELECT 1".to_string()])
            .await
            .expect_err("Closed");
        assert_eq!(error.to_string(), "not connected to a cluster");
        assert_eq!(entries("close:9042"), ["connect ks", "disconnect ks"]);
    }

    #[tokio::test]
    async fn registry_creates_independent_instances() {
        init_logs();
        let mut registry = Registry::new();
        registry
            .register(IMPORT_PATH, CqlModule::<MockConnection>::new())
            .expect("register failed");
        assert!(
            registry
                .register(IMPORT_PATH, CqlModule::<MockConnection>::new())
                .is_err()
        );
        assert_eq!(registry.paths().collect::<Vec<_>>(), [IMPORT_PATH]);

        let mut first = registry.instantiate(IMPORT_PATH, Vu::new(1)).unwrap();
        let mut second = registry.instantiate(IMPORT_PATH, Vu::new(2)).unwrap();
        first
            .call("session", vec![config("registry:9042", "first")])
            .await
            .expect("session failed");
        let error = second
            .call("exec", vec![json!("SELECT 1")])
            .await
            .expect_err("The second VU has no session");
        assert_eq!(error.to_string(), "not connected to a cluster");
        first
            .call("exec", vec![json!("SELECT 1")])
            .await
            .expect("exec failed");
        assert!(registry.instantiate("hammer/x/sql", Vu::new(3)).is_err());
    }
}
