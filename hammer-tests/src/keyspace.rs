use hammer::{Instance, Value, indoc::indoc, json};

pub const TEST_KEYSPACE: &str = "test_keyspace";

/// Open a session on the `system` keyspace and read the local node row.
pub async fn system_local(instance: &mut dyn Instance, hosts: &[String]) {
    instance
        .call("session", vec![json!({ "hosts": hosts, "keyspace": "system" })])
        .await
        .expect("Could not open a session on the system keyspace");
    instance
        .call("exec", vec![json!("SELECT * FROM local")])
        .await
        .expect("Could not read system.local");
    instance.call("close", vec![]).await.expect("close failed");
}

/// Create `test_keyspace`, switch to it and fill the `users` table with four rows.
///
/// The caller verifies the row count with its own driver.
pub async fn users(instance: &mut dyn Instance, hosts: &[String]) {
    instance
        .call("session", vec![json!({ "hosts": hosts, "keyspace": "system" })])
        .await
        .expect("Could not open a session on the system keyspace");
    instance
        .call(
            "exec",
            vec![json!(indoc! {r#"
                CREATE KEYSPACE IF NOT EXISTS test_keyspace
                WITH replication = {'class':'SimpleStrategy','replication_factor':1};
            "#})],
        )
        .await
        .expect("Could not create the keyspace");

    // Replaces the session on the system keyspace
    instance
        .call(
            "session",
            vec![json!({
                "hosts": hosts,
                "keyspace": TEST_KEYSPACE,
                "timeout": "30s",
                "consistency": "one",
            })],
        )
        .await
        .expect("Could not open a session on the test keyspace");
    instance
        .call("exec", vec![json!("DROP TABLE IF EXISTS users")])
        .await
        .expect("Could not drop the table");
    instance
        .call(
            "exec",
            vec![json!(indoc! {r#"
                CREATE TABLE IF NOT EXISTS users (
                    id INT PRIMARY KEY,
                    name TEXT
                );
            "#})],
        )
        .await
        .expect("Could not create the table");
    instance
        .call(
            "exec",
            vec![json!("INSERT INTO users (id, name) VALUES (1, 'User1');")],
        )
        .await
        .expect("Could not insert the first row");
    instance
        .call(
            "batch",
            vec![
                json!(""),
                json!([
                    "INSERT INTO users (id, name) VALUES (2, 'User2');",
                    "INSERT INTO users (id, name) VALUES (3, 'User3');",
                    "INSERT INTO users (id, name) VALUES (4, 'User4');",
                ]),
            ],
        )
        .await
        .expect("Could not run the logged batch");
    instance
        .call(
            "batch",
            vec![
                json!("unlogged"),
                json!(["UPDATE users SET name = 'Someone' WHERE id = 4;"]),
            ],
        )
        .await
        .expect("Could not run the unlogged batch");

    // Syntax errors come back from the cluster
    let error = instance
        .call("exec", vec![json!("SELEC id FROM users")])
        .await
        .expect_err("An invalid statement must fail");
    assert!(!error.to_string().is_empty());

    instance.call("close", vec![]).await.expect("close failed");
    let error = instance
        .call("exec", vec![json!("SELECT * FROM users")])
        .await
        .expect_err("exec after close must fail");
    assert_eq!(error.to_string(), "not connected to a cluster");
    assert_eq!(
        instance.call("close", vec![]).await.expect("close failed"),
        Value::Null
    );
}
