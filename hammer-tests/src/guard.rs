use hammer::{Instance, json};

/// Calls a script can make without any reachable cluster.
pub async fn offline(instance: &mut dyn Instance) {
    let exports = instance.exports();
    for method in ["session", "exec", "batch", "close"] {
        assert!(exports.contains(&method), "`{method}` is not exported");
    }

    // Nothing opened yet
    let error = instance
        .call("exec", vec![json!("SELECT * FROM local")])
        .await
        .expect_err("exec must fail without a session");
    assert_eq!(error.to_string(), "not connected to a cluster");
    let error = instance
        .call("batch", vec![json!(""), json!(["SELECT * FROM local"])])
        .await
        .expect_err("batch must fail without a session");
    assert_eq!(error.to_string(), "not connected to a cluster");

    // Close is a no-op when nothing is open
    instance.call("close", vec![]).await.expect("close failed");
    instance.call("close", vec![]).await.expect("close failed");

    // Empty configuration
    let error = instance
        .call("session", vec![json!({})])
        .await
        .expect_err("an empty configuration must be rejected");
    assert!(
        format!("{error:#}").contains("hosts and keyspace are required parameters"),
        "unexpected error: {error:#}"
    );
    let error = instance
        .call("session", vec![])
        .await
        .expect_err("a missing configuration must be rejected");
    assert!(format!("{error:#}").contains("hosts and keyspace are required parameters"));
    let error = instance
        .call("session", vec![json!({ "hosts": ["127.0.0.1"] })])
        .await
        .expect_err("a configuration without keyspace must be rejected");
    assert!(format!("{error:#}").contains("hosts and keyspace are required parameters"));
    let error = instance
        .call("session", vec![json!({ "hosts": [], "keyspace": "system" })])
        .await
        .expect_err("a configuration without hosts must be rejected");
    assert!(format!("{error:#}").contains("hosts and keyspace are required parameters"));

    // Malformed timeout
    let error = instance
        .call(
            "session",
            vec![json!({ "hosts": ["127.0.0.1"], "keyspace": "system", "timeout": "soon" })],
        )
        .await
        .expect_err("a malformed timeout must be rejected");
    assert!(
        format!("{error:#}").starts_with("invalid timeout value:"),
        "unexpected error: {error:#}"
    );

    // Arguments of the wrong shape
    let error = instance
        .call("exec", vec![json!(42)])
        .await
        .expect_err("a numeric statement must be rejected");
    assert!(format!("{error:#}").contains("statement"));

    let error = instance
        .call("query", vec![])
        .await
        .expect_err("`query` is not exported");
    assert!(error.to_string().contains("`query`"));
}
