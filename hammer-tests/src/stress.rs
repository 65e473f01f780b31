use crate::TEST_KEYSPACE;
use futures::future::try_join_all;
use hammer::{Registry, Vu, json};
use std::sync::Arc;

/// Run `iterations` per VU across `vus` independent instances, each iteration opens a
/// session, inserts one user and closes.
///
/// Expects the `users` table created by [`crate::users`].
pub async fn stress(registry: Arc<Registry>, path: &'static str, hosts: &[String], vus: u64, iterations: u64) {
    let tasks = (1..=vus).map(|id| {
        let registry = registry.clone();
        let hosts = hosts.to_vec();
        tokio::spawn(async move {
            let mut instance = registry.instantiate(path, Vu::new(id))?;
            for iteration in 0..iterations {
                let user = 1_000 + id * iterations + iteration;
                instance
                    .call(
                        "session",
                        vec![json!({ "hosts": hosts, "keyspace": TEST_KEYSPACE })],
                    )
                    .await?;
                instance
                    .call(
                        "exec",
                        vec![json!(format!(
                            "INSERT INTO users (id, name) VALUES ({user}, 'User{user}');"
                        ))],
                    )
                    .await?;
                instance.call("close", vec![]).await?;
            }
            hammer::Result::Ok(())
        })
    });
    for result in try_join_all(tasks).await.expect("A VU panicked") {
        result.expect("A VU failed");
    }
}
