use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use simplex::client::SessionManager;
use simplex::demo::{KeyspaceName, SchemaSettings};

pub(crate) fn setup_tracing() {
    let _ = tracing_subscriber::fmt::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(tracing_subscriber::fmt::TestWriter::new())
        .try_init();
}

static UNIQUE_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub(crate) fn unique_keyspace_name() -> KeyspaceName {
    let cnt = UNIQUE_COUNTER.fetch_add(1, Ordering::SeqCst);
    let name = format!(
        "test_simplex_{}_{}",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs(),
        cnt
    );
    println!("Unique name: {}", name);
    KeyspaceName::new(name).unwrap()
}

/// Node to run live tests against, taken from `SCYLLA_URI` (`host:port`).
pub(crate) fn cluster_address() -> (String, u16) {
    let uri = std::env::var("SCYLLA_URI").unwrap_or_else(|_| "127.0.0.1:9042".to_string());
    let (host, port) = uri
        .rsplit_once(':')
        .expect("SCYLLA_URI must have the form host:port");
    (
        host.trim_start_matches('[').trim_end_matches(']').to_owned(),
        port.parse().expect("SCYLLA_URI port must be a number"),
    )
}

pub(crate) async fn connected_manager() -> SessionManager {
    let (host, port) = cluster_address();
    let mut manager = SessionManager::new();
    manager.connect(&host, port).await.unwrap();
    manager
}

/// Settings for a fresh keyspace with a single replica, so tests pass
/// on one-node clusters.
pub(crate) fn test_schema() -> SchemaSettings {
    SchemaSettings {
        keyspace: unique_keyspace_name(),
        replication_factor: 1,
    }
}
