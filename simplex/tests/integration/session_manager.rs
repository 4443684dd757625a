use assert_matches::assert_matches;
use scylla::errors::{DbError, NewSessionError};
use scylla::statement::Consistency;
use simplex::client::{SessionConfig, SessionManager, SessionState};
use simplex::errors::{ConnectionError, ExecuteError, NotConnectedError, QueryError};

use crate::utils::{cluster_address, connected_manager, setup_tracing};

#[tokio::test]
async fn unresolvable_host_is_a_connection_error() {
    setup_tracing();
    let mut manager = SessionManager::new();

    assert_matches!(
        manager.connect("cassandrasuckssomuch.invalid", 9042).await,
        Err(ConnectionError::NewSession {
            source: NewSessionError::FailedToResolveAnyHostname(_),
            ..
        })
    );
    // A failed connect leaves the manager usable for another attempt.
    assert_eq!(manager.state(), SessionState::Disconnected);
    assert_matches!(
        manager.execute("SELECT * FROM system.local").await,
        Err(ExecuteError::NotConnected(NotConnectedError::NeverConnected))
    );
}

#[tokio::test]
#[cfg_attr(not(cluster_tests), ignore = "requires a running cluster at SCYLLA_URI")]
async fn connect_discovers_topology() {
    setup_tracing();
    let (host, port) = cluster_address();
    let mut manager = SessionManager::new();

    let cluster = manager.connect(&host, port).await.unwrap();
    assert!(cluster.cluster_name.is_some());
    assert!(!cluster.nodes.is_empty());
    assert!(cluster.nodes.iter().all(|node| node.datacenter.is_some()));

    assert_eq!(manager.state(), SessionState::Connected);
    assert_matches!(
        manager.connect(&host, port).await,
        Err(ConnectionError::AlreadyConnected)
    );
}

#[tokio::test]
#[cfg_attr(not(cluster_tests), ignore = "requires a running cluster at SCYLLA_URI")]
async fn connect_succeeds_with_write_only_consistency() {
    setup_tracing();
    let (host, port) = cluster_address();
    let config = SessionConfig::new().consistency(Consistency::Any);
    let mut manager = SessionManager::with_config(config);

    let cluster = manager.connect(&host, port).await.unwrap();
    assert!(cluster.cluster_name.is_some());
    assert_eq!(manager.state(), SessionState::Connected);

    // Statements of the caller still run at ANY, which the cluster refuses for reads.
    let err = manager
        .execute("SELECT release_version FROM system.local")
        .await
        .unwrap_err();
    let ExecuteError::Query(err) = err else {
        panic!("expected a query error, got {err:?}");
    };
    assert_matches!(err.db_error(), Some((DbError::Invalid, _)));
    assert!(manager.is_connected());
}

#[tokio::test]
#[cfg_attr(not(cluster_tests), ignore = "requires a running cluster at SCYLLA_URI")]
async fn reads_return_rows_and_writes_return_nothing() {
    setup_tracing();
    let manager = connected_manager().await;

    let rows = manager
        .execute("SELECT cluster_name, release_version FROM system.local")
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows.column_names(), ["cluster_name", "release_version"]);
    assert!(rows.first().unwrap().text("release_version").is_ok());

    let rows = manager.execute("USE system").await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
#[cfg_attr(not(cluster_tests), ignore = "requires a running cluster at SCYLLA_URI")]
async fn rejected_statements_keep_the_cluster_diagnostic() {
    setup_tracing();
    let manager = connected_manager().await;

    let err = manager
        .execute("SELECT * FROM no_such_keyspace_for_simplex.playlists")
        .await
        .unwrap_err();
    let ExecuteError::Query(err) = err else {
        panic!("expected a query error, got {err:?}");
    };
    let (code, message) = err.db_error().expect("error should come from the cluster");
    assert_eq!(*code, DbError::Invalid);
    assert!(!message.is_empty());

    assert_matches!(
        manager.execute("gibberish").await,
        Err(ExecuteError::Query(QueryError::Execution { .. }))
    );

    // The session survives rejected statements.
    assert!(manager.execute("SELECT now() FROM system.local").await.is_ok());
}

#[tokio::test]
#[cfg_attr(not(cluster_tests), ignore = "requires a running cluster at SCYLLA_URI")]
async fn close_releases_the_session() {
    setup_tracing();
    let mut manager = connected_manager().await;

    manager.close();
    manager.close();

    assert_eq!(manager.state(), SessionState::Closed);
    assert!(manager.cluster_info().is_none());
    assert_matches!(
        manager.execute("SELECT * FROM system.local").await,
        Err(ExecuteError::NotConnected(NotConnectedError::Closed))
    );
    assert_matches!(manager.session(), Err(NotConnectedError::Closed));
}
