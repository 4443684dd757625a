//! [`SessionManager`] owns one driver session and mediates every statement
//! sent through it.

use std::net::Ipv6Addr;

use scylla::client::session::Session;
use scylla::serialize::row::SerializeRow;
use scylla::statement::unprepared::Statement;
use scylla::statement::Consistency;
use tracing::{debug, info, warn};

use super::SessionConfig;
use crate::cluster::ClusterInfo;
use crate::errors::{ConnectionError, ExecuteError, NotConnectedError, QueryError};
use crate::response::ResultRowSet;

/// Lifecycle of a [`SessionManager`].
///
/// Transitions are linear: `Disconnected -> Connected -> Closed`.
/// A closed manager never becomes connected again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// `connect` has not succeeded yet.
    Disconnected,
    /// A session is open.
    Connected,
    /// `close` was called.
    Closed,
}

struct OpenSession {
    session: Session,
    cluster: ClusterInfo,
}

/// Owns the connection to one cluster.
///
/// Topology discovery, pooling, retries and load balancing all happen inside
/// the driver; the manager only tracks whether a session is open and turns
/// driver results into [`ResultRowSet`]s.
///
/// # Example
/// ```rust,no_run
/// # use simplex::client::SessionManager;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut manager = SessionManager::new();
/// let cluster = manager.connect("127.0.0.1", 9042).await?;
/// println!("{cluster}");
///
/// let rows = manager.execute("SELECT keyspace_name FROM system_schema.keyspaces").await?;
/// for row in &rows {
///     println!("{}", row.text("keyspace_name")?);
/// }
///
/// manager.close();
/// # Ok(())
/// # }
/// ```
pub struct SessionManager {
    config: SessionConfig,
    open: Option<OpenSession>,
    closed: bool,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    /// Creates a disconnected manager with the default [`SessionConfig`].
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Creates a disconnected manager that will connect with `config`.
    pub fn with_config(config: SessionConfig) -> Self {
        SessionManager {
            config,
            open: None,
            closed: false,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        match (&self.open, self.closed) {
            (Some(_), _) => SessionState::Connected,
            (None, true) => SessionState::Closed,
            (None, false) => SessionState::Disconnected,
        }
    }

    /// Whether a session is open.
    pub fn is_connected(&self) -> bool {
        self.open.is_some()
    }

    /// Topology snapshot taken by the last successful `connect`,
    /// as long as the session is still open.
    pub fn cluster_info(&self) -> Option<&ClusterInfo> {
        self.open.as_ref().map(|open| &open.cluster)
    }

    /// The underlying driver session, for callers that need more than
    /// plain statements (prepared statements, batches, paging).
    pub fn session(&self) -> Result<&Session, NotConnectedError> {
        match &self.open {
            Some(open) => Ok(&open.session),
            None if self.closed => Err(NotConnectedError::Closed),
            None => Err(NotConnectedError::NeverConnected),
        }
    }

    /// Connects to the cluster through the node at `address:port`.
    ///
    /// The driver discovers the remaining nodes on its own. The cluster name
    /// and the placement of every discovered node are returned. A cluster
    /// name that cannot be read is reported as `None`; it does not fail
    /// the connection.
    pub async fn connect(
        &mut self,
        address: &str,
        port: u16,
    ) -> Result<&ClusterInfo, ConnectionError> {
        match self.state() {
            SessionState::Disconnected => {}
            SessionState::Connected => return Err(ConnectionError::AlreadyConnected),
            SessionState::Closed => return Err(ConnectionError::Closed),
        }

        let contact_point = contact_point(address, port)?;
        debug!(%contact_point, consistency = ?self.config.consistency, "Opening session");

        let session = self
            .config
            .session_builder(&contact_point)
            .build()
            .await
            .map_err(|source| ConnectionError::NewSession {
                contact_point: contact_point.clone(),
                source,
            })?;

        let cluster_name = match read_cluster_name(&session).await {
            Ok(name) => name,
            Err(err) => {
                warn!(error = %err, "Failed to read cluster name");
                None
            }
        };
        let cluster = ClusterInfo::new(cluster_name, &session.get_cluster_state());

        debug!(
            "Connected to cluster: {}",
            cluster.cluster_name.as_deref().unwrap_or("<unknown>")
        );
        for node in &cluster.nodes {
            debug!("{node}");
        }

        Ok(&self.open.insert(OpenSession { session, cluster }).cluster)
    }

    /// Executes a statement without bound values.
    ///
    /// Reads return their rows; writes and schema changes return an empty set.
    /// Fails with [`ExecuteError::NotConnected`] before any network I/O
    /// when no session is open.
    pub async fn execute(&self, statement: &str) -> Result<ResultRowSet, ExecuteError> {
        self.execute_with(statement, ()).await
    }

    /// Executes a statement with bound values (`?` markers in `statement`).
    pub async fn execute_with(
        &self,
        statement: &str,
        values: impl SerializeRow,
    ) -> Result<ResultRowSet, ExecuteError> {
        let session = self.session()?;
        Ok(run_statement(session, Statement::new(statement), values).await?)
    }

    /// Releases the session. Calling it again, or on a manager that never
    /// connected, has no further effect.
    pub fn close(&mut self) {
        if let Some(open) = self.open.take() {
            info!(
                "Closing session to cluster {}",
                open.cluster.cluster_name.as_deref().unwrap_or("<unknown>")
            );
        }
        self.closed = true;
    }
}

async fn run_statement(
    session: &Session,
    statement: Statement,
    values: impl SerializeRow,
) -> Result<ResultRowSet, QueryError> {
    let text = statement.contents.clone();
    debug!(statement = %text, "Executing statement");
    let result = session
        .query_unpaged(statement, values)
        .await
        .map_err(|source| QueryError::Execution {
            statement: text.clone(),
            source,
        })?;

    for warning in result.warnings() {
        warn!(statement = %text, "Cluster warning: {warning}");
    }

    ResultRowSet::from_query_result(&text, result)
}

/// `system.local` lookup, pinned to `ONE` so that it also works when the
/// configured consistency only applies to writes (`ANY`).
fn cluster_name_statement() -> Statement {
    let mut statement = Statement::new("SELECT cluster_name FROM system.local");
    statement.set_consistency(Consistency::One);
    statement
}

async fn read_cluster_name(session: &Session) -> Result<Option<String>, QueryError> {
    let rows = run_statement(session, cluster_name_statement(), ()).await?;
    match rows.first() {
        Some(row) if row.get("cluster_name").is_some() => {
            Ok(Some(row.text("cluster_name")?.to_owned()))
        }
        _ => Ok(None),
    }
}

/// Formats the node address the way the driver expects it,
/// bracketing bare IPv6 addresses.
fn contact_point(address: &str, port: u16) -> Result<String, ConnectionError> {
    let invalid = |reason| ConnectionError::InvalidContactPoint {
        address: address.to_owned(),
        port,
        reason,
    };

    if address.is_empty() {
        return Err(invalid("address is empty"));
    }
    if address.chars().any(char::is_whitespace) {
        return Err(invalid("address contains whitespace"));
    }
    if port == 0 {
        return Err(invalid("port 0 is not a valid node port"));
    }

    Ok(match address.parse::<Ipv6Addr>() {
        Ok(ip) => format!("[{ip}]:{port}"),
        Err(_) => format!("{address}:{port}"),
    })
}
