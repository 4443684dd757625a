//! Errors returned by the session manager and the demo catalog.

use scylla::deserialize::{DeserializationError, TypeCheckError};
use scylla::errors::{DbError, ExecutionError, NewSessionError, RequestAttemptError};
use scylla::response::query_result::IntoRowsResultError;
use thiserror::Error;

/// Error that occurred while opening a session to the cluster.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConnectionError {
    /// Address or port cannot possibly identify a node.
    #[error("Invalid contact point {address}:{port}: {reason}")]
    InvalidContactPoint {
        /// Address passed to `connect`.
        address: String,
        /// Port passed to `connect`.
        port: u16,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// The driver failed to build a session: no node was reachable,
    /// authentication failed or the protocol could not be negotiated.
    #[error("Failed to connect to {contact_point}: {source}")]
    NewSession {
        /// `address:port` the driver was pointed at.
        contact_point: String,
        /// Error reported by the driver.
        #[source]
        source: NewSessionError,
    },

    /// `connect` was called on a manager that already holds a session.
    #[error("Session manager is already connected")]
    AlreadyConnected,

    /// `connect` was called on a manager that was closed.
    /// A closed manager never reconnects.
    #[error("Session manager was closed and cannot be reconnected")]
    Closed,
}

/// No session is open, so nothing can be executed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotConnectedError {
    /// `connect` has not succeeded yet.
    #[error("Not connected: connect() has not succeeded yet")]
    NeverConnected,

    /// The session was released by `close`.
    #[error("Not connected: session was closed")]
    Closed,
}

/// Statement was rejected by the cluster, or its result could not be read.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum QueryError {
    /// Cluster (or driver) refused to execute the statement.
    #[error("Statement failed: {source} (statement: {statement})")]
    Execution {
        /// Text of the rejected statement.
        statement: String,
        /// Error reported by the driver, unchanged.
        #[source]
        source: ExecutionError,
    },

    /// Metadata of the returned rows could not be parsed.
    #[error("Failed to read result metadata of {statement}: {source}")]
    ResultMetadata {
        /// Text of the statement.
        statement: String,
        /// Error reported by the driver.
        #[source]
        source: IntoRowsResultError,
    },

    /// Returned rows do not fit the requested row type.
    #[error("Rows returned by {statement} failed the type check: {source}")]
    TypeCheck {
        /// Text of the statement.
        statement: String,
        /// Error reported by the driver.
        #[source]
        source: TypeCheckError,
    },

    /// A returned row could not be deserialized.
    #[error("Failed to deserialize a row returned by {statement}: {source}")]
    Deserialization {
        /// Text of the statement.
        statement: String,
        /// Error reported by the driver.
        #[source]
        source: DeserializationError,
    },

    /// A row lacks a column, or holds a value of another type than the caller asked for.
    #[error("Column {column} is missing or is not of type {expected}")]
    ColumnMismatch {
        /// Name of the column.
        column: String,
        /// CQL type the caller expected.
        expected: &'static str,
    },
}

impl QueryError {
    /// Error code and diagnostic message sent by the cluster, if the
    /// statement reached a node and was rejected there.
    pub fn db_error(&self) -> Option<(&DbError, &str)> {
        match self {
            QueryError::Execution {
                source: ExecutionError::LastAttemptError(RequestAttemptError::DbError(err, msg)),
                ..
            } => Some((err, msg.as_str())),
            _ => None,
        }
    }

    pub(crate) fn column_mismatch(column: &str, expected: &'static str) -> Self {
        QueryError::ColumnMismatch {
            column: column.to_owned(),
            expected,
        }
    }
}

/// Error returned by [`SessionManager::execute`](crate::client::SessionManager::execute).
#[derive(Error, Debug)]
pub enum ExecuteError {
    /// No session is open.
    #[error(transparent)]
    NotConnected(#[from] NotConnectedError),

    /// Statement was rejected.
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Invalid keyspace name passed to the demo catalog.
///
/// Keyspace names are interpolated into statement text, so they are checked
/// the same way the cluster checks them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidKeyspaceName {
    /// Keyspace name is empty.
    #[error("Keyspace name is empty")]
    Empty,

    /// Keyspace name is longer than 48 characters.
    #[error("Keyspace name too long, must be up to 48 characters, found {1} characters. Bad keyspace name: '{0}'")]
    TooLong(String, usize),

    /// Keyspace name contains a character other than `[A-Za-z0-9_]`.
    #[error("Illegal character found: '{1}', only alphanumeric and underscores allowed. Bad keyspace name: '{0}'")]
    IllegalCharacter(String, char),
}

/// Any error the demo catalog can run into once a session is open.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SessionError {
    /// See [`NotConnectedError`].
    #[error(transparent)]
    NotConnected(#[from] NotConnectedError),

    /// See [`QueryError`].
    #[error(transparent)]
    Query(#[from] QueryError),

    /// See [`InvalidKeyspaceName`].
    #[error(transparent)]
    InvalidKeyspaceName(#[from] InvalidKeyspaceName),
}

impl From<ExecuteError> for SessionError {
    fn from(err: ExecuteError) -> Self {
        match err {
            ExecuteError::NotConnected(e) => SessionError::NotConnected(e),
            ExecuteError::Query(e) => SessionError::Query(e),
        }
    }
}
