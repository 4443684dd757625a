use std::fmt;

use tracing::info;

use crate::client::SessionManager;
use crate::errors::{InvalidKeyspaceName, SessionError};

/// Keyspace name that is safe to splice into statement text.
///
/// Keyspace names can have up to 48 alphanumeric characters and underscores.
/// Cassandra accepts an underscore as the first character, so we do too.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyspaceName(String);

impl KeyspaceName {
    /// Verifies `name`.
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidKeyspaceName> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidKeyspaceName::Empty);
        }

        // Only ascii allowed, so it's equal to .len()
        let len = name.chars().count();
        if len > 48 {
            return Err(InvalidKeyspaceName::TooLong(name, len));
        }

        if let Some(c) = name
            .chars()
            .find(|c| !matches!(c, 'a'..='z' | 'A'..='Z' | '0'..='9' | '_'))
        {
            return Err(InvalidKeyspaceName::IllegalCharacter(name, c));
        }

        Ok(KeyspaceName(name))
    }

    /// The verified name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyspaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for KeyspaceName {
    type Err = InvalidKeyspaceName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyspaceName::new(s)
    }
}

/// Where the demo tables live and how many replicas the keyspace keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSettings {
    /// Keyspace holding the `songs` and `playlists` tables.
    pub keyspace: KeyspaceName,
    /// Replication factor of the `SimpleStrategy` keyspace.
    pub replication_factor: u32,
}

impl Default for SchemaSettings {
    fn default() -> Self {
        SchemaSettings {
            keyspace: KeyspaceName(DEFAULT_KEYSPACE.to_owned()),
            replication_factor: DEFAULT_REPLICATION_FACTOR,
        }
    }
}

/// Keyspace used when none is given.
pub const DEFAULT_KEYSPACE: &str = "simplex";
/// Replication factor used when none is given.
pub const DEFAULT_REPLICATION_FACTOR: u32 = 4;

impl SchemaSettings {
    /// Statements creating the keyspace and both tables, in execution order.
    /// All of them are no-ops when the object already exists.
    pub fn create_statements(&self) -> [String; 3] {
        let ks = &self.keyspace;
        [
            format!(
                "CREATE KEYSPACE IF NOT EXISTS {ks} WITH replication = \
                 {{'class': 'SimpleStrategy', 'replication_factor': {}}}",
                self.replication_factor
            ),
            format!(
                "CREATE TABLE IF NOT EXISTS {ks}.songs (\
                 id uuid PRIMARY KEY, \
                 title text, \
                 album text, \
                 artist text, \
                 tags set<text>, \
                 data blob)"
            ),
            format!(
                "CREATE TABLE IF NOT EXISTS {ks}.playlists (\
                 id uuid, \
                 title text, \
                 album text, \
                 artist text, \
                 song_id uuid, \
                 PRIMARY KEY (id, title, album, artist))"
            ),
        ]
    }

    /// Statement dropping the keyspace with everything in it.
    pub fn drop_statement(&self) -> String {
        format!("DROP KEYSPACE IF EXISTS {}", self.keyspace)
    }
}

/// Creates the keyspace and the `songs` and `playlists` tables.
///
/// Safe to run against a cluster that already has them.
pub async fn create_schema(
    manager: &SessionManager,
    settings: &SchemaSettings,
) -> Result<(), SessionError> {
    for statement in settings.create_statements() {
        manager.execute(&statement).await?;
    }
    info!(
        keyspace = %settings.keyspace,
        replication_factor = settings.replication_factor,
        "Schema ready"
    );
    Ok(())
}

/// Drops the keyspace. Does nothing if it does not exist.
pub async fn drop_schema(
    manager: &SessionManager,
    settings: &SchemaSettings,
) -> Result<(), SessionError> {
    manager.execute(&settings.drop_statement()).await?;
    info!(keyspace = %settings.keyspace, "Schema dropped");
    Ok(())
}
