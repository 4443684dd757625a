use scylla::client::execution_profile::ExecutionProfile;
use scylla::client::session_builder::SessionBuilder;
use scylla::client::Compression;
use scylla::statement::Consistency;

/// Driver options applied when [`SessionManager`](super::SessionManager) connects.
///
/// Everything not listed here (timeouts, retries, load balancing, pooling)
/// keeps the driver's defaults.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct SessionConfig {
    /// Consistency level of every statement executed through the manager.
    ///
    /// Defaults to [`Consistency::One`], so that the demo keyspace (replication
    /// factor 4) stays writable on clusters with fewer nodes than replicas.
    pub consistency: Consistency,

    /// Preferred compression algorithm; the driver falls back to none
    /// if the cluster does not support it.
    pub compression: Option<Compression>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            consistency: Consistency::One,
            compression: None,
        }
    }
}

impl SessionConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the consistency level.
    pub fn consistency(mut self, consistency: Consistency) -> Self {
        self.consistency = consistency;
        self
    }

    /// Sets the preferred compression algorithm.
    pub fn compression(mut self, compression: Option<Compression>) -> Self {
        self.compression = compression;
        self
    }

    pub(crate) fn session_builder(&self, contact_point: &str) -> SessionBuilder {
        let profile = ExecutionProfile::builder()
            .consistency(self.consistency)
            .build();

        SessionBuilder::new()
            .known_node(contact_point)
            .compression(self.compression)
            .default_execution_profile_handle(profile.into_handle())
    }
}

/// Parses a consistency level name the way `cqlsh` spells it
/// (`one`, `local_quorum`, ...), ignoring case.
pub fn parse_consistency(name: &str) -> Option<Consistency> {
    let consistency = match name.to_ascii_lowercase().as_str() {
        "any" => Consistency::Any,
        "one" => Consistency::One,
        "two" => Consistency::Two,
        "three" => Consistency::Three,
        "quorum" => Consistency::Quorum,
        "all" => Consistency::All,
        "local_quorum" => Consistency::LocalQuorum,
        "each_quorum" => Consistency::EachQuorum,
        "local_one" => Consistency::LocalOne,
        "serial" => Consistency::Serial,
        "local_serial" => Consistency::LocalSerial,
        _ => return None,
    };
    Some(consistency)
}

/// Parses a compression algorithm name: `lz4` or `snappy`.
pub fn parse_compression(name: &str) -> Option<Compression> {
    match name.to_ascii_lowercase().as_str() {
        "lz4" => Some(Compression::Lz4),
        "snappy" => Some(Compression::Snappy),
        _ => None,
    }
}
