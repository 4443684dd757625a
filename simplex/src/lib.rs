//! Session-managing client for [ScyllaDB](https://scylladb.com) and
//! [Apache Cassandra®](https://cassandra.apache.org/) clusters, plus the small
//! music catalog demo built on top of it.
//!
//! All real work (topology discovery, load balancing, pooling, retries) is done
//! by the [`scylla`] driver. This crate adds an explicit session lifecycle
//! around it:
//!
//! ```rust,no_run
//! use simplex::client::SessionManager;
//! use simplex::demo::{self, SchemaSettings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut manager = SessionManager::new();
//!     manager.connect("127.0.0.1", 9042).await?;
//!
//!     let settings = SchemaSettings::default();
//!     demo::create_schema(&manager, &settings).await?;
//!     demo::load_data(
//!         &manager,
//!         &settings.keyspace,
//!         &[demo::sample_song()],
//!         &[demo::sample_playlist_entry()],
//!     )
//!     .await?;
//!
//!     manager.close();
//!     Ok(())
//! }
//! ```
//!
//! Statements go through [`SessionManager::execute`](client::SessionManager::execute)
//! and come back as an owned [`ResultRowSet`](response::ResultRowSet).

pub mod client;
pub mod cluster;
pub mod demo;
pub mod errors;
pub mod response;

pub use client::{SessionConfig, SessionManager};
