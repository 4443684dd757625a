//! The music catalog the demo binary works on: two tables, one song and
//! one playlist entry pointing at it.
//!
//! Every operation takes its keyspace and data explicitly, so callers can
//! sequence schema setup, loading, querying and teardown however they like.

mod catalog;
mod display;
mod schema;

pub use catalog::{
    fetch_playlist, fetch_song, load_data, sample_playlist_entry, sample_song, PlaylistEntry,
    Song, SAMPLE_PLAYLIST_ID, SAMPLE_SONG_ID,
};
pub use display::render_playlist;
pub use schema::{
    create_schema, drop_schema, KeyspaceName, SchemaSettings, DEFAULT_KEYSPACE,
    DEFAULT_REPLICATION_FACTOR,
};
