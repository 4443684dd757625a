use tracing::debug;
use uuid::Uuid;

use super::KeyspaceName;
use crate::client::SessionManager;
use crate::errors::{QueryError, SessionError};
use crate::response::Row;

/// A row of the `songs` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    /// Partition key.
    pub id: Uuid,
    /// Song title.
    pub title: String,
    /// Album the song appears on.
    pub album: String,
    /// Performing artist.
    pub artist: String,
    /// Free-form tags, stored as `set<text>`. The cluster returns them sorted.
    pub tags: Vec<String>,
    /// Binary payload, `None` when absent.
    pub data: Option<Vec<u8>>,
}

/// A row of the `playlists` table, pointing at a [`Song`] by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    /// Playlist id (partition key).
    pub id: Uuid,
    /// Id of the referenced song.
    pub song_id: Uuid,
    /// Song title (clustering key).
    pub title: String,
    /// Album (clustering key).
    pub album: String,
    /// Artist (clustering key).
    pub artist: String,
}

impl TryFrom<&Row> for Song {
    type Error = QueryError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Song {
            id: row.uuid("id")?,
            title: row.text("title")?.to_owned(),
            album: row.text("album")?.to_owned(),
            artist: row.text("artist")?.to_owned(),
            tags: row.text_set("tags")?,
            data: row.blob("data")?.map(<[u8]>::to_vec),
        })
    }
}

impl TryFrom<&Row> for PlaylistEntry {
    type Error = QueryError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(PlaylistEntry {
            id: row.uuid("id")?,
            song_id: row.uuid("song_id")?,
            title: row.text("title")?.to_owned(),
            album: row.text("album")?.to_owned(),
            artist: row.text("artist")?.to_owned(),
        })
    }
}

/// Id of the song inserted by the demo.
pub const SAMPLE_SONG_ID: Uuid = Uuid::from_u128(0x756716f7_2e54_4715_9f00_91dcbea6cf50);
/// Id of the playlist inserted by the demo.
pub const SAMPLE_PLAYLIST_ID: Uuid = Uuid::from_u128(0x2cc9ccb7_6221_4ccb_8387_f22b6a1b354d);

/// The song the demo inserts.
pub fn sample_song() -> Song {
    Song {
        id: SAMPLE_SONG_ID,
        title: "La Petite Tonkinoise".to_owned(),
        album: "Bye Bye Blackbird".to_owned(),
        artist: "Joséphine Baker".to_owned(),
        tags: vec!["2013".to_owned(), "jazz".to_owned()],
        data: None,
    }
}

/// The playlist entry the demo inserts, referencing [`sample_song`].
pub fn sample_playlist_entry() -> PlaylistEntry {
    let song = sample_song();
    PlaylistEntry {
        id: SAMPLE_PLAYLIST_ID,
        song_id: song.id,
        title: song.title,
        album: song.album,
        artist: song.artist,
    }
}

/// Inserts `songs` and `playlist` into the tables of `keyspace`.
///
/// Rows with ids that already exist are overwritten, so loading
/// the same data twice leaves one copy.
pub async fn load_data(
    manager: &SessionManager,
    keyspace: &KeyspaceName,
    songs: &[Song],
    playlist: &[PlaylistEntry],
) -> Result<(), SessionError> {
    let insert_song = format!(
        "INSERT INTO {keyspace}.songs (id, title, album, artist, tags, data) \
         VALUES (?, ?, ?, ?, ?, ?)"
    );
    for song in songs {
        debug!(id = %song.id, title = %song.title, "Inserting song");
        manager
            .execute_with(
                &insert_song,
                (
                    song.id,
                    &song.title,
                    &song.album,
                    &song.artist,
                    &song.tags,
                    &song.data,
                ),
            )
            .await?;
    }

    let insert_entry = format!(
        "INSERT INTO {keyspace}.playlists (id, song_id, title, album, artist) \
         VALUES (?, ?, ?, ?, ?)"
    );
    for entry in playlist {
        debug!(id = %entry.id, song_id = %entry.song_id, "Inserting playlist entry");
        manager
            .execute_with(
                &insert_entry,
                (
                    entry.id,
                    entry.song_id,
                    &entry.title,
                    &entry.album,
                    &entry.artist,
                ),
            )
            .await?;
    }

    Ok(())
}

/// Entries of playlist `id` holding a song titled `title`.
pub async fn fetch_playlist(
    manager: &SessionManager,
    keyspace: &KeyspaceName,
    id: Uuid,
    title: &str,
) -> Result<Vec<PlaylistEntry>, SessionError> {
    let rows = manager
        .execute_with(
            &format!(
                "SELECT id, song_id, title, album, artist FROM {keyspace}.playlists \
                 WHERE id = ? AND title = ?"
            ),
            (id, title),
        )
        .await?;

    Ok(rows
        .iter()
        .map(PlaylistEntry::try_from)
        .collect::<Result<_, _>>()?)
}

/// The song with the given id, if there is one.
pub async fn fetch_song(
    manager: &SessionManager,
    keyspace: &KeyspaceName,
    id: Uuid,
) -> Result<Option<Song>, SessionError> {
    let rows = manager
        .execute_with(
            &format!(
                "SELECT id, title, album, artist, tags, data FROM {keyspace}.songs WHERE id = ?"
            ),
            (id,),
        )
        .await?;

    Ok(rows.first().map(Song::try_from).transpose()?)
}
