use simplex::demo::{self, PlaylistEntry, Song};
use uuid::Uuid;

use crate::utils::{connected_manager, setup_tracing, test_schema};

#[tokio::test]
#[cfg_attr(not(cluster_tests), ignore = "requires a running cluster at SCYLLA_URI")]
async fn playlist_scenario() {
    setup_tracing();
    let mut manager = connected_manager().await;
    let settings = test_schema();

    demo::create_schema(&manager, &settings).await.unwrap();
    // Schema setup is idempotent.
    demo::create_schema(&manager, &settings).await.unwrap();

    let song = demo::sample_song();
    let entry = demo::sample_playlist_entry();
    demo::load_data(
        &manager,
        &settings.keyspace,
        std::slice::from_ref(&song),
        std::slice::from_ref(&entry),
    )
    .await
    .unwrap();

    let playlist = demo::fetch_playlist(&manager, &settings.keyspace, entry.id, &entry.title)
        .await
        .unwrap();
    assert_eq!(playlist.len(), 1);
    assert_eq!(playlist[0].title, "La Petite Tonkinoise");
    assert_eq!(playlist[0].album, "Bye Bye Blackbird");
    assert_eq!(playlist[0].artist, "Joséphine Baker");
    assert_eq!(playlist[0].song_id, song.id);

    demo::drop_schema(&manager, &settings).await.unwrap();
    manager.close();
}

#[tokio::test]
#[cfg_attr(not(cluster_tests), ignore = "requires a running cluster at SCYLLA_URI")]
async fn loaded_rows_read_back_unchanged() {
    setup_tracing();
    let manager = connected_manager().await;
    let settings = test_schema();
    demo::create_schema(&manager, &settings).await.unwrap();

    let song = Song {
        id: Uuid::new_v4(),
        title: "Dans mon cœur".to_owned(),
        album: "Ça c'est Paris".to_owned(),
        artist: "Mistinguett".to_owned(),
        tags: vec!["chanson".to_owned(), "music-hall".to_owned()],
        data: Some(vec![0, 1, 2, 0xff]),
    };
    let entry = PlaylistEntry {
        id: Uuid::new_v4(),
        song_id: song.id,
        title: song.title.clone(),
        album: song.album.clone(),
        artist: song.artist.clone(),
    };

    // Loading twice overwrites instead of duplicating.
    for _ in 0..2 {
        demo::load_data(
            &manager,
            &settings.keyspace,
            std::slice::from_ref(&song),
            std::slice::from_ref(&entry),
        )
        .await
        .unwrap();
    }

    let read = demo::fetch_song(&manager, &settings.keyspace, song.id)
        .await
        .unwrap();
    assert_eq!(read, Some(song.clone()));

    let playlist = demo::fetch_playlist(&manager, &settings.keyspace, entry.id, &entry.title)
        .await
        .unwrap();
    assert_eq!(playlist, [entry]);

    assert_eq!(
        demo::fetch_song(&manager, &settings.keyspace, Uuid::new_v4())
            .await
            .unwrap(),
        None
    );

    demo::drop_schema(&manager, &settings).await.unwrap();
}
