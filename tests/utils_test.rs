use musix::types::{Song, SongKey, SpotifyArtist};
use musix::utils::*;

// Helper function to create a test song
fn create_test_song(week: &str, name: &str, artist: &str) -> Song {
    Song {
        week: week.to_string(),
        song_name: name.to_string(),
        artist: artist.to_string(),
        youtube_id: None,
        spotify_track_id: None,
    }
}

#[test]
fn test_format_week() {
    assert_eq!(format_week(1), "week 01");
    assert_eq!(format_week(9), "week 09");
    assert_eq!(format_week(10), "week 10");

    // Past two digits the label just grows
    assert_eq!(format_week(100), "week 100");
}

#[test]
fn test_parse_week_number() {
    assert_eq!(parse_week_number("week 01"), 1);
    assert_eq!(parse_week_number("week 10"), 10);
    assert_eq!(parse_week_number("week 100"), 100);

    // Legacy labels without padding or spacing
    assert_eq!(parse_week_number("week 7"), 7);
    assert_eq!(parse_week_number("week7"), 7);

    // Only the first run of digits counts
    assert_eq!(parse_week_number("week 12 (2024)"), 12);

    // No digits at all
    assert_eq!(parse_week_number("bonus"), 0);
    assert_eq!(parse_week_number(""), 0);
}

#[test]
fn test_max_week_is_numeric() {
    let songs = vec![
        create_test_song("week 9", "Nine", "A"),
        create_test_song("week 10", "Ten", "B"),
        create_test_song("week 02", "Two", "C"),
    ];

    // "week 9" sorts after "week 10" as text
    assert_eq!(max_week(&songs), 10);
    assert_eq!(max_week(&[]), 0);
}

#[test]
fn test_sort_songs_latest_first() {
    let mut songs = vec![
        create_test_song("week 9", "Nine", "A"),
        create_test_song("week 100", "Hundred", "B"),
        create_test_song("week 10", "Ten", "C"),
        create_test_song("bonus", "Bonus", "D"),
    ];

    sort_songs_latest_first(&mut songs);

    let weeks: Vec<&str> = songs.iter().map(|s| s.week.as_str()).collect();
    assert_eq!(weeks, vec!["week 100", "week 10", "week 9", "bonus"]);
}

#[test]
fn test_song_key_normalization() {
    let key = SongKey::new("  Song1 ", "ARTIST A");
    assert_eq!(key.as_str(), "song1|artist a");
    assert_eq!(key, SongKey::new("song1", "artist a"));

    // Interior whitespace is significant
    assert_ne!(SongKey::new("Song  1", "A"), SongKey::new("Song 1", "A"));

    // Unicode case mapping
    assert_eq!(SongKey::new("ÉTÉ", "Ça"), SongKey::new("été", "ça"));
}

#[test]
fn test_join_artists() {
    let artists = vec![
        SpotifyArtist {
            name: "Artist A".to_string(),
        },
        SpotifyArtist {
            name: "Artist B".to_string(),
        },
    ];
    assert_eq!(join_artists(&artists), "Artist A, Artist B");
    assert_eq!(join_artists(&[]), "");
}

#[test]
fn test_first_artist() {
    assert_eq!(first_artist("Artist A, Artist B"), "Artist A");
    assert_eq!(first_artist("Solo"), "Solo");
    assert_eq!(first_artist("  Padded  "), "Padded");

    assert!(has_multiple_artists("A, B"));
    assert!(!has_multiple_artists("A & B"));
}

#[test]
fn test_spotify_link() {
    let mut song = create_test_song("week 01", "Song", "Artist");
    assert_eq!(spotify_link(&song), None);

    song.youtube_id = Some("dQw4w9WgXcQ".to_string());
    let search = spotify_link(&song).unwrap();
    assert!(search.starts_with("https://open.spotify.com/search/"));
    assert!(search.ends_with("Song%20Artist"));

    song.spotify_track_id = Some("4uLU6hMCjMI75M1A2tKUQC".to_string());
    assert_eq!(
        spotify_link(&song).as_deref(),
        Some("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC")
    );
}

#[test]
fn test_filter_songs() {
    let mut songs = vec![
        create_test_song("week 01", "Karma Police", "Radiohead"),
        create_test_song("week 02", "Hyperballad", "Björk"),
        create_test_song("week 03", "Police and Thieves", "Junior Murvin"),
    ];

    filter_songs(&mut songs, "  POLICE ");
    assert_eq!(songs.len(), 2);

    filter_songs(&mut songs, "radiohead");
    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0].song_name, "Karma Police");
}

#[test]
fn test_song_table_rows() {
    let mut song = create_test_song("week 01", "Song", "Artist");
    song.youtube_id = Some("abc".to_string());
    let rows = song_table_rows(vec![song, create_test_song("week 02", "Other", "B")]);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].song, "Song");
    assert_eq!(rows[0].youtube, "abc");
    assert_eq!(rows[1].youtube, "-");
}
