use std::collections::HashMap;

use crate::types::{Song, SongKey};

/// Lookup structures over the existing archive used to skip duplicates.
///
/// Rows imported before Spotify ids were tracked only carry a name and an
/// artist, so every row is indexed by [`SongKey`] as well as by id.
#[derive(Debug, Default, Clone)]
pub struct SongIndex {
    by_id: HashMap<String, Song>,
    by_key: HashMap<SongKey, Song>,
    max_week: u32,
}

impl SongIndex {
    pub fn new(songs: Vec<Song>) -> Self {
        let mut index = Self::default();
        for song in songs {
            index.add(song);
        }
        index
    }

    /// Adds a row. For a key collision the row carrying a Spotify id wins.
    pub fn add(&mut self, song: Song) -> &mut Self {
        self.max_week = self.max_week.max(song.week_number());

        let key = song.key();
        let replace_key = match self.by_key.get(&key) {
            Some(_) => song.spotify_track_id.is_some(),
            None => true,
        };
        if replace_key {
            self.by_key.insert(key, song.clone());
        }

        if let Some(id) = song.spotify_track_id.clone() {
            self.by_id.insert(id, song);
        }
        self
    }

    pub fn by_id(&self, spotify_track_id: &str) -> Option<&Song> {
        self.by_id.get(spotify_track_id)
    }

    pub fn by_key(&self, key: &SongKey) -> Option<&Song> {
        self.by_key.get(key)
    }

    pub fn max_week(&self) -> u32 {
        self.max_week
    }

    pub fn count_with_ids(&self) -> usize {
        self.by_id.len()
    }

    pub fn count_unique(&self) -> usize {
        self.by_key.len()
    }
}
