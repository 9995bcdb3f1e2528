use tabled::Table;

use crate::{config::Settings, error, info, server::AppState, utils, warning};

/// Prints the weekly archive as a table, latest first.
pub async fn list_songs(settings: &Settings, search: Option<String>) {
    let state = match AppState::persistent(settings) {
        Ok(state) => state,
        Err(e) => error!("Cannot reach the song archive. Err: {}", e),
    };

    let mut songs = match state.store.list_songs().await {
        Ok(songs) => songs,
        Err(e) => {
            warning!("Failed to load songs. Err: {}", e);
            return;
        }
    };

    if let Some(search) = search {
        utils::filter_songs(&mut songs, &search);
    }

    if songs.is_empty() {
        info!("No songs in the archive yet.");
        return;
    }

    let table = Table::new(utils::song_table_rows(songs));
    println!("{}", table);
}
