use std::time::Duration;

use crate::{config::Settings, error, server};

pub async fn serve(settings: Settings, sync_every_minutes: Option<u64>) {
    let sync_every = sync_every_minutes
        .filter(|minutes| *minutes > 0)
        .map(|minutes| Duration::from_secs(minutes * 60));

    if let Err(e) = server::serve(settings, sync_every).await {
        error!("Server stopped. Err: {}", e);
    }
}
