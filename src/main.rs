use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use musix::{cli, config, error, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the song-of-the-week API
    Serve(ServeOptions),

    /// Import new playlist tracks once (rate limited)
    Sync,

    /// Fill in the YouTube id of the latest song
    Backfill,

    /// List the weekly archive
    Songs(SongsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Run the playlist sync in the background every N minutes
    #[clap(long, value_name = "MINUTES")]
    pub sync_every: Option<u64>,
}

#[derive(Parser, Debug, Clone)]
pub struct SongsOptions {
    /// Filter by song name or artist
    #[clap(long)]
    pub search: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let args = Cli::parse();

    if let Command::Completions(opt) = &args.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let settings = match config::Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    };

    match args.command {
        Command::Serve(opt) => cli::serve(settings, opt.sync_every).await,
        Command::Sync => cli::sync(&settings).await,
        Command::Backfill => cli::backfill(&settings).await,
        Command::Songs(opt) => cli::list_songs(&settings, opt.search).await,
        Command::Completions(_) => {}
    }
}
