use std::io::IsTerminal;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notekeeper::cli::{Cli, Session};
use notekeeper::config::{self, AppConfig};
use notekeeper::db::Database;
use notekeeper::render::Palette;
use notekeeper::store::NoteStore;

/// Initialize tracing on stderr so stdout carries only command output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "notekeeper=warn".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::get_config_path()?,
    };
    let config = AppConfig::load(&config_path);

    let db = Database::open(config.resolve_database_path(cli.db)?)?;
    db.migrate()?;
    let mut store = NoteStore::open(db);

    let palette = Palette {
        color: config.color && !cli.no_color && std::io::stdout().is_terminal(),
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(
        &mut store,
        config,
        config_path,
        palette,
        stdin.lock(),
        stdout.lock(),
    );
    session.run(cli.command)
}
