use bookshelf::core::config::{self, BookshelfConfig, CliOverrides};
use bookshelf::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "bookshelf", about = "Terminal client for your book collection")]
struct Args {
    /// Server base URL (overrides config and BOOKSHELF_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Session token (overrides BOOKSHELF_TOKEN and the session file)
    #[arg(long)]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to bookshelf.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("bookshelf.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Using default config: {}", e);
        BookshelfConfig::default()
    });
    let cli = CliOverrides {
        base_url: args.base_url,
        token: args.token,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!("Bookshelf starting up against {}", resolved.base_url);

    tui::run(resolved)
}
