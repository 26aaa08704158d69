use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use ignite_feed::core::config;
use ignite_feed::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "ignite-feed", about = "Terminal social feed with comments and likes")]
struct Args {
    /// Config file to read instead of ~/.ignite-feed/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host that post links point to (e.g. github.com)
    #[arg(long)]
    link_host: Option<String>,

    /// Log verbosity written to ignite-feed.log
    #[arg(long, default_value_t = LevelFilter::Debug)]
    log_level: LevelFilter,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to ignite-feed.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("ignite-feed.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    log::info!("Ignite Feed starting up");

    let loaded = match &args.config {
        Some(path) => config::load_config_from(path, false),
        None => config::load_config(),
    };
    let feed_config = loaded.map_err(|e| {
        log::error!("{e}");
        std::io::Error::other(e)
    })?;
    let resolved = config::resolve(&feed_config, args.link_host.as_deref());
    log::info!(
        "Feed ready: {} posts, links to {}",
        resolved.posts.len(),
        resolved.link_host
    );

    tui::run(resolved)
}
