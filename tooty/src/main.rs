//! tooty - Drain the local post queue to Mastodon
//!
//! Publishes every post queued in `./example.txt` using the credentials in
//! `./creds.json`, then empties the queue.

use clap::Parser;
use libtooty::platforms::mastodon::MastodonClient;
use libtooty::{drain_all, Config, Credentials, Result};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "tooty")]
#[command(version)]
#[command(about = "Publish queued posts to Mastodon")]
#[command(long_about = "\
tooty - Publish queued posts to Mastodon

DESCRIPTION:
    tooty reads the queue file, publishes each queued post in order, and
    empties the queue once every post has been published. It takes no
    arguments and is meant to be run periodically, e.g. from cron.

QUEUE FORMAT:
    +mode: unlisted
    +reply: 123456789
    +media: /path/to/img.png;a photo of a cat
    first line of the post body
    second line
    ---
    next post's body, no headers

FILES:
    ./example.txt   Queue file
    ./creds.json    {\"key\": \"...\", \"secret\": \"...\", \"token\": \"...\"}

LOGGING:
    TOOTY_LOG_FORMAT   text, json or pretty (default: text)
    TOOTY_LOG_LEVEL    error, warn, info, debug or trace (default: warn)

EXIT CODES:
    0 - Every queued post was published
    1 - Publishing, network, configuration or I/O error
    2 - Authentication error
    3 - Malformed queue entry
")]
struct Cli {}

#[tokio::main]
async fn main() {
    let _cli = Cli::parse();

    libtooty::logging::init_default();

    // Run the main logic and handle errors
    if let Err(e) = run(Config::default()).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(config: Config) -> Result<()> {
    info!(queue = %config.queue_path.display(), "tooty starting");

    let credentials = Credentials::load(&config.credentials_path)?;
    let client = MastodonClient::from_credentials(&config.instance, &credentials)?;

    let stdout = std::io::stdout();
    let summary = drain_all(&config.queue_path, &client, &mut stdout.lock()).await?;

    info!(published = summary.published, "tooty finished");
    Ok(())
}
