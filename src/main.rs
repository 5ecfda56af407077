use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use serde_json::Value;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use raven_mobile_boot::collaborators::builtins::{FixtureSite, LogSink};
use raven_mobile_boot::config::SiteConfig;
use raven_mobile_boot::context::keys;
use raven_mobile_boot::telemetry::TelemetryDispatcher;
use raven_mobile_boot::{decode_boot, render, BootContextBuilder, Session};

/// Render the mobile boot context for one request, from fixture files.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Site fixture (session, settings and boot payloads) as JSON.
    #[arg(long)]
    fixture: PathBuf,
    /// Site config JSON (build_version, push_relay_server_url, ...).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Session user; "Guest" renders the public boot.
    #[arg(long, default_value = raven_mobile_boot::session::GUEST)]
    user: String,
    /// Replace the encoded `boot` string with the decoded payload.
    #[arg(long)]
    decode: bool,
    /// Log at debug level on stderr.
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Cannot install logger: {e}");
    }

    if let Err(e) = run(&args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let site = Arc::new(FixtureSite::from_path(&args.fixture)?);
    let config = match &args.config {
        Some(path) => SiteConfig::from_path(path)?,
        None => SiteConfig::default(),
    };

    let dispatcher = Arc::new(TelemetryDispatcher::spawn(Arc::new(LogSink)));
    let builder = BootContextBuilder::new(site.clone(), site, Arc::new(config), dispatcher);

    let page = BootContextBuilder::PAGE;
    tracing::info!(route = page.route, no_cache = page.no_cache, user = %args.user, "rendering");

    let mut context = render(&builder, &Session::for_user(args.user.as_str()))?;
    if args.decode {
        if let Some(encoded) = context.get_str(keys::BOOT) {
            let payload = decode_boot(encoded)?;
            context.insert(keys::BOOT, Value::Object(payload));
        }
    }

    println!("{}", serde_json::to_string_pretty(&context)?);
    Ok(())
}
