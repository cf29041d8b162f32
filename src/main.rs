use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use media_console::config::Config;
use media_console::media::{Field, Kind, MediaStoreClient, ReqwestTransport};
use media_console::ui::{
    render_gallery, DeleteOutcome, GalleryViewModel, LogNotifier, Notifier, SubmitOutcome,
    TerminalNotifier, UploadFormController,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file
    #[arg(short, long)]
    config: Option<String>,

    /// Send notices to the log instead of the terminal
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show all items of a kind (video, music, blog)
    List { kind: Kind },
    /// Create an item and show the refreshed list
    Upload {
        kind: Kind,
        #[arg(short, long)]
        title: String,
        /// Kind-specific field, e.g. video_url=https://...
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(Field, String)>,
    },
    /// Delete an item by id and show what is left
    Delete { kind: Kind, id: i64 },
}

fn parse_field(raw: &str) -> Result<(Field, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
    let field = name.parse::<Field>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

fn get_config_path(args: &Args) -> Option<String> {
    if let Some(path) = &args.config {
        return Some(path.clone());
    }

    if let Ok(path) = std::env::var("CONFIG_FILE") {
        return Some(path);
    }

    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        let config_path = format!("{}/media-console/config.toml", xdg_config_home);
        if std::path::Path::new(&config_path).exists() {
            return Some(config_path);
        }
    }

    if let Some(home) = dirs::home_dir() {
        let config_path = format!("{}/.config/media-console/config.toml", home.display());
        if std::path::Path::new(&config_path).exists() {
            return Some(config_path);
        }
    }

    None
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = get_config_path(&args);
    let config = match &config_path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => Config::default(),
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    // Logs go to stderr so stdout only carries the rendered view
    if config.get_logging_format() == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    match &config_path {
        Some(path) => info!("Loaded config from: {}", path),
        None => info!("No config file found, using defaults"),
    }

    let endpoint = config.endpoint();
    let transport = ReqwestTransport::new(&endpoint, config.timeout())?;
    let client = MediaStoreClient::new(Arc::new(transport));
    info!("Using media endpoint {}", endpoint);

    let notifier: Arc<dyn Notifier> = if args.quiet {
        Arc::new(LogNotifier)
    } else {
        Arc::new(TerminalNotifier)
    };

    run(args.command, client, notifier).await
}

async fn run(
    command: Command,
    client: MediaStoreClient,
    notifier: Arc<dyn Notifier>,
) -> Result<()> {
    match command {
        Command::List { kind } => {
            let gallery = GalleryViewModel::new(kind, client, notifier);
            gallery.refresh().await;
            println!("{}", render_gallery(kind, &gallery.view()));
        }
        Command::Upload {
            kind,
            title,
            fields,
        } => {
            let (tx, rx) = mpsc::unbounded_channel();
            let gallery = GalleryViewModel::new(kind, client.clone(), notifier.clone());
            let form = UploadFormController::new(kind, client, notifier, tx);

            form.open();
            form.set_field(Field::Title, &title)?;
            for (field, value) in &fields {
                form.set_field(*field, value)?;
            }

            let outcome = form.submit().await;
            // closes the channel so the gallery stops after the last signal
            drop(form);
            gallery.listen(rx).await;

            match outcome {
                SubmitOutcome::Created => {
                    println!("{}", render_gallery(kind, &gallery.view()))
                }
                SubmitOutcome::Invalid(e) => anyhow::bail!("Nothing uploaded: {e}"),
                SubmitOutcome::Failed(e) => anyhow::bail!("Upload failed: {e}"),
                SubmitOutcome::Busy => anyhow::bail!("Another upload is still running"),
            }
        }
        Command::Delete { kind, id } => {
            let gallery = GalleryViewModel::new(kind, client, notifier);
            gallery.refresh().await;
            if gallery.request_delete(id).await == DeleteOutcome::Failed {
                anyhow::bail!("Could not delete {} {}", kind, id);
            }
            println!("{}", render_gallery(kind, &gallery.view()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("video_url=https://x/y.mp4?a=b").unwrap(),
            (Field::VideoUrl, "https://x/y.mp4?a=b".to_string())
        );
        assert!(parse_field("video_url").is_err());
        assert!(parse_field("bitrate=3").is_err());
    }

    #[test]
    fn test_cli_parses_upload() {
        let args = Args::try_parse_from([
            "media-console",
            "upload",
            "music",
            "--title",
            "Song",
            "-f",
            "audio_url=https://a/x.mp3",
            "-f",
            "duration=180",
        ])
        .unwrap();

        match args.command {
            Command::Upload {
                kind,
                title,
                fields,
            } => {
                assert_eq!(kind, Kind::Music);
                assert_eq!(title, "Song");
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[1], (Field::Duration, "180".to_string()));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_delete() {
        let args = Args::try_parse_from(["media-console", "delete", "videos", "5"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Delete {
                kind: Kind::Video,
                id: 5
            }
        ));
        assert!(Args::try_parse_from(["media-console", "list", "podcasts"]).is_err());
    }
}
