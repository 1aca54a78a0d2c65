use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use cn_store::SqliteStore;

mod enhance;
mod export;
mod notes;

use enhance::GeminiClient;
use export::DownloadFormat;

#[derive(Parser)]
#[command(name = "ciphernote")]
#[command(about = "Zero-knowledge note sharing: encrypt locally, store ciphertext, share one link", long_about = None)]
struct Cli {
    /// SQLite database holding the (ciphertext-only) note store
    #[arg(long, default_value = "ciphernote.db", global = true)]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a note and print its share locator
    Create {
        /// Read plaintext from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Decrypt and print a note from its locator
    View {
        /// Share locator (bare `view/<id>?k=...` or a full pasted URL)
        locator: String,

        /// Reformat into Markdown via Gemini (requires GEMINI_API_KEY)
        #[arg(long)]
        auto_format: bool,

        /// Print a two-sentence AI summary (requires GEMINI_API_KEY)
        #[arg(long)]
        summarize: bool,

        /// Also save the note to a local file in the given format
        #[arg(long, value_enum)]
        download: Option<DownloadFormat>,

        /// Output path for --download (defaults to secure-note-<id>.<ext>)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Create { file } => create_command(&cli.db, file).await,
        Commands::View {
            locator,
            auto_format,
            summarize,
            download,
            out,
        } => view_command(&cli.db, &locator, auto_format, summarize, download, out).await,
    }
}

async fn create_command(db: &Path, file: Option<PathBuf>) -> Result<()> {
    let content = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading plaintext from stdin")?;
            buf
        }
    };
    if content.trim().is_empty() {
        return Err(anyhow!("refusing to encrypt an empty note"));
    }

    let store = SqliteStore::open(db).await?;
    let created = notes::create_note(&store, &content).await?;

    println!("Note encrypted and stored (id {}).", created.note_id);
    println!();
    println!("Share locator — this is the ONLY copy of the decryption key.");
    println!("If it is lost the note is lost; anyone holding it can decrypt:");
    println!();
    println!("  {}", created.locator);
    println!();
    println!("View with: ciphernote view '{}'", created.locator);
    Ok(())
}

async fn view_command(
    db: &Path,
    locator: &str,
    auto_format: bool,
    summarize: bool,
    download: Option<DownloadFormat>,
    out: Option<PathBuf>,
) -> Result<()> {
    let store = SqliteStore::open(db).await?;
    let viewed = notes::view_note(&store, locator).await?;

    let ai = if auto_format || summarize {
        let client = GeminiClient::from_env();
        if client.is_none() {
            tracing::warn!("GEMINI_API_KEY not set; skipping AI post-processing");
        }
        client
    } else {
        None
    };

    // Post-processing only ever touches already-decrypted text, and only
    // because the user asked; the note is shown regardless of its outcome.
    let mut content = viewed.content;
    if let Some(client) = &ai {
        if auto_format {
            content = client.auto_format(&content).await;
        }
        if summarize {
            if let Some(summary) = client.summarize(&content).await {
                println!("── Summary ─────────────────────────────────────");
                println!("{summary}");
                println!("────────────────────────────────────────────────");
                println!();
            }
        }
    }

    println!("{content}");

    if let Some(format) = download {
        let path = out.unwrap_or_else(|| PathBuf::from(export::file_name(format, &viewed.note_id)));
        std::fs::write(&path, export::render(format, &content))
            .with_context(|| format!("writing {}", path.display()))?;
        eprintln!("Saved {}", path.display());
    }
    Ok(())
}
