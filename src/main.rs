//! `lyricbook` - song index and lyrics annotation checker.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lyricbook::annotations::{splice_marks, AlignedLyrics};
use lyricbook::catalog::load_index;
use lyricbook::config::Config;
use lyricbook::library::{BatchOptions, LyricsLibrary};
use lyricbook::resolver::resolve;
use lyricbook::titles::and_join;
use lyricbook::types::SongId;

#[derive(Parser)]
#[command(name = "lyricbook")]
#[command(about = "Resolve song versions across albums and align lyric footnotes")]
struct Args {
    /// Project root (overrides LYRICBOOK_ROOT)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Index file (overrides LYRICBOOK_INDEX)
    #[arg(long)]
    index: Option<PathBuf>,

    /// Lyrics directory (overrides LYRICBOOK_LYRICS_DIR)
    #[arg(long)]
    lyrics_dir: Option<PathBuf>,

    /// Skip songs whose lyrics file is missing
    #[arg(long)]
    skip_missing: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the song index: every song and the albums each version is on
    Index,
    /// Align one song's lyrics and print its lines and footnotes
    Align {
        /// Lyrics file identifier
        song_id: String,
    },
    /// Align every song on every album and report problems
    Check,
    /// List lyrics files that no song refers to
    Orphans,
}

fn main() -> Result<()> {
    {
        use tracing_subscriber::prelude::*;

        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }

    let args = Args::parse();
    let config = configure(&args)?;
    tracing::debug!(
        "{} {}: index {}, lyrics {}",
        config.app_name(),
        config.app_version(),
        config.index_path.display(),
        config.lyrics_dir.display()
    );
    let library = LyricsLibrary::new(&config.lyrics_dir);

    match args.command {
        Command::Index => {
            let albums = load_index(&config.index_path)?;
            let index = resolve(&albums);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&index)?);
                return Ok(());
            }
            for name in index.names_by_title() {
                println!("{name}");
                for group in index.get(name).unwrap_or_default() {
                    let albums: Vec<String> =
                        group.albums.iter().map(|a| format!("{} ({})", a.name, a.release_date.format("%Y"))).collect();
                    println!("    {}: {}", group.category, and_join(&albums));
                }
            }
        }
        Command::Align { song_id } => {
            let (aligned, _) = library.align_song(&SongId::new(song_id))?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&aligned)?);
            } else {
                print_aligned(&aligned);
            }
        }
        Command::Check => {
            let albums = load_index(&config.index_path)?;
            let options = BatchOptions { skip_missing: config.skip_missing_lyrics };
            let outcome = library.align_albums(&albums, options)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                return Ok(());
            }
            println!(
                "{} lyrics files aligned, {} appearances, {} skipped",
                outcome.lyrics.len(),
                outcome.appearances.len(),
                outcome.skipped.len()
            );
            for id in &outcome.skipped {
                println!("  missing: {}", library.path_for(id).display());
            }
        }
        Command::Orphans => {
            let albums = load_index(&config.index_path)?;
            for path in library.orphans(&albums) {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}

/// Environment config with command-line overrides applied.
fn configure(args: &Args) -> Result<Config> {
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(root) = &args.root {
        let skip = config.skip_missing_lyrics;
        config = Config::with_root(root);
        config.skip_missing_lyrics = skip;
    }
    if let Some(index) = &args.index {
        config.index_path = config.resolve(index);
    }
    if let Some(dir) = &args.lyrics_dir {
        config.lyrics_dir = config.resolve(dir);
    }
    config.skip_missing_lyrics |= args.skip_missing;

    if !config.lyrics_dir.is_dir() && !matches!(args.command, Command::Index) {
        bail!("Lyrics directory {} does not exist", config.lyrics_dir.display());
    }
    Ok(config)
}

fn print_aligned(aligned: &AlignedLyrics) {
    for paragraph in &aligned.paragraphs {
        for line in &paragraph.lines {
            println!("{}", splice_marks(&line.text, &line.marks, |m| format!("[{}]", m.number)));
        }
        println!();
    }
    for note in &aligned.footnotes {
        println!("[{}] {}", note.ordinal, note.text);
    }
}
