//! Dump the song index with album years for a quick look at a catalog.
//!
//! Usage: cargo run --bin dump_index [-- --root path/to/project]

use anyhow::{Context, Result};
use lyricbook::catalog::load_index;
use lyricbook::config::Config;
use lyricbook::resolver::resolve;
use lyricbook::titles::and_join;

fn main() -> Result<()> {
    let root = std::env::args()
        .position(|a| a == "--root")
        .and_then(|i| std::env::args().nth(i + 1));

    let config = match root {
        Some(root) => Config::with_root(root),
        None => Config::load().context("Failed to load config")?,
    };

    let albums = load_index(&config.index_path)?;
    let index = resolve(&albums);

    println!("=== Albums ({}) ===", albums.len());
    for album in &albums {
        println!("  {} | {} | {} songs", album.year(), album.name, album.songs.len());
    }

    println!("\n=== Songs ({}) ===\n", index.len());
    for name in index.names_by_title() {
        let groups = index.get(name).unwrap_or_default();
        println!("--- {name} ({} versions) ---", groups.len());
        for group in groups {
            let albums: Vec<String> = group
                .albums
                .iter()
                .map(|a| format!("{} ({})", a.name, a.release_date.format("%Y")))
                .collect();
            println!("  [{:<24}] {}", group.category.to_string(), and_join(&albums));
        }
    }

    Ok(())
}
