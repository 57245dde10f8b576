//! Catalog commands that run against the local database without the HTTP
//! server. Results are printed as pretty JSON.

use clap::Args;
use serde::Serialize;

use crate::core::filter::{RawFilter, RawVerseRange, SongFilter};
use crate::core::verses;
use crate::error::{Result, SongLibError};
use crate::services::ServiceFactory;

#[derive(Args)]
pub struct AddArgs {
    /// Song title
    #[arg(value_name = "SONG")]
    song: String,

    /// Performing group
    #[arg(value_name = "GROUP")]
    group: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// Match a single id
    #[arg(long)]
    id: Option<String>,

    /// Match the exact title
    #[arg(long)]
    song: Option<String>,

    /// Match the exact group
    #[arg(long)]
    group: Option<String>,

    /// Match the exact release date (DD.MM.YYYY)
    #[arg(long)]
    date: Option<String>,

    /// Show only this verse of each song (1-based)
    #[arg(long)]
    verse: Option<String>,

    /// Page size (defaults to 10)
    #[arg(short, long)]
    limit: Option<String>,

    /// Rows to skip
    #[arg(short, long)]
    offset: Option<String>,
}

#[derive(Args)]
pub struct VersesArgs {
    /// Song id
    id: i64,

    /// Verses per page (defaults to 10)
    #[arg(short, long)]
    limit: Option<String>,

    /// Verses to skip
    #[arg(short, long)]
    offset: Option<String>,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Song id
    id: i64,

    #[arg(long)]
    song: Option<String>,

    #[arg(long)]
    group: Option<String>,

    /// Full lyrics, verses separated by a blank line
    #[arg(long)]
    text: Option<String>,

    /// Replace the lyrics verse by verse (repeatable)
    #[arg(long = "verse", conflicts_with = "text")]
    verses: Vec<String>,

    #[arg(long)]
    link: Option<String>,

    /// Release date (DD.MM.YYYY)
    #[arg(long)]
    date: Option<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Song id
    id: i64,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).map_err(|e| SongLibError::Internal(e.into()))?;
    println!("{}", output);
    Ok(())
}

fn not_found(id: i64) -> SongLibError {
    SongLibError::Validation(format!("Song {} not found", id))
}

pub async fn add(args: AddArgs, services: &ServiceFactory) -> Result<()> {
    let catalog = services.create_catalog().await?;
    let song = catalog.create(&args.song, &args.group).await?;
    print_json(&song)
}

pub async fn list(args: ListArgs, services: &ServiceFactory) -> Result<()> {
    let raw = RawFilter {
        id: args.id,
        song: args.song,
        group: args.group,
        date: args.date,
        verse: args.verse,
        limit: args.limit,
        offset: args.offset,
    };
    let filter = SongFilter::from_raw(&raw)?;

    let catalog = services.create_catalog().await?;
    let songs = catalog.list(&filter).await?;
    print_json(&songs)
}

pub async fn verses(args: VersesArgs, services: &ServiceFactory) -> Result<()> {
    let range = RawVerseRange {
        limit: args.limit,
        offset: args.offset,
    }
    .normalize()?;

    let catalog = services.create_catalog().await?;
    let verses = catalog.verses(args.id, range).await?.ok_or_else(|| not_found(args.id))?;
    print_json(&verses)
}

/// Fields not given on the command line keep their stored values.
pub async fn update(args: UpdateArgs, services: &ServiceFactory) -> Result<()> {
    let catalog = services.create_catalog().await?;
    let mut song = catalog.get(args.id).await?.ok_or_else(|| not_found(args.id))?;

    if let Some(title) = args.song {
        song.title = title;
    }
    if let Some(group) = args.group {
        song.group = group;
    }
    if let Some(text) = args.text {
        song.text = text;
    } else if !args.verses.is_empty() {
        song.text = verses::join(&args.verses);
    }
    if let Some(link) = args.link {
        song.link = link;
    }
    if let Some(date) = args.date {
        song.date = date;
    }

    if !catalog.update(&song).await? {
        return Err(not_found(args.id));
    }
    print_json(&song)
}

pub async fn delete(args: DeleteArgs, services: &ServiceFactory) -> Result<()> {
    let catalog = services.create_catalog().await?;
    if !catalog.delete(args.id).await? {
        return Err(not_found(args.id));
    }
    println!("Deleted song {}", args.id);
    Ok(())
}
