//! The `run` command: evaluate a recipe and serialize its output.

use crate::cli::OutputFormat;
use crate::core::{Playlist, Records, Track};
use crate::recipes::{find_recipe, RecipeParams};
use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Configuration for a single recipe run.
pub struct RunConfig {
    pub recipe: String,
    pub params: Vec<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// Look up the recipe, build its pipeline, pull the terminal output, and
/// write it out.
pub fn run_recipe(config: RunConfig) -> Result<()> {
    let recipe = find_recipe(&config.recipe)
        .ok_or_else(|| anyhow!("unknown recipe '{}' (try `playsmith list`)", config.recipe))?;

    let params = parse_params(&config.params)?;
    let terminal = recipe.create(&params)?;
    log::info!("running recipe '{}'", recipe.slug());
    let records = terminal.evaluate()?;

    let mut writer = create_writer(config.output.as_deref())?;
    write_records(&mut *writer, &records, config.format)
}

fn parse_params(raw: &[String]) -> Result<RecipeParams> {
    let mut params = RecipeParams::new();
    for pair in raw {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("parameter '{}' is not in name=value form", pair))?;
        params.set(name, value);
    }
    Ok(params)
}

fn create_writer(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

fn write_records(writer: &mut dyn Write, records: &Records, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = match records {
                Records::Playlists(playlists) if playlists.len() == 1 => {
                    serde_json::to_string_pretty(&playlists[0])?
                }
                Records::Playlists(playlists) => serde_json::to_string_pretty(playlists)?,
                Records::Tracks(tracks) => serde_json::to_string_pretty(tracks)?,
                Records::Artists(artists) => serde_json::to_string_pretty(artists)?,
            };
            writeln!(writer, "{}", json)?;
        }
        OutputFormat::Text => match records {
            Records::Playlists(playlists) => {
                for playlist in playlists {
                    write_playlist_text(writer, playlist)?;
                }
            }
            Records::Tracks(tracks) => {
                for (index, track) in tracks.iter().enumerate() {
                    writeln!(writer, "{:>3}. {}", index + 1, track_line(track))?;
                }
            }
            Records::Artists(artists) => {
                for artist in artists {
                    writeln!(writer, "{}", artist.name.as_deref().unwrap_or(&artist.id))?;
                }
            }
        },
    }
    Ok(())
}

fn write_playlist_text(writer: &mut dyn Write, playlist: &Playlist) -> Result<()> {
    writeln!(writer, "{}", playlist.name)?;
    writeln!(writer, "{}", playlist.description)?;
    writeln!(writer)?;
    for (index, track) in playlist.tracks.iter().enumerate() {
        writeln!(writer, "{:>3}. {}", index + 1, track_line(track))?;
    }
    Ok(())
}

fn track_line(track: &Track) -> String {
    let title = track.title.as_deref().unwrap_or(&track.id);
    match track.artist.as_ref().and_then(|a| a.name.as_deref()) {
        Some(artist) => format!("{} - {}", artist, title),
        None => title.to_string(),
    }
}
