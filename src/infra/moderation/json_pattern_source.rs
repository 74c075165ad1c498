// Loads moderation pattern tables from a JSON file so the rules can change
// without a rebuild. The file has the same shape as PatternConfig:
//
// {
//   "prohibited": [{ "category": "violence", "patterns": ["\\b(kill|...)\\b"] }],
//   "positive":   [{ "category": "technical", "patterns": ["..."] }],
//   "topics":     [{ "topic": "frontend-development", "pattern": "..." }]
// }

use crate::core::moderation::{PatternConfig, PatternError, PatternLibrary};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read a pattern config from disk without compiling it.
pub fn read_pattern_config(path: impl AsRef<Path>) -> Result<PatternConfig, PatternError> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Read and compile a pattern library from disk.
pub fn load_pattern_library(path: impl AsRef<Path>) -> Result<PatternLibrary, PatternError> {
    let path = path.as_ref();
    let config = read_pattern_config(path)?;
    let library = PatternLibrary::from_config(config)?;
    tracing::info!(path = %path.display(), "Loaded moderation patterns");
    Ok(library)
}

/// Write a pattern config to disk, pretty-printed. Handy for seeding a file
/// from the built-in tables before editing it.
pub fn write_pattern_config(
    path: impl AsRef<Path>,
    config: &PatternConfig,
) -> Result<(), PatternError> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}
