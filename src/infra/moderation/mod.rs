// Pattern table sources for the moderation core.

pub mod json_pattern_source;

pub use json_pattern_source::{load_pattern_library, read_pattern_config, write_pattern_config};
