//! JSON configuration of the demo tools and cascade file loading.

pub mod detect;
pub mod transform;

use crate::cascade::CascadeDescriptor;
use std::fs;
use std::path::Path;

/// Load a cascade from disk.
///
/// The file holds the flat numeric layout either as a JSON array or as plain
/// numbers separated by commas and/or whitespace.
pub fn load_cascade(path: &Path) -> Result<CascadeDescriptor, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read cascade {}: {e}", path.display()))?;
    let values = parse_cascade_values(&data)
        .map_err(|e| format!("Failed to parse cascade {}: {e}", path.display()))?;
    CascadeDescriptor::from_flat(&values)
        .map_err(|e| format!("Invalid cascade {}: {e}", path.display()))
}

fn parse_cascade_values(data: &str) -> Result<Vec<f64>, String> {
    let trimmed = data.trim();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|e| e.to_string());
    }
    trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<f64>()
                .map_err(|e| format!("bad number {tok:?}: {e}"))
        })
        .collect()
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_arrays_and_plain_lists() {
        assert_eq!(
            parse_cascade_values("[20, 20, -1.5, 0]").unwrap(),
            vec![20.0, 20.0, -1.5, 0.0]
        );
        assert_eq!(
            parse_cascade_values("20,20,\n -1.5 , 0\n").unwrap(),
            vec![20.0, 20.0, -1.5, 0.0]
        );
        assert!(parse_cascade_values("20, twenty").is_err());
    }
}
