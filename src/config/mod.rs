use anyhow::{Context, Result};
use mapviz::VizConfig;
use routegraph::Location;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up when none is given on the command line
pub const DEFAULT_CONFIG: &str = "locations.json";

/// Image written when neither the config nor the command line name one
pub const DEFAULT_OUTPUT: &str = "map.png";

/// Locations plus appearance, as read from the config file
#[derive(Debug, Deserialize)]
pub struct MapConfig {
    pub locations: Vec<Location>,

    #[serde(default)]
    pub output_filename: Option<PathBuf>,

    #[serde(flatten)]
    pub viz: VizConfig,
}

impl MapConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse map config")
    }

    /// Where to write the image: the command line wins over the config file
    pub fn output_path(&self, override_path: Option<&Path>) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .or_else(|| self.output_filename.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }
}

/// Read and parse a config file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MapConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    MapConfig::from_json(&text)
        .with_context(|| format!("Invalid config file: {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"{
        "locations": [
            {"name": "Montcuq", "location": [522, 65, 180], "destinations": ["Spawn", ["Kanave", "1:15"]]},
            {"name": "Spawn", "location": [-165, 56, 231]},
            {"name": "Kanave", "location": [360, 59, -132], "destinations": ["Montcuq"]}
        ],
        "output_filename": "example.png",
        "output_size": [800, 600],
        "font_size": 11,
        "route_colors": [[1, 0, 0]]
    }"#;

    #[test]
    fn test_parse_config() {
        let config = MapConfig::from_json(EXAMPLE).unwrap();

        assert_eq!(config.locations.len(), 3);
        assert_eq!(config.locations[0].destinations.len(), 2);
        assert_eq!(config.viz.output_size, (800, 600));
        assert_eq!(config.viz.font_size, 11.0);
        assert_eq!(config.viz.route_colors, vec![[1.0, 0.0, 0.0]]);
        assert_eq!(config.viz.draw_area, 0.85);
    }

    #[test]
    fn test_output_path_precedence() {
        let config = MapConfig::from_json(EXAMPLE).unwrap();
        assert_eq!(config.output_path(Some(Path::new("cli.png"))), PathBuf::from("cli.png"));
        assert_eq!(config.output_path(None), PathBuf::from("example.png"));

        let bare = MapConfig::from_json(r#"{"locations": []}"#).unwrap();
        assert_eq!(bare.output_path(None), PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn test_missing_locations_rejected() {
        assert!(MapConfig::from_json(r#"{"output_size": [10, 10]}"#).is_err());
    }

    #[test]
    fn test_load_example_config() {
        let config = load_config("locations-example.json").unwrap();

        assert_eq!(config.locations.len(), 9);
        assert_eq!(config.viz.route_colors.len(), 6);
        assert_eq!(config.viz.label_bg_color, [1.0, 1.0, 1.0, 0.75]);
        assert_eq!(config.output_path(None), PathBuf::from("locations-example.png"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config("/nonexistent/locations.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
