//! Common helpers shared across CLI commands.

use std::path::Path;

use treasure_scene::{EngineConfig, Entity, GeoPoint};

use crate::error::CliError;

/// Parse a `LAT,LNG` argument.
pub fn parse_geo_point(s: &str) -> Result<GeoPoint, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got '{}'", s))?;

    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lng.trim()))?;

    Ok(GeoPoint::new(lat, lng))
}

/// Load the engine configuration, falling back to defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, CliError> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading engine configuration");
            Ok(EngineConfig::load(path)?)
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Load a JSON venue list.
pub fn load_venues(path: &Path) -> Result<Vec<Entity>, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::VenueRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| CliError::VenueParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_geo_point() {
        assert_eq!(
            parse_geo_point("3.1390,101.6869").unwrap(),
            GeoPoint::new(3.1390, 101.6869)
        );
        assert_eq!(
            parse_geo_point(" -33.86 , 151.21 ").unwrap(),
            GeoPoint::new(-33.86, 151.21)
        );
    }

    #[test]
    fn test_parse_geo_point_errors() {
        assert!(parse_geo_point("3.1390").unwrap_err().contains("LAT,LNG"));
        assert!(parse_geo_point("north,101.6")
            .unwrap_err()
            .contains("latitude"));
        assert!(parse_geo_point("3.1,east").unwrap_err().contains("longitude"));
    }

    #[test]
    fn test_load_config_defaults_without_path() {
        assert_eq!(load_config(None).unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_load_venues() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "a", "geo": {{"lat": 3.15, "lng": 101.7}}}}, {{"id": "b"}}]"#
        )
        .unwrap();

        let venues = load_venues(file.path()).unwrap();
        assert_eq!(venues.len(), 2);
        assert_eq!(venues[0].geo, Some(GeoPoint::new(3.15, 101.7)));
        assert_eq!(venues[1].geo, None);
    }

    #[test]
    fn test_load_venues_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            load_venues(file.path()),
            Err(CliError::VenueParse { .. })
        ));
    }

    #[test]
    fn test_load_venues_missing_file() {
        assert!(matches!(
            load_venues(Path::new("/nonexistent/venues.json")),
            Err(CliError::VenueRead { .. })
        ));
    }
}
