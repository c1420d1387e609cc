//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use ini::{Ini, Properties};

use super::file::ConfigFileError;
use super::settings::{ConfigFile, EllipsoidModel};

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
/// The assembled mesh settings are validated before returning.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [mesh] section
    if let Some(section) = ini.section(Some("mesh")) {
        if let Some(v) = parse_value(section, "mesh", "samples_per_side", "must be an integer >= 2")? {
            config.mesh.samples_per_side = v;
        }
        if let Some(v) = parse_value(section, "mesh", "skirt_height", "must be a number (metres)")? {
            config.mesh.skirt_height = v;
        }
        if let Some(v) = parse_value(section, "mesh", "water_depth", "must be a number (metres)")? {
            config.mesh.water_depth = v;
        }
        if let Some(v) = parse_value(
            section,
            "mesh",
            "max_concurrent_requests",
            "must be a positive integer",
        )? {
            config.mesh.max_concurrent_requests = v;
        }
    }

    // [tiling] section
    if let Some(section) = ini.section(Some("tiling")) {
        if let Some(v) = parse_value(
            section,
            "tiling",
            "scheme",
            "must be 'web_mercator' or 'geographic'",
        )? {
            config.tiling.scheme = v;
        }
        if let Some(v) = parse_positive(section, "tiling", "tile_size")? {
            config.tiling.tile_size = v;
        }
        if let Some(v) = parse_value(section, "tiling", "max_level", "must be an integer")? {
            config.tiling.max_level = v;
        }
        if let Some(v) = parse_positive(section, "tiling", "base_tiles_x")? {
            config.tiling.base_tiles_x = v;
        }
        if let Some(v) = parse_positive(section, "tiling", "base_tiles_y")? {
            config.tiling.base_tiles_y = v;
        }
    }

    // [ellipsoid] section
    if let Some(section) = ini.section(Some("ellipsoid")) {
        if let Some(v) = parse_value(
            section,
            "ellipsoid",
            "model",
            "must be one of: wgs84, unit_sphere, custom",
        )? {
            config.ellipsoid.model = v;
        }
        if let Some(v) = parse_value(
            section,
            "ellipsoid",
            "equatorial_radius",
            "must be a number (metres)",
        )? {
            config.ellipsoid.equatorial_radius = v;
        }
        if let Some(v) =
            parse_value(section, "ellipsoid", "polar_radius", "must be a number (metres)")?
        {
            config.ellipsoid.polar_radius = v;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
    }

    validate_ellipsoid(&config)?;
    config.mesh_config().validate()?;

    Ok(config)
}

/// Parse an optional key with `FromStr`, mapping failures to `InvalidValue`.
fn parse_value<T: FromStr>(
    section: &Properties,
    section_name: &str,
    key: &str,
    reason: &str,
) -> Result<Option<T>, ConfigFileError> {
    let Some(raw) = section.get(key) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .map_err(|_| ConfigFileError::InvalidValue {
            section: section_name.to_string(),
            key: key.to_string(),
            value: raw.to_string(),
            reason: reason.to_string(),
        })
}

fn parse_positive(
    section: &Properties,
    section_name: &str,
    key: &str,
) -> Result<Option<u32>, ConfigFileError> {
    let reason = "must be a positive integer";
    match parse_value::<u32>(section, section_name, key, reason)? {
        Some(0) => Err(ConfigFileError::InvalidValue {
            section: section_name.to_string(),
            key: key.to_string(),
            value: "0".to_string(),
            reason: reason.to_string(),
        }),
        other => Ok(other),
    }
}

fn validate_ellipsoid(config: &ConfigFile) -> Result<(), ConfigFileError> {
    if config.ellipsoid.model != EllipsoidModel::Custom {
        return Ok(());
    }

    let equatorial = config.ellipsoid.equatorial_radius;
    let polar = config.ellipsoid.polar_radius;

    if !(equatorial.is_finite() && equatorial > 0.0) {
        return Err(ConfigFileError::InvalidValue {
            section: "ellipsoid".to_string(),
            key: "equatorial_radius".to_string(),
            value: equatorial.to_string(),
            reason: "must be a positive number".to_string(),
        });
    }
    if !(polar.is_finite() && polar > 0.0 && polar <= equatorial) {
        return Err(ConfigFileError::InvalidValue {
            section: "ellipsoid".to_string(),
            key: "polar_radius".to_string(),
            value: polar.to_string(),
            reason: "must be positive and not exceed equatorial_radius".to_string(),
        });
    }
    Ok(())
}

/// Expand a leading `~/` to the user's home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use crate::config::settings::TilingScheme;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, content).unwrap();
        ConfigFile::load_from(&config_path)
    }

    #[test]
    fn test_mesh_section_overrides_defaults() {
        let config = load(
            r#"
[mesh]
samples_per_side = 17
skirt_height = 120.5
water_depth = 3
max_concurrent_requests = 6
"#,
        )
        .unwrap();

        assert_eq!(config.mesh.samples_per_side, 17);
        assert_eq!(config.mesh.skirt_height, 120.5);
        assert_eq!(config.mesh.water_depth, 3.0);
        assert_eq!(config.mesh.max_concurrent_requests, 6);
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let config = load("[mesh]\nskirt_height = 10\n").unwrap();

        assert_eq!(config.mesh.samples_per_side, DEFAULT_SAMPLES_PER_SIDE);
        assert_eq!(config.mesh.water_depth, DEFAULT_WATER_DEPTH);
        assert_eq!(config.tiling.scheme, TilingScheme::WebMercator);
    }

    #[test]
    fn test_invalid_number() {
        let err = load("[mesh]\nsamples_per_side = lots\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("mesh.samples_per_side"));
        assert!(msg.contains("lots"));
    }

    #[test]
    fn test_too_few_samples_rejected() {
        let err = load("[mesh]\nsamples_per_side = 1\n").unwrap_err();
        assert!(matches!(err, ConfigFileError::Mesh(_)));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let err = load("[mesh]\nmax_concurrent_requests = 0\n").unwrap_err();
        assert!(matches!(err, ConfigFileError::Mesh(_)));
    }

    #[test]
    fn test_tiling_scheme_parsing() {
        let config = load(
            r#"
[tiling]
scheme = Geographic
tile_size = 512
max_level = 12
base_tiles_x = 4
base_tiles_y = 2
"#,
        )
        .unwrap();

        assert_eq!(config.tiling.scheme, TilingScheme::Geographic);
        assert_eq!(config.tiling.tile_size, 512);
        assert_eq!(config.tiling.max_level, 12);
        assert_eq!(config.tiling.base_tiles_x, 4);
        assert_eq!(config.tiling.base_tiles_y, 2);
    }

    #[test]
    fn test_invalid_tiling_scheme() {
        let err = load("[tiling]\nscheme = polar\n").unwrap_err();
        assert!(err.to_string().contains("web_mercator"));
    }

    #[test]
    fn test_zero_tile_size_rejected() {
        let err = load("[tiling]\ntile_size = 0\n").unwrap_err();
        assert!(err.to_string().contains("tiling.tile_size"));
    }

    #[test]
    fn test_custom_ellipsoid() {
        let config = load(
            r#"
[ellipsoid]
model = custom
equatorial_radius = 3396190
polar_radius = 3376200
"#,
        )
        .unwrap();

        let ellipsoid = config.ellipsoid();
        assert_eq!(ellipsoid.equatorial_radius(), 3_396_190.0);
        assert_eq!(ellipsoid.polar_radius(), 3_376_200.0);
    }

    #[test]
    fn test_prolate_custom_ellipsoid_rejected() {
        let err = load(
            r#"
[ellipsoid]
model = custom
equatorial_radius = 1000
polar_radius = 2000
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("ellipsoid.polar_radius"));
    }

    #[test]
    fn test_custom_radii_ignored_for_named_model() {
        let config = load(
            r#"
[ellipsoid]
model = unit_sphere
equatorial_radius = 1000
polar_radius = 2000
"#,
        )
        .unwrap();
        assert_eq!(config.ellipsoid().equatorial_radius(), 1.0);
    }

    #[test]
    fn test_logging_directory_tilde_expansion() {
        let config = load("[logging]\ndirectory = ~/mesh-logs\nfile = run.log\n").unwrap();

        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.logging.directory, home.join("mesh-logs"));
        }
        assert_eq!(config.logging.file, "run.log");
    }

    #[test]
    fn test_empty_values_ignored() {
        let config = load("[mesh]\nskirt_height =\n").unwrap();
        assert_eq!(config.mesh.skirt_height, DEFAULT_SKIRT_HEIGHT);
    }
}
