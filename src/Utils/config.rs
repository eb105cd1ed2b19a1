//! Generator configuration, read from a TOML file.
//!
//! ```toml
//! output_dir = "generated"
//! simplify = true
//! log_level = "info"
//! log_file = "solver_coeffs.log"
//!
//! [solvers.trifocal]
//! enabled = true
//! output_file = "trifocal_coeffs.txt"
//! simplify = false
//!
//! [solvers.trifocal.extra_renames]
//! t0_00 = "T1.a11"
//! ```
//!
//! Every key is optional. Solver sections are named like [`SolverKind`]; an
//! unknown section, an unknown key or a value of the wrong type is an error.
use crate::codegen::rename::RenameTable;
use crate::drivers::{DriverOptions, SolverKind};
use crate::error::{CoeffError, Result};
use log::debug;
use simplelog::LevelFilter;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

/// Per-solver overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    pub enabled: bool,
    pub output_file: Option<String>,
    /// `None` inherits [`GeneratorConfig::simplify`].
    pub simplify: Option<bool>,
    pub extra_renames: HashMap<String, String>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output_file: None,
            simplify: None,
            extra_renames: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub output_dir: PathBuf,
    pub simplify: bool,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
    pub solvers: HashMap<SolverKind, SolverConfig>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("generated"),
            simplify: true,
            log_level: LevelFilter::Info,
            log_file: None,
            solvers: HashMap::new(),
        }
    }
}

fn config_error(msg: String) -> CoeffError {
    CoeffError::Config(msg)
}

fn as_str<'a>(key: &str, value: &'a Value) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| config_error(format!("'{}' must be a string", key)))
}

fn as_bool(key: &str, value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| config_error(format!("'{}' must be a boolean", key)))
}

fn as_table<'a>(key: &str, value: &'a Value) -> Result<&'a Table> {
    value
        .as_table()
        .ok_or_else(|| config_error(format!("'{}' must be a table", key)))
}

fn parse_solver(name: &str, table: &Table) -> Result<SolverConfig> {
    let mut solver = SolverConfig::default();
    for (key, value) in table {
        let full_key = format!("solvers.{}.{}", name, key);
        match key.as_str() {
            "enabled" => solver.enabled = as_bool(&full_key, value)?,
            "output_file" => solver.output_file = Some(as_str(&full_key, value)?.to_string()),
            "simplify" => solver.simplify = Some(as_bool(&full_key, value)?),
            "extra_renames" => {
                for (pattern, replacement) in as_table(&full_key, value)? {
                    let replacement = as_str(&format!("{}.{}", full_key, pattern), replacement)?;
                    solver
                        .extra_renames
                        .insert(pattern.clone(), replacement.to_string());
                }
            }
            other => return Err(config_error(format!("unknown key '{}' in [solvers.{}]", other, name))),
        }
    }
    Ok(solver)
}

impl GeneratorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: Table = toml::from_str(text)?;
        let mut config = GeneratorConfig::default();
        for (key, value) in &table {
            match key.as_str() {
                "output_dir" => config.output_dir = PathBuf::from(as_str(key, value)?),
                "simplify" => config.simplify = as_bool(key, value)?,
                "log_level" => {
                    let name = as_str(key, value)?;
                    config.log_level = name.parse().map_err(|_| {
                        config_error(format!("'{}' is not a log level", name))
                    })?;
                }
                "log_file" => config.log_file = Some(PathBuf::from(as_str(key, value)?)),
                "solvers" => {
                    for (name, section) in as_table(key, value)? {
                        let kind = SolverKind::from_name(name).map_err(|_| {
                            config_error(format!("unknown solver section [solvers.{}]", name))
                        })?;
                        let section = as_table(&format!("solvers.{}", name), section)?;
                        config.solvers.insert(kind, parse_solver(name, section)?);
                    }
                }
                other => return Err(config_error(format!("unknown key '{}'", other))),
            }
        }
        debug!("configuration: {:?}", config);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Overrides for `kind`, defaults when the file has no section for it.
    pub fn solver(&self, kind: SolverKind) -> SolverConfig {
        self.solvers.get(&kind).cloned().unwrap_or_default()
    }

    pub fn output_path(&self, kind: SolverKind) -> PathBuf {
        let file = self
            .solver(kind)
            .output_file
            .unwrap_or_else(|| kind.default_file_name());
        self.output_dir.join(file)
    }

    /// Driver options: the solver's renames followed by the configured extras.
    pub fn driver_options(&self, kind: SolverKind) -> DriverOptions {
        let solver = self.solver(kind);
        let mut renames: RenameTable = kind.default_renames();
        renames.extend_from_map(&solver.extra_renames);
        DriverOptions {
            simplify: solver.simplify.unwrap_or(self.simplify),
            renames,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
output_dir = "out/coeffs"
simplify = false
log_level = "debug"

[solvers.trifocal]
output_file = "tri.txt"
simplify = true

[solvers.trifocal.extra_renames]
t0_00 = "T1.a11"

[solvers.five_point_nister]
enabled = false
"#;

    #[test]
    fn test_defaults_for_empty_file() {
        let config = GeneratorConfig::from_toml_str("").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(
            config.output_path(SolverKind::P3pGrunert),
            PathBuf::from("generated/p3p_grunert.txt")
        );
        assert!(config.driver_options(SolverKind::P3pGrunert).simplify);
    }

    #[test]
    fn test_parse_sample() {
        let config = GeneratorConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out/coeffs"));
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert!(!config.solver(SolverKind::FivePointNister).enabled);
        assert!(config.solver(SolverKind::P3pGrunert).enabled);
        assert_eq!(
            config.output_path(SolverKind::Trifocal),
            PathBuf::from("out/coeffs/tri.txt")
        );

        let tri = config.driver_options(SolverKind::Trifocal);
        assert!(tri.simplify);
        assert_eq!(tri.renames.len(), SolverKind::Trifocal.default_renames().len() + 1);
        assert_eq!(tri.renames.apply("t0_00*xa0"), "T1.a11*p1_norm.x");
        assert!(!config.driver_options(SolverKind::P3pGrunert).simplify);
    }

    #[test]
    fn test_rejects_unknown_solver_section() {
        let err = GeneratorConfig::from_toml_str("[solvers.p4p]\nenabled = true\n").unwrap_err();
        assert!(matches!(err, CoeffError::Config(msg) if msg.contains("p4p")));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(GeneratorConfig::from_toml_str("simplify = \"yes\"").is_err());
        assert!(GeneratorConfig::from_toml_str("log_level = \"loud\"").is_err());
        assert!(GeneratorConfig::from_toml_str("colour = true").is_err());
        assert!(matches!(
            GeneratorConfig::from_toml_str("output_dir = "),
            Err(CoeffError::Toml(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = GeneratorConfig::from_file(file.path()).unwrap();
        assert!(!config.simplify);
        assert!(matches!(
            GeneratorConfig::from_file(Path::new("/definitely/not/here.toml")),
            Err(CoeffError::Io(_))
        ));
    }
}
