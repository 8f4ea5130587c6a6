//! Environment overrides for the compiled-in defaults

use std::{io, path::PathBuf};

use serde::Deserialize;

use crate::{errors::Error, types::GeneratorConfig};

/// Prefix shared by every override variable
pub const ENV_PREFIX: &str = "TXGEN_";

/// Default output file name, placed next to the executable
pub const DEFAULT_OUTPUT: &str = "transactions.csv";

/// Optional overrides, read from `TXGEN_YEAR`, `TXGEN_SEED` and `TXGEN_OUTPUT`
#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Year to generate instead of the current one
    pub year: Option<i32>,
    /// Seed for reproducible output; a fresh OS seed is used when absent
    pub seed: Option<u64>,
    /// Where to write the export
    pub output: Option<PathBuf>,
}

impl Overrides {
    /// Reads overrides from the process environment.
    /// # Errors
    /// [`Error::Config`] if a variable is set but can't be parsed
    pub fn from_env() -> Result<Self, Error> {
        Ok(envy::prefixed(ENV_PREFIX).from_env::<Self>()?)
    }

    /// Builds the generator configuration these overrides describe.
    /// # Errors
    /// [`Error::InvalidYear`] if `TXGEN_YEAR` can't be represented as a date
    pub fn generator_config(&self) -> Result<GeneratorConfig, Error> {
        match self.year {
            Some(year) => GeneratorConfig::for_year(year),
            None => Ok(GeneratorConfig::default()),
        }
    }

    /// Output path; an explicit argument wins over `TXGEN_OUTPUT`, and
    /// without either the file goes next to the executable.
    /// # Errors
    /// [`Error::Io`] if the executable's location can't be determined
    pub fn output_path(&self, arg: Option<String>) -> Result<PathBuf, Error> {
        match arg.map(PathBuf::from).or_else(|| self.output.clone()) {
            Some(path) => Ok(path),
            None => default_output_path(),
        }
    }
}

/// [`DEFAULT_OUTPUT`] in the directory holding the running executable
pub fn default_output_path() -> Result<PathBuf, Error> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} has no parent directory", exe.display()),
        )
    })?;
    Ok(dir.join(DEFAULT_OUTPUT))
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_overrides() {
        let overrides: Overrides = envy::prefixed(ENV_PREFIX)
            .from_iter(vars(&[
                ("TXGEN_YEAR", "2023"),
                ("TXGEN_SEED", "42"),
                ("TXGEN_OUTPUT", "/tmp/out.csv"),
                ("UNRELATED", "x"),
            ]))
            .unwrap();
        assert_eq!(
            overrides,
            Overrides {
                year: Some(2023),
                seed: Some(42),
                output: Some(PathBuf::from("/tmp/out.csv")),
            }
        );
        assert_eq!(overrides.generator_config().unwrap().start.year(), 2023);
    }

    #[test]
    fn test_empty_environment() {
        let overrides: Overrides = envy::prefixed(ENV_PREFIX)
            .from_iter(Vec::<(String, String)>::new())
            .unwrap();
        assert_eq!(overrides, Overrides::default());
        let exe = std::env::current_exe().unwrap();
        assert_eq!(
            overrides.output_path(None).unwrap(),
            exe.parent().unwrap().join(DEFAULT_OUTPUT)
        );
    }

    #[test]
    fn test_out_of_range_year() {
        let overrides: Overrides = envy::prefixed(ENV_PREFIX)
            .from_iter(vars(&[("TXGEN_YEAR", "300000")]))
            .unwrap();
        assert!(matches!(
            overrides.generator_config(),
            Err(Error::InvalidYear(300_000))
        ));
    }

    #[test]
    fn test_malformed_seed() {
        let result = envy::prefixed(ENV_PREFIX).from_iter::<_, Overrides>(vars(&[(
            "TXGEN_SEED",
            "not-a-number",
        )]));
        assert!(result.is_err());
    }

    #[test]
    fn test_argument_beats_environment() {
        let overrides = Overrides {
            output: Some(PathBuf::from("env.csv")),
            ..Overrides::default()
        };
        assert_eq!(overrides.output_path(None).unwrap(), PathBuf::from("env.csv"));
        assert_eq!(
            overrides.output_path(Some("arg.csv".to_owned())).unwrap(),
            PathBuf::from("arg.csv")
        );
    }
}
