use crate::error::{GdpError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Ordered `(year, gdp)` points for one country.
pub type Series = Vec<(i32, f64)>;

/// Requested country name -> its series. Every requested name is present.
pub type ResultSet = BTreeMap<String, Series>;

/// Where the GDP table lives, how it is delimited, and which years to keep.
///
/// All fields have defaults, so a JSON config may name only what differs:
/// ```
/// use gdp_plot::Config;
///
/// let cfg: Config = serde_json::from_str(r#"{ "data_file": "gdp.csv", "min_year": 2000 }"#)?;
/// assert_eq!(cfg.key_field, "Country Name");
/// assert_eq!(cfg.max_year, 2015);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_file: PathBuf,
    /// Column whose value identifies a row (the country name).
    pub key_field: String,
    pub separator: char,
    pub quote: char,
    /// Inclusive lower year bound.
    pub min_year: i32,
    /// Inclusive upper year bound.
    pub max_year: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("gdp.csv"),
            key_field: "Country Name".to_string(),
            separator: ',',
            quote: '"',
            min_year: 1960,
            max_year: 2015,
        }
    }
}

impl Config {
    pub fn new<P: AsRef<Path>>(data_file: P) -> Self {
        Self {
            data_file: data_file.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Load a config from a JSON file and validate it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| GdpError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: Config = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| GdpError::Config(format!("{}: {}", path.display(), e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_year > self.max_year {
            return Err(GdpError::Config(format!(
                "min_year {} is after max_year {}",
                self.min_year, self.max_year
            )));
        }
        dialect_byte("separator", self.separator)?;
        dialect_byte("quote", self.quote)?;
        Ok(())
    }
}

/// The csv crate takes single-byte delimiters, so only ASCII is accepted.
pub(crate) fn dialect_byte(name: &'static str, ch: char) -> Result<u8> {
    if ch.is_ascii() {
        Ok(ch as u8)
    } else {
        Err(GdpError::InvalidDialect { name, ch })
    }
}
