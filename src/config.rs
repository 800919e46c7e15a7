use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::query::QueryMode;

/// Settings read from an optional TOML file. Every key may be omitted.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub ingest: IngestConfig,
    pub query: QueryConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct IngestConfig {
    pub delimiter: char,
    pub has_headers: bool,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct QueryConfig {
    pub mode: QueryMode,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_headers: true,
        }
    }
}

impl IngestConfig {
    /// The delimiter as a byte. Quotes and line breaks are reserved by the
    /// CSV format and rejected.
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(|byte| byte.is_ascii() && !matches!(*byte, b'"' | b'\n' | b'\r'))
            .ok_or(Error::InvalidDelimiter(self.delimiter))
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.ingest.delimiter_byte()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::{error::Error, query::QueryMode};

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.ingest.delimiter, ',');
        assert!(config.ingest.has_headers);
        assert_eq!(config.query.mode, QueryMode::Auto);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn partial_sections() {
        let config = Config::from_toml(
            r#"
            [ingest]
            delimiter = "\t"

            [query]
            mode = "radius"
            "#,
        )
        .unwrap();
        assert_eq!(config.ingest.delimiter, '\t');
        assert!(config.ingest.has_headers);
        assert_eq!(config.query.mode, QueryMode::Radius);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        let result = Config::from_toml("[ingest]\ndelimiter = \"§\"\n");
        assert!(matches!(result, Err(Error::InvalidDelimiter('§'))));
    }

    #[test]
    fn rejects_reserved_delimiters() {
        for (toml, delimiter) in [
            ("delimiter = '\"'", '"'),
            ("delimiter = \"\\n\"", '\n'),
            ("delimiter = \"\\r\"", '\r'),
        ] {
            let result = Config::from_toml(&format!("[ingest]\n{toml}\n"));
            assert!(matches!(result, Err(Error::InvalidDelimiter(c)) if c == delimiter));
        }
    }

    #[test]
    fn rejects_unknown_mode() {
        let result = Config::from_toml("[query]\nmode = \"sideways\"\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
