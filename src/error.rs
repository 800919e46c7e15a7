use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read records: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot append to report '{}'", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read config '{}'", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("delimiter must be a single ASCII character other than a quote or line break, got {0:?}")]
    InvalidDelimiter(char),
}

pub type Result<T> = std::result::Result<T, Error>;
