use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortError {
    #[error("no port given")]
    Missing,

    #[error("invalid port '{value}': {source}")]
    Invalid {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Parses the positional listen port. Surrounding whitespace is ignored.
pub fn parse_port(arg: Option<&str>) -> Result<u16, PortError> {
    let value = arg.ok_or(PortError::Missing)?;
    value.trim().parse().map_err(|source| PortError::Invalid {
        value: value.to_string(),
        source,
    })
}
