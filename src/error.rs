use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{0}")]
    ParseError(String),

    #[error(
        "Timestamp on line {line} goes backwards ({} ms after {} ms)",
        .current.as_millis(),
        .previous.as_millis()
    )]
    OutOfOrder {
        line: usize,
        previous: Duration,
        current: Duration,
    },
}
