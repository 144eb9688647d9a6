use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The calendar normalizer could not turn the fields into an instant, or the
    /// result lies outside the supported range.
    #[error(
        "invalid date/time components {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
    )]
    InvalidComponents {
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
    },

    #[error("failed to parse {input:?}: {reason}")]
    Parse { input: String, reason: String },

    #[error("resulting instant is out of range")]
    RangeOverflow,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        Error::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
