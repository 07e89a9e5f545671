//! # Telephone bill library
//!
//! Functionality to calculate the total of a telephone bill from a log of calls. Use
//! [`calculate`] for the total only, or parse the log with [`call_log::parse`] and use the
//! [`pricer::Pricer`] to get a breakdown per call.

use std::fmt;

/// Parsing of the textual call log.
pub mod call_log;

/// Module containing the functionality to price a log of calls.
pub mod pricer;

/// The time-of-day tariff and its rates.
pub mod tariff;

/// Numeric and time types used for parsing and pricing.
pub mod types;

pub use call_log::{ParseError, ParseErrorKind};
pub use types::money::Money;

type Result<T> = std::result::Result<T, Error>;

/// Calculate the bill total for the given call log.
///
/// Every line of the log is a call formatted as `number,start,end` where both timestamps follow
/// the `dd-MM-yyyy HH:mm:ss` pattern. All calls to the number with the highest total cost are
/// free and excluded from the result.
pub fn calculate(log: &str) -> Result<Money> {
    let calls = call_log::parse(log)?;
    let report = pricer::Pricer::new(&calls).build_report()?;

    Ok(report.total_cost)
}

/// Possible errors when calculating a bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A line of the call log could not be parsed. No partial bill is calculated.
    Parse(ParseError),
    /// The call log does not contain any calls, so no free number can be selected.
    ///
    /// This is distinct from a bill that is zero because every call was free.
    EmptyLog,
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::EmptyLog => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "The call log could not be parsed: {err}"),
            Self::EmptyLog => f.write_str("The call log does not contain any calls"),
        }
    }
}
