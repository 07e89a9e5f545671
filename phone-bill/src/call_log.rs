use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::types::time::{parse_timestamp, CallDuration, Timestamp, TIMESTAMP_FORMAT};

const FIELD_SEPARATOR: char = ',';
const FIELD_COUNT: usize = 3;

/// A single call as it was read from the call log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallRecord {
    /// The dialed number.
    pub number: String,
    /// Local wall-clock time at which the call started.
    pub start: Timestamp,
    /// Local wall-clock time at which the call ended. Never before `start`.
    pub end: Timestamp,
    /// The 1-based line of the log this call was read from.
    pub line: usize,
}

impl CallRecord {
    /// The total length of the call, across calendar days.
    #[must_use]
    pub fn duration(&self) -> CallDuration {
        self.end.signed_duration_since(self.start).into()
    }
}

/// Parse a complete call log into its calls, in the order they appear.
///
/// Lines are separated by either `\n` or `\r\n` and blank lines are ignored. A single malformed
/// line fails the whole log.
pub fn parse(log: &str) -> crate::Result<Vec<CallRecord>> {
    let mut calls = Vec::new();

    for (index, line) in log.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let call = parse_line(index + 1, line)?;

        trace!(line = call.line, number = %call.number, "parsed call");

        calls.push(call);
    }

    Ok(calls)
}

fn parse_line(line: usize, text: &str) -> Result<CallRecord, ParseError> {
    let fields: Vec<&str> = text.split(FIELD_SEPARATOR).map(str::trim).collect();

    let &[number, start, end] = fields.as_slice() else {
        return Err(ParseError::new(
            line,
            ParseErrorKind::FieldCount {
                found: fields.len(),
            },
        ));
    };

    if number.is_empty() {
        return Err(ParseError::new(line, ParseErrorKind::EmptyNumber));
    }

    let start = parse_field(line, TimestampField::Start, start)?;
    let end = parse_field(line, TimestampField::End, end)?;

    if end < start {
        return Err(ParseError::new(line, ParseErrorKind::EndBeforeStart));
    }

    Ok(CallRecord {
        number: number.to_owned(),
        start,
        end,
        line,
    })
}

fn parse_field(line: usize, field: TimestampField, value: &str) -> Result<Timestamp, ParseError> {
    parse_timestamp(value).ok_or_else(|| {
        ParseError::new(
            line,
            ParseErrorKind::InvalidTimestamp {
                field,
                value: value.to_owned(),
            },
        )
    })
}

/// A line of the call log that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The 1-based line number in the log.
    pub line: usize,
    /// What is wrong with the line.
    pub kind: ParseErrorKind,
}

impl ParseError {
    fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

/// The reason a line of the call log could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The line does not consist of exactly a number, a start and an end.
    FieldCount { found: usize },
    /// The number field is empty.
    EmptyNumber,
    /// A timestamp does not match the log's timestamp pattern.
    InvalidTimestamp {
        field: TimestampField,
        value: String,
    },
    /// The call ended before it started.
    EndBeforeStart,
}

/// Which of the two timestamps of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampField {
    Start,
    End,
}

impl fmt::Display for TimestampField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

impl std::error::Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;

        match &self.kind {
            ParseErrorKind::FieldCount { found } => {
                write!(f, "expected {FIELD_COUNT} fields but found {found}")
            }
            ParseErrorKind::EmptyNumber => f.write_str("the number is empty"),
            ParseErrorKind::InvalidTimestamp { field, value } => write!(
                f,
                "the {field} timestamp `{value}` does not match `{TIMESTAMP_FORMAT}`"
            ),
            ParseErrorKind::EndBeforeStart => f.write_str("the call ends before it starts"),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::{parse, ParseErrorKind, TimestampField};
    use crate::Error;

    fn date_time(day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, day)
            .unwrap()
            .and_hms_opt(hour, min, sec)
            .unwrap()
    }

    fn parse_err(log: &str) -> (usize, ParseErrorKind) {
        match parse(log) {
            Err(Error::Parse(err)) => (err.line, err.kind),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn parses_lines_in_order() {
        let calls = parse(
            "420774577453,13-01-2020 18:10:15,13-01-2020 18:12:57\n\
             420776562353,18-01-2020 08:59:20,18-01-2020 09:10:00\n",
        )
        .unwrap();

        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].number, "420774577453");
        assert_eq!(calls[0].start, date_time(13, 18, 10, 15));
        assert_eq!(calls[0].end, date_time(13, 18, 12, 57));
        assert_eq!(calls[0].line, 1);
        assert_eq!(calls[1].number, "420776562353");
        assert_eq!(calls[1].line, 2);
    }

    #[test]
    fn accepts_crlf_and_skips_blank_lines() {
        let calls = parse(
            "111,01-01-2020 09:00:00,01-01-2020 09:01:00\r\n\
             \r\n\
             222 , 01-01-2020 10:00:00 , 01-01-2020 10:01:00\r\n",
        )
        .unwrap();

        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].number, "222");
        assert_eq!(calls[1].line, 3);
    }

    #[test]
    fn duration_spans_days() {
        let calls = parse("111,01-01-2020 23:59:00,02-01-2020 00:01:00").unwrap();
        assert_eq!(calls[0].duration().num_seconds(), 120);
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(
            parse_err("111,01-01-2020 09:00:00"),
            (1, ParseErrorKind::FieldCount { found: 2 })
        );
        assert_eq!(
            parse_err("111,01-01-2020 09:00:00,01-01-2020 09:01:00,x"),
            (1, ParseErrorKind::FieldCount { found: 4 })
        );
    }

    #[test]
    fn rejects_empty_number() {
        assert_eq!(
            parse_err(",01-01-2020 09:00:00,01-01-2020 09:01:00"),
            (1, ParseErrorKind::EmptyNumber)
        );
    }

    #[test]
    fn rejects_invalid_timestamp() {
        let (line, kind) = parse_err(
            "111,01-01-2020 09:00:00,01-01-2020 09:01:00\n\
             222,01-01-2020 09:00:00,2020-01-01 09:01:00",
        );

        assert_eq!(line, 2);
        assert_eq!(
            kind,
            ParseErrorKind::InvalidTimestamp {
                field: TimestampField::End,
                value: "2020-01-01 09:01:00".to_owned(),
            }
        );
    }

    #[test]
    fn rejects_timestamps_that_are_not_zero_padded() {
        let logs = [
            "111,1-1-2020 9:0:0,1-1-2020 9:1:0",
            "111,01-01-202009:00:00,01-01-2020 09:01:00",
            "111,01-01-2020  09:00:00,01-01-2020 09:01:00",
            "111,01-01-+2020 09:00:00,01-01-2020 09:01:00",
        ];

        for log in logs {
            let (line, kind) = parse_err(log);

            assert_eq!(line, 1, "{log}");
            assert!(
                matches!(
                    kind,
                    ParseErrorKind::InvalidTimestamp {
                        field: TimestampField::Start,
                        ..
                    }
                ),
                "{log}: {kind:?}"
            );
        }
    }

    #[test]
    fn rejects_end_before_start() {
        assert_eq!(
            parse_err("111,01-01-2020 09:01:00,01-01-2020 09:00:00"),
            (1, ParseErrorKind::EndBeforeStart)
        );
    }

    #[test]
    fn error_message_names_the_line() {
        let err = parse("111,01-01-2020 09:00:00").unwrap_err();
        assert_eq!(
            err.to_string(),
            "The call log could not be parsed: line 1: expected 3 fields but found 2"
        );
    }
}
