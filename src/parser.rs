use crate::error::ConvertError;
use crate::lrc::{Tag, TimedLine};

use std::time::Duration;

use nom::bytes::complete::{tag, take_while_m_n};
use nom::combinator::{all_consuming, map_res, verify};
use nom::error::{convert_error, VerboseError};
use nom::{Err, IResult};

/// What a single input record turned out to be.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum LineKind {
    Blank,
    /// A valid tag with nothing after it.
    Marker(Tag),
    Lyric(TimedLine),
    Unrecognised,
}

/// Parses a complete `[MM:SS.CC]` tag into the time it denotes.
pub fn parse_tag(input: &str) -> Result<Duration, ConvertError> {
    match all_consuming(lrc_tag)(input) {
        Ok((_, stamp)) => Ok(stamp.as_duration()),
        Err(Err::Error(err)) | Err(Err::Failure(err)) => {
            Err(ConvertError::ParseError(convert_error(input, err)))
        }
        Err(Err::Incomplete(_)) => {
            unreachable!("Incomplete data received by non-streaming parser.")
        }
    }
}

/// Returns the timed line only if the record has a valid tag followed by text.
pub fn parse_line(line: &str) -> Option<TimedLine> {
    match classify_line(line) {
        LineKind::Lyric(timed) => Some(timed),
        _ => None,
    }
}

/// Splits raw input into records. A record ends at `\n`, `\r\n` or a lone `\r`.
pub fn split_records(input: &str) -> Vec<&str> {
    let mut records = Vec::new();
    let mut rest = input;
    while !rest.is_empty() {
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(i) => {
                records.push(&rest[..i]);
                let ending = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[i + ending..];
            }
            None => {
                records.push(rest);
                break;
            }
        }
    }
    records
}

pub(crate) fn classify_line(line: &str) -> LineKind {
    let line = line.strip_prefix('\u{FEFF}').unwrap_or(line).trim();
    if line.is_empty() {
        return LineKind::Blank;
    }

    match lrc_tag(line) {
        Ok(("", stamp)) => LineKind::Marker(stamp),
        Ok((text, stamp)) => LineKind::Lyric(TimedLine {
            tag: stamp,
            text: text.to_string(),
        }),
        Err(_) => LineKind::Unrecognised,
    }
}

fn lrc_tag(input: &str) -> IResult<&str, Tag, VerboseError<&str>> {
    let (input, _) = tag("[")(input)?;
    let (input, minutes) = two_digits(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, seconds) = verify(two_digits, |s: &u64| *s < 60)(input)?;
    let (input, _) = tag(".")(input)?;
    let (input, centiseconds) = two_digits(input)?;
    let (input, _) = tag("]")(input)?;

    Ok((
        input,
        Tag {
            minutes,
            seconds,
            centiseconds,
        },
    ))
}

fn two_digits(input: &str) -> IResult<&str, u64, VerboseError<&str>> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_digit()), |s: &str| {
        s.parse()
    })(input)
}
