use crate::error::ConvertError;
use crate::lrc::TimedLine;
use crate::parser::{self, LineKind};
use crate::srt::Interval;

use std::time::Duration;

use tracing::{debug, warn};

/// How long the final caption stays on screen when nothing follows it.
pub const DEFAULT_TRAILING: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct ConvertOpts {
    pub trailing: Duration,
    pub strict: bool,
}

impl Default for ConvertOpts {
    fn default() -> Self {
        Self {
            trailing: DEFAULT_TRAILING,
            strict: false,
        }
    }
}

/// Converts timed lyric lines into numbered caption intervals.
///
/// Lines without a valid tag or without text are dropped. Each caption ends
/// where the next one starts; the last one is shown for [`DEFAULT_TRAILING`].
/// Timestamps that go backwards are kept as they are.
pub fn convert<I, S>(lines: I) -> Vec<Interval>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let timed = collect_timed(lines);
    warn_backwards(&timed);
    pair_intervals(timed, DEFAULT_TRAILING)
}

pub fn convert_with<I, S>(lines: I, opts: &ConvertOpts) -> Result<Vec<Interval>, ConvertError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let timed = collect_timed(lines);
    if opts.strict {
        if let Some((line, previous, current)) = backwards_steps(&timed).next() {
            return Err(ConvertError::OutOfOrder {
                line,
                previous,
                current,
            });
        }
    } else {
        warn_backwards(&timed);
    }
    Ok(pair_intervals(timed, opts.trailing))
}

// Keeps the 1-based source line number alongside each retained entry.
fn collect_timed<I, S>(lines: I) -> Vec<(usize, TimedLine)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut timed = Vec::new();
    for (i, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        let line_no = i + 1;
        match parser::classify_line(line) {
            LineKind::Lyric(t) => timed.push((line_no, t)),
            LineKind::Blank => (),
            LineKind::Marker(tag) => debug!(
                line = line_no,
                at_ms = tag.as_duration().as_millis() as u64,
                "Skipping timing marker without text"
            ),
            LineKind::Unrecognised => debug!(
                line = line_no,
                content = line,
                "Skipping line without a valid timestamp"
            ),
        }
    }
    timed
}

fn backwards_steps<'a>(
    timed: &'a [(usize, TimedLine)],
) -> impl Iterator<Item = (usize, Duration, Duration)> + 'a {
    timed.windows(2).filter_map(|pair| {
        let (_, prev) = &pair[0];
        let (line, cur) = &pair[1];
        if cur.start() < prev.start() {
            Some((*line, prev.start(), cur.start()))
        } else {
            None
        }
    })
}

fn warn_backwards(timed: &[(usize, TimedLine)]) {
    for (line, previous, current) in backwards_steps(timed) {
        warn!(
            line,
            previous_ms = previous.as_millis() as u64,
            current_ms = current.as_millis() as u64,
            "Timestamp goes backwards, the preceding caption ends before it starts"
        );
    }
}

fn pair_intervals(timed: Vec<(usize, TimedLine)>, trailing: Duration) -> Vec<Interval> {
    let mut entries = timed.into_iter().map(|(_, t)| t).peekable();
    let mut intervals = Vec::new();
    while let Some(entry) = entries.next() {
        let start = entry.start();
        let end = entries
            .peek()
            .map(TimedLine::start)
            .unwrap_or(start + trailing);
        intervals.push(Interval {
            index: intervals.len() + 1,
            start,
            end,
            text: entry.text,
        });
    }
    intervals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn pairs_with_next_start_and_trails_last() {
        let subs = convert(vec!["[00:00.00]Hello", "[00:00.05]World"]);

        assert_eq!(
            subs,
            vec![
                Interval {
                    index: 1,
                    start: ms(0),
                    end: ms(50),
                    text: "Hello".to_string(),
                },
                Interval {
                    index: 2,
                    start: ms(50),
                    end: ms(3050),
                    text: "World".to_string(),
                },
            ]
        );
    }

    #[test]
    fn empty_input() {
        assert!(convert(Vec::<&str>::new()).is_empty());
    }

    #[test]
    fn everything_filtered_out() {
        let subs = convert(vec!["[ti:Title]", "[00:01.00]", "", "garbage"]);
        assert!(subs.is_empty());
    }

    #[test]
    fn skipped_lines_leave_no_gaps_in_index() {
        let input = "[ar:Artist]\n[00:01.00]One\n[00:02.00]\nnot a lyric\n[00:03.50]Two\n\n[00:05.00]Three\n";
        let subs = convert(input.lines());

        let indices: Vec<usize> = subs.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        let texts: Vec<&str> = subs.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["One", "Two", "Three"]);
        // The marker at 00:02.00 is dropped, so "One" runs until "Two".
        assert_eq!(subs[0].end, ms(3500));
        assert_eq!(subs[2].end, ms(8000));
    }

    #[test]
    fn malformed_tag_is_skipped_not_fatal() {
        let subs = convert(vec!["[00:01.00]One", "[0:02.00]Broken", "[00:03.00]Two"]);
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].end, ms(3000));
    }

    #[test]
    fn carriage_return_only_input() {
        let subs = convert(parser::split_records("[00:01.00]a\r[00:02.00]b\r"));

        assert_eq!(subs.len(), 2);
        assert_eq!((subs[0].start, subs[0].end), (ms(1000), ms(2000)));
        assert_eq!(subs[0].text, "a");
        assert_eq!((subs[1].start, subs[1].end), (ms(2000), ms(5000)));
        assert_eq!(subs[1].text, "b");
    }

    #[test]
    fn backwards_timestamps_are_preserved_by_default() {
        let subs = convert(vec!["[00:05.00]Later", "[00:01.00]Earlier"]);

        assert_eq!(subs[0].start, ms(5000));
        assert_eq!(subs[0].end, ms(1000));
        assert_eq!(subs[1].end, ms(4000));
    }

    #[test]
    fn strict_rejects_backwards_timestamps() {
        let opts = ConvertOpts {
            strict: true,
            ..ConvertOpts::default()
        };
        let err = convert_with(
            vec!["[00:01.00]One", "", "[00:05.00]Two", "[00:04.00]Three"],
            &opts,
        )
        .unwrap_err();

        match err {
            ConvertError::OutOfOrder {
                line,
                previous,
                current,
            } => {
                assert_eq!(line, 4);
                assert_eq!(previous, ms(5000));
                assert_eq!(current, ms(4000));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn strict_accepts_equal_timestamps() {
        let opts = ConvertOpts {
            strict: true,
            ..ConvertOpts::default()
        };
        let subs = convert_with(vec!["[00:01.00]One", "[00:01.00]Same"], &opts).unwrap();
        assert_eq!(subs[0].start, subs[0].end);
    }

    #[test]
    fn custom_trailing_duration() {
        let opts = ConvertOpts {
            trailing: ms(1500),
            ..ConvertOpts::default()
        };
        let subs = convert_with(vec!["[01:00.00]Only"], &opts).unwrap();
        assert_eq!(subs[0].end, ms(61_500));
    }
}
