//! Conversion of LRC lyric timings (`[MM:SS.CC]text`) into SRT subtitles.

pub mod converter;
pub mod error;
pub mod lrc;
pub mod parser;
pub mod serialiser;
pub mod srt;

pub use converter::{convert, convert_with, ConvertOpts};
pub use error::ConvertError;
pub use parser::{parse_line, parse_tag, split_records};
pub use serialiser::format_interval;
