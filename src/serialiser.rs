use crate::srt::Interval;

use std::fmt::{self, Write as FmtWrite};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

pub fn serialise<P: AsRef<Path>>(subs: &[Interval], output: P) -> Result<()> {
    let file = std::fs::File::create(output).context("Failed to create file!")?;
    let mut writer = BufWriter::new(file);
    write_intervals(&mut writer, subs)?;
    writer.flush().context("Failed to write to output file.")?;
    Ok(())
}

pub fn write_intervals<W: Write>(buf: &mut W, subs: &[Interval]) -> Result<()> {
    for sub in subs {
        write!(buf, "{}", sub).context("Failed to write to output file.")?;
    }
    Ok(())
}

/// Renders one SRT block, including its trailing blank line.
pub fn format_interval(sub: &Interval) -> String {
    sub.to_string()
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        write_ts(f, self.start)?;
        write!(f, " --> ")?;
        write_ts(f, self.end)?;
        writeln!(f)?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

fn write_ts<W: FmtWrite>(buf: &mut W, timestamp: Duration) -> fmt::Result {
    let total_secs = timestamp.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let millis = timestamp.as_millis() % 1000;
    write!(
        buf,
        "{:02}:{:02}:{:02},{:03}",
        hours, minutes, seconds, millis
    )
}
