use std::time::Duration;

/// The `[MM:SS.CC]` prefix of a timed lyric line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub minutes: u64,
    pub seconds: u64,
    pub centiseconds: u64,
}

impl Tag {
    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(
            self.minutes * 60 * 1000 + self.seconds * 1000 + self.centiseconds * 10,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedLine {
    pub tag: Tag,
    pub text: String,
}

impl TimedLine {
    pub fn start(&self) -> Duration {
        self.tag.as_duration()
    }
}
