use std::time::Duration;

/// One numbered SRT caption block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    pub index: usize,
    pub start: Duration,
    pub end: Duration,
    pub text: String,
}
