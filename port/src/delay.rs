use crate::Delay;
use std::thread::sleep;
use std::time::Duration;

/// Delay backed by [std::thread::sleep].
///
/// The display only needs lower bounds on its pauses, so oversleeping under a
/// non-realtime kernel is harmless.
#[derive(Debug, Default)]
pub struct SleepDelay;

impl SleepDelay {
    pub fn new() -> Self {
        SleepDelay
    }
}

impl Delay for SleepDelay {
    fn delay_ms(&self, ms: u64) {
        sleep(Duration::from_millis(ms));
    }
}
