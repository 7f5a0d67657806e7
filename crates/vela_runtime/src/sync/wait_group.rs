//! A counting completion barrier.

use crate::errors::{VResult, ValueError, messages};
use parking_lot::{Condvar, Mutex};

#[derive(Debug, Default)]
pub struct WaitGroup {
    count: Mutex<u64>,
    zero: Condvar,
}

impl WaitGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adjusts the counter by `delta`. Waiters are released when it reaches
    /// zero; a change that would make it negative fails and is not applied.
    pub fn add(&self, delta: i64) -> VResult<()> {
        let mut count = self.count.lock();
        let next = (*count as i128) + delta as i128;
        if next < 0 {
            return Err(ValueError::out_of_range(messages::WAIT_GROUP_NEGATIVE));
        }
        *count = u64::try_from(next).map_err(|_| ValueError::out_of_range("wait group counter overflow"))?;
        if *count == 0 {
            self.zero.notify_all();
        }
        Ok(())
    }

    pub fn done(&self) -> VResult<()> {
        self.add(-1)
    }

    /// Blocks until the counter is zero.
    pub fn wait(&self) {
        let mut count = self.count.lock();
        while *count != 0 {
            self.zero.wait(&mut count);
        }
    }

    pub fn count(&self) -> u64 {
        *self.count.lock()
    }
}
