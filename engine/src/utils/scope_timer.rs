use std::time::{Duration, Instant};

/// Logs how long a scope took when dropped, at trace level.
pub struct ScopeTimer<'a> {
    name: &'a str,
    start_time: Instant,
    record: Option<&'a mut Duration>,
}

impl<'a> ScopeTimer<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            start_time: Instant::now(),
            record: None,
        }
    }

    /// Also writes the elapsed time into `record` on drop.
    pub fn recording(name: &'a str, record: &'a mut Duration) -> Self {
        Self {
            name,
            start_time: Instant::now(),
            record: Some(record),
        }
    }
}

impl Drop for ScopeTimer<'_> {
    fn drop(&mut self) {
        let elapsed = self.start_time.elapsed();
        if let Some(record) = self.record.as_deref_mut() {
            *record = elapsed;
        }
        log::trace!("{} took {:.2?}", self.name, elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_timer_writes_elapsed() {
        let mut elapsed = Duration::MAX;
        {
            let _timer = ScopeTimer::recording("test scope", &mut elapsed);
            std::thread::sleep(Duration::from_millis(1));
        }
        assert!(elapsed >= Duration::from_millis(1));
        assert!(elapsed < Duration::MAX);
    }
}
