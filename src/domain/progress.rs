use log::info;

/// Track progress of per-game play-by-play fetching
pub struct FetchProgress {
    total: usize,
    fetched: usize,
    cached: usize,
    failed: usize,
}

impl FetchProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            fetched: 0,
            cached: 0,
            failed: 0,
        }
    }

    pub fn increment_fetched(&mut self) {
        self.fetched += 1;
        self.log_progress();
    }

    pub fn increment_cached(&mut self) {
        self.cached += 1;
        self.log_progress();
    }

    pub fn increment_failed(&mut self) {
        self.failed += 1;
        self.log_progress();
    }

    pub fn current_count(&self) -> usize {
        self.fetched + self.cached + self.failed
    }

    pub fn failed_count(&self) -> usize {
        self.failed
    }

    fn log_progress(&self) {
        let current = self.current_count();
        if should_log(current, self.total) {
            info!(
                "  → Progress: {}/{} games ({} fetched, {} cached, {} failed)",
                current, self.total, self.fetched, self.cached, self.failed
            );
        }
    }
}

fn should_log(current: usize, total: usize) -> bool {
    is_milestone(current) || is_complete(current, total)
}

fn is_milestone(count: usize) -> bool {
    count % 10 == 0
}

fn is_complete(current: usize, total: usize) -> bool {
    current == total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_counts() {
        let mut progress = FetchProgress::new(3);
        progress.increment_fetched();
        progress.increment_cached();
        assert_eq!(progress.current_count(), 2);
        progress.increment_failed();
        assert_eq!(progress.current_count(), 3);
        assert_eq!(progress.failed_count(), 1);
    }

    #[test]
    fn test_milestone_logging_points() {
        assert!(should_log(10, 35));
        assert!(should_log(35, 35));
        assert!(!should_log(7, 35));
    }
}
