// file: src/sync/report.rs
// description: run statistics aggregation and elapsed time reporting
// reference: wall-clock accounting across the orchestration loop

use std::time::{Duration, Instant};
use tracing::info;

/// Terminal state of one repository after its command sequence ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoStatus {
    Done,
    DoneWithErrors,
}

/// Aggregate of one run, built incrementally while repositories are processed
/// and finalized once at the end.
#[derive(Debug)]
pub struct RunReport {
    pub discovered: usize,
    pub processed: usize,
    pub with_errors: usize,
    started: Instant,
    duration: Duration,
}

impl RunReport {
    pub fn begin() -> Self {
        Self {
            discovered: 0,
            processed: 0,
            with_errors: 0,
            started: Instant::now(),
            duration: Duration::ZERO,
        }
    }

    pub fn record(&mut self, status: RepoStatus) {
        self.processed += 1;
        if status == RepoStatus::DoneWithErrors {
            self.with_errors += 1;
        }
    }

    pub fn finish(&mut self) {
        self.duration = self.started.elapsed();
    }

    pub fn elapsed_human(&self) -> String {
        format_elapsed(self.duration)
    }

    pub fn log_summary(&self) {
        info!("Repositories discovered: {}", self.discovered);
        info!("Repositories processed: {}", self.processed);
        if self.with_errors > 0 {
            info!("Repositories with errors: {}", self.with_errors);
        }
        info!("Total processing time {}", self.elapsed_human());
    }
}

/// Render a duration as seconds, minutes+seconds, or hours+minutes+seconds.
/// Hours appear only past a full hour, minutes only past a full minute.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs_f64();
    let hours = (total / 3600.0) as u64;
    let minutes = ((total % 3600.0) / 60.0) as u64;
    let seconds = total % 60.0;

    if hours > 0 {
        format!("{} hours, {} minutes and {:.2} seconds", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{} minutes and {:.2} seconds", minutes, seconds)
    } else {
        format!("{:.2} seconds", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn seconds_only_below_one_minute() {
        assert_eq!(format_elapsed(Duration::from_secs(45)), "45.00 seconds");
    }

    #[test]
    fn minutes_and_seconds_below_one_hour() {
        assert_eq!(
            format_elapsed(Duration::from_secs(90)),
            "1 minutes and 30.00 seconds"
        );
    }

    #[test]
    fn hours_minutes_and_seconds_past_one_hour() {
        assert_eq!(
            format_elapsed(Duration::from_secs(3725)),
            "1 hours, 2 minutes and 5.00 seconds"
        );
    }

    #[test]
    fn subsecond_durations_keep_two_decimals() {
        assert_eq!(format_elapsed(Duration::from_millis(500)), "0.50 seconds");
    }

    #[test]
    fn report_counts_error_outcomes() {
        let mut report = RunReport::begin();
        report.discovered = 3;
        report.record(RepoStatus::Done);
        report.record(RepoStatus::DoneWithErrors);
        report.record(RepoStatus::Done);
        report.finish();

        assert_eq!(report.processed, 3);
        assert_eq!(report.with_errors, 1);
    }
}
