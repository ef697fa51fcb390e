use std::time::{Duration, Instant};

/// How often a new report becomes available
const REPORT_PERIOD: Duration = Duration::from_millis(500);

/// Population and throughput reporter for a running simulation
///
/// The generation number itself belongs to the [`Driver`](crate::Driver)
/// and is passed in when a report is written.
pub struct GenerationStats {
    alive: usize,
    gens_in_report: u64,
    last_report: Instant,
}
impl GenerationStats {
    pub fn new(alive: usize) -> Self {
        Self::starting_at(alive, Instant::now())
    }
    fn starting_at(alive: usize, now: Instant) -> Self {
        Self {
            alive,
            gens_in_report: 0,
            last_report: now,
        }
    }

    #[inline]
    pub fn alive(&self) -> usize {
        self.alive
    }

    pub fn record(&mut self, alive: usize) {
        self.gens_in_report += 1;
        self.alive = alive;
    }

    /// Updates the population without counting a generation (e.g. after an edit)
    pub fn observe(&mut self, alive: usize) {
        self.alive = alive;
    }

    pub fn reset(&mut self, alive: usize) {
        *self = Self::new(alive);
    }

    pub fn has_report(&self) -> bool {
        self.last_report.elapsed() >= REPORT_PERIOD
    }

    /// Generations per second since the last rate or report, starting a new window
    pub fn rate(&mut self) -> f64 {
        self.rate_at(Instant::now())
    }
    fn rate_at(&mut self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.last_report).as_secs_f64();
        let gens_per_sec = if elapsed > 0.0 {
            self.gens_in_report as f64 / elapsed
        } else {
            0.0
        };
        // reset for the next report
        self.last_report = now;
        self.gens_in_report = 0;
        gens_per_sec
    }

    pub fn report(&mut self, generation: u64) -> String {
        self.report_at(generation, Instant::now())
    }
    fn report_at(&mut self, generation: u64, now: Instant) -> String {
        format!(
            "{:.02}gen/s gen:{}, alive:{}",
            self.rate_at(now),
            generation,
            self.alive
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_population() {
        let mut stats = GenerationStats::new(10);

        stats.record(8);
        stats.record(6);
        stats.observe(7);

        assert_eq!(stats.alive(), 7);
    }

    #[test]
    fn report_rate() {
        let t0 = Instant::now();
        let mut stats = GenerationStats::starting_at(3, t0);
        for _ in 0..4 {
            stats.record(3);
        }

        let report = stats.report_at(12, t0 + Duration::from_secs(2));

        assert_eq!(report, "2.00gen/s gen:12, alive:3");
    }

    #[test]
    fn report_resets_window() {
        let t0 = Instant::now();
        let mut stats = GenerationStats::starting_at(0, t0);
        stats.record(0);
        assert_eq!(stats.rate_at(t0 + Duration::from_secs(1)), 1.0);

        let report = stats.report_at(1, t0 + Duration::from_secs(2));

        assert_eq!(report, "0.00gen/s gen:1, alive:0");
    }

    #[test]
    fn reset_clears_window() {
        let t0 = Instant::now();
        let mut stats = GenerationStats::starting_at(1, t0);
        stats.record(2);

        stats.reset(5);

        assert_eq!(stats.alive(), 5);
        assert_eq!(stats.gens_in_report, 0);
        assert!(!stats.has_report());
    }
}
