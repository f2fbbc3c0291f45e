use std::time::{Duration, Instant};

use crate::game::Pickup;

/// Running totals for one process run. Nothing here outlives the process.
pub struct SessionStats {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub rounds_played: u32,
    pub correct_pickups: u32,
    pub wrong_pickups: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_score: 0,
            rounds_played: 0,
            correct_pickups: 0,
            wrong_pickups: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_round_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_pickup(&mut self, pickup: &Pickup) {
        match pickup {
            Pickup::Correct { .. } => self.correct_pickups += 1,
            Pickup::Wrong { .. } => self.wrong_pickups += 1,
        }
    }

    pub fn on_round_over(&mut self, final_score: u32) {
        self.rounds_played += 1;
        self.best_score = self.best_score.max(final_score);
    }

    /// Share of pickups that were correct, if any food was eaten at all
    pub fn accuracy(&self) -> Option<f32> {
        let total = self.correct_pickups + self.wrong_pickups;
        (total > 0).then(|| self.correct_pickups as f32 / total as f32)
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut stats = SessionStats::new();
        stats.elapsed_time = Duration::from_secs(125);
        assert_eq!(stats.format_time(), "02:05");

        stats.elapsed_time = Duration::from_secs(0);
        assert_eq!(stats.format_time(), "00:00");
    }

    #[test]
    fn test_best_score_tracking() {
        let mut stats = SessionStats::new();

        stats.on_round_over(4);
        stats.on_round_over(2);
        assert_eq!(stats.best_score, 4);
        assert_eq!(stats.rounds_played, 2);

        stats.on_round_over(9);
        assert_eq!(stats.best_score, 9);
    }

    #[test]
    fn test_accuracy() {
        let mut stats = SessionStats::new();
        assert_eq!(stats.accuracy(), None);

        stats.on_pickup(&Pickup::Correct { value: "1".into() });
        stats.on_pickup(&Pickup::Correct { value: "0".into() });
        stats.on_pickup(&Pickup::Correct { value: "1".into() });
        stats.on_pickup(&Pickup::Wrong { value: "-1".into() });
        assert_eq!(stats.accuracy(), Some(0.75));
    }
}
