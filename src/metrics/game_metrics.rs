use std::time::{Duration, Instant};

pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub best_score: usize,
    pub best_level: u32,
    pub lives_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_score: 0,
            best_level: 0,
            lives_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_life_over(&mut self, final_score: usize, level: u32) {
        self.lives_played += 1;
        self.best_score = self.best_score.max(final_score);
        self.best_level = self.best_level.max(level);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    /// One-line session report
    pub fn summary(&self) -> String {
        let mut line = format!(
            "Played {} {} in {}, best score {}",
            self.lives_played,
            if self.lives_played == 1 { "life" } else { "lives" },
            self.format_time(),
            self.best_score
        );
        if self.best_level > 0 {
            line.push_str(&format!(", reached level {}", self.best_level));
        }
        line
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");
    }

    #[test]
    fn test_life_tracking() {
        let mut metrics = GameMetrics::new();
        metrics.on_life_over(12, 2);
        metrics.on_life_over(7, 1);

        assert_eq!(metrics.lives_played, 2);
        assert_eq!(metrics.best_score, 12);
        assert_eq!(metrics.best_level, 2);
    }

    #[test]
    fn test_summary() {
        let mut metrics = GameMetrics::new();
        metrics.on_life_over(9, 0);
        assert_eq!(metrics.summary(), "Played 1 life in 00:00, best score 9");

        metrics.on_life_over(20, 3);
        assert_eq!(
            metrics.summary(),
            "Played 2 lives in 00:00, best score 20, reached level 3"
        );
    }
}
