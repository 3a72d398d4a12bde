use std::time::{Duration, Instant};

/// Per-session statistics shown next to the board.
///
/// The clock only runs while a game is being played: pausing stops it and
/// game over freezes it until the next start.
pub struct GameMetrics {
    pub elapsed_time: Duration,
    pub games_played: u32,
    pub wins: u32,
    /// Whether the last finished game set a new high score
    pub new_record: bool,
    running_since: Option<Instant>,
    banked: Duration,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            elapsed_time: Duration::ZERO,
            games_played: 0,
            wins: 0,
            new_record: false,
            running_since: None,
            banked: Duration::ZERO,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.banked + self.running_since.map_or(Duration::ZERO, |t| t.elapsed());
    }

    pub fn on_game_start(&mut self) {
        self.banked = Duration::ZERO;
        self.elapsed_time = Duration::ZERO;
        self.new_record = false;
        self.running_since = Some(Instant::now());
    }

    pub fn on_pause(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.banked += since.elapsed();
        }
        self.update();
    }

    pub fn on_resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    pub fn on_game_over(&mut self, won: bool, new_record: bool) {
        self.on_pause();
        self.games_played += 1;
        self.new_record = new_record;
        if won {
            self.wins += 1;
        }
    }

    pub fn is_clock_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
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

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_game_counting() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_start();
        metrics.on_game_over(false, true);
        assert_eq!(metrics.games_played, 1);
        assert_eq!(metrics.wins, 0);
        assert!(metrics.new_record);

        metrics.on_game_start();
        assert!(!metrics.new_record);
        metrics.on_game_over(true, false);
        assert_eq!(metrics.games_played, 2);
        assert_eq!(metrics.wins, 1);
        assert!(!metrics.new_record);
        assert!(!metrics.is_clock_running());
    }

    #[test]
    fn test_clock_idle_until_start() {
        let mut metrics = GameMetrics::new();
        assert!(!metrics.is_clock_running());
        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);
    }

    #[test]
    fn test_pause_freezes_clock() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start();
        std::thread::sleep(Duration::from_millis(30));
        metrics.on_pause();
        let frozen = metrics.elapsed_time;
        assert!(frozen.as_millis() >= 30);

        std::thread::sleep(Duration::from_millis(30));
        metrics.update();
        assert_eq!(metrics.elapsed_time, frozen);

        metrics.on_resume();
        std::thread::sleep(Duration::from_millis(10));
        metrics.update();
        assert!(metrics.elapsed_time > frozen);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }
}
