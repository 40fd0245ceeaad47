use std::time::{Duration, Instant};

/// Per-session statistics shown next to the board
pub struct Scoreboard {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
}

impl Scoreboard {
    /// Start a session with a previously persisted high score
    pub fn new(high_score: u32) -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score,
            games_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self) {
        self.games_played += 1;
        self.update();
    }

    /// Raise the high score if `score` beats it. Returns true on a new high.
    pub fn record_score(&mut self, score: u32) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut board = Scoreboard::default();
        board.elapsed_time = Duration::from_secs(125);
        assert_eq!(board.format_time(), "02:05");

        board.elapsed_time = Duration::from_secs(0);
        assert_eq!(board.format_time(), "00:00");

        board.elapsed_time = Duration::from_secs(3661);
        assert_eq!(board.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_only_rises() {
        let mut board = Scoreboard::new(10);

        assert!(!board.record_score(5));
        assert!(!board.record_score(10));
        assert_eq!(board.high_score, 10);

        assert!(board.record_score(11));
        assert_eq!(board.high_score, 11);
    }

    #[test]
    fn test_games_counted() {
        let mut board = Scoreboard::default();
        board.on_game_over();
        board.on_game_over();
        assert_eq!(board.games_played, 2);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut board = Scoreboard::default();
        std::thread::sleep(Duration::from_millis(50));
        board.update();

        assert!(board.elapsed_time.as_millis() >= 50);

        board.on_game_start();
        board.update();
        assert!(board.elapsed_time.as_millis() < 50);
    }
}
