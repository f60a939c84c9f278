/// Points per cleared row, multiplied by the row count squared.
pub const LINE_CLEAR_FACTOR: u64 = 100;

/// Returns the points awarded for clearing `rows` rows with one piece.
///
/// The award grows with the square of the row count: one row is worth 100,
/// four rows at once are worth 1600.
///
/// ```
/// use blockfall_engine::line_clear_score;
///
/// assert_eq!(line_clear_score(0), 0);
/// assert_eq!(line_clear_score(1), 100);
/// assert_eq!(line_clear_score(4), 1600);
/// ```
#[must_use]
pub const fn line_clear_score(rows: usize) -> u64 {
    let rows = rows as u64;
    LINE_CLEAR_FACTOR * rows * rows
}

/// Statistics for a single game: score, lines cleared and pieces locked.
///
/// Everything resets on restart. Only the score affects the highscore; the
/// other counters are for display.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(2);
/// stats.complete_piece_drop(0);
///
/// assert_eq!(stats.score(), 400);
/// assert_eq!(stats.total_cleared_lines(), 2);
/// assert_eq!(stats.completed_pieces(), 2);
/// assert_eq!(stats.line_cleared_counter()[2], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: u64,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns how many locks cleared 0, 1, 2, 3 and 4 rows.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Records one locked piece that cleared `cleared_lines` rows and adds
    /// its points to the score.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines) {
            *count += 1;
        }
        self.score += line_clear_score(cleared_lines);
    }
}
