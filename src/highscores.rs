//! High score leaderboard
//!
//! Built from every recorded game, sorted by score, top 50 shown.

use serde::{Deserialize, Serialize};

use crate::consts::SCOREBOARD_ROWS;
use crate::persistence::{ScoreRecord, ScoreSink};

/// A single scoreboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRow {
    /// 1-indexed
    pub rank: usize,
    pub name: String,
    pub score: u64,
}

/// Ranked leaderboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub rows: Vec<ScoreRow>,
}

impl Scoreboard {
    /// Rank records by score, highest first. Equal scores keep file order.
    pub fn from_records(mut records: Vec<ScoreRecord>) -> Self {
        records.sort_by(|a, b| b.score.cmp(&a.score));
        let rows = records
            .into_iter()
            .take(SCOREBOARD_ROWS)
            .enumerate()
            .map(|(i, r)| ScoreRow {
                rank: i + 1,
                name: r.name,
                score: r.score,
            })
            .collect();
        Self { rows }
    }

    /// Read every record from `sink`; an unreadable store shows as empty
    pub fn load(sink: &impl ScoreSink) -> Self {
        match sink.load() {
            Ok(records) => {
                log::info!("Loaded {} score records", records.len());
                Self::from_records(records)
            }
            Err(e) => {
                log::error!("Failed to load scores: {}", e);
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.rows.first().map(|r| r.score)
    }

    /// Check if a score would appear on the board
    pub fn qualifies(&self, score: u64) -> bool {
        if self.rows.len() < SCOREBOARD_ROWS {
            return true;
        }
        self.rows.last().is_some_and(|r| score > r.score)
    }

    /// Render as plain text lines
    pub fn to_lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|r| format!("{:>3}. {:<20} {:>6}", r.rank, r.name, r.score))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryScores;

    #[test]
    fn test_sorted_and_ranked() {
        let board = Scoreboard::from_records(vec![
            ScoreRecord::new(1, "low", 10),
            ScoreRecord::new(2, "high", 90),
            ScoreRecord::new(3, "mid", 40),
            ScoreRecord::new(4, "mid2", 40),
        ]);
        let names: Vec<_> = board.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["high", "mid", "mid2", "low"]);
        assert_eq!(board.rows[3].rank, 4);
        assert_eq!(board.top_score(), Some(90));
    }

    #[test]
    fn test_top_fifty() {
        let records = (0..75).map(|i| ScoreRecord::new(i, "p", i)).collect();
        let board = Scoreboard::from_records(records);
        assert_eq!(board.rows.len(), 50);
        assert_eq!(board.rows[0].score, 74);
        assert_eq!(board.rows[49].score, 25);
        assert!(board.qualifies(26));
        assert!(!board.qualifies(25));
    }

    #[test]
    fn test_load_from_sink() {
        let mut sink = MemoryScores::default();
        sink.records.push(ScoreRecord::new(1, "Ann", 5));
        let board = Scoreboard::load(&sink);
        assert_eq!(board.rows.len(), 1);
        assert!(board.to_lines()[0].contains("Ann"));
        assert!(Scoreboard::default().is_empty());
    }
}
