//! Running per-line summary used for O(1) win and dead-line detection.
//!
//! Each line keeps the sum of the signed flags on its fields (first
//! player -1, second player +1) and how many of its fields are filled.
//! Those two numbers classify the line completely:
//!
//! | sum | 1 filled | 2 filled | 3 filled |
//! |-----|----------|----------|----------|
//! | ±3  |    -     |    -     |   won    |
//! | ±2  |    -     |   live   |    -     |
//! | ±1  |   live   |    -     |   dead   |
//! |  0  |    -     |   dead   |    -     |

use crate::types::Player;
use serde::{Deserialize, Serialize};

/// Classification of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStatus {
    /// Still completable by at least one player.
    Live,
    /// All three fields belong to this player.
    Won(Player),
    /// Holds flags of both players; nobody can complete it.
    Dead,
}

/// Signed sum and fill count of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTally {
    sum: i8,
    filled: u8,
    winnable: bool,
}

impl Default for LineTally {
    fn default() -> Self {
        Self {
            sum: 0,
            filled: 0,
            winnable: true,
        }
    }
}

impl LineTally {
    /// Records one newly flagged field of this line.
    pub fn add(&mut self, player: Player) {
        self.sum += player.sign();
        self.filled += 1;
    }

    /// Signed sum of the line's flags.
    pub fn sum(&self) -> i8 {
        self.sum
    }

    /// Number of filled fields (0-3).
    pub fn filled(&self) -> u8 {
        self.filled
    }

    /// False once the line has been found dead.
    pub fn is_winnable(&self) -> bool {
        self.winnable
    }

    /// Marks the line as permanently dead.
    pub fn retire(&mut self) {
        self.winnable = false;
    }

    /// Classifies the line from its sum and fill count.
    pub fn status(&self) -> LineStatus {
        match (self.sum, self.filled) {
            (3, _) => LineStatus::Won(Player::Second),
            (-3, _) => LineStatus::Won(Player::First),
            (_, 3) => LineStatus::Dead,
            (0, 2) => LineStatus::Dead,
            _ => LineStatus::Live,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(players: &[Player]) -> LineTally {
        let mut tally = LineTally::default();
        for player in players {
            tally.add(*player);
        }
        tally
    }

    #[test]
    fn test_fresh_tally_is_live() {
        let tally = LineTally::default();
        assert_eq!(tally.status(), LineStatus::Live);
        assert!(tally.is_winnable());
    }

    #[test]
    fn test_complete_lines_are_won() {
        use Player::*;
        assert_eq!(tally(&[First, First, First]).status(), LineStatus::Won(First));
        assert_eq!(tally(&[Second, Second, Second]).status(), LineStatus::Won(Second));
    }

    #[test]
    fn test_mixed_pair_is_dead_before_filling() {
        use Player::*;
        let t = tally(&[First, Second]);
        assert_eq!(t.filled(), 2);
        assert_eq!(t.sum(), 0);
        assert_eq!(t.status(), LineStatus::Dead);
    }

    #[test]
    fn test_same_owner_pair_stays_live() {
        use Player::*;
        assert_eq!(tally(&[Second, Second]).status(), LineStatus::Live);
        assert_eq!(tally(&[First]).status(), LineStatus::Live);
    }

    #[test]
    fn test_full_mixed_line_is_dead() {
        use Player::*;
        assert_eq!(tally(&[First, First, Second]).status(), LineStatus::Dead);
        assert_eq!(tally(&[Second, First, Second]).status(), LineStatus::Dead);
    }

    #[test]
    fn test_retire() {
        let mut t = LineTally::default();
        t.retire();
        assert!(!t.is_winnable());
    }
}
