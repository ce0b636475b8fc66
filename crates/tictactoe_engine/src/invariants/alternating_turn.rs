//! Alternating turn invariant: players alternate First, Second, First, ...

use super::Invariant;
use crate::rules::count_flags;
use crate::{Game, Player};

/// Invariant: flag counts and the recorded turn agree with strict alternation.
///
/// The first player owns as many fields as the second, or one more.
/// While the game is open the player with fewer flags (first on a tie)
/// is to move; once it is decided the turn stays on the deciding mover.
pub struct AlternatingTurnInvariant;

impl Invariant<Game> for AlternatingTurnInvariant {
    fn holds(game: &Game) -> bool {
        let (first, second) = count_flags(&game.board_state());
        if first != second && first != second + 1 {
            return false;
        }

        let expected = match (game.state().is_open(), first == second) {
            (true, true) => Player::First,
            (true, false) => Player::Second,
            (false, true) => Player::Second,
            (false, false) => Player::First,
        };
        game.next_to_move() == expected
    }

    fn description() -> &'static str {
        "Players alternate turns (First, Second, First, ...)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameState;

    #[test]
    fn test_empty_game_holds() {
        assert!(AlternatingTurnInvariant::holds(&Game::new()));
    }

    #[test]
    fn test_alternating_sequence_holds() {
        let mut game = Game::new();
        for field in [0, 4, 2, 1, 7] {
            game.play(field).unwrap();
            assert!(AlternatingTurnInvariant::holds(&game));
        }
    }

    #[test]
    fn test_holds_for_second_player_win() {
        let mut game = Game::new();
        for field in [6, 2, 0, 3, 4, 8, 7] {
            game.play(field).unwrap();
        }
        assert_eq!(game.play(5), Ok(GameState::WinnerSecond));
        assert_eq!(game.next_to_move(), Player::Second);
        assert!(AlternatingTurnInvariant::holds(&game));
    }

    #[test]
    fn test_detects_wrong_turn() {
        let mut game = Game::new();
        game.play(4).unwrap();
        game.overwrite_turn(Player::First);
        assert!(!AlternatingTurnInvariant::holds(&game));
    }
}
