use model::{Game, GameState, SwipeOutcome};
use std::fmt::Write;

pub const LOSS_MESSAGE: &str = "No more moves left!";

pub fn render(game: &Game) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Score: {}", game.score());
    text.push_str(&game.field().to_string());
    text
}

/// Message shown after a swipe, if any. Winning takes priority over losing.
pub fn status_message(game: &Game, outcome: &SwipeOutcome) -> Option<String> {
    if !outcome.moved {
        return None;
    }
    match outcome.state {
        GameState::Won => Some(format!(
            "You reached {}! You win!",
            game.settings().target()
        )),
        GameState::Lost => Some(LOSS_MESSAGE.to_string()),
        GameState::Playing => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{Settings, SpawnPolicy};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn render_shows_score_and_board() {
        let mut rng = StdRng::seed_from_u64(1);
        let game = Game::new(Settings::default(), &mut rng);
        let text = render(&game);
        assert!(text.starts_with("Score: 0\n"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn no_message_for_ineffective_move() {
        let mut rng = StdRng::seed_from_u64(1);
        let game = Game::new(Settings::default(), &mut rng);
        let outcome = SwipeOutcome {
            moved: false,
            gained: 0,
            state: GameState::Won,
        };
        assert_eq!(status_message(&game, &outcome), None);
    }

    #[test]
    fn win_message_uses_target() {
        let mut rng = StdRng::seed_from_u64(1);
        let settings = Settings::new(4, 4, SpawnPolicy::Uniform).unwrap();
        let game = Game::new(settings, &mut rng);
        assert_eq!(game.state(), GameState::Won);
        let outcome = SwipeOutcome {
            moved: true,
            gained: 0,
            state: game.state(),
        };
        assert_eq!(
            status_message(&game, &outcome).as_deref(),
            Some("You reached 4! You win!")
        );
    }

    #[test]
    fn loss_message() {
        let mut rng = StdRng::seed_from_u64(1);
        let game = Game::new(Settings::default(), &mut rng);
        let outcome = SwipeOutcome {
            moved: true,
            gained: 0,
            state: GameState::Lost,
        };
        assert_eq!(status_message(&game, &outcome).as_deref(), Some(LOSS_MESSAGE));
    }
}
