use log::{debug, info};
use rand::seq::index;
use rand::Rng;

use crate::field::{Field, Side};
use crate::settings::Settings;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

/// What a single swipe did to the game.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SwipeOutcome {
    pub moved: bool,
    pub gained: u64,
    pub state: GameState,
}

/// A running game: the current field, the cumulative score and the game state.
pub struct Game {
    field: Field,
    score: u64,
    state: GameState,
    settings: Settings,
}

impl Game {
    pub fn new<R: Rng + ?Sized>(settings: Settings, rng: &mut R) -> Self {
        let field = Self::initial_field(settings.size(), rng);
        let mut game = Self {
            field,
            score: 0,
            state: GameState::Playing,
            settings,
        };
        game.state = game.evaluate();
        game
    }

    // One 2 and one 4 on two distinct cells.
    fn initial_field<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Field {
        let mut field = Field::new(size);
        let cells = index::sample(rng, size * size, 2);
        for (cell, value) in cells.iter().zip([2, 4].iter()) {
            field.0[(cell / size, cell % size)] = *value;
        }
        field
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn evaluate(&self) -> GameState {
        if self.field.has_value(self.settings.target()) {
            GameState::Won
        } else if self.field.is_terminal() {
            GameState::Lost
        } else {
            GameState::Playing
        }
    }

    /// Applies one swipe. Only an effective move adds score and spawns a tile.
    pub fn swipe<R: Rng + ?Sized>(&mut self, side: Side, rng: &mut R) -> SwipeOutcome {
        let (field, gained) = self.field.swipe(side);
        let moved = field != self.field;
        debug!("swipe {:?}: moved={} gained={}", side, moved, gained);
        if moved {
            self.score = self.score.saturating_add(gained);
            self.field = field.append_tile(rng, self.settings.spawn());
            let state = self.evaluate();
            if state != self.state {
                info!("game state {:?} -> {:?}, score {}", self.state, state, self.score);
            }
            self.state = state;
        }
        SwipeOutcome {
            moved,
            gained: if moved { gained } else { 0 },
            state: self.state,
        }
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        info!("reset after score {}", self.score);
        self.field = Self::initial_field(self.settings.size(), rng);
        self.score = 0;
        self.state = self.evaluate();
    }
}

#[cfg(test)]
impl Game {
    fn with_field(settings: Settings, field: Field) -> Self {
        Self {
            field,
            score: 0,
            state: GameState::Playing,
            settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Game, GameState};
    use crate::field::{Field, Side};
    use crate::settings::Settings;
    use crate::spawn::SpawnPolicy;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn new_game_has_one_two_and_one_four() {
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let game = Game::new(Settings::default(), &mut rng);
            let mut values: Vec<u32> = game
                .field()
                .as_array()
                .iter()
                .copied()
                .filter(|&v| v != 0)
                .collect();
            values.sort_unstable();
            assert_eq!(values, vec![2, 4]);
            assert_eq!(game.score(), 0);
            assert_eq!(game.state(), GameState::Playing);
        }
    }

    #[test]
    fn new_game_on_smallest_board() {
        let mut rng = StdRng::seed_from_u64(3);
        let settings = Settings::new(2, 2048, SpawnPolicy::Uniform).unwrap();
        let game = Game::new(settings, &mut rng);
        assert_eq!(game.field().size(), 2);
        assert_eq!(game.field().count_tiles(), 2);
    }

    #[test]
    fn effective_swipe_scores_and_spawns() {
        let mut rng = StdRng::seed_from_u64(11);
        let field = Field::from_rows(&[
            vec![2, 2, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ])
        .unwrap();
        let mut game = Game::with_field(Settings::default(), field);
        let outcome = game.swipe(Side::Left, &mut rng);
        assert!(outcome.moved);
        assert_eq!(outcome.gained, 4);
        assert_eq!(outcome.state, GameState::Playing);
        assert_eq!(game.score(), 4);
        assert_eq!(game.field().get(0, 0), 4);
        assert_eq!(game.field().count_tiles(), 2);
    }

    #[test]
    fn ineffective_swipe_changes_nothing() {
        let mut rng = StdRng::seed_from_u64(5);
        let field = Field::from_rows(&[vec![2, 4, 0], vec![0, 0, 0], vec![0, 0, 0]]).unwrap();
        let mut game = Game::with_field(Settings::default(), field.clone());
        let outcome = game.swipe(Side::Up, &mut rng);
        assert!(!outcome.moved);
        assert_eq!(outcome.gained, 0);
        assert_eq!(game.field(), &field);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn reaching_target_wins() {
        let mut rng = StdRng::seed_from_u64(9);
        let settings = Settings::new(3, 16, SpawnPolicy::Uniform).unwrap();
        let field = Field::from_rows(&[vec![8, 8, 0], vec![0, 0, 0], vec![0, 0, 0]]).unwrap();
        let mut game = Game::with_field(settings, field);
        let outcome = game.swipe(Side::Right, &mut rng);
        assert_eq!(outcome.gained, 16);
        assert_eq!(outcome.state, GameState::Won);
        // Play continues after a win.
        let outcome = game.swipe(Side::Left, &mut rng);
        assert!(outcome.moved);
        assert_eq!(game.state(), GameState::Won);
    }

    #[test]
    fn filling_last_gap_without_pairs_loses() {
        // Swiping left leaves only the top right cell free for the spawn.
        let field = Field::from_rows(&[vec![0, 2], vec![4, 8]]).unwrap();
        let settings = Settings::new(2, 2048, SpawnPolicy::Uniform).unwrap();
        let mut lost = false;
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut game = Game::with_field(settings, field.clone());
            let outcome = game.swipe(Side::Left, &mut rng);
            assert!(outcome.moved);
            assert_eq!(game.field().count_tiles(), 4);
            match game.field().get(1, 0) {
                2 => assert_eq!(outcome.state, GameState::Playing),
                4 => {
                    assert_eq!(outcome.state, GameState::Lost);
                    assert!(game.field().is_terminal());
                    lost = true;
                }
                v => panic!("unexpected spawn {}", v),
            }
        }
        assert!(lost);
    }

    #[test]
    fn reset_starts_over() {
        let mut rng = StdRng::seed_from_u64(1);
        let field = Field::from_rows(&[vec![2, 2], vec![0, 0]]).unwrap();
        let settings = Settings::new(2, 2048, SpawnPolicy::Uniform).unwrap();
        let mut game = Game::with_field(settings, field);
        game.swipe(Side::Left, &mut rng);
        assert_eq!(game.score(), 4);
        game.reset(&mut rng);
        assert_eq!(game.score(), 0);
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.field().count_tiles(), 2);
        assert_eq!(game.settings().size(), 2);
    }

    #[test]
    fn opening_board_can_already_win() {
        let mut rng = StdRng::seed_from_u64(4);
        let settings = Settings::new(4, 4, SpawnPolicy::Uniform).unwrap();
        let mut game = Game::new(settings, &mut rng);
        assert!(game.field().has_value(4));
        assert_eq!(game.state(), GameState::Won);
        game.reset(&mut rng);
        assert_eq!(game.state(), GameState::Won);
    }

    #[test]
    fn seeded_games_are_reproducible() {
        let play = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut game = Game::new(Settings::default(), &mut rng);
            for side in Side::ALL.iter().cycle().take(200) {
                game.swipe(*side, &mut rng);
            }
            (game.field().clone(), game.score())
        };
        assert_eq!(play(77), play(77));
    }
}
