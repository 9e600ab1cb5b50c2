//! Board engine and game session for the 2048 sliding-tile puzzle.
//!
//! The engine itself ([`field`], [`row`]) is a set of pure functions over a square
//! grid: swiping returns a new [`Field`] plus the score gained, and never touches the
//! input. The only operation that needs randomness, tile spawning, takes the
//! random source as a parameter.
//!
//! ```
//! use model::{Field, Side, SpawnPolicy};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let field = Field::from_rows(&[vec![2, 2, 0, 0], vec![0; 4], vec![0; 4], vec![0; 4]]).unwrap();
//! let (moved, score) = field.swipe(Side::Right);
//! assert_eq!(score, 4);
//! assert_eq!(moved.get(3, 0), 4);
//! let spawned = moved.append_tile(&mut rng, SpawnPolicy::Uniform);
//! assert_eq!(spawned.count_tiles(), 2);
//! ```
pub mod error;
pub mod field;
pub mod game;
pub mod row;
pub mod settings;
pub mod spawn;

pub use error::{FieldError, SettingsError};
pub use field::{Field, Side};
pub use game::{Game, GameState, SwipeOutcome};
pub use settings::Settings;
pub use spawn::SpawnPolicy;
