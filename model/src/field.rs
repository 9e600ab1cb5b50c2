use std::fmt;

use log::trace;
use ndarray::{aview1, s, Array2};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::FieldError;
use crate::row;
use crate::spawn::SpawnPolicy;
use Side::{Down, Left, Right, Up};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Side {
    Down,
    Left,
    Up,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Down, Left, Up, Right];
}

fn is_tile_value(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

/// Square game board. Zero is an empty cell, any other value is a tile.
///
/// A `Field` is never changed by engine operations: [`Field::swipe`] and
/// [`Field::append_tile`] return new fields.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field(pub(crate) Array2<u32>);

impl Field {
    pub fn new(size: usize) -> Self {
        Self(Array2::zeros((size, size)))
    }

    pub fn from_array(array: Array2<u32>) -> Result<Self, FieldError> {
        let (h, w) = (array.shape()[0], array.shape()[1]);
        if h != w {
            return Err(FieldError::NotSquare {
                height: h,
                width: w,
            });
        }
        if let Some(((y, x), &value)) = array.indexed_iter().find(|(_, v)| !is_tile_value(**v)) {
            return Err(FieldError::InvalidValue { x, y, value });
        }
        Ok(Self(array))
    }

    /// Builds a field from row vectors, top row first.
    pub fn from_rows(rows: &[Vec<u32>]) -> Result<Self, FieldError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != width) || height != width {
            return Err(FieldError::NotSquare { height, width });
        }
        let array = Array2::from_shape_fn((height, width), |(y, x)| rows[y][x]);
        Self::from_array(array)
    }

    pub fn as_array(&self) -> &Array2<u32> {
        &self.0
    }

    pub fn into_array(self) -> Array2<u32> {
        self.0
    }

    pub fn size(&self) -> usize {
        self.0.shape()[0]
    }

    /// Value at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.0[(y, x)]
    }

    pub fn count_tiles(&self) -> usize {
        self.0.iter().filter(|&&v| v != 0).count()
    }

    pub fn max_tile(&self) -> u32 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    // Reorients the grid so that `side` becomes "left".
    fn lanes_from_side(&self, side: Side) -> Array2<u32> {
        match side {
            Left => self.0.clone(),
            Right => self.0.slice(s![.., ..;-1]).to_owned(),
            Up => self.0.t().to_owned(),
            Down => self.0.t().slice(s![.., ..;-1]).to_owned(),
        }
    }

    fn lanes_to_side(lanes: Array2<u32>, side: Side) -> Array2<u32> {
        match side {
            Left => lanes,
            Right => lanes.slice(s![.., ..;-1]).to_owned(),
            Up => lanes.reversed_axes(),
            Down => lanes.slice(s![.., ..;-1]).to_owned().reversed_axes(),
        }
    }

    /// Slides and merges every row or column toward `side`.
    ///
    /// Returns the resulting field and the sum of all merged tile values. A move
    /// that changes nothing returns an equal field and zero score.
    pub fn swipe(&self, side: Side) -> (Field, u64) {
        let mut lanes = self.lanes_from_side(side);
        let mut score = 0;
        for mut lane in lanes.rows_mut() {
            let (reduced, gained) = row::reduce(&lane.to_vec());
            lane.assign(&aview1(&reduced));
            score += gained;
        }
        (Field(Self::lanes_to_side(lanes, side)), score)
    }

    pub fn can_swipe(&self, side: Side) -> bool {
        self.swipe(side).0 != *self
    }

    /// Empty cells as `(x, y)` pairs in row-major order.
    pub fn get_free_cells(&self) -> Vec<(usize, usize)> {
        self.0
            .indexed_iter()
            .filter(|(_, v)| **v == 0)
            .map(|((y, x), _)| (x, y))
            .collect()
    }

    /// Places one new tile on a random empty cell. A full field is returned unchanged.
    pub fn append_tile<R: Rng + ?Sized>(&self, rng: &mut R, policy: SpawnPolicy) -> Field {
        let mut field = self.clone();
        if let Some(&(x, y)) = self.get_free_cells().choose(rng) {
            let value = policy.pick_value(rng);
            trace!("spawning {} at ({}, {})", value, x, y);
            field.0[(y, x)] = value;
        }
        field
    }

    /// True when no cell is empty and no two orthogonal neighbours can merge.
    ///
    /// Any empty cell counts as a remaining move, without checking whether a
    /// swipe could actually reach it.
    pub fn is_terminal(&self) -> bool {
        if self.0.iter().any(|&v| v == 0) {
            return false;
        }
        let n = self.size();
        for ((y, x), &v) in self.0.indexed_iter() {
            if x + 1 < n && row::can_merge(v, self.0[(y, x + 1)]) {
                return false;
            }
            if y + 1 < n && row::can_merge(v, self.0[(y + 1, x)]) {
                return false;
            }
        }
        true
    }

    pub fn has_value(&self, target: u32) -> bool {
        self.0.iter().any(|&v| v == target)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.max_tile().to_string().len();
        for row in self.0.rows() {
            let cells: Vec<String> = row
                .iter()
                .map(|&v| match v {
                    0 => format!("{:>width$}", ".", width = width),
                    v => format!("{:>width$}", v, width = width),
                })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Field;
    use ndarray::Array2;
    use rand::Rng;

    pub fn field(values: Vec<u32>) -> Field {
        let size = (values.len() as f64).sqrt() as usize;
        Field::from_array(Array2::from_shape_vec((size, size), values).unwrap()).unwrap()
    }

    pub fn random_field<R: Rng>(rng: &mut R, size: usize) -> Field {
        let array = Array2::from_shape_fn((size, size), |_| {
            if rng.gen_bool(0.3) {
                0
            } else {
                1u32 << rng.gen_range(1u32..5)
            }
        });
        Field::from_array(array).unwrap()
    }
}

#[test]
fn field_size_and_get() {
    #[rustfmt::skip]
    let field = tests::field(vec![
        2, 4, 8,
        16, 32, 64,
        128, 256, 0,
    ]);
    assert_eq!(field.size(), 3);
    assert_eq!(field.get(2, 1), 64);
    assert_eq!(field.get(0, 2), 128);
    assert_eq!(field.get(2, 2), 0);
    assert_eq!(field.count_tiles(), 8);
    assert_eq!(field.max_tile(), 256);
}

#[test]
fn new_field_is_empty() {
    let field = Field::new(4);
    assert_eq!(field.size(), 4);
    assert_eq!(field.count_tiles(), 0);
    assert_eq!(field.get_free_cells().len(), 16);
    assert_eq!(field.into_array(), Array2::<u32>::zeros((4, 4)));
}

#[test]
fn field_from_array() {
    use ndarray::arr2;
    let field = Field::from_array(arr2(&[[8, 4], [0, 2]])).unwrap();
    assert_eq!(field.get(0, 0), 8);
    assert_eq!(field.get(1, 1), 2);
    assert_eq!(field.get_free_cells(), vec![(0, 1)]);
}

#[test]
fn field_from_array_rejects_bad_input() {
    use crate::error::FieldError;
    use ndarray::arr2;
    assert_eq!(
        Field::from_array(Array2::zeros((2, 3))),
        Err(FieldError::NotSquare {
            height: 2,
            width: 3
        })
    );
    assert_eq!(
        Field::from_array(arr2(&[[2, 4], [6, 0]])),
        Err(FieldError::InvalidValue { x: 0, y: 1, value: 6 })
    );
    assert_eq!(
        Field::from_array(arr2(&[[1, 0], [0, 0]])),
        Err(FieldError::InvalidValue { x: 0, y: 0, value: 1 })
    );
    assert!(Field::from_rows(&[vec![2, 0], vec![0]]).is_err());
}

#[test]
fn field_from_rows() {
    let field = Field::from_rows(&[vec![2, 0], vec![0, 4]]).unwrap();
    assert_eq!(field.get(0, 0), 2);
    assert_eq!(field.get(1, 1), 4);
}

#[cfg(test)]
#[rustfmt::skip]
fn sample_field() -> Field {
    tests::field(vec![
        0, 2, 4, 4,
        0, 2, 2, 4,
        0, 0, 2, 2,
        0, 0, 0, 2
    ])
}

#[test]
fn swipe_up() {
    let field = sample_field();
    #[rustfmt::skip]
    let expected = tests::field(vec![
        0, 4, 4, 8,
        0, 0, 4, 4,
        0, 0, 0, 0,
        0, 0, 0, 0
    ]);
    assert_eq!(field.swipe(Up), (expected, 20));
}

#[test]
fn swipe_down() {
    let field = sample_field();
    #[rustfmt::skip]
    let expected = tests::field(vec![
        0, 0, 0, 0,
        0, 0, 0, 0,
        0, 0, 4, 8,
        0, 4, 4, 4,
    ]);
    assert_eq!(field.swipe(Down), (expected, 20));
}

#[test]
fn swipe_left() {
    let field = sample_field();
    #[rustfmt::skip]
    let expected = tests::field(vec![
        2, 8, 0, 0,
        4, 4, 0, 0,
        4, 0, 0, 0,
        2, 0, 0, 0,
    ]);
    assert_eq!(field.swipe(Left), (expected, 16));
}

#[test]
fn swipe_right() {
    let field = sample_field();
    #[rustfmt::skip]
    let expected = tests::field(vec![
        0, 0, 2, 8,
        0, 0, 4, 4,
        0, 0, 0, 4,
        0, 0, 0, 2
    ]);
    assert_eq!(field.swipe(Right), (expected, 16));
}

#[test]
fn swipe_does_not_touch_input() {
    let field = sample_field();
    let copy = field.clone();
    for side in Side::ALL.iter() {
        let _ = field.swipe(*side);
        assert_eq!(field, copy);
    }
}

#[test]
fn swipe_up_two_by_two() {
    let field = Field::from_rows(&[vec![2, 0], vec![2, 0]]).unwrap();
    let expected = Field::from_rows(&[vec![4, 0], vec![0, 0]]).unwrap();
    assert_eq!(field.swipe(Up), (expected, 4));
}

#[test]
fn swipe_right_single_row() {
    // A 1x4 strip is not square, so the row is checked through a 4x4 field.
    let field = Field::from_rows(&[
        vec![2, 2, 0, 0],
        vec![0; 4],
        vec![0; 4],
        vec![0; 4],
    ])
    .unwrap();
    let (moved, score) = field.swipe(Right);
    assert_eq!(score, 4);
    assert_eq!(moved.as_array().row(0).to_vec(), vec![0, 0, 0, 4]);
    assert_eq!(moved.count_tiles(), 1);
}

#[test]
fn swipe_against_blocked_edge_is_noop() {
    #[rustfmt::skip]
    let field = tests::field(vec![
        2, 4, 0, 0,
        8, 2, 0, 0,
        0, 0, 0, 0,
        0, 0, 0, 0,
    ]);
    assert_eq!(field.swipe(Left), (field.clone(), 0));
    assert!(!field.can_swipe(Left));
    assert!(!field.can_swipe(Up));
    assert!(field.can_swipe(Right));
    assert!(field.can_swipe(Down));
}

#[test]
fn second_swipe_may_merge_again() {
    let field = Field::from_rows(&[vec![2, 2, 4], vec![0; 3], vec![0; 3]]).unwrap();
    let (once, gained) = field.swipe(Left);
    assert_eq!(gained, 4);
    assert_eq!(once.as_array().row(0).to_vec(), vec![4, 4, 0]);
    let (twice, gained) = once.swipe(Left);
    assert_eq!(gained, 8);
    assert_eq!(twice.as_array().row(0).to_vec(), vec![8, 0, 0]);
    assert_eq!(twice.swipe(Left), (twice.clone(), 0));
}

#[test]
fn swipe_properties_on_random_fields() {
    use rand::{rngs::StdRng, SeedableRng};
    let mut rng = StdRng::seed_from_u64(42);
    for size in 2..=6 {
        for _ in 0..200 {
            let field = tests::random_field(&mut rng, size);
            for side in Side::ALL.iter().copied() {
                let (once, gained) = field.swipe(side);
                assert_eq!(field.swipe(side), (once.clone(), gained));
                assert_eq!(once.size(), size);
                assert!(once.count_tiles() <= field.count_tiles());
                assert_eq!(
                    once.as_array().iter().map(|&v| v as u64).sum::<u64>(),
                    field.as_array().iter().map(|&v| v as u64).sum::<u64>()
                );
                let (twice, again) = once.swipe(side);
                assert!(twice.count_tiles() <= once.count_tiles());
                assert_eq!(again == 0, twice == once);
            }
        }
    }
}

#[test]
fn terminal_when_full_without_pairs() {
    #[rustfmt::skip]
    let field = tests::field(vec![
        2, 4, 2, 4,
        4, 2, 4, 2,
        2, 4, 2, 4,
        4, 2, 4, 2,
    ]);
    assert!(field.is_terminal());
    assert!(field.is_terminal());
    for side in Side::ALL.iter() {
        assert!(!field.can_swipe(*side));
    }
}

#[test]
fn not_terminal_with_horizontal_or_vertical_pair() {
    #[rustfmt::skip]
    let horizontal = tests::field(vec![
        2, 4, 2, 4,
        4, 2, 4, 2,
        2, 4, 8, 8,
        4, 2, 4, 2,
    ]);
    assert!(!horizontal.is_terminal());
    #[rustfmt::skip]
    let vertical = tests::field(vec![
        2, 4, 2, 4,
        4, 2, 4, 2,
        2, 4, 2, 4,
        4, 2, 4, 4,
    ]);
    assert!(!vertical.is_terminal());
}

#[test]
fn not_terminal_with_any_empty_cell() {
    #[rustfmt::skip]
    let field = tests::field(vec![
        2, 4, 2, 4,
        4, 2, 4, 2,
        2, 4, 2, 4,
        4, 2, 4, 0,
    ]);
    assert!(!field.is_terminal());
    assert!(!Field::new(4).is_terminal());
}

#[test]
fn has_value_finds_target() {
    let field = Field::from_rows(&[vec![2048, 0], vec![0, 4]]).unwrap();
    assert!(field.has_value(2048));
    assert!(field.has_value(4));
    assert!(!field.has_value(8));
}

#[test]
fn append_tile_fills_only_free_cell() {
    use crate::spawn::SpawnPolicy;
    use rand::{rngs::StdRng, SeedableRng};
    #[rustfmt::skip]
    let field = tests::field(vec![
        2, 4, 2,
        4, 0, 4,
        2, 4, 2,
    ]);
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let spawned = field.append_tile(&mut rng, SpawnPolicy::Uniform);
        let value = spawned.get(1, 1);
        assert!(value == 2 || value == 4);
        let mut expected = field.clone().into_array();
        expected[(1, 1)] = value;
        assert_eq!(spawned.into_array(), expected);
    }
}

#[test]
fn append_tile_on_full_field_is_noop() {
    use crate::spawn::SpawnPolicy;
    use rand::rngs::mock::StepRng;
    let field = Field::from_rows(&[vec![2, 4], vec![4, 2]]).unwrap();
    let mut rng = StepRng::new(0, 1);
    assert_eq!(field.append_tile(&mut rng, SpawnPolicy::Classic), field);
}

#[test]
fn append_tile_does_not_touch_input() {
    use crate::spawn::SpawnPolicy;
    use rand::rngs::mock::StepRng;
    let field = Field::new(3);
    let mut rng = StepRng::new(0, 1);
    let spawned = field.append_tile(&mut rng, SpawnPolicy::Uniform);
    assert_eq!(field.count_tiles(), 0);
    assert_eq!(spawned.count_tiles(), 1);
}

#[test]
fn display_aligns_cells() {
    let field = Field::from_rows(&[vec![2, 128], vec![0, 16]]).unwrap();
    assert_eq!(field.to_string(), "  2 128\n  .  16\n");
}

#[test]
fn swipe_largest_tiles_does_not_overflow() {
    use crate::row::MAX_TILE;
    let half = MAX_TILE / 2;
    let field = Field::from_rows(&[vec![half, half], vec![0, 0]]).unwrap();
    let (merged, score) = field.swipe(Left);
    assert_eq!(score, u64::from(MAX_TILE));
    assert_eq!(merged.get(0, 0), MAX_TILE);

    let full = Field::from_rows(&[vec![MAX_TILE, MAX_TILE], vec![MAX_TILE, MAX_TILE]]).unwrap();
    for side in Side::ALL.iter() {
        assert_eq!(full.swipe(*side), (full.clone(), 0));
    }
    assert!(full.is_terminal());
}
