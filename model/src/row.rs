//! Single-line reduction: slide every tile toward index 0 and merge equal neighbours.

/// Largest tile a cell can hold. Two tiles of this value do not merge.
pub const MAX_TILE: u32 = 1 << 31;

/// Whether `a` (nearer the edge) and `b` merge into one tile.
pub fn can_merge(a: u32, b: u32) -> bool {
    a != 0 && a == b && a < MAX_TILE
}

/// Moves all non-zero values to the front, keeping their order, and pads with zeros.
pub fn compress(row: &[u32]) -> Vec<u32> {
    let mut result: Vec<u32> = row.iter().copied().filter(|&v| v != 0).collect();
    result.resize(row.len(), 0);
    result
}

/// Merges equal adjacent tiles in a single left-to-right pass and returns the score.
///
/// The right partner of every merge is zeroed, so a freshly doubled tile is never
/// compared again within the same pass.
pub fn merge(row: &mut [u32]) -> u64 {
    let mut score = 0;
    for i in 1..row.len() {
        if can_merge(row[i - 1], row[i]) {
            row[i - 1] *= 2;
            row[i] = 0;
            score += u64::from(row[i - 1]);
        }
    }
    score
}

/// Compress, merge, compress. Returns the reduced row and the merge score.
pub fn reduce(row: &[u32]) -> (Vec<u32>, u64) {
    let mut result = compress(row);
    let score = merge(&mut result);
    (compress(&result), score)
}

#[test]
fn compress_keeps_order() {
    assert_eq!(compress(&[0, 4, 0, 2]), vec![4, 2, 0, 0]);
    assert_eq!(compress(&[8, 0, 0, 0]), vec![8, 0, 0, 0]);
    assert_eq!(compress(&[0, 0, 0, 0]), vec![0, 0, 0, 0]);
    assert!(compress(&[]).is_empty());
}

#[test]
fn merge_single_pass() {
    let mut row = [2, 2, 2, 0];
    assert_eq!(merge(&mut row), 4);
    assert_eq!(row, [4, 0, 2, 0]);

    let mut row = [4, 4, 8, 0];
    assert_eq!(merge(&mut row), 8);
    assert_eq!(row, [8, 0, 8, 0]);
}

#[test]
fn reduce_four_equal() {
    assert_eq!(reduce(&[2, 2, 2, 2]), (vec![4, 4, 0, 0], 8));
}

#[test]
fn reduce_with_gaps() {
    assert_eq!(reduce(&[0, 2, 0, 2]), (vec![4, 0, 0, 0], 4));
    assert_eq!(reduce(&[2, 0, 0, 4]), (vec![2, 4, 0, 0], 0));
    assert_eq!(reduce(&[4, 4, 8, 8]), (vec![8, 16, 0, 0], 24));
}

#[test]
fn reduce_doubled_tile_not_merged_again() {
    assert_eq!(reduce(&[4, 4, 8, 0]), (vec![8, 8, 0, 0], 8));
    assert_eq!(reduce(&[2, 2, 4, 8]), (vec![4, 4, 8, 0], 4));
}

#[test]
fn reduce_degenerate_rows() {
    assert_eq!(reduce(&[]), (vec![], 0));
    assert_eq!(reduce(&[2]), (vec![2], 0));
    assert_eq!(reduce(&[0, 0, 0]), (vec![0, 0, 0], 0));
    assert_eq!(reduce(&[2, 4, 8, 16]), (vec![2, 4, 8, 16], 0));
}

#[test]
fn reduce_largest_tiles() {
    let half = MAX_TILE / 2;
    assert_eq!(reduce(&[half, half, 0]), (vec![MAX_TILE, 0, 0], u64::from(MAX_TILE)));
    assert_eq!(
        reduce(&[MAX_TILE, MAX_TILE, 2, 2]),
        (vec![MAX_TILE, MAX_TILE, 4, 0], 4)
    );
    assert!(!can_merge(MAX_TILE, MAX_TILE));
    assert!(can_merge(half, half));
    assert!(!can_merge(0, 0));
}
