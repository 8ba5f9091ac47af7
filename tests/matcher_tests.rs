//! Matcher tests - group discovery on reference boards

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use match_three::core::{Board, Group, Matcher, MatcherError, Matches, MaximumDeltaMatcher};
use match_three::types::{Delta, Position, Token, TokenSet};

fn board(alphabet: &str, notation: &str) -> Board {
    Board::from_token_string(TokenSet::from_chars(alphabet).unwrap(), notation).unwrap()
}

fn matcher(deltas: &[(i32, i32)]) -> MaximumDeltaMatcher {
    MaximumDeltaMatcher::new(deltas.iter().map(|&(dx, dy)| Delta::dxy(dx, dy))).unwrap()
}

fn group(cells: &[(i32, i32)]) -> Group {
    cells.iter().map(|&(x, y)| Position::at(x, y)).collect()
}

fn seeds(cells: &[(i32, i32)]) -> BTreeSet<Position> {
    group(cells)
}

fn matches(groups: &[&[(i32, i32)]]) -> Matches {
    groups.iter().map(|cells| group(cells)).collect()
}

#[test]
fn test_vertical_column_and_growing_seed_set() {
    let b = board("An", "An;An;AA");
    let m = matcher(&[(0, 1)]);
    let column = matches(&[&[(0, 0), (0, 1), (0, 2)]]);

    assert_eq!(m.match_all(&b, &seeds(&[(0, 2)])), column);
    assert_eq!(m.match_at(&b, Position::at(0, 2)), column);
    assert_eq!(m.match_all(&b, &seeds(&[(0, 2), (0, 1)])), column);

    assert_eq!(
        m.match_all(&b, &seeds(&[(0, 2), (0, 1), (1, 0)])),
        matches(&[&[(0, 0), (0, 1), (0, 2)], &[(1, 0), (1, 1)]])
    );
}

#[test]
fn test_negative_delta_matches_both_directions() {
    let b = board("nO", "nOO;OOO;nnO");
    let m = matcher(&[(0, -1)]);
    assert_eq!(
        m.match_at(&b, Position::at(2, 1)),
        matches(&[&[(2, 0), (2, 1), (2, 2)]])
    );
}

#[test]
fn test_unusual_deltas() {
    let b = board("nO", "nOO;OOO;nnO");
    let m = matcher(&[(0, -1), (-1, -1), (2, 1), (1, 2), (-2, 1)]);
    let big: &[(i32, i32)] = &[(2, 0), (2, 1), (2, 2), (1, 0), (1, 1), (0, 1)];

    assert_eq!(m.match_at(&b, Position::at(2, 1)), matches(&[big]));
    assert_eq!(m.match_at(&b, Position::at(1, 1)), matches(&[big]));

    let all = m.match_all(&b, &seeds(&[(0, 0), (1, 0), (2, 0), (0, 2), (1, 2), (2, 2)]));
    assert_eq!(all, matches(&[big, &[(0, 0), (1, 2)], &[(0, 2)]]));
}

#[test]
fn test_matcher_keeps_its_own_delta_snapshot() {
    let b = board("ab", "aaa;bbb");
    let expected = matches(&[&[(0, 0), (2, 0)]]);

    let mut deltas = vec![Delta::dxy(2, 0)];
    let m = MaximumDeltaMatcher::new(deltas.clone()).unwrap();
    deltas.push(Delta::dxy(1, 0));
    deltas.push(Delta::dxy(0, 0));
    assert_eq!(deltas.len(), 3);

    assert_eq!(m.match_at(&b, Position::at(0, 0)), expected);
    assert_eq!(m.deltas(), &[Delta::dxy(2, 0)]);
}

#[test]
fn test_empty_cells_break_groups() {
    let b = board("ab", "a a;   ;aaa");
    let m = matcher(&[(1, 0), (0, 1), (1, 1)]);
    assert_eq!(m.match_at(&b, Position::at(0, 0)), matches(&[&[(0, 0)]]));
}

#[test]
fn test_steps_are_not_combined() {
    let b = board("ab", "ab;ba");
    let m = matcher(&[(1, 0), (0, 1)]);
    assert_eq!(m.match_at(&b, Position::at(0, 0)), matches(&[&[(0, 0)]]));
}

#[test]
fn test_long_steps_cover_a_row() {
    let b = board("ab", "aaaaaaaaaa;          ");
    let m = matcher(&[(5, 0), (3, 0)]);
    let row: Vec<(i32, i32)> = (0..10).map(|x| (x, 0)).collect();
    assert_eq!(m.match_at(&b, Position::at(0, 0)), matches(&[row.as_slice()]));
}

#[test]
fn test_invalid_delta_sets() {
    assert_eq!(
        MaximumDeltaMatcher::new([Delta::dxy(1, 1), Delta::dxy(0, 0), Delta::dxy(-1, 1)]),
        Err(MatcherError::ZeroDelta(Delta::dxy(0, 0)))
    );
    assert_eq!(
        MaximumDeltaMatcher::new(Vec::<Delta>::new()),
        Err(MatcherError::EmptyDeltaSet)
    );
    assert_eq!(
        MaximumDeltaMatcher::from_optional(Some([
            Some(Delta::dxy(1, 1)),
            None,
            Some(Delta::dxy(-1, 1)),
        ])),
        Err(MatcherError::MissingDelta)
    );
    assert_eq!(
        MaximumDeltaMatcher::from_optional(None::<Vec<Option<Delta>>>),
        Err(MatcherError::MissingDeltaSet)
    );
}

#[test]
fn test_empty_board_has_no_nonempty_group() {
    let b = Board::new(TokenSet::from_chars("ab").unwrap(), 4, 4).unwrap();
    let m = matcher(&[(0, 1), (1, 0)]);
    let found = m.match_at(&b, Position::at(0, 0));
    assert!(found.len() <= 1);
    assert!(found.iter().all(BTreeSet::is_empty));
}

#[test]
fn test_million_cell_row() {
    const N: usize = 1_000_000;
    let mut b = Board::new(TokenSet::from_chars("ab").unwrap(), N, 2).unwrap();
    for x in 0..N as i32 {
        b.set(Position::at(x, 0), Some(Token::new('a'))).unwrap();
    }
    let m = matcher(&[(1, 0)]);

    let started = Instant::now();
    let found = m.match_at(&b, Position::at(0, 0));
    let elapsed = started.elapsed();

    assert_eq!(found.len(), 1);
    let row = found.iter().next().unwrap();
    assert_eq!(row.len(), N);
    assert!(row.iter().all(|p| p.y == 0));
    assert!(elapsed < Duration::from_secs(5), "matching took {:?}", elapsed);
}
