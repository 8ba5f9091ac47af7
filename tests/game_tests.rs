//! Game tests - cascades, scoring and refills on reference games

use std::collections::{BTreeSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use match_three::core::{
    Board, BoardError, DeterministicStrategy, GameError, GamePhase, GameSnapshot, Group, MatchThreeGame,
    Matcher, Matches, MaximumDeltaMatcher, RandomStrategy, RotateSquare, UnionMatcher,
};
use match_three::types::{Delta, Position, Token, TokenSet, MIN_MATCH_SIZE};

fn board(alphabet: &str, notation: &str, columns: &[&str]) -> Board {
    let mut board = Board::from_token_string(TokenSet::from_chars(alphabet).unwrap(), notation).unwrap();
    board.set_filling_strategy(Box::new(DeterministicStrategy::from_strings(columns)));
    board
}

fn horizontal() -> MaximumDeltaMatcher {
    MaximumDeltaMatcher::new([Delta::dxy(1, 0)]).unwrap()
}

fn basic_board() -> Board {
    board(
        "abc",
        "b b ;abba;aaab",
        &["aaaaa", "bbbcabca", "abbabab", "aabcc"],
    )
}

fn cells(xs: std::ops::RangeInclusive<i32>, ys: std::ops::RangeInclusive<i32>) -> BTreeSet<Position> {
    xs.flat_map(|x| ys.clone().map(move |y| Position::at(x, y)))
        .collect()
}

/// Delegates to an inner matcher and records every seed set it is asked about
#[derive(Debug)]
struct RecordingMatcher<M> {
    inner: M,
    calls: Arc<Mutex<Vec<BTreeSet<Position>>>>,
}

impl<M: Matcher> Matcher for RecordingMatcher<M> {
    fn match_at(&self, board: &Board, seed: Position) -> Matches {
        self.calls.lock().unwrap().push([seed].into_iter().collect());
        self.inner.match_at(board, seed)
    }

    fn match_all(&self, board: &Board, seeds: &BTreeSet<Position>) -> Matches {
        self.calls.lock().unwrap().push(seeds.clone());
        self.inner.match_all(board, seeds)
    }
}

/// Returns queued results, then nothing
#[derive(Debug)]
struct PredeterminedMatcher {
    results: Mutex<VecDeque<Matches>>,
}

impl PredeterminedMatcher {
    fn new(results: Vec<Matches>) -> Self {
        Self {
            results: Mutex::new(results.into()),
        }
    }

    fn next(&self) -> Matches {
        self.results.lock().unwrap().pop_front().unwrap_or_default()
    }
}

impl Matcher for PredeterminedMatcher {
    fn match_at(&self, _: &Board, _: Position) -> Matches {
        self.next()
    }

    fn match_all(&self, _: &Board, _: &BTreeSet<Position>) -> Matches {
        self.next()
    }
}

fn group(cells: &[(i32, i32)]) -> Group {
    cells.iter().map(|&(x, y)| Position::at(x, y)).collect()
}

#[test]
fn test_basic_game() {
    let mut game = MatchThreeGame::new(basic_board(), horizontal());

    let start = game.initialize_board_and_start().unwrap();
    assert_eq!(game.board().to_token_string(), "acba;abba;abaa");
    assert_eq!(game.score(), 18);
    assert_eq!(start.rounds.len(), 2);
    assert_eq!(start.points, 18);

    // Reverse of a clockwise rotation is a counter-clockwise one.
    let rotation = RotateSquare::clockwise(Position::at(0, 1)).reversed();
    let report = game.accept_move(&rotation).unwrap();
    assert_eq!(game.board().to_token_string(), "aabc;acac;acba");
    assert_eq!(game.score(), 66);
    assert_eq!(report.points, 48);
    assert_eq!(report.rounds.iter().map(|r| r.points).collect::<Vec<_>>(), vec![16, 32]);
}

#[test]
fn test_matcher_sees_only_changed_positions() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let matcher = RecordingMatcher {
        inner: horizontal(),
        calls: Arc::clone(&calls),
    };
    let mut game = MatchThreeGame::new(basic_board(), matcher);

    game.initialize_board_and_start().unwrap();
    assert_eq!(
        calls.lock().unwrap().drain(..).collect::<Vec<_>>(),
        vec![cells(0..=3, 0..=2), cells(0..=2, 0..=2), cells(1..=3, 0..=2)]
    );

    game.accept_move(&RotateSquare::counter_clockwise(Position::at(0, 1)))
        .unwrap();
    assert_eq!(
        calls.lock().unwrap().drain(..).collect::<Vec<_>>(),
        vec![cells(0..=1, 1..=2), cells(0..=3, 0..=2), cells(0..=3, 0..=1)]
    );
}

#[test]
fn test_subset_groups_are_removed_once() {
    let found: Matches = [
        group(&[(1, 0), (2, 0)]),
        group(&[(0, 1), (0, 2), (1, 2), (2, 2)]),
        group(&[(0, 2), (1, 2), (2, 2)]),
        group(&[(2, 1), (0, 2), (1, 2), (2, 2)]),
    ]
    .into_iter()
    .collect();
    let matcher = PredeterminedMatcher::new(vec![found]);
    let mut game = MatchThreeGame::new(board("abcde", "ccc;bbb;aaa", &["de", "d", "de"]), matcher);

    let report = game.initialize_board_and_start().unwrap();
    assert_eq!(game.board().to_token_string(), "ede;dcd;cbc");
    assert_eq!(game.score(), 20);
    assert_eq!(report.rounds.len(), 1);
    assert_eq!(report.rounds[0].groups.len(), 2);
    assert_eq!(report.removed_tokens(), 5);
}

#[test]
fn test_union_of_axes() {
    let matcher = UnionMatcher::default()
        .with(horizontal())
        .with(MaximumDeltaMatcher::new([Delta::dxy(0, 1)]).unwrap());
    let mut game = MatchThreeGame::new(
        board("AXO*", "O*O;***;O*O;O*O", &["AOA**", "AXAXA", "A**A*"]),
        matcher,
    );

    game.initialize_board_and_start().unwrap();
    assert_eq!(game.board().to_token_string(), "*A*;*XA;AA*;OX*");
    assert_eq!(game.score(), 49);
}

#[test]
fn test_exhausted_refill_is_reported() {
    let mut game = MatchThreeGame::new(board("ab", "aaa;bab", &["", "", ""]), horizontal());
    let err = game.initialize_board_and_start().unwrap_err();
    assert_eq!(err, GameError::Board(BoardError::FillingExhausted(0)));
    assert_eq!(game.phase(), GamePhase::Ready);

    // The resolved round stays scored and its cells stay cleared.
    assert_eq!(game.score(), 3);
    assert_eq!(game.board().to_token_string(), "   ;bab");
    assert_eq!(game.board().empty_count(), 3);
}

#[test]
fn test_start_scales_with_many_groups() {
    const WIDTH: usize = 999;
    const HEIGHT: usize = 500;
    let row: String = (0..WIDTH).map(|x| ['a', 'b', 'c'][(x / 3) % 3]).collect();
    let notation = vec![row; HEIGHT].join(";");
    let mut board = Board::from_token_string(TokenSet::from_chars("abc").unwrap(), &notation).unwrap();
    let columns: Vec<Vec<Token>> = (0..WIDTH)
        .map(|x| {
            if x % 2 == 0 {
                vec![Token::new('a'), Token::new('b')]
            } else {
                vec![Token::new('b'), Token::new('a')]
            }
        })
        .collect();
    board.set_filling_strategy(Box::new(DeterministicStrategy::cycling(columns)));
    let mut game = MatchThreeGame::new(board, horizontal());

    let started = Instant::now();
    let report = game.initialize_board_and_start().unwrap();
    let elapsed = started.elapsed();

    let groups = WIDTH / 3 * HEIGHT;
    assert_eq!(report.rounds.len(), 1);
    assert_eq!(report.rounds[0].groups.len(), groups);
    assert_eq!(game.score(), (3 * groups as u64) * groups as u64);
    assert!(elapsed < Duration::from_secs(20), "start took {:?}", elapsed);
}

#[test]
fn test_random_refills_leave_a_stable_board() {
    let tokens = TokenSet::from_chars("abcd").unwrap();
    let mut board = Board::new(tokens.clone(), 8, 8).unwrap();
    board.set_filling_strategy(Box::new(RandomStrategy::new(&tokens, 42)));
    let mut game = MatchThreeGame::new(board, horizontal());

    game.initialize_board_and_start().unwrap();
    assert_eq!(game.board().empty_count(), 0);

    let mut last_score = game.score();
    for origin in [(0, 0), (3, 2), (6, 6), (1, 5), (4, 4)] {
        game.accept_move(&RotateSquare::clockwise(Position::at(origin.0, origin.1)))
            .unwrap();
        assert!(game.score() >= last_score);
        last_score = game.score();

        assert_eq!(game.board().empty_count(), 0);
        let everything = game.board().positions().collect();
        assert!(game
            .matcher()
            .match_all(game.board(), &everything)
            .iter()
            .all(|g| g.len() < MIN_MATCH_SIZE));
    }
}

#[test]
fn test_snapshot_serializes() {
    let mut game = MatchThreeGame::new(basic_board(), horizontal());
    game.initialize_board_and_start().unwrap();

    let snapshot = GameSnapshot::from(&game);
    assert!(snapshot.playable());
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["rows"], serde_json::json!(["acba", "abba", "abaa"]));
    assert_eq!(json["score"], 18);
    assert_eq!(json["phase"], "ready");

    let back: GameSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back, snapshot);
}
