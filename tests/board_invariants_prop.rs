#![forbid(unsafe_code)]

/**
 * Property tests over generated mid-game positions.
 *
 * Invariants covered:
 * - Illegal placements leave the board untouched.
 * - History length always equals the stone count.
 * - Whole-board evaluation is antisymmetric between the two colors.
 * - Placement scoring is a pure function of the snapshot.
 * - Candidates are empty cells within the radius of some stone.
 * - Every tier takes an immediate win and blocks an immediate loss.
 * - The hard tier's move is never worse than medium's under the search,
 *   for the default parameters and for other depth/top-K/radius settings.
 */
use gomoku::eval::{evaluate, score_placement};
use gomoku::rules::completes_five;
use gomoku::search::{generate_candidates, Searcher};
use gomoku::{AIEngine, Board, Difficulty, Pos, SearchConfig, Stone};
use proptest::prelude::*;

/// Play `moves` alternately from Black, skipping illegal ones and stopping
/// at the first five.
fn build_board(size: usize, moves: &[(usize, usize)]) -> Board {
    let mut board = Board::new(size);
    for &(row, col) in moves {
        let stone = board.side_to_move();
        if board.place(row, col, stone) {
            let pos = Pos::new(row as u8, col as u8);
            if board.check_win(pos) {
                break;
            }
        }
    }
    board
}

fn empty_cells(board: &Board) -> Vec<Pos> {
    let n = board.size() as u8;
    (0..n)
        .flat_map(|r| (0..n).map(move |c| Pos::new(r, c)))
        .filter(|&p| board.is_empty(p))
        .collect()
}

fn position() -> impl Strategy<Value = Board> {
    (9usize..=15).prop_flat_map(|size| {
        prop::collection::vec((0..size, 0..size), 0..60)
            .prop_map(move |moves| build_board(size, &moves))
    })
}

/// Positions kept around the center so they stay dense enough for threats
fn dense_position() -> impl Strategy<Value = Board> {
    prop::collection::vec((4usize..11, 4usize..11), 4..40).prop_map(|moves| build_board(15, &moves))
}

fn search_config() -> impl Strategy<Value = SearchConfig> {
    (1u8..=3, 4usize..=12, 1u8..=3).prop_map(|(depth, top_k, candidate_radius)| SearchConfig {
        depth,
        top_k,
        candidate_radius,
    })
}

proptest! {
    #[test]
    fn illegal_placement_is_noop(board in position(), row in 0usize..30, col in 0usize..30) {
        let mut after = board.clone();
        let legal = board.contains(row, col) && board.is_empty(Pos::new(row as u8, col as u8));
        let placed = after.place(row, col, Stone::White);

        prop_assert_eq!(placed, legal);
        if !legal {
            prop_assert_eq!(&after, &board);
        } else {
            prop_assert_eq!(after.history().len(), board.history().len() + 1);
        }
    }

    #[test]
    fn history_matches_stone_count(board in position()) {
        prop_assert_eq!(board.history().len(), board.stone_count());
        let black = board.stones(Stone::Black).count();
        let white = board.stones(Stone::White).count();
        prop_assert!(black == white || black == white + 1);
        if let Some(last) = board.last_move() {
            prop_assert_eq!(board.check_win(last), board.winner().is_some());
        }
    }

    #[test]
    fn evaluation_is_antisymmetric(board in position()) {
        prop_assert_eq!(evaluate(&board, Stone::Black), -evaluate(&board, Stone::White));
    }

    #[test]
    fn placement_scoring_is_pure(board in position()) {
        let snapshot = board.clone();
        for pos in empty_cells(&board).into_iter().take(40) {
            let first = score_placement(&board, pos, Stone::Black);
            prop_assert_eq!(first, score_placement(&snapshot, pos, Stone::Black));
        }
        prop_assert_eq!(&board, &snapshot);
    }

    #[test]
    fn candidates_are_near_stones(board in position(), radius in 1u8..=4) {
        let candidates = generate_candidates(&board, radius);
        if board.is_board_empty() {
            prop_assert_eq!(candidates, vec![board.center()]);
        } else {
            for pos in candidates {
                prop_assert!(board.is_empty(pos));
                prop_assert!(board.occupied().any(|s| s.chebyshev(pos) <= radius));
            }
        }
    }

    #[test]
    fn tiers_win_then_block(board in dense_position()) {
        prop_assume!(board.winner().is_none() && !board.is_full());
        let player = board.side_to_move();
        let cells = empty_cells(&board);
        let own_wins: Vec<Pos> = cells.iter().copied().filter(|&p| completes_five(&board, p, player)).collect();
        let their_wins: Vec<Pos> =
            cells.iter().copied().filter(|&p| completes_five(&board, p, player.opponent())).collect();

        for difficulty in Difficulty::ALL {
            let mut engine = AIEngine::new(15, difficulty);
            let chosen = engine.select_move(&board, player);
            prop_assert!(chosen.is_some());
            let chosen = chosen.unwrap();
            if !own_wins.is_empty() {
                prop_assert!(own_wins.contains(&chosen), "{} missed a win", difficulty);
            } else if !their_wins.is_empty() {
                prop_assert!(their_wins.contains(&chosen), "{} missed a block", difficulty);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn hard_never_worse_than_medium(board in dense_position()) {
        prop_assume!(board.winner().is_none() && !board.is_full());
        let player = board.side_to_move();

        let medium = AIEngine::new(15, Difficulty::Medium).select_move(&board, player);
        let hard = AIEngine::new(15, Difficulty::Hard).select_move(&board, player);
        let (Some(medium), Some(hard)) = (medium, hard) else {
            return Err(TestCaseError::fail("no move on a non-full board"));
        };

        let mut searcher = Searcher::new(3, 10, 2);
        let hard_value = searcher.score_root_move(&board, player, hard);
        let medium_value = searcher.score_root_move(&board, player, medium);
        prop_assert!(hard_value >= medium_value, "hard {:?} < medium {:?}", hard_value, medium_value);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn hard_never_worse_than_medium_with_custom_search(
        board in dense_position(),
        search in search_config(),
    ) {
        prop_assume!(board.winner().is_none() && !board.is_full());
        let player = board.side_to_move();

        let medium = AIEngine::with_search(15, Difficulty::Medium, search).select_move(&board, player);
        let hard = AIEngine::with_search(15, Difficulty::Hard, search).select_move(&board, player);
        let (Some(medium), Some(hard)) = (medium, hard) else {
            return Err(TestCaseError::fail("no move on a non-full board"));
        };

        let mut searcher = Searcher::new(search.depth, search.top_k, search.candidate_radius);
        let hard_value = searcher.score_root_move(&board, player, hard);
        let medium_value = searcher.score_root_move(&board, player, medium);
        prop_assert!(
            hard_value >= medium_value,
            "{:?}: hard {:?} < medium {:?}",
            search,
            hard_value,
            medium_value
        );
    }

    #[test]
    fn tiers_win_then_block_with_custom_search(
        board in dense_position(),
        search in search_config(),
    ) {
        prop_assume!(board.winner().is_none() && !board.is_full());
        let player = board.side_to_move();
        let cells = empty_cells(&board);
        let own_wins: Vec<Pos> = cells.iter().copied().filter(|&p| completes_five(&board, p, player)).collect();
        let their_wins: Vec<Pos> =
            cells.iter().copied().filter(|&p| completes_five(&board, p, player.opponent())).collect();

        for difficulty in Difficulty::ALL {
            let chosen = AIEngine::with_search(15, difficulty, search).select_move(&board, player);
            prop_assert!(chosen.is_some());
            let chosen = chosen.unwrap();
            if !own_wins.is_empty() {
                prop_assert!(own_wins.contains(&chosen), "{} missed a win", difficulty);
            } else if !their_wins.is_empty() {
                prop_assert!(their_wins.contains(&chosen), "{} missed a block", difficulty);
            }
        }
    }
}
