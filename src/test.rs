#[cfg(test)]
pub mod test {
    use anyhow::Result;
    use std::time::Duration;

    use crate::board::{ArrayBoard, Board, Cell, GameState};
    use crate::engine::{column_order, Engine};
    use crate::eval::{Evaluator, DRAW_SCORE, LOSS_SCORE, WIN_SCORE};
    use crate::transposition_table::{TranspositionTable, ZobristTable};

    // plain minimax without pruning, used as a reference for the engine's
    // alpha-beta search
    fn minimax(board: &mut ArrayBoard, evaluator: &Evaluator, depth: u32, maximizing: bool) -> i32 {
        if depth == 0 || board.state() != GameState::Playing {
            return evaluator.score(board);
        }
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for column in board.legal_columns() {
            board.apply_move(column);
            let value = minimax(board, evaluator, depth - 1, !maximizing);
            board.undo_last_move();
            best = if maximizing {
                best.max(value)
            } else {
                best.min(value)
            };
        }
        best
    }

    #[test]
    pub fn empty_board_opens_in_the_center() -> Result<()> {
        let mut board = ArrayBoard::new(6, 7, 4);
        let mut engine = Engine::new(6, 7, 4, true, Duration::from_secs(1))?;
        assert_eq!(engine.choose_move(&mut board)?, 3);

        let mut board = ArrayBoard::new(6, 8, 4);
        let mut engine = Engine::new(6, 8, 4, true, Duration::from_secs(1))?;
        assert_eq!(engine.choose_move(&mut board)?, 4);
        Ok(())
    }

    #[test]
    pub fn column_order_alternates_outward() {
        for columns in 1..=9 {
            let order = column_order(columns);

            let mut sorted = order.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..columns).collect::<Vec<_>>());

            assert_eq!(order[0], columns / 2);
            if columns % 2 == 0 {
                assert_eq!(order[1], columns / 2 - 1);
            }
        }

        assert_eq!(column_order(7), vec![3, 2, 4, 1, 5, 0, 6]);
        assert_eq!(column_order(8), vec![4, 3, 2, 5, 1, 6, 0, 7]);
    }

    #[test]
    pub fn sentinels_mark_terminal_states() -> Result<()> {
        // player 1 stacks column 1 to a vertical win
        let won = ArrayBoard::from_str(6, 7, 4, "1212121")?;
        assert_eq!(won.state(), GameState::PlayerOneWin);
        assert_eq!(Evaluator::new(6, 7, 4, true).score(&won), WIN_SCORE);
        assert_eq!(Evaluator::new(6, 7, 4, false).score(&won), LOSS_SCORE);

        // a full 2x2 board cannot align 3 tokens
        let drawn = ArrayBoard::from_str(2, 2, 3, "1122")?;
        assert_eq!(drawn.state(), GameState::Draw);
        assert_eq!(Evaluator::new(2, 2, 3, true).score(&drawn), DRAW_SCORE);

        // anything still open scores strictly between the sentinels
        let open = ArrayBoard::from_str(6, 7, 4, "213242")?;
        assert_eq!(open.state(), GameState::Playing);
        let score = Evaluator::new(6, 7, 4, true).score(&open);
        assert!(score > LOSS_SCORE && score < WIN_SCORE);
        Ok(())
    }

    #[test]
    pub fn evaluation_favors_the_stronger_side() -> Result<()> {
        // player 1 holds an open vertical three, player 2 a pair
        let board = ArrayBoard::from_str(6, 7, 4, "12121")?;
        assert!(Evaluator::new(6, 7, 4, true).score(&board) > 0);
        assert!(Evaluator::new(6, 7, 4, false).score(&board) < 0);
        Ok(())
    }

    #[test]
    pub fn cramped_column_runs_score_nothing() -> Result<()> {
        // two-column boards leave no horizontal or diagonal windows, so
        // only the column scan contributes
        let moves = "1211";

        // on four rows, the top token of column 1 (player 2, one empty
        // cell above) can never grow into a four: only column 2 counts
        let cramped = ArrayBoard::from_str(4, 2, 4, moves)?;
        assert_eq!(Evaluator::new(4, 2, 4, true).score(&cramped), -1);

        // on six rows the same stack has room, and both columns count
        let roomy = ArrayBoard::from_str(6, 2, 4, moves)?;
        assert_eq!(Evaluator::new(6, 2, 4, true).score(&roomy), -2);
        Ok(())
    }

    #[test]
    pub fn fingerprints_depend_only_on_occupancy() -> Result<()> {
        let zobrist = ZobristTable::new(6, 7);

        // the same occupancy reached through different move orders
        let a = ArrayBoard::from_str(6, 7, 4, "123")?;
        let b = ArrayBoard::from_str(6, 7, 4, "321")?;
        assert_eq!(zobrist.fingerprint(&a), zobrist.fingerprint(&b));

        // one differing cell flips the fingerprint
        let c = ArrayBoard::from_str(6, 7, 4, "124")?;
        assert_ne!(zobrist.fingerprint(&a), zobrist.fingerprint(&c));

        // undoing a move restores the previous fingerprint
        let mut d = ArrayBoard::from_str(6, 7, 4, "123")?;
        let before = zobrist.fingerprint(&d);
        d.apply_move(5);
        assert_ne!(zobrist.fingerprint(&d), before);
        d.undo_last_move();
        assert_eq!(zobrist.fingerprint(&d), before);
        Ok(())
    }

    #[test]
    pub fn cache_entries_are_depth_gated() {
        let mut cache = TranspositionTable::new();
        cache.store(0xDEAD_BEEF, 42, 2);

        assert_eq!(cache.get(0xDEAD_BEEF, 0), Some(42));
        assert_eq!(cache.get(0xDEAD_BEEF, 1), Some(42));
        assert_eq!(cache.get(0xDEAD_BEEF, 2), Some(42));
        // a shallower entry never answers a deeper query
        assert_eq!(cache.get(0xDEAD_BEEF, 3), None);
        // unknown fingerprints miss outright
        assert_eq!(cache.get(0xFEED_FACE, 0), None);

        // the latest write wins
        cache.store(0xDEAD_BEEF, 7, 3);
        assert_eq!(cache.get(0xDEAD_BEEF, 3), Some(7));
    }

    #[test]
    pub fn pruning_preserves_the_minimax_choice() -> Result<()> {
        let mut board = ArrayBoard::from_str(4, 4, 3, "1223")?;
        let evaluator = Evaluator::new(4, 4, 3, true);
        let mut engine = Engine::new(4, 4, 3, true, Duration::from_secs(10))?;

        for depth in 1..=4 {
            // root sweep with pruning, mirroring the engine's deepening loop
            let mut best_pruned = (i32::MIN, usize::MAX);
            for column in column_order(4) {
                if board.is_column_full(column) {
                    continue;
                }
                board.apply_move(column);
                let score = engine.search(&mut board, i32::MIN, i32::MAX, depth - 1, false);
                board.undo_last_move();
                if score > best_pruned.0 {
                    best_pruned = (score, column);
                }
            }

            // the same sweep against the unpruned reference
            let mut best_plain = (i32::MIN, usize::MAX);
            for column in column_order(4) {
                if board.is_column_full(column) {
                    continue;
                }
                board.apply_move(column);
                let score = minimax(&mut board, &evaluator, depth - 1, false);
                board.undo_last_move();
                if score > best_plain.0 {
                    best_plain = (score, column);
                }
            }

            assert_eq!(
                best_pruned.1, best_plain.1,
                "pruned and plain search disagree at depth {}",
                depth
            );
        }
        Ok(())
    }

    #[test]
    pub fn takes_the_immediate_win() -> Result<()> {
        // player 1 to move holds columns 2-4 of the bottom row; column 1
        // is blocked by the opponent, so column 5 is the only win
        let mut board = ArrayBoard::from_str(6, 7, 4, "213242")?;
        let mut engine = Engine::new(6, 7, 4, true, Duration::from_millis(300))?;
        assert_eq!(engine.choose_move(&mut board)?, 4);
        Ok(())
    }

    #[test]
    pub fn blocks_the_immediate_loss() -> Result<()> {
        // player 2 threatens columns 1-3 of the bottom row against the
        // left wall; only dropping into column 4 stops the win
        let mut board = ArrayBoard::from_str(6, 7, 4, "517273")?;
        let mut engine = Engine::new(6, 7, 4, true, Duration::from_millis(300))?;
        assert_eq!(engine.choose_move(&mut board)?, 3);
        Ok(())
    }

    #[test]
    pub fn expired_budget_falls_back_to_a_legal_column() -> Result<()> {
        let mut board = ArrayBoard::from_str(6, 7, 4, "213242")?;
        // a nanosecond is gone before the first root move starts
        let mut engine = Engine::new(6, 7, 4, true, Duration::from_nanos(1))?;
        let column = engine.choose_move(&mut board)?;
        assert!(board.legal_columns().contains(&column));
        Ok(())
    }

    #[test]
    pub fn undo_restores_the_position() -> Result<()> {
        let mut board = ArrayBoard::from_str(6, 7, 4, "44455")?;

        let snapshot: Vec<Cell> = (0..6)
            .flat_map(|row| (0..7).map(move |col| (row, col)))
            .map(|(row, col)| board.cell(row, col))
            .collect();
        let state = board.state();
        let legal = board.legal_columns();
        let occupied = board.occupied_cells();

        board.apply_move(3);
        board.apply_move(0);
        board.undo_last_move();
        board.undo_last_move();

        let restored: Vec<Cell> = (0..6)
            .flat_map(|row| (0..7).map(move |col| (row, col)))
            .map(|(row, col)| board.cell(row, col))
            .collect();
        assert_eq!(snapshot, restored);
        assert_eq!(board.state(), state);
        assert_eq!(board.legal_columns(), legal);
        assert_eq!(board.occupied_cells(), occupied);
        Ok(())
    }

    #[test]
    pub fn play_checked_rejects_bad_moves() -> Result<()> {
        let mut board = ArrayBoard::new(2, 3, 3);

        assert!(board.play_checked(0).is_err());
        assert!(board.play_checked(4).is_err());

        // fill column 1 and try once more
        board.play_checked(1)?;
        board.play_checked(1)?;
        assert!(board.play_checked(1).is_err());
        Ok(())
    }

    #[test]
    pub fn terminal_states_are_detected() -> Result<()> {
        // horizontal win along the bottom row
        let horizontal = ArrayBoard::from_str(6, 7, 4, "1525354")?;
        assert_eq!(horizontal.state(), GameState::PlayerOneWin);

        // ascending diagonal built up move by move
        let diagonal = ArrayBoard::from_str(6, 7, 4, "12233434474")?;
        assert_eq!(diagonal.state(), GameState::PlayerOneWin);

        // player 2 wins too
        let second = ArrayBoard::from_str(6, 7, 4, "12127272")?;
        assert_eq!(second.state(), GameState::PlayerTwoWin);

        // no further moves are accepted after the game ends
        let mut over = ArrayBoard::from_str(6, 7, 4, "1212121")?;
        assert!(over.play_checked(3).is_err());
        Ok(())
    }
}
