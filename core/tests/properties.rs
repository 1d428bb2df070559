use std::collections::HashSet;
use std::time::Duration;

use arcade_core::*;
use web_time::Instant;

/// Every board reachable with the player moving first and no finished line.
fn open_boards_awaiting_opponent() -> Vec<Board> {
    fn walk(
        cells: [Option<Actor>; 9],
        to_move: Actor,
        seen: &mut HashSet<Board>,
        out: &mut Vec<Board>,
    ) {
        let board = Board::from(cells);
        if !seen.insert(board) || board.winner().is_some() || board.is_full() {
            return;
        }
        if to_move == Actor::Opponent {
            out.push(board);
        }
        for index in board.free_cells() {
            let mut next = cells;
            next[usize::from(index)] = Some(to_move);
            walk(next, to_move.other(), seen, out);
        }
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    walk([None; 9], Actor::Player, &mut seen, &mut out);
    out
}

fn with_mark(board: &Board, index: u8, actor: Actor) -> Board {
    let mut cells = [None; 9];
    for i in 0..9u8 {
        cells[usize::from(i)] = board.get(i);
    }
    cells[usize::from(index)] = Some(actor);
    Board::from(cells)
}

#[test]
fn opponent_never_misses_an_immediate_win() {
    let mut rng = RandomSource::seeded(21);
    let boards = open_boards_awaiting_opponent();
    assert!(!boards.is_empty());

    for board in boards {
        let Some(win) = board.completing_cell(Actor::Opponent) else {
            continue;
        };
        let pick = select_opponent_cell(&board, Difficulty::Standard, &mut rng).unwrap();
        assert_eq!(pick, win, "missed win on\n{}", board);
        assert_eq!(
            with_mark(&board, pick, Actor::Opponent).winner().map(|(a, _)| a),
            Some(Actor::Opponent)
        );
    }
}

#[test]
fn opponent_blocks_when_it_cannot_win() {
    let mut rng = RandomSource::seeded(22);
    for board in open_boards_awaiting_opponent() {
        if board.completing_cell(Actor::Opponent).is_some() {
            continue;
        }
        let Some(_) = board.completing_cell(Actor::Player) else {
            continue;
        };
        let pick = select_opponent_cell(&board, Difficulty::Standard, &mut rng).unwrap();
        assert!(
            with_mark(&board, pick, Actor::Player).winner().is_some(),
            "cell {} does not block on\n{}",
            pick,
            board
        );
    }
}

#[test]
fn opponent_always_picks_a_free_cell() {
    let mut rng = RandomSource::seeded(23);
    for board in open_boards_awaiting_opponent() {
        for difficulty in [Difficulty::Standard, Difficulty::Casual] {
            let pick = select_opponent_cell(&board, difficulty, &mut rng).unwrap();
            assert!(board.is_free(pick));
        }
    }
}

#[test]
fn invalid_guesses_never_count_as_attempts() {
    let mut game = NumberGuess::new(GuessConfig::default(), RandomSource::seeded(5));
    game.submit_guess(1).unwrap();
    game.submit_guess(100).ok();
    let attempts = game.attempts();

    for value in (-300..=0).chain(101..=400) {
        assert!(matches!(
            game.submit_guess(value),
            Err(GameError::InvalidInput { .. })
        ));
    }
    for text in ["12.0", "0x10", "ten", "", "5 5"] {
        let err = game.submit_text(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
    assert_eq!(game.attempts(), attempts);
}

#[test]
fn memory_resolutions_change_both_cards_together() {
    for seed in 0..32 {
        let mut scheduler = VirtualScheduler::new();
        let mut game = Memory::new(MemoryConfig::default(), RandomSource::seeded(seed));
        let mut rng = RandomSource::seeded(seed + 1000);

        for _ in 0..400 {
            if game.status() == GameStatus::Won {
                break;
            }
            if game.is_locked() {
                let before = game.cards().to_vec();
                let fired = scheduler.advance(game.config().mismatch_delay);
                assert_eq!(fired.len(), 1);
                assert!(game.on_timer(fired[0]));
                let changed: Vec<_> = (0..before.len())
                    .filter(|&i| before[i] != game.cards()[i])
                    .collect();
                assert_eq!(changed.len(), 2);
                assert!(changed.iter().all(|&i| game.cards()[i].state == CardState::FaceDown));
                continue;
            }

            let index = rng.below(game.cards().len());
            let before = game.cards().to_vec();
            let outcome = game.flip(index, &mut scheduler).unwrap();
            let changed: Vec<_> = (0..before.len())
                .filter(|&i| before[i] != game.cards()[i])
                .collect();

            match outcome {
                FlipOutcome::NoChange => assert!(changed.is_empty()),
                FlipOutcome::Flipped | FlipOutcome::Mismatched => assert_eq!(changed, vec![index]),
                FlipOutcome::Matched | FlipOutcome::Won => {
                    assert_eq!(changed.len(), 2);
                    let states: Vec<_> = game.cards().iter().map(|c| c.state).collect();
                    assert!(changed.iter().all(|&i| states[i] == CardState::Matched));
                }
            }
        }
    }
}

#[test]
fn reaction_before_live_never_yields_latency() {
    let mut scheduler = VirtualScheduler::new();
    let mut game = Reaction::new(ReactionConfig::default(), RandomSource::seeded(77));
    let t0 = Instant::now();

    for wait_ms in [0u64, 500, 1000, 1099] {
        game.start(&mut scheduler);
        for token in scheduler.advance(Duration::from_millis(wait_ms)) {
            game.on_timer(token, t0);
        }
        let err = game.respond(t0, &mut scheduler).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PrematureAction);
        assert_eq!(game.last_report(), Some(ReactionReport::FalseStart));
        assert_eq!(game.best(), None);
    }
}

#[test]
fn whole_sessions_play_to_completion() {
    let config = ArcadeConfig::default();
    let mut scheduler = VirtualScheduler::new();
    let now = Instant::now();

    let mut ttt = GameSession::seeded(GameKind::TicTacToe, &config, 8);
    let mut cell = 0;
    while ttt.status() == GameStatus::InProgress {
        match ttt.handle_input(Input::Cell(cell), now, &mut scheduler) {
            Ok(_) | Err(GameError::CellOccupied) => cell = (cell + 1) % 9,
            Err(err) => panic!("unexpected {:?}", err),
        }
    }
    assert!(ttt.status().is_finished());

    let mut guess = GameSession::seeded(GameKind::NumberGuess, &config, 8);
    let (mut low, mut high) = (1, 100);
    loop {
        let mid = (low + high) / 2;
        match guess.handle_input(Input::Submit(mid.to_string()), now, &mut scheduler) {
            Ok(Feedback::Guess(GuessOutcome::TooLow)) => low = mid + 1,
            Ok(Feedback::Guess(GuessOutcome::TooHigh)) => high = mid - 1,
            Ok(Feedback::Guess(GuessOutcome::Correct)) => break,
            other => panic!("unexpected {:?}", other),
        }
    }
    assert_eq!(guess.status(), GameStatus::Won);
    assert_eq!(
        guess.handle_input(Input::Confirm, now, &mut scheduler),
        Ok(Feedback::Restarted)
    );
    assert_eq!(guess.status(), GameStatus::InProgress);
}

#[test]
fn engines_sharing_a_scheduler_keep_their_own_timers() {
    let mut scheduler = VirtualScheduler::new();
    let mut memory = Memory::new(MemoryConfig::default(), RandomSource::seeded(3));
    let mut reaction = Reaction::new(ReactionConfig::default(), RandomSource::seeded(4));
    let t0 = Instant::now();

    let first = memory.cards()[0].icon;
    let other = (1..memory.cards().len())
        .find(|&i| memory.cards()[i].icon != first)
        .unwrap();
    memory.flip(0, &mut scheduler).unwrap();
    assert_eq!(
        memory.flip(other, &mut scheduler),
        Ok(FlipOutcome::Mismatched)
    );
    reaction.start(&mut scheduler);
    assert_eq!(scheduler.pending_count(), 2);

    let fired = scheduler.advance(memory.config().mismatch_delay);
    assert_eq!(fired.len(), 1);
    assert!(!reaction.on_timer(fired[0], t0));
    assert!(memory.on_timer(fired[0]));
    assert!(!memory.is_locked());
    assert_eq!(reaction.state(), ReactionState::Pending);

    let fired = scheduler.advance(ReactionConfig::default().max_delay);
    assert_eq!(fired.len(), 1);
    assert!(!memory.on_timer(fired[0]));
    assert!(reaction.on_timer(fired[0], t0));
    assert_eq!(reaction.state(), ReactionState::Live(t0));
}
