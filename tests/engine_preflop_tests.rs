// tests/engine_preflop_tests.rs

//! Старт раздачи и префлоп:
//! - блайнды от кнопки и первый ходящий;
//! - хедз-ап (кнопка ставит BB и ходит первой);
//! - страддлы и Mississippi straddle;
//! - отказ при < 2 игроков и повторном старте;
//! - сценарий "6 игроков, все уравняли, BB чекнул".

use poker_hand_tracker::domain::{
    chips::Chips,
    card::parse_cards,
    hand::Street,
    player::TablePlayer,
    table::{empty_table, HandConfig, Seat, SeatNumber},
};
use poker_hand_tracker::engine::{
    call, check, new_hand, set_hole_cards, start_hand, try_start_hand, EngineError, HandActionKind,
    HandState,
};

/// Утилита: стол из пар (место, стек).
fn make_seats(players: &[(SeatNumber, u64)]) -> Vec<Seat> {
    let mut seats = empty_table();
    for &(number, stack) in players {
        seats[(number - 1) as usize] = Seat::occupied(
            number,
            TablePlayer::new(number as u64, format!("P{number}"), Chips(stack)),
        );
    }
    seats
}

/// Утилита: стол на `n` игроков подряд с одинаковыми стеками.
fn make_ring(n: SeatNumber, stack: u64) -> Vec<Seat> {
    let players: Vec<(SeatNumber, u64)> = (1..=n).map(|s| (s, stack)).collect();
    make_seats(&players)
}

fn started(seats: Vec<Seat>, config: HandConfig) -> HandState {
    let state = new_hand(seats, config);
    let next = start_hand(&state, 0);
    assert!(next.hand_started, "раздача должна стартовать");
    next
}

#[test]
fn blinds_posted_from_button_and_utg_acts_first() {
    let state = started(make_ring(6, 100), HandConfig::new(1, Chips(1), Chips(2)));

    assert_eq!(state.bet_of(2), Chips(1));
    assert_eq!(state.bet_of(3), Chips(2));
    assert_eq!(state.stack_of(2), Some(Chips(99)));
    assert_eq!(state.stack_of(3), Some(Chips(98)));
    assert_eq!(state.current_actor, Some(4));
    assert_eq!(state.betting.current_bet, Chips(2));
    assert_eq!(state.betting.min_raise, Chips(2));
    assert_eq!(state.street, Street::Preflop);

    let log = state.log.actions();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].kind, HandActionKind::PostBlind);
    assert_eq!((log[0].seq, log[0].seat, log[0].amount), (0, 2, Some(Chips(1))));
    assert_eq!((log[1].seq, log[1].seat, log[1].amount), (1, 3, Some(Chips(2))));
}

/// Кнопка на последнем месте: блайнды переходят через 9 → 1.
#[test]
fn blinds_wrap_past_last_seat() {
    let state = started(
        make_seats(&[(2, 100), (5, 100), (9, 100)]),
        HandConfig::new(9, Chips(5), Chips(10)),
    );
    assert_eq!(state.bet_of(2), Chips(5));
    assert_eq!(state.bet_of(5), Chips(10));
    assert_eq!(state.current_actor, Some(9));
}

/// Хедз-ап: SB ставит место после кнопки, кнопка ставит BB и ходит первой.
#[test]
fn heads_up_button_acts_first_preflop() {
    let state = started(
        make_seats(&[(3, 100), (7, 100)]),
        HandConfig::new(3, Chips(1), Chips(2)),
    );
    assert_eq!(state.bet_of(7), Chips(1));
    assert_eq!(state.bet_of(3), Chips(2));
    let log = state.log.actions();
    assert_eq!((log[0].seat, log[0].amount), (7, Some(Chips(1))));
    assert_eq!((log[1].seat, log[1].amount), (3, Some(Chips(2))));
    assert_eq!(state.current_actor, Some(3));

    let state = check(&state, 1);
    assert_eq!(state.current_actor, Some(7));
    let state = call(&state, 2);

    assert_eq!(state.street, Street::Flop);
    assert_eq!(state.pot, Chips(4));
    assert_eq!(state.current_actor, Some(7));
}

/// Страддл: вдвое больше BB, следующий за ним ходит первым.
#[test]
fn straddle_posts_double_and_moves_first_actor() {
    let state = started(
        make_ring(6, 100),
        HandConfig::new(1, Chips(1), Chips(2)).with_straddles(1),
    );
    assert_eq!(state.bet_of(4), Chips(4));
    assert_eq!(state.betting.current_bet, Chips(4));
    assert_eq!(state.betting.min_raise, Chips(2));
    assert_eq!(state.current_actor, Some(5));
    assert_eq!(state.log.len(), 3);
}

#[test]
fn double_straddle_doubles_again() {
    let state = started(
        make_ring(6, 100),
        HandConfig::new(1, Chips(1), Chips(2)).with_straddles(2),
    );
    assert_eq!(state.bet_of(4), Chips(4));
    assert_eq!(state.bet_of(5), Chips(8));
    assert_eq!(state.betting.current_bet, Chips(8));
    assert_eq!(state.current_actor, Some(6));
}

/// Страддлов не больше, чем мест кроме блайндов.
#[test]
fn straddles_capped_by_table_size() {
    let state = started(
        make_ring(3, 100),
        HandConfig::new(1, Chips(1), Chips(2)).with_straddles(5),
    );
    // Единственный страддл ставит кнопка.
    assert_eq!(state.bet_of(1), Chips(4));
    assert_eq!(state.log.len(), 3);
    assert_eq!(state.current_actor, Some(2));
}

#[test]
fn heads_up_ignores_straddles() {
    let state = started(
        make_ring(2, 100),
        HandConfig::new(1, Chips(1), Chips(2)).with_straddles(1),
    );
    assert_eq!(state.log.len(), 2);
    assert_eq!(state.betting.current_bet, Chips(2));
    assert_eq!(state.current_actor, Some(1));
}

/// Mississippi: первым ходит место сразу слева от кнопки.
#[test]
fn mississippi_straddle_first_actor_left_of_button() {
    let state = started(
        make_ring(6, 100),
        HandConfig::new(1, Chips(1), Chips(2))
            .with_straddles(1)
            .with_mississippi_straddle(),
    );
    assert_eq!(state.current_actor, Some(2));
    assert_eq!(state.betting.current_bet, Chips(4));
}

#[test]
fn start_rejected_with_one_player() {
    let state = new_hand(make_ring(1, 100), HandConfig::default());

    assert_eq!(
        try_start_hand(&state, 0),
        Err(EngineError::NotEnoughPlayers(1))
    );
    // Без ошибки – просто то же самое состояние.
    assert_eq!(start_hand(&state, 0), state);
}

#[test]
fn start_rejected_twice_and_with_bad_config() {
    let state = started(make_ring(3, 100), HandConfig::default());
    assert_eq!(
        try_start_hand(&state, 0),
        Err(EngineError::HandAlreadyStarted)
    );

    let bad = new_hand(make_ring(3, 100), HandConfig::new(1, Chips(5), Chips(2)));
    assert!(matches!(
        try_start_hand(&bad, 0),
        Err(EngineError::Config(_))
    ));
}

/// Блайнд ставится целиком, даже если стек меньше; стек обнуляется, а не уходит в минус.
#[test]
fn short_stack_posts_full_blind() {
    let state = started(
        make_seats(&[(1, 100), (2, 100), (3, 1)]),
        HandConfig::new(1, Chips(1), Chips(2)),
    );
    assert_eq!(state.bet_of(3), Chips(2));
    assert_eq!(state.stack_of(3), Some(Chips::ZERO));
}

/// Неизвестный стек не мешает ставить блайнды.
#[test]
fn unknown_stack_posts_blind_without_deduction() {
    let mut seats = make_ring(3, 100);
    seats[2] = Seat::occupied(3, TablePlayer::without_stack(3, "Anon"));

    let state = started(seats, HandConfig::new(1, Chips(1), Chips(2)));
    assert_eq!(state.bet_of(3), Chips(2));
    assert_eq!(state.stack_of(3), None);
}

/// Карманные карты запоминаются на старте.
#[test]
fn hole_cards_snapshot_on_start() {
    let state = new_hand(make_ring(3, 100), HandConfig::default());
    let state = set_hole_cards(&state, 1, parse_cards("AhAd").unwrap());
    let state = set_hole_cards(&state, 2, parse_cards("7c2d").unwrap());
    // На пустое место карт не дать.
    let state = set_hole_cards(&state, 5, parse_cards("KsKc").unwrap());
    assert_eq!(state.hole_cards.len(), 2);

    let state = start_hand(&state, 0);
    assert_eq!(state.original_hole_cards, state.hole_cards);
}

/// 6 игроков, блайнды 1/2, кнопка 1: все уравняли, BB чекнул.
/// Ожидаем банк 12, флоп, первым ходит место 2.
#[test]
fn six_handed_limped_pot_goes_to_flop() {
    let mut state = started(make_ring(6, 100), HandConfig::new(1, Chips(1), Chips(2)));

    let mut t = 1;
    for seat in [4, 5, 6, 1, 2] {
        assert_eq!(state.current_actor, Some(seat));
        state = call(&state, t);
        t += 1;
        assert_eq!(state.street, Street::Preflop, "раунд не должен кончиться раньше BB");
    }

    assert_eq!(state.current_actor, Some(3));
    state = check(&state, t);

    assert_eq!(state.street, Street::Flop);
    assert_eq!(state.pot, Chips(12));
    assert!(state.bets.is_empty());
    assert_eq!(state.current_actor, Some(2));
    assert!(state.is_picking_board);
    assert_eq!(state.side_pots.len(), 1);
    assert_eq!(state.side_pots[0].amount, Chips(12));
    assert_eq!(state.side_pots[0].eligible_seats, vec![1, 2, 3, 4, 5, 6]);

    for seat in 1..=6 {
        assert_eq!(state.stack_of(seat), Some(Chips(98)));
    }
}
