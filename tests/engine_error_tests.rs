//! Ошибки движка: причины отказа и их тексты.

use poker_hand_tracker::domain::{
    chips::Chips,
    player::TablePlayer,
    table::{empty_table, ConfigError, HandConfig, Seat},
};
use poker_hand_tracker::engine::{
    fold, new_hand, start_hand, try_set_hole_cards, EngineError,
};

#[test]
fn error_messages_carry_context() {
    let err = EngineError::CannotCheck {
        bet: Chips(2),
        current: Chips(10),
    };
    assert_eq!(
        err.to_string(),
        "невозможно выполнить check: ставка 2, а уравнять нужно до 10"
    );

    assert_eq!(
        EngineError::NotEnoughPlayers(1).to_string(),
        "недостаточно игроков для раздачи: 1"
    );
}

#[test]
fn config_error_converts_into_engine_error() {
    let err: EngineError = ConfigError::ZeroBigBlind.into();
    assert_eq!(err, EngineError::Config(ConfigError::ZeroBigBlind));
    assert!(err.to_string().contains("big blind"));
}

/// Сфолдившему месту карты уже не выдать.
#[test]
fn hole_cards_rejected_for_folded_or_empty_seat() {
    let mut seats = empty_table();
    for n in 1..=3u8 {
        seats[(n - 1) as usize] =
            Seat::occupied(n, TablePlayer::new(n as u64, format!("P{n}"), Chips(100)));
    }
    let state = start_hand(&new_hand(seats, HandConfig::default()), 0);
    let state = fold(&state, 1);

    assert_eq!(
        try_set_hole_cards(&state, 1, Vec::new()),
        Err(EngineError::SeatFolded(1))
    );
    assert_eq!(
        try_set_hole_cards(&state, 9, Vec::new()),
        Err(EngineError::InvalidSeat(9))
    );
}
