use crate::domain::chips::Chips;
use crate::domain::SeatNumber;
use crate::engine::actions::PlayerActionKind;
use crate::engine::errors::EngineError;
use crate::engine::game_loop::HandState;

/// Можно ли начинать раздачу.
pub fn validate_start(state: &HandState) -> Result<(), EngineError> {
    if state.hand_started {
        return Err(EngineError::HandAlreadyStarted);
    }
    state.config.validate()?;

    let seated = state.occupied().len();
    if seated < 2 {
        return Err(EngineError::NotEnoughPlayers(seated));
    }
    Ok(())
}

/// Проверка, что раздача идёт и есть кому ходить. Возвращает место актёра.
pub fn validate_turn(state: &HandState) -> Result<SeatNumber, EngineError> {
    if !state.hand_started {
        return Err(EngineError::HandNotStarted);
    }
    if state.hand_complete {
        return Err(EngineError::HandComplete);
    }
    let seat = state.current_actor.ok_or(EngineError::NoActor)?;
    if state.player(seat).is_none() {
        return Err(EngineError::InvalidSeat(seat));
    }
    if state.folded.contains(&seat) {
        return Err(EngineError::SeatFolded(seat));
    }
    Ok(seat)
}

/// Проверка, может ли актёр выполнить это действие при текущем состоянии ставок.
///
/// Стеки здесь не проверяются: они лишь подсказка, а не жёсткий лимит.
pub fn validate_action(
    state: &HandState,
    action: &PlayerActionKind,
) -> Result<SeatNumber, EngineError> {
    let seat = validate_turn(state)?;
    let bet = state.bet_of(seat);
    let current = state.betting.current_bet;

    match action {
        PlayerActionKind::Fold => Ok(seat),

        PlayerActionKind::Check => {
            if bet == current {
                Ok(seat)
            } else {
                Err(EngineError::CannotCheck { bet, current })
            }
        }

        PlayerActionKind::Call => {
            if current > bet {
                Ok(seat)
            } else {
                Err(EngineError::NothingToCall)
            }
        }

        PlayerActionKind::Bet(amount) | PlayerActionKind::AllIn(amount) => {
            if *amount <= bet {
                Err(EngineError::BetTooSmall {
                    amount: *amount,
                    already: bet,
                })
            } else {
                Ok(seat)
            }
        }
    }
}

/// Сколько фишек нужно добавить месту, чтобы уравнять текущую ставку.
pub fn diff_to_call(state: &HandState, seat: SeatNumber) -> Chips {
    state.betting.current_bet - state.bet_of(seat)
}
