use thiserror::Error;

use crate::domain::{Chips, SeatNumber};

/// Почему движок отклонил переход.
///
/// Публичные переходы (`fold`, `check`, ...) при ошибке возвращают состояние
/// без изменений; `try_*`-варианты отдают причину наружу.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("недостаточно игроков для раздачи: {0}")]
    NotEnoughPlayers(usize),

    #[error("раздача уже идёт")]
    HandAlreadyStarted,

    #[error("раздача ещё не начата")]
    HandNotStarted,

    #[error("раздача уже завершена")]
    HandComplete,

    #[error("раздача ещё не завершена")]
    HandNotComplete,

    #[error("сейчас никто не должен ходить")]
    NoActor,

    #[error("место {0} пустое или не существует")]
    InvalidSeat(SeatNumber),

    #[error("сейчас не ход места {0}")]
    NotPlayersTurn(SeatNumber),

    #[error("игрок на месте {0} уже сфолдил")]
    SeatFolded(SeatNumber),

    #[error("невозможно выполнить check: ставка {bet}, а уравнять нужно до {current}")]
    CannotCheck { bet: Chips, current: Chips },

    #[error("невозможно выполнить call: ставка уже уравнена")]
    NothingToCall,

    #[error("ставка {amount} не больше уже поставленных {already}")]
    BetTooSmall { amount: Chips, already: Chips },

    #[error("на борде не может быть больше 5 карт (получилось бы {0})")]
    TooManyBoardCards(usize),

    #[error("банк уже распределён")]
    PotAlreadyDistributed,

    #[error("некорректная конфигурация: {0}")]
    Config(#[from] crate::domain::ConfigError),
}
