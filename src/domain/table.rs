use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::player::TablePlayer;

/// Номер места за столом, считается с 1.
pub type SeatNumber = u8;

/// Максимальное количество мест за столом.
pub const MAX_SEATS: SeatNumber = 9;

/// Больше страддлов за 9-max столом не поместится.
pub const MAX_STRADDLES: u8 = MAX_SEATS - 2;

/// Одно место за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    pub number: SeatNumber,
    pub player: Option<TablePlayer>,
}

impl Seat {
    pub fn empty(number: SeatNumber) -> Self {
        Self {
            number,
            player: None,
        }
    }

    pub fn occupied(number: SeatNumber, player: TablePlayer) -> Self {
        Self {
            number,
            player: Some(player),
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.player.is_some()
    }
}

/// Пустой стол: места 1..=MAX_SEATS.
pub fn empty_table() -> Vec<Seat> {
    (1..=MAX_SEATS).map(Seat::empty).collect()
}

/// Номера занятых мест (отсортированы по возрастанию).
pub fn occupied_seats(seats: &[Seat]) -> BTreeSet<SeatNumber> {
    seats
        .iter()
        .filter(|s| s.is_occupied())
        .map(|s| s.number)
        .collect()
}

pub fn seat_player(seats: &[Seat], number: SeatNumber) -> Option<&TablePlayer> {
    seats
        .iter()
        .find(|s| s.number == number)
        .and_then(|s| s.player.as_ref())
}

pub fn seat_player_mut(seats: &mut [Seat], number: SeatNumber) -> Option<&mut TablePlayer> {
    seats
        .iter_mut()
        .find(|s| s.number == number)
        .and_then(|s| s.player.as_mut())
}

/// Настройки одной раздачи: кнопка, блайнды, страддлы.
///
/// Приходят от внешнего setup-экрана и не меняются по ходу раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandConfig {
    /// Место дилерской кнопки.
    pub button: SeatNumber,
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Сколько страддлов ставится после BB (каждый вдвое больше предыдущего).
    #[serde(default)]
    pub straddle_count: u8,
    /// Mississippi straddle: первым ходит место сразу слева от кнопки.
    #[serde(default)]
    pub mississippi_straddle: bool,
}

impl Default for HandConfig {
    fn default() -> Self {
        Self {
            button: 1,
            small_blind: Chips(1),
            big_blind: Chips(2),
            straddle_count: 0,
            mississippi_straddle: false,
        }
    }
}

/// Ошибки конфигурации раздачи.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("big blind должен быть больше нуля")]
    ZeroBigBlind,

    #[error("small blind ({small}) больше big blind ({big})")]
    SmallBlindAboveBigBlind { small: Chips, big: Chips },

    #[error("кнопка на месте {0}, а места нумеруются 1..={max}", max = MAX_SEATS)]
    ButtonOutOfRange(SeatNumber),

    #[error("слишком много страддлов: {0} (максимум {max})", max = MAX_STRADDLES)]
    TooManyStraddles(u8),
}

impl HandConfig {
    pub fn new(button: SeatNumber, small_blind: Chips, big_blind: Chips) -> Self {
        Self {
            button,
            small_blind,
            big_blind,
            ..Self::default()
        }
    }

    pub fn with_straddles(mut self, count: u8) -> Self {
        self.straddle_count = count;
        self
    }

    pub fn with_mississippi_straddle(mut self) -> Self {
        self.mississippi_straddle = true;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.big_blind.is_zero() {
            return Err(ConfigError::ZeroBigBlind);
        }
        if self.small_blind > self.big_blind {
            return Err(ConfigError::SmallBlindAboveBigBlind {
                small: self.small_blind,
                big: self.big_blind,
            });
        }
        if self.button == 0 || self.button > MAX_SEATS {
            return Err(ConfigError::ButtonOutOfRange(self.button));
        }
        if self.straddle_count > MAX_STRADDLES {
            return Err(ConfigError::TooManyStraddles(self.straddle_count));
        }
        Ok(())
    }
}
