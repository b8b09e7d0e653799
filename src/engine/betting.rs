use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::SeatNumber;

/// Состояние раунда ставок (на конкретной улице).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Текущая целевая ставка, до которой должны дотянуться игроки (BB, bet, raise).
    pub current_bet: Chips,
    /// Минимальный размер повышающей части рейза.
    pub min_raise: Chips,
    /// Seat последнего агрессора (bet/raise/all-in сверху).
    pub last_aggressor: Option<SeatNumber>,
    /// Кто уже походил с момента последнего изменения размера ставки.
    pub acted: BTreeSet<SeatNumber>,
}

impl BettingState {
    pub fn new(current_bet: Chips, min_raise: Chips) -> Self {
        Self {
            current_bet,
            min_raise,
            last_aggressor: None,
            acted: BTreeSet::new(),
        }
    }

    pub fn mark_acted(&mut self, seat: SeatNumber) {
        self.acted.insert(seat);
    }

    pub fn has_acted(&self, seat: SeatNumber) -> bool {
        self.acted.contains(&seat)
    }

    /// Рейз: новая целевая ставка, новый min_raise и заново открытая торговля –
    /// в acted остаётся только сам рейзер.
    pub fn on_raise(&mut self, seat: SeatNumber, new_bet: Chips, raise_size: Chips) {
        self.current_bet = new_bet;
        self.min_raise = raise_size;
        self.last_aggressor = Some(seat);
        self.acted.clear();
        self.acted.insert(seat);
    }

    /// Сброс перед новой улицей.
    pub fn reset_for_street(&mut self, big_blind: Chips) {
        self.current_bet = Chips::ZERO;
        self.min_raise = big_blind;
        self.last_aggressor = None;
        self.acted.clear();
    }
}
