use serde::{Deserialize, Serialize};

use crate::domain::{Chips, SeatNumber};

/// Решение игрока, которое движок может применить.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    Fold,
    Check,
    Call,
    /// Bet / raise до указанной суммы ставки на улице.
    Bet(Chips),
    /// All-in: итоговая ставка на улице с учётом уже поставленного.
    AllIn(Chips),
}

/// Конкретное действие игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// Место действующего игрока.
    pub seat: SeatNumber,
    pub kind: PlayerActionKind,
}
