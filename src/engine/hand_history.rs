use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::{seat_player, HandConfig, Seat, SeatNumber};
use crate::engine::game_loop::HandState;

/// Тип записи в логе раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum HandActionKind {
    PostBlind,
    Fold,
    Check,
    Call,
    Bet,
    AllIn,
    Win,
}

impl HandActionKind {
    /// Фишки уходят со стека в банк.
    pub fn moves_chips_in(self) -> bool {
        matches!(
            self,
            HandActionKind::PostBlind
                | HandActionKind::Call
                | HandActionKind::Bet
                | HandActionKind::AllIn
        )
    }
}

/// Одно действие в логе. После добавления не меняется.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandAction {
    /// Порядковый номер в логе (монотонно растёт с 0).
    pub seq: u32,
    pub seat: SeatNumber,
    pub kind: HandActionKind,
    /// Сколько фишек сдвинуло это действие; None для fold/check.
    pub amount: Option<Chips>,
    pub street: Street,
    /// Время действия, миллисекунды unix epoch.
    pub timestamp_ms: u64,
}

impl HandAction {
    pub fn chips(&self) -> Chips {
        self.amount.unwrap_or(Chips::ZERO)
    }
}

/// Лог действий одной раздачи, только на добавление.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ActionLog {
    actions: Vec<HandAction>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        seat: SeatNumber,
        kind: HandActionKind,
        amount: Option<Chips>,
        street: Street,
        timestamp_ms: u64,
    ) {
        let seq = self.actions.len() as u32;
        self.actions.push(HandAction {
            seq,
            seat,
            kind,
            amount,
            street,
            timestamp_ms,
        });
    }

    pub fn actions(&self) -> &[HandAction] {
        &self.actions
    }

    pub fn last(&self) -> Option<&HandAction> {
        self.actions.last()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Сколько всего фишек внесло место (блайнды, коллы, ставки).
    pub fn contributed_by(&self, seat: SeatNumber) -> Chips {
        self.actions
            .iter()
            .filter(|a| a.seat == seat && a.kind.moves_chips_in())
            .map(HandAction::chips)
            .sum()
    }
}

/// Чьи карманные карты попадут в сохранённую раздачу.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HoleCardVisibility {
    /// Никаких карт.
    Hidden,
    /// Только тех, кто дошёл до конца (не сфолдил).
    Showdown,
    /// Все розданные карты, включая сфолдивших.
    All,
}

/// Завершённая раздача в том виде, в каком её сохраняют и потом реплеят.
///
/// Создаётся один раз в конце раздачи и больше не меняется.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandRecord {
    pub config: HandConfig,
    /// Места и стеки на момент окончания раздачи.
    pub seats: Vec<Seat>,
    pub board: Vec<Card>,
    pub pot: Chips,
    pub actions: Vec<HandAction>,
    #[serde(default)]
    pub visible_hole_cards: BTreeMap<SeatNumber, Vec<Card>>,
    #[serde(default)]
    pub winners: Vec<SeatNumber>,
}

impl HandRecord {
    pub fn from_state(state: &HandState, visibility: HoleCardVisibility) -> Self {
        let visible_hole_cards = match visibility {
            HoleCardVisibility::Hidden => BTreeMap::new(),
            HoleCardVisibility::Showdown => state.hole_cards.clone(),
            HoleCardVisibility::All => state.original_hole_cards.clone(),
        };

        Self {
            config: state.config.clone(),
            seats: state.seats.clone(),
            board: state.board.clone(),
            pot: state.pot,
            actions: state.log.actions().to_vec(),
            visible_hole_cards,
            winners: state.winners.clone(),
        }
    }

    pub fn player_name(&self, seat: SeatNumber) -> Option<&str> {
        seat_player(&self.seats, seat)
            .map(|p| p.name.as_str())
            .filter(|name| !name.trim().is_empty())
    }
}
