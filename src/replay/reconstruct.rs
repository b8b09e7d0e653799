use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::SeatNumber;
use crate::engine::hand_history::{HandAction, HandActionKind, HandRecord};

/// Состояние стола в конкретной точке реплея.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReplayState {
    pub street: Street,
    /// Открытые на этой улице карты борда.
    pub board: Vec<Card>,
    /// Фишки, снятые с линии ставок на прошедших улицах.
    pub pot: Chips,
    /// Ставки текущей улицы.
    pub bets: BTreeMap<SeatNumber, Chips>,
    /// Известные стеки (места с неизвестным стеком сюда не попадают).
    pub stacks: BTreeMap<SeatNumber, Chips>,
    pub folded: BTreeSet<SeatNumber>,
    /// Место, чьё действие привело к этому состоянию.
    pub actor: Option<SeatNumber>,
    pub last_action: Option<HandAction>,
    pub is_complete: bool,
}

impl ReplayState {
    fn initial(stacks: BTreeMap<SeatNumber, Chips>) -> Self {
        Self {
            street: Street::Preflop,
            board: Vec::new(),
            pot: Chips::ZERO,
            bets: BTreeMap::new(),
            stacks,
            folded: BTreeSet::new(),
            actor: None,
            last_action: None,
            is_complete: false,
        }
    }

    pub fn bet_of(&self, seat: SeatNumber) -> Chips {
        self.bets.get(&seat).copied().unwrap_or(Chips::ZERO)
    }

    /// Банк вместе с несобранными ставками улицы.
    pub fn total_pot(&self) -> Chips {
        self.pot + self.bets.values().copied().sum::<Chips>()
    }

    fn sweep_bets(&mut self) {
        let swept: Chips = self.bets.values().copied().sum();
        self.pot += swept;
        self.bets.clear();
    }
}

/// Карты борда, видимые на улице: префлоп – 0, флоп – 3, тёрн – 4, ривер – 5
/// (но не больше, чем реально выложено).
pub fn visible_board(board: &[Card], street: Street) -> Vec<Card> {
    board.iter().take(street.board_len()).copied().collect()
}

/// Стеки на начало раздачи.
///
/// Сохраняются только финальные стеки, поэтому считаем назад: к финальному
/// стеку прибавляем всё, что место внесло (блайнды, коллы, ставки), и вычитаем
/// выигрыши (`Win`), которые движок уже зачислил в стек.
pub fn reconstruct_initial_stacks(record: &HandRecord) -> BTreeMap<SeatNumber, Chips> {
    let mut stacks: BTreeMap<SeatNumber, Chips> = record
        .seats
        .iter()
        .filter_map(|seat| {
            seat.player
                .as_ref()
                .and_then(|p| p.stack)
                .map(|stack| (seat.number, stack))
        })
        .collect();

    for action in &record.actions {
        let Some(stack) = stacks.get_mut(&action.seat) else {
            continue;
        };
        if action.kind.moves_chips_in() {
            *stack += action.chips();
        } else if action.kind == HandActionKind::Win {
            *stack -= action.chips();
        }
    }

    stacks
}

/// Применить одно записанное действие к состоянию реплея.
fn apply_recorded(prev: &ReplayState, action: &HandAction, board: &[Card]) -> ReplayState {
    let mut next = prev.clone();

    if action.street != next.street {
        next.sweep_bets();
        next.street = action.street;
        next.board = visible_board(board, action.street);
    }

    let chips = action.chips();
    match action.kind {
        HandActionKind::PostBlind
        | HandActionKind::Call
        | HandActionKind::Bet
        | HandActionKind::AllIn => {
            *next.bets.entry(action.seat).or_insert(Chips::ZERO) += chips;
            if let Some(stack) = next.stacks.get_mut(&action.seat) {
                *stack -= chips;
            }
        }
        HandActionKind::Fold => {
            next.folded.insert(action.seat);
        }
        HandActionKind::Check => {}
        HandActionKind::Win => {
            next.sweep_bets();
            if let Some(stack) = next.stacks.get_mut(&action.seat) {
                *stack += chips;
            }
        }
    }

    next.actor = Some(action.seat);
    next.last_action = Some(action.clone());
    next
}

/// Все промежуточные состояния раздачи.
///
/// `states[0]` – до первого действия, `states[k + 1]` – после действия `k`.
/// Последнее состояние помечено завершённым, несобранные ставки в нём сняты в банк.
#[instrument(level = "trace", skip(record), fields(actions = record.actions.len()))]
pub fn build_states(record: &HandRecord) -> Vec<ReplayState> {
    let mut states = Vec::with_capacity(record.actions.len() + 1);
    states.push(ReplayState::initial(reconstruct_initial_stacks(record)));

    for action in &record.actions {
        let Some(prev) = states.last() else {
            break;
        };
        let next = apply_recorded(prev, action, &record.board);
        states.push(next);
    }

    if let Some(last) = states.last_mut() {
        last.sweep_bets();
        last.is_complete = true;
    }

    states
}
