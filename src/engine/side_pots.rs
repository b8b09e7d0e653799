use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::{chips::Chips, SeatNumber};

/// Сайд-пот: часть банка, в которую участвуют только некоторые игроки.
///
/// `eligible_seats` всегда отсортирован по возрастанию – это и есть ключ,
/// по которому поты разных улиц сливаются друг с другом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    pub eligible_seats: Vec<SeatNumber>,
}

impl SidePot {
    pub fn is_eligible(&self, seat: SeatNumber) -> bool {
        self.eligible_seats.binary_search(&seat).is_ok()
    }
}

/// Сумма всех потов.
pub fn total_in_pots(pots: &[SidePot]) -> Chips {
    pots.iter().map(|p| p.amount).sum()
}

/// Разложить ставки текущей улицы по уровням и добавить их к уже существующим потам.
///
/// Для каждого различного положительного уровня ставки (по возрастанию):
/// - вклад места в уровень = `max(0, min(bet, level) - last_level)`;
/// - претенденты уровня = не сфолдившие места, чья ставка >= level;
/// - если пот с ровно таким набором претендентов уже есть – доливаем в него,
///   иначе заводим новый.
pub fn build_side_pots(
    bets: &BTreeMap<SeatNumber, Chips>,
    occupied: &BTreeSet<SeatNumber>,
    folded: &BTreeSet<SeatNumber>,
    existing: &[SidePot],
) -> Vec<SidePot> {
    let mut pots = existing.to_vec();

    let seat_bets: Vec<(SeatNumber, Chips)> = bets
        .iter()
        .filter(|(seat, _)| occupied.contains(seat))
        .map(|(seat, bet)| (*seat, *bet))
        .collect();

    let levels: BTreeSet<Chips> = seat_bets
        .iter()
        .map(|(_, bet)| *bet)
        .filter(|bet| !bet.is_zero())
        .collect();

    let mut last_level = Chips::ZERO;
    for level in levels {
        let tier_total: Chips = seat_bets
            .iter()
            .map(|(_, bet)| (*bet).min(level) - last_level)
            .sum();

        let mut eligible: Vec<SeatNumber> = seat_bets
            .iter()
            .filter(|(seat, bet)| !folded.contains(seat) && *bet >= level)
            .map(|(seat, _)| *seat)
            .collect();

        if eligible.is_empty() {
            // Верхний уровень поставил сфолдивший игрок: уровень достаётся
            // оставшимся в раздаче с наибольшей ставкой.
            let top = seat_bets
                .iter()
                .filter(|(seat, _)| !folded.contains(seat))
                .map(|(_, bet)| *bet)
                .max();
            if let Some(top) = top {
                eligible = seat_bets
                    .iter()
                    .filter(|(seat, bet)| !folded.contains(seat) && *bet == top)
                    .map(|(seat, _)| *seat)
                    .collect();
            }
        }

        trace!(level = level.0, tier = tier_total.0, ?eligible, "уровень сайд-пота");

        match pots.iter_mut().find(|p| p.eligible_seats == eligible) {
            Some(pot) => pot.amount += tier_total,
            None => pots.push(SidePot {
                amount: tier_total,
                eligible_seats: eligible,
            }),
        }

        last_level = level;
    }

    pots
}
