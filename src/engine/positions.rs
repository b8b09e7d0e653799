use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{SeatNumber, MAX_SEATS};

/// Следующее по часовой стрелке занятое и не сфолдившее место.
///
/// Обход начинается с `current + 1` и делает не больше одного круга:
/// если вернулись к `current`, так никого и не найдя, – `None`.
pub fn next_active_seat(
    current: SeatNumber,
    occupied: &BTreeSet<SeatNumber>,
    skipped: &BTreeSet<SeatNumber>,
) -> Option<SeatNumber> {
    let mut seat = current;
    for _ in 0..MAX_SEATS {
        seat = if seat >= MAX_SEATS { 1 } else { seat + 1 };
        if seat == current {
            return None;
        }
        if occupied.contains(&seat) && !skipped.contains(&seat) {
            return Some(seat);
        }
    }
    None
}

/// Места блайндов для раздачи: (SB, BB).
///
/// SB – первое занятое место после кнопки, BB – следующее. В хедз-апе
/// BB, таким образом, ставит сама кнопка.
pub fn blind_seats(
    button: SeatNumber,
    occupied: &BTreeSet<SeatNumber>,
) -> Option<(SeatNumber, SeatNumber)> {
    if occupied.len() < 2 {
        return None;
    }
    let nobody = BTreeSet::new();

    let sb = next_active_seat(button, occupied, &nobody)?;
    let bb = next_active_seat(sb, occupied, &nobody)?;
    Some((sb, bb))
}

/// Грубая классификация позиции за столом.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Position {
    Blind,
    Early,
    Middle,
    Late,
}

/// Позиция места относительно кнопки.
///
/// - SB и BB – `Blind`;
/// - кнопка и катофф – `Late`;
/// - из оставшихся мест после BB первая треть (с округлением вверх) – `Early`,
///   остальные – `Middle`.
///
/// Пустое место – `None`.
pub fn classify_position(
    seat: SeatNumber,
    button: SeatNumber,
    occupied: &BTreeSet<SeatNumber>,
) -> Option<Position> {
    if !occupied.contains(&seat) {
        return None;
    }
    let (sb, bb) = blind_seats(button, occupied)?;
    if seat == sb || seat == bb {
        return Some(Position::Blind);
    }

    // Порядок мест после BB по часовой: UTG, ..., CO, BTN.
    let nobody = BTreeSet::new();
    let mut order = Vec::new();
    let mut cursor = bb;
    while let Some(next) = next_active_seat(cursor, occupied, &nobody) {
        if next == sb {
            break;
        }
        order.push(next);
        cursor = next;
    }

    let idx = order.iter().position(|&s| s == seat)?;
    let from_end = order.len() - idx;
    if from_end <= 2 {
        return Some(Position::Late);
    }

    let rest = order.len() - 2;
    let early = rest.div_ceil(3);
    if idx < early {
        Some(Position::Early)
    } else {
        Some(Position::Middle)
    }
}
