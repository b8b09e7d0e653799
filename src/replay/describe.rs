use crate::domain::SeatNumber;
use crate::engine::hand_history::{HandAction, HandActionKind, HandRecord};

/// Метка для места самого пользователя.
pub const HERO_LABEL: &str = "Hero";

pub const BLINDS_POSTED: &str = "Blinds posted";

/// Имя места: "Hero" для пользователя, имя игрока или "Seat N".
pub fn seat_label(record: &HandRecord, seat: SeatNumber, hero: Option<SeatNumber>) -> String {
    if hero == Some(seat) {
        return HERO_LABEL.to_string();
    }
    record
        .player_name(seat)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Seat {seat}"))
}

/// Текст одного действия: `"Alice calls 10"`, `"Bob posts 2"`.
pub fn describe_action(
    record: &HandRecord,
    action: &HandAction,
    hero: Option<SeatNumber>,
) -> String {
    let who = seat_label(record, action.seat, hero);
    let chips = action.chips();
    match action.kind {
        HandActionKind::PostBlind => format!("{who} posts {chips}"),
        HandActionKind::Fold => format!("{who} folds"),
        HandActionKind::Check => format!("{who} checks"),
        HandActionKind::Call => format!("{who} calls {chips}"),
        HandActionKind::Bet => format!("{who} bets {chips}"),
        HandActionKind::AllIn => format!("{who} goes all-in for {chips}"),
        HandActionKind::Win => format!("{who} wins {chips}"),
    }
}

pub(crate) fn describe_position(
    record: &HandRecord,
    action: Option<&HandAction>,
    at_blinds: bool,
    hero: Option<SeatNumber>,
) -> String {
    match action {
        Some(_) if at_blinds => BLINDS_POSTED.to_string(),
        Some(action) => describe_action(record, action, hero),
        None => String::new(),
    }
}
