//! Покерный движок одной раздачи: блайнды, очередь хода, ставки, сайд-поты,
//! переход улиц, выплата банка.
//!
//! Все переходы – чистые функции `&HandState -> HandState`:
//!   - `start_hand` – поставить блайнды и выбрать первого ходящего;
//!   - `fold` / `check` / `call` / `bet` – действия текущего игрока;
//!   - `deal_board` – выложить карты после смены улицы;
//!   - `distribute_pot` – раздать сайд-поты победителям.
//!
//! Недопустимое действие не паникует и не возвращает ошибку – состояние
//! просто не меняется. Причину можно узнать через `try_*`-варианты.

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod side_pots;
pub mod validation;

pub use actions::{PlayerAction, PlayerActionKind};
pub use betting::BettingState;
pub use errors::EngineError;
pub use game_loop::{
    apply_action, bet, call, check, deal_board, distribute_pot, fold, new_hand, set_hole_cards,
    start_hand, try_bet, try_call, try_check, try_deal_board, try_distribute_pot, try_fold,
    try_set_hole_cards, try_start_hand, HandEngine, HandState,
};
pub use hand_history::{
    ActionLog, HandAction, HandActionKind, HandRecord, HoleCardVisibility,
};
pub use positions::{blind_seats, classify_position, next_active_seat, Position};
pub use side_pots::{build_side_pots, total_in_pots, SidePot};
