//! Реплей завершённой раздачи.
//!
//! По сохранённой `HandRecord` восстанавливаем стартовые стеки и заново
//! проигрываем лог действий, получая по одному состоянию на действие.
//! Дальше навигация вперёд/назад/по улицам – просто индекс в массиве.

pub mod describe;
pub mod navigator;
pub mod reconstruct;

pub use describe::{describe_action, seat_label, BLINDS_POSTED, HERO_LABEL};
pub use navigator::ReplayEngine;
pub use reconstruct::{build_states, reconstruct_initial_stacks, visible_board, ReplayState};
