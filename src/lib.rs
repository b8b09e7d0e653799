//! Трекер покерных раздач.
//!
//! - `engine` – машина состояний одной раздачи: блайнды, очередь хода,
//!   ставки, сайд-поты, улицы, выплата банка;
//! - `replay` – пошаговый просмотр сохранённой раздачи по её логу;
//! - `domain` – фишки, карты, игроки, места, конфиг раздачи;
//! - `infra` – часы, загрузка конфига, сериализация и хранилище раздач.

pub mod domain;
pub mod engine;
pub mod infra;
pub mod replay;
