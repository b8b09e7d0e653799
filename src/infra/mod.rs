//! Инфраструктурный слой вокруг движка:
//! - часы для отметок времени в логе;
//! - загрузка конфигурации раздачи;
//! - сериализация и хранилище сыгранных раздач;
//! - случайный выбор действий для стресс-тестов.

pub mod clock;
pub mod config;
pub mod persistence;
pub mod rng;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{load_hand_config, parse_hand_config, ConfigLoadError};
pub use persistence::{
    decode_record, encode_record, load_replay, validate_record, HandStore, InMemoryHandStore,
    RecordError,
};
pub use rng::RandomActionPicker;
