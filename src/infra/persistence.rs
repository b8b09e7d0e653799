use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::{occupied_seats, HandId, SeatNumber};
use crate::engine::hand_history::HandRecord;
use crate::replay::ReplayEngine;

/// Ошибки чтения/записи сохранённой раздачи.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("ошибка (де)сериализации раздачи: {0}")]
    Json(#[from] serde_json::Error),

    #[error("лог не упорядочен: действие #{index} имеет seq {seq}, ожидалось больше {prev}")]
    OutOfOrder { index: usize, seq: u32, prev: u32 },

    #[error("действие #{index} относится к пустому месту {seat}")]
    UnknownSeat { index: usize, seat: SeatNumber },
}

/// Проверить согласованность записи: порядок лога и места действий.
pub fn validate_record(record: &HandRecord) -> Result<(), RecordError> {
    let occupied = occupied_seats(&record.seats);
    let mut prev: Option<u32> = None;

    for (index, action) in record.actions.iter().enumerate() {
        if let Some(prev) = prev {
            if action.seq <= prev {
                return Err(RecordError::OutOfOrder {
                    index,
                    seq: action.seq,
                    prev,
                });
            }
        }
        if !occupied.contains(&action.seat) {
            return Err(RecordError::UnknownSeat {
                index,
                seat: action.seat,
            });
        }
        prev = Some(action.seq);
    }
    Ok(())
}

pub fn encode_record(record: &HandRecord) -> Result<String, RecordError> {
    Ok(serde_json::to_string_pretty(record)?)
}

pub fn decode_record(json: &str) -> Result<HandRecord, RecordError> {
    let record: HandRecord = serde_json::from_str(json)?;
    validate_record(&record)?;
    Ok(record)
}

/// Загрузить реплей прямо из JSON.
pub fn load_replay(json: &str) -> Result<ReplayEngine, RecordError> {
    decode_record(json).map(ReplayEngine::from_record)
}

/// Абстракция хранилища сыгранных раздач.
///
/// Реальное хранилище (сервер, файлы) живёт снаружи; здесь – контракт
/// и in-memory реализация для тестов и dev-утилит.
pub trait HandStore {
    fn save_hand(&mut self, id: HandId, record: &HandRecord);

    fn load_hand(&self, id: HandId) -> Option<HandRecord>;

    fn hand_ids(&self) -> Vec<HandId>;
}

/// Простая in-memory реализация.
///
/// Хранит записи в JSON, чтобы тесты проходили тот же путь, что и настоящее хранилище.
#[derive(Debug, Default)]
pub struct InMemoryHandStore {
    hands: BTreeMap<HandId, String>,
}

impl InMemoryHandStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HandStore for InMemoryHandStore {
    fn save_hand(&mut self, id: HandId, record: &HandRecord) {
        match encode_record(record) {
            Ok(json) => {
                self.hands.insert(id, json);
            }
            Err(err) => tracing::warn!(id, %err, "не удалось сохранить раздачу"),
        }
    }

    fn load_hand(&self, id: HandId) -> Option<HandRecord> {
        let json = self.hands.get(&id)?;
        match decode_record(json) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(id, %err, "сохранённая раздача повреждена");
                None
            }
        }
    }

    fn hand_ids(&self) -> Vec<HandId> {
        self.hands.keys().copied().collect()
    }
}
