use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// Источник времени для отметок в логе действий.
pub trait Clock {
    /// Миллисекунды unix epoch.
    fn now_ms(&self) -> u64;
}

/// Системные часы.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Ручные часы для тестов: каждое чтение сдвигает время на `step_ms`.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Cell<u64>,
    step_ms: u64,
}

impl ManualClock {
    pub fn new(start_ms: u64, step_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
            step_ms,
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + self.step_ms);
        now
    }
}
