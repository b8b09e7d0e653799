use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Игрок, сидящий за столом в конкретной раздаче.
///
/// Стек может быть неизвестен (`None`): пользователь ведёт живую игру и не
/// всегда вводит стеки. Неизвестный стек движок не трогает и не считает нулевым.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TablePlayer {
    pub id: PlayerId,
    pub name: String,
    pub stack: Option<Chips>,
    /// Временный игрок (добавлен прямо за столом, не сохранён в профилях).
    #[serde(default)]
    pub is_temporary: bool,
}

impl TablePlayer {
    pub fn new(id: PlayerId, name: impl Into<String>, stack: Chips) -> Self {
        Self {
            id,
            name: name.into(),
            stack: Some(stack),
            is_temporary: false,
        }
    }

    /// Игрок без известного стека.
    pub fn without_stack(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            stack: None,
            is_temporary: false,
        }
    }

    pub fn temporary(mut self) -> Self {
        self.is_temporary = true;
        self
    }

    /// Стек известен и равен нулю – игрок уже "всё сделал" в раунде ставок.
    pub fn is_out_of_chips(&self) -> bool {
        self.stack.map(|s| s.is_zero()).unwrap_or(false)
    }

    /// Списать не более `amount` со стека. Возвращает реально списанное.
    pub fn deduct(&mut self, amount: Chips) -> Chips {
        match self.stack.as_mut() {
            Some(stack) => {
                let paid = amount.min(*stack);
                *stack -= paid;
                paid
            }
            None => Chips::ZERO,
        }
    }

    /// Обнулить известный стек (all-in).
    pub fn empty_stack(&mut self) {
        if let Some(stack) = self.stack.as_mut() {
            *stack = Chips::ZERO;
        }
    }

    pub fn credit(&mut self, amount: Chips) {
        if let Some(stack) = self.stack.as_mut() {
            *stack += amount;
        }
    }
}
