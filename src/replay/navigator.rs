use tracing::debug;

use crate::domain::hand::Street;
use crate::domain::SeatNumber;
use crate::engine::hand_history::{HandAction, HandActionKind, HandRecord};
use crate::replay::describe::describe_position;
use crate::replay::reconstruct::{build_states, ReplayState};

/// Пошаговый просмотр сохранённой раздачи.
///
/// Все состояния считаются один раз при создании; навигация – это просто
/// индекс в готовом массиве. Сама запись `HandRecord` не меняется.
#[derive(Clone, Debug)]
pub struct ReplayEngine {
    record: HandRecord,
    states: Vec<ReplayState>,
    /// Индекс текущего состояния в `states`.
    position: usize,
    /// Состояние "блайнды поставлены" – точка покоя реплея.
    blinds_position: usize,
    hero_seat: Option<SeatNumber>,
}

impl ReplayEngine {
    pub fn from_record(record: HandRecord) -> Self {
        let states = build_states(&record);
        let blind_actions = record
            .actions
            .iter()
            .take_while(|a| a.kind == HandActionKind::PostBlind)
            .count();

        debug!(
            actions = record.actions.len(),
            blind_actions, "реплей построен"
        );

        Self {
            record,
            states,
            position: blind_actions,
            blinds_position: blind_actions,
            hero_seat: None,
        }
    }

    /// Место самого пользователя: в текстах оно подписывается фиксированной меткой.
    pub fn with_hero(mut self, seat: SeatNumber) -> Self {
        self.hero_seat = Some(seat);
        self
    }

    pub fn record(&self) -> &HandRecord {
        &self.record
    }

    pub fn states(&self) -> &[ReplayState] {
        &self.states
    }

    pub fn current(&self) -> &ReplayState {
        &self.states[self.position]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Индекс действия в логе, которое привело к текущему состоянию.
    pub fn current_action_index(&self) -> Option<usize> {
        self.position.checked_sub(1)
    }

    pub fn current_action(&self) -> Option<&HandAction> {
        self.current_action_index()
            .and_then(|idx| self.record.actions.get(idx))
    }

    pub fn can_step_forward(&self) -> bool {
        self.position + 1 < self.states.len()
    }

    pub fn can_step_backward(&self) -> bool {
        self.position > self.blinds_position
    }

    pub fn is_at_start(&self) -> bool {
        self.position == self.blinds_position
    }

    pub fn is_at_end(&self) -> bool {
        !self.can_step_forward()
    }

    pub fn step_forward(&mut self) -> bool {
        if !self.can_step_forward() {
            return false;
        }
        self.position += 1;
        true
    }

    pub fn step_backward(&mut self) -> bool {
        if !self.can_step_backward() {
            return false;
        }
        self.position -= 1;
        true
    }

    pub fn jump_to_start(&mut self) {
        self.position = self.blinds_position;
    }

    pub fn jump_to_end(&mut self) {
        self.position = self.states.len() - 1;
    }

    /// Перейти к первому действию улицы; префлоп – к "блайнды поставлены".
    pub fn jump_to_street(&mut self, street: Street) -> bool {
        if street == Street::Preflop {
            self.jump_to_start();
            return true;
        }
        let found = self
            .record
            .actions
            .iter()
            .position(|a| a.street == street);
        match found {
            Some(idx) => {
                self.position = (idx + 1).max(self.blinds_position);
                true
            }
            None => false,
        }
    }

    /// (сделано шагов, всего шагов) без учёта блайндов.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.states.len() - 1 - self.blinds_position;
        let done = self.position - self.blinds_position;
        (done, total)
    }

    pub fn progress_fraction(&self) -> f64 {
        match self.progress() {
            (_, 0) => 1.0,
            (done, total) => done as f64 / total as f64,
        }
    }

    /// Например, `"3/10"`.
    pub fn progress_label(&self) -> String {
        let (done, total) = self.progress();
        format!("{done}/{total}")
    }

    /// Человекочитаемое описание текущей позиции.
    pub fn action_text(&self) -> String {
        describe_position(
            &self.record,
            self.current_action(),
            self.is_at_start(),
            self.hero_seat,
        )
    }
}
