use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::game_loop::HandState;

/// Стек, который подставляем игроку с неизвестным стеком.
const UNKNOWN_STACK: Chips = Chips(10_000);

/// Случайный "игрок" для стресс-тестов и dev-утилит.
///
/// Выбирает только действия, которые движок примет, и никогда не ставит
/// больше стека: all-in всегда ровно на остаток.
#[derive(Clone, Debug)]
pub struct RandomActionPicker {
    inner: StdRng,
}

impl RandomActionPicker {
    /// Одинаковый seed – одинаковые раздачи.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Перемешать колоду на месте.
    pub fn shuffle(&mut self, deck: &mut Deck) {
        deck.cards.shuffle(&mut self.inner);
    }

    /// Случайное число из `range` (для рассадки и стеков в стресс-тестах).
    pub fn gen_range(&mut self, range: std::ops::RangeInclusive<u64>) -> u64 {
        self.inner.gen_range(range)
    }

    /// Выбрать действие для текущего актёра. `None`, если ходить некому.
    pub fn pick(&mut self, state: &HandState) -> Option<PlayerAction> {
        let seat = state.current_actor?;
        let bet = state.bet_of(seat);
        let current = state.betting.current_bet;
        let stack = state.stack_of(seat).unwrap_or(UNKNOWN_STACK);
        let owed = current - bet;
        let all_in = PlayerActionKind::AllIn(bet + stack);

        let roll: u32 = self.inner.gen_range(0..100);
        let kind = if owed.is_zero() {
            match roll {
                0..=59 => PlayerActionKind::Check,
                60..=89 => self.pick_raise(bet, current, state.betting.min_raise, stack),
                _ => all_in,
            }
        } else {
            match roll {
                0..=19 => PlayerActionKind::Fold,
                20..=69 if owed < stack => PlayerActionKind::Call,
                20..=69 => all_in,
                70..=89 => self.pick_raise(bet, current, state.betting.min_raise, stack),
                _ => all_in,
            }
        };

        if stack.is_zero() && matches!(kind, PlayerActionKind::AllIn(_)) {
            // Фишек нет вовсе – остаётся только пас.
            let fallback = if owed.is_zero() {
                PlayerActionKind::Check
            } else {
                PlayerActionKind::Fold
            };
            return Some(PlayerAction {
                seat,
                kind: fallback,
            });
        }

        Some(PlayerAction { seat, kind })
    }

    fn pick_raise(
        &mut self,
        bet: Chips,
        current: Chips,
        min_raise: Chips,
        stack: Chips,
    ) -> PlayerActionKind {
        let max_total = bet + stack;
        let min_total = current + min_raise;
        if min_total >= max_total {
            return PlayerActionKind::AllIn(max_total);
        }
        let total = self.inner.gen_range(min_total.0..=max_total.0);
        if total == max_total.0 {
            PlayerActionKind::AllIn(max_total)
        } else {
            PlayerActionKind::Bet(Chips(total))
        }
    }
}
