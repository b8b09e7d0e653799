use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::TablePlayer;
use crate::domain::table::{
    occupied_seats, seat_player, seat_player_mut, HandConfig, Seat, SeatNumber,
};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{ActionLog, HandActionKind, HandRecord, HoleCardVisibility};
use crate::engine::positions::{blind_seats, next_active_seat};
use crate::engine::side_pots::{build_side_pots, total_in_pots, SidePot};
use crate::engine::validation::{diff_to_call, validate_action, validate_start};
use crate::infra::clock::{Clock, SystemClock};

/// Полное состояние одной раздачи.
///
/// Значение неизменяемо с точки зрения движка: каждый переход берёт `&HandState`
/// и возвращает новое состояние. Отклонённый переход возвращает копию входа.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandState {
    pub seats: Vec<Seat>,
    pub config: HandConfig,
    /// Ставки текущей улицы по местам.
    pub bets: BTreeMap<SeatNumber, Chips>,
    /// Фишки, уже снятые с линии ставок на завершённых улицах.
    pub pot: Chips,
    pub side_pots: Vec<SidePot>,
    pub street: Street,
    /// Чей сейчас ход.
    pub current_actor: Option<SeatNumber>,
    pub betting: BettingState,
    pub folded: BTreeSet<SeatNumber>,
    /// Карманные карты игроков, ещё участвующих в раздаче.
    pub hole_cards: BTreeMap<SeatNumber, Vec<Card>>,
    /// Снимок карманных карт на старте раздачи (сохраняется и после фолдов).
    pub original_hole_cards: BTreeMap<SeatNumber, Vec<Card>>,
    pub board: Vec<Card>,
    pub hand_started: bool,
    pub hand_complete: bool,
    /// Улица сменилась – вызывающий код должен выложить новые карты борда.
    pub is_picking_board: bool,
    pub winners: Vec<SeatNumber>,
    pub log: ActionLog,
}

impl HandState {
    /// Раздача ещё не начата: места рассажены, блайнды не поставлены.
    pub fn new(seats: Vec<Seat>, config: HandConfig) -> Self {
        let betting = BettingState::new(Chips::ZERO, config.big_blind);
        Self {
            seats,
            config,
            bets: BTreeMap::new(),
            pot: Chips::ZERO,
            side_pots: Vec::new(),
            street: Street::Preflop,
            current_actor: None,
            betting,
            folded: BTreeSet::new(),
            hole_cards: BTreeMap::new(),
            original_hole_cards: BTreeMap::new(),
            board: Vec::new(),
            hand_started: false,
            hand_complete: false,
            is_picking_board: false,
            winners: Vec::new(),
            log: ActionLog::new(),
        }
    }

    pub fn occupied(&self) -> BTreeSet<SeatNumber> {
        occupied_seats(&self.seats)
    }

    pub fn player(&self, seat: SeatNumber) -> Option<&TablePlayer> {
        seat_player(&self.seats, seat)
    }

    fn player_mut(&mut self, seat: SeatNumber) -> Option<&mut TablePlayer> {
        seat_player_mut(&mut self.seats, seat)
    }

    pub fn stack_of(&self, seat: SeatNumber) -> Option<Chips> {
        self.player(seat).and_then(|p| p.stack)
    }

    /// Ставка места на текущей улице.
    pub fn bet_of(&self, seat: SeatNumber) -> Chips {
        self.bets.get(&seat).copied().unwrap_or(Chips::ZERO)
    }

    /// Занятые и не сфолдившие места.
    pub fn live_seats(&self) -> Vec<SeatNumber> {
        self.occupied()
            .into_iter()
            .filter(|s| !self.folded.contains(s))
            .collect()
    }

    pub fn total_bets(&self) -> Chips {
        self.bets.values().sum()
    }

    /// Сумма известных стеков.
    pub fn total_known_stacks(&self) -> Chips {
        self.seats
            .iter()
            .filter_map(|s| s.player.as_ref())
            .filter_map(|p| p.stack)
            .sum()
    }

    pub fn side_pot_total(&self) -> Chips {
        total_in_pots(&self.side_pots)
    }

    /// Места, которые пропускаются при передаче хода: сфолдившие и без фишек.
    fn skipped_seats(&self) -> BTreeSet<SeatNumber> {
        let mut skipped = self.folded.clone();
        for seat in &self.seats {
            if let Some(p) = seat.player.as_ref() {
                if p.is_out_of_chips() {
                    skipped.insert(seat.number);
                }
            }
        }
        skipped
    }

    fn post_blind(&mut self, seat: SeatNumber, amount: Chips, now_ms: u64) {
        // Блайнд ставится целиком, даже если стек меньше: стеки – только подсказка.
        if let Some(p) = self.player_mut(seat) {
            p.deduct(amount);
        }
        *self.bets.entry(seat).or_insert(Chips::ZERO) += amount;
        self.log
            .push(seat, HandActionKind::PostBlind, Some(amount), self.street, now_ms);
    }

    fn pass_turn(&mut self, from: SeatNumber) {
        self.current_actor = next_active_seat(from, &self.occupied(), &self.skipped_seats());
    }

    /// Раунд завершён, когда каждое живое место либо без фишек,
    /// либо уже походило и уравняло текущую ставку.
    pub fn is_round_complete(&self) -> bool {
        let live = self.live_seats();
        !live.is_empty()
            && live.iter().all(|&seat| {
                let out_of_chips = self
                    .player(seat)
                    .map(TablePlayer::is_out_of_chips)
                    .unwrap_or(false);
                out_of_chips
                    || (self.betting.has_acted(seat)
                        && self.bet_of(seat) == self.betting.current_bet)
            })
    }

    fn finish_round_if_complete(&mut self) {
        if !self.hand_complete && self.is_round_complete() {
            self.advance_street();
        }
    }

    /// Снять ставки улицы в банк, разложив их по сайд-потам.
    fn collect_bets(&mut self) {
        let occupied = self.occupied();
        self.side_pots = build_side_pots(&self.bets, &occupied, &self.folded, &self.side_pots);
        self.pot += self.total_bets();
        self.bets.clear();
    }

    fn advance_street(&mut self) {
        self.collect_bets();
        self.betting.reset_for_street(self.config.big_blind);

        match self.street.next() {
            Some(street) => {
                self.street = street;
                self.is_picking_board = true;
                self.current_actor =
                    next_active_seat(self.config.button, &self.occupied(), &self.skipped_seats());
                debug!(%street, pot = self.pot.0, actor = ?self.current_actor, "новая улица");
            }
            None => {
                self.hand_complete = true;
                self.current_actor = None;
                debug!(pot = self.pot.0, "ривер сыгран, раздача завершена");
            }
        }
    }

    /// Все, кроме одного, сфолдили: он забирает весь банк без шоудауна.
    fn award_uncontested(&mut self, winner: SeatNumber, now_ms: u64) {
        self.collect_bets();
        let won = self.pot;
        if let Some(p) = self.player_mut(winner) {
            p.credit(won);
        }
        self.log
            .push(winner, HandActionKind::Win, Some(won), self.street, now_ms);
        self.winners = vec![winner];
        self.hand_complete = true;
        self.is_picking_board = false;
        self.current_actor = None;
        debug!(winner, pot = won.0, "все сфолдили, банк без шоудауна");
    }
}

fn or_unchanged(
    state: &HandState,
    op: &'static str,
    result: Result<HandState, EngineError>,
) -> HandState {
    match result {
        Ok(next) => next,
        Err(err) => {
            debug!(op, %err, "переход отклонён");
            state.clone()
        }
    }
}

/// Новая раздача: места рассажены, ничего не поставлено.
pub fn new_hand(seats: Vec<Seat>, config: HandConfig) -> HandState {
    HandState::new(seats, config)
}

/// Выдать карманные карты месту (до или во время раздачи).
pub fn try_set_hole_cards(
    state: &HandState,
    seat: SeatNumber,
    cards: Vec<Card>,
) -> Result<HandState, EngineError> {
    if state.player(seat).is_none() {
        return Err(EngineError::InvalidSeat(seat));
    }
    if state.folded.contains(&seat) {
        return Err(EngineError::SeatFolded(seat));
    }
    let mut next = state.clone();
    if next.hand_started {
        next.original_hole_cards.insert(seat, cards.clone());
    }
    next.hole_cards.insert(seat, cards);
    Ok(next)
}

pub fn set_hole_cards(state: &HandState, seat: SeatNumber, cards: Vec<Card>) -> HandState {
    or_unchanged(state, "set_hole_cards", try_set_hole_cards(state, seat, cards))
}

/// Старт раздачи:
/// - определяет SB/BB от кнопки и ставит блайнды (и страддлы);
/// - выбирает первого ходящего;
/// - запоминает карманные карты.
pub fn try_start_hand(state: &HandState, now_ms: u64) -> Result<HandState, EngineError> {
    validate_start(state)?;

    let occupied = state.occupied();
    let config = state.config.clone();
    let (sb, bb) = blind_seats(config.button, &occupied)
        .ok_or(EngineError::NotEnoughPlayers(occupied.len()))?;

    let mut next = state.clone();
    next.street = Street::Preflop;
    next.hand_started = true;

    next.post_blind(sb, config.small_blind, now_ms);
    next.post_blind(bb, config.big_blind, now_ms);

    let heads_up = occupied.len() == 2;
    let mut last_poster = bb;
    if !heads_up {
        let nobody = BTreeSet::new();
        let straddles = config
            .straddle_count
            .min((occupied.len() - 2) as u8);
        let mut amount = config.big_blind;
        for _ in 0..straddles {
            let Some(seat) = next_active_seat(last_poster, &occupied, &nobody) else {
                break;
            };
            amount = amount + amount;
            next.post_blind(seat, amount, now_ms);
            last_poster = seat;
        }
    }

    let skipped = next.skipped_seats();
    let button = config.button;
    let first = if heads_up {
        if occupied.contains(&button) && !skipped.contains(&button) {
            Some(button)
        } else {
            next_active_seat(button, &occupied, &skipped)
        }
    } else if config.mississippi_straddle {
        next_active_seat(config.button, &occupied, &skipped)
    } else {
        next_active_seat(last_poster, &occupied, &skipped)
    };

    let posted = next.bets.values().copied().max().unwrap_or(Chips::ZERO);
    next.betting = BettingState::new(posted.max(config.big_blind), config.big_blind);
    next.current_actor = first;
    next.original_hole_cards = next.hole_cards.clone();

    debug!(sb, bb, first = ?first, current_bet = next.betting.current_bet.0, "раздача началась");

    // Если блайнды отправили всех в all-in, ходить некому.
    next.finish_round_if_complete();
    Ok(next)
}

pub fn start_hand(state: &HandState, now_ms: u64) -> HandState {
    or_unchanged(state, "start_hand", try_start_hand(state, now_ms))
}

pub fn try_fold(state: &HandState, now_ms: u64) -> Result<HandState, EngineError> {
    let seat = validate_action(state, &PlayerActionKind::Fold)?;

    let mut next = state.clone();
    next.hole_cards.remove(&seat);
    next.folded.insert(seat);
    next.log
        .push(seat, HandActionKind::Fold, None, next.street, now_ms);

    // Остался один – раздача кончается сразу, до проверки раунда.
    if let [winner] = next.live_seats().as_slice() {
        next.award_uncontested(*winner, now_ms);
        return Ok(next);
    }

    next.pass_turn(seat);
    next.finish_round_if_complete();
    Ok(next)
}

pub fn fold(state: &HandState, now_ms: u64) -> HandState {
    or_unchanged(state, "fold", try_fold(state, now_ms))
}

pub fn try_check(state: &HandState, now_ms: u64) -> Result<HandState, EngineError> {
    let seat = validate_action(state, &PlayerActionKind::Check)?;

    let mut next = state.clone();
    next.betting.mark_acted(seat);
    next.log
        .push(seat, HandActionKind::Check, None, next.street, now_ms);
    next.pass_turn(seat);
    next.finish_round_if_complete();
    Ok(next)
}

pub fn check(state: &HandState, now_ms: u64) -> HandState {
    or_unchanged(state, "check", try_check(state, now_ms))
}

pub fn try_call(state: &HandState, now_ms: u64) -> Result<HandState, EngineError> {
    let seat = validate_action(state, &PlayerActionKind::Call)?;
    let owed = diff_to_call(state, seat);
    let target = state.betting.current_bet;

    let mut next = state.clone();
    // Стек меньше нужного – списываем сколько есть, ставка всё равно = current_bet.
    if let Some(p) = next.player_mut(seat) {
        p.deduct(owed);
    }
    next.bets.insert(seat, target);
    next.betting.mark_acted(seat);
    next.log
        .push(seat, HandActionKind::Call, Some(owed), next.street, now_ms);
    next.pass_turn(seat);
    next.finish_round_if_complete();
    Ok(next)
}

pub fn call(state: &HandState, now_ms: u64) -> HandState {
    or_unchanged(state, "call", try_call(state, now_ms))
}

/// Bet / raise до суммы `amount` на улице (или all-in на эту сумму).
///
/// Если сумма больше текущей ставки – это рейз: торговля открывается заново
/// для всех, кроме рейзера.
pub fn try_bet(
    state: &HandState,
    amount: Chips,
    all_in: bool,
    now_ms: u64,
) -> Result<HandState, EngineError> {
    let kind = if all_in {
        PlayerActionKind::AllIn(amount)
    } else {
        PlayerActionKind::Bet(amount)
    };
    let seat = validate_action(state, &kind)?;

    let prior = state.bet_of(seat);
    let owed = amount - prior;
    let current = state.betting.current_bet;

    let mut next = state.clone();
    if amount > current {
        next.betting.on_raise(seat, amount, amount - current);
    } else {
        next.betting.mark_acted(seat);
    }
    next.bets.insert(seat, amount);

    let short = next.stack_of(seat).map(|s| owed > s).unwrap_or(false);
    let goes_all_in = all_in || short;
    if let Some(p) = next.player_mut(seat) {
        if goes_all_in {
            p.empty_stack();
        } else {
            p.deduct(owed);
        }
    }

    let logged = if goes_all_in {
        HandActionKind::AllIn
    } else {
        HandActionKind::Bet
    };
    next.log.push(seat, logged, Some(owed), next.street, now_ms);
    next.pass_turn(seat);
    next.finish_round_if_complete();
    Ok(next)
}

pub fn bet(state: &HandState, amount: Chips, all_in: bool, now_ms: u64) -> HandState {
    or_unchanged(state, "bet", try_bet(state, amount, all_in, now_ms))
}

/// Применить действие от имени конкретного места.
pub fn apply_action(
    state: &HandState,
    action: PlayerAction,
    now_ms: u64,
) -> Result<HandState, EngineError> {
    if state.current_actor != Some(action.seat) {
        return Err(EngineError::NotPlayersTurn(action.seat));
    }
    match action.kind {
        PlayerActionKind::Fold => try_fold(state, now_ms),
        PlayerActionKind::Check => try_check(state, now_ms),
        PlayerActionKind::Call => try_call(state, now_ms),
        PlayerActionKind::Bet(amount) => try_bet(state, amount, false, now_ms),
        PlayerActionKind::AllIn(amount) => try_bet(state, amount, true, now_ms),
    }
}

/// Выложить новые карты борда после смены улицы.
pub fn try_deal_board(state: &HandState, cards: &[Card]) -> Result<HandState, EngineError> {
    if !state.hand_started {
        return Err(EngineError::HandNotStarted);
    }
    let total = state.board.len() + cards.len();
    if total > Street::River.board_len() {
        return Err(EngineError::TooManyBoardCards(total));
    }

    let mut next = state.clone();
    next.board.extend_from_slice(cards);
    next.is_picking_board = false;

    // Все в all-in: ходить некому, улица закрывается сразу после карт.
    if next.current_actor.is_none() {
        next.finish_round_if_complete();
    }
    Ok(next)
}

pub fn deal_board(state: &HandState, cards: &[Card]) -> HandState {
    or_unchanged(state, "deal_board", try_deal_board(state, cards))
}

/// Раздать банк: `assignments[i]` – победители сайд-пота `i`.
///
/// Сфолдившие места отбрасываются, даже если они есть в `eligible_seats`.
/// Пот делится поровну целочисленно; остаток от деления не распределяется.
/// Каждое зачисление попадает в лог как `Win`.
pub fn try_distribute_pot(
    state: &HandState,
    assignments: &[Vec<SeatNumber>],
    now_ms: u64,
) -> Result<HandState, EngineError> {
    if !state.hand_started {
        return Err(EngineError::HandNotStarted);
    }
    if !state.hand_complete {
        return Err(EngineError::HandNotComplete);
    }
    if !state.winners.is_empty() {
        return Err(EngineError::PotAlreadyDistributed);
    }

    let mut next = state.clone();
    for (idx, winners) in assignments.iter().enumerate() {
        let Some(pot) = state.side_pots.get(idx) else {
            warn!(idx, "победители указаны для несуществующего пота");
            continue;
        };

        let mut paid: Vec<SeatNumber> = Vec::new();
        for &seat in winners {
            // Пот прошлой улицы помнит и тех, кто сфолдил позже.
            let contending = pot.is_eligible(seat) && !state.folded.contains(&seat);
            if contending && !paid.contains(&seat) {
                paid.push(seat);
            } else {
                warn!(idx, seat, "место не претендует на этот пот");
            }
        }
        if paid.is_empty() {
            continue;
        }

        let (share, remainder) = pot.amount.split(paid.len());
        if !remainder.is_zero() {
            debug!(idx, remainder = remainder.0, "остаток при делении пота не распределён");
        }

        for seat in paid {
            if let Some(p) = next.player_mut(seat) {
                p.credit(share);
            }
            next.log
                .push(seat, HandActionKind::Win, Some(share), next.street, now_ms);
            if !next.winners.contains(&seat) {
                next.winners.push(seat);
            }
        }
    }

    debug!(winners = ?next.winners, "банк распределён");
    Ok(next)
}

pub fn distribute_pot(
    state: &HandState,
    assignments: &[Vec<SeatNumber>],
    now_ms: u64,
) -> HandState {
    or_unchanged(
        state,
        "distribute_pot",
        try_distribute_pot(state, assignments, now_ms),
    )
}

/// Живая раздача с undo: держит текущее состояние и стек предыдущих снапшотов.
///
/// Каждый метод возвращает `true`, если переход что-то изменил.
#[derive(Debug)]
pub struct HandEngine<C: Clock = SystemClock> {
    state: HandState,
    undo_stack: Vec<HandState>,
    clock: C,
}

impl HandEngine<SystemClock> {
    pub fn new(seats: Vec<Seat>, config: HandConfig) -> Self {
        Self::with_clock(seats, config, SystemClock)
    }
}

impl<C: Clock> HandEngine<C> {
    pub fn with_clock(seats: Vec<Seat>, config: HandConfig, clock: C) -> Self {
        Self {
            state: new_hand(seats, config),
            undo_stack: Vec::new(),
            clock,
        }
    }

    pub fn state(&self) -> &HandState {
        &self.state
    }

    fn commit(&mut self, next: HandState) -> bool {
        if next == self.state {
            return false;
        }
        let prev = std::mem::replace(&mut self.state, next);
        self.undo_stack.push(prev);
        true
    }

    pub fn set_hole_cards(&mut self, seat: SeatNumber, cards: Vec<Card>) -> bool {
        let next = set_hole_cards(&self.state, seat, cards);
        self.commit(next)
    }

    pub fn start_hand(&mut self) -> bool {
        let next = start_hand(&self.state, self.clock.now_ms());
        self.commit(next)
    }

    pub fn fold(&mut self) -> bool {
        let next = fold(&self.state, self.clock.now_ms());
        self.commit(next)
    }

    pub fn check(&mut self) -> bool {
        let next = check(&self.state, self.clock.now_ms());
        self.commit(next)
    }

    pub fn call(&mut self) -> bool {
        let next = call(&self.state, self.clock.now_ms());
        self.commit(next)
    }

    pub fn bet(&mut self, amount: Chips, all_in: bool) -> bool {
        let next = bet(&self.state, amount, all_in, self.clock.now_ms());
        self.commit(next)
    }

    /// Как `apply_action`, но с сохранением снапшота для undo.
    pub fn apply(&mut self, action: PlayerAction) -> Result<(), EngineError> {
        let next = apply_action(&self.state, action, self.clock.now_ms())?;
        self.commit(next);
        Ok(())
    }

    pub fn deal_board(&mut self, cards: &[Card]) -> bool {
        let next = deal_board(&self.state, cards);
        self.commit(next)
    }

    pub fn distribute_pot(&mut self, assignments: &[Vec<SeatNumber>]) -> bool {
        let next = distribute_pot(&self.state, assignments, self.clock.now_ms());
        self.commit(next)
    }

    /// Вернуть предыдущий снапшот. Обратные переходы не вычисляются.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(prev) => {
                self.state = prev;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn to_record(&self, visibility: HoleCardVisibility) -> HandRecord {
        HandRecord::from_state(&self.state, visibility)
    }
}
