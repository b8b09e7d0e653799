use std::collections::BTreeMap;

use tracing_subscriber::EnvFilter;

use poker_hand_tracker::domain::chips::Chips;
use poker_hand_tracker::domain::deck::Deck;
use poker_hand_tracker::domain::player::TablePlayer;
use poker_hand_tracker::domain::table::{empty_table, HandConfig, Seat, SeatNumber, MAX_SEATS};
use poker_hand_tracker::engine::{HandEngine, HandState, HoleCardVisibility};
use poker_hand_tracker::infra::{load_replay, encode_record, ManualClock, RandomActionPicker};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("poker_stress_test: стартуем стресс-тест движка раздачи…");

    // Параметры нагрузки.
    const NUM_HANDS: u64 = 5_000;
    const SEED: u64 = 0x5eed;

    let mut picker = RandomActionPicker::from_seed(SEED);

    let mut total_hands: u64 = 0;
    let mut total_pot: u64 = 0;
    let mut max_pot: u64 = 0;
    let mut num_side_pots: u64 = 0;
    let mut num_showdowns: u64 = 0;
    let mut failures: u64 = 0;

    for hand_no in 0..NUM_HANDS {
        match play_single_hand_stress(&mut picker) {
            Ok(stats) => {
                total_hands += 1;
                total_pot += stats.pot;
                max_pot = max_pot.max(stats.pot);
                if stats.side_pots > 1 {
                    num_side_pots += 1;
                }
                if stats.reached_showdown {
                    num_showdowns += 1;
                }
            }
            Err(msg) => {
                failures += 1;
                eprintln!("[STRESS] hand #{hand_no}: {msg}");
            }
        }
    }

    println!();
    println!("=========== STRESS TEST SUMMARY ===========");
    println!("Всего сыграно рук: {}", total_hands);
    if total_hands > 0 {
        println!("Суммарный банк за все руки: {}", total_pot);
        println!("Средний банк: {}", total_pot / total_hands);
        println!("Максимальный банк: {}", max_pot);
        println!("Рук с несколькими потами: {}", num_side_pots);
        println!("Рук дошло до шоудауна: {}", num_showdowns);
    }
    println!("Нарушений инвариантов: {}", failures);
    println!("===========================================");
    println!("poker_stress_test: завершено.");
}

/// Итог одной раздачи, который нам нужен для статистики.
struct HandStats {
    pot: u64,
    side_pots: usize,
    reached_showdown: bool,
}

/// Случайный стол: от 2 до 9 игроков на случайных местах, стеки не меньше BB.
fn random_table(picker: &mut RandomActionPicker) -> (Vec<Seat>, HandConfig) {
    let players = picker.gen_range(2..=MAX_SEATS as u64) as usize;
    let mut seats = empty_table();

    let mut free: Vec<SeatNumber> = (1..=MAX_SEATS).collect();
    for id in 0..players {
        let idx = picker.gen_range(0..=(free.len() - 1) as u64) as usize;
        let seat = free.swap_remove(idx);
        let stack = Chips(picker.gen_range(100..=5_000));
        seats[(seat - 1) as usize] = Seat::occupied(
            seat,
            TablePlayer::new(id as u64 + 1, format!("Bot {}", id + 1), stack),
        );
    }

    let occupied: Vec<SeatNumber> = seats
        .iter()
        .filter(|s| s.is_occupied())
        .map(|s| s.number)
        .collect();
    let button = occupied[picker.gen_range(0..=(occupied.len() - 1) as u64) as usize];

    (seats, HandConfig::new(button, Chips(10), Chips(20)))
}

fn stacks_of(state: &HandState) -> BTreeMap<SeatNumber, Chips> {
    state
        .seats
        .iter()
        .filter_map(|s| s.player.as_ref().and_then(|p| p.stack).map(|st| (s.number, st)))
        .collect()
}

/// Одна раздача от блайндов до выплаты банка с проверкой инвариантов:
/// - фишки не появляются и не исчезают;
/// - сумма сайд-потов равна банку;
/// - реплей сохранённой раздачи восстанавливает стартовые и финальные стеки.
fn play_single_hand_stress(picker: &mut RandomActionPicker) -> Result<HandStats, String> {
    const MAX_STEPS: u32 = 500;

    let (seats, config) = random_table(picker);
    let mut engine = HandEngine::with_clock(seats, config, ManualClock::new(0, 1_000));
    let start_stacks = stacks_of(engine.state());
    let start_total: Chips = start_stacks.values().sum();

    let mut deck = Deck::standard_52();
    picker.shuffle(&mut deck);
    for seat in engine.state().occupied() {
        let cards = deck.draw_n(2);
        engine.set_hole_cards(seat, cards);
    }

    if !engine.start_hand() {
        return Err("start_hand отклонён".to_string());
    }

    let mut steps = 0;
    while !engine.state().hand_complete {
        steps += 1;
        if steps > MAX_STEPS {
            return Err(format!("превышен лимит шагов ({MAX_STEPS})"));
        }

        let state = engine.state();
        if state.is_picking_board {
            let need = state.street.board_len() - state.board.len();
            let cards = deck.draw_n(need);
            engine.deal_board(&cards);
            continue;
        }

        let Some(action) = picker.pick(state) else {
            return Err(format!("нет актёра на улице {}", state.street));
        };
        engine
            .apply(action)
            .map_err(|e| format!("действие {action:?} отклонено: {e}"))?;

        let state = engine.state();
        let in_play = state.pot + state.total_bets() + state.total_known_stacks();
        if in_play != start_total {
            return Err(format!(
                "фишки не сходятся: {} вместо {}",
                in_play, start_total
            ));
        }
    }

    let state = engine.state();
    if state.side_pot_total() != state.pot {
        return Err(format!(
            "сайд-поты {} не равны банку {}",
            state.side_pot_total(),
            state.pot
        ));
    }

    let reached_showdown = state.winners.is_empty();
    if reached_showdown {
        // Вскрытие не оцениваем: каждый пот забирает случайный претендент.
        let assignments: Vec<Vec<SeatNumber>> = state
            .side_pots
            .iter()
            .map(|pot| {
                let live: Vec<SeatNumber> = pot
                    .eligible_seats
                    .iter()
                    .copied()
                    .filter(|seat| !state.folded.contains(seat))
                    .collect();
                if live.is_empty() {
                    return Vec::new();
                }
                let idx = picker.gen_range(0..=(live.len() - 1) as u64) as usize;
                vec![live[idx]]
            })
            .collect();
        if !engine.distribute_pot(&assignments) {
            return Err("distribute_pot отклонён".to_string());
        }
    }

    let state = engine.state();
    let final_stacks = stacks_of(state);
    let final_total: Chips = final_stacks.values().sum();
    if final_total != start_total {
        return Err(format!(
            "после выплаты {} фишек вместо {}",
            final_total, start_total
        ));
    }

    let record = engine.to_record(HoleCardVisibility::Showdown);
    let json = encode_record(&record).map_err(|e| e.to_string())?;
    let replay = load_replay(&json).map_err(|e| e.to_string())?;
    let states = replay.states();
    if states[0].stacks != start_stacks {
        return Err("реплей восстановил другие стартовые стеки".to_string());
    }
    if states[states.len() - 1].stacks != final_stacks {
        return Err("реплей закончился с другими стеками".to_string());
    }

    Ok(HandStats {
        pot: state.pot.0,
        side_pots: state.side_pots.len(),
        reached_showdown,
    })
}
