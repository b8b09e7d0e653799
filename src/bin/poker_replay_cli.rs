use std::env;
use std::fs;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use poker_hand_tracker::domain::{format_cards, SeatNumber};
use poker_hand_tracker::infra::load_replay;
use poker_hand_tracker::replay::{seat_label, ReplayEngine};

fn print_position(replay: &ReplayEngine) {
    let state = replay.current();
    println!(
        "[{:>5}] {:<8} pot={:<6} board=[{}]  {}",
        replay.progress_label(),
        state.street.to_string(),
        state.total_pot().0,
        format_cards(&state.board),
        replay.action_text(),
    );
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: poker_replay_cli <hand.json> [hero-seat]");
        return ExitCode::from(2);
    };
    let hero: Option<SeatNumber> = match args.next() {
        Some(raw) => match raw.parse() {
            Ok(seat) => Some(seat),
            Err(_) => {
                eprintln!("[REPLAY] место героя должно быть числом, получено {raw:?}");
                return ExitCode::from(2);
            }
        },
        None => None,
    };

    let json = match fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("[REPLAY] не удалось прочитать {path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut replay = match load_replay(&json) {
        Ok(replay) => replay,
        Err(e) => {
            eprintln!("[REPLAY] раздача не загружена: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(seat) = hero {
        replay = replay.with_hero(seat);
    }

    println!(
        "poker_replay_cli: {} действий, кнопка на месте {}",
        replay.record().actions.len(),
        replay.record().config.button
    );

    print_position(&replay);
    while replay.step_forward() {
        print_position(&replay);
    }

    let last = replay.current();
    println!("----------------------------------------");
    for (seat, stack) in &last.stacks {
        println!(
            "  {:<12} stack={}",
            seat_label(replay.record(), *seat, hero),
            stack
        );
    }
    println!("Итоговый банк: {}", last.pot);

    ExitCode::SUCCESS
}
