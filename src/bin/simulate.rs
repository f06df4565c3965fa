use std::collections::HashMap;
use std::error::Error;
use std::process;

use clap::{ArgAction, Parser};

use uno_engine::card::DEFAULT_INITIAL_CARDS;
use uno_engine::{
    Bot, Game, GameError, create_bot_from_spec, describe_action, label_for_spec, render_state,
    winner_points,
};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Play UNO matches between bots.")]
struct Args {
    /// Number of matches to play
    #[arg(short = 'g', long = "games", default_value_t = 1)]
    games: usize,

    /// Base RNG seed (deck and bot RNGs are derived from it)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Cards dealt to every player
    #[arg(long = "initial-cards", default_value_t = DEFAULT_INITIAL_CARDS)]
    initial_cards: usize,

    /// Safety cap on actions per match; longer matches are aborted
    #[arg(long = "max-turns", default_value_t = 2000)]
    max_turns: usize,

    /// Show the game state and chosen actions each turn
    #[arg(long = "visualize", action = ArgAction::SetTrue)]
    visualize: bool,

    /// Player bot specs: random[:seed] or heuristic (at least 2)
    bots: Vec<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let specs = if args.bots.is_empty() {
        vec![String::from("heuristic"), String::from("random")]
    } else {
        args.bots.clone()
    };
    if specs.len() < 2 {
        return Err(format!("expected at least 2 players, received {}", specs.len()).into());
    }

    let mut wins_per_label: HashMap<String, usize> = HashMap::new();
    let mut points_per_label: HashMap<String, usize> = HashMap::new();
    let mut aborted_games = 0usize;

    for game_idx in 0..args.games {
        let game_seed = args.seed.wrapping_add(game_idx as u64);
        let mut game = Game::builder()
            .with_seed(game_seed)
            .with_initial_cards(args.initial_cards)
            .build()?;

        let mut bots: HashMap<String, Box<dyn Bot>> = HashMap::with_capacity(specs.len());
        let mut labels: HashMap<String, String> = HashMap::with_capacity(specs.len());
        for (seat, spec) in specs.iter().enumerate() {
            let label = label_for_spec(spec);
            let name = format!("P{seat}-{label}");
            game.join(name.as_str())?;
            bots.insert(name.clone(), create_bot_from_spec(spec, seat, game_seed)?);
            labels.insert(name, label);
        }
        game.start()?;

        let mut turns = 0usize;
        let mut first_win_points = None;
        while !game.is_finished() && turns < args.max_turns {
            let current = game
                .current_player()
                .map(str::to_string)
                .ok_or(GameError::NotStarted)?;
            let state = game.state_view(&current)?;
            let legal = game.legal_actions(&current)?;
            if args.visualize {
                println!("{}", render_state(&state));
            }
            let bot = bots
                .get_mut(&current)
                .ok_or_else(|| format!("no bot seated as {current}"))?;
            let action = bot.select_action(&state, &legal);
            if args.visualize {
                println!("{current}: {}\n", describe_action(&action));
            }
            game.apply_action(&current, action)?;
            if first_win_points.is_none() && !game.winners().is_empty() {
                first_win_points = Some(winner_points(&game));
            }
            turns += 1;
        }

        if !game.is_finished() {
            println!("Game {game_idx}: aborted after {turns} actions.");
            aborted_games += 1;
            continue;
        }
        let points = first_win_points.unwrap_or_default();
        let order = game.winners().join(", ");
        println!("Game {game_idx}: finishing order {order} ({turns} actions, {points} points).");
        if let Some(first) = game.winners().first() {
            if let Some(label) = labels.get(first) {
                *wins_per_label.entry(label.clone()).or_default() += 1;
                *points_per_label.entry(label.clone()).or_default() += points;
            }
        }
    }

    if args.games > 1 {
        println!("\nSummary over {} games ({aborted_games} aborted):", args.games);
        let mut labels: Vec<&String> = wins_per_label.keys().collect();
        labels.sort();
        for label in labels {
            let wins = wins_per_label.get(label).copied().unwrap_or(0);
            let points = points_per_label.get(label).copied().unwrap_or(0);
            println!("  {label:<10} wins {wins:>5}  points {points:>7}");
        }
    }

    Ok(())
}
