use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;

use uno_engine::card::DECK_SIZE;
use uno_engine::{
    Action, Bot, Game, GameBuilder, GameError, GameStateView, GameStatus, HeuristicBot,
    PlayerPublicState, RandomBot, create_bot_from_spec, label_for_spec,
};

fn total_cards(game: &Game) -> usize {
    let in_hands: usize = game
        .players()
        .iter()
        .filter_map(|player| game.hand(player))
        .map(|hand| hand.len())
        .sum();
    in_hands + game.draw_pile_count() + game.discard_pile_count()
}

fn play_match(seed: u64, specs: &[&str], max_turns: usize) -> Result<Game, GameError> {
    let mut game = GameBuilder::new().with_seed(seed).build()?;
    let mut bots: HashMap<String, Box<dyn Bot>> = HashMap::new();
    for (seat, spec) in specs.iter().enumerate() {
        let name = format!("P{seat}");
        game.join(name.as_str())?;
        let bot = create_bot_from_spec(spec, seat, seed).expect("known bot spec");
        bots.insert(name, bot);
    }
    game.start()?;
    let mut turns = 0;
    while let Some(current) = game.current_player().map(str::to_string) {
        if turns >= max_turns {
            break;
        }
        let state = game.state_view(&current)?;
        let legal = game.legal_actions(&current)?;
        assert!(legal.contains(&Action::Pickup));
        let action = bots
            .get_mut(&current)
            .expect("every player has a bot")
            .select_action(&state, &legal);
        assert!(legal.contains(&action), "{current} chose illegal {action}");
        game.apply_action(&current, action)?;
        assert_eq!(total_cards(&game), DECK_SIZE);
        turns += 1;
    }
    Ok(game)
}

fn view(hand: &[&str], discard_top: &str, pending_penalty: usize) -> GameStateView {
    GameStateView {
        status: GameStatus::InProgress,
        direction: uno_engine::Direction::Clockwise,
        pending_penalty,
        self_player: String::from("me"),
        current_player: Some(String::from("me")),
        draw_pile_count: 50,
        discard_pile_count: 3,
        discard_top: Some(discard_top.parse().expect("card")),
        players: vec![PlayerPublicState {
            name: String::from("me"),
            hand_size: hand.len(),
            is_current: true,
            has_won: false,
        }],
        winners: Vec::new(),
        hand: hand.iter().map(|token| token.parse().expect("card")).collect(),
    }
}

fn plays(tokens: &[&str]) -> Vec<Action> {
    let mut actions: Vec<Action> = tokens
        .iter()
        .map(|token| token.parse().expect("action"))
        .collect();
    actions.push(Action::Pickup);
    actions
}

#[test]
fn bot_matches_conserve_cards_and_finish() -> Result<(), GameError> {
    for seed in 0..20u64 {
        let game = play_match(seed, &["heuristic", "random", "heuristic"], 5_000)?;
        if game.is_finished() {
            assert_eq!(game.turn_order().len(), 1);
            assert_eq!(game.winners().len(), 2);
        }
    }
    Ok(())
}

#[test]
fn heuristic_passes_the_penalty_on() {
    let mut bot = HeuristicBot::new();
    let state = view(&["r9", "g+2", "w+4"], "r+2", 2);
    let action = bot.select_action(&state, &plays(&["r9", "g+2", "w+4"]));
    assert_eq!(action.to_string(), "g+2");

    let state = view(&["r9", "w+4"], "r+2", 2);
    let action = bot.select_action(&state, &plays(&["r9", "w+4"]));
    assert_eq!(action.to_string(), "w+4");
}

#[test]
fn heuristic_keeps_wilds_for_last() {
    let mut bot = HeuristicBot::new();
    let state = view(&["w", "b1", "b2", "g9"], "b5", 0);
    let action = bot.select_action(&state, &plays(&["w", "b1", "b2"]));
    assert_eq!(action.to_string(), "b2");

    let state = view(&["w", "g9"], "b5", 0);
    let action = bot.select_action(&state, &plays(&["w"]));
    assert_eq!(action.to_string(), "w");

    let action = bot.select_action(&state, &[Action::Pickup]);
    assert_eq!(action, Action::Pickup);
}

#[test]
fn random_bot_only_picks_offered_actions() {
    let mut bot = RandomBot::new(StdRng::seed_from_u64(9));
    let state = view(&["b1", "b2"], "b5", 0);
    let legal = plays(&["b1", "b2"]);
    for _ in 0..50 {
        assert!(legal.contains(&bot.select_action(&state, &legal)));
    }
}

#[test]
fn registry_resolves_specs() {
    assert_eq!(label_for_spec(" Random:42 "), "random");
    assert!(create_bot_from_spec("random:42", 0, 1).is_ok());
    assert!(create_bot_from_spec("heuristic", 1, 1).is_ok());
    assert!(create_bot_from_spec("human", 2, 1).is_err());
}
