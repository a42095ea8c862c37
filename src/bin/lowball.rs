//! A hotseat lowball dice game for the terminal.
//!
//! Players share one keyboard, rolling against each other for the pot.
//! The lowest hand wins and threes score nothing.

use anyhow::Result;
use log::{debug, info};
use pico_args::Arguments;
use std::io::{self, Write};

use lowball_dice::{
    BotDecisionMaker, DEFAULT_ANTE, DEFAULT_BUY_IN, GameSettings, LowballState, MAX_PLAYERS,
    MAX_ROLLS, UserError,
    entities::{Color, GameView, PlayerId, Usd},
    game::{GameStateManagement, PhaseDependentPlayerManagement},
};

const HELP: &str = "\
Run a hotseat lowball dice game

USAGE:
  lowball [OPTIONS]

OPTIONS:
  --ante    DOLLARS        Ante collected each round   [default: env LOWBALL_ANTE or 50]
  --buy-in  DOLLARS        Starting stack for players  [default: env LOWBALL_BUY_IN or 1000]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  LOWBALL_ANTE             Ante collected each round
  LOWBALL_BUY_IN           Starting stack for players
";

const COMMANDS: &str = "\
COMMANDS:
  add NAME [COLOR] [BUYIN]  seat a player (lobby only)
  start                     start the game
  roll ID                   roll a player's unheld dice
  hold ID DIE               toggle a hold on die 0-4
  auto ID                   let a bot finish a player's turn
  score                     end the round and score it as the dice lie
  next                      start the next round
  end                       end the game and return to the lobby
  view                      show the table
  json                      dump the table as JSON
  help                      show this message
  quit                      leave
";

struct Args {
    ante: Usd,
    buy_in: Usd,
}

fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        ante: pargs.value_from_str("--ante").unwrap_or_else(|_| {
            std::env::var("LOWBALL_ANTE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_ANTE)
        }),
        buy_in: pargs.value_from_str("--buy-in").unwrap_or_else(|_| {
            std::env::var("LOWBALL_BUY_IN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_BUY_IN)
        }),
    };

    env_logger::builder().format_target(false).init();
    info!(
        "table opens with ${} antes and ${} stacks",
        args.ante, args.buy_in
    );

    let settings = GameSettings::new(args.ante, args.buy_in, MAX_PLAYERS);
    println!("lowball dice! type `help` for commands");
    run(LowballState::from(settings))
}

fn run(mut state: LowballState) -> Result<()> {
    let mut bot = BotDecisionMaker::new();
    loop {
        // Settle transient phases before prompting.
        loop {
            let phase = phase_name(&state);
            state = state.step();
            if phase_name(&state) == phase {
                break;
            }
        }
        for event in state.drain_events() {
            println!("* {event}");
        }

        print!("[{}] > ", phase_name(&state));
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(());
        }
        let mut parts = input.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };

        match command {
            "add" => match parts.next() {
                Some(name) => {
                    let color = parts.next().map(Color::new);
                    let buy_in = parts.next().and_then(|v| v.parse().ok());
                    match state.new_player(name, color, buy_in) {
                        Ok(id) => println!("seated {name} as {id}"),
                        Err(err) => debug!("rejected: {err}"),
                    }
                }
                None => println!("usage: add NAME [COLOR] [BUYIN]"),
            },
            "start" => {
                log_rejection(state.init_start());
            }
            "roll" => match parse_id(parts.next()) {
                Some(id) => {
                    if log_rejection(state.roll_dice(id)) {
                        print_hand(&state, id);
                    }
                }
                None => println!("usage: roll ID"),
            },
            "hold" => match (parse_id(parts.next()), parts.next().and_then(|v| v.parse().ok())) {
                (Some(id), Some(die_idx)) => {
                    if log_rejection(state.toggle_hold(id, die_idx)) {
                        print_hand(&state, id);
                    }
                }
                _ => println!("usage: hold ID DIE"),
            },
            "auto" => match parse_id(parts.next()) {
                Some(id) => {
                    if log_rejection(autoplay(&mut state, &mut bot, id)) {
                        print_hand(&state, id);
                    }
                }
                None => println!("usage: auto ID"),
            },
            "score" => {
                log_rejection(state.init_end_round());
            }
            "next" => {
                log_rejection(state.start_new_round());
            }
            "end" => {
                log_rejection(state.end_game());
            }
            "view" => print_view(&state.get_view()),
            "json" => println!("{}", serde_json::to_string_pretty(&state.get_view())?),
            "help" => print!("{COMMANDS}"),
            "quit" | "exit" => return Ok(()),
            unknown => println!("unknown command `{unknown}`, try `help`"),
        }
    }
}

/// Let a bot play out a player's turn, holding what the policy likes and
/// rolling until it stands or the rolls run out.
fn autoplay(
    state: &mut LowballState,
    bot: &mut BotDecisionMaker,
    id: PlayerId,
) -> Result<(), UserError> {
    loop {
        state.roll_dice(id)?;
        let Some(player) = state.get_view().players.into_iter().find(|p| p.id == id) else {
            return Err(UserError::PlayerDoesNotExist);
        };
        if !bot.wants_reroll(&player.dice, player.rolls_used) {
            return Ok(());
        }
        // Only ever add holds, so the re-roll below stays legal.
        for (die_idx, held) in bot.desired_holds(&player.dice).into_iter().enumerate() {
            if held && !player.dice[die_idx].held {
                state.toggle_hold(id, die_idx)?;
            }
        }
    }
}

fn parse_id(token: Option<&str>) -> Option<PlayerId> {
    token.and_then(|t| t.parse().ok()).map(PlayerId)
}

/// Game errors are no-ops at the table; log them for the curious.
fn log_rejection(result: Result<(), UserError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            debug!("rejected: {err}");
            false
        }
    }
}

fn phase_name(state: &LowballState) -> &'static str {
    match state {
        LowballState::Lobby(_) => "lobby",
        LowballState::CollectAnte(_) => "ante",
        LowballState::Roll(_) => "roll",
        LowballState::DistributePot(_) => "payout",
        LowballState::RoundOver(_) => "round over",
    }
}

fn print_hand(state: &LowballState, id: PlayerId) {
    if let Some(player) = state.get_view().players.iter().find(|p| p.id == id) {
        let dice: String = player.dice.iter().map(ToString::to_string).collect();
        println!("  {} {dice}  score {}", player.id, player.score);
    }
}

fn print_view(view: &GameView) {
    println!("ante ${} | pot {}", view.ante, view.pot);
    for player in &view.players {
        let dice: String = player.dice.iter().map(ToString::to_string).collect();
        let crown = if player.is_winner { "  *last winner*" } else { "" };
        println!(
            "  {} {:<12} ${:<7} {} {dice}  rolls {}/{MAX_ROLLS}  score {:>2}{crown}",
            player.id, player.name, player.money, player.state, player.rolls_used, player.score,
        );
    }
}
