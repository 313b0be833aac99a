//! Play Mastermind in the terminal
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![warn(
    bad_style,
    dead_code,
    improper_ctypes,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    no_mangle_generic_items,
    non_shorthand_field_patterns,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unconditional_recursion,
    unsafe_code,
    unused_allocation,
    unused_comparisons,
    unused_crate_dependencies,
    unused_extern_crates,
    unused_import_braces,
    unused_parens,
    unused_qualifications,
    unused_results,
    unused,
    while_true
)]

use clap::{value_parser, Arg, Command};
use colored::Colorize;
use eyre::{Result, WrapErr};
use mastermind_core::{Color, GameState, GuessBuilder, Palette, Rules, Session};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

mod display;

const LOG_ENV: &str = "MASTERMIND_LOG";

fn main() -> Result<()> {
    eyre::set_hook(Box::new(eyre::DefaultHandler::default_with))?;
    init_logging();

    let opts = parse_opts();
    tracing::debug!(?opts, "parsed options");

    let rules = Rules::new(opts.palette, opts.code_length, opts.max_attempts)
        .wrap_err("The game cannot be played with these options.")?;

    match opts.seed {
        Some(seed) => play(&mut Session::with_rng(rules, StdRng::seed_from_u64(seed))),
        None => play(&mut Session::new(rules)),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug)]
struct Opts {
    palette: Palette,
    code_length: usize,
    max_attempts: usize,
    seed: Option<u64>,
}

fn parse_palette(s: &str) -> Result<Palette, String> {
    Palette::new(s.split(',')).map_err(|e| e.to_string())
}

fn parse_opts() -> Opts {
    let matches = Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("colors")
                .value_name("COLORS")
                .help("The colors to play with, separated by commas")
                .long_help(concat!(
                    "The colors to play with, separated by commas. ",
                    "Names must be unique, ignoring case. ",
                    "Common color names are shown in their color. ",
                    "The default is Red,Blue,Green,Yellow,Orange,Purple."
                ))
                .short('c')
                .long("colors")
                .value_parser(parse_palette),
        )
        .arg(
            Arg::new("length")
                .value_name("LENGTH")
                .help("The number of colors in the secret code [default: 4]")
                .short('l')
                .long("length")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("attempts")
                .value_name("ATTEMPTS")
                .help("The number of guesses before the game is lost [default: 10]")
                .short('a')
                .long("attempts")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("seed")
                .value_name("SEED")
                .help("Seed the random generator to replay the same games")
                .long_help(concat!(
                    "Seed the random generator to replay the same games. ",
                    "The secret codes and the hints are drawn from the same generator, ",
                    "so asking for a hint changes all following games."
                ))
                .short('s')
                .long("seed")
                .value_parser(value_parser!(u64)),
        )
        .get_matches();

    Opts {
        palette: matches
            .get_one::<Palette>("colors")
            .cloned()
            .unwrap_or_default(),
        code_length: matches
            .get_one::<usize>("length")
            .copied()
            .unwrap_or(Rules::DEFAULT_CODE_LENGTH),
        max_attempts: matches
            .get_one::<usize>("attempts")
            .copied()
            .unwrap_or(Rules::DEFAULT_MAX_ATTEMPTS),
        seed: matches.get_one::<u64>("seed").copied(),
    }
}

enum Round {
    Over,
    Quit,
}

fn play<R: Rng>(session: &mut Session<R>) -> Result<()> {
    loop {
        match play_round(session)? {
            Round::Quit => return Ok(()),
            Round::Over => {
                show_game_over(session);
                let again = dialoguer::Confirm::new()
                    .with_prompt("Do you want to play again?")
                    .default(true)
                    .interact()
                    .wrap_err("Could not read the answer.")?;
                if !again {
                    return Ok(());
                }
                session.reset();
            }
        }
    }
}

fn play_round<R: Rng>(session: &mut Session<R>) -> Result<Round> {
    const CLEAR: &str = "-- Clear the current guess";
    const HINT: &str = "-- Get a hint";
    const SUBMIT: &str = "-- Submit";
    const QUIT: &str = "-- QUIT I don't want to play anymore";

    println!("{}", "MASTERMIND".bold());

    let palette = session.rules().palette().clone();
    let max_attempts = session.rules().max_attempts();
    let mut guess = GuessBuilder::new(session.rules().code_length());
    let mut selection = 0;

    loop {
        println!();
        println!("Attempt: {}/{}", session.attempts_used(), max_attempts);
        println!(
            "Current Guess: {}",
            display::pegs(&palette, guess.current(), guess.code_length())
        );

        let mut select = dialoguer::Select::new();
        for color in palette.colors() {
            let _ = select.item(display::color_name(palette.name(color)));
        }

        // jump to submit once the guess is complete
        if guess.is_complete() {
            selection = palette.len() + 2;
        }

        selection = select
            .with_prompt("Select Colors")
            .default(selection)
            .item(CLEAR)
            .item(HINT)
            .item(SUBMIT)
            .item(QUIT)
            .interact()
            .wrap_err("Could not read the selection.")?;

        match selection.checked_sub(palette.len()) {
            None => {
                if !guess.add(Color::new(selection)) {
                    eprintln!("The guess is complete, submit or clear it.");
                }
            }
            Some(0) => {
                let _ = guess.clear();
                selection = 0;
            }
            Some(1) => {
                let hint = session.request_hint();
                println!("Hint: Try this: {}", display::code(&palette, &hint));
            }
            Some(2) => match session.submit_guess(guess.current().clone()) {
                Ok(_) => {
                    let _ = guess.clear();
                    selection = 0;

                    println!();
                    println!("{}", "Previous Guesses:".bold());
                    for (attempt, entry) in session.history().iter().enumerate() {
                        println!("{}", display::history_row(&palette, attempt + 1, entry));
                    }

                    if session.state().is_over() {
                        return Ok(Round::Over);
                    }
                }
                Err(e) => eprintln!("{e}"),
            },
            Some(_) => {
                tracing::debug!(attempts = session.attempts_used(), "player quit");
                return Ok(Round::Quit);
            }
        }
    }
}

fn show_game_over<R: Rng>(session: &Session<R>) {
    let palette = session.rules().palette();
    let secret = session
        .revealed()
        .map(|secret| display::code(palette, secret))
        .unwrap_or_default();

    println!();
    match session.state() {
        GameState::Won => {
            println!(
                "{} You won in {} attempts!",
                "Congratulations!".green().bold(),
                session.attempts_used()
            );
            println!("Secret code: {secret}");
        }
        GameState::Lost => {
            println!("{}", "Game Over!".red().bold());
            println!("Secret code was: {secret}");
        }
        GameState::InProgress => {}
    }
}
