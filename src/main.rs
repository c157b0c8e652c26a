use anyhow::{bail, Result};
use clap::Parser;

use std::io::{stdin, stdout, Write};
use std::time::Duration;

use connectx_ai::board::{ArrayBoard, GameState};
use connectx_ai::engine::Engine;
use connectx_ai::{DEFAULT_ALIGNMENT, DEFAULT_COLUMNS, DEFAULT_ROWS};

/// Terminal host for Connect X matches against the search engine
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Board height in rows
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Board width in columns
    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    columns: usize,

    /// Number of aligned tokens needed to win
    #[arg(long, default_value_t = DEFAULT_ALIGNMENT)]
    connect: usize,

    /// Seconds each engine may spend per move
    #[arg(long, default_value_t = 8)]
    timeout: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.rows == 0 || args.columns == 0 {
        bail!("the board needs at least one row and one column");
    }
    if args.connect < 2 {
        bail!("the connect target must be at least 2");
    }
    // moves are typed as single digits, which caps the practical width
    if args.columns > 9 {
        bail!("boards wider than 9 columns cannot be played from this prompt");
    }

    let mut board = ArrayBoard::new(args.rows, args.columns, args.connect);

    let stdin = stdin();

    println!("Welcome to Connect {}\n", args.connect);

    let mut ai_players = (false, false);

    // choose AI control of player 1
    loop {
        let mut buffer = String::new();
        print!("Is player 1 AI controlled? y/n: ");
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => {
                ai_players.0 = true;
                break;
            }
            Some(_letter @ 'n') => break,
            _ => println!("Unknown answer given"),
        }
    }

    // choose AI control of player 2
    loop {
        let mut buffer = String::new();
        print!("Is player 2 AI controlled? y/n: ");
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => {
                ai_players.1 = true;
                break;
            }
            Some(_letter @ 'n') => break,
            _ => println!("Unknown answer given"),
        }
    }

    // one engine per AI seat, each fixed to its own side for the match
    let timeout = Duration::from_secs(args.timeout);
    let mut engines = (
        ai_players
            .0
            .then(|| Engine::new(args.rows, args.columns, args.connect, true, timeout))
            .transpose()?,
        ai_players
            .1
            .then(|| Engine::new(args.rows, args.columns, args.connect, false, timeout))
            .transpose()?,
    );

    // game loop
    loop {
        board.display().expect("Failed to draw board!");

        match board.state {
            GameState::Playing => {
                let engine = if board.player_one {
                    engines.0.as_mut()
                } else {
                    engines.1.as_mut()
                };

                let next_move = if let Some(engine) = engine {
                    println!("{} is thinking...", Engine::name());
                    stdout().flush().expect("Failed to flush to stdout!");

                    // slow down play if both players are AI
                    if ai_players == (true, true) {
                        std::thread::sleep(Duration::new(1, 0));
                    }

                    let best_move = engine.choose_move(&mut board)?;

                    println!("Best move: {}", best_move + 1);
                    best_move + 1

                // human player
                } else {
                    print!("Move input > ");
                    stdout().flush().expect("Failed to flush to stdout!");
                    let mut input_str = String::new();
                    stdin.read_line(&mut input_str)?;

                    match input_str.trim().parse::<usize>() {
                        Err(_) => {
                            println!("Invalid number: {}", input_str);
                            continue;
                        }
                        Ok(column) => column,
                    }
                };

                if let Err(err) = board.play_checked(next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            GameState::PlayerOneWin => {
                println!("Player 1 wins!");
                break;
            }
            GameState::PlayerTwoWin => {
                println!("Player 2 wins!");
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}
