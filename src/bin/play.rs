use clap::Parser;
use nimbot::game::{validate_heaps, Difficulty, Match, Side};
use std::io::{self, BufRead, Write};

#[derive(Parser, Debug)]
#[command(name = "nimbot-play", about = "Play Nim against the computer in the terminal")]
struct Args {
    /// hard | simple
    #[arg(long, default_value = "hard")]
    mode: Difficulty,
    #[arg(long, value_delimiter = ',', default_values_t = vec![1, 3, 5, 7])]
    heaps: Vec<i64>,
}

fn parse_move(line: &str) -> Option<(usize, u32)> {
    let mut tokens = line.split_whitespace();
    let heap = tokens.next()?.parse().ok()?;
    let amount = tokens.next()?.parse().ok()?;
    Some((heap, amount))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut game = Match::new(args.mode, validate_heaps(&args.heaps)?)?;

    println!("Nim ({} mode)", game.difficulty());
    println!("Enter moves as '<heap> <amount>', 'quit' to exit");
    println!("{}", if game.player_turn() { "You start." } else { "The computer starts." });

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        println!("\n{}", game);
        if let Some(winner) = game.winner() {
            match winner {
                Side::Player => println!("\nYou took the last object. You win!"),
                Side::Computer => println!("\nThe computer took the last object. You lose."),
            }
            break;
        }

        if !game.player_turn() {
            game.computer_move()?;
            if let Some(m) = game.last_move() {
                println!("Computer takes {} from heap {}", m.amount_taken, m.heap_index);
            }
            continue;
        }

        print!("Your move: ");
        io::stdout().flush()?;
        let line = match lines.next() {
            Some(l) => l?,
            None => break,
        };
        let line = line.trim();
        if line == "quit" {
            println!("Thanks for playing!");
            break;
        }
        match parse_move(line) {
            Some((heap, amount)) => {
                if let Err(e) = game.player_move(heap, amount) { println!("{}", e); }
            }
            None => println!("Invalid move format! Use e.g. '2 3' to take 3 from heap 2"),
        }
    }
    Ok(())
}
