use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use nimbot::game::{validate_heaps, Difficulty};
use nimbot::selfplay::{play_match, summarize, HumanPolicy, MatchRecord, SelfPlayParams};
use rayon::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "nimbot-simulate", about = "Play scripted humans against the computer and report win rates")]
struct Args {
    #[arg(long, default_value_t = 1000)]
    games: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, value_delimiter = ',', default_values_t = vec![1, 3, 5, 7])]
    heaps: Vec<i64>,
    /// greedy | random | optimal
    #[arg(long, default_value = "greedy")]
    human: HumanPolicy,
    /// Only run this difficulty; both by default
    #[arg(long)]
    difficulty: Option<Difficulty>,
    #[arg(long, default_value_t = 0)]
    threads: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    if a.threads > 0 {
        rayon::ThreadPoolBuilder::new().num_threads(a.threads).build_global()?;
    }
    let heaps = validate_heaps(&a.heaps)?;
    let difficulties = match a.difficulty {
        Some(d) => vec![d],
        None => vec![Difficulty::Hard, Difficulty::Simple],
    };

    for difficulty in difficulties {
        let params = SelfPlayParams { games: a.games, difficulty, heaps: heaps.clone(), seed: a.seed, human: a.human };
        let pb = ProgressBar::new(a.games as u64);
        pb.set_style(ProgressStyle::with_template("{msg:>6} [{bar:40}] {pos}/{len} ({eta})")?.progress_chars("=> "));
        pb.set_message(difficulty.label());
        let records = (0..a.games)
            .into_par_iter()
            .map(|i| {
                let r = play_match(&params, i);
                pb.inc(1);
                r
            })
            .collect::<Result<Vec<MatchRecord>, _>>()?;
        pb.finish();

        let s = summarize(&records);
        println!(
            "{:>6}: games={} computer_wins={} ({:.1}%) player_started={} avg_moves={:.2}",
            difficulty.label(),
            s.games,
            s.computer_wins,
            100.0 * s.computer_win_rate(),
            s.player_starts,
            s.avg_moves()
        );
    }
    Ok(())
}
