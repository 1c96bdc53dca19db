use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::str::FromStr;

use crate::dice::SystemDice;
use crate::error::NimError;
use crate::game::{balancing_move, Difficulty, Match, Move, Side};

/// How the scripted human picks a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HumanPolicy {
    /// Take one object from the largest heap.
    Greedy,
    /// Uniform non-empty heap, uniform amount.
    Random,
    /// Balance when possible, otherwise play greedy.
    Optimal,
}

impl FromStr for HumanPolicy {
    type Err = NimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "greedy" => Ok(HumanPolicy::Greedy),
            "random" => Ok(HumanPolicy::Random),
            "optimal" => Ok(HumanPolicy::Optimal),
            other => Err(NimError::config(format!("unknown human policy '{}'", other))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub difficulty: Difficulty,
    pub heaps: Vec<u32>,
    pub seed: u64,
    pub human: HumanPolicy,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchRecord {
    pub player_started: bool,
    pub moves: Vec<Move>,
    pub winner: Side,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub games: usize,
    pub computer_wins: usize,
    pub player_starts: usize,
    pub total_moves: usize,
}

impl Summary {
    pub fn computer_win_rate(&self) -> f64 {
        if self.games == 0 { 0.0 } else { self.computer_wins as f64 / self.games as f64 }
    }

    pub fn avg_moves(&self) -> f64 {
        if self.games == 0 { 0.0 } else { self.total_moves as f64 / self.games as f64 }
    }
}

/// Plays match `index` of a run. Match `i` is seeded with `seed + i`, so a
/// run can be split across threads and still reproduce.
pub fn play_match(params: &SelfPlayParams, index: usize) -> Result<MatchRecord, NimError> {
    let seed = params.seed.wrapping_add(index as u64);
    let mut game = Match::with_dice(params.difficulty, params.heaps.clone(), Box::new(SystemDice::seeded(seed)))?;
    let mut rng = SmallRng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);
    let player_started = game.player_turn();
    let mut moves = Vec::new();
    let winner = loop {
        if let Some(w) = game.winner() { break w; }
        if game.player_turn() {
            let (heap, amount) = human_move(game.heaps(), params.human, &mut rng);
            game.player_move(heap, amount)?;
        } else {
            game.computer_move()?;
        }
        if let Some(m) = game.last_move() { moves.push(m); }
    };
    Ok(MatchRecord { player_started, moves, winner })
}

pub fn generate_matches(params: &SelfPlayParams) -> Result<Vec<MatchRecord>, NimError> {
    (0..params.games).map(|i| play_match(params, i)).collect()
}

pub fn summarize(records: &[MatchRecord]) -> Summary {
    records.iter().fold(Summary::default(), |mut s, r| {
        s.games += 1;
        if r.winner == Side::Computer { s.computer_wins += 1; }
        if r.player_started { s.player_starts += 1; }
        s.total_moves += r.moves.len();
        s
    })
}

// Callers guarantee at least one non-empty heap.
fn human_move(heaps: &[u32], policy: HumanPolicy, rng: &mut SmallRng) -> (usize, u32) {
    match policy {
        HumanPolicy::Greedy => greedy_move(heaps),
        HumanPolicy::Random => {
            let open: Vec<usize> = heaps.iter().enumerate().filter(|(_, &v)| v > 0).map(|(i, _)| i).collect();
            let heap = open[rng.gen_range(0..open.len())];
            (heap, rng.gen_range(1..=heaps[heap]))
        }
        HumanPolicy::Optimal => balancing_move(heaps).unwrap_or_else(|| greedy_move(heaps)),
    }
}

fn greedy_move(heaps: &[u32]) -> (usize, u32) {
    let (heap, _) = heaps.iter().enumerate().max_by_key(|(_, &v)| v).unwrap_or((0, &0));
    (heap, 1)
}
