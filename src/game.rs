use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::dice::{Dice, SystemDice};
use crate::error::NimError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Hard,
    Simple,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Hard => "hard",
            Difficulty::Simple => "simple",
        }
    }

    /// Whether the human opens, given a unit draw. Hard hands the human
    /// balanced starts 70% of the time, simple 25%.
    fn human_opens(self, balanced: bool, u: f64) -> bool {
        match (self, balanced) {
            (Difficulty::Simple, true) => u >= 0.75,
            (Difficulty::Simple, false) => u > 0.25,
            (Difficulty::Hard, true) => u >= 0.30,
            (Difficulty::Hard, false) => u > 0.70,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

impl FromStr for Difficulty {
    type Err = NimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hard" => Ok(Difficulty::Hard),
            "simple" => Ok(Difficulty::Simple),
            other => Err(NimError::config(format!("unknown difficulty '{}'", other))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    pub is_player_move: bool,
    pub heap_index: usize,
    pub amount_taken: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Player,
    Computer,
}

/// Read-only view of a match, serialized as the response body of the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub heaps: Vec<u32>,
    pub readable: String,
    pub player_turn: bool,
    pub last_move: Option<Move>,
    pub difficulty: Difficulty,
    pub is_over: bool,
}

/// XOR of all heap values. Zero means the position is balanced.
pub fn nim_sum(heaps: &[u32]) -> u32 { heaps.iter().fold(0, |acc, &h| acc ^ h) }

pub fn total(heaps: &[u32]) -> u64 { heaps.iter().map(|&h| h as u64).sum() }

/// Find the move that brings the nim-sum back to zero.
///
/// Candidates are tried in ascending heap value (stable, so equal values go
/// lowest index first). A heap `v` qualifies when `d ^ v < v`; the reduced
/// position is checked on a copy before it is reported. Returns
/// `(heap_index, take)`, or `None` for a balanced position or when no heap
/// qualifies.
pub fn balancing_move(heaps: &[u32]) -> Option<(usize, u32)> {
    let diff = nim_sum(heaps);
    if diff == 0 { return None; }
    let mut order: Vec<usize> = (0..heaps.len()).collect();
    order.sort_by_key(|&i| heaps[i]);
    for i in order {
        let v = heaps[i];
        let target = diff ^ v;
        if target >= v { continue; }
        let mut trial = heaps.to_vec();
        trial[i] = target;
        if nim_sum(&trial) == 0 { return Some((i, v - target)); }
    }
    None
}

/// One line per heap: `index:value`, a tab, and a tally of `value` marks.
pub fn render(heaps: &[u32]) -> String {
    heaps
        .iter()
        .enumerate()
        .map(|(i, &v)| format!("{}:{} \t {}", i, v, "|".repeat(v as usize)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Checks an untyped start situation: every value must be a non-negative
/// integer that fits a heap, and the list must not be empty.
pub fn validate_heaps(values: &[i64]) -> Result<Vec<u32>, NimError> {
    if values.is_empty() { return Err(NimError::config("start situation must not be empty")); }
    values
        .iter()
        .map(|&v| u32::try_from(v).map_err(|_| NimError::config(format!("heap value {} is out of range", v))))
        .collect()
}

/// Same as [`validate_heaps`] for raw JSON, additionally rejecting floats and
/// non-numbers.
pub fn heaps_from_json(values: &[serde_json::Value]) -> Result<Vec<u32>, NimError> {
    let ints = values
        .iter()
        .map(|v| v.as_i64().ok_or_else(|| NimError::config(format!("heap value {} is not an integer", v))))
        .collect::<Result<Vec<i64>, _>>()?;
    validate_heaps(&ints)
}

/// A single game of Nim between a human and the computer.
pub struct Match {
    heaps: Vec<u32>,
    difficulty: Difficulty,
    player_turn: bool,
    last_move: Option<Move>,
    dice: Box<dyn Dice>,
}

impl Match {
    pub fn new(difficulty: Difficulty, heaps: Vec<u32>) -> Result<Self, NimError> {
        Self::with_dice(difficulty, heaps, Box::new(SystemDice::from_entropy()))
    }

    pub fn with_dice(difficulty: Difficulty, heaps: Vec<u32>, dice: Box<dyn Dice>) -> Result<Self, NimError> {
        if heaps.is_empty() { return Err(NimError::config("start situation must not be empty")); }
        let mut m = Self { heaps, difficulty, player_turn: false, last_move: None, dice };
        m.choose_first_player();
        Ok(m)
    }

    pub fn heaps(&self) -> &[u32] { &self.heaps }
    pub fn difficulty(&self) -> Difficulty { self.difficulty }
    pub fn player_turn(&self) -> bool { self.player_turn }
    pub fn last_move(&self) -> Option<Move> { self.last_move }

    pub fn is_balanced(&self) -> bool { nim_sum(&self.heaps) == 0 }

    pub fn is_over(&self) -> bool { total(&self.heaps) == 0 }

    /// Under normal play the side that cannot move has lost.
    pub fn winner(&self) -> Option<Side> {
        if !self.is_over() { return None; }
        Some(if self.player_turn { Side::Computer } else { Side::Player })
    }

    pub fn player_move(&mut self, heap_index: usize, amount: u32) -> Result<(), NimError> {
        if !self.player_turn { return Err(NimError::illegal("it is the computer's turn")); }
        let current = match self.heaps.get(heap_index) {
            None => return Err(NimError::illegal(format!("heap {} does not exist", heap_index))),
            Some(0) => return Err(NimError::illegal(format!("heap {} is empty", heap_index))),
            Some(&v) => v,
        };
        if amount == 0 || amount > current {
            return Err(NimError::illegal(format!("cannot take {} from heap {} holding {}", amount, heap_index, current)));
        }
        self.heaps[heap_index] -= amount;
        self.last_move = Some(Move { is_player_move: true, heap_index, amount_taken: amount });
        self.player_turn = false;
        Ok(())
    }

    /// Balance the position when possible, otherwise (or when the computer
    /// decides to blunder) take a single object from a random heap.
    pub fn computer_move(&mut self) -> Result<(), NimError> {
        if self.player_turn { return Err(NimError::illegal("it is the player's turn")); }
        if self.is_balanced() || self.should_mistake() {
            self.clueless_move()?;
        } else if !self.make_balanced() {
            self.clueless_move()?;
        }
        self.player_turn = true;
        Ok(())
    }

    /// Applies [`balancing_move`] and records it as a computer move. Returns
    /// false, leaving the heaps untouched, if no balancing move exists.
    pub fn make_balanced(&mut self) -> bool {
        match balancing_move(&self.heaps) {
            Some((heap_index, take)) => {
                self.heaps[heap_index] -= take;
                self.last_move = Some(Move { is_player_move: false, heap_index, amount_taken: take });
                true
            }
            None => false,
        }
    }

    /// Removes exactly one object from a uniformly chosen non-empty heap.
    pub fn clueless_move(&mut self) -> Result<(), NimError> {
        let open: Vec<usize> = self.heaps.iter().enumerate().filter(|(_, &v)| v > 0).map(|(i, _)| i).collect();
        if open.is_empty() { return Err(NimError::illegal("game is over, no move possible")); }
        let heap_index = open[self.dice.below(open.len())];
        self.heaps[heap_index] -= 1;
        self.last_move = Some(Move { is_player_move: false, heap_index, amount_taken: 1 });
        Ok(())
    }

    pub fn status(&self) -> Status {
        Status {
            heaps: self.heaps.clone(),
            readable: render(&self.heaps),
            player_turn: self.player_turn,
            last_move: self.last_move,
            difficulty: self.difficulty,
            is_over: self.is_over(),
        }
    }

    fn choose_first_player(&mut self) {
        let u = self.dice.unit();
        self.player_turn = self.difficulty.human_opens(self.is_balanced(), u);
    }

    fn should_mistake(&mut self) -> bool {
        match self.difficulty {
            Difficulty::Hard => false,
            Difficulty::Simple => self.dice.unit() >= 0.30,
        }
    }
}

impl fmt::Debug for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("heaps", &self.heaps)
            .field("difficulty", &self.difficulty)
            .field("player_turn", &self.player_turn)
            .field("last_move", &self.last_move)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&render(&self.heaps)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Scripted;

    fn scripted(difficulty: Difficulty, heaps: &[u32], units: &[f64]) -> Match {
        Match::with_dice(difficulty, heaps.to_vec(), Box::new(Scripted::new(units.iter().copied(), []))).unwrap()
    }

    #[test]
    fn first_player_thresholds() {
        // [1,3,5,7] is balanced, [1,3,5,6] is not
        assert!(!scripted(Difficulty::Hard, &[1, 3, 5, 7], &[0.29]).player_turn());
        assert!(scripted(Difficulty::Hard, &[1, 3, 5, 7], &[0.30]).player_turn());
        assert!(!scripted(Difficulty::Hard, &[1, 3, 5, 6], &[0.70]).player_turn());
        assert!(scripted(Difficulty::Hard, &[1, 3, 5, 6], &[0.71]).player_turn());
        assert!(!scripted(Difficulty::Simple, &[1, 3, 5, 7], &[0.74]).player_turn());
        assert!(scripted(Difficulty::Simple, &[1, 3, 5, 7], &[0.75]).player_turn());
        assert!(!scripted(Difficulty::Simple, &[1, 3, 5, 6], &[0.25]).player_turn());
        assert!(scripted(Difficulty::Simple, &[1, 3, 5, 6], &[0.26]).player_turn());
    }

    #[test]
    fn simple_mode_mistakes_on_high_draw() {
        // opening draw 0.0 hands the move to the computer, second draw decides the blunder
        let mut m = scripted(Difficulty::Simple, &[1, 3, 5, 6], &[0.0, 0.5]);
        m.computer_move().unwrap();
        assert_eq!(m.last_move().map(|mv| mv.amount_taken), Some(1));
        assert_eq!(m.heaps(), &[0, 3, 5, 6]);

        let mut m = scripted(Difficulty::Simple, &[1, 3, 5, 6], &[0.0, 0.1]);
        m.computer_move().unwrap();
        assert!(m.is_balanced());
    }

    #[test]
    fn render_tallies_each_heap() {
        assert_eq!(render(&[0, 2, 3]), "0:0 \t \n1:2 \t ||\n2:3 \t |||");
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Simple".parse::<Difficulty>().unwrap(), Difficulty::Simple);
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn validate_rejects_negative_and_empty() {
        assert_eq!(validate_heaps(&[1, 0, 4]).unwrap(), vec![1, 0, 4]);
        assert!(matches!(validate_heaps(&[]), Err(NimError::InvalidConfiguration(_))));
        assert!(matches!(validate_heaps(&[3, -1]), Err(NimError::InvalidConfiguration(_))));
        assert!(matches!(validate_heaps(&[i64::from(u32::MAX) + 1]), Err(NimError::InvalidConfiguration(_))));
    }

    #[test]
    fn json_heaps_reject_floats_and_strings() {
        let ok: Vec<serde_json::Value> = serde_json::from_str("[1, 3, 5]").unwrap();
        assert_eq!(heaps_from_json(&ok).unwrap(), vec![1, 3, 5]);
        let float: Vec<serde_json::Value> = serde_json::from_str("[1, 2.5]").unwrap();
        assert!(heaps_from_json(&float).is_err());
        let text: Vec<serde_json::Value> = serde_json::from_str("[1, \"2\"]").unwrap();
        assert!(heaps_from_json(&text).is_err());
    }
}
