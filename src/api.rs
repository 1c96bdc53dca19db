//! HTTP-verb routing on the API root, independent of the transport.
//!
//! `POST` starts (or restarts) a match, `GET` reports its status, `PUT`
//! applies a player move followed by the computer's reply and `DELETE`
//! discards the match. Any other `GET` falls back to the README.

use log::{debug, info};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::Config;
use crate::dice::{Dice, SystemDice};
use crate::error::NimError;
use crate::game::{Difficulty, Match, Side};
use crate::slot::MatchSlot;

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Markdown(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: Body,
}

impl Reply {
    pub fn ok(body: Value) -> Self { Self { status: 200, body: Body::Json(body) } }

    pub fn error(status: u16, error: &str, message: impl Into<String>) -> Self {
        Self { status, body: Body::Json(json!({ "error": error, "message": message.into() })) }
    }

    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            Body::Json(v) => Some(v),
            Body::Markdown(_) => None,
        }
    }
}

#[derive(Deserialize, Default)]
struct StartRequest {
    mode: Option<String>,
}

#[derive(Deserialize)]
struct MoveRequest {
    #[serde(alias = "row")]
    heap: Option<Value>,
    #[serde(alias = "take")]
    amount: Option<Value>,
}

type DiceFactory = Box<dyn FnMut() -> Box<dyn Dice> + Send>;

pub struct GameController {
    api_root: String,
    start_situation: Vec<u32>,
    slot: MatchSlot,
    new_dice: DiceFactory,
    readme: Option<String>,
}

impl GameController {
    pub fn new(config: &Config) -> Self {
        Self {
            api_root: config.api_root.clone(),
            start_situation: config.start_situation.clone(),
            slot: MatchSlot::new(),
            new_dice: Box::new(|| Box::new(SystemDice::from_entropy()) as Box<dyn Dice>),
            readme: None,
        }
    }

    /// Source of randomness for every match created from now on.
    pub fn with_dice<F>(mut self, factory: F) -> Self
    where
        F: FnMut() -> Box<dyn Dice> + Send + 'static,
    {
        self.new_dice = Box::new(factory);
        self
    }

    pub fn with_readme(mut self, readme: impl Into<String>) -> Self {
        self.readme = Some(readme.into());
        self
    }

    pub fn slot(&self) -> &MatchSlot { &self.slot }

    pub fn handle(&mut self, method: &str, url: &str, body: &str) -> Reply {
        let path = url.split('?').next().unwrap_or(url);
        if !self.is_api_path(path) {
            return match method {
                "GET" => self.fallback(),
                _ => Reply::error(404, "Not found", format!("No route for {} {}", method, path)),
            };
        }
        match method {
            "POST" => self.start_game(body),
            "GET" => self.get_status(),
            "PUT" => self.put_player_move(body),
            "DELETE" => self.delete_game(),
            _ => Reply::error(405, "Method not allowed", format!("{} is not supported on {}", method, self.api_root)),
        }
    }

    fn is_api_path(&self, path: &str) -> bool {
        let trimmed = path.trim_end_matches('/');
        let root = self.api_root.trim_end_matches('/');
        trimmed == root
    }

    fn fallback(&self) -> Reply {
        match &self.readme {
            Some(text) => Reply { status: 200, body: Body::Markdown(text.clone()) },
            None => Reply::error(404, "Not found", "Nothing to see here"),
        }
    }

    /// Starts a new match no matter if one exists already.
    fn start_game(&mut self, body: &str) -> Reply {
        let req: StartRequest = serde_json::from_str(body).unwrap_or_default();
        let difficulty = match req.mode.as_deref() {
            Some("simple") => Difficulty::Simple,
            _ => Difficulty::Hard,
        };
        info!("Starting new game with mode: {}", difficulty);

        let dice = (self.new_dice)();
        let fresh = match Match::with_dice(difficulty, self.start_situation.clone(), dice) {
            Ok(m) => m,
            Err(e) => return Reply::error(500, "Internal server error", e.to_string()),
        };
        let game = self.slot.replace(fresh);
        if !game.player_turn() && !game.is_over() {
            if let Err(e) = game.computer_move() {
                return Reply::error(500, "Internal server error", e.to_string());
            }
            log_computer_move(game);
        }
        Reply::ok(json!(game.status()))
    }

    fn get_status(&self) -> Reply {
        let game = match self.slot.get() {
            Ok(g) => g,
            Err(_) => return not_found(),
        };
        if game.is_over() { return game_over(game); }
        debug!("Status requested");
        Reply::ok(json!(game.status()))
    }

    fn put_player_move(&mut self, body: &str) -> Reply {
        let game = match self.slot.get_mut() {
            Ok(g) => g,
            Err(_) => return not_found(),
        };
        if game.is_over() { return game_over(game); }

        let (heap, amount) = match serde_json::from_str::<MoveRequest>(body) {
            Ok(MoveRequest { heap: Some(Value::Number(h)), amount: Some(Value::Number(a)) }) => (h, a),
            _ => return Reply::error(400, "Bad request", "Body must contain the numeric attributes heap and amount."),
        };

        let applied = move_args(&heap, &amount).and_then(|(h, a)| game.player_move(h, a).map(|_| (h, a)));
        let (heap, amount) = match applied {
            Ok(v) => v,
            Err(e) => return rejected(game, &e),
        };
        info!("Player takes {} objects from heap {}", amount, heap);

        let status_before = game.status();
        if game.is_over() {
            return Reply::ok(json!({
                "message": "Game over. Player wins",
                "statusBefore": status_before,
                "statusAfter": null,
            }));
        }

        if let Err(e) = game.computer_move() { return rejected(game, &e); }
        log_computer_move(game);

        let message = if game.is_over() { "Computer also moved. Game Over. Computer wins" } else { "Computer also moved" };
        Reply::ok(json!({
            "message": message,
            "statusBefore": status_before,
            "statusNow": game.status(),
        }))
    }

    fn delete_game(&mut self) -> Reply {
        match self.slot.clear() {
            Ok(_) => {
                info!("User deleted the game");
                Reply::ok(json!({ "message": "Game deleted" }))
            }
            Err(_) => not_found(),
        }
    }
}

/// Negative or fractional numbers can never address a heap or fit in one.
fn move_args(heap: &serde_json::Number, amount: &serde_json::Number) -> Result<(usize, u32), NimError> {
    let heap = heap
        .as_u64()
        .and_then(|h| usize::try_from(h).ok())
        .ok_or_else(|| NimError::illegal(format!("heap {} does not exist", heap)))?;
    let amount = amount
        .as_u64()
        .and_then(|a| u32::try_from(a).ok())
        .ok_or_else(|| NimError::illegal(format!("cannot take {} objects", amount)))?;
    Ok((heap, amount))
}

fn log_computer_move(game: &Match) {
    if let Some(m) = game.last_move().filter(|m| !m.is_player_move) {
        info!("Computer takes {} objects from heap {}", m.amount_taken, m.heap_index);
    }
}

fn not_found() -> Reply { Reply::error(404, "Not found", "No game found") }

fn game_over(game: &Match) -> Reply {
    let message = match game.winner() {
        Some(Side::Computer) => "Computer won",
        _ => "You won",
    };
    Reply::error(200, "Game Over", message)
}

fn rejected(game: &Match, err: &NimError) -> Reply {
    Reply {
        status: 400,
        body: Body::Json(json!({
            "message": "Unable to perform move",
            "error": err.to_string(),
            "status": game.status(),
        })),
    }
}
