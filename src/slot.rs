use crate::error::NimError;
use crate::game::Match;

/// Holds at most one live match. Creating a match drops whatever was there.
#[derive(Debug, Default)]
pub struct MatchSlot {
    current: Option<Match>,
}

impl MatchSlot {
    pub fn new() -> Self { Self { current: None } }

    pub fn replace(&mut self, m: Match) -> &mut Match { self.current.insert(m) }

    pub fn get(&self) -> Result<&Match, NimError> { self.current.as_ref().ok_or(NimError::NoActiveMatch) }

    pub fn get_mut(&mut self) -> Result<&mut Match, NimError> { self.current.as_mut().ok_or(NimError::NoActiveMatch) }

    pub fn clear(&mut self) -> Result<Match, NimError> { self.current.take().ok_or(NimError::NoActiveMatch) }

    pub fn is_empty(&self) -> bool { self.current.is_none() }
}
