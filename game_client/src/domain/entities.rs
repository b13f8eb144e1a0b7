// Domain-level entities mirrored from the server: users, games, and board cells.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::hash::{Hash, Hasher};

pub const BOARD_CELLS: usize = 9;

/// Index of a game inside the `games` slot.
pub type GameId = usize;

pub type Board = [Cell; BOARD_CELLS];

/// Server-assigned user identifier.
///
/// Ids arrive as JSON numbers or strings. Two ids are equal when their text forms match,
/// so `1` and `"1"` name the same user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(number) => write!(f, "{number}"),
            UserId::Text(text) => f.write_str(text),
        }
    }
}

impl PartialEq for UserId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (UserId::Number(a), UserId::Number(b)) => a == b,
            (UserId::Text(a), UserId::Text(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl Eq for UserId {}

impl Hash for UserId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        UserId::Number(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        UserId::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Player1,
    Player2,
}

impl Cell {
    fn from_wire(raw: &Value) -> Option<Self> {
        match raw {
            Value::Null => Some(Cell::Empty),
            Value::String(mark) => match mark.trim() {
                "" => Some(Cell::Empty),
                "X" | "x" => Some(Cell::Player1),
                "O" | "o" => Some(Cell::Player2),
                _ => None,
            },
            Value::Number(number) => match number.as_u64() {
                Some(0) => Some(Cell::Empty),
                Some(1) => Some(Cell::Player1),
                Some(2) => Some(Cell::Player2),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn mark(&self) -> Option<char> {
        match self {
            Cell::Empty => None,
            Cell::Player1 => Some('X'),
            Cell::Player2 => Some('O'),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.mark() {
            Some(mark) => serializer.serialize_str(mark.encode_utf8(&mut [0; 4])),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Cell::from_wire(&raw)
            .ok_or_else(|| de::Error::custom(format!("unrecognized cell value: {raw}")))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    #[default]
    None,
    Win,
    Draw,
}

impl GameResult {
    /// Terminal games accept no further moves server-side.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameResult::None)
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameResult::None => "none",
            GameResult::Win => "win",
            GameResult::Draw => "draw",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub player1: UserId,
    pub player2: UserId,
    pub turn: UserId,
    pub board: Board,
    #[serde(default, deserialize_with = "result_or_none")]
    pub result: GameResult,
}

// A null result is treated the same as a missing one.
fn result_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GameResult, D::Error> {
    Ok(Option::<GameResult>::deserialize(deserializer)?.unwrap_or_default())
}
