//! Trivia entities

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A trivia question
///
/// `category` holds the category id as text; filters compare it as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub difficulty: i64,
}

/// Fields of a question about to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: String,
    pub difficulty: i64,
}

/// A question category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
}

/// Integer that clients send either as a JSON number or as a numeric string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LooseInt {
    Number(i64),
    Text(String),
}

impl LooseInt {
    /// Integer value, `None` when the text is not a number
    pub fn value(&self) -> Option<i64> {
        match self {
            LooseInt::Number(n) => Some(*n),
            LooseInt::Text(s) => s.trim().parse().ok(),
        }
    }

    /// True for an empty or whitespace-only string
    pub fn is_blank(&self) -> bool {
        matches!(self, LooseInt::Text(s) if s.trim().is_empty())
    }
}
