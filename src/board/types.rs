//! Board action payload types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Board operation understood by the automation webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    CreateBoard,
    JoinBoard,
    AddItem,
    GetBoard,
}

impl Action {
    /// Every action, in wire order.
    pub const ALL: [Action; 4] = [
        Action::CreateBoard,
        Action::JoinBoard,
        Action::AddItem,
        Action::GetBoard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::CreateBoard => "create_board",
            Action::JoinBoard => "join_board",
            Action::AddItem => "add_item",
            Action::GetBoard => "get_board",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown board action `{0}`")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// A validated board action, forwarded to the webhook as JSON.
///
/// Only built by [`crate::board::validate`]. Absent optional fields stay
/// absent on the wire, and `target_price` keeps the number exactly as received.
#[derive(Clone, PartialEq, Serialize)]
pub struct ActionRequest {
    pub action: Action,
    pub username: String,
    pub pin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_price: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl fmt::Debug for ActionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRequest")
            .field("action", &self.action)
            .field("username", &self.username)
            .field("pin", &"<redacted>")
            .field("board_code", &self.board_code)
            .field("board_name", &self.board_name)
            .field("item_name", &self.item_name)
            .field("target_price", &self.target_price)
            .field("start_date", &self.start_date)
            .field("end_date", &self.end_date)
            .finish()
    }
}
