//! Typed records for the relational source of truth.
//!
//! The source reader decodes rows into these structs at the boundary, so a
//! schema mismatch fails in one place instead of surfacing as a bad graph
//! write later.

use serde::{Deserialize, Serialize};

/// A registered user of the social network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub display_name: String,
    pub email: String,
    pub country: Option<String>,
}

/// A post written by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub content: String,
    pub author_id: i64,
}

/// A friendship request between two users.
///
/// Only `Accepted` friendships are ever projected into the graph; `Pending`
/// is a relational-only concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friendship {
    pub id: i64,
    pub requester_id: i64,
    pub receiver_id: i64,
    pub state: FriendshipState,
}

/// Lifecycle state of a friendship request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FriendshipState {
    Pending,
    Accepted,
}

impl FriendshipState {
    /// Parse the state as stored in the relational schema.
    ///
    /// Unknown values decode as `Pending` so they are never projected.
    pub fn from_str(s: &str) -> Self {
        match s {
            "ACCEPTED" => Self::Accepted,
            _ => Self::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
        }
    }
}
