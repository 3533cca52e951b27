//! Like/dislike votes and the toggle rule that governs them.

use serde::{Deserialize, Serialize};

/// A user's vote on a post. `status` is `true` for a like, `false` for a dislike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub status: bool,
}

/// A requested vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewLike {
    pub user_id: i64,
    pub post_id: i64,
    pub status: bool,
}

/// Vote state of one `(user, post)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteState {
    Absent,
    Liked,
    Disliked,
}

impl VoteState {
    pub fn from_status(status: Option<bool>) -> Self {
        match status {
            None => Self::Absent,
            Some(true) => Self::Liked,
            Some(false) => Self::Disliked,
        }
    }
}

/// What a toggle must do to the stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    /// No row yet: insert one with the requested status.
    Insert,
    /// Same vote submitted again: retract it.
    Delete,
    /// Opposite vote: flip the status in place.
    Update,
}

impl ToggleAction {
    /// Decide the transition from the stored status (if any) to the requested one.
    /// There is no no-op path: a repeated identical vote always retracts.
    pub fn decide(existing: Option<bool>, desired: bool) -> Self {
        match existing {
            None => Self::Insert,
            Some(current) if current == desired => Self::Delete,
            Some(_) => Self::Update,
        }
    }

    /// State of the pair once this action has been applied.
    pub fn resulting_state(self, desired: bool) -> VoteState {
        match self {
            Self::Delete => VoteState::Absent,
            Self::Insert | Self::Update => VoteState::from_status(Some(desired)),
        }
    }
}

/// Outcome of a toggle: the row that was touched and where the pair ended up.
///
/// After a retraction `like` describes the deleted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeVote {
    pub like: Like,
    pub state: VoteState,
}

/// Fresh like/dislike tallies for a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeCounts {
    pub likes: i64,
    pub dislikes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_inserts() {
        assert_eq!(ToggleAction::decide(None, true), ToggleAction::Insert);
        assert_eq!(ToggleAction::decide(None, false), ToggleAction::Insert);
    }

    #[test]
    fn same_vote_retracts() {
        assert_eq!(ToggleAction::decide(Some(true), true), ToggleAction::Delete);
        assert_eq!(ToggleAction::decide(Some(false), false), ToggleAction::Delete);
    }

    #[test]
    fn opposite_vote_flips() {
        assert_eq!(ToggleAction::decide(Some(true), false), ToggleAction::Update);
        assert_eq!(ToggleAction::decide(Some(false), true), ToggleAction::Update);
    }

    #[test]
    fn resulting_states() {
        assert_eq!(ToggleAction::Insert.resulting_state(true), VoteState::Liked);
        assert_eq!(ToggleAction::Update.resulting_state(false), VoteState::Disliked);
        assert_eq!(ToggleAction::Delete.resulting_state(true), VoteState::Absent);
    }
}
