// src/models/reaction.rs

use std::str::FromStr;

/// The two reaction types a user can put on a post.
///
/// Stored as the TEXT column `reactions.reaction_type` ('like' or
/// 'dislike'); a missing row means the user has no reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Dislike => "dislike",
        }
    }
}

impl FromStr for ReactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(ReactionKind::Like),
            "dislike" => Ok(ReactionKind::Dislike),
            other => Err(format!("unknown reaction type: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_the_column_representation() {
        for kind in [ReactionKind::Like, ReactionKind::Dislike] {
            assert_eq!(kind.as_str().parse::<ReactionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn rejects_unknown_column_values() {
        assert!("favorite".parse::<ReactionKind>().is_err());
    }
}
