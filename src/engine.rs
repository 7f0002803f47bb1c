// src/engine.rs

//! Reaction Engine: the like/dislike state machine.
//!
//! Each (user, post) pair is in one of three states: no reaction,
//! liked, or disliked (no reaction row = no reaction). Repeating an
//! intent cancels it, the opposite intent switches it in one step.
//! This module only decides transitions; `handlers::reaction` applies
//! them to the database atomically.

use crate::models::reaction::ReactionKind;

/// The outcome of applying a like/dislike intent to the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Reaction row state after the transition. `None` means the row
    /// is removed (or was never created).
    pub next: Option<ReactionKind>,
    pub likes_delta: i32,
    pub dislikes_delta: i32,
    /// Stable outcome message returned to the caller.
    pub message: &'static str,
}

fn delta_for(kind: ReactionKind, amount: i32) -> (i32, i32) {
    match kind {
        ReactionKind::Like => (amount, 0),
        ReactionKind::Dislike => (0, amount),
    }
}

/// Computes the next reaction state and counter deltas for an intent.
///
/// The like and dislike paths are a single symmetric machine; the
/// original implementation spelled them out as two mirrored helpers.
pub fn apply_intent(current: Option<ReactionKind>, intent: ReactionKind) -> Transition {
    match current {
        // NONE -> reacted
        None => {
            let (likes_delta, dislikes_delta) = delta_for(intent, 1);
            Transition {
                next: Some(intent),
                likes_delta,
                dislikes_delta,
                message: match intent {
                    ReactionKind::Like => "Post liked successfully",
                    ReactionKind::Dislike => "Post disliked successfully",
                },
            }
        }
        // Same intent twice -> back to NONE
        Some(existing) if existing == intent => {
            let (likes_delta, dislikes_delta) = delta_for(intent, -1);
            Transition {
                next: None,
                likes_delta,
                dislikes_delta,
                message: match intent {
                    ReactionKind::Like => "Like removed successfully",
                    ReactionKind::Dislike => "Dislike removed successfully",
                },
            }
        }
        // Opposite intent -> switch in one step, never a dual state
        Some(existing) => {
            let (old_likes, old_dislikes) = delta_for(existing, -1);
            let (new_likes, new_dislikes) = delta_for(intent, 1);
            Transition {
                next: Some(intent),
                likes_delta: old_likes + new_likes,
                dislikes_delta: old_dislikes + new_dislikes,
                message: match intent {
                    ReactionKind::Like => {
                        "Reaction changed successfully: Dislike replaced with Like."
                    }
                    ReactionKind::Dislike => {
                        "Reaction changed successfully: Like replaced with Dislike."
                    }
                },
            }
        }
    }
}
