//! # Actions
//!
//! Everything that can happen in the feed becomes an `Action`.
//! User types in a comment form? That's `Action::UpdateDraft`.
//! User presses Enter? That's `Action::SubmitComment`.
//!
//! The `update()` function takes the current state and an action,
//! mutates it, and returns an `Effect` telling the adapter what to do next.
//! No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Actions name their post by [`PostId`] and their comment by [`CommentId`],
//! so an action can never touch another post's thread.

use chrono::NaiveDateTime;
use log::{debug, info, warn};

use crate::core::comments::{CommentId, ValidationError};
use crate::core::feed::PostId;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    UpdateDraft { post: PostId, text: String },
    /// `now` becomes the new comment's creation time.
    SubmitComment { post: PostId, now: NaiveDateTime },
    DeleteComment { post: PostId, comment: CommentId },
    LikeComment { post: PostId, comment: CommentId },
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// A comment was appended to the post's thread.
    CommentPosted(CommentId),
    /// The submission was rejected; the thread carries the validation signal.
    Rejected(ValidationError),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Quit => Effect::Quit,
        Action::UpdateDraft { post, text } => {
            if let Some(thread) = app.thread_mut(post) {
                thread.update_draft(text);
            } else {
                warn!("UpdateDraft for unknown post {}", post);
            }
            Effect::None
        }
        Action::SubmitComment { post, now } => {
            let profile = app.profile.clone();
            let Some(thread) = app.thread_mut(post) else {
                warn!("SubmitComment for unknown post {}", post);
                return Effect::None;
            };
            match thread.submit_comment(&profile, now) {
                Ok(id) => {
                    info!("Comment {} posted on post {}", id, post);
                    app.status_message = String::from("Comentário publicado");
                    Effect::CommentPosted(id)
                }
                Err(err) => {
                    app.status_message = err.to_string();
                    Effect::Rejected(err)
                }
            }
        }
        Action::DeleteComment { post, comment } => {
            let removed = app
                .thread_mut(post)
                .is_some_and(|thread| thread.delete_comment(comment));
            if removed {
                app.status_message = String::from("Comentário deletado");
            }
            Effect::None
        }
        Action::LikeComment { post, comment } => {
            if let Some(likes) = app
                .thread_mut(post)
                .and_then(|thread| thread.like_comment(comment))
            {
                app.status_message = format!("Aplausos: {likes}");
            }
            Effect::None
        }
    }
}
