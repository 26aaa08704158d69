//! # Comment Threads
//!
//! Each post owns one [`CommentThread`]: the ordered comment list plus the
//! in-progress draft. Comments carry a stable [`CommentId`] assigned at
//! submission, so two comments with the same text stay distinct.
//!
//! ```text
//! update_draft("Great post!")   draft = "Great post!", can_submit() = true
//! submit_comment(author, now)   comments += [#1 "Great post!"], draft = ""
//! like_comment(#1)              #1.likes = 1
//! delete_comment(#1)            comments = []
//! ```

use std::fmt;

use chrono::NaiveDateTime;
use log::{debug, warn};

use crate::core::feed::Author;

/// Opaque comment identifier, unique within its thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommentId(u64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Submission attempted with an empty draft.
    Required,
}

impl ValidationError {
    /// User-facing message shown next to the comment form.
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::Required => "Esse campo é obrigatório",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub author: Author,
    pub text: String,
    pub created_at: NaiveDateTime,
    /// Only ever increases, and only through [`Comment::like`].
    likes: u32,
}

impl Comment {
    pub fn likes(&self) -> u32 {
        self.likes
    }

    pub fn like(&mut self) -> u32 {
        self.likes = self.likes.saturating_add(1);
        self.likes
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommentThread {
    comments: Vec<Comment>,
    pub draft: String,
    /// Pending "required field" signal, cleared by the next draft edit.
    pub validation: Option<ValidationError>,
    next_id: u64,
}

impl CommentThread {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn get(&self, id: CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    /// Comments that should be drawn. Empty text never reaches the screen.
    pub fn visible_comments(&self) -> impl Iterator<Item = &Comment> {
        self.comments.iter().filter(|c| !c.text.is_empty())
    }

    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        self.validation = None;
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        !self.draft.is_empty()
    }

    /// Append the current draft as a new comment and clear the draft.
    pub fn submit_comment(
        &mut self,
        author: &Author,
        now: NaiveDateTime,
    ) -> Result<CommentId, ValidationError> {
        if !self.can_submit() {
            warn!("Rejected empty comment submission");
            self.validation = Some(ValidationError::Required);
            return Err(ValidationError::Required);
        }

        self.next_id += 1;
        let id = CommentId(self.next_id);
        let text = std::mem::take(&mut self.draft);
        debug!("Comment {} submitted ({} bytes)", id, text.len());
        self.comments.push(Comment {
            id,
            author: author.clone(),
            text,
            created_at: now,
            likes: 0,
        });
        self.validation = None;
        Ok(id)
    }

    /// Remove one comment by id. Returns `false` if it was not there.
    pub fn delete_comment(&mut self, id: CommentId) -> bool {
        let before = self.comments.len();
        self.comments.retain(|c| c.id != id);
        let removed = self.comments.len() != before;
        debug!("Delete comment {}: removed={}", id, removed);
        removed
    }

    /// Remove every comment whose text equals `text`.
    pub fn delete_comments_with_text(&mut self, text: &str) -> usize {
        let before = self.comments.len();
        self.comments.retain(|c| c.text != text);
        before - self.comments.len()
    }

    pub fn like_comment(&mut self, id: CommentId) -> Option<u32> {
        let comment = self.comments.iter_mut().find(|c| c.id == id)?;
        let likes = comment.like();
        debug!("Comment {} liked ({} total)", id, likes);
        Some(likes)
    }
}
