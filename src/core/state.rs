//! # Application State
//!
//! Core business state for the feed. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── feed: Vec<FeedEntry>         // display order
//! │   ├── post: Post               // immutable, from config
//! │   └── thread: CommentThread    // comments + draft for that post
//! ├── profile: Author              // signed-in user, authors new comments
//! ├── link_host: String            // host for link blocks
//! └── status_message: String       // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::core::comments::CommentThread;
use crate::core::config::ResolvedConfig;
use crate::core::feed::{Author, Post, PostId, warn_duplicate_ids};

/// One post and the comment state it owns.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub post: Post,
    pub thread: CommentThread,
}

pub struct App {
    pub feed: Vec<FeedEntry>,
    pub profile: Author,
    pub link_host: String,
    pub status_message: String,
}

impl App {
    pub fn new(posts: Vec<Post>, profile: Author, link_host: String) -> Self {
        warn_duplicate_ids(&posts);
        let feed = posts
            .into_iter()
            .map(|post| FeedEntry {
                post,
                thread: CommentThread::new(),
            })
            .collect();
        Self {
            feed,
            profile,
            link_host,
            status_message: String::from("Bem-vindo ao Ignite Feed!"),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            config.posts.clone(),
            config.profile.clone(),
            config.link_host.clone(),
        )
    }

    pub fn entry(&self, id: PostId) -> Option<&FeedEntry> {
        self.feed.iter().find(|entry| entry.post.id == id)
    }

    pub fn thread_mut(&mut self, id: PostId) -> Option<&mut CommentThread> {
        self.feed
            .iter_mut()
            .find(|entry| entry.post.id == id)
            .map(|entry| &mut entry.thread)
    }

    /// Total likes across every comment in the feed.
    pub fn total_likes(&self) -> u64 {
        self.feed
            .iter()
            .flat_map(|entry| entry.thread.comments())
            .map(|comment| u64::from(comment.likes()))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::feed::PostId;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.feed.len(), 2);
        assert_eq!(app.status_message, "Bem-vindo ao Ignite Feed!");
        assert_eq!(app.link_host, "github.com");
        assert!(app.feed.iter().all(|e| e.thread.comments().is_empty()));
        assert_eq!(app.total_likes(), 0);
    }

    #[test]
    fn test_lookup_by_post_id() {
        let mut app = test_app();
        assert_eq!(app.entry(PostId(2)).map(|e| e.post.id), Some(PostId(2)));
        assert!(app.entry(PostId(99)).is_none());
        assert!(app.thread_mut(PostId(99)).is_none());
    }
}
