//! # Feed Data
//!
//! Posts, authors and content blocks. Everything here is immutable once the
//! feed has been built at startup; per-post mutable state lives in
//! [`CommentThread`](crate::core::comments::CommentThread).
//!
//! ```text
//! Post
//! ├── id: PostId              // caller-assigned, unique within the feed
//! ├── author: Author          // value semantics, embedded
//! ├── content: Vec<ContentBlock>
//! ├── published_at: NaiveDateTime
//! └── link_url: String        // path segment appended to the link host
//! ```

use std::collections::HashSet;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use log::warn;
use serde::{Deserialize, Serialize};

/// Host used to build link targets when nothing else is configured.
pub const DEFAULT_LINK_HOST: &str = "github.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub avatar_url: String,
    pub name: String,
    pub role: String,
}

/// One displayable unit of a post body.
///
/// Serialized in the `{ type = "paragraph", content = "..." }` shape. Any
/// other `type` becomes [`ContentBlock::Unknown`], which renders nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Paragraph {
        #[serde(rename = "content")]
        text: String,
    },
    /// Outbound link. The target comes from the owning post's `link_url`.
    Link {
        #[serde(rename = "content")]
        label: String,
    },
    #[serde(other)]
    Unknown,
}

/// What a content block turns into once the owning post is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedBlock<'a> {
    Paragraph(&'a str),
    Link { label: &'a str, target: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author: Author,
    pub content: Vec<ContentBlock>,
    pub published_at: NaiveDateTime,
    pub link_url: String,
}

impl Post {
    /// Target of every link block in this post.
    pub fn link_target(&self, link_host: &str) -> String {
        format!("https://{}/{}", link_host, self.link_url)
    }

    /// Dispatch content blocks by kind. Unknown kinds are dropped.
    pub fn rendered_blocks(&self, link_host: &str) -> Vec<RenderedBlock<'_>> {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Paragraph { text } => Some(RenderedBlock::Paragraph(text)),
                ContentBlock::Link { label } => Some(RenderedBlock::Link {
                    label,
                    target: self.link_target(link_host),
                }),
                ContentBlock::Unknown => None,
            })
            .collect()
    }
}

/// Log a warning for every post id that appears more than once.
///
/// Duplicates are not rejected; the feed still renders in the given order.
pub fn warn_duplicate_ids(posts: &[Post]) -> usize {
    let mut seen = HashSet::new();
    let mut duplicates = 0;
    for post in posts {
        if !seen.insert(post.id) {
            warn!("Duplicate post id {} in feed", post.id);
            duplicates += 1;
        }
    }
    duplicates
}

fn at_nine(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap_or_default()
}

const INTRO: &str = "Fala galeraa 👋";
const ANNOUNCEMENT: &str = "Acabei de subir mais um projeto no meu portifa. É um projeto que fiz \
    no NLW Return, evento da Rocketseat. O nome do projeto é DoctorCare 🚀";

/// The built-in feed used when the config file does not provide posts.
pub fn seed_posts() -> Vec<Post> {
    vec![
        Post {
            id: PostId(1),
            author: Author {
                avatar_url: "https://github.com/leohb07.png".to_string(),
                name: "Leonardo Barrocal".to_string(),
                role: "Desenvolvedor".to_string(),
            },
            content: vec![
                ContentBlock::Paragraph { text: INTRO.to_string() },
                ContentBlock::Paragraph { text: ANNOUNCEMENT.to_string() },
                ContentBlock::Link { label: "github/leohb07".to_string() },
            ],
            published_at: at_nine(2022, 9, 10),
            link_url: "leohb07".to_string(),
        },
        Post {
            id: PostId(2),
            author: Author {
                avatar_url: "https://github.com/diego3g.png".to_string(),
                name: "Diego Fernandes".to_string(),
                role: "CTO @Rocketseat".to_string(),
            },
            content: vec![
                ContentBlock::Paragraph { text: INTRO.to_string() },
                ContentBlock::Paragraph { text: ANNOUNCEMENT.to_string() },
                ContentBlock::Link { label: "github/diego3g".to_string() },
            ],
            published_at: at_nine(2022, 9, 11),
            link_url: "diego3g".to_string(),
        },
    ]
}
