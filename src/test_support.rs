//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use chrono::{NaiveDate, NaiveDateTime};

use crate::core::feed::{Author, seed_posts};
use crate::core::state::App;

/// Fixed "current time": two hours after the first seed post.
pub fn test_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 9, 10)
        .unwrap()
        .and_hms_opt(11, 0, 0)
        .unwrap()
}

pub fn test_author() -> Author {
    Author {
        avatar_url: "https://github.com/tester.png".to_string(),
        name: "Test User".to_string(),
        role: "Tester".to_string(),
    }
}

/// Creates a test App over the built-in feed.
pub fn test_app() -> App {
    App::new(seed_posts(), test_author(), "github.com".to_string())
}
