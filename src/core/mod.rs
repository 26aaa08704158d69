//! # Core Application Logic
//!
//! This module contains the feed's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Feed (posts)         │
//!                    │  • Threads (comments)   │
//!                    │  • Action + update()    │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`feed`]: Posts, authors, content blocks and the built-in feed
//! - [`comments`]: Per-post comment thread (draft, submit, delete, like)
//! - [`state`]: The `App` struct, holding all application state
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`datefmt`]: pt-BR absolute/relative timestamp labels
//! - [`config`]: Layered configuration (file → env → CLI)

pub mod action;
pub mod comments;
pub mod config;
pub mod datefmt;
pub mod feed;
pub mod state;
