use chrono::{NaiveDate, NaiveDateTime};
use ignite_feed::core::action::{Action, Effect, update};
use ignite_feed::core::config::{FeedConfig, load_config_from, resolve_with_env};
use ignite_feed::core::datefmt::format_relative;
use ignite_feed::core::feed::{PostId, seed_posts};
use ignite_feed::core::state::App;

// ============================================================================
// Helper Functions
// ============================================================================

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 9, 10)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// App built the way the binary builds it, with no config file and no env.
fn default_app() -> App {
    let resolved = resolve_with_env(&FeedConfig::default(), None, |_| None);
    App::from_config(&resolved)
}

fn write_draft(app: &mut App, post: PostId, text: &str) {
    update(
        app,
        Action::UpdateDraft {
            post,
            text: text.to_string(),
        },
    );
}

fn texts(app: &App, post: PostId) -> Vec<String> {
    app.entry(post)
        .unwrap()
        .thread
        .visible_comments()
        .map(|c| c.text.clone())
        .collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_comment_lifecycle_on_first_post() {
    let mut app = default_app();
    let post = app.feed[0].post.id;

    write_draft(&mut app, post, "Great post!");
    let Effect::CommentPosted(id) = update(&mut app, Action::SubmitComment { post, now: at(11, 0) })
    else {
        panic!("submission should be accepted");
    };
    assert_eq!(texts(&app, post), vec!["Great post!"]);
    assert_eq!(app.entry(post).unwrap().thread.draft, "");

    update(&mut app, Action::LikeComment { post, comment: id });
    update(&mut app, Action::LikeComment { post, comment: id });
    assert_eq!(app.entry(post).unwrap().thread.get(id).unwrap().likes(), 2);
    assert_eq!(app.total_likes(), 2);

    update(&mut app, Action::DeleteComment { post, comment: id });
    assert!(texts(&app, post).is_empty());
    assert_eq!(app.status_message, "Comentário deletado");
}

#[test]
fn test_rejected_submit_then_recovery() {
    let mut app = default_app();
    let post = app.feed[1].post.id;

    let effect = update(&mut app, Action::SubmitComment { post, now: at(11, 0) });
    assert!(matches!(effect, Effect::Rejected(_)));
    assert_eq!(app.status_message, "Esse campo é obrigatório");
    assert!(app.entry(post).unwrap().thread.validation.is_some());

    write_draft(&mut app, post, "agora sim");
    assert!(app.entry(post).unwrap().thread.validation.is_none());
    let effect = update(&mut app, Action::SubmitComment { post, now: at(11, 0) });
    assert!(matches!(effect, Effect::CommentPosted(_)));
    assert_eq!(texts(&app, post), vec!["agora sim"]);
}

#[test]
fn test_duplicate_texts_are_deleted_individually() {
    let mut app = default_app();
    let post = app.feed[0].post.id;

    let mut ids = Vec::new();
    for _ in 0..2 {
        write_draft(&mut app, post, "same");
        if let Effect::CommentPosted(id) =
            update(&mut app, Action::SubmitComment { post, now: at(10, 0) })
        {
            ids.push(id);
        }
    }
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);

    update(&mut app, Action::LikeComment { post, comment: ids[1] });
    update(&mut app, Action::DeleteComment { post, comment: ids[0] });

    let thread = &app.entry(post).unwrap().thread;
    assert_eq!(thread.comments().len(), 1);
    assert_eq!(thread.comments()[0].id, ids[1]);
    assert_eq!(thread.comments()[0].likes(), 1);
}

#[test]
fn test_threads_do_not_leak_between_posts() {
    let mut app = default_app();
    let first = app.feed[0].post.id;
    let second = app.feed[1].post.id;

    write_draft(&mut app, first, "only here");
    update(&mut app, Action::SubmitComment { post: first, now: at(10, 0) });
    write_draft(&mut app, second, "pending");

    assert_eq!(texts(&app, first), vec!["only here"]);
    assert!(texts(&app, second).is_empty());
    assert_eq!(app.entry(second).unwrap().thread.draft, "pending");
    assert_eq!(app.entry(first).unwrap().thread.draft, "");
}

#[test]
fn test_comment_time_reads_relative_to_now() {
    let mut app = default_app();
    let post = app.feed[0].post.id;
    write_draft(&mut app, post, "olá");
    update(&mut app, Action::SubmitComment { post, now: at(10, 0) });

    let created = app.entry(post).unwrap().thread.comments()[0].created_at;
    assert_eq!(format_relative(created, at(10, 0)), "há menos de um minuto");
    assert_eq!(format_relative(created, at(10, 5)), "há 5 minutos");
}

#[test]
fn test_feed_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[general]
link_host = "gitlab.com"

[[posts]]
id = 7
published_at = "2022-09-12T08:30:00"
link_url = "someone"
author = { name = "Ana Lima", role = "Designer", avatar_url = "https://gitlab.com/ana.png" }
content = [
    { type = "paragraph", content = "Oi!" },
    { type = "link", content = "gitlab/someone" },
]
"#,
    )
    .unwrap();

    let config = load_config_from(&path, false).unwrap();
    let resolved = resolve_with_env(&config, None, |_| None);
    let app = App::from_config(&resolved);

    assert_eq!(app.feed.len(), 1);
    assert_eq!(app.feed[0].post.id, PostId(7));
    assert_eq!(app.feed[0].post.link_target(&app.link_host), "https://gitlab.com/someone");
}

#[test]
fn test_default_feed_is_built_in() {
    let app = default_app();
    let ids: Vec<PostId> = app.feed.iter().map(|e| e.post.id).collect();
    let seed: Vec<PostId> = seed_posts().iter().map(|p| p.id).collect();
    assert_eq!(ids, seed);
    assert!(app.feed.iter().all(|e| e.thread.comments().is_empty()));
}
