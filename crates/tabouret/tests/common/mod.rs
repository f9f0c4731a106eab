#![allow(dead_code)]

use tabouret::{App, AppConfig, AppError, Response};

pub const BLOG_CONFIG: &str = r#"{
    "error404_action": "main.site.error404",
    "routes": [
        ["home", "^$", "main.site.index"],
        ["posts", "^posts$", "blog.posts.index"],
        ["post", "^posts/(?P<slug>[-_a-z0-9а-я]+)$", "blog.posts.show"],
        ["broken", "^broken$", "blog.posts.broken"],
        ["orphan", "^orphan$", "blog.posts.orphan"]
    ],
    "site": {"title": "Tabouret"}
}"#;

/// The blog application with every target but `blog.posts.orphan` handled.
pub fn blog_app() -> App {
    let config = AppConfig::from_json(BLOG_CONFIG)
        .unwrap_or_else(|e| panic!("Failed to parse config: {e}"));
    let mut app = App::new(config).unwrap_or_else(|e| panic!("Failed to build app: {e}"));
    app.handler("main.site.index", |ctx| {
        let title = ctx.config().get("site").and_then(|s| s["title"].as_str()).unwrap_or("");
        Ok(Response::html(format!("<h1>{title}</h1>")))
    })
    .and_then(|app| {
        app.handler("blog.posts.index", |ctx| {
            let first = ctx.url("post", &[("slug", "first")].into())?;
            Ok(Response::html(format!("<a href=\"{first}\">first</a>")))
        })
    })
    .and_then(|app| {
        app.handler("blog.posts.show", |ctx| {
            let slug = ctx.param("slug").unwrap_or_default();
            Ok(Response::text(slug))
        })
    })
    .and_then(|app| {
        app.handler("blog.posts.broken", |_| Err(AppError::handler("boom")))
    })
    .and_then(|app| {
        app.handler("main.site.error404", |ctx| {
            Ok(Response::text(format!("custom 404: {}", ctx.message().unwrap_or(""))))
        })
    })
    .unwrap_or_else(|e| panic!("Failed to register handlers: {e}"));
    app
}
