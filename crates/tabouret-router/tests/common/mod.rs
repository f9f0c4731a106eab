#![allow(dead_code)]

use tabouret_router::{Params, RouteTable, UrlGenerator};

/// The two-route table used throughout the round-trip tests.
pub fn blog_routes() -> RouteTable {
    RouteTable::from_triples([
        ("home", "^$", "main.site.index"),
        ("post", "^posts/(?P<slug>[-_a-z0-9а-я]+)$", "blog.posts.show"),
    ])
    .unwrap_or_else(|e| panic!("Failed to build routes: {e}"))
}

pub fn params(pairs: &[(&str, &str)]) -> Params {
    pairs.iter().copied().collect()
}

pub fn url(routes: &RouteTable, name: &str, pairs: &[(&str, &str)]) -> String {
    UrlGenerator::new(routes, "/")
        .url(name, &params(pairs))
        .unwrap_or_else(|e| panic!("Failed to generate {name}: {e}"))
}
