//! Request path normalization.
//!
//! Routes are matched against the URN: the request URI with the
//! application's mount path, the query string and a trailing slash
//! removed. Everything here is a pure string transformation so it can be
//! tested without a live request.

use std::borrow::Cow;

const FRONT_SCRIPT: &str = "index.php";

/// Derives the mount path from the front script's own path.
///
/// A trailing `index.php` is dropped; any other script name is already a
/// mount path.
///
/// ```
/// use tabouret_router::urn::mount_path;
///
/// assert_eq!(mount_path("/index.php"), "/");
/// assert_eq!(mount_path("/app/index.php"), "/app/");
/// assert_eq!(mount_path("/"), "/");
/// ```
pub fn mount_path(script_name: &str) -> &str {
    script_name
        .len()
        .checked_sub(FRONT_SCRIPT.len())
        .and_then(|at| {
            script_name
                .get(at..)
                .filter(|tail| tail.eq_ignore_ascii_case(FRONT_SCRIPT))
                .map(|_| &script_name[..at])
        })
        .unwrap_or(script_name)
}

/// Computes the URN used for route matching.
///
/// The raw URI is percent-decoded first, then the mount path prefix, the
/// query string and one trailing slash are stripped.
///
/// ```
/// use tabouret_router::urn::urn;
///
/// assert_eq!(urn("/", "/posts/hello/?page=2"), "posts/hello");
/// assert_eq!(urn("/app/", "/app/"), "");
/// ```
pub fn urn(mount_path: &str, request_uri: &str) -> String {
    let decoded = percent_decode(request_uri);
    let path = strip_prefix_ignore_ascii_case(&decoded, mount_path);
    let path = path.split('?').next().unwrap_or_default();
    let path = path.strip_suffix('/').unwrap_or(path);
    path.to_string()
}

/// Decodes `%XX` escapes and `+`. Invalid UTF-8 is replaced rather than rejected.
fn percent_decode(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['%', '+']) {
        return Cow::Borrowed(raw);
    }
    let spaced = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
}

fn strip_prefix_ignore_ascii_case<'a>(s: &'a str, prefix: &str) -> &'a str {
    match s.get(..prefix.len()) {
        Some(head) if !prefix.is_empty() && head.eq_ignore_ascii_case(prefix) => &s[prefix.len()..],
        _ => s,
    }
}
