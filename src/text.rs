const TRUNCATION_SUFFIX: &str = " [...]";
// Only one of these is ever stripped, and only from the end of the first line.
const TRAILING_CHARS: [char; 6] = ['\n', ',', ' ', '\r', '[', ']'];
const AVATAR_SIZE: u32 = 18;

/// Reduce a (possibly multi-line) body to its first line.
///
/// A single trailing character from [`TRAILING_CHARS`] is dropped, and
/// `" [...]"` is appended whenever the result no longer equals the whole
/// input. Empty input comes back unchanged.
pub fn preview(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut line = text.split('\n').next().unwrap_or_default();
    if let Some(last) = line.chars().last() {
        if TRAILING_CHARS.contains(&last) {
            line = &line[..line.len() - last.len_utf8()];
        }
    }

    if line == text {
        line.to_string()
    } else {
        format!("{line}{TRUNCATION_SUFFIX}")
    }
}

/// Markdown link to a user, optionally preceded by an inline avatar image.
pub fn user_link(name: &str, url: &str, avatar: &str, show_avatars: bool) -> String {
    if show_avatars {
        format!("![]({avatar}) [{name}]({url})")
    } else {
        format!("[{name}]({url})")
    }
}

/// Ask GitHub for an 18px rendition of an avatar.
pub fn sized_avatar(avatar_url: &str) -> String {
    let separator = if avatar_url.contains('?') { '&' } else { '?' };
    format!("{avatar_url}{separator}s={AVATAR_SIZE}")
}
