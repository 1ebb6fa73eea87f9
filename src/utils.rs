use std::path::Path;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a `file://` path. Separators stay readable.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Builds a `file://` URI for a local path, the object reference handed to the
/// preview for a user-selected image.
pub fn local_file_uri(path: &Path) -> String {
    // Windows separators become forward slashes, and drive paths gain the extra root slash.
    let p_str = path.to_string_lossy().replace('\\', "/");
    let p_str = if p_str.starts_with('/') {
        p_str
    } else {
        format!("/{}", p_str)
    };
    format!("file://{}", utf8_percent_encode(&p_str, PATH_SEGMENT))
}

/// Appends a cache-busting `random` query parameter to a URL.
pub fn cache_busted_url(url: &str, token: u64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}random={}", url, separator, token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_paths_gain_root_slash() {
        let uri = local_file_uri(Path::new("C:\\Users\\ad\\photo.jpg"));
        assert_eq!(uri, "file:///C:/Users/ad/photo.jpg");
    }

    #[test]
    fn test_cache_bust_respects_existing_query() {
        assert_eq!(cache_busted_url("https://cdn.test/mask.png", 7), "https://cdn.test/mask.png?random=7");
        assert_eq!(cache_busted_url("https://cdn.test/mask.png?v=2", 7), "https://cdn.test/mask.png?v=2&random=7");
    }
}
