//! Filename generation for downloaded media.

use url::Url;

/// Characters removed from titles before they are used in filenames.
const FORBIDDEN_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Maximum title length kept in a filename, in characters.
pub const MAX_TITLE_CHARS: usize = 50;

/// Longest URL extension (without the dot) trusted as a real extension.
const MAX_EXTENSION_LEN: usize = 4;

/// Strip forbidden characters from a title and truncate it.
///
/// Control characters are removed as well. Returns `None` when nothing
/// usable is left.
pub fn sanitize_title(title: &str) -> Option<String> {
    let cleaned: String = title
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c) && !c.is_control())
        .take(MAX_TITLE_CHARS)
        .collect();

    let cleaned = cleaned.trim_end();
    if cleaned.trim().is_empty() || cleaned.trim_matches('.').is_empty() {
        return None;
    }
    Some(cleaned.to_string())
}

/// Build `{title}_{ordinal}{ext}`, or `{stem}_{ordinal}{ext}` without a
/// usable title. `ext` includes the leading dot.
pub fn build_filename(title: Option<&str>, stem: &str, ordinal: u32, ext: &str) -> String {
    match title.and_then(sanitize_title) {
        Some(title) => format!("{}_{}{}", title, ordinal, ext),
        None => format!("{}_{}{}", stem, ordinal, ext),
    }
}

/// Extension of the URL's path, with leading dot and without any query
/// string, if it looks like a real extension.
pub fn extension_from_url(url: &str) -> Option<String> {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next()?.to_string(),
    };

    let filename = path.rsplit('/').next()?;
    let (stem, ext) = filename.rsplit_once('.')?;

    if stem.is_empty()
        || ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }

    Some(format!(".{}", ext.to_ascii_lowercase()))
}

/// Extension for a `Content-Type` value. Anything that is not WebM is
/// saved as MP4.
pub fn extension_from_content_type(content_type: Option<&str>) -> &'static str {
    match content_type {
        Some(ct) if ct.contains("video/mp4") => ".mp4",
        Some(ct) if ct.contains("video/webm") => ".webm",
        _ => ".mp4",
    }
}

/// Extension for a download: the URL's own, else one derived from the
/// response's `Content-Type`.
pub fn file_extension(url: &str, content_type: Option<&str>) -> String {
    extension_from_url(url)
        .unwrap_or_else(|| extension_from_content_type(content_type).to_string())
}
