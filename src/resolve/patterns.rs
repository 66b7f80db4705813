//! Text patterns used to pull IDs, tokens and media URLs out of URLs and
//! markup.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Access token embedded in the site's JavaScript, tried in order.
static TOKEN_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"accessToken:"([^"]+)""#,
        r#"token:"([^"]+)""#,
        r#""token":"([^"]+)""#,
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Direct media URLs in a watch page, tried in order.
static MEDIA_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"(https://\w+\.redgifs\.com/\w+\.mp4)"#,
        r#"(https://\w+\.redgifs\.com/\w+-mobile\.mp4)"#,
        r#"source src="(https://[^"]+\.mp4)""#,
        r#""contentUrl": "(https://[^"]+\.mp4)""#,
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// First hosted-GIF link in free text.
static SELFTEXT_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://(?:www\.)?redgifs\.com/\S+").unwrap());

/// Extract the media ID from a watch page URL: the last non-empty path
/// segment, so `/watch/<id>`, `/ifr/<id>` and `/<id>` all work.
pub fn extract_media_id(page_url: &str) -> Option<String> {
    let url = Url::parse(page_url).ok()?;
    let segment = url
        .path_segments()?
        .filter(|s| !s.is_empty())
        .last()?
        .to_string();

    match segment.as_str() {
        "watch" | "ifr" => None,
        _ => Some(segment),
    }
}

/// First access token found in homepage markup.
pub fn find_access_token(html: &str) -> Option<String> {
    TOKEN_PATTERNS
        .iter()
        .find_map(|re| re.captures(html))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// First direct media URL found in page markup. Patterns are tried in
/// order; the first pattern with any match wins.
pub fn find_media_url(html: &str) -> Option<String> {
    MEDIA_PATTERNS
        .iter()
        .find_map(|re| re.captures(html))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// First hosted-GIF link in a post body, without trailing markdown
/// punctuation.
pub fn find_selftext_link(selftext: &str) -> Option<String> {
    let found = SELFTEXT_LINK.find(selftext)?.as_str();
    let trimmed = found.trim_end_matches(|c| matches!(c, ')' | ']' | '.' | ',' | '>' | '"' | '\''));
    Some(trimmed.to_string())
}

/// Fill each `{id}` template with the media ID.
pub fn mirror_urls(templates: &[String], id: &str) -> Vec<String> {
    templates.iter().map(|t| t.replace("{id}", id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_media_id_shapes() {
        assert_eq!(
            extract_media_id("https://www.redgifs.com/watch/happyblueduck").as_deref(),
            Some("happyblueduck")
        );
        assert_eq!(
            extract_media_id("https://www.redgifs.com/ifr/happyblueduck").as_deref(),
            Some("happyblueduck")
        );
        assert_eq!(
            extract_media_id("https://gifdeliverynetwork.com/happyblueduck").as_deref(),
            Some("happyblueduck")
        );
        assert_eq!(
            extract_media_id("https://www.redgifs.com/watch/happyblueduck/?utm=x").as_deref(),
            Some("happyblueduck")
        );
    }

    #[test]
    fn test_extract_media_id_missing() {
        assert_eq!(extract_media_id("https://www.redgifs.com/"), None);
        assert_eq!(extract_media_id("https://www.redgifs.com/watch/"), None);
        assert_eq!(extract_media_id("not a url"), None);
    }

    #[test]
    fn test_find_access_token_order() {
        let html = r#"x={token:"second"};y={accessToken:"first"}"#;
        assert_eq!(find_access_token(html).as_deref(), Some("first"));

        let json = r#"{"token":"third"}"#;
        assert_eq!(find_access_token(json).as_deref(), Some("third"));

        assert_eq!(find_access_token("<html></html>"), None);
    }

    #[test]
    fn test_find_media_url_pattern_priority() {
        let html = r#"
            <video><source src="https://cdn.example.com/clip.mp4"></video>
            <a href="https://thumbs2.redgifs.com/HappyBlueDuck.mp4">x</a>
        "#;
        assert_eq!(
            find_media_url(html).as_deref(),
            Some("https://thumbs2.redgifs.com/HappyBlueDuck.mp4")
        );

        let ld = r#"{"contentUrl": "https://cdn.example.com/ld.mp4"}"#;
        assert_eq!(
            find_media_url(ld).as_deref(),
            Some("https://cdn.example.com/ld.mp4")
        );

        assert_eq!(find_media_url("no media here"), None);
    }

    #[test]
    fn test_find_selftext_link_trims_markdown() {
        let text = "Full video [here](https://www.redgifs.com/watch/happyblueduck). Enjoy";
        assert_eq!(
            find_selftext_link(text).as_deref(),
            Some("https://www.redgifs.com/watch/happyblueduck")
        );
        assert_eq!(find_selftext_link("nothing"), None);
    }

    #[test]
    fn test_mirror_urls() {
        let templates = vec![
            "https://thumbs.redgifs.com/{id}.mp4".to_string(),
            "https://thumbs.redgifs.com/{id}-mobile.mp4".to_string(),
        ];
        assert_eq!(
            mirror_urls(&templates, "abc"),
            vec![
                "https://thumbs.redgifs.com/abc.mp4",
                "https://thumbs.redgifs.com/abc-mobile.mp4"
            ]
        );
    }
}
