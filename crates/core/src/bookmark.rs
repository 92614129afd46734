//! Bookmark content rules.

/// A bookmark must carry a URL, a quote, or both.
pub fn validate_content(url: Option<&str>, quote: Option<&str>) -> Result<(), String> {
    let has = |v: Option<&str>| v.is_some_and(|s| !s.trim().is_empty());
    if has(url) || has(quote) {
        Ok(())
    } else {
        Err("A bookmark needs a url or a quote".to_string())
    }
}

/// Only web links can be bookmarked.
pub fn validate_url(url: &str) -> Result<(), String> {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(format!("Invalid url '{url}'. Must start with http:// or https://"))
    }
}

/// Trim an optional url, treating a blank one as absent, and check its scheme.
pub fn normalize_url(url: Option<String>) -> Result<Option<String>, String> {
    match url.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(url) => validate_url(url).map(|()| Some(url.to_string())),
    }
}
