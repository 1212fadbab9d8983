//! Link navigability
//!
//! Only URLs the browser can render may become tab content. Schemes handed
//! off to other applications never open a tab.

use url::Url;

use crate::error::TabError;
use crate::Result;

const EXTERNAL_SCHEMES: &[&str] = &["tel", "sms", "mailto", "geo"];

pub fn validate(url: &str) -> Result<()> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(TabError::InvalidUrl("URL cannot be empty".to_string()));
    }

    let parsed = Url::parse(trimmed).map_err(|e| TabError::InvalidUrl(format!("{url}: {e}")))?;

    if EXTERNAL_SCHEMES.contains(&parsed.scheme()) {
        return Err(TabError::InvalidUrl(format!(
            "{} links are not navigable",
            parsed.scheme()
        )));
    }

    Ok(())
}

/// Default navigability predicate used by the tab store
pub fn is_navigable(url: &str) -> bool {
    validate(url).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigable_urls() {
        assert!(is_navigable("https://a.test"));
        assert!(is_navigable("http://localhost:8080/path?q=1"));
        assert!(is_navigable("about:blank"));
        assert!(is_navigable("file:///home/user/page.html"));
    }

    #[test]
    fn test_rejected_urls() {
        assert!(!is_navigable(""));
        assert!(!is_navigable("   "));
        assert!(!is_navigable("not a url"));
        assert!(!is_navigable("tel:+358401234567"));
        assert!(!is_navigable("mailto:someone@example.com"));
        assert!(!is_navigable("sms:12345"));
        assert!(!is_navigable("geo:60.17,24.94"));
    }
}
