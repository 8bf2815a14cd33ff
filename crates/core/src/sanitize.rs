//! Strips script-capable markup from rendered lesson HTML.

use crate::LessonError;
use lol_html::{RewriteStrSettings, element, rewrite_str};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cell::RefCell;

/// Elements removed together with their content.
const BLOCKED_ELEMENTS: &str = "script, style, iframe, object, embed";

/// Attributes whose values are checked for `javascript:` URLs.
const URL_ATTRIBUTES: [&str; 2] = ["href", "src"];

/// Rendered markup after sanitizing, plus a description of everything removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    /// Sanitized markup.
    pub html: String,
    /// One entry per removed element or attribute, in document order.
    pub removed: Vec<String>,
}

/// Any start tag carrying at least one attribute, whatever separates the name from it.
static TAG_WITH_ATTRIBUTES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[A-Za-z][A-Za-z0-9-]*[\s/]+[^\s/>]")
        .unwrap_or_else(|err| panic!("invalid sanitize pattern: {err}"))
});

/// Returns true when `html` contains anything the sanitizer could act on: a blocked
/// element or any tag with attributes.
///
/// Markup produced from plain lesson text never does, so the rewriter is skipped and the
/// substitution output is returned byte for byte.
pub fn needs_sanitizing(html: &str) -> bool {
    let lower = html.to_ascii_lowercase();
    ["<script", "<style", "<iframe", "<object", "<embed"]
        .iter()
        .any(|needle| lower.contains(needle))
        || TAG_WITH_ATTRIBUTES.is_match(html)
}

/// True when a URL attribute value runs script once the browser has decoded entities and
/// dropped whitespace and control characters.
fn is_script_url(value: &str) -> bool {
    let decoded = html_escape::decode_html_entities(value);
    let scheme: String = decoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .take("javascript:".len())
        .collect();
    scheme.eq_ignore_ascii_case("javascript:")
}

/// Removes blocked elements, `on*` attributes and `javascript:` URLs from `html`.
pub fn sanitize_markup(html: &str) -> Result<Sanitized, LessonError> {
    let removed = RefCell::new(Vec::new());

    let output = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!(BLOCKED_ELEMENTS, |el| {
                    removed.borrow_mut().push(format!("<{}>", el.tag_name()));
                    el.remove();
                    Ok(())
                }),
                element!("*", |el| {
                    let handlers: Vec<String> = el
                        .attributes()
                        .iter()
                        .map(|attr| attr.name())
                        .filter(|name| name.to_ascii_lowercase().starts_with("on"))
                        .collect();
                    for name in handlers {
                        el.remove_attribute(&name);
                        removed.borrow_mut().push(name);
                    }

                    for attr in URL_ATTRIBUTES {
                        if let Some(value) = el.get_attribute(attr)
                            && is_script_url(&value)
                        {
                            el.remove_attribute(attr);
                            removed.borrow_mut().push(format!("{attr}=javascript:"));
                        }
                    }
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|err| LessonError::Sanitize(err.to_string()))?;

    Ok(Sanitized {
        html: output,
        removed: removed.into_inner(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_markup_needs_no_rewrite() {
        assert!(!needs_sanitizing("<h1>Title</h1><p>one <strong>two</strong></p>"));
        assert!(!needs_sanitizing("<p>Talk to the money person</p>"));
    }

    #[test]
    fn detects_event_handlers() {
        assert!(needs_sanitizing(r#"<img src="x.png" onerror="alert(1)">"#));
        assert!(!needs_sanitizing("<p>works on weekends</p>"));
    }

    #[test]
    fn detects_handlers_after_slash_or_tab() {
        assert!(needs_sanitizing("<img/onerror=alert(1) src=x>"));
        assert!(needs_sanitizing("<img src=x\tonerror=alert(1)>"));
        assert!(!needs_sanitizing("<p>line<br />break</p>"));
    }

    #[test]
    fn removes_script_elements_with_content() {
        let result = sanitize_markup("<p>Hi</p><script>alert(1)</script><p>Bye</p>").unwrap();
        assert_eq!(result.html, "<p>Hi</p><p>Bye</p>");
        assert_eq!(result.removed, vec!["<script>".to_string()]);
    }

    #[test]
    fn removes_event_handler_attributes() {
        let result = sanitize_markup(r#"<img src="chart.png" onerror="steal()">"#).unwrap();
        assert!(!result.html.contains("onerror"));
        assert!(result.html.contains(r#"src="chart.png""#));
        assert_eq!(result.removed, vec!["onerror".to_string()]);
    }

    #[test]
    fn removes_javascript_urls() {
        let result = sanitize_markup(r#"<a href="javascript:void(0)">x</a>"#).unwrap();
        assert!(!result.html.contains("javascript:"));
        assert!(result.html.contains(">x</a>"));
    }

    #[test]
    fn removes_entity_encoded_javascript_urls() {
        for markup in [
            r#"<a href="&#106;avascript:alert(1)">x</a>"#,
            r#"<a href="&#x6A;ava&#x09;script:alert(1)">x</a>"#,
            "<a href=\" java\nscript:alert(1)\">x</a>",
        ] {
            assert!(needs_sanitizing(markup));
            let result = sanitize_markup(markup).unwrap();
            assert!(!result.html.contains("href"), "{markup}");
            assert!(result.html.ends_with(">x</a>"));
            assert_eq!(result.removed, vec!["href=javascript:".to_string()]);
        }
    }

    #[test]
    fn keeps_ordinary_urls() {
        let result = sanitize_markup(r#"<a href="https://example.com/?a=1&amp;b=2">x</a>"#).unwrap();
        assert_eq!(result.html, r#"<a href="https://example.com/?a=1&amp;b=2">x</a>"#);
        assert!(result.removed.is_empty());
    }
}
