use regex::Regex;

/// How the walker should treat a harvested link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// `mailto:` links would open the system mail handler
    Mail,
    /// `javascript:void` references do nothing and never navigate
    ScriptNoop,
    /// Anything else is expected to load a new page
    Navigable,
}

impl LinkKind {
    /// Classify an href by its scheme
    pub fn classify(href: &str) -> Self {
        let href = href.trim_start();
        if has_scheme(href, "mailto") {
            LinkKind::Mail
        } else if has_scheme(href, "javascript")
            && href["javascript:".len()..].trim_start().starts_with("void")
        {
            LinkKind::ScriptNoop
        } else {
            LinkKind::Navigable
        }
    }

    /// Whether clicking a link of this kind should be followed by a navigation wait
    pub fn expects_navigation(&self) -> bool {
        matches!(self, LinkKind::Navigable)
    }
}

fn has_scheme(href: &str, scheme: &str) -> bool {
    let bytes = href.as_bytes();
    bytes.len() > scheme.len()
        && bytes[scheme.len()] == b':'
        && bytes[..scheme.len()].eq_ignore_ascii_case(scheme.as_bytes())
}

/// Regex filter for links the walker must not visit
#[derive(Debug, Default)]
pub struct LinkFilter {
    exclude_regexes: Vec<Regex>,
}

impl LinkFilter {
    /// Compile the exclude patterns
    pub fn new(exclude_patterns: &[String]) -> Result<Self, regex::Error> {
        let mut exclude_regexes = Vec::with_capacity(exclude_patterns.len());
        for pattern in exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self { exclude_regexes })
    }

    pub fn is_excluded(&self, href: &str) -> bool {
        self.exclude_regexes.iter().any(|regex| regex.is_match(href))
    }
}

/// Build a selector matching anchors whose href attribute equals `href` exactly
pub fn anchor_selector(href: &str) -> String {
    let mut selector = String::with_capacity(href.len() + 10);
    selector.push_str("a[href=\"");
    for c in href.chars() {
        match c {
            '"' | '\\' => {
                selector.push('\\');
                selector.push(c);
            }
            // Newlines must be written as CSS hex escapes inside a string
            '\n' => selector.push_str("\\a "),
            '\r' => selector.push_str("\\d "),
            _ => selector.push(c),
        }
    }
    selector.push_str("\"]");
    selector
}
