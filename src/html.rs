use scraper::{Html, Selector};

/// Extracts the href attribute of every anchor in document order.
///
/// Anchors without an href are ignored; duplicates are kept so callers can
/// decide how to collapse them.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);

    let link_selector = Selector::parse("a").expect("static selector");
    let links = doc
        .select(&link_selector)
        .filter_map(|e| e.value().attr("href"))
        .map(|s| s.to_string())
        .collect::<Vec<String>>();

    ::log::debug!("HTML parser found {} links", links.len());
    if !links.is_empty() {
        ::log::debug!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    links
}
