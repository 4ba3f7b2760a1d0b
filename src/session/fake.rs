//! In-memory browser used by the phase tests.
//!
//! Documents are keyed by URL. Every navigation bumps a generation counter and
//! any element handle from an older generation panics when touched, so a phase
//! that holds a handle across a navigation fails its test.

use crate::error::{AuditError, Result};
use crate::session::{Element, NavigationMark, Page};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What clicking a node does
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OnClick {
    Navigate(String),
    Nothing,
}

#[derive(Debug, Clone)]
pub(crate) struct FakeNode {
    attrs: HashMap<String, String>,
    on_click: OnClick,
}

impl FakeNode {
    pub(crate) fn link(href: &str, on_click: OnClick) -> Self {
        let mut attrs = HashMap::new();
        attrs.insert("href".to_string(), href.to_string());
        Self { attrs, on_click }
    }

    pub(crate) fn field(class: Option<&str>) -> Self {
        let mut attrs = HashMap::new();
        if let Some(class) = class {
            attrs.insert("class".to_string(), class.to_string());
        }
        Self {
            attrs,
            on_click: OnClick::Nothing,
        }
    }

    fn label(&self) -> String {
        self.attrs
            .get("href")
            .or_else(|| self.attrs.get("class"))
            .cloned()
            .unwrap_or_default()
    }
}

/// A single page of the fake site
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeDoc {
    anchors: Vec<FakeNode>,
    groups: HashMap<String, Vec<FakeNode>>,
}

impl FakeDoc {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Anchor visible to the page source and to `a[href="..."]` lookups
    pub(crate) fn anchor(mut self, href: &str, on_click: OnClick) -> Self {
        self.anchors.push(FakeNode::link(href, on_click));
        self
    }

    /// Nodes returned for an exact selector string
    pub(crate) fn group(mut self, selector: &str, nodes: Vec<FakeNode>) -> Self {
        self.groups
            .entry(selector.to_string())
            .or_default()
            .extend(nodes);
        self
    }

    fn source(&self) -> String {
        let mut html = String::from("<html><body>");
        for anchor in &self.anchors {
            let href = anchor.attrs["href"]
                .replace('&', "&amp;")
                .replace('"', "&quot;");
            html.push_str(&format!("<a href=\"{}\">link</a>", href));
        }
        html.push_str("</body></html>");
        html
    }

    fn select(&self, selector: &str) -> Vec<FakeNode> {
        if let Some(href) = parse_anchor_selector(selector) {
            return self
                .anchors
                .iter()
                .filter(|a| a.attrs.get("href") == Some(&href))
                .cloned()
                .collect();
        }
        self.groups.get(selector).cloned().unwrap_or_default()
    }
}

/// Reverse of `filter::anchor_selector` for the escapes the tests use
fn parse_anchor_selector(selector: &str) -> Option<String> {
    let inner = selector.strip_prefix("a[href=\"")?.strip_suffix("\"]")?;
    let mut href = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            href.extend(chars.next());
        } else {
            href.push(c);
        }
    }
    Some(href)
}

/// Interactions recorded by the fake, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Goto(String),
    Click(String),
    Back,
    NavigationWait,
    Screenshot(String),
    Focus(String),
    Typed(String, String),
    Retarget(String),
}

struct State {
    docs: HashMap<String, FakeDoc>,
    history: Vec<String>,
    generation: u64,
    marked: bool,
    events: Vec<Event>,
}

impl State {
    fn current(&self) -> String {
        self.history.last().cloned().unwrap_or_default()
    }

    fn current_doc(&self) -> FakeDoc {
        self.docs.get(&self.current()).cloned().unwrap_or_default()
    }

    fn navigate(&mut self, url: &str) {
        self.history.push(url.to_string());
        self.generation += 1;
        self.marked = false;
    }
}

#[derive(Clone)]
pub(crate) struct FakeBrowser {
    state: Arc<Mutex<State>>,
}

impl FakeBrowser {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                docs: HashMap::new(),
                history: Vec::new(),
                generation: 0,
                marked: false,
                events: Vec::new(),
            })),
        }
    }

    pub(crate) fn with_doc(self, url: &str, doc: FakeDoc) -> Self {
        self.state
            .lock()
            .unwrap()
            .docs
            .insert(url.to_string(), doc);
        self
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.state.lock().unwrap().events.clone()
    }

    pub(crate) fn count(&self, wanted: impl Fn(&Event) -> bool) -> usize {
        self.events().iter().filter(|e| wanted(e)).count()
    }

    pub(crate) fn url(&self) -> String {
        self.state.lock().unwrap().current()
    }
}

#[async_trait]
impl Page for FakeBrowser {
    type Element = FakeElement;

    async fn goto(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.events.push(Event::Goto(url.to_string()));
        state.navigate(url);
        Ok(())
    }

    async fn source(&self) -> Result<String> {
        Ok(self.state.lock().unwrap().current_doc().source())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.url())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Element>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .current_doc()
            .select(selector)
            .into_iter()
            .map(|node| FakeElement {
                state: Arc::clone(&self.state),
                generation: state.generation,
                node,
            })
            .collect())
    }

    async fn back(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.events.push(Event::Back);
        if state.history.len() > 1 {
            state.history.pop();
        }
        state.generation += 1;
        state.marked = false;
        Ok(())
    }

    async fn mark_navigation(&self) -> Result<NavigationMark> {
        let mut state = self.state.lock().unwrap();
        state.marked = true;
        Ok(NavigationMark {
            url: state.current(),
        })
    }

    async fn wait_for_navigation(&self, mark: &NavigationMark, limit: Duration) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.events.push(Event::NavigationWait);
        if state.marked && state.current() == mark.url {
            return Err(AuditError::timeout(
                format!("navigation away from {}", mark.url),
                limit,
            ));
        }
        Ok(())
    }

    async fn wait_until_ready(&self, _limit: Duration) -> Result<()> {
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        let mut state = self.state.lock().unwrap();
        let url = state.current();
        state.events.push(Event::Screenshot(url.clone()));
        Ok(format!("png:{}", url).into_bytes())
    }
}

pub(crate) struct FakeElement {
    state: Arc<Mutex<State>>,
    generation: u64,
    node: FakeNode,
}

impl FakeElement {
    fn with_state<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        assert_eq!(
            state.generation,
            self.generation,
            "stale handle to {:?} used after navigation",
            self.node.label()
        );
        f(&mut state)
    }
}

#[async_trait]
impl Element for FakeElement {
    async fn attr(&self, name: &str) -> Result<Option<String>> {
        Ok(self.with_state(|_| self.node.attrs.get(name).cloned()))
    }

    async fn click(&self) -> Result<()> {
        self.with_state(|state| {
            state.events.push(Event::Click(self.node.label()));
            if let OnClick::Navigate(url) = &self.node.on_click {
                state.navigate(url);
            }
        });
        Ok(())
    }

    async fn focus(&self) -> Result<()> {
        self.with_state(|state| state.events.push(Event::Focus(self.node.label())));
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<()> {
        self.with_state(|state| {
            state
                .events
                .push(Event::Typed(self.node.label(), text.to_string()))
        });
        Ok(())
    }

    async fn open_in_current_context(&self) -> Result<()> {
        self.with_state(|state| state.events.push(Event::Retarget(self.node.label())));
        Ok(())
    }
}
