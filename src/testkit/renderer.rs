//! Mock [`Renderer`] serving scripted pages.
//!
//! Each `load()` pops the next scripted result; once the queue is empty the
//! fallback page is served. Shared [`RendererStats`] record loads, releases
//! and the selectors queried, so tests can assert that every acquired page
//! was handed back.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::RenderError;
use crate::port::{Element, Page, Renderer};

/// Contents of one scripted page, keyed by selector.
///
/// Selectors without an entry answer with [`RenderError::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct PageScript {
    elements: HashMap<String, Vec<Result<String, RenderError>>>,
    query_errors: HashMap<String, RenderError>,
}

impl PageScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element with `text` under `selector`, after any existing ones.
    pub fn with_text(mut self, selector: &str, text: &str) -> Self {
        self.elements
            .entry(selector.to_string())
            .or_default()
            .push(Ok(text.to_string()));
        self
    }

    /// Add an element whose text cannot be read.
    pub fn with_unreadable(mut self, selector: &str) -> Self {
        self.elements
            .entry(selector.to_string())
            .or_default()
            .push(Err(RenderError::Protocol("stale element".into())));
        self
    }

    /// Make queries for `selector` fail with `error`.
    pub fn with_query_error(mut self, selector: &str, error: RenderError) -> Self {
        self.query_errors.insert(selector.to_string(), error);
        self
    }
}

/// Counters shared between a renderer and the pages it hands out.
#[derive(Debug, Default)]
pub struct RendererStats {
    loads: AtomicU32,
    releases: AtomicU32,
    queried: Mutex<Vec<String>>,
}

impl RendererStats {
    pub fn loads(&self) -> u32 {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> u32 {
        self.releases.load(Ordering::SeqCst)
    }

    /// Selectors queried so far, in call order.
    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }
}

/// One queued load: its result and how long it takes.
type ScriptedLoad = (Result<PageScript, RenderError>, Duration);

/// A renderer with scripted load results.
pub struct ScriptedRenderer {
    script: Mutex<VecDeque<ScriptedLoad>>,
    fallback: PageScript,
    load_delay: Duration,
    stats: Arc<RendererStats>,
}

impl ScriptedRenderer {
    /// Serve `fallback` whenever the script queue is empty.
    pub fn new(fallback: PageScript) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            load_delay: Duration::ZERO,
            stats: Arc::new(RendererStats::default()),
        }
    }

    /// A renderer whose every page shows `text` under `selector`.
    pub fn showing(selector: &str, text: &str) -> Self {
        Self::new(PageScript::new().with_text(selector, text))
    }

    /// Queue a page for the next unscripted load.
    pub fn then_page(self, page: PageScript) -> Self {
        self.script.lock().unwrap().push_back((Ok(page), Duration::ZERO));
        self
    }

    /// Queue a page that takes `delay` to load.
    pub fn then_slow_page(self, page: PageScript, delay: Duration) -> Self {
        self.script.lock().unwrap().push_back((Ok(page), delay));
        self
    }

    /// Queue a load failure for the next unscripted load.
    pub fn then_load_error(self, error: RenderError) -> Self {
        self.script.lock().unwrap().push_back((Err(error), Duration::ZERO));
        self
    }

    /// Sleep this long inside every `load()`, on top of any scripted delay.
    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    pub fn stats(&self) -> Arc<RendererStats> {
        Arc::clone(&self.stats)
    }
}

#[async_trait]
impl Renderer for ScriptedRenderer {
    async fn load(&self, _url: &str, _timeout: Duration) -> Result<Box<dyn Page>, RenderError> {
        self.stats.loads.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        let (result, delay) = next.unwrap_or_else(|| (Ok(self.fallback.clone()), Duration::ZERO));
        let delay = delay + self.load_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let script = result?;
        Ok(Box::new(ScriptedPage {
            script,
            stats: Arc::clone(&self.stats),
        }))
    }
}

struct ScriptedPage {
    script: PageScript,
    stats: Arc<RendererStats>,
}

#[async_trait]
impl Page for ScriptedPage {
    async fn query_all(
        &self,
        selector: &str,
        _timeout: Duration,
    ) -> Result<Vec<Box<dyn Element>>, RenderError> {
        self.stats.queried.lock().unwrap().push(selector.to_string());
        if let Some(error) = self.script.query_errors.get(selector) {
            return Err(error.clone());
        }
        match self.script.elements.get(selector) {
            Some(texts) if !texts.is_empty() => Ok(texts
                .iter()
                .cloned()
                .map(|text| Box::new(ScriptedElement { text }) as Box<dyn Element>)
                .collect()),
            _ => Err(RenderError::NotFound {
                selector: selector.to_string(),
            }),
        }
    }

    async fn release(self: Box<Self>) {
        self.stats.releases.fetch_add(1, Ordering::SeqCst);
    }
}

struct ScriptedElement {
    text: Result<String, RenderError>,
}

#[async_trait]
impl Element for ScriptedElement {
    async fn text(&self) -> Result<String, RenderError> {
        self.text.clone()
    }
}
