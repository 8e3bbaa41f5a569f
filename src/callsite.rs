//! Call-site resolution: turn a captured stack into a short locator and a
//! trace remainder, hiding the engine's own frames from the caller.

use std::backtrace::Backtrace;

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

/// Locator used when no `path:line:col` shaped line survives filtering.
pub const NO_STACK_TRACE: &str = "no stack trace";

/// First line matching this shape becomes the locator.
static LOCATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w@/\\.-]+\.[A-Za-z]+:\d+(?::\d+)?").expect("valid locator regex"));

/// Lines matching this pattern belong to the engine (or the capture
/// machinery itself) and are never informative to the caller. The pattern
/// is environment-specific and can be replaced via
/// [`CallSiteResolver::with_self_pattern`].
static SELF_FRAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"chromalog::(?:logger|callsite|render)|[/\\]src[/\\](?:logger|callsite|render)\.rs|std::backtrace|[/\\]backtrace\.rs",
    )
    .expect("valid self-frame regex")
});

/// A resolved call site: a short origin locator plus the remaining trace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallSite {
    /// A `file:line:col`-shaped origin string, or [`NO_STACK_TRACE`].
    pub locator: String,
    /// Newline-joined trace lines after the locator line. May be empty.
    pub remainder: String,
}

/// Optional external stack-filtering collaborator. Consulted before local
/// parsing; any failure is non-fatal and falls back to the resolver.
pub trait StackFilter {
    fn filter(&self, stack: &str) -> Result<CallSite>;
}

/// Parses captured stack text into a [`CallSite`].
///
/// Results are produced fresh per call and never cached: source-line
/// context legitimately changes between invocations.
pub struct CallSiteResolver {
    self_pattern: Regex,
    filter: Option<Box<dyn StackFilter>>,
}

impl Default for CallSiteResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CallSiteResolver {
    pub fn new() -> Self {
        Self {
            self_pattern: SELF_FRAME_RE.clone(),
            filter: None,
        }
    }

    /// Replace the pattern identifying the engine's own frames.
    pub fn with_self_pattern(self_pattern: Regex) -> Self {
        Self {
            self_pattern,
            filter: None,
        }
    }

    /// Inject an external stack-filtering collaborator.
    pub fn set_filter(&mut self, filter: Box<dyn StackFilter>) {
        self.filter = Some(filter);
    }

    /// Replace the pattern identifying the engine's own frames, keeping
    /// any injected collaborator in place.
    pub fn set_self_pattern(&mut self, self_pattern: Regex) {
        self.self_pattern = self_pattern;
    }

    /// Resolve a call site from explicit stack text, or from a freshly
    /// captured stack when none is given.
    pub fn resolve(&self, stack: Option<&str>) -> CallSite {
        let captured;
        let text = match stack {
            Some(text) => text,
            None => {
                captured = Backtrace::force_capture().to_string();
                captured.as_str()
            }
        };
        if let Some(filter) = &self.filter {
            if let Ok(site) = filter.filter(text) {
                return site;
            }
        }
        self.parse(text)
    }

    fn parse(&self, text: &str) -> CallSite {
        let lines: Vec<&str> = text
            .lines()
            .filter(|line| !self.self_pattern.is_match(line))
            .collect();
        for (index, line) in lines.iter().enumerate() {
            if let Some(found) = LOCATOR_RE.find(line) {
                return CallSite {
                    locator: found.as_str().to_string(),
                    remainder: lines[index + 1..].join("\n"),
                };
            }
        }
        CallSite {
            locator: NO_STACK_TRACE.to_string(),
            remainder: String::new(),
        }
    }
}
