//! Observers for the pattern matcher
//!
//! Listeners receive a textual trace of the matching process, meant for
//! visualization tools. They never influence the result.

/// Observer of a single `hyphenate_with` call
pub trait HyphenateListener {
    /// Inactive listeners are never called, so no trace strings are built
    fn is_active(&self) -> bool {
        true
    }

    /// The padded word, each character preceded by a space
    fn on_start(&mut self, _decorated: &str) {}

    /// A pattern matched; `column` aligns it under the `on_start` string
    fn on_match(&mut self, _column: usize, _pattern: &str) {}

    /// The padded word interleaved with the merged scores
    fn on_end(&mut self, _decorated: &str) {}
}

/// Listener that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullListener;

impl HyphenateListener for NullListener {
    fn is_active(&self) -> bool {
        false
    }
}

/// One recorded listener callback
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    Start(String),
    Match { column: usize, pattern: String },
    End(String),
}

/// Listener that keeps every event for later inspection
#[derive(Debug, Default, Clone)]
pub struct RecordingListener {
    events: Vec<TraceEvent>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Render the trace with every match indented to its column
    pub fn render(&self) -> String {
        let mut out = String::new();
        for event in &self.events {
            match event {
                TraceEvent::Start(word) | TraceEvent::End(word) => out.push_str(word),
                TraceEvent::Match { column, pattern } => {
                    out.extend(std::iter::repeat(' ').take(*column));
                    out.push_str(pattern);
                }
            }
            out.push('\n');
        }
        out
    }
}

impl HyphenateListener for RecordingListener {
    fn on_start(&mut self, decorated: &str) {
        self.events.push(TraceEvent::Start(decorated.to_string()));
    }

    fn on_match(&mut self, column: usize, pattern: &str) {
        self.events.push(TraceEvent::Match {
            column,
            pattern: pattern.to_string(),
        });
    }

    fn on_end(&mut self, decorated: &str) {
        self.events.push(TraceEvent::End(decorated.to_string()));
    }
}

/// Listener forwarding the trace to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogListener;

impl HyphenateListener for LogListener {
    fn is_active(&self) -> bool {
        log::log_enabled!(log::Level::Trace)
    }

    fn on_start(&mut self, decorated: &str) {
        log::trace!("hyphenate {}", decorated);
    }

    fn on_match(&mut self, column: usize, pattern: &str) {
        log::trace!("  match at {}: {}", column / 2, pattern);
    }

    fn on_end(&mut self, decorated: &str) {
        log::trace!("  scores {}", decorated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_aligns_matches() {
        let mut listener = RecordingListener::new();
        listener.on_start(" . a b .");
        listener.on_match(2, "0a1b0 ");
        listener.on_end("0.0a1b0.0 ");

        assert_eq!(listener.render(), " . a b .\n  0a1b0 \n0.0a1b0.0 \n");
        assert_eq!(listener.events().len(), 3);

        listener.clear();
        assert!(listener.events().is_empty());
    }

    #[test]
    fn test_null_listener_inactive() {
        assert!(!NullListener.is_active());
        assert!(RecordingListener::new().is_active());
    }
}
