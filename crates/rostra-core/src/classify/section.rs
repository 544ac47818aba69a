/// Remembers the most recent section header for one document.
///
/// Each document gets its own tracker; nothing is shared between documents.
#[derive(Debug, Clone, Default)]
pub struct SectionTracker {
    current: Option<String>,
}

impl SectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn enter(&mut self, header: &str) {
        self.current = Some(header.to_string());
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}
