use std::sync::atomic::{AtomicUsize, Ordering};

/// Round-robin over API keys. Each call hands out the next key; a request
/// takes exactly one key.
pub struct Rotator {
    keys: Vec<String>,
    cursor: AtomicUsize,
}

impl Rotator {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            keys,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn next(&self) -> Option<&str> {
        if self.keys.is_empty() {
            return None;
        }
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed);
        Some(self.keys[idx % self.keys.len()].as_str())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
