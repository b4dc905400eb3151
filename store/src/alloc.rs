//! Identity allocation for engine-derived identities.

use trellis_core::IdentityKey;

/// Monotonic identity allocator for one collection.
///
/// Every identity the collection has ever held is observed, so the next
/// allocated value is always above anything seen, including deleted records.
/// Once `i64::MAX` has been observed or handed out, the allocator is
/// exhausted and never wraps.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: Option<i64>,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: Some(1) }
    }

    /// Record an identity so it is never handed out.
    pub fn observe(&mut self, key: &IdentityKey) {
        let Some(n) = key.as_number() else {
            return;
        };
        if let Some(next) = self.next {
            if n >= next {
                self.next = n.checked_add(1);
            }
        }
    }

    /// Allocate the next identity number. None when the identity space is
    /// exhausted.
    pub fn alloc(&mut self) -> Option<i64> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(id)
    }

    /// Peek at the next identity number without allocating it.
    pub fn peek(&self) -> Option<i64> {
        self.next
    }
}
