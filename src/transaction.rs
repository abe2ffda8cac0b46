/// Saturating, non-negative counter approximating nested transaction state
/// over a backend that only supports flat transactions.
///
/// The counter never goes below zero: a decrement at zero is a no-op, which
/// is what lets `commit` tolerate mismatched begin/commit call patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionDepth(u32);

impl TransactionDepth {
    #[must_use]
    pub fn new() -> Self {
        Self(0)
    }

    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// Floored at zero.
    pub fn decrement(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }

    /// True while at least one begin has not been matched by a commit.
    #[must_use]
    pub fn is_active(self) -> bool {
        self.0 > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let depth = TransactionDepth::new();
        assert_eq!(depth.get(), 0);
        assert!(!depth.is_active());
    }

    #[test]
    fn increments_and_decrements() {
        let mut depth = TransactionDepth::new();
        depth.increment();
        depth.increment();
        assert_eq!(depth.get(), 2);
        depth.decrement();
        assert_eq!(depth.get(), 1);
        assert!(depth.is_active());
    }

    #[test]
    fn decrement_floors_at_zero() {
        let mut depth = TransactionDepth::new();
        depth.decrement();
        depth.decrement();
        assert_eq!(depth.get(), 0);
    }
}
