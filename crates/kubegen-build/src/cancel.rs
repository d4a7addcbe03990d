use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

///
/// Cancel
///
/// Cooperative cancellation handle shared between the generation pipeline
/// and its host. Cloning yields another handle to the same flag; tripping
/// it from any thread makes the pipeline return a cancelled outcome at the
/// next checkpoint instead of producing partial output.
///

#[derive(Clone, Debug, Default)]
pub struct Cancel {
    flag: Arc<AtomicBool>,
}

impl Cancel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let cancel = Cancel::new();
        let other = cancel.clone();

        assert!(!other.is_cancelled());
        cancel.cancel();
        assert!(other.is_cancelled());
    }
}
