use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// A cooperative cancellation flag for replay runs.
///
/// Cloneable and externally owned: any holder may set it at any time, typically
/// because the canonical pass caught up or the block was reorged away. Runs
/// poll it at transaction boundaries; there is no acknowledgment channel, and
/// how much the view was mutated before the flag was observed is unspecified
/// because the view is discarded either way.
#[derive(Clone, Debug, Default)]
pub struct CancelSignal(Arc<AtomicBool>);

impl CancelSignal {
    /// Creates a new, unset signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the signal was set.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Sets the signal. All clones observe it.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unset() {
        assert!(!CancelSignal::new().is_cancelled());
    }

    #[test]
    fn clones_share_the_flag() {
        let signal = CancelSignal::new();
        let observer = signal.clone();
        signal.cancel();
        assert!(observer.is_cancelled());
    }

    #[test]
    fn observed_across_threads() {
        let signal = CancelSignal::new();

        // spin up readers that run to completion unless cancelled
        let handles: Vec<_> = (0..10)
            .map(|_| {
                let signal = signal.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        if signal.is_cancelled() {
                            return
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(!signal.is_cancelled());

        signal.cancel();
        assert!(signal.clone().is_cancelled());
    }
}
