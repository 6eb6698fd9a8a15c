use thiserror::Error;

/// Error returned when a [`GasPool`] cannot cover a requested amount.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("gas pool exhausted: requested {requested}, remaining {remaining}")]
pub struct GasPoolExhausted {
    /// The amount of gas requested from the pool.
    pub requested: u64,
    /// The amount of gas left in the pool.
    pub remaining: u64,
}

/// Tracks the gas available to the transactions of a single block.
///
/// One pool is created per replay run, seeded with the block gas limit, and
/// only ever decreases. The execution engine draws from it; once it cannot
/// cover a transaction the run is over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GasPool(u64);

impl GasPool {
    /// Creates a pool holding `gas`.
    pub const fn new(gas: u64) -> Self {
        Self(gas)
    }

    /// Returns the gas remaining in the pool.
    pub const fn gas(&self) -> u64 {
        self.0
    }

    /// Removes `amount` from the pool.
    pub fn subtract(&mut self, amount: u64) -> Result<(), GasPoolExhausted> {
        match self.0.checked_sub(amount) {
            Some(remaining) => {
                self.0 = remaining;
                Ok(())
            }
            None => Err(GasPoolExhausted { requested: amount, remaining: self.0 }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtract_depletes_pool() {
        let mut pool = GasPool::new(30_000);
        pool.subtract(21_000).unwrap();
        assert_eq!(pool.gas(), 9_000);
    }

    #[test]
    fn subtract_past_zero_fails_and_leaves_pool_unchanged() {
        let mut pool = GasPool::new(10_000);
        assert_eq!(
            pool.subtract(21_000),
            Err(GasPoolExhausted { requested: 21_000, remaining: 10_000 })
        );
        assert_eq!(pool.gas(), 10_000);
    }
}
