use crate::{ForkCondition, Hardfork};
use alloy_primitives::Address;
use once_cell::sync::Lazy;
use std::{collections::BTreeMap, sync::Arc};

/// The canonical mainnet fork schedule.
///
/// Carries no DAO transition data; embedders that replay historical mainnet
/// blocks attach a [`DaoForkConfig`] with the canonical drain list.
pub static MAINNET: Lazy<Arc<ChainSpec>> = Lazy::new(|| {
    Arc::new(ChainSpec {
        chain_id: 1,
        hardforks: BTreeMap::from([
            (Hardfork::Frontier, ForkCondition::Block(0)),
            (Hardfork::Homestead, ForkCondition::Block(1_150_000)),
            (Hardfork::Dao, ForkCondition::Block(1_920_000)),
            (Hardfork::Tangerine, ForkCondition::Block(2_463_000)),
            (Hardfork::SpuriousDragon, ForkCondition::Block(2_675_000)),
            (Hardfork::Byzantium, ForkCondition::Block(4_370_000)),
            (Hardfork::Constantinople, ForkCondition::Block(7_280_000)),
            (Hardfork::Petersburg, ForkCondition::Block(7_280_000)),
            (Hardfork::Istanbul, ForkCondition::Block(9_069_000)),
            (Hardfork::Berlin, ForkCondition::Block(12_244_000)),
            (Hardfork::London, ForkCondition::Block(12_965_000)),
            (Hardfork::Shanghai, ForkCondition::Timestamp(1_681_338_455)),
            (Hardfork::Cancun, ForkCondition::Timestamp(1_710_338_135)),
        ]),
        dao_fork: None,
    })
});

/// Data for the irregular state change applied once at the [`Hardfork::Dao`]
/// activation block: every listed account is drained and the sum is credited
/// to the refund contract.
///
/// The canonical drain list ships with node distributions; this crate treats
/// it as configuration, like the activation heights themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DaoForkConfig {
    /// The account receiving the drained balances.
    pub refund_contract: Address,
    /// The accounts drained at the transition block.
    pub drain_list: Vec<Address>,
}

/// The flattened set of rule flags active at one specific block.
///
/// Resolved once per replay run as a pure function of the block number and
/// timestamp, instead of scattering schedule lookups through the hot loop.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForkRules {
    /// The chain id replay-protected signatures must commit to.
    pub chain_id: u64,
    pub homestead: bool,
    pub tangerine: bool,
    pub spurious_dragon: bool,
    pub byzantium: bool,
    pub berlin: bool,
    pub london: bool,
    pub shanghai: bool,
    pub cancun: bool,
}

impl ForkRules {
    /// True if the canonical pass commits a state root after every
    /// transaction under these rules, i.e. the rule set predates Byzantium's
    /// single end-of-block root.
    pub const fn requires_intermediate_roots(&self) -> bool {
        !self.byzantium
    }
}

/// A chain specification: chain id, hardfork schedule, and any irregular
/// transition data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChainSpec {
    /// The chain id.
    pub chain_id: u64,
    /// The active hardforks and their activation conditions.
    pub hardforks: BTreeMap<Hardfork, ForkCondition>,
    /// DAO transition data, for chains that replay it.
    pub dao_fork: Option<DaoForkConfig>,
}

impl ChainSpec {
    /// Returns a builder for a custom chain spec.
    pub fn builder() -> ChainSpecBuilder {
        ChainSpecBuilder::default()
    }

    /// Get the fork condition for the given fork.
    pub fn fork(&self, fork: Hardfork) -> ForkCondition {
        self.hardforks.get(&fork).copied().unwrap_or(ForkCondition::Never)
    }

    /// Returns the DAO transition data, if configured.
    pub fn dao_fork(&self) -> Option<&DaoForkConfig> {
        self.dao_fork.as_ref()
    }

    /// Resolves the rule set active at the given block number and timestamp.
    pub fn rules_at(&self, number: u64, timestamp: u64) -> ForkRules {
        let active = |fork| self.fork(fork).active_at(number, timestamp);
        ForkRules {
            chain_id: self.chain_id,
            homestead: active(Hardfork::Homestead),
            tangerine: active(Hardfork::Tangerine),
            spurious_dragon: active(Hardfork::SpuriousDragon),
            byzantium: active(Hardfork::Byzantium),
            berlin: active(Hardfork::Berlin),
            london: active(Hardfork::London),
            shanghai: active(Hardfork::Shanghai),
            cancun: active(Hardfork::Cancun),
        }
    }
}

/// A helper to build custom chain specs.
#[derive(Debug, Clone, Default)]
pub struct ChainSpecBuilder {
    chain_id: u64,
    hardforks: BTreeMap<Hardfork, ForkCondition>,
    dao_fork: Option<DaoForkConfig>,
}

impl ChainSpecBuilder {
    /// Returns a builder seeded with the mainnet schedule.
    pub fn mainnet() -> Self {
        Self { chain_id: 1, hardforks: MAINNET.hardforks.clone(), dao_fork: None }
    }

    /// Sets the chain id.
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Add the given fork with the given activation condition.
    pub fn with_fork(mut self, fork: Hardfork, condition: ForkCondition) -> Self {
        self.hardforks.insert(fork, condition);
        self
    }

    /// Attaches the DAO transition data.
    pub fn dao_fork(mut self, config: DaoForkConfig) -> Self {
        self.dao_fork = Some(config);
        self
    }

    /// Enable Frontier at genesis.
    pub fn frontier_activated(mut self) -> Self {
        self.hardforks.insert(Hardfork::Frontier, ForkCondition::Block(0));
        self
    }

    /// Enable Homestead at genesis, and all earlier forks.
    pub fn homestead_activated(mut self) -> Self {
        self = self.frontier_activated();
        self.hardforks.insert(Hardfork::Homestead, ForkCondition::Block(0));
        self
    }

    /// Enable Tangerine at genesis, and all earlier forks.
    pub fn tangerine_activated(mut self) -> Self {
        self = self.homestead_activated();
        self.hardforks.insert(Hardfork::Tangerine, ForkCondition::Block(0));
        self
    }

    /// Enable Spurious Dragon at genesis, and all earlier forks.
    pub fn spurious_dragon_activated(mut self) -> Self {
        self = self.tangerine_activated();
        self.hardforks.insert(Hardfork::SpuriousDragon, ForkCondition::Block(0));
        self
    }

    /// Enable Byzantium at genesis, and all earlier forks.
    pub fn byzantium_activated(mut self) -> Self {
        self = self.spurious_dragon_activated();
        self.hardforks.insert(Hardfork::Byzantium, ForkCondition::Block(0));
        self
    }

    /// Enable Berlin at genesis, and all earlier forks.
    pub fn berlin_activated(mut self) -> Self {
        self = self.byzantium_activated();
        self.hardforks.insert(Hardfork::Constantinople, ForkCondition::Block(0));
        self.hardforks.insert(Hardfork::Petersburg, ForkCondition::Block(0));
        self.hardforks.insert(Hardfork::Istanbul, ForkCondition::Block(0));
        self.hardforks.insert(Hardfork::Berlin, ForkCondition::Block(0));
        self
    }

    /// Enable London at genesis, and all earlier forks.
    pub fn london_activated(mut self) -> Self {
        self = self.berlin_activated();
        self.hardforks.insert(Hardfork::London, ForkCondition::Block(0));
        self
    }

    /// Enable Shanghai at genesis, and all earlier forks.
    pub fn shanghai_activated(mut self) -> Self {
        self = self.london_activated();
        self.hardforks.insert(Hardfork::Shanghai, ForkCondition::Timestamp(0));
        self
    }

    /// Enable Cancun at genesis, and all earlier forks.
    pub fn cancun_activated(mut self) -> Self {
        self = self.shanghai_activated();
        self.hardforks.insert(Hardfork::Cancun, ForkCondition::Timestamp(0));
        self
    }

    /// Build the chain spec.
    pub fn build(self) -> ChainSpec {
        ChainSpec { chain_id: self.chain_id, hardforks: self.hardforks, dao_fork: self.dao_fork }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn mainnet_rules_across_byzantium() {
        let pre = MAINNET.rules_at(4_369_999, 0);
        assert!(pre.homestead);
        assert!(pre.spurious_dragon);
        assert!(!pre.byzantium);
        assert!(pre.requires_intermediate_roots());

        let post = MAINNET.rules_at(4_370_000, 0);
        assert!(post.byzantium);
        assert!(!post.requires_intermediate_roots());
        assert!(!post.london);
    }

    #[test]
    fn timestamp_forks_resolve_from_block_time() {
        let rules = MAINNET.rules_at(20_000_000, 1_681_338_455);
        assert!(rules.london);
        assert!(rules.shanghai);
        assert!(!rules.cancun);

        let rules = MAINNET.rules_at(20_000_000, 1_710_338_135);
        assert!(rules.cancun);
    }

    #[test]
    fn mainnet_dao_transition_block() {
        assert!(MAINNET.fork(Hardfork::Dao).transitions_at_block(1_920_000));
        assert!(!MAINNET.fork(Hardfork::Dao).transitions_at_block(1_920_001));
        // data is configuration, not part of the schedule
        assert!(MAINNET.dao_fork().is_none());
    }

    #[test]
    fn builder_activates_earlier_forks() {
        let spec = ChainSpec::builder().chain_id(1).byzantium_activated().build();
        let rules = spec.rules_at(1, 0);
        assert!(rules.homestead && rules.tangerine && rules.spurious_dragon && rules.byzantium);
        assert!(!rules.berlin);
        assert_eq!(spec.fork(Hardfork::London), ForkCondition::Never);
    }

    #[test]
    fn builder_attaches_dao_config() {
        let config = DaoForkConfig {
            refund_contract: address!("bf4ed7b27f1d666546e30d74d50d173d20bca754"),
            drain_list: vec![address!("d4fe7bc31cedb7bfb8a345f31e668033056b2728")],
        };
        let spec = ChainSpec::builder()
            .homestead_activated()
            .with_fork(Hardfork::Dao, ForkCondition::Block(1))
            .dao_fork(config.clone())
            .build();
        assert_eq!(spec.dao_fork(), Some(&config));
        assert!(spec.fork(Hardfork::Dao).transitions_at_block(1));
    }
}
