// DISPUTES PROTOCOL PARAMETERS
// Chain-level choices the adjudicator is parameterized over.
//
// INVARIANTS:
// 1. Parameters are fixed for the lifetime of an adjudicator
// 2. epoch_length > 0

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("epoch_length must be > 0")]
    ZeroEpochLength,
}

/// How a verdict's `age` is checked against τ, and which validator set its votes index into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgePolicy {
    /// `age` must equal τ; votes index into κ.
    #[default]
    CurrentSlot,
    /// `age` is an epoch index: the current epoch votes with κ, the previous one with λ.
    CurrentOrPreviousEpoch,
}

/// Treatment of a vote split landing exactly on the one-third boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteSplitPolicy {
    /// Exactly one third positive is rejected with `bad_vote_split`.
    #[default]
    Strict,
    /// Exactly one third positive is judged wonky.
    Lenient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisputesConfig {
    pub age_policy: AgePolicy,
    pub vote_split_policy: VoteSplitPolicy,
    /// Timeslots per epoch
    pub epoch_length: u32,
}

impl Default for DisputesConfig {
    fn default() -> Self {
        DisputesConfig::full()
    }
}

impl DisputesConfig {
    /// Full-size chain parameters.
    pub fn full() -> Self {
        DisputesConfig {
            age_policy: AgePolicy::CurrentSlot,
            vote_split_policy: VoteSplitPolicy::Strict,
            epoch_length: 600,
        }
    }

    /// Parameters of the small test network.
    pub fn tiny() -> Self {
        DisputesConfig {
            epoch_length: 12,
            ..DisputesConfig::full()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.epoch_length == 0 {
            return Err(ConfigError::ZeroEpochLength);
        }
        Ok(())
    }

    /// Epoch containing `slot`.
    pub fn epoch_of(&self, slot: u32) -> u32 {
        slot / self.epoch_length.max(1)
    }
}
