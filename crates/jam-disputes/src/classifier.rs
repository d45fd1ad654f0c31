// VERDICT CLASSIFICATION
// Supermajority arithmetic over a verdict's votes, and the consistency of the batch's
// accusations with the resulting class.
//
// INVARIANTS:
// 1. twoThirds = floor(2 * total / 3) + 1, oneThird = floor(total / 3)
// 2. good  <=> positive >= twoThirds, with at least one fault and no culprit
// 3. bad   <=> positive == 0, with at least two culprits and no fault
// 4. wonky <=> oneThird < positive < twoThirds (oneThird itself only when lenient),
//    with no accusation at all
// 5. Any other split is rejected, never silently dropped

use crate::attestation::AttestationScope;
use crate::bytes::{Ed25519Public, Hash32};
use crate::config::{AgePolicy, DisputesConfig, VoteSplitPolicy};
use crate::error::DisputesErrorCode;
use crate::precheck::is_sorted_unique;
use crate::records::VerdictClass;
use crate::state::DisputesState;
use crate::types::{Culprit, Fault, ValidatorSet, Verdict};
use crate::verifier::{vote_message, AttestationVerifier};
use log::debug;

/// Culprits needed to judge a report bad.
pub const MIN_CULPRITS: usize = 2;

/// Faults needed to judge a report good.
pub const MIN_FAULTS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTally {
    pub positive: usize,
    pub total: usize,
}

impl VoteTally {
    pub fn of(verdict: &Verdict) -> Self {
        VoteTally {
            positive: verdict.positive_votes(),
            total: verdict.votes.len(),
        }
    }

    pub fn two_thirds(&self) -> usize {
        2 * self.total / 3 + 1
    }

    pub fn one_third(&self) -> usize {
        self.total / 3
    }

    pub fn classify(&self, policy: VoteSplitPolicy) -> Result<VerdictClass, DisputesErrorCode> {
        let positive = self.positive;
        let one_third = self.one_third();

        if positive >= self.two_thirds() {
            Ok(VerdictClass::Good)
        } else if positive == 0 {
            Ok(VerdictClass::Bad)
        } else if positive > one_third {
            Ok(VerdictClass::Wonky)
        } else if positive == one_third && policy == VoteSplitPolicy::Lenient {
            Ok(VerdictClass::Wonky)
        } else {
            Err(DisputesErrorCode::BadVoteSplit)
        }
    }
}

/// A verdict that passed every check, with the offenders it settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedVerdict {
    pub target: Hash32,
    pub class: VerdictClass,
    pub offenders: Vec<Ed25519Public>,
}

/// Validator set the verdict's votes index into, after checking its age.
pub fn voting_set<'s>(
    verdict: &Verdict,
    state: &'s DisputesState,
    config: &DisputesConfig,
) -> Result<&'s ValidatorSet, DisputesErrorCode> {
    match config.age_policy {
        AgePolicy::CurrentSlot if verdict.age == state.tau => Ok(&state.kappa),
        AgePolicy::CurrentOrPreviousEpoch => {
            let epoch = config.epoch_of(state.tau);
            if verdict.age == epoch {
                Ok(&state.kappa)
            } else if verdict.age.checked_add(1) == Some(epoch) {
                Ok(&state.lambda)
            } else {
                Err(DisputesErrorCode::BadJudgementAge)
            }
        }
        _ => Err(DisputesErrorCode::BadJudgementAge),
    }
}

pub fn validate_votes<V: AttestationVerifier + ?Sized>(
    verdict: &Verdict,
    voters: &ValidatorSet,
    scope: &AttestationScope<'_>,
    verifier: &V,
) -> Result<(), DisputesErrorCode> {
    let indices: Vec<_> = verdict.votes.iter().map(|v| v.index).collect();
    if !is_sorted_unique(&indices) {
        return Err(DisputesErrorCode::JudgementsNotSortedUnique);
    }

    for vote in &verdict.votes {
        let key = voters
            .ed25519_at(vote.index)
            .ok_or(DisputesErrorCode::InvalidVoteIndex)?;
        if !scope.is_known_key(key) {
            return Err(DisputesErrorCode::BadGuarantorKey);
        }
        if !verifier.verify(&vote.signature, key, &vote_message(vote.vote, vote.index)) {
            debug!("vote {} on {} has a bad signature", vote.index, verdict.target);
            return Err(DisputesErrorCode::BadSignature);
        }
    }
    Ok(())
}

/// Check the batch's accusations against `class` and return the offenders they prove.
pub fn settle_accusations(
    class: VerdictClass,
    target: &Hash32,
    culprits: &[Culprit],
    faults: &[Fault],
) -> Result<Vec<Ed25519Public>, DisputesErrorCode> {
    let culprit_keys: Vec<_> = culprits
        .iter()
        .filter(|c| &c.target == target)
        .map(|c| c.key)
        .collect();
    let fault_keys: Vec<_> = faults
        .iter()
        .filter(|f| &f.target == target)
        .map(|f| f.key)
        .collect();

    match class {
        VerdictClass::Good => {
            if fault_keys.len() < MIN_FAULTS {
                return Err(DisputesErrorCode::NotEnoughFaults);
            }
            if !culprit_keys.is_empty() {
                return Err(DisputesErrorCode::CulpritsVerdictNotBad);
            }
            Ok(fault_keys)
        }
        VerdictClass::Bad => {
            if culprit_keys.len() < MIN_CULPRITS {
                return Err(DisputesErrorCode::NotEnoughCulprits);
            }
            if !fault_keys.is_empty() {
                return Err(DisputesErrorCode::FaultsVerdictNotGood);
            }
            Ok(culprit_keys)
        }
        VerdictClass::Wonky => {
            if !culprit_keys.is_empty() || !fault_keys.is_empty() {
                return Err(DisputesErrorCode::CulpritsVerdictNotBad);
            }
            Ok(Vec::new())
        }
    }
}

/// Run every per-verdict check and classify it.
pub fn classify_verdict<V: AttestationVerifier + ?Sized>(
    verdict: &Verdict,
    culprits: &[Culprit],
    faults: &[Fault],
    state: &DisputesState,
    scope: &AttestationScope<'_>,
    config: &DisputesConfig,
    verifier: &V,
) -> Result<ClassifiedVerdict, DisputesErrorCode> {
    if state.psi.is_judged(&verdict.target) {
        return Err(DisputesErrorCode::AlreadyJudged);
    }

    let voters = voting_set(verdict, state, config)?;
    validate_votes(verdict, voters, scope, verifier)?;

    let tally = VoteTally::of(verdict);
    let class = tally.classify(config.vote_split_policy)?;
    let offenders = settle_accusations(class, &verdict.target, culprits, faults)?;

    debug!(
        "verdict {} judged {} ({}/{} positive)",
        verdict.target,
        class.as_str(),
        tally.positive,
        tally.total
    );
    Ok(ClassifiedVerdict {
        target: verdict.target,
        class,
        offenders,
    })
}
