// DISPUTES EXTRINSIC & VALIDATOR TYPES
// Wire-compatible records for the disputes batch, the validator key sets and the
// per-core availability assignments.

use crate::bytes::{
    BandersnatchPublic, BlsPublic, Ed25519Public, Ed25519Signature, Hash32, ValidatorMetadata,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A timeslot, the unit of τ.
pub type TimeSlot = u32;

/// Canonical position of a validator inside κ or λ.
pub type ValidatorIndex = u16;

/// Newly marked offenders, ascending and unique.
pub type OffendersMark = Vec<Ed25519Public>;

/// A single validator's vote on a work-report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgement {
    /// `true` when the validator considers the report valid
    pub vote: bool,
    pub index: ValidatorIndex,
    pub signature: Ed25519Signature,
}

/// Votes of a validator set on one work-report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub target: Hash32,
    /// Epoch marker the votes were cast in
    pub age: u32,
    pub votes: Vec<Judgement>,
}

impl Verdict {
    pub fn positive_votes(&self) -> usize {
        self.votes.iter().filter(|v| v.vote).count()
    }
}

/// Proof that a validator guaranteed a report which is being judged bad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Culprit {
    pub target: Hash32,
    pub key: Ed25519Public,
    pub signature: Ed25519Signature,
}

/// Proof that a validator voted against a report which is being judged good.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    pub target: Hash32,
    pub vote: bool,
    pub key: Ed25519Public,
    pub signature: Ed25519Signature,
}

/// The disputes batch carried by a block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputesExtrinsic {
    #[serde(default)]
    pub verdicts: Vec<Verdict>,
    #[serde(default)]
    pub culprits: Vec<Culprit>,
    #[serde(default)]
    pub faults: Vec<Fault>,
}

impl DisputesExtrinsic {
    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty() && self.culprits.is_empty() && self.faults.is_empty()
    }
}

/// Key record of one validator. Only the Ed25519 key takes part in disputes; the other
/// components are carried so the state snapshot stays complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorData {
    pub bandersnatch: BandersnatchPublic,
    pub ed25519: Ed25519Public,
    pub bls: BlsPublic,
    pub metadata: ValidatorMetadata,
}

/// Ordered validator set (κ or λ); position is the validator index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidatorSet(pub Vec<ValidatorData>);

impl ValidatorSet {
    /// Ed25519 key at `index`, if the index is inside the set.
    pub fn ed25519_at(&self, index: ValidatorIndex) -> Option<&Ed25519Public> {
        self.0.get(usize::from(index)).map(|v| &v.ed25519)
    }

    pub fn ed25519_keys(&self) -> impl Iterator<Item = &Ed25519Public> {
        self.0.iter().map(|v| &v.ed25519)
    }
}

/// Availability specification of a work-package. Only the hash is interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageSpec {
    pub hash: Hash32,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// A work-report pending availability. Fields other than the package specification are
/// carried opaquely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkReport {
    pub package_spec: PackageSpec,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Work-report assigned to a core, waiting to become available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityAssignment {
    pub report: WorkReport,
    pub timeout: TimeSlot,
}

impl AvailabilityAssignment {
    /// Identity used to match the assignment against a judged report.
    pub fn report_hash(&self) -> &Hash32 {
        &self.report.package_spec.hash
    }
}

/// ρ: one slot per core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityAssignments(pub Vec<Option<AvailabilityAssignment>>);

impl AvailabilityAssignments {
    /// Empty every slot whose pending report is `target`. Returns the number of cleared slots.
    pub fn clear_report(&mut self, target: &Hash32) -> usize {
        let mut cleared = 0;
        for slot in self.0.iter_mut() {
            if slot.as_ref().map_or(false, |a| a.report_hash() == target) {
                *slot = None;
                cleared += 1;
            }
        }
        cleared
    }

    pub fn pending(&self) -> impl Iterator<Item = &Hash32> {
        self.0.iter().flatten().map(AvailabilityAssignment::report_hash)
    }
}
