pub mod adjudicator;
pub mod attestation;
pub mod bytes;
pub mod classifier;
pub mod config;
pub mod error;
pub mod outcome;
pub mod precheck;
pub mod records;
pub mod state;
pub mod types;
pub mod verifier;

pub use adjudicator::Adjudicator;
pub use bytes::{BytesError, Ed25519Public, Ed25519Signature, Hash32};
pub use classifier::{VoteTally, MIN_CULPRITS, MIN_FAULTS};
pub use config::{AgePolicy, ConfigError, DisputesConfig, VoteSplitPolicy};
pub use error::DisputesErrorCode;
pub use outcome::{DisputesOutput, OutputData, Transition};
pub use records::{DisputesRecords, VerdictClass};
pub use state::DisputesState;
pub use types::{
    AvailabilityAssignment, AvailabilityAssignments, Culprit, DisputesExtrinsic, Fault, Judgement,
    OffendersMark, TimeSlot, ValidatorData, ValidatorIndex, ValidatorSet, Verdict, WorkReport,
};
pub use verifier::{AcceptAllVerifier, AttestationVerifier, Ed25519Verifier};

/// Adjudicate with strict Ed25519 verification under `config`.
pub fn adjudicate(
    extrinsic: &DisputesExtrinsic,
    pre_state: &DisputesState,
    config: DisputesConfig,
) -> Result<Transition, ConfigError> {
    Ok(Adjudicator::new(config, Ed25519Verifier)?.apply(extrinsic, pre_state))
}
