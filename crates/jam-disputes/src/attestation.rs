// CULPRIT & FAULT ATTESTATIONS
// Every accusation in the batch is resolved to a known validator key and its signature
// checked before any verdict is classified.
//
// INVARIANTS:
// 1. An offender is never reported twice
// 2. An accusation may only target a report judged in the same batch
// 3. Accusing keys belong to the current or previous validator set
// 4. Validation is total: the whole batch is checked, culprits first, then faults

use crate::bytes::{Ed25519Public, Hash32};
use crate::error::DisputesErrorCode;
use crate::records::DisputesRecords;
use crate::state::DisputesState;
use crate::types::{Culprit, DisputesExtrinsic, Fault};
use crate::verifier::{culprit_message, fault_message, AttestationVerifier};
use log::debug;
use std::collections::BTreeSet;

/// Lookups shared by attestation and vote validation for one batch.
pub struct AttestationScope<'a> {
    records: &'a DisputesRecords,
    known_keys: BTreeSet<Ed25519Public>,
    targets: BTreeSet<Hash32>,
}

impl<'a> AttestationScope<'a> {
    pub fn new(extrinsic: &DisputesExtrinsic, state: &'a DisputesState) -> Self {
        AttestationScope {
            records: &state.psi,
            known_keys: state
                .kappa
                .ed25519_keys()
                .chain(state.lambda.ed25519_keys())
                .copied()
                .collect(),
            targets: extrinsic.verdicts.iter().map(|v| v.target).collect(),
        }
    }

    /// Member of κ ∪ λ.
    pub fn is_known_key(&self, key: &Ed25519Public) -> bool {
        self.known_keys.contains(key)
    }

    /// Target of one of this batch's verdicts.
    pub fn is_batch_target(&self, target: &Hash32) -> bool {
        self.targets.contains(target)
    }

    pub fn is_offender(&self, key: &Ed25519Public) -> bool {
        self.records.is_offender(key)
    }
}

pub fn validate_culprits<V: AttestationVerifier + ?Sized>(
    culprits: &[Culprit],
    scope: &AttestationScope<'_>,
    verifier: &V,
) -> Result<(), DisputesErrorCode> {
    for culprit in culprits {
        if scope.is_offender(&culprit.key) {
            debug!("culprit {} already reported", culprit.key);
            return Err(DisputesErrorCode::OffenderAlreadyReported);
        }
        if !scope.is_batch_target(&culprit.target) {
            debug!("culprit {} targets {} outside the batch", culprit.key, culprit.target);
            return Err(DisputesErrorCode::CulpritsVerdictNotBad);
        }
        if !scope.is_known_key(&culprit.key) {
            debug!("culprit key {} is not a validator key", culprit.key);
            return Err(DisputesErrorCode::BadGuarantorKey);
        }
        if !verifier.verify(&culprit.signature, &culprit.key, &culprit_message(&culprit.target)) {
            debug!("culprit {} signature rejected", culprit.key);
            return Err(DisputesErrorCode::BadSignature);
        }
    }
    Ok(())
}

pub fn validate_faults<V: AttestationVerifier + ?Sized>(
    faults: &[Fault],
    scope: &AttestationScope<'_>,
    verifier: &V,
) -> Result<(), DisputesErrorCode> {
    for fault in faults {
        if scope.is_offender(&fault.key) {
            debug!("fault {} already reported", fault.key);
            return Err(DisputesErrorCode::OffenderAlreadyReported);
        }
        if fault.vote {
            debug!("fault {} carries a valid vote", fault.key);
            return Err(DisputesErrorCode::FaultVerdictWrong);
        }
        if !scope.is_batch_target(&fault.target) {
            debug!("fault {} targets {} outside the batch", fault.key, fault.target);
            return Err(DisputesErrorCode::FaultsVerdictNotGood);
        }
        if !scope.is_known_key(&fault.key) {
            debug!("fault key {} is not a validator key", fault.key);
            return Err(DisputesErrorCode::BadAuditorKey);
        }
        if !verifier.verify(&fault.signature, &fault.key, &fault_message(&fault.target)) {
            debug!("fault {} signature rejected", fault.key);
            return Err(DisputesErrorCode::BadSignature);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytes::Ed25519Signature;
    use crate::types::{ValidatorData, ValidatorSet, Verdict};
    use crate::verifier::AcceptAllVerifier;

    struct RejectAll;

    impl AttestationVerifier for RejectAll {
        fn verify(&self, _: &Ed25519Signature, _: &Ed25519Public, _: &[u8]) -> bool {
            false
        }
    }

    fn key(b: u8) -> Ed25519Public {
        Ed25519Public([b; 32])
    }

    fn state() -> DisputesState {
        let validator = |b| ValidatorData {
            ed25519: key(b),
            ..Default::default()
        };
        DisputesState {
            kappa: ValidatorSet(vec![validator(1), validator(2)]),
            lambda: ValidatorSet(vec![validator(3)]),
            psi: DisputesRecords {
                offenders: vec![key(2)],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn extrinsic() -> DisputesExtrinsic {
        DisputesExtrinsic {
            verdicts: vec![Verdict {
                target: Hash32([7; 32]),
                age: 0,
                votes: vec![],
            }],
            ..Default::default()
        }
    }

    fn culprit(k: u8, target: u8) -> Culprit {
        Culprit {
            target: Hash32([target; 32]),
            key: key(k),
            signature: Ed25519Signature::default(),
        }
    }

    fn fault(k: u8, target: u8, vote: bool) -> Fault {
        Fault {
            target: Hash32([target; 32]),
            vote,
            key: key(k),
            signature: Ed25519Signature::default(),
        }
    }

    #[test]
    fn test_previous_set_keys_are_known() {
        let state = state();
        let extrinsic = extrinsic();
        let scope = AttestationScope::new(&extrinsic, &state);
        assert!(scope.is_known_key(&key(3)));
        assert!(!scope.is_known_key(&key(4)));
        assert!(validate_culprits(&[culprit(3, 7)], &scope, &AcceptAllVerifier).is_ok());
    }

    #[test]
    fn test_culprit_rules_in_order() {
        let state = state();
        let extrinsic = extrinsic();
        let scope = AttestationScope::new(&extrinsic, &state);
        let check = |c: Culprit| validate_culprits(&[c], &scope, &AcceptAllVerifier);

        // already reported wins over every other problem
        assert_eq!(check(culprit(2, 9)), Err(DisputesErrorCode::OffenderAlreadyReported));
        assert_eq!(check(culprit(4, 9)), Err(DisputesErrorCode::CulpritsVerdictNotBad));
        assert_eq!(check(culprit(4, 7)), Err(DisputesErrorCode::BadGuarantorKey));
        assert_eq!(
            validate_culprits(&[culprit(1, 7)], &scope, &RejectAll),
            Err(DisputesErrorCode::BadSignature)
        );
    }

    #[test]
    fn test_fault_rules_in_order() {
        let state = state();
        let extrinsic = extrinsic();
        let scope = AttestationScope::new(&extrinsic, &state);
        let check = |f: Fault| validate_faults(&[f], &scope, &AcceptAllVerifier);

        assert_eq!(check(fault(2, 7, true)), Err(DisputesErrorCode::OffenderAlreadyReported));
        assert_eq!(check(fault(1, 9, true)), Err(DisputesErrorCode::FaultVerdictWrong));
        assert_eq!(check(fault(1, 9, false)), Err(DisputesErrorCode::FaultsVerdictNotGood));
        assert_eq!(check(fault(4, 7, false)), Err(DisputesErrorCode::BadAuditorKey));
        assert_eq!(
            validate_faults(&[fault(1, 7, false)], &scope, &RejectAll),
            Err(DisputesErrorCode::BadSignature)
        );
        assert!(check(fault(1, 7, false)).is_ok());
    }
}
