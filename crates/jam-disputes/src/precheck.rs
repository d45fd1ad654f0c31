// STRUCTURAL PRE-CHECK
// Ordering rules on the disputes batch, checked before anything is resolved or verified.

use crate::error::DisputesErrorCode;
use crate::types::DisputesExtrinsic;
use log::trace;

/// Strictly ascending, hence unique.
pub(crate) fn is_sorted_unique<T: Ord>(items: &[T]) -> bool {
    items.windows(2).all(|w| w[0] < w[1])
}

/// Verdict targets, culprit keys and fault keys must each be strictly ascending.
pub fn check_ordering(extrinsic: &DisputesExtrinsic) -> Result<(), DisputesErrorCode> {
    let targets: Vec<_> = extrinsic.verdicts.iter().map(|v| v.target).collect();
    if !is_sorted_unique(&targets) {
        return Err(DisputesErrorCode::VerdictsNotSortedUnique);
    }

    let culprit_keys: Vec<_> = extrinsic.culprits.iter().map(|c| c.key).collect();
    if !is_sorted_unique(&culprit_keys) {
        return Err(DisputesErrorCode::CulpritsNotSortedUnique);
    }

    let fault_keys: Vec<_> = extrinsic.faults.iter().map(|f| f.key).collect();
    if !is_sorted_unique(&fault_keys) {
        return Err(DisputesErrorCode::FaultsNotSortedUnique);
    }

    trace!(
        "ordering ok: {} verdicts, {} culprits, {} faults",
        targets.len(),
        culprit_keys.len(),
        fault_keys.len()
    );
    Ok(())
}
