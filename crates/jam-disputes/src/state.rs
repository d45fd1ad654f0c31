use crate::records::DisputesRecords;
use crate::types::{AvailabilityAssignments, TimeSlot, ValidatorSet};
use serde::{Deserialize, Serialize};

/// State snapshot threaded through the disputes transition.
///
/// Only `psi` and `rho` are ever changed by a transition; `tau`, `kappa` and `lambda` are
/// carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisputesState {
    /// Judgement records and offenders
    pub psi: DisputesRecords,
    /// Pending availability assignments, one slot per core
    pub rho: AvailabilityAssignments,
    /// Current timeslot
    pub tau: TimeSlot,
    /// Current validator set
    pub kappa: ValidatorSet,
    /// Previous-epoch validator set
    pub lambda: ValidatorSet,
}

impl DisputesState {
    /// New snapshot sharing `tau`, `kappa` and `lambda` with `self`.
    pub fn with_updates(&self, psi: DisputesRecords, rho: AvailabilityAssignments) -> Self {
        DisputesState {
            psi,
            rho,
            tau: self.tau,
            kappa: self.kappa.clone(),
            lambda: self.lambda.clone(),
        }
    }
}
