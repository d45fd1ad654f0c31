// DISPUTES ERROR CODES
// Every rejection the transition can produce. All of them are validation outcomes:
// the batch is refused and the pre-state is kept, nothing is fatal to the caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputesErrorCode {
    #[error("verdict targets are not sorted and unique")]
    VerdictsNotSortedUnique,

    #[error("culprit keys are not sorted and unique")]
    CulpritsNotSortedUnique,

    #[error("fault keys are not sorted and unique")]
    FaultsNotSortedUnique,

    #[error("offender already reported")]
    OffenderAlreadyReported,

    #[error("culprit does not accompany a bad verdict")]
    CulpritsVerdictNotBad,

    #[error("fault carries a valid vote")]
    FaultVerdictWrong,

    #[error("fault does not accompany a good verdict")]
    FaultsVerdictNotGood,

    #[error("guarantor key is not a known validator key")]
    BadGuarantorKey,

    #[error("auditor key is not a known validator key")]
    BadAuditorKey,

    #[error("signature verification failed")]
    BadSignature,

    #[error("report already judged")]
    AlreadyJudged,

    #[error("verdict age does not match the epoch marker")]
    BadJudgementAge,

    #[error("votes are not sorted and unique by validator index")]
    JudgementsNotSortedUnique,

    #[error("vote index outside the validator set")]
    #[serde(alias = "bad_validator_index")]
    InvalidVoteIndex,

    #[error("good verdict without faults")]
    NotEnoughFaults,

    #[error("bad verdict with fewer than two culprits")]
    NotEnoughCulprits,

    #[error("vote split does not settle the verdict")]
    BadVoteSplit,
}

impl DisputesErrorCode {
    /// Wire name of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            DisputesErrorCode::VerdictsNotSortedUnique => "verdicts_not_sorted_unique",
            DisputesErrorCode::CulpritsNotSortedUnique => "culprits_not_sorted_unique",
            DisputesErrorCode::FaultsNotSortedUnique => "faults_not_sorted_unique",
            DisputesErrorCode::OffenderAlreadyReported => "offender_already_reported",
            DisputesErrorCode::CulpritsVerdictNotBad => "culprits_verdict_not_bad",
            DisputesErrorCode::FaultVerdictWrong => "fault_verdict_wrong",
            DisputesErrorCode::FaultsVerdictNotGood => "faults_verdict_not_good",
            DisputesErrorCode::BadGuarantorKey => "bad_guarantor_key",
            DisputesErrorCode::BadAuditorKey => "bad_auditor_key",
            DisputesErrorCode::BadSignature => "bad_signature",
            DisputesErrorCode::AlreadyJudged => "already_judged",
            DisputesErrorCode::BadJudgementAge => "bad_judgement_age",
            DisputesErrorCode::JudgementsNotSortedUnique => "judgements_not_sorted_unique",
            DisputesErrorCode::InvalidVoteIndex => "invalid_vote_index",
            DisputesErrorCode::NotEnoughFaults => "not_enough_faults",
            DisputesErrorCode::NotEnoughCulprits => "not_enough_culprits",
            DisputesErrorCode::BadVoteSplit => "bad_vote_split",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_name_matches_serde() {
        let codes = [
            DisputesErrorCode::VerdictsNotSortedUnique,
            DisputesErrorCode::OffenderAlreadyReported,
            DisputesErrorCode::FaultVerdictWrong,
            DisputesErrorCode::InvalidVoteIndex,
            DisputesErrorCode::BadVoteSplit,
        ];
        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn test_validator_index_alias() {
        let code: DisputesErrorCode = serde_json::from_str("\"bad_validator_index\"").unwrap();
        assert_eq!(code, DisputesErrorCode::InvalidVoteIndex);
    }
}
