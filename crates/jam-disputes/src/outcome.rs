use crate::error::DisputesErrorCode;
use crate::state::DisputesState;
use crate::types::OffendersMark;
use serde::{Deserialize, Serialize};

/// Success payload of the transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputData {
    /// Offenders marked by this batch only, ascending and unique
    pub offenders_mark: OffendersMark,
}

/// Output of the transition in its wire form: `{"ok": {...}}` or `{"err": "<code>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputesOutput {
    Ok(OutputData),
    Err(DisputesErrorCode),
}

impl DisputesOutput {
    pub fn is_ok(&self) -> bool {
        matches!(self, DisputesOutput::Ok(_))
    }

    pub fn error(&self) -> Option<DisputesErrorCode> {
        match self {
            DisputesOutput::Ok(_) => None,
            DisputesOutput::Err(code) => Some(*code),
        }
    }
}

impl From<Result<OffendersMark, DisputesErrorCode>> for DisputesOutput {
    fn from(result: Result<OffendersMark, DisputesErrorCode>) -> Self {
        match result {
            Ok(offenders_mark) => DisputesOutput::Ok(OutputData { offenders_mark }),
            Err(code) => DisputesOutput::Err(code),
        }
    }
}

impl From<DisputesOutput> for Result<OffendersMark, DisputesErrorCode> {
    fn from(output: DisputesOutput) -> Self {
        match output {
            DisputesOutput::Ok(data) => Ok(data.offenders_mark),
            DisputesOutput::Err(code) => Err(code),
        }
    }
}

/// Output paired with the state the caller continues from. On error the state is the
/// pre-state, unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub output: DisputesOutput,
    pub post_state: DisputesState,
}
