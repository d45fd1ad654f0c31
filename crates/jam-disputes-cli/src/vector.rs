// CONFORMANCE VECTORS
// A vector pairs an input batch and pre-state with the expected output and post-state.
//
// INVARIANTS:
// 1. A vector passes only if both the output and the post-state match exactly
// 2. Differences are reported as JSON paths, computed on the serialized forms

use anyhow::{Context, Result};
use jam_disputes::{
    Adjudicator, AttestationVerifier, DisputesExtrinsic, DisputesOutput, DisputesState,
    Ed25519Public,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Differences listed before the report is truncated.
const MAX_DIFFERENCES: usize = 32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorInput {
    pub disputes: DisputesExtrinsic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestVector {
    pub input: VectorInput,
    pub pre_state: DisputesState,
    pub output: DisputesOutput,
    pub post_state: DisputesState,
}

impl TestVector {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading vector {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing vector {}", path.display()))
    }

    /// Expected offender marks that no culprit or fault of the input accounts for.
    pub fn unexplained_marks(&self) -> Vec<Ed25519Public> {
        let DisputesOutput::Ok(expected) = &self.output else {
            return Vec::new();
        };
        let disputes = &self.input.disputes;
        let accused: BTreeSet<_> = disputes
            .culprits
            .iter()
            .map(|c| c.key)
            .chain(disputes.faults.iter().map(|f| f.key))
            .collect();
        expected
            .offenders_mark
            .iter()
            .filter(|key| !accused.contains(*key))
            .copied()
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct VectorReport {
    pub output: DisputesOutput,
    pub output_matches: bool,
    pub state_matches: bool,
    pub differences: Vec<String>,
}

impl VectorReport {
    pub fn passed(&self) -> bool {
        self.output_matches && self.state_matches
    }
}

/// Apply the vector's batch and compare against its expectations.
pub fn run_vector<V: AttestationVerifier>(
    vector: &TestVector,
    adjudicator: &Adjudicator<V>,
) -> Result<VectorReport> {
    let transition = adjudicator.apply(&vector.input.disputes, &vector.pre_state);

    let mut differences = Vec::new();
    diff_values(
        "output",
        &serde_json::to_value(&transition.output)?,
        &serde_json::to_value(&vector.output)?,
        &mut differences,
    );
    diff_values(
        "post_state",
        &serde_json::to_value(&transition.post_state)?,
        &serde_json::to_value(&vector.post_state)?,
        &mut differences,
    );
    differences.truncate(MAX_DIFFERENCES);

    Ok(VectorReport {
        output_matches: transition.output == vector.output,
        state_matches: transition.post_state == vector.post_state,
        output: transition.output,
        differences,
    })
}

fn diff_values(path: &str, computed: &Value, expected: &Value, out: &mut Vec<String>) {
    if out.len() > MAX_DIFFERENCES || computed == expected {
        return;
    }
    match (computed, expected) {
        (Value::Object(a), Value::Object(b)) => {
            let keys: BTreeSet<&String> = a.keys().chain(b.keys()).collect();
            for key in keys {
                let child = format!("{path}.{key}");
                match (a.get(key), b.get(key)) {
                    (Some(x), Some(y)) => diff_values(&child, x, y, out),
                    (Some(_), None) => out.push(format!("{child}: unexpected")),
                    (None, Some(_)) => out.push(format!("{child}: missing")),
                    (None, None) => {}
                }
            }
        }
        (Value::Array(a), Value::Array(b)) if a.len() == b.len() => {
            for (i, (x, y)) in a.iter().zip(b).enumerate() {
                diff_values(&format!("{path}[{i}]"), x, y, out);
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            out.push(format!("{path}: {} entries, expected {}", a.len(), b.len()));
        }
        _ => out.push(format!("{path}: computed {computed}, expected {expected}")),
    }
}
