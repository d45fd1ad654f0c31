// DISPUTES STATE TRANSITION
// Adjudicates a disputes batch against a state snapshot.
//
// INVARIANTS:
// 1. Pre-check -> culprits -> faults -> verdicts, in that order
// 2. The first violated rule rejects the whole batch
// 3. A rejected batch leaves the state exactly as it was (work happens on private copies)
// 4. ψ only grows; ρ slots holding a judged report are emptied
// 5. The output reports this batch's offenders only

use crate::attestation::{validate_culprits, validate_faults, AttestationScope};
use crate::classifier::classify_verdict;
use crate::config::{ConfigError, DisputesConfig};
use crate::error::DisputesErrorCode;
use crate::outcome::{DisputesOutput, Transition};
use crate::precheck::check_ordering;
use crate::records::sort_dedup;
use crate::state::DisputesState;
use crate::types::{DisputesExtrinsic, OffendersMark};
use crate::verifier::AttestationVerifier;
use log::debug;

/// Disputes transition bound to protocol parameters and a signature verifier.
#[derive(Debug, Clone)]
pub struct Adjudicator<V> {
    config: DisputesConfig,
    verifier: V,
}

impl<V: AttestationVerifier> Adjudicator<V> {
    pub fn new(config: DisputesConfig, verifier: V) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Adjudicator { config, verifier })
    }

    /// Adjudicate `extrinsic` against `pre_state`.
    ///
    /// Returns this batch's offender marks and the post-state. On error nothing is produced
    /// and `pre_state` remains the caller's current state.
    pub fn adjudicate(
        &self,
        extrinsic: &DisputesExtrinsic,
        pre_state: &DisputesState,
    ) -> Result<(OffendersMark, DisputesState), DisputesErrorCode> {
        if extrinsic.is_empty() {
            return Ok((Vec::new(), pre_state.clone()));
        }

        check_ordering(extrinsic).map_err(|code| rejected("pre-check", code))?;

        let scope = AttestationScope::new(extrinsic, pre_state);
        validate_culprits(&extrinsic.culprits, &scope, &self.verifier)
            .map_err(|code| rejected("culprits", code))?;
        validate_faults(&extrinsic.faults, &scope, &self.verifier)
            .map_err(|code| rejected("faults", code))?;

        let mut psi = pre_state.psi.clone();
        let mut rho = pre_state.rho.clone();
        let mut offenders_mark = Vec::new();

        for verdict in &extrinsic.verdicts {
            let classified = classify_verdict(
                verdict,
                &extrinsic.culprits,
                &extrinsic.faults,
                pre_state,
                &scope,
                &self.config,
                &self.verifier,
            )
            .map_err(|code| rejected("verdicts", code))?;

            psi.record(classified.class, classified.target);
            offenders_mark.extend(classified.offenders);

            let cleared = rho.clear_report(&classified.target);
            if cleared > 0 {
                debug!("cleared {} assignment(s) of {}", cleared, classified.target);
            }
        }

        sort_dedup(&mut offenders_mark);
        psi.extend_offenders(offenders_mark.iter().copied());
        psi.normalize();

        debug!(
            "disputes accepted: {} verdict(s), {} new offender(s)",
            extrinsic.verdicts.len(),
            offenders_mark.len()
        );
        Ok((offenders_mark, pre_state.with_updates(psi, rho)))
    }

    /// Adjudicate and build the wire output together with the state to continue from.
    pub fn apply(&self, extrinsic: &DisputesExtrinsic, pre_state: &DisputesState) -> Transition {
        match self.adjudicate(extrinsic, pre_state) {
            Ok((offenders_mark, post_state)) => Transition {
                output: DisputesOutput::from(Ok(offenders_mark)),
                post_state,
            },
            Err(code) => Transition {
                output: DisputesOutput::Err(code),
                post_state: pre_state.clone(),
            },
        }
    }
}

fn rejected(stage: &str, code: DisputesErrorCode) -> DisputesErrorCode {
    debug!("disputes rejected at {}: {}", stage, code.as_str());
    code
}
