// Shared fixtures: a small network of validators with real Ed25519 keys.
#![allow(dead_code)]

use ed25519_dalek::{Signer, SigningKey};
use jam_disputes::types::{PackageSpec, WorkReport};
use jam_disputes::verifier::{culprit_message, fault_message, vote_message};
use jam_disputes::{
    AvailabilityAssignment, AvailabilityAssignments, Culprit, DisputesState, Ed25519Public,
    Ed25519Signature, Fault, Hash32, Judgement, ValidatorData, ValidatorSet, Verdict,
};

pub const VALIDATORS: u8 = 6;
pub const CORES: usize = 2;
pub const TAU: u32 = 0;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub struct Network {
    pub current: Vec<SigningKey>,
    pub previous: Vec<SigningKey>,
    pub outsider: SigningKey,
    pub state: DisputesState,
}

fn validator(key: &SigningKey) -> ValidatorData {
    ValidatorData {
        ed25519: public(key),
        ..Default::default()
    }
}

pub fn public(key: &SigningKey) -> Ed25519Public {
    Ed25519Public(key.verifying_key().to_bytes())
}

pub fn report(byte: u8) -> Hash32 {
    Hash32([byte; 32])
}

pub fn assignment(target: Hash32) -> Option<AvailabilityAssignment> {
    Some(AvailabilityAssignment {
        report: WorkReport {
            package_spec: PackageSpec {
                hash: target,
                rest: Default::default(),
            },
            rest: Default::default(),
        },
        timeout: 5,
    })
}

impl Network {
    pub fn new() -> Self {
        init_logging();
        let current: Vec<_> = (1..=VALIDATORS).map(|s| SigningKey::from_bytes(&[s; 32])).collect();
        let previous: Vec<_> = (1..=VALIDATORS)
            .map(|s| SigningKey::from_bytes(&[s + 100; 32]))
            .collect();
        let outsider = SigningKey::from_bytes(&[250; 32]);
        let state = DisputesState {
            tau: TAU,
            kappa: ValidatorSet(current.iter().map(validator).collect()),
            lambda: ValidatorSet(previous.iter().map(validator).collect()),
            rho: AvailabilityAssignments(vec![None; CORES]),
            ..Default::default()
        };
        Network {
            current,
            previous,
            outsider,
            state,
        }
    }

    /// Place `target` as the pending report of `core`.
    pub fn pending(mut self, core: usize, target: Hash32) -> Self {
        self.state.rho.0[core] = assignment(target);
        self
    }

    /// Verdict with one vote per entry of `votes`, cast by validators 0, 1, 2, ...
    pub fn verdict(&self, target: Hash32, votes: &[bool]) -> Verdict {
        Verdict {
            target,
            age: self.state.tau,
            votes: votes
                .iter()
                .enumerate()
                .map(|(i, &vote)| self.vote(i as u16, vote))
                .collect(),
        }
    }

    pub fn vote(&self, index: u16, vote: bool) -> Judgement {
        let key = &self.current[usize::from(index) % self.current.len()];
        Judgement {
            vote,
            index,
            signature: sign(key, &vote_message(vote, index)),
        }
    }
}

pub fn sign(key: &SigningKey, message: &[u8]) -> Ed25519Signature {
    Ed25519Signature(key.sign(message).to_bytes())
}

pub fn culprit(key: &SigningKey, target: Hash32) -> Culprit {
    Culprit {
        target,
        key: public(key),
        signature: sign(key, &culprit_message(&target)),
    }
}

pub fn fault(key: &SigningKey, target: Hash32) -> Fault {
    Fault {
        target,
        vote: false,
        key: public(key),
        signature: sign(key, &fault_message(&target)),
    }
}

pub fn sorted_culprits(mut culprits: Vec<Culprit>) -> Vec<Culprit> {
    culprits.sort_by(|a, b| a.key.cmp(&b.key));
    culprits
}

pub fn sorted_faults(mut faults: Vec<Fault>) -> Vec<Fault> {
    faults.sort_by(|a, b| a.key.cmp(&b.key));
    faults
}
