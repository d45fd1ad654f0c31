// Conformance-style vectors in their JSON wire form.

use jam_disputes::{
    AcceptAllVerifier, Adjudicator, DisputesConfig, DisputesErrorCode, DisputesExtrinsic,
    DisputesOutput, DisputesState,
};
use serde_json::{json, Value};

fn hex(byte: u8, len: usize) -> String {
    format!("0x{}", format!("{byte:02x}").repeat(len))
}

fn validator(byte: u8) -> Value {
    json!({
        "bandersnatch": hex(0xb0 + byte, 32),
        "ed25519": hex(byte, 32),
        "bls": hex(0xc0 + byte, 144),
        "metadata": hex(0, 128)
    })
}

fn pending(byte: u8) -> Value {
    json!({
        "report": {
            "package_spec": {
                "hash": hex(byte, 32),
                "length": 1024,
                "erasure_root": hex(0xee, 32),
                "exports_root": hex(0xef, 32),
                "exports_count": 0
            },
            "core_index": 0,
            "authorizer_hash": hex(0xaa, 32),
            "auth_output": "0x",
            "results": []
        },
        "timeout": 11
    })
}

fn pre_state() -> Value {
    json!({
        "psi": {"good": [], "bad": [], "wonky": [], "offenders": []},
        "rho": [pending(0x11), pending(0x22)],
        "tau": 0,
        "kappa": [validator(1), validator(2), validator(3)],
        "lambda": [validator(4), validator(5), validator(6)]
    })
}

fn vote(vote: bool, index: u16) -> Value {
    json!({"vote": vote, "index": index, "signature": hex(0x5a, 64)})
}

fn culprit(key: u8) -> Value {
    json!({"target": hex(0x11, 32), "key": hex(key, 32), "signature": hex(0x5b, 64)})
}

fn bad_report_batch() -> Value {
    json!({
        "verdicts": [{
            "target": hex(0x11, 32),
            "age": 0,
            "votes": [vote(false, 0), vote(false, 1), vote(false, 2)]
        }],
        "culprits": [culprit(1), culprit(2)],
        "faults": []
    })
}

fn apply(disputes: Value, pre_state: Value) -> (Value, Value) {
    let extrinsic: DisputesExtrinsic = serde_json::from_value(disputes).unwrap();
    let pre_state: DisputesState = serde_json::from_value(pre_state).unwrap();
    let adjudicator = Adjudicator::new(DisputesConfig::tiny(), AcceptAllVerifier).unwrap();
    let transition = adjudicator.apply(&extrinsic, &pre_state);
    (
        serde_json::to_value(&transition.output).unwrap(),
        serde_json::to_value(&transition.post_state).unwrap(),
    )
}

#[test]
fn test_bad_report_vector() {
    let (output, post_state) = apply(bad_report_batch(), pre_state());

    assert_eq!(output, json!({"ok": {"offenders_mark": [hex(1, 32), hex(2, 32)]}}));

    let mut expected = pre_state();
    expected["psi"] = json!({
        "good": [],
        "bad": [hex(0x11, 32)],
        "wonky": [],
        "offenders": [hex(1, 32), hex(2, 32)]
    });
    expected["rho"][0] = Value::Null;
    assert_eq!(post_state, expected);
}

#[test]
fn test_rejected_vector_keeps_pre_state() {
    let mut disputes = bad_report_batch();
    disputes["culprits"] = json!([culprit(2), culprit(1)]);

    let (output, post_state) = apply(disputes, pre_state());
    assert_eq!(output, json!({"err": "culprits_not_sorted_unique"}));
    assert_eq!(post_state, pre_state());
}

#[test]
fn test_missing_batch_sections_default_to_empty() {
    let (output, post_state) = apply(json!({}), pre_state());
    assert_eq!(output, json!({"ok": {"offenders_mark": []}}));
    assert_eq!(post_state, pre_state());
}

#[test]
fn test_expected_outputs_parse() {
    let alias: DisputesOutput = serde_json::from_value(json!({"err": "bad_validator_index"})).unwrap();
    assert_eq!(alias.error(), Some(DisputesErrorCode::InvalidVoteIndex));

    let ok: DisputesOutput =
        serde_json::from_value(json!({"ok": {"offenders_mark": [hex(7, 32)]}})).unwrap();
    assert!(ok.is_ok());

    assert!(serde_json::from_value::<DisputesOutput>(json!({"err": "no_such_code"})).is_err());
}

#[test]
fn test_malformed_keys_are_rejected_when_parsing() {
    let mut state = pre_state();
    state["kappa"][0]["ed25519"] = json!(hex(1, 31));
    assert!(serde_json::from_value::<DisputesState>(state).is_err());

    let mut state = pre_state();
    state["kappa"][0]["ed25519"] = json!("0xzz");
    assert!(serde_json::from_value::<DisputesState>(state).is_err());
}
