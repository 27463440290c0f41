//! Integration tests for entities_data_handling crate
//!
//! These tests verify that terms, host values and buffers work together
//! the way the codec layers use them.

use entities_data_handling::*;

#[test]
fn test_reply_term_converts_to_resendable_value() {
    let pid = ErlangPid::new("server@localhost", 40, 0, 1);
    let reply = Term::Tuple(vec![Term::atom("ok"), Term::Pid(pid.clone())]);

    let value = Value::from(reply);
    match value {
        Value::Array(items) => {
            assert_eq!(items.len(), 2);
            assert_eq!(items[0], Value::Text("ok".to_string()));
            assert_eq!(items[1], Value::Pid(pid));
        }
        other => panic!("expected array, got {}", other.type_name()),
    }
}

#[test]
fn test_nested_value_tree() {
    let args: Value = vec![
        Value::from("lists"),
        Value::from(vec![Value::from(1i64), Value::from(2i64)]),
        Value::from(LinkHandle(1)),
    ]
    .into();

    if let Value::Array(items) = &args {
        assert_eq!(items[1].type_name(), "array");
        assert_eq!(items[2], Value::Link(LinkHandle(1)));
    } else {
        panic!("expected array");
    }
}

#[test]
fn test_buffer_composition() {
    let mut outer = EncodedBuffer::from_bytes(vec![VERSION_MAGIC]);
    let inner = EncodedBuffer::from_bytes(vec![97, 5]);
    outer.append(&inner);
    assert_eq!(outer.as_bytes(), &[VERSION_MAGIC, 97, 5]);

    outer.advance(1);
    assert_eq!(outer.remaining(), &[97, 5]);
}

#[test]
fn test_term_serializes_to_json() {
    let term = Term::List(vec![Term::atom("a"), Term::Integer(1)]);
    let json = serde_json::to_value(&term).unwrap();
    assert_eq!(json["List"][0]["Atom"], "a");
    assert_eq!(json["List"][1]["Integer"], 1);
}

#[test]
fn test_pid_round_trips_through_json() {
    let pid = ErlangPid::new("node@host", 5, 6, 7);
    let json = serde_json::to_string(&pid).unwrap();
    let back: ErlangPid = serde_json::from_str(&json).unwrap();
    assert_eq!(back, pid);
}
