use pretty_assertions::assert_eq;
use serde_json::{json, Value as Json};
use trace_visualizer::codec::{decode_value, encode};
use trace_visualizer::inspect::{check_continuity, ContinuityIssue};
use trace_visualizer::model::{
    HeapId, HeapObject, History, ObjectKey, ObjectShape, Snapshot, SnapshotFrame, SnapshotObject,
};

fn step(line: u32, heap: Json) -> Json {
    json!({
        "stdout": "",
        "event": "step_line",
        "line": line,
        "stack_to_render": [],
        "globals": {},
        "ordered_globals": [],
        "func_name": "main",
        "heap": heap
    })
}

#[test]
fn test_scenario_c_id_reuse_is_flagged_not_rejected() {
    let doc = json!({
        "code": "",
        "stdin": "",
        "trace": [
            step(1, json!({"172": ["INSTANCE", "Node", ["next", null]]})),
            step(2, json!({"172": ["INSTANCE", "Edge", ["to", null]]}))
        ],
        "userlog": ""
    });

    // Decoding accepts the trace as-is
    let trace = decode_value(&doc).unwrap();
    assert_eq!(trace.len(), 2);
    let second = trace.steps[1]
        .object(HeapId(172))
        .and_then(HeapObject::as_instance)
        .unwrap();
    assert_eq!(second.class_name, "Edge");

    let report = check_continuity(&trace);
    assert!(!report.is_clean());
    assert_eq!(
        report.issues,
        vec![ContinuityIssue::ShapeChanged {
            id: HeapId(172),
            previous_step: 0,
            step: 1,
            before: ObjectShape::Instance("Node".to_string()),
            after: ObjectShape::Instance("Edge".to_string()),
        }]
    );
}

#[test]
fn test_container_kind_change_is_flagged() {
    let doc = json!([
        step(1, json!({"5": ["STACK", 1]})),
        step(2, json!({"5": ["QUEUE", 1]}))
    ]);

    let report = check_continuity(&decode_value(&doc).unwrap());
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].id(), HeapId(5));
    assert_eq!(report.issues[0].step(), 1);
}

#[test]
fn test_resurrected_id_is_flagged() {
    let doc = json!([
        step(1, json!({"7": ["LIST"]})),
        step(2, json!({})),
        step(3, json!({"7": ["LIST", "x"]}))
    ]);

    let report = check_continuity(&decode_value(&doc).unwrap());
    assert_eq!(
        report.issues,
        vec![ContinuityIssue::Resurrected {
            id: HeapId(7),
            last_seen: 0,
            step: 2,
        }]
    );
    assert!(report.issues[0].to_string().contains("reappeared at step 2"));
}

#[test]
fn test_contents_may_change_under_a_stable_id() {
    let doc = json!([
        step(1, json!({"1": ["INSTANCE", "Node", ["name", "a"]]})),
        step(2, json!({"1": ["INSTANCE", "Node", ["name", "b"]]})),
        step(3, json!({"1": ["INSTANCE", "Node", ["name", "c"], ["extra", 1]]}))
    ]);

    let report = check_continuity(&decode_value(&doc).unwrap());
    assert!(report.is_clean());
    assert_eq!(report.steps_checked, 3);
    assert_eq!(report.distinct_ids, 1);
}

#[test]
fn test_encoded_history_is_continuous() {
    let mut history = History::new("");
    for line in 1..=4u32 {
        let mut snapshot = Snapshot::new(line, "main").with_frame(
            SnapshotFrame::new("main", line, 1)
                .with_local("list", ObjectKey(100))
                .highlighted(),
        );
        snapshot = snapshot.with_object(ObjectKey(100), SnapshotObject::List(Vec::new()));
        if line >= 2 {
            snapshot = snapshot.with_object(
                ObjectKey(200),
                SnapshotObject::instance("Node").with_field("value", i64::from(line)),
            );
        }
        history.push(snapshot);
    }

    let trace = encode(&history).unwrap();
    let report = check_continuity(&trace);

    assert!(report.is_clean(), "{:?}", report.issues);
    assert_eq!(report.distinct_ids, 2);
}
