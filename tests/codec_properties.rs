//! Properties of the codec over generated interpreter histories.

use proptest::prelude::*;
use serde_json::Number;
use trace_visualizer::codec::{decode, encode, to_string};
use trace_visualizer::inspect::check_continuity;
use trace_visualizer::model::{
    Bindings, ExecutionTrace, History, ObjectKey, Snapshot, SnapshotFrame, SnapshotObject,
    SnapshotValue,
};

/// What an allocation is; fixed for its whole lifetime
#[derive(Debug, Clone, Copy)]
enum Kind {
    Node,
    Pair,
    Stack,
    Queue,
    List,
    Set,
}

/// One allocation: its kind and the contiguous range of snapshots it lives in
#[derive(Debug, Clone)]
struct Allocation {
    kind: Kind,
    born: usize,
    lifetime: usize,
}

/// Everything needed to build one history deterministically
#[derive(Debug, Clone)]
struct Plan {
    snapshots: usize,
    allocations: Vec<Allocation>,
    primitives: Vec<SnapshotValue>,
    picks: Vec<u8>,
}

fn primitive() -> impl Strategy<Value = SnapshotValue> {
    prop_oneof![
        Just(SnapshotValue::Null),
        any::<bool>().prop_map(SnapshotValue::Bool),
        any::<i64>().prop_map(SnapshotValue::from),
        any::<f64>().prop_filter_map("finite floats only", |f| {
            Number::from_f64(f).map(SnapshotValue::Number)
        }),
        "[a-zA-Z0-9 \"\\\\]{0,8}".prop_map(SnapshotValue::Str),
    ]
}

fn kind() -> impl Strategy<Value = Kind> {
    prop_oneof![
        Just(Kind::Node),
        Just(Kind::Pair),
        Just(Kind::Stack),
        Just(Kind::Queue),
        Just(Kind::List),
        Just(Kind::Set),
    ]
}

fn plan() -> impl Strategy<Value = Plan> {
    (1usize..6).prop_flat_map(|snapshots| {
        (
            Just(snapshots),
            prop::collection::vec(
                (kind(), 0..snapshots, 1..=snapshots).prop_map(|(kind, born, lifetime)| {
                    Allocation {
                        kind,
                        born,
                        lifetime,
                    }
                }),
                0..8,
            ),
            prop::collection::vec(primitive(), 1..12),
            prop::collection::vec(any::<u8>(), 1..32),
        )
            .prop_map(|(snapshots, allocations, primitives, picks)| Plan {
                snapshots,
                allocations,
                primitives,
                picks,
            })
    })
}

/// Deterministic value chooser over a plan's seeds
struct Chooser<'a> {
    plan: &'a Plan,
    cursor: usize,
}

impl Chooser<'_> {
    fn pick(&mut self) -> usize {
        let pick = self.plan.picks[self.cursor % self.plan.picks.len()] as usize;
        self.cursor += 1;
        pick
    }

    /// A reference to a live allocation two times in three, else a primitive
    fn value(&mut self, live: &[ObjectKey]) -> SnapshotValue {
        let pick = self.pick();
        if pick % 3 != 0 && !live.is_empty() {
            SnapshotValue::Object(live[pick % live.len()])
        } else {
            self.plan.primitives[pick % self.plan.primitives.len()].clone()
        }
    }

    fn values(&mut self, live: &[ObjectKey]) -> Vec<SnapshotValue> {
        let count = self.pick() % 4;
        (0..count).map(|_| self.value(live)).collect()
    }
}

fn build_history(plan: &Plan) -> History {
    let mut chooser = Chooser { plan, cursor: 0 };
    let mut history = History::new("class Main {}");

    for index in 0..plan.snapshots {
        let live: Vec<ObjectKey> = plan
            .allocations
            .iter()
            .enumerate()
            .filter(|(_, a)| a.born <= index && index < a.born + a.lifetime)
            .map(|(key, _)| ObjectKey(1000 + key as u64 * 7))
            .collect();

        let line = index as u32 + 1;
        let mut snapshot = Snapshot::new(line, "main");

        // Objects may point at any live object, themselves included
        for (key, allocation) in plan.allocations.iter().enumerate() {
            let key = ObjectKey(1000 + key as u64 * 7);
            if !live.contains(&key) {
                continue;
            }
            let object = match allocation.kind {
                Kind::Node => SnapshotObject::instance("Node")
                    .with_field("next", chooser.value(&live))
                    .with_field("value", chooser.value(&live))
                    .into(),
                Kind::Pair => SnapshotObject::instance("Pair")
                    .with_field("left", chooser.value(&live))
                    .with_field("right", chooser.value(&live))
                    .into(),
                Kind::Stack => SnapshotObject::Stack(chooser.values(&live)),
                Kind::Queue => SnapshotObject::Queue(chooser.values(&live)),
                Kind::List => SnapshotObject::List(chooser.values(&live)),
                Kind::Set => SnapshotObject::Set(chooser.values(&live)),
            };
            snapshot = snapshot.with_object(key, object);
        }

        let frames = 1 + chooser.pick() % 3;
        for depth in 0..frames {
            let mut frame = SnapshotFrame::new(format!("f{}", depth), line, depth as u64 + 1);
            for local in 0..chooser.pick() % 4 {
                frame = frame.with_local(format!("v{}", local), chooser.value(&live));
            }
            if depth + 1 == frames {
                frame = frame.highlighted();
            }
            snapshot = snapshot.with_frame(frame);
        }
        for global in 0..chooser.pick() % 3 {
            snapshot = snapshot.with_global(format!("g{}", global), chooser.value(&live));
        }

        history.push(snapshot);
    }

    history
}

fn names_match_keys(bindings: &Bindings) -> bool {
    let names = bindings.names();
    let mut unique = names.to_vec();
    unique.sort();
    unique.dedup();
    unique.len() == names.len()
        && bindings.iter().count() == names.len()
        && names.iter().all(|name| bindings.get(name).is_some())
}

fn encoded(plan: &Plan) -> ExecutionTrace {
    encode(&build_history(plan)).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_encoded_history_round_trips(plan in plan()) {
        let trace = encoded(&plan);
        for pretty in [false, true] {
            let text = to_string(&trace, pretty).unwrap();
            prop_assert_eq!(decode(&text).unwrap(), trace.clone());
        }
    }

    #[test]
    fn prop_every_ref_resolves(plan in plan()) {
        let trace = encoded(&plan);
        for step in &trace {
            prop_assert!(step.dangling_references().is_empty());
            for id in step.references() {
                prop_assert!(step.object(id).is_some());
            }
        }
    }

    #[test]
    fn prop_ordered_names_equal_keys(plan in plan()) {
        let trace = encoded(&plan);
        for step in &trace {
            prop_assert!(names_match_keys(&step.globals));
            for frame in &step.stack {
                prop_assert!(names_match_keys(&frame.locals));
            }
        }
    }

    #[test]
    fn prop_encoded_history_is_continuous(plan in plan()) {
        let trace = encoded(&plan);
        let report = check_continuity(&trace);
        prop_assert!(report.is_clean(), "{:?}", report.issues);
        prop_assert_eq!(report.steps_checked, plan.snapshots);
    }

    #[test]
    fn prop_decode_is_idempotent(plan in plan()) {
        let text = to_string(&encoded(&plan), false).unwrap();
        prop_assert_eq!(decode(&text).unwrap(), decode(&text).unwrap());
    }
}
