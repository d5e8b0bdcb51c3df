//! Container traversal through the public API.
//!
//! Covers maps (take out, walk, reinsert), sequences, enums, optional and
//! boxed values, dynamic JSON values, shared pointees, and the error paths
//! reached inside them.

use std::{
    any::Any,
    collections::{BTreeMap, HashMap, VecDeque},
    rc::Rc,
};

use hide_fields::{
    hide_fields, Field, Hide, HideError, Hideable, Node, PathSegment, Redactor, SharedPolicy,
    StructNode,
};

#[derive(Clone, Debug, PartialEq, Hide)]
#[cfg_attr(feature = "slog", derive(serde::Serialize))]
struct Credential {
    user: String,
    #[hide = "***"]
    secret: String,
}

fn credential(user: &str, secret: &str) -> Credential {
    Credential {
        user: user.into(),
        secret: secret.into(),
    }
}

#[test]
fn test_map_keys_are_kept_and_values_hidden() {
    let mut by_id: HashMap<u32, Credential> = HashMap::from([
        (1, credential("ada", "pw1")),
        (2, credential("bob", "pw2")),
        (3, credential("eve", "")),
    ]);
    hide_fields(&mut by_id).unwrap();

    let mut keys: Vec<_> = by_id.keys().copied().collect();
    keys.sort_unstable();
    assert_eq!(keys, vec![1, 2, 3]);
    assert_eq!(by_id[&1], credential("ada", "***"));
    assert_eq!(by_id[&2], credential("bob", "***"));
    assert_eq!(by_id[&3], credential("eve", ""));
}

/// Marks every clone so the test can tell whether a map value was copied.
#[derive(Debug, Hide)]
#[cfg_attr(feature = "slog", derive(serde::Serialize))]
struct Tracked {
    #[hide = "x"]
    secret: String,
    #[hide(skip)]
    cloned: bool,
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Self {
            secret: self.secret.clone(),
            cloned: true,
        }
    }
}

#[test]
fn test_map_values_are_moved_not_cloned() {
    let mut map = BTreeMap::from([
        (
            "changed",
            Tracked {
                secret: "s".into(),
                cloned: false,
            },
        ),
        (
            "untouched",
            Tracked {
                secret: String::new(),
                cloned: false,
            },
        ),
    ]);
    let report = Redactor::new().hide(&mut map).unwrap();

    assert_eq!(report.hidden, 1);
    assert_eq!(map.len(), 2);
    assert_eq!(map["changed"].secret, "x");
    assert!(!map["changed"].cloned);
    assert_eq!(map["untouched"].secret, "");
    assert!(!map["untouched"].cloned);
}

#[derive(Clone, Debug, PartialEq, Hide)]
#[cfg_attr(feature = "slog", derive(serde::Serialize))]
struct Pin {
    #[hide = "9"]
    pin: u32,
}

#[test]
fn test_uniquely_owned_rc_in_map_is_hidden() {
    let mut by_id: HashMap<String, Rc<Pin>> = HashMap::from([
        ("a".to_string(), Rc::new(Pin { pin: 1 })),
        ("b".to_string(), Rc::new(Pin { pin: 2 })),
    ]);
    let report = Redactor::new().hide(&mut by_id).unwrap();

    assert_eq!(report.hidden, 2);
    assert!(report.skipped.is_empty());
    assert_eq!(*by_id["a"], Pin { pin: 9 });
    assert_eq!(*by_id["b"], Pin { pin: 9 });
    assert!(by_id.values().all(|pin| Rc::strong_count(pin) == 1));
}

#[test]
fn test_rc_nested_in_map_value_is_hidden() {
    let mut nested: BTreeMap<u8, Vec<Rc<Pin>>> =
        BTreeMap::from([(1, vec![Rc::new(Pin { pin: 5 }), Rc::new(Pin { pin: 0 })])]);
    hide_fields(&mut nested).unwrap();
    assert_eq!(nested[&1][0].pin, 9);
    assert_eq!(nested[&1][1].pin, 0);
}

#[test]
fn test_generic_map_fields_need_no_hideable_keys() {
    use std::hash::Hash;

    #[derive(Clone, Hide)]
    #[cfg_attr(feature = "slog", derive(serde::Serialize))]
    struct Index<K, V> {
        #[hide = "0"]
        by_key: HashMap<K, V>,
        ordered: BTreeMap<K, Credential>,
    }

    /// Usable as a key, but not walkable.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    struct Key(u8);

    fn hide_index<K: Eq + Hash + Ord, V: Hideable>(index: &mut Index<K, V>) {
        hide_fields(index).unwrap();
    }

    let mut index = Index {
        by_key: HashMap::from([(Key(1), 5_u32)]),
        ordered: BTreeMap::from([(Key(2), credential("ada", "pw"))]),
    };
    hide_index(&mut index);
    assert_eq!(index.by_key[&Key(1)], 0);
    assert_eq!(index.ordered[&Key(2)], credential("ada", "***"));
}

#[test]
fn test_nested_map_change_propagates_to_outer_entry() {
    #[derive(Clone, Hide)]
    #[cfg_attr(feature = "slog", derive(serde::Serialize))]
    struct Directory {
        teams: HashMap<String, HashMap<String, Credential>>,
    }

    let mut directory = Directory {
        teams: HashMap::from([(
            "core".to_string(),
            HashMap::from([("lead".to_string(), credential("ada", "pw"))]),
        )]),
    };
    hide_fields(&mut directory).unwrap();
    assert_eq!(directory.teams["core"]["lead"].secret, "***");
    assert_eq!(directory.teams["core"]["lead"].user, "ada");
}

#[test]
fn test_sequences_are_hidden_in_place() {
    #[derive(Clone, Hide)]
    #[cfg_attr(feature = "slog", derive(serde::Serialize))]
    struct Batch {
        items: Vec<Credential>,
        queue: VecDeque<Credential>,
        pair: [Credential; 2],
    }

    let mut batch = Batch {
        items: vec![credential("a", "1"), credential("b", "2"), credential("c", "3")],
        queue: VecDeque::from([credential("d", "4")]),
        pair: [credential("e", "5"), credential("f", "")],
    };
    let report = Redactor::new().hide(&mut batch).unwrap();

    assert_eq!(report.hidden, 5);
    assert_eq!(batch.items.len(), 3);
    assert!(batch.items.iter().all(|item| item.secret == "***"));
    assert_eq!(batch.queue[0].secret, "***");
    assert_eq!(batch.pair[0].secret, "***");
    assert_eq!(batch.pair[1].secret, "");
}

#[test]
fn test_sequence_of_scalars_under_annotation() {
    #[derive(Clone, Hide)]
    #[cfg_attr(feature = "slog", derive(serde::Serialize))]
    struct Readings {
        #[hide = "-1"]
        values: Vec<i32>,
        #[hide]
        labels: Vec<String>,
    }

    let mut readings = Readings {
        values: vec![5, 0, -3],
        labels: vec!["a".into(), String::new()],
    };
    hide_fields(&mut readings).unwrap();
    assert_eq!(readings.values, vec![-1, 0, -1]);
    assert_eq!(readings.labels, vec![String::new(), String::new()]);
}

#[derive(Clone, Debug, PartialEq, Hide)]
#[cfg_attr(feature = "slog", derive(serde::Serialize))]
enum Payment {
    Card {
        holder: String,
        #[hide = "4000000000000000"]
        number: u64,
    },
    Transfer(String, #[hide] String),
    Cash,
}

#[test]
fn test_enums_walk_the_active_variant() {
    let mut payments = vec![
        Payment::Card {
            holder: "ada".into(),
            number: 4_111_111_111_111_111,
        },
        Payment::Transfer("ref-1".into(), "DE89370400440532013000".into()),
        Payment::Cash,
    ];
    hide_fields(&mut payments).unwrap();
    assert_eq!(
        payments,
        vec![
            Payment::Card {
                holder: "ada".into(),
                number: 4_000_000_000_000_000,
            },
            Payment::Transfer("ref-1".into(), String::new()),
            Payment::Cash,
        ]
    );
}

#[test]
fn test_enum_node_is_named_by_variant() {
    let mut payment = Payment::Transfer("r".into(), "iban".into());
    let Node::Struct(node) = payment.node() else {
        panic!("expected a struct node");
    };
    assert_eq!(node.name(), "Payment::Transfer");
    let names: Vec<_> = node.fields().iter().map(Field::name).collect();
    assert_eq!(names, ["0", "1"]);
    assert_eq!(node.fields()[1].hide(), Some(""));
}

#[test]
fn test_optional_and_boxed_fields() {
    #[derive(Clone, Hide)]
    #[cfg_attr(feature = "slog", derive(serde::Serialize))]
    struct Link {
        #[hide = "0"]
        weight: Option<u16>,
        next: Option<Box<Link>>,
    }

    let mut chain = Link {
        weight: Some(3),
        next: Some(Box::new(Link {
            weight: Some(4),
            next: None,
        })),
    };
    hide_fields(&mut chain).unwrap();
    assert_eq!(chain.weight, Some(0));
    let next = chain.next.as_ref().unwrap();
    assert_eq!(next.weight, Some(0));
    assert!(next.next.is_none());
}

// Borrowing structs cannot be `Clone`, which the slog impl requires.
#[cfg(not(feature = "slog"))]
#[test]
fn test_mutable_reference_fields_are_followed() {
    #[derive(Hide)]
    struct View<'a> {
        #[hide = "***"]
        secret: &'a mut String,
    }

    let mut secret = String::from("hunter2");
    let mut view = View {
        secret: &mut secret,
    };
    hide_fields(&mut view).unwrap();
    assert_eq!(secret, "***");
}

#[cfg(feature = "json")]
#[test]
fn test_json_values_are_walked_transparently() {
    use serde_json::json;

    #[derive(Clone, Hide)]
    #[cfg_attr(feature = "slog", derive(serde::Serialize))]
    struct Request {
        path: String,
        #[hide = "7"]
        body: serde_json::Value,
        headers: serde_json::Value,
    }

    let mut request = Request {
        path: "/login".into(),
        body: json!({ "user": "ada", "pin": 1234, "ratio": 0.5, "admin": true }),
        headers: json!({ "accept": "json" }),
    };
    hide_fields(&mut request).unwrap();
    assert_eq!(request.path, "/login");
    assert_eq!(
        request.body,
        json!({ "user": "7", "pin": 7, "ratio": 7, "admin": false })
    );
    assert_eq!(request.headers, json!({ "accept": "json" }));
}

/// A manual implementation that exposes an uninterpretable value.
struct Plugin {
    name: String,
    state: Box<dyn Any>,
}

impl Hideable for Plugin {
    fn node(&mut self) -> Node<'_> {
        Node::Struct(StructNode::new(
            "Plugin",
            vec![
                Field::new("name", Some("x"), &mut self.name),
                Field::new("state", None, &mut self.state),
            ],
        ))
    }
}

#[test]
fn test_unknown_type_aborts_with_path() {
    let mut plugins = vec![
        Plugin {
            name: "auth".into(),
            state: Box::new(1_u8),
        },
        Plugin {
            name: "cache".into(),
            state: Box::new("warm"),
        },
    ];
    let err = hide_fields(&mut plugins).unwrap_err();

    match &err {
        HideError::UnknownType { type_name, path } => {
            assert_eq!(*type_name, "dyn Any");
            assert_eq!(
                path.segments(),
                [PathSegment::Index(0), PathSegment::Field("state")]
            );
        }
        other => panic!("expected UnknownType, got {other:?}"),
    }
    assert_eq!(err.to_string(), "unknown type `dyn Any` at `$[0].state`");
    // No rollback: the field visited before the failure stays hidden.
    assert_eq!(plugins[0].name, "x");
    assert_eq!(plugins[1].name, "cache");
}

/// Owners that may be shared with other teams.
struct Team {
    owners: Vec<Rc<Credential>>,
}

impl Hideable for Team {
    fn node(&mut self) -> Node<'_> {
        Node::Struct(StructNode::new(
            "Team",
            vec![Field::new("owners", Some("***"), &mut self.owners)],
        ))
    }
}

#[test]
fn test_shared_pointees_follow_the_policy() {
    let shared = Rc::new(credential("ada", "pw"));
    let mut team = Team {
        owners: vec![Rc::clone(&shared), Rc::new(credential("bob", "pw"))],
    };

    let err = hide_fields(&mut team).unwrap_err();
    assert!(matches!(err, HideError::ImmutableField { .. }));
    assert_eq!(
        err.to_string(),
        format!(
            "cannot hide `$.owners[0]`: `{}` is shared and cannot be mutated",
            std::any::type_name::<Credential>()
        )
    );

    let report = Redactor::new()
        .with_shared_policy(SharedPolicy::Skip)
        .hide(&mut team)
        .unwrap();
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].to_string(), "$.owners[0]");
    assert_eq!(report.hidden, 2);
    assert_eq!(*shared, credential("ada", "pw"));
    assert_eq!(*team.owners[1], credential("***", "***"));
}

#[test]
fn test_shared_pointees_without_active_hiding_are_passed_over() {
    let shared = Rc::new(credential("ada", "pw"));
    let mut owners = vec![Rc::clone(&shared), Rc::new(credential("bob", "pw"))];

    // Nothing above the shared owner is annotated, so no policy applies. Its
    // own annotated fields stay as they are.
    let report = Redactor::new().hide(&mut owners).unwrap();
    assert!(report.skipped.is_empty());
    assert_eq!(report.hidden, 1);
    assert_eq!(*shared, credential("ada", "pw"));
    assert_eq!(*owners[1], credential("bob", "***"));

    let mut by_name: HashMap<&str, Rc<Credential>> = HashMap::from([("ada", shared)]);
    assert_eq!(hide_fields(&mut by_name), Ok(()));
    assert_eq!(by_name["ada"].secret, "pw");
}
