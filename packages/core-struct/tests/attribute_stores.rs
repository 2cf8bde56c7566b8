use collection_literals::btree;

use openstruct_core::{
    attr_path, structify, Attr, AttrPath, AttributeStore, Key, Lazy, OpenStruct, TrackedStruct,
    Value,
};

fn scalars() -> Vec<Value> {
    vec![
        Value::from(1),
        Value::from(-7),
        Value::from(2.5),
        Value::from("foo"),
        Value::from(true),
        Value::from(vec![1u8, 2, 3]),
    ]
}

fn round_trips_scalars<S: AttributeStore>() {
    for value in scalars() {
        let mut s = S::default();
        s.set(Key::from("foo"), value.clone());
        assert_eq!(s.resolve(&Key::from("foo")).unwrap(), Some(value));
    }
}

fn wraps_nested_maps<S: AttributeStore>() {
    let mut s = S::default();
    s.set(Key::from("foo"), Value::from(btree! { "bar" => 1 }));

    let foo = s.get_raw(&Key::from("foo")).and_then(Attr::as_struct).unwrap();
    assert_eq!(foo.resolve(&Key::from("bar")).unwrap(), Some(Value::from(1)));
    assert_eq!(
        s.lookup_raw(&attr_path!("foo.bar")).map(Attr::to_value),
        Some(Value::from(1))
    );
}

fn preserves_lists<S: AttributeStore>() {
    let mut s = S::default();
    s.set(Key::from("foo"), Value::from(vec![1, 2, 3]));
    assert_eq!(
        s.resolve(&Key::from("foo")).unwrap(),
        Some(Value::from(vec![1, 2, 3]))
    );
}

fn named_and_indexed_writes_agree<S: AttributeStore>() {
    let values = [
        Value::from(1),
        Value::from(vec!["a", "b"]),
        Value::from(btree! { "x" => 1 }),
    ];
    for value in values {
        let mut indexed = S::default();
        indexed.set(Key::from("k"), value.clone());

        let mut named = S::default();
        assert!(named.assign(&attr_path!("k"), value));

        assert_eq!(indexed.to_value(), named.to_value());
        assert_eq!(
            indexed.lookup_raw(&attr_path!("k")).map(Attr::to_value),
            named.get_raw(&Key::from("k")).map(Attr::to_value)
        );
    }
}

fn deletes_nested_keys_in_place<S: AttributeStore>() {
    let mut s = S::default();
    s.set(Key::from("foo"), Value::from(btree! { "bar" => 1, "baz" => 2 }));

    assert!(s.remove(&attr_path!("foo.bar")).is_some());
    assert!(!s.contains(&attr_path!("foo.bar")));
    assert!(s.contains(&attr_path!("foo.baz")));
    assert!(s.remove(&attr_path!("foo.bar")).is_none());
}

#[test]
fn open_struct_contract() {
    round_trips_scalars::<OpenStruct>();
    wraps_nested_maps::<OpenStruct>();
    preserves_lists::<OpenStruct>();
    named_and_indexed_writes_agree::<OpenStruct>();
    deletes_nested_keys_in_place::<OpenStruct>();
}

#[test]
fn tracked_struct_contract() {
    round_trips_scalars::<TrackedStruct>();
    wraps_nested_maps::<TrackedStruct>();
    preserves_lists::<TrackedStruct>();
    named_and_indexed_writes_agree::<TrackedStruct>();
    deletes_nested_keys_in_place::<TrackedStruct>();
}

#[test]
fn lazy_values_differ_between_stores() {
    let lazy = Lazy::from_fn(|| 1);

    let mut open = OpenStruct::new();
    open.set("foo", lazy.clone());
    assert_eq!(
        open.get("foo").and_then(Attr::as_value),
        Some(&Value::Lazy(lazy.clone()))
    );

    let mut tracked = TrackedStruct::new();
    tracked.set("foo", lazy);
    assert_eq!(
        tracked.get("foo").unwrap().map(|a| a.to_value()),
        Some(Value::from(1))
    );
}

#[test]
fn dirty_lifecycle() {
    let mut s: TrackedStruct = [("foo", "foo")].into_iter().collect();
    assert!(!s.dirty());
    s.set("foo", "bar");
    assert!(s.dirty());
    s.set("foo", "foo");
    assert!(!s.dirty());

    let mut fresh = TrackedStruct::new();
    fresh.set("foo", "foo");
    assert!(fresh.dirty());
}

#[test]
fn deletion_clears_dirtiness() {
    let mut s = TrackedStruct::new();
    s.set("foo", "bar");
    assert!(s.dirty());
    s.delete("foo");
    assert!(!s.exists("foo"));
    assert!(!s.dirty());
}

#[test]
fn empty_input_short_circuits() {
    let stored: Attr<OpenStruct> = structify(Value::array());
    assert_eq!(stored.as_value(), Some(&Value::array()));

    let stored: Attr<TrackedStruct> = structify(Value::map());
    assert_eq!(stored.as_value(), Some(&Value::map()));

    let mut s = OpenStruct::new();
    s.set("empty", Value::map());
    assert!(s.get("empty").and_then(Attr::as_struct).is_none());
    assert_eq!(s.get("empty").and_then(Attr::as_value), Some(&Value::map()));
}

#[test]
fn stringly_indexed_maps_become_lists() {
    let mut s = OpenStruct::new();
    s.set("foo", Value::from(btree! { "0" => "a", "1" => "b" }));
    assert_eq!(s.get("foo").unwrap(), &Value::from(vec!["a", "b"]));
    assert_eq!(
        s.lookup(&AttrPath::parse("foo.1").unwrap()).unwrap(),
        &Value::from("b")
    );
}

#[test]
fn list_element_assignment_is_a_change() {
    let mut s: TrackedStruct = [("tags", vec!["a", "b"])].into_iter().collect();
    assert!(s.assign(&attr_path!("tags.1"), Value::from("c")));

    assert!(s.dirty());
    assert_eq!(
        s.changed_attributes()[&Key::from("tags")].to_value(),
        Value::from(vec!["a", "c"])
    );
    assert_eq!(
        s.attributes()[&Key::from("tags")].to_value(),
        Value::from(vec!["a", "c"])
    );

    s.set("tags", vec!["a", "b"]);
    assert!(!s.dirty());
}

#[test]
fn list_element_assignment_in_open_struct() {
    let mut s = OpenStruct::new();
    s.set("grid", vec![Value::from(vec![1, 2]), Value::from(vec![3, 4])]);

    assert!(s.assign(&attr_path!("grid.0.1"), Value::from(btree! { "x" => 1 })));
    assert!(s.lookup(&attr_path!("grid.0.1")).and_then(Attr::as_struct).is_some());
    assert_eq!(
        s.lookup(&attr_path!("grid.0.1.x")).map(Attr::to_value),
        Some(Value::from(1))
    );
    assert_eq!(s.lookup(&attr_path!("grid.1")).unwrap(), &Value::from(vec![3, 4]));
}
