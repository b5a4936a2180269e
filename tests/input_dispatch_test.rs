// Tests for key -> action dispatch

use bump_dungeon::actions::{Action, Offset};
use bump_dungeon::input::{handle_input, key_bindings};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const BOUND_KEYS: [&str; 13] = [
    "ArrowUp",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "w",
    "s",
    "a",
    "d",
    "q",
    "e",
    "z",
    "c",
    "x",
];

#[test]
fn directional_keys_match_binding_table() {
    let expected = [
        ("ArrowUp", (0, -1)),
        ("ArrowDown", (0, 1)),
        ("ArrowLeft", (-1, 0)),
        ("ArrowRight", (1, 0)),
        ("w", (0, -1)),
        ("s", (0, 1)),
        ("a", (-1, 0)),
        ("d", (1, 0)),
        ("q", (-1, -1)),
        ("e", (1, -1)),
        ("z", (-1, 1)),
        ("c", (1, 1)),
    ];

    for (key, (dx, dy)) in expected {
        assert_eq!(
            handle_input(key),
            Offset::new(dx, dy).map(Action::Bump),
            "binding for {key}"
        );
    }
}

#[test]
fn x_waits() {
    assert_eq!(handle_input("x"), Some(Action::Wait));
}

#[test]
fn lookup_is_case_sensitive() {
    assert_eq!(handle_input("W"), None);
    assert_eq!(handle_input("X"), None);
    assert_eq!(handle_input("arrowup"), None);
}

#[test]
fn binding_table_is_exactly_the_documented_keys() {
    let mut keys: Vec<_> = key_bindings().map(|(key, _)| key).collect();
    keys.sort_unstable();
    let mut expected = BOUND_KEYS.to_vec();
    expected.sort_unstable();
    assert_eq!(keys, expected);
}

#[test]
fn repeated_lookups_return_the_same_action() {
    assert_eq!(handle_input("q"), handle_input("q"));
}

proptest! {
    #[test]
    fn unbound_keys_yield_no_action(key in "\\PC{0,12}") {
        prop_assume!(!BOUND_KEYS.contains(&key.as_str()));
        prop_assert_eq!(handle_input(&key), None);
    }
}
