//! Resolution tests for lumen_style
//!
//! Each test renders a small tree for a fresh owner, resolves it, drives the
//! synthesized handlers, and resolves the same render output again the way a
//! component would after a state change.

use std::cell::Cell;
use std::rc::Rc;

use crate::prelude::*;
use lumen_core::events::EventType;

/// Resolver wired to test doubles
struct Harness {
    owner: Owner,
    listener: MouseUpListener,
    sink: Rc<CollectingSink>,
    prefix_calls: Rc<Cell<usize>>,
    resolver: Resolver,
}

fn harness() -> Harness {
    harness_with(ResolveConfig::development())
}

fn harness_with(config: ResolveConfig) -> Harness {
    let listener = MouseUpListener::new();
    let sink = Rc::new(CollectingSink::new());
    let prefix_calls = Rc::new(Cell::new(0));

    let calls = prefix_calls.clone();
    let resolver = Resolver::new()
        .with_config(config)
        .with_mouse_up_listener(listener.clone())
        .with_diagnostics(sink.clone())
        .with_prefixer(move |style: StyleMap| {
            calls.set(calls.get() + 1);
            style
        });

    Harness {
        owner: Owner::new("TestComponent"),
        listener,
        sink,
        prefix_calls,
        resolver,
    }
}

impl Harness {
    fn resolve(&self, node: impl Into<Node>) -> Node {
        self.resolver
            .resolve(&self.owner, &node.into())
            .expect("resolution failed")
    }

    fn try_resolve(&self, node: impl Into<Node>) -> Result<Node, ResolveError> {
        self.resolver.resolve(&self.owner, &node.into())
    }
}

fn element(node: &Node) -> &Element {
    node.as_element().expect("expected an element")
}

fn flat_style(node: &Node) -> &StyleMap {
    element(node).style_map().expect("expected a flat style")
}

fn child(node: &Node, index: usize) -> &Node {
    element(node)
        .child_nodes()
        .get(index)
        .expect("missing child")
}

fn background(node: &Node) -> Option<&str> {
    flat_style(node).get_text("background")
}

/// Interaction states with the events that turn them on and off
const STATES: [(StateKind, EventType, Option<EventType>); 3] = [
    (
        StateKind::Hover,
        event_types::MOUSE_ENTER,
        Some(event_types::MOUSE_LEAVE),
    ),
    (
        StateKind::Focus,
        event_types::FOCUS,
        Some(event_types::BLUR),
    ),
    (StateKind::Active, event_types::MOUSE_DOWN, None),
];

fn blue_unless(kind: StateKind) -> StyleMap {
    style()
        .set("background", "blue")
        .state(kind, style().set("background", "red"))
}

// =============================================================================
// Pass-through behavior
// =============================================================================

#[test]
fn test_empty_root() {
    let h = harness();
    assert!(h.resolve(Node::Empty).is_empty());
}

#[test]
fn test_unstyled_element_is_returned_as_is() {
    let h = harness();
    let out = h.resolve(div().attr("id", "plain"));

    let element = element(&out);
    assert!(!element.is_resolved());
    assert_eq!(element.props().attributes.get("id").map(String::as_str), Some("plain"));
    assert_eq!(h.resolver.stats().elements_constructed, 0);
    assert_eq!(h.prefix_calls.get(), 0);
}

#[test]
fn test_plain_style_passes_through() {
    let h = harness();
    let out = h.resolve(div().style(style().set("color", "blue")));
    assert_eq!(flat_style(&out), &style().set("color", "blue"));
}

#[test]
fn test_plain_style_of_children_passes_through() {
    let h = harness();
    let out = h.resolve(div().child(div().style(style().set("color", "blue"))));
    assert_eq!(flat_style(child(&out, 0)), &style().set("color", "blue"));
}

#[test]
fn test_text_and_number_children_are_untouched() {
    let h = harness();

    let out = h.resolve(div().child(text("Hello")));
    assert!(matches!(element(&out).child_nodes().only(), Some(Node::Text(t)) if t == "Hello"));

    let out = h.resolve(div().child(number(88347.0)));
    assert!(matches!(element(&out).child_nodes().only(), Some(Node::Number(n)) if *n == 88347.0));
}

#[test]
fn test_empty_children_are_kept_in_place() {
    let h = harness();
    let out = h.resolve(div().children([empty()]));

    let children = element(&out).child_nodes();
    assert_eq!(children.len(), 1);
    assert!(children.get(0).is_some_and(Node::is_empty));
}

#[test]
fn test_element_is_processed_once() {
    let h = harness();
    let rendered = div().style(vec![
        style().set("background", "white"),
        style().set("color", "blue"),
    ]);

    let once = h.resolve(rendered);
    let twice = h.resolve(once);

    assert_eq!(
        flat_style(&twice),
        &style().set("background", "white").set("color", "blue")
    );
    assert_eq!(h.prefix_calls.get(), 1);
    assert_eq!(h.resolver.stats().elements_constructed, 0);
}

#[test]
fn test_input_tree_is_not_modified() {
    let h = harness();
    let rendered = div().style(blue_unless(StateKind::Hover));
    h.resolve(rendered.clone());

    assert!(!rendered.is_resolved());
    assert!(rendered.handlers().is_empty());
    assert_eq!(rendered.style_map(), Some(&blue_unless(StateKind::Hover)));
}

// =============================================================================
// Style lists
// =============================================================================

#[test]
fn test_merges_style_list() {
    let h = harness();
    let out = h.resolve(div().style(vec![
        style().set("background", "white"),
        style().set("color", "blue"),
    ]));
    assert_eq!(
        flat_style(&out),
        &style().set("background", "white").set("color", "blue")
    );
}

#[test]
fn test_skips_falsy_and_non_map_entries() {
    let h = harness();
    let out = h.resolve(div().style(StyleValue::list([
        style().set("background", "white").into(),
        StyleValue::Bool(false),
        StyleValue::Null,
        StyleValue::Text(String::new()),
        StyleValue::list([style().set("background", "black").into()]),
        style().set("color", "blue").into(),
    ])));
    assert_eq!(
        flat_style(&out),
        &style().set("background", "white").set("color", "blue")
    );
}

#[test]
fn test_later_entries_override_earlier_ones() {
    let h = harness();
    let out = h.resolve(div().style(vec![
        style().set("background", "white"),
        style().set("background", "blue"),
    ]));
    assert_eq!(background(&out), Some("blue"));
}

#[test]
fn test_merges_nested_state_styles() {
    let h = harness();
    let rendered = div().style(vec![
        style().state(StateKind::Hover, style().set("background", "white")),
        style().state(StateKind::Hover, style().set("color", "blue")),
    ]);

    let out = h.resolve(rendered.clone());
    element(&out).dispatch(event_types::MOUSE_ENTER);

    let out = h.resolve(rendered);
    assert_eq!(
        flat_style(&out),
        &style().set("background", "white").set("color", "blue")
    );
}

#[test]
fn test_null_property_values_pass_through() {
    let h = harness();
    let out = h.resolve(div().style(style().set("height", PropertyValue::Null)));
    assert_eq!(flat_style(&out).get("height"), Some(&PropertyValue::Null));
    assert!(h.sink.is_empty());
}

// =============================================================================
// Interaction states
// =============================================================================

#[test]
fn test_strips_inactive_state_styles() {
    for (kind, _, _) in STATES {
        let h = harness();
        let out = h.resolve(div().style(blue_unless(kind)));
        assert_eq!(flat_style(&out), &style().set("background", "blue"), "{kind}");
    }
}

#[test]
fn test_adds_handlers_for_state_styles() {
    for (kind, on, off) in STATES {
        let h = harness();
        let out = h.resolve(div().style(blue_unless(kind)));
        let handlers = element(&out).handlers();

        assert!(handlers.has_handler(on), "{kind}");
        if let Some(off) = off {
            assert!(handlers.has_handler(off), "{kind}");
        }
    }
}

#[test]
fn test_state_on_applies_state_style() {
    for (kind, on, _) in STATES {
        let h = harness();
        let rendered = div().style(blue_unless(kind));

        let out = h.resolve(rendered.clone());
        assert_eq!(background(&out), Some("blue"));

        element(&out).dispatch(on);
        assert!(h.owner.take_rebuild_request(), "{kind}");

        let out = h.resolve(rendered);
        assert_eq!(background(&out), Some("red"), "{kind}");
    }
}

#[test]
fn test_state_off_removes_state_style() {
    for (kind, on, off) in STATES {
        let Some(off) = off else { continue };
        let h = harness();
        let rendered = div().style(blue_unless(kind));

        let out = h.resolve(rendered.clone());
        element(&out).dispatch(on);

        let out = h.resolve(rendered.clone());
        assert_eq!(background(&out), Some("red"), "{kind}");

        element(&out).dispatch(off);
        assert!(h.owner.take_rebuild_request());

        let out = h.resolve(rendered);
        assert_eq!(background(&out), Some("blue"), "{kind}");
    }
}

#[test]
fn test_toggles_never_mutate_state_snapshots() {
    for (kind, on, off) in STATES {
        let Some(off) = off else { continue };
        let h = harness();
        let rendered = div().style(blue_unless(kind));

        let out = h.resolve(rendered.clone());
        let previous = h.owner.state();
        element(&out).dispatch(on);
        assert!(!h.owner.state().ptr_eq(&previous), "{kind}");
        assert_eq!(previous.len(), 0);

        let out = h.resolve(rendered);
        let previous = h.owner.state();
        element(&out).dispatch(off);
        assert!(!h.owner.state().ptr_eq(&previous), "{kind}");
    }
}

#[test]
fn test_state_applies_to_element_by_key() {
    for (kind, on, _) in STATES {
        let h = harness();
        let rendered = div()
            .child(div().key("foo"))
            .child(div().key("bar").style(blue_unless(kind)));

        let out = h.resolve(rendered.clone());
        assert!(element(child(&out, 0)).style_value().is_none());
        assert_eq!(background(child(&out, 1)), Some("blue"));

        element(child(&out, 1)).dispatch(on);

        let out = h.resolve(rendered);
        assert!(element(child(&out, 0)).style_value().is_none());
        assert_eq!(background(child(&out, 1)), Some("red"), "{kind}");
    }
}

#[test]
fn test_state_applies_to_element_by_ref() {
    for (kind, on, _) in STATES {
        let h = harness();
        let rendered = div()
            .child(div().ref_name("foo"))
            .child(div().ref_name("bar").style(blue_unless(kind)));

        let out = h.resolve(rendered.clone());
        assert_eq!(background(child(&out, 1)), Some("blue"));

        element(child(&out, 1)).dispatch(on);

        let out = h.resolve(rendered);
        assert!(element(child(&out, 0)).style_value().is_none());
        assert_eq!(background(child(&out, 1)), Some("red"), "{kind}");
    }
}

#[test]
fn test_state_is_tracked_per_element() {
    let h = harness();
    let rendered = div()
        .child(div().key("a").style(blue_unless(StateKind::Hover)))
        .child(div().key("b").style(blue_unless(StateKind::Hover)));

    let out = h.resolve(rendered.clone());
    element(child(&out, 1)).dispatch(event_types::MOUSE_ENTER);

    let out = h.resolve(rendered);
    assert_eq!(background(child(&out, 0)), Some("blue"));
    assert_eq!(background(child(&out, 1)), Some("red"));
}

#[test]
fn test_state_is_tracked_per_ref() {
    for (kind, on, _) in STATES {
        let h = harness();
        let rendered = div()
            .child(div().ref_name("first").style(blue_unless(kind)))
            .child(div().ref_name("second").style(blue_unless(kind)));

        let out = h.resolve(rendered.clone());
        element(child(&out, 0)).dispatch(on);

        let out = h.resolve(rendered);
        assert_eq!(background(child(&out, 0)), Some("red"), "{kind}");
        assert_eq!(background(child(&out, 1)), Some("blue"), "{kind}");
    }
}

#[test]
fn test_duplicate_ref_is_an_error() {
    for (kind, _, _) in STATES {
        let h = harness();
        let rendered = div()
            .child(div().ref_name("foo").style(blue_unless(kind)))
            .child(div().ref_name("foo").style(blue_unless(kind)));

        let err = h.try_resolve(rendered).unwrap_err();
        assert_eq!(
            err,
            ResolveError::DuplicateIdentity {
                identity: ElementIdentity::ref_name("foo"),
                state: kind,
            }
        );
    }
}

#[test]
fn test_keyless_interactive_siblings_are_an_error() {
    for (kind, _, _) in STATES {
        let h = harness();
        let rendered = div()
            .child(div().style(blue_unless(kind)))
            .child(div().style(blue_unless(kind)));

        let err = h.try_resolve(rendered).unwrap_err();
        assert!(matches!(err, ResolveError::DuplicateIdentity { .. }), "{kind}");
        assert!(err.to_string().contains("unique key or ref"));
    }
}

#[test]
fn test_keyless_siblings_without_state_styles_are_fine() {
    let h = harness();
    let out = h.resolve(
        div()
            .child(div().style(style().set("color", "red")))
            .child(div().style(style().set("color", "blue"))),
    );
    assert_eq!(element(&out).child_nodes().len(), 2);
}

#[test]
fn test_existing_handler_runs_before_toggle() {
    let h = harness();
    let calls = Rc::new(Cell::new(0));
    let seen_active = Rc::new(Cell::new(true));

    let (c, seen, owner) = (calls.clone(), seen_active.clone(), h.owner.clone());
    let rendered = div()
        .on_mouse_down(move |_| {
            c.set(c.get() + 1);
            let id = ElementIdentity::anonymous(&lumen_core::TreePath::root());
            seen.set(owner.state().get(&id, StateKind::Active));
        })
        .style(blue_unless(StateKind::Active));

    let out = h.resolve(rendered.clone());
    element(&out).dispatch(event_types::MOUSE_DOWN);
    assert_eq!(calls.get(), 1);
    assert!(!seen_active.get());

    let out = h.resolve(rendered);
    assert_eq!(background(&out), Some("red"));
}

#[test]
fn test_unrelated_handlers_are_preserved() {
    let h = harness();
    let clicks = Rc::new(Cell::new(0));
    let c = clicks.clone();
    let rendered = div()
        .on(event_types::CLICK, move |_| c.set(c.get() + 1))
        .style(blue_unless(StateKind::Hover));

    let out = h.resolve(rendered);
    assert!(element(&out).dispatch(event_types::CLICK));
    assert_eq!(clicks.get(), 1);
}

#[test]
fn test_toggles_after_unmount_are_ignored() {
    let h = harness();
    let rendered = div().style(blue_unless(StateKind::Hover));
    let out = h.resolve(rendered.clone());

    h.owner.unmount();
    element(&out).dispatch(event_types::MOUSE_ENTER);
    assert_eq!(h.owner.update_count(), 0);

    h.owner.mount();
    let out = h.resolve(rendered);
    assert_eq!(background(&out), Some("blue"));
}

// =============================================================================
// :active and the global mouse-up listener
// =============================================================================

#[test]
fn test_active_subscribes_to_mouse_up() {
    let h = harness();
    h.resolve(div().style(style().state(StateKind::Active, style().set("background", "red"))));
    assert_eq!(h.listener.subscriber_count(), 1);
    assert!(h.owner.has_mouse_up_subscription());
}

#[test]
fn test_mouse_up_subscription_is_made_once() {
    let h = harness();
    let rendered = div().style(blue_unless(StateKind::Active));
    for _ in 0..3 {
        h.resolve(rendered.clone());
    }
    assert_eq!(h.listener.subscriber_count(), 1);
}

#[test]
fn test_global_mouse_up_removes_active_style() {
    let h = harness();
    let rendered = div().style(blue_unless(StateKind::Active));

    let out = h.resolve(rendered.clone());
    element(&out).dispatch(event_types::MOUSE_DOWN);

    let out = h.resolve(rendered.clone());
    assert_eq!(background(&out), Some("red"));

    h.listener.notify();
    let out = h.resolve(rendered);
    assert_eq!(background(&out), Some("blue"));
}

#[test]
fn test_repeated_mouse_up_is_a_no_op() {
    let h = harness();
    let rendered = div().style(blue_unless(StateKind::Active));

    let out = h.resolve(rendered.clone());
    element(&out).dispatch(event_types::MOUSE_DOWN);
    let after_press = h.owner.update_count();

    h.listener.notify();
    h.listener.notify();
    assert_eq!(h.owner.update_count(), after_press + 1);

    let out = h.resolve(rendered);
    assert_eq!(background(&out), Some("blue"));
}

#[test]
fn test_mouse_up_clears_every_active_element() {
    let h = harness();
    let rendered = div()
        .child(div().key("a").style(blue_unless(StateKind::Active)))
        .child(div().key("b").style(blue_unless(StateKind::Active)));

    let out = h.resolve(rendered.clone());
    element(child(&out, 0)).dispatch(event_types::MOUSE_DOWN);
    element(child(&out, 1)).dispatch(event_types::MOUSE_DOWN);
    let before = h.owner.update_count();

    h.listener.notify();
    assert_eq!(h.owner.update_count(), before + 1);

    let out = h.resolve(rendered);
    assert_eq!(background(child(&out, 0)), Some("blue"));
    assert_eq!(background(child(&out, 1)), Some("blue"));
}

#[test]
fn test_unmount_drops_mouse_up_subscription() {
    let h = harness();
    h.resolve(div().style(blue_unless(StateKind::Active)));
    h.owner.unmount();
    assert_eq!(h.listener.subscriber_count(), 0);
}

// =============================================================================
// Several states at once
// =============================================================================

const PERMUTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

#[test]
fn test_last_declared_state_wins_in_any_activation_order() {
    let declarations = [
        (StateKind::Active, "red"),
        (StateKind::Focus, "yellow"),
        (StateKind::Hover, "blue"),
    ];
    let activations = [
        event_types::FOCUS,
        event_types::MOUSE_DOWN,
        event_types::MOUSE_ENTER,
    ];

    for declared in PERMUTATIONS {
        for activated in PERMUTATIONS {
            let h = harness();
            let mut s = style();
            for index in declared {
                let (kind, color) = declarations[index];
                s = s.state(kind, style().set("background", color));
            }
            let rendered = div().style(s);

            let out = h.resolve(rendered.clone());
            for index in activated {
                element(&out).dispatch(activations[index]);
            }

            let out = h.resolve(rendered);
            let expected = declarations[declared[2]].1;
            assert_eq!(
                background(&out),
                Some(expected),
                "declared {declared:?}, activated {activated:?}"
            );
        }
    }
}

// =============================================================================
// Children shapes and composites
// =============================================================================

#[test]
fn test_single_child_stays_single() {
    let h = harness();
    let out = h.resolve(div().child(span().style(style().set("color", "red"))));
    let only = element(&out).child_nodes().only().expect("single child");
    assert!(only.as_element().is_some_and(Element::is_resolved));
}

#[test]
fn test_single_text_child_stays_single() {
    let h = harness();
    let out = h.resolve(div().style(style().set("color", "red")).child(text("Foo")));
    assert!(element(&out).child_nodes().only().is_some());
}

#[test]
fn test_composite_props_are_not_resolved() {
    let h = harness();
    let hover_only = style().state(StateKind::Hover, style());
    let out = h.resolve(div().child(composite("CustomComponent").style(hover_only.clone())));

    assert_eq!(element(child(&out, 0)).style_map(), Some(&hover_only));
    assert!(element(child(&out, 0)).handlers().is_empty());
    assert_eq!(h.prefix_calls.get(), 0);
}

#[test]
fn test_host_children_of_composites_are_resolved() {
    let h = harness();
    let list = || -> StyleValue {
        vec![style().set("background", "white"), style().set("color", "blue")].into()
    };
    let flat = style().set("background", "white").set("color", "blue");

    let out = h.resolve(
        div()
            .style(list())
            .child(composite("CustomComponent").style(list()).child(div().style(list()))),
    );

    assert_eq!(flat_style(&out), &flat);
    let component = element(child(&out, 0));
    assert_eq!(component.style_value(), Some(&list()));
    let inner = component.child_nodes().only().expect("component child");
    assert_eq!(flat_style(inner), &flat);
}

// =============================================================================
// Prefixer
// =============================================================================

#[test]
fn test_prefixer_called_once_per_styled_element() {
    let h = harness();
    h.resolve(
        div()
            .style(style().set("color", "red"))
            .child(div().key("x").style(blue_unless(StateKind::Hover)))
            .child(div())
            .child(text("t")),
    );
    assert_eq!(h.prefix_calls.get(), 2);
    assert_eq!(h.resolver.stats().prefixer_calls, 2);
}

#[test]
fn test_prefixer_output_is_used() {
    let owner = Owner::new("Prefixed");
    let resolver = Resolver::new()
        .with_mouse_up_listener(MouseUpListener::new())
        .with_prefixer(|s: StyleMap| s.set("WebkitFlex", 1));

    let out = resolver
        .resolve(&owner, &div().style(style().set("flex", 1)).into())
        .unwrap();
    assert!(flat_style(&out).contains_key("WebkitFlex"));
}

// =============================================================================
// Diagnostics
// =============================================================================

#[test]
fn test_warns_on_shorthand_with_longhand() {
    let h = harness();
    h.resolve(div().style(
        style()
            .set("border", "1px solid black")
            .set("borderWidth", "0 1px 1px 1px"),
    ));

    let diagnostics = h.sink.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    let message = diagnostics[0].to_string();
    assert!(message.find("border").is_some_and(|at| at > 0));
    assert!(message.contains("TestComponent"));
}

#[test]
fn test_warns_on_shorthand_with_longhand_in_state_style() {
    let h = harness();
    h.resolve(div().style(style().state(
        StateKind::Hover,
        style()
            .set("border", "1px solid black")
            .set("borderWidth", "0 1px 1px 1px"),
    )));

    let diagnostics = h.sink.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].state, Some(StateKind::Hover));
    assert!(diagnostics[0].to_string().find("border").is_some_and(|at| at > 0));
}

#[test]
fn test_border_and_border_radius_do_not_warn() {
    let h = harness();
    h.resolve(div().style(
        style()
            .set("border", "1px solid black")
            .set("borderRadius", "5px"),
    ));
    assert!(h.sink.is_empty());
}

#[test]
fn test_conflict_split_across_list_entries_warns() {
    let h = harness();
    h.resolve(div().style(vec![
        style().set("margin", 0),
        style().set("marginTop", 4),
    ]));
    assert_eq!(h.sink.len(), 1);
}

#[test]
fn test_production_suppresses_diagnostics() {
    let h = harness_with(ResolveConfig::production());
    let out = h.resolve(div().style(
        style()
            .set("border", "1px solid black")
            .set("borderWidth", "0 1px 1px 1px"),
    ));
    assert!(h.sink.is_empty());
    assert_eq!(flat_style(&out).len(), 2);
}

#[test]
fn test_unknown_selectors_are_stripped() {
    let h = harness();
    let out = h.resolve(
        div().style(
            style()
                .set("color", "black")
                .selector(":visited", style().set("color", "purple")),
        ),
    );
    assert_eq!(flat_style(&out), &style().set("color", "black"));
    assert!(element(&out).handlers().is_empty());
}
