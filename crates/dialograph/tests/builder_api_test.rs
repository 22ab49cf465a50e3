//! Integration tests for the DiagramBuilder API
//!
//! These tests drive the public API from plot JSON to the exported diagram.

use dialograph::{
    DiagramBuilder, DialographError,
    config::{AppConfig, GlobalTransitions, GraphConfig, LayoutConfig, LayoutEngine, StyleConfig},
    graph::NodeKind,
};

const BOOK_PLOT: &str = r#"{
    "imports": {
        "id#im_1": { "name": "dff", "code": "import dff.conditions as cnd" }
    },
    "py_defs": {
        "id#df_hi": { "name": "cnd.exact_match", "code": "cnd.exact_match(Message(text='hi'))" },
        "id#df_book": { "name": "cnd.regexp", "code": "cnd.regexp(r'book')" }
    },
    "flows": {
        "id#fl_greeting": { "name": "greeting_flow", "nodes": ["id#nd_start", "id#nd_hello"] },
        "id#fl_books": { "name": "book_flow", "nodes": ["id#nd_books"] }
    },
    "nodes": {
        "id#nd_start": { "type": "regular", "name": "start", "transitions": ["id#tr_hi"] },
        "id#nd_hello": { "type": "regular", "name": "hello", "transitions": ["id#tr_book", "id#tr_again"] },
        "id#nd_books": { "type": "regular", "name": "books" },
        "id#nd_global": { "type": "global", "transitions": ["id#tr_restart"] }
    },
    "transitions": {
        "id#tr_hi": { "label": "id#nd_hello", "condition": "id#ln_hi" },
        "id#tr_book": { "label": "id#nd_books", "priority": 1.5, "condition": "id#ln_book" },
        "id#tr_again": { "label": "id#nd_hello", "condition": "id#ln_missing" },
        "id#tr_restart": { "label": "id#nd_start", "condition": "id#ln_hi" }
    },
    "linking": {
        "id#ln_hi": { "object": "id#df_hi", "args": [], "kwargs": {} },
        "id#ln_book": { "object": "id#df_book", "args": ["id#df_hi", ["a", "b"]], "kwargs": { "flags": "re.I" } }
    }
}"#;

#[test]
fn test_parse_and_render() {
    let builder = DiagramBuilder::new(AppConfig::default());
    let plot = builder.parse(BOOK_PLOT).expect("Failed to parse");
    let diagram = builder.render(&plot).expect("Failed to render");

    // 3 bot nodes + 3 user nodes, global node omitted
    assert_eq!(diagram.nodes().len(), 6);
    assert!(diagram.node("id#nd_global").is_none());
    assert!(diagram.node("id#tr_restart").is_none());

    let hi = diagram.node("id#tr_hi").unwrap();
    assert_eq!(hi.kind(), NodeKind::User);
    assert_eq!(hi.label(), "cnd.exact_match");
    assert_eq!(hi.flow(), "greeting_flow");

    assert_eq!(diagram.node("id#tr_again").unwrap().label(), "unknown");
    assert_eq!(diagram.node("id#nd_books").unwrap().flow(), "book_flow");
    assert!(diagram.nodes().iter().all(|node| node.position().is_some()));
}

#[test]
fn test_fan_out_config_draws_global_transitions() {
    let config = AppConfig::new(
        GraphConfig::new(GlobalTransitions::FanOut),
        LayoutConfig::default(),
        StyleConfig::default(),
    );
    let builder = DiagramBuilder::new(config);
    let plot = builder.parse(BOOK_PLOT).unwrap();
    let graph = builder.build_graph(&plot);

    assert!(graph.node("id#tr_restart").is_some());
    assert!(graph.has_edge("id#nd_hello", "id#tr_restart"));
    assert!(graph.has_edge("id#tr_restart", "id#nd_start"));
    // the target itself is not a source of its own global transition
    assert!(!graph.has_edge("id#nd_start", "id#tr_restart"));
}

#[test]
fn test_basic_engine_places_every_node() {
    let config = AppConfig::new(
        GraphConfig::default(),
        LayoutConfig::default().with_engine(LayoutEngine::Basic),
        StyleConfig::default(),
    );
    let builder = DiagramBuilder::new(config);
    let plot = builder.parse(BOOK_PLOT).unwrap();
    let graph = builder.build_graph(&plot);
    let layout = builder.layout(&graph);
    assert_eq!(layout.len(), graph.nodes().len());
}

#[test]
fn test_render_json() {
    let builder = DiagramBuilder::default();
    let plot = builder.parse(BOOK_PLOT).unwrap();
    let json = builder.render_json(&plot).expect("Failed to export");
    assert!(json.contains("\"fromId\""));
    assert!(json.contains("\"nodeSize\""));
}

#[test]
fn test_render_is_deterministic() {
    let builder = DiagramBuilder::default();
    let plot = builder.parse(BOOK_PLOT).unwrap();
    assert_eq!(builder.render(&plot).unwrap(), builder.render(&plot).unwrap());
}

#[test]
fn test_parse_invalid_json_returns_error() {
    let result = DiagramBuilder::default().parse("{ \"nodes\": [ }");
    match result {
        Err(DialographError::Parse { src, .. }) => assert!(src.contains("nodes")),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_invalid_palette_is_a_config_error() {
    let config = AppConfig::new(
        GraphConfig::default(),
        LayoutConfig::default(),
        StyleConfig::default().with_palette(vec!["nope".to_string()]),
    );
    let builder = DiagramBuilder::new(config);
    let plot = builder.parse(BOOK_PLOT).unwrap();
    assert!(matches!(builder.render(&plot), Err(DialographError::Config(_))));
}
