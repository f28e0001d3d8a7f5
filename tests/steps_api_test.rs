//! Integration tests for the steps public API.

use grc_flow::context::Context;
use grc_flow::steps::{parse_template, placeholders, render, Segment, Step};
use grc_flow::unit::FnUnit;
use grc_flow::FlowError;
use serde_json::json;
use std::sync::Arc;

#[test]
fn template_round_trip_through_context() {
    let mut ctx = Context::new();
    ctx.insert("framework".to_string(), json!("NIST CSF"));
    ctx.insert("controls".to_string(), json!(12));

    let out = render("{framework} has {controls} controls, literal {{x}}", &ctx).unwrap();
    assert_eq!(out, "NIST CSF has 12 controls, literal {x}");
}

#[test]
fn template_errors_are_typed() {
    assert!(matches!(
        render("{missing}", &Context::new()),
        Err(FlowError::TemplateResolution { ref variable }) if variable == "missing"
    ));
    assert!(matches!(
        parse_template("open {"),
        Err(FlowError::MalformedTemplate { .. })
    ));
}

#[test]
fn placeholders_are_deduplicated() {
    let vars = placeholders("{a} {b} {a}").unwrap();
    assert_eq!(vars.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);

    let segments = parse_template("x{y}").unwrap();
    assert_eq!(
        segments,
        vec![
            Segment::Literal("x".to_string()),
            Segment::Placeholder("y".to_string())
        ]
    );
}

#[test]
fn step_builder() {
    let unit = Arc::new(FnUnit::new("u", |i: &str, _: &Context| Ok(i.to_string())));
    let step = Step::new("review", unit, "Review {draft}")
        .depends_on(["draft"])
        .when(|ctx| ctx.contains_key("draft"));

    let mut ctx = Context::new();
    assert!(!step.should_run(&ctx));
    ctx.insert("draft".to_string(), json!("text"));
    assert!(step.should_run(&ctx));
}
