use fable_core::ast::AstNode;
use fable_core::location::Location;
use fable_core::reports::{Report, ReportCollector, Severity};
use fable_core::story::Story;

fn valid_content() -> Vec<AstNode> {
    vec![
        AstNode::text("start"),
        AstNode::flow("intro", vec![AstNode::text("hello")]),
    ]
}

#[test]
fn diagnostic_line_names_the_location_when_line_is_valid() {
    let report = Report::error(
        "duplicate flow address 'intro'",
        Some(Location::new("intro.fbl".to_string(), 3, 1)),
    );
    assert_eq!(
        report.diagnostic_line(),
        "ERROR: duplicate flow address 'intro' on line 3 of intro.fbl"
    );
}

#[test]
fn diagnostic_line_omits_synthesized_locations() {
    let without = Report::error("boom", None);
    assert_eq!(without.diagnostic_line(), "ERROR: boom");

    // A zero line means the metadata is not valid; no suffix either.
    let zero_line = Report::error("boom", Some(Location::new("x.fbl".to_string(), 0, 0)));
    assert_eq!(zero_line.diagnostic_line(), "ERROR: boom");
}

#[test]
fn warnings_do_not_set_the_failure_flag() {
    let mut collector = ReportCollector::new();
    collector.warn("this is fine", None);
    assert!(!collector.has_failed());
    assert_eq!(collector.len(), 1);
    assert_eq!(collector.reports()[0].severity, Severity::Warning);
}

#[test]
fn a_prior_report_suppresses_an_otherwise_clean_export() {
    let mut story = Story::new(valid_content());
    story
        .reports_mut()
        .report("upstream load failure", None);

    // No error condition re-occurs during the export itself, but the
    // sticky flag still rejects it -- twice, absent a reset.
    assert!(story.export().is_err());
    assert!(story.export().is_err());
    // The document was still built, it is just not handed out.
    assert!(story.compiled().is_some());
}

#[test]
fn reset_then_export_matches_a_never_failed_story() {
    let mut story = Story::new(valid_content());
    story.reports_mut().report("transient problem", None);
    assert!(story.export().is_err());

    story.reset_reports();
    let retried = story.export().expect("export after reset");

    let mut clean = Story::new(valid_content());
    let reference = clean.export().expect("clean export");
    assert_eq!(retried, reference);

    // Reset clears the flag only; the report history survives.
    assert_eq!(story.reports().len(), 1);
}

#[test]
fn export_collects_every_error_before_failing() {
    // Duplicate address, undeclared variable read, unresolvable divert:
    // one run surfaces all three.
    let mut story = Story::new(vec![
        AstNode::flow("intro", vec![]),
        AstNode::flow("intro", vec![]),
        AstNode::var_read("missing"),
        AstNode::divert("nowhere"),
    ]);

    let err = story.export().expect_err("export must fail");
    let messages: Vec<&str> = err.reports.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(messages.len(), 3, "got: {:?}", messages);
    assert!(messages.iter().any(|m| m.contains("duplicate flow address")));
    assert!(messages.iter().any(|m| m.contains("missing")));
    assert!(messages.iter().any(|m| m.contains("nowhere")));
}

#[test]
fn collector_exports_reports_as_json() {
    let mut collector = ReportCollector::new();
    collector.report("first", Some(&Location::new("a.fbl".to_string(), 1, 1)));
    collector.warn("second", None);

    let json = collector.to_json().expect("serialization");
    let value: serde_json::Value = serde_json::from_str(&json).expect("well-formed JSON");
    assert_eq!(value.as_array().map(Vec::len), Some(2));
}
