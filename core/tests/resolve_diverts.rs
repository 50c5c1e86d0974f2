use fable_core::ast::AstNode;
use fable_core::ir::{DivertTarget, IrContainer, IrOp};
use fable_core::story::Story;

fn divert_targets(container: &IrContainer, out: &mut Vec<DivertTarget>) {
    for op in &container.ops {
        match op {
            IrOp::Divert { target } => out.push(target.clone()),
            IrOp::Container(child) => divert_targets(child, out),
            _ => {}
        }
    }
}

#[test]
fn fully_qualified_targets_resolve_exactly() {
    let mut story = Story::new(vec![
        AstNode::flow("chapter", vec![AstNode::flow("ending", vec![])]),
        AstNode::divert("chapter.ending"),
    ]);
    let doc = story.export().expect("export should succeed");

    let mut targets = Vec::new();
    divert_targets(&doc.root, &mut targets);
    assert_eq!(
        targets,
        [DivertTarget::Resolved("chapter.ending".to_string())]
    );
}

#[test]
fn sibling_stitches_resolve_by_short_name() {
    // From inside `chapter`, the short name `middle` means `chapter.middle`.
    let mut story = Story::new(vec![AstNode::flow(
        "chapter",
        vec![
            AstNode::flow("start", vec![AstNode::divert("middle")]),
            AstNode::flow("middle", vec![]),
        ],
    )]);
    let doc = story.export().expect("export should succeed");

    let mut targets = Vec::new();
    divert_targets(&doc.root, &mut targets);
    assert_eq!(
        targets,
        [DivertTarget::Resolved("chapter.middle".to_string())]
    );
}

#[test]
fn unique_suffix_resolves_from_anywhere() {
    let mut story = Story::new(vec![
        AstNode::flow("chapter", vec![AstNode::flow("ending", vec![])]),
        AstNode::divert("ending"),
    ]);
    let doc = story.export().expect("export should succeed");

    let mut targets = Vec::new();
    divert_targets(&doc.root, &mut targets);
    assert_eq!(
        targets,
        [DivertTarget::Resolved("chapter.ending".to_string())]
    );
}

#[test]
fn ambiguous_short_names_are_reported() {
    let mut story = Story::new(vec![
        AstNode::flow("one", vec![AstNode::flow("end", vec![])]),
        AstNode::flow("two", vec![AstNode::flow("end", vec![])]),
        AstNode::divert("end"),
    ]);

    let err = story.export().expect_err("export must fail");
    assert!(
        err.reports
            .iter()
            .any(|r| r.message.contains("ambiguous") && r.message.contains("end"))
    );
}

#[test]
fn unknown_targets_are_reported_and_fail_the_export() {
    let mut story = Story::new(vec![
        AstNode::flow("intro", vec![]),
        AstNode::divert("nowhere"),
    ]);

    let err = story.export().expect_err("export must fail");
    assert!(
        err.reports
            .iter()
            .any(|r| r.message.contains("'nowhere'"))
    );
}

#[test]
fn reads_of_known_counters_and_variables_pass_resolution() {
    let mut story = Story::new(vec![
        AstNode::var_decl("gold", 5),
        AstNode::flow("intro", vec![]),
        AstNode::read_count("intro"),
        AstNode::var_read("gold"),
    ]);
    let doc = story.export().expect("export should succeed");

    let reads: Vec<&IrOp> = doc
        .root
        .ops
        .iter()
        .filter(|op| matches!(op, IrOp::VarRead { .. }))
        .collect();
    assert_eq!(reads.len(), 2, "IR:\n{}", doc);
}

#[test]
fn reading_a_count_for_an_unknown_flow_is_an_error() {
    let mut story = Story::new(vec![
        AstNode::flow("intro", vec![]),
        AstNode::read_count("outro"),
    ]);

    let err = story.export().expect_err("export must fail");
    assert!(
        err.reports
            .iter()
            .any(|r| r.message.contains("outro"))
    );
}
