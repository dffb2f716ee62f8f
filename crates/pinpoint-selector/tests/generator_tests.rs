//! Tests for candidate generation and ranking against parsed documents.

use pinpoint_dom::{DomTree, ElementData, NodeId};
use pinpoint_html::parse_html;
use pinpoint_selector::{
    CandidateKind, Generator, GeneratorOptions, SelectorCandidate, SpecificityWeight, generate,
    specificity_of,
};
use quickcheck_macros::quickcheck;

/// First element with the given id.
fn by_id(tree: &DomTree, id: &str) -> NodeId {
    tree.find_by_id(id).unwrap()
}

fn selectors(candidates: &[SelectorCandidate]) -> Vec<&str> {
    candidates.iter().map(|c| c.selector.as_str()).collect()
}

fn of_kind(candidates: &[SelectorCandidate], kind: CandidateKind) -> Vec<&SelectorCandidate> {
    candidates.iter().filter(|c| c.kind == kind).collect()
}

fn assert_ranked(candidates: &[SelectorCandidate]) {
    for pair in candidates.windows(2) {
        assert!(
            pair[0].specificity >= pair[1].specificity,
            "{} {} ranked before {} {}",
            pair[0].selector,
            pair[0].specificity,
            pair[1].selector,
            pair[1].specificity
        );
    }
}

// ========== basic and full path ==========

#[test]
fn test_id_wins_over_classes_for_basic() {
    let tree = parse_html(r#"<div><span id="x" class="a b">hi</span></div>"#);
    let candidates = generate(&tree, by_id(&tree, "x"));

    let basic = of_kind(&candidates, CandidateKind::Basic);
    assert_eq!(basic.len(), 1);
    assert_eq!(basic[0].selector, "#x");
    assert_eq!(basic[0].specificity, SpecificityWeight::new(0, 1, 0, 0));

    let basic_index = candidates
        .iter()
        .position(|c| c.kind == CandidateKind::Basic)
        .unwrap();
    for later in &candidates[basic_index + 1..] {
        assert!(later.specificity <= basic[0].specificity);
    }
    for earlier in &candidates[..basic_index] {
        assert!(earlier.specificity > basic[0].specificity);
    }
    assert!(!candidates.iter().any(|c| c.kind == CandidateKind::Basic && c.selector == ".a.b"));
}

#[test]
fn test_basic_falls_back_to_classes_then_tag() {
    let tree = parse_html(r#"<p class="lead intro">a</p><em>b</em>"#);
    let body = tree.body().unwrap();
    let mut children = tree.element_children(body);
    let p = children.next().unwrap();
    let em = children.next().unwrap();

    let basic = |node| {
        generate(&tree, node)
            .into_iter()
            .find(|c| c.kind == CandidateKind::Basic)
            .unwrap()
            .selector
    };
    assert_eq!(basic(p), ".lead.intro");
    assert_eq!(basic(em), "em");
}

#[test]
fn test_full_path_uses_nth_of_type_for_repeated_tags() {
    let tree = parse_html(
        r#"<main id="app"><ul class="menu"><li>a</li><li>b</li><li>c</li></ul></main>"#,
    );
    let ul = tree
        .descendant_elements(NodeId::ROOT)
        .into_iter()
        .find(|&n| tree.as_element(n).unwrap().tag_name == "ul")
        .unwrap();
    let third = tree.element_children(ul).nth(2).unwrap();

    let full = generate(&tree, third)
        .into_iter()
        .find(|c| c.kind == CandidateKind::FullPath)
        .unwrap();
    assert_eq!(full.selector, "#app ul.menu li:nth-of-type(3)");
}

#[test]
fn test_full_path_can_reach_html_without_boundary() {
    let tree = parse_html("<div>x</div>");
    let div = tree.element_children(tree.body().unwrap()).next().unwrap();

    let bounded = Generator::new(&tree).generate(div);
    let unbounded = Generator::new(&tree).with_boundary(None).generate(div);
    let full = |candidates: &[SelectorCandidate]| {
        candidates
            .iter()
            .find(|c| c.kind == CandidateKind::FullPath)
            .unwrap()
            .selector
            .clone()
    };
    assert_eq!(full(&bounded), "div");
    assert_eq!(full(&unbounded), "html body div");
}

#[test]
fn test_full_path_of_body_stops_at_body() {
    let tree = parse_html("<p>x</p>");
    let full = generate(&tree, tree.body().unwrap())
        .into_iter()
        .find(|c| c.kind == CandidateKind::FullPath)
        .unwrap();
    assert_eq!(full.selector, "body");
    assert_eq!(full.specificity, SpecificityWeight::new(0, 0, 0, 1));
}

#[test]
fn test_every_element_gets_basic_and_full_path() {
    let tree = parse_html(
        r#"<header><nav><a href="/">home</a></nav></header>
        <form><input type="radio"><select><option>1</option></select></form>
        <img src="x.png"><p class="a b c"><em></em></p>"#,
    );
    for node in tree.descendant_elements(NodeId::ROOT) {
        let candidates = generate(&tree, node);
        assert!(!of_kind(&candidates, CandidateKind::Basic).is_empty());
        assert!(!of_kind(&candidates, CandidateKind::FullPath).is_empty());
        assert_ranked(&candidates);
    }
}

// ========== structural strategies ==========

#[test]
fn test_data_attributes_candidate() {
    let tree = parse_html(r#"<button id="b" data-action="save" data-id="7" type="button">ok</button>"#);
    let candidates = generate(&tree, by_id(&tree, "b"));
    let attributes = of_kind(&candidates, CandidateKind::Attributes);

    assert_eq!(attributes.len(), 1);
    assert_eq!(
        attributes[0].selector,
        r#"button[data-action="save"][data-id="7"]"#
    );
    assert_eq!(attributes[0].specificity, SpecificityWeight::new(0, 0, 2, 1));
}

#[test]
fn test_no_data_attributes_no_candidate() {
    let tree = parse_html(r#"<span id="s" title="t">x</span>"#);
    let candidates = generate(&tree, by_id(&tree, "s"));
    assert!(of_kind(&candidates, CandidateKind::Attributes).is_empty());
}

#[test]
fn test_sibling_strategies() {
    let tree = parse_html(r#"<ul><li class="a">1</li><li class="b" id="second">2</li></ul>"#);
    let candidates = generate(&tree, by_id(&tree, "second"));
    let all = selectors(&candidates);

    assert!(all.contains(&"ul > :nth-child(2)"));
    assert!(all.contains(&".a + li"));
    assert!(all.contains(&"li:not(.a)"));
    assert!(all.contains(&"li:nth-of-type(2)"));
    assert!(all.contains(&"#second:last-child"));
    assert!(!all.contains(&"#second:first-child"));
    assert!(!all.contains(&"#second:only-child"));
}

#[test]
fn test_only_child() {
    let tree = parse_html(r#"<div><span id="only">x</span></div>"#);
    let candidates = generate(&tree, by_id(&tree, "only"));
    let all = selectors(&candidates);

    assert!(all.contains(&"#only:only-child"));
    assert!(!all.contains(&"#only:first-child"));
    assert!(of_kind(&candidates, CandidateKind::NthOfType).is_empty());
    assert!(of_kind(&candidates, CandidateKind::NotSibling).is_empty());
    assert!(of_kind(&candidates, CandidateKind::AdjacentSibling).is_empty());
}

#[test]
fn test_parent_strategies() {
    let tree = parse_html(r#"<section class="card"><h2 id="t">title</h2></section>"#);
    let candidates = generate(&tree, by_id(&tree, "t"));
    let all = selectors(&candidates);

    assert!(all.contains(&".card h2"));
    assert!(all.contains(&".card > h2"));
    assert!(all.contains(&":is(.card) h2"));
}

#[test]
fn test_boundary_is_never_a_scoping_parent() {
    let tree = parse_html(r#"<h2 id="t">title</h2>"#);
    let candidates = generate(&tree, by_id(&tree, "t"));

    assert!(of_kind(&candidates, CandidateKind::ViaParent).is_empty());
    assert!(of_kind(&candidates, CandidateKind::DirectChild).is_empty());
    assert!(candidates.iter().all(|c| c.parent.is_none()));
}

#[test]
fn test_has_candidates_match_calculator() {
    let tree = parse_html(r#"<div id="d"><span></span></div>"#);
    let candidates = generate(&tree, by_id(&tree, "d"));

    let has_tag = of_kind(&candidates, CandidateKind::HasTag);
    assert_eq!(has_tag.len(), 1);
    assert_eq!(has_tag[0].selector, "div:has(span)");
    assert_eq!(has_tag[0].specificity, specificity_of("div:has(span)"));
    assert_eq!(of_kind(&candidates, CandidateKind::HasChild)[0].selector, "div:has(span)");
}

#[test]
fn test_not_class_uses_second_class() {
    let tree = parse_html(r#"<p class="a b">x</p>"#);
    let p = tree.element_children(tree.body().unwrap()).next().unwrap();
    let candidates = generate(&tree, p);

    let not_class = of_kind(&candidates, CandidateKind::NotClass);
    assert_eq!(not_class.len(), 1);
    assert_eq!(not_class[0].selector, "p:not(.b)");
}

#[test]
fn test_where_is_zero_specificity() {
    let tree = parse_html(r#"<div><span id="x" class="a">hi</span></div>"#);
    let candidates = generate(&tree, by_id(&tree, "x"));

    let wheres = of_kind(&candidates, CandidateKind::Where);
    assert_eq!(wheres.len(), 1);
    assert_eq!(wheres[0].selector, ":where(#x)");
    assert_eq!(wheres[0].specificity, SpecificityWeight::ZERO);
    assert_eq!(candidates.last().unwrap().kind, CandidateKind::Where);
}

// ========== element-kind strategies ==========

#[test]
fn test_void_elements_have_no_pseudo_elements() {
    let tree = parse_html(r#"<img id="i" src="a.png"><p id="p">x</p>"#);

    let img = generate(&tree, by_id(&tree, "i"));
    assert!(of_kind(&img, CandidateKind::Before).is_empty());
    assert!(of_kind(&img, CandidateKind::After).is_empty());

    let p = generate(&tree, by_id(&tree, "p"));
    assert_eq!(of_kind(&p, CandidateKind::Before)[0].selector, "#p::before");
    assert_eq!(of_kind(&p, CandidateKind::After)[0].selector, "#p::after");
}

#[test]
fn test_visited_only_for_links() {
    let tree = parse_html(r#"<a id="l" href="/">x</a><span id="s">y</span>"#);

    let link = generate(&tree, by_id(&tree, "l"));
    assert!(selectors(&link).contains(&"#l:visited"));

    let span = generate(&tree, by_id(&tree, "s"));
    assert!(of_kind(&span, CandidateKind::Visited).is_empty());
}

#[test]
fn test_checkbox_input_states() {
    let tree = parse_html(r#"<form><input id="c" type="checkbox" required></form>"#);
    let candidates = generate(&tree, by_id(&tree, "c"));
    let all = selectors(&candidates);

    for state in ["checked", "required", "optional", "valid", "invalid"] {
        assert!(all.contains(&format!("#c:{state}").as_str()), "missing {state}");
    }
    assert!(all.contains(&"#c:disabled"));
    assert!(all.contains(&"form:focus-within input"));
}

#[test]
fn test_text_input_is_never_checked() {
    let tree = parse_html(r#"<form><input id="t" type="text"><input id="u"></form>"#);
    for id in ["t", "u"] {
        let candidates = generate(&tree, by_id(&tree, id));
        assert!(of_kind(&candidates, CandidateKind::Checked).is_empty());
        assert_eq!(of_kind(&candidates, CandidateKind::Required).len(), 1);
    }
}

#[test]
fn test_non_controls_have_no_form_states() {
    let tree = parse_html(r#"<div id="d">x</div>"#);
    let candidates = generate(&tree, by_id(&tree, "d"));
    assert!(of_kind(&candidates, CandidateKind::Disabled).is_empty());
    assert!(of_kind(&candidates, CandidateKind::FocusWithin).is_empty());
    assert!(of_kind(&candidates, CandidateKind::Required).is_empty());
}

#[test]
fn test_empty_requires_no_children_and_no_text() {
    let tree = parse_html(r#"<div id="e"></div><div id="t">text</div><div id="c"><br></div>"#);

    let empty = |id| !of_kind(&generate(&tree, by_id(&tree, id)), CandidateKind::Empty).is_empty();
    assert!(empty("e"));
    assert!(!empty("t"));
    assert!(!empty("c"));
}

// ========== parent summary ==========

#[test]
fn test_parent_summary_fields() {
    let tree = parse_html(
        r#"<div id="wrap" class="c" data-role="r" title="x" aria-label="box"><span id="s">y</span></div>"#,
    );
    let candidates = generate(&tree, by_id(&tree, "s"));
    let parent = candidates[0].parent.clone().unwrap();

    assert_eq!(parent.tag, "div");
    assert_eq!(parent.id.as_deref(), Some("wrap"));
    assert_eq!(parent.classes, Some(vec!["c".to_string()]));
    assert_eq!(parent.attributes, ["data-role=\"r\"", "aria-label=\"box\""]);
    assert_eq!(parent.selector(), ".c");
    assert_eq!(parent.to_string(), "div #wrap .c");
    assert!(candidates.iter().all(|c| c.parent.as_ref() == Some(&parent)));
}

#[test]
fn test_parent_summary_attribute_limit() {
    let tree = parse_html(
        r#"<div data-a="1" data-b="2" role="list" data-c="3"><span id="s">y</span></div>"#,
    );
    let candidates = generate(&tree, by_id(&tree, "s"));
    let parent = candidates[0].parent.clone().unwrap();

    assert_eq!(parent.classes, None);
    assert_eq!(parent.attributes.len(), 3);
    assert_eq!(parent.selector(), "div");
}

#[test]
fn test_body_has_no_parent_summary() {
    let tree = parse_html("<p>x</p>");
    let candidates = generate(&tree, tree.body().unwrap());
    assert!(!candidates.is_empty());
    assert!(candidates.iter().all(|c| c.parent.is_none()));
}

// ========== ranking, options, edge cases ==========

#[test]
fn test_generation_is_order_stable() {
    let tree = parse_html(r#"<ul><li>a</li><li class="x y" data-k="v">b</li></ul>"#);
    let ul = tree.element_children(tree.body().unwrap()).next().unwrap();
    let li = tree.element_children(ul).nth(1).unwrap();

    let first = generate(&tree, li);
    let second = generate(&tree, li);
    assert_eq!(first, second);
    assert_ranked(&first);
}

#[test]
fn test_duplicates_are_kept_unless_deduped() {
    let tree = parse_html(r#"<div><span id="x">hi</span></div>"#);
    let span = by_id(&tree, "x");

    let kept = generate(&tree, span);
    assert_eq!(kept.iter().filter(|c| c.selector == "#x").count(), 2);

    let deduped = Generator::new(&tree)
        .with_options(GeneratorOptions { dedupe: true })
        .generate(span);
    assert_eq!(deduped.iter().filter(|c| c.selector == "#x").count(), 1);
    let survivor = deduped.iter().find(|c| c.selector == "#x").unwrap();
    assert_eq!(survivor.kind, CandidateKind::Basic);
    assert!(deduped.len() < kept.len());
}

#[test]
fn test_non_element_yields_nothing() {
    let tree = parse_html("<p>text</p>");
    let p = tree.element_children(tree.body().unwrap()).next().unwrap();
    let text = tree.children(p)[0];

    assert!(generate(&tree, text).is_empty());
    assert!(generate(&tree, NodeId::ROOT).is_empty());
    assert!(generate(&tree, NodeId(10_000)).is_empty());
}

#[test]
fn test_json_uses_type_label() {
    let tree = parse_html(r#"<div><span id="x">hi</span></div>"#);
    let candidates = generate(&tree, by_id(&tree, "x"));
    let basic = of_kind(&candidates, CandidateKind::Basic)[0];
    let json = serde_json::to_value(basic).unwrap();

    assert_eq!(json["type"], "Basic");
    assert_eq!(json["selector"], "#x");
    assert_eq!(json["specificity"]["ids"], 1);
    assert_eq!(json["parent"]["tag"], "div");
}

/// Build a tree from arbitrary `(parent, tag, class)` picks under a body.
fn arbitrary_tree(picks: &[(u8, u8, bool)]) -> DomTree {
    const TAGS: &[&str] = &["div", "span", "a", "input", "li", "img", "p"];

    let mut tree = DomTree::new();
    let html = tree.create_element(ElementData::new("html"));
    tree.append_child(NodeId::ROOT, html);
    let body = tree.create_element(ElementData::new("body"));
    tree.append_child(html, body);

    let mut elements = vec![body];
    for (index, &(parent, tag, class)) in picks.iter().enumerate() {
        let mut element = ElementData::new(TAGS[usize::from(tag) % TAGS.len()]);
        if class {
            element = element.with_attr("class", format!("c{} k", index % 3));
        }
        if index % 4 == 0 {
            element = element.with_attr("id", format!("n{index}"));
        }
        let node = tree.create_element(element);
        tree.append_child(elements[usize::from(parent) % elements.len()], node);
        elements.push(node);
    }
    tree
}

#[quickcheck]
fn prop_candidates_are_ranked_and_complete(picks: Vec<(u8, u8, bool)>) -> bool {
    let tree = arbitrary_tree(&picks);
    tree.descendant_elements(NodeId::ROOT).into_iter().all(|node| {
        let candidates = generate(&tree, node);
        let ranked = candidates
            .windows(2)
            .all(|pair| pair[0].specificity >= pair[1].specificity);
        ranked
            && candidates.iter().any(|c| c.kind == CandidateKind::Basic)
            && candidates.iter().any(|c| c.kind == CandidateKind::FullPath)
            && candidates
                .iter()
                .filter(|c| c.kind == CandidateKind::Where)
                .all(|c| c.specificity == SpecificityWeight::ZERO)
    })
}
