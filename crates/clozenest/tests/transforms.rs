//! End-to-end transform scenarios over whole notes.

use clozenest::check::{Comparison, compare};
use clozenest::cloze::next_index;
use clozenest::hints::remove_redundant_hints;
use clozenest::normalize::{collapse, drop_duplicates, strip_markup};
use clozenest::{
    Error, ExemptPolicy, Field, ReplaceMode, Transform, TransformConfig, Transformer,
};

fn note(values: &[(&str, &str)]) -> Vec<Field> {
    values.iter().map(|(n, v)| Field::new(*n, *v)).collect()
}

#[test]
fn test_documented_examples() {
    assert_eq!(strip_markup("}}abc"), "}}abc");
    assert_eq!(collapse("{{c5::x}}", 5), "{{c5::x}}");
    assert_eq!(collapse("{{c6::x}}", 5), "x");
    assert_eq!(
        collapse("{{c1::{{c5::{{c6::{{c7::finite}}}}}}}}", 5),
        "{{c1::finite}}"
    );
    assert_eq!(drop_duplicates("{{c7::{{c7::some text}}}}"), "{{c7::some text}}");
    assert_eq!(remove_redundant_hints("{{c2::Paris::Paris}}").unwrap(), "{{c2::Paris}}");
    assert_eq!(
        remove_redundant_hints("{{c2::Paris::capital}}").unwrap(),
        "{{c2::Paris::capital}}"
    );
    assert_eq!(
        compare("{{c1::Paris}}", "{{c2::{{c1::Paris}}}}"),
        Comparison::MarkupOnly
    );
}

#[test]
fn test_consistent_four_clozes() {
    let transformer = Transformer::default();
    let fields = note(&[(
        "Text",
        "{{c1::H}} {{c2::He}} {{c3::Li}} {{c4::Be}}",
    )]);

    let values = transformer.apply(Transform::Consistent, &fields).unwrap();

    // Combinations: (3,4) -> c5, (2,3,4) -> c6, (1,2) -> c7, (2,3) -> c8,
    // (1,2,3,4) -> c9. First-match replacement finds the span inside earlier
    // wrappers, so later wrappers end up innermost.
    assert_eq!(
        values[0],
        "{{c7::{{c9::{{c1::H}}}}}} \
         {{c6::{{c7::{{c8::{{c9::{{c2::He}}}}}}}}}} \
         {{c5::{{c6::{{c8::{{c9::{{c3::Li}}}}}}}}}} \
         {{c5::{{c6::{{c9::{{c4::Be}}}}}}}}"
    );
    assert!(compare(&fields[0].value, &values[0]).is_markup_only());
}

#[test]
fn test_consistent_spreads_across_fields() {
    let transformer = Transformer::default();
    let fields = note(&[
        ("Front", "Capital: {{c1::Paris::city}}"),
        ("Back", "Country: {{c2::France}}"),
    ]);

    let values = transformer.apply(Transform::Consistent, &fields).unwrap();

    assert_eq!(values[0], "Capital: {{c3::{{c1::Paris::city}}::city}}");
    assert_eq!(values[1], "Country: {{c3::{{c2::France}}}}");
}

#[test]
fn test_consistent_collapses_before_generating() {
    let transformer = Transformer::default();
    let fields = note(&[("Text", "{{c1::{{c7::a}}}} {{c8::b}} {{c2::c}}")]);

    let values = transformer.apply(Transform::Consistent, &fields).unwrap();

    assert_eq!(values[0], "{{c3::{{c1::a}}}} b {{c3::{{c2::c}}}}");
}

#[test]
fn test_rerun_on_wrapped_note_is_reported() {
    let transformer = Transformer::default();
    let fields = note(&[("Text", "{{c1::a}} {{c2::b}}")]);

    let first = transformer.apply(Transform::Consistent, &fields).unwrap();
    let rerun = note(&[("Text", first[0].as_str())]);

    let err = transformer.apply(Transform::Consistent, &rerun).unwrap_err();
    assert!(matches!(err, Error::MalformedCloze { field: 0, .. }));
}

#[test]
fn test_replace_all_with_larger_limit() {
    let config = TransformConfig {
        combo_limit: 10,
        replace: ReplaceMode::All,
        ..TransformConfig::default()
    };
    let transformer = Transformer::new(config, ExemptPolicy::default());
    let fields = note(&[("Text", "{{c1::x}} and {{c1::x}} or {{c2::y}}")]);

    let values = transformer.apply(Transform::Generate, &fields).unwrap();

    assert_eq!(
        values[0],
        "{{c3::{{c1::x}}}} and {{c3::{{c1::x}}}} or {{c3::{{c2::y}}}}"
    );
}

#[test]
fn test_exempt_fields_never_change() {
    let transformer = Transformer::default();
    let occlusion = "{{c1::{{c7::shape}}}} {{c2::{{c2::x}}}} {{c12::y::y}}";
    let fields = note(&[
        ("Text", "{{c1::a}} {{c2::b}}"),
        ("Image Occlusion", occlusion),
    ]);

    for transform in Transform::ALL {
        let values = transformer.apply(transform, &fields).unwrap();
        assert_eq!(values[1], occlusion, "{transform}");
    }
}

#[test]
fn test_failure_leaves_no_partial_result() {
    let transformer = Transformer::default();
    let fields = note(&[
        ("Front", "{{c1::fine}}"),
        ("Back", "{{c2::{{c1::see {{cite}}::x}}"),
    ]);

    let err = transformer.apply(Transform::Hints, &fields).unwrap_err();
    assert!(matches!(err, Error::NestedMarkerInInnermost { .. }));
}

#[test]
fn test_next_index_after_transform() {
    let transformer = Transformer::default();
    let fields = note(&[("Text", "{{c1::a}} {{c2::b}}")]);
    let values = transformer.apply(Transform::Generate, &fields).unwrap();
    assert_eq!(next_index(&values), 4);
}
