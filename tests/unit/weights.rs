//! Weighting scheme contracts exercised across all shipped schemes.

use quern::{BoolWeight, CollectionStats, CoordWeight, DiceCoeffWeight, Weight};

fn schemes() -> Vec<Box<dyn Weight>> {
    vec![
        Box::new(BoolWeight::new()),
        Box::new(CoordWeight::new()),
        Box::new(DiceCoeffWeight::new()),
    ]
}

#[test]
fn test_names_are_stable_identifiers() {
    let names: Vec<&str> = schemes().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["bool", "coord", "dicecoeff"]);
}

#[test]
fn test_serialise_roundtrip_preserves_behaviour() {
    let stats = CollectionStats::unknown(3);
    for mut scheme in schemes() {
        scheme.init(2.5, &stats);
        let blob = scheme.serialise();
        let mut restored = scheme.unserialise(&blob).expect("unserialise");
        restored.init(2.5, &stats);
        assert_eq!(restored.name(), scheme.name());
        assert_eq!(
            restored.sum_part(3, 20, 10),
            scheme.sum_part(3, 20, 10),
            "{} changed behaviour across serialisation",
            scheme.name()
        );
    }
}

#[test]
fn test_unserialise_rejects_trailing_bytes() {
    for scheme in schemes() {
        let mut blob = scheme.serialise();
        blob.push(0);
        assert!(
            scheme.unserialise(&blob).is_err(),
            "{} accepted trailing bytes",
            scheme.name()
        );
    }
}

#[test]
fn test_factor_scales_linearly() {
    let stats = CollectionStats::unknown(2);
    let mut single = CoordWeight::new();
    single.init(1.0, &stats);
    let mut tripled = CoordWeight::new();
    tripled.init(3.0, &stats);
    assert_eq!(tripled.sum_part(1, 10, 5), 3.0 * single.sum_part(1, 10, 5));
    assert_eq!(tripled.max_part(), 3.0 * single.max_part());
}

#[test]
fn test_coord_three_of_four_terms_scores_three() {
    // One sum_part per matching term; a document matching 3 of the 4
    // query terms accumulates 3.0 across its term iterators.
    let stats = CollectionStats::unknown(4);
    let mut scheme = CoordWeight::new();
    scheme.init(1.0, &stats);
    let score: f64 = (0..3).map(|_| scheme.sum_part(1, 50, 25)).sum();
    assert_eq!(score, 3.0);
    assert_eq!(scheme.max_part(), 1.0);
}

#[test]
fn test_bool_contributes_nothing() {
    let stats = CollectionStats::unknown(2);
    let mut scheme = BoolWeight::new();
    scheme.init(1.0, &stats);
    assert_eq!(scheme.sum_part(100, 1, 1), 0.0);
    assert_eq!(scheme.max_part(), 0.0);
    assert_eq!(scheme.sum_extra(1, 1), 0.0);
    assert_eq!(scheme.max_extra(), 0.0);
}
