//! The engine must agree with the naive reference matcher on every
//! pattern, target, and configuration, and must behave like a pure
//! function of its inputs.

use quaero::{Collator, NormalizationMode, SearchEngine, Strength, Tailoring};

const PATTERNS: &[&str] = &[
    "fuss",
    "fu\u{00DF}",
    "s",
    "ss",
    "ball",
    "strasse",
    "stra\u{00DF}e",
    "abc",
    "a",
    "jaeger",
    "123",
];

const TARGETS: &[&str] = &[
    "",
    "fuss",
    "fu\u{00DF}",
    "fu\u{00DF}ball",
    "1fu\u{00DF}ball",
    "12fu\u{00DF}ball",
    "123fu\u{00DF}ball",
    "1234fu\u{00DF}ball",
    "ffu\u{00DF}",
    "fufu\u{00DF}",
    "fusfu\u{00DF}",
    "ffuss",
    "fufuss",
    "fusfuss",
    "stra\u{00DF}e und strasse",
    "die stra\u{00DF}en",
    "s\u{00DF}s\u{00DF}ss",
    "\u{00DF}\u{00DF}\u{00DF}",
    "abcabcabc",
    "a\u{0301}bc",
    "A\u{0301}\u{0323}B",
    "j\u{00E4}ger und Jaeger",
    "no match here",
];

fn configurations() -> Vec<Collator> {
    let mut out = Vec::new();

    for tailoring in [Tailoring::Root, Tailoring::GermanPhonebook] {
        for strength in [Strength::Primary, Strength::Secondary, Strength::Tertiary] {
            out.push(Collator::new(tailoring, strength, NormalizationMode::On));
        }
    }

    out
}

// All matches via repeated forward search
fn engine_matches(engine: &mut SearchEngine) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut from = 0;

    while let Some((start, end)) = engine.search(from) {
        out.push((start, end));
        assert!(end > start, "empty match at {start}");
        from = end;
    }

    out
}

// All matches via the reference matcher
fn reference_matches(engine: &mut SearchEngine) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut from = 0;

    while let Some((start, end)) = engine.simple_search(from) {
        out.push((start, end));
        from = end;
    }

    out
}

#[test]
fn engine_agrees_with_reference() {
    for collator in configurations() {
        for pattern in PATTERNS {
            let Ok(mut engine) = SearchEngine::new(collator, pattern) else {
                continue;
            };

            for target in TARGETS {
                engine.set_target(target).unwrap();

                let fast = engine_matches(&mut engine);
                let naive = reference_matches(&mut engine);

                assert_eq!(
                    fast, naive,
                    "divergence for pattern {pattern:?} in target {target:?} \
                     under {collator:?}"
                );
            }
        }
    }
}

#[test]
fn repeated_searches_are_identical() {
    let collator = Collator::new(Tailoring::Root, Strength::Primary, NormalizationMode::On);
    let mut engine = SearchEngine::new(collator, "fuss").unwrap();

    engine.set_target("1234fu\u{00DF}ball fuss").unwrap();

    let first = engine_matches(&mut engine);
    let second = engine_matches(&mut engine);

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn search_is_monotone_in_from() {
    let collator = Collator::new(Tailoring::Root, Strength::Primary, NormalizationMode::On);
    let mut engine = SearchEngine::new(collator, "ss").unwrap();

    let target = "s\u{00DF}s\u{00DF}ss";
    engine.set_target(target).unwrap();

    let Some((s, e)) = engine.search(0) else {
        panic!("expected a match");
    };

    // Any earlier starting offset yields the same match or an earlier,
    // non-overlapping one
    for from in 0..=s {
        let (s2, e2) = engine.search(from).unwrap();
        assert!(
            (s2, e2) == (s, e) || e2 <= s,
            "search({from}) returned ({s2}, {e2}), first match was ({s}, {e})"
        );
    }
}

#[test]
fn matches_lie_on_grapheme_boundaries() {
    let collator = Collator::new(Tailoring::Root, Strength::Primary, NormalizationMode::On);
    let mut engine = SearchEngine::new(collator, "ab").unwrap();

    // The cluster boundary after b is at the end of the combining mark
    engine.set_target("xab\u{0308}y").unwrap();

    let (start, end) = engine.search(0).unwrap();
    assert_eq!((start, end), (1, 5));
}

#[test]
fn backward_agrees_with_the_latest_forward_match() {
    for collator in configurations() {
        for pattern in PATTERNS {
            let Ok(mut engine) = SearchEngine::new(collator, pattern) else {
                continue;
            };

            for target in TARGETS {
                engine.set_target(target).unwrap();

                // The match with the greatest start, overlaps included:
                // probe the reference matcher from every offset
                let latest = (0..=target.len())
                    .filter_map(|from| engine.simple_search(from))
                    .last();

                let backward = engine.search_backward(target.len());

                assert_eq!(
                    backward, latest,
                    "backward divergence for {pattern:?} in {target:?}"
                );
            }
        }
    }
}

#[test]
fn backward_respects_the_bound() {
    let collator = Collator::new(Tailoring::Root, Strength::Primary, NormalizationMode::On);
    let mut engine = SearchEngine::new(collator, "fuss").unwrap();

    engine.set_target("fu\u{00DF} fuss").unwrap();

    assert_eq!(engine.search_backward(9), Some((5, 9)));
    assert_eq!(engine.search_backward(8), Some((0, 4)));
    assert_eq!(engine.search_backward(4), Some((0, 4)));
    assert_eq!(engine.search_backward(3), None);
    assert_eq!(engine.search_backward(0), None);
}

#[test]
fn data_dependency_fallback_still_searches() {
    // Build at a strength where the pattern works, then check the naive
    // path finds the same matches the Boyer-Moore path does
    let collator = Collator::new(Tailoring::Root, Strength::Primary, NormalizationMode::On);
    let mut engine = SearchEngine::new(collator, "fu\u{00DF}").unwrap();

    engine.set_target("der fussweg").unwrap();

    assert_eq!(engine.simple_search(0), Some((4, 8)));
    assert_eq!(engine.search(0), Some((4, 8)));
}
