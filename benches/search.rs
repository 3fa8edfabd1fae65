use criterion::{criterion_group, criterion_main, Criterion};
use quaero::{Collator, IndexRegistry, NormalizationMode, SearchEngine, Strength, Tailoring};

static PROSE: &str = "\
Als Gregor Samsa eines Morgens aus unruhigen Tr\u{00E4}umen erwachte, fand \
er sich in seinem Bett zu einem ungeheueren Ungeziefer verwandelt. Er lag \
auf seinem panzerartig harten R\u{00FC}cken und sah, wenn er den Kopf ein \
wenig hob, seinen gew\u{00F6}lbten, braunen, von bogenf\u{00F6}rmigen \
Versteifungen geteilten Bauch, auf dessen H\u{00F6}he sich die Bettdecke, \
zum g\u{00E4}nzlichen Niedergleiten bereit, kaum noch erhalten konnte. \
Seine vielen, im Vergleich zu seinem sonstigen Umfang kl\u{00E4}glich \
d\u{00FC}nnen Beine flimmerten ihm hilflos vor den Augen. Was ist mit mir \
geschehen, dachte er. Es war kein Traum. Die Stra\u{00DF}e lag still.";

fn forward_search(c: &mut Criterion) {
    let collator = Collator::new(Tailoring::Root, Strength::Primary, NormalizationMode::On);

    let mut engine = SearchEngine::new(collator, "strasse").unwrap();
    engine.set_target(PROSE).unwrap();

    c.bench_function("forward_search", |b| {
        b.iter(|| {
            assert!(engine.search(0).is_some());
        });
    });
}

fn naive_search(c: &mut Criterion) {
    let collator = Collator::new(Tailoring::Root, Strength::Primary, NormalizationMode::On);

    let mut engine = SearchEngine::new(collator, "strasse").unwrap();
    engine.set_target(PROSE).unwrap();

    c.bench_function("naive_search", |b| {
        b.iter(|| {
            assert!(engine.simple_search(0).is_some());
        });
    });
}

fn engine_construction(c: &mut Criterion) {
    let collator = Collator::new(Tailoring::Root, Strength::Primary, NormalizationMode::On);
    let mut registry = IndexRegistry::default();

    c.bench_function("engine_construction", |b| {
        b.iter(|| {
            let engine = registry.engine(collator, "strasse").unwrap();
            drop(engine);
        });
    });
}

criterion_group!(benches, forward_search, naive_search, engine_construction);
criterion_main!(benches);
