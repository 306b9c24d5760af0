use chrono::{TimeDelta, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rs_poker_tracker::analysis::{Averaging, HandLuckAnalyzer};
use rs_poker_tracker::holdem::deal_hand_shape;
use rs_poker_tracker::session::Session;

/// A session of `hands` randomly dealt hands, about a quarter of them played.
fn dealt_session(rng: &mut StdRng, hands: usize) -> Session {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).unwrap();
    let mut session = Session::new();
    for i in 0..hands {
        let shape = deal_hand_shape(rng);
        let played = rng.random_bool(0.25);
        session.add_hand(shape, played, start + TimeDelta::minutes(i as i64 * 2));
    }
    session
}

fn bench_analyze_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_sample");
    let analyzer = HandLuckAnalyzer::default();
    let mut rng = StdRng::seed_from_u64(42);

    for count in [50, 500, 5_000] {
        let session = dealt_session(&mut rng, count);
        group.bench_with_input(BenchmarkId::new("dealt", count), &session, |b, session| {
            b.iter(|| std::hint::black_box(analyzer.analyze_sample(session.hands(), false)));
        });
        group.bench_with_input(BenchmarkId::new("played", count), &session, |b, session| {
            b.iter(|| std::hint::black_box(analyzer.analyze_sample(session.hands(), true)));
        });
    }

    group.finish();
}

fn bench_trend_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_trend_series");
    let analyzer = HandLuckAnalyzer::default();
    let mut rng = StdRng::seed_from_u64(42);

    for count in [50, 500, 5_000] {
        let session = dealt_session(&mut rng, count);
        group.bench_with_input(BenchmarkId::new("batched", count), &session, |b, session| {
            b.iter(|| {
                std::hint::black_box(analyzer.build_trend_series_with(
                    session.hands(),
                    10,
                    Averaging::Batched,
                ))
            });
        });
        group.bench_with_input(BenchmarkId::new("rolling", count), &session, |b, session| {
            b.iter(|| {
                std::hint::black_box(analyzer.build_trend_series_with(
                    session.hands(),
                    10,
                    Averaging::Rolling,
                ))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_analyze_sample, bench_trend_series);
criterion_main!(benches);
