use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cronseek::{CronExpr, Scheduler};

fn fixed_anchor() -> jiff::civil::DateTime {
    jiff::civil::datetime(2022, 8, 10, 5, 0, 0, 0)
}

// ---------------------------------------------------------------------------
// Parse benchmarks
// ---------------------------------------------------------------------------

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.bench_function("simple", |b| {
        b.iter(|| CronExpr::parse(black_box("0 3 * * *")).unwrap());
    });

    group.bench_function("complex", |b| {
        b.iter(|| CronExpr::parse(black_box("*/15 8-17 11,13,20 */3 2#1")).unwrap());
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Search benchmarks (next / prev)
// ---------------------------------------------------------------------------

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let anchor = fixed_anchor();

    let daily = CronExpr::parse("0 3 * * *").unwrap();
    group.bench_function("daily_next", |b| {
        b.iter(|| {
            Scheduler::new(black_box(daily.clone()), anchor)
                .next()
                .unwrap()
        });
    });

    group.bench_function("daily_prev", |b| {
        b.iter(|| {
            Scheduler::new(black_box(daily.clone()), anchor)
                .prev()
                .unwrap()
        });
    });

    let nth_weekday = CronExpr::parse("0 3 * * 2#1").unwrap();
    group.bench_function("nth_weekday_next", |b| {
        b.iter(|| {
            Scheduler::new(black_box(nth_weekday.clone()), anchor)
                .next()
                .unwrap()
        });
    });

    // Worst case short of failure: five Fridays only line up a few
    // times a year, so the search walks many empty months.
    let fifth_friday = CronExpr::parse("0 3 * * 5#5").unwrap();
    group.bench_function("fifth_friday_next", |b| {
        b.iter(|| {
            Scheduler::new(black_box(fifth_friday.clone()), anchor)
                .next()
                .unwrap()
        });
    });

    let leap_day = CronExpr::parse("0 0 29 2 *").unwrap();
    group.bench_function("leap_day_next", |b| {
        b.iter(|| {
            Scheduler::new(black_box(leap_day.clone()), anchor)
                .next()
                .unwrap()
        });
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Iterator benchmark
// ---------------------------------------------------------------------------

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");
    let anchor = fixed_anchor();

    let expr = CronExpr::parse("*/15 * * * *").unwrap();
    group.bench_function("hundred_occurrences", |b| {
        b.iter(|| {
            Scheduler::new(black_box(expr.clone()), anchor)
                .occurrences()
                .take(100)
                .count()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_search, bench_iterate);
criterion_main!(benches);
