use criterion::{BenchmarkId, Criterion, black_box};
use decmaths::declibm::{self, ConstCache};
use decmaths::{Context, Decimal};

use bench_util::{bench_precisions, configure_criterion};

fn bench_only() -> Option<String> {
    if let Ok(value) = std::env::var("DECMATHS_BENCH_ONLY") {
        let value = value.trim().to_lowercase();
        if !value.is_empty() {
            return Some(value);
        }
    }

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--only" {
            if let Some(value) = iter.next() {
                let value = value.trim().to_lowercase();
                if !value.is_empty() {
                    return Some(value);
                }
            }
        } else if !arg.starts_with('-') {
            return Some(arg.trim().to_lowercase());
        }
    }

    None
}

fn bench_enabled(name: &str) -> bool {
    match bench_only() {
        Some(filter) => name.contains(&filter),
        None => true,
    }
}

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn bench_pi(c: &mut Criterion) {
    if !bench_enabled("pi") {
        return;
    }

    let mut group = c.benchmark_group("pi");
    for prec in bench_precisions() {
        let ctx = Context::new(prec).unwrap();
        group.bench_with_input(BenchmarkId::new("cached", prec), &ctx, |b, ctx| {
            b.iter(|| black_box(declibm::pi(black_box(ctx))))
        });
        group.bench_with_input(BenchmarkId::new("cold", prec), &ctx, |b, ctx| {
            b.iter(|| {
                let cache = ConstCache::new();
                black_box(cache.get(declibm::PiMultiple::Pi, decmaths::Sign::Pos, black_box(ctx)))
            })
        });
    }
    group.finish();
}

fn bench_atan(c: &mut Criterion) {
    if !bench_enabled("atan") {
        return;
    }

    let mut group = c.benchmark_group("atan");
    let inputs = [
        d("1e-300"),
        d("1e-20"),
        d("1e-6"),
        d("0.1"),
        d("0.5"),
        d("0.9"),
        d("1"),
        d("1.000000000001"),
        d("2"),
        d("10"),
        d("1e5"),
        d("1e100"),
    ];

    for prec in bench_precisions() {
        let ctx = Context::new(prec).unwrap();
        group.bench_with_input(BenchmarkId::new("decmaths", prec), &ctx, |b, ctx| {
            b.iter(|| {
                for x in &inputs {
                    black_box(declibm::atan(black_box(x), ctx));
                }
            })
        });
    }
    group.finish();
}

fn bench_atan2(c: &mut Criterion) {
    if !bench_enabled("atan2") {
        return;
    }

    let mut group = c.benchmark_group("atan2");
    let inputs = [
        (d("1"), d("1")),
        (d("1"), d("-1")),
        (d("-3"), d("4")),
        (d("-3"), d("-4")),
        (d("1e-20"), d("-1")),
        (d("1e20"), d("1")),
    ];

    for prec in bench_precisions() {
        let ctx = Context::new(prec).unwrap();
        group.bench_with_input(BenchmarkId::new("decmaths", prec), &ctx, |b, ctx| {
            b.iter(|| {
                for (y, x) in &inputs {
                    black_box(declibm::atan2(black_box(y), black_box(x), ctx));
                }
            })
        });
    }
    group.finish();
}

fn main() {
    let mut c = configure_criterion();
    bench_pi(&mut c);
    bench_atan(&mut c);
    bench_atan2(&mut c);
    c.final_summary();
}
