use criterion::Criterion;
use decmaths::declibm;

use bench_util::{bench_inputs2, configure_criterion, dec_pairs, gen_pairs};

fn bench_atan2(c: &mut Criterion) {
    let inputs = dec_pairs(&[
        (0.0, 1.0),
        (1.0, 0.0),
        (-1.0, 0.0),
        (1.0, 1.0),
        (-1.0, 1.0),
        (1.0, -1.0),
        (-1.0, -1.0),
        (1e-6, 1.0),
        (1.0, 1e-6),
        (1e6, 1.0),
        (1.0, 1e6),
    ]);
    let common = gen_pairs(64, -1e3, 1e3, 0x3141);
    let wide = gen_pairs(64, -1e6, 1e6, 0x5926);

    let mut group = c.benchmark_group("atan2/smoke");
    bench_inputs2(&mut group, &inputs, declibm::atan2);
    group.finish();

    let mut group = c.benchmark_group("atan2/common");
    bench_inputs2(&mut group, &common, declibm::atan2);
    group.finish();

    let mut group = c.benchmark_group("atan2/wide");
    bench_inputs2(&mut group, &wide, declibm::atan2);
    group.finish();
}

fn main() {
    let mut c = configure_criterion();
    bench_atan2(&mut c);
    c.final_summary();
}
