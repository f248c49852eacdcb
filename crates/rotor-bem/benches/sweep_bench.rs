// ─────────────────────────────────────────────────────────────────────
// SCPN Rotor BEM — Rotor Sweep Benchmarks
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

use criterion::{criterion_group, criterion_main, Criterion};
use rotor_bem::geometry::LinearTaper;
use rotor_bem::rotor::RotorModel;
use rotor_types::config::RotorConfig;
use std::hint::black_box;
use std::path::PathBuf;

fn reference_config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../configs/reference_rotor.json")
}

fn bench_reference_sweep(c: &mut Criterion) {
    let path = reference_config_path();
    let path_str = path.to_str().expect("utf-8 path");
    let config = RotorConfig::from_file(path_str).expect("reference config");
    let taper = LinearTaper::from_config(&config.blade);

    let mut group = c.benchmark_group("reference_sweep");
    for parallel in [false, true] {
        let mut cfg = config.clone();
        cfg.solver.parallel = parallel;
        let base = path.parent().expect("config dir");
        let model = RotorModel::from_config(&cfg, base).expect("reference model");
        let dist = model.distribution(&taper).expect("distribution");
        let op = *model.operating_point();
        let label = if parallel { "rayon" } else { "sequential" };
        group.bench_function(label, |b| {
            b.iter(|| model.sweep(black_box(op.radius), &dist, op.omega))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reference_sweep);
criterion_main!(benches);
