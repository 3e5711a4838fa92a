use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glyph_cluster_core::{
    ClusterStrategy, Dbscan, DbscanParams, DistanceMatrix, DistanceParams, Glyph, GlyphView,
    PartitionParams, ThresholdPartitioner,
};

/// Deterministic synthetic glyph: a textured ink blob whose size and shading
/// vary a little with the seed, so the size gate passes for most pairs.
fn synth_glyph(seed: usize) -> Glyph {
    let width = 24 + seed % 4;
    let height = 24 + (seed / 4) % 4;
    let data: Vec<u8> = (0..width * height)
        .map(|i| {
            let x = i % width;
            let y = i / width;
            let on_stroke = (x + 2 * y + seed) % 5 < 2;
            if on_stroke {
                ((x * 7 + y * 13 + seed * 31) % 160) as u8
            } else {
                255
            }
        })
        .collect();
    Glyph::from_ink(
        &GlyphView {
            width,
            height,
            data: &data,
        },
        format!("synth-{seed}.png"),
    )
    .expect("synthetic glyph has ink")
}

fn bench_matrix_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix");
    let glyphs: Vec<Glyph> = (0..200).map(synth_glyph).collect();
    let params = DistanceParams::default();

    group.sample_size(10);
    group.bench_function("build_n200", |b| {
        b.iter(|| DistanceMatrix::build(black_box(&glyphs), &params).unwrap())
    });

    group.finish();
}

fn bench_clustering(c: &mut Criterion) {
    let mut group = c.benchmark_group("clustering");
    let glyphs: Vec<Glyph> = (0..200).map(synth_glyph).collect();
    let matrix = DistanceMatrix::build(&glyphs, &DistanceParams::default()).unwrap();

    group.bench_function("partition_n200", |b| {
        let partitioner = ThresholdPartitioner::new(PartitionParams::default());
        b.iter(|| partitioner.cluster(black_box(&matrix)).unwrap())
    });

    group.bench_function("dbscan_n200", |b| {
        let dbscan = Dbscan::new(DbscanParams::default());
        b.iter(|| dbscan.cluster(black_box(&matrix)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_matrix_build, bench_clustering);
criterion_main!(benches);
