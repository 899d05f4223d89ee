use criterion::{
    BenchmarkId,
    Criterion,
    Throughput,
    criterion_group,
    criterion_main,
};

use splat_scene::{
    SceneCodec,
    SplatScene,
    random_gaussians,
};


const GAUSSIAN_COUNTS: [usize; 3] = [
    1000,
    10000,
    100_000,
];

fn splat_codec_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("splat container");
    for count in GAUSSIAN_COUNTS.iter() {
        let scene = random_gaussians(*count);
        let bytes = scene.encode();

        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("encode", count),
            &scene,
            |b, scene| b.iter(|| scene.encode()),
        );
        group.bench_with_input(
            BenchmarkId::new("decode", count),
            &bytes,
            |b, bytes| b.iter(|| SplatScene::decode(bytes.as_slice(), "bench.splat").unwrap()),
        );
    }
}

criterion_group! {
    name = io_benches;
    config = Criterion::default().sample_size(10);
    targets = splat_codec_benchmark
}
criterion_main!(io_benches);
