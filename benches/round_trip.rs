use cartpack::{pack_block, unpack_block};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::time::Duration;

fn generate_test_data(size: usize, pattern: &str) -> Vec<u8> {
    match pattern {
        "text" => {
            let base = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";
            let mut data = Vec::with_capacity(size);
            while data.len() < size {
                data.extend_from_slice(base);
            }
            data.truncate(size);
            data
        }
        "tiles" => {
            // Flat color regions with occasional edges
            (0..size)
                .map(|i| match (i / 64) % 4 {
                    0 => 0x00,
                    1 => 0x3C,
                    2 => 0x7E,
                    _ => 0xFF,
                })
                .collect()
        }
        "noise" => {
            let mut state = 0x2545F491_u32;
            (0..size)
                .map(|_| {
                    state = state.wrapping_mul(0x01000193).wrapping_add(0x9E3779B9);
                    (state >> 24) as u8
                })
                .collect()
        }
        _ => panic!("Unknown pattern: {pattern}"),
    }
}

fn round_trip_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_trip_throughput");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(50);

    for size in [1024, 10240, 102400].iter() {
        let size_label = match *size {
            1024 => "1KB",
            10240 => "10KB",
            102400 => "100KB",
            _ => "unknown",
        };

        for pattern in ["text", "tiles", "noise"].iter() {
            let data = generate_test_data(*size, pattern);

            let benchmark_id = BenchmarkId::from_parameter(format!("{size_label}/{pattern}"));

            group.throughput(Throughput::Bytes(*size as u64));
            group.bench_with_input(benchmark_id, &data, |b, data| {
                b.iter(|| {
                    let packed = pack_block(black_box(data)).expect("Packing failed");
                    let block = unpack_block(black_box(&packed), 0).expect("Unpacking failed");

                    assert_eq!(data.len(), block.data.len());
                    block.data
                });
            });
        }
    }

    group.finish();
}

fn unpack_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("unpack_throughput");
    group.measurement_time(Duration::from_secs(10));

    for pattern in ["text", "tiles", "noise"].iter() {
        let data = generate_test_data(102400, pattern);
        let packed = pack_block(&data).expect("Packing failed");

        let benchmark_id = BenchmarkId::from_parameter(*pattern);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(benchmark_id, &packed, |b, packed| {
            b.iter(|| unpack_block(black_box(packed), 0).expect("Unpacking failed"));
        });
    }

    group.finish();
}

fn round_trip_edge_cases(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_trip_edge_cases");
    group.measurement_time(Duration::from_secs(5));

    let edge_cases = vec![
        ("empty", vec![]),
        ("single_byte", vec![b'X']),
        ("max_run", vec![b'R'; 255]),
        ("marker_bytes", vec![0x81; 256]),
        (
            "alternating",
            (0..1000)
                .map(|i| if i % 2 == 0 { b'A' } else { b'B' })
                .collect(),
        ),
    ];

    for (name, data) in edge_cases {
        let benchmark_id = BenchmarkId::from_parameter(name);

        group.bench_with_input(benchmark_id, &data, |b, data| {
            b.iter(|| {
                let packed = pack_block(black_box(data)).expect("Packing failed");
                let block = unpack_block(black_box(&packed), 0).expect("Unpacking failed");

                assert_eq!(data, &block.data);
                block.data
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    round_trip_throughput,
    unpack_throughput,
    round_trip_edge_cases
);
criterion_main!(benches);
