//! Ring benchmarks.
//!
//! Measures:
//! - Lookup latency per partitioner and ring size
//! - Cost of a membership change (add + remove, including the index rebuild)
//!
//! Run with: `cargo bench -p conhash --bench lookup`

use conhash::{HashRing, Node, PartitionerKind, RingBuilder};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;

fn build_ring(kind: PartitionerKind, nodes: usize, replicas: usize) -> HashRing {
    (0..nodes)
        .fold(
            RingBuilder::new().with_partitioner_kind(kind).with_replicas(replicas),
            |builder, i| builder.node(format!("10.0.0.{}:11211", i)),
        )
        .build()
        .expect("distinct identities")
}

fn bench_lookup(c: &mut Criterion) {
    let keys: Vec<String> = (0..1024).map(|i| format!("user:{}", i)).collect();

    let mut group = c.benchmark_group("lookup");
    group.throughput(Throughput::Elements(keys.len() as u64));

    for kind in [PartitionerKind::Md5, PartitionerKind::Xxh3, PartitionerKind::Sip] {
        for nodes in [4usize, 64] {
            let ring = build_ring(kind, nodes, 160);
            group.bench_with_input(
                BenchmarkId::new(kind.to_string(), nodes),
                &ring,
                |b, ring| {
                    b.iter(|| {
                        for key in &keys {
                            black_box(ring.lookup(key).expect("non-empty ring"));
                        }
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_membership_change(c: &mut Criterion) {
    let mut group = c.benchmark_group("membership_change");

    for nodes in [4usize, 64] {
        let ring = build_ring(PartitionerKind::Md5, nodes, 160);
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &ring, |b, ring| {
            b.iter(|| {
                let node = Arc::new(Node::new("joining", 160));
                ring.add_node(Arc::clone(&node));
                ring.remove_node(&node);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lookup, bench_membership_change);
criterion_main!(benches);
