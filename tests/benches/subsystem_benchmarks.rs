//! # Who-Am-I Subsystem Benchmarks
//!
//! Pure hot paths only; nothing here touches the network or the clock.
//!
//! | Subsystem | Path |
//! |-----------|------|
//! | wai-01 Local Discovery | candidate address extraction, session dedup |
//! | wai-02 Visit Counter | cookie lookup and payload codec |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use wai_01_local_discovery::{DiscoverySession, IceCandidate, Termination};
use wai_02_visit_counter::{decode_component, encode_component, find_cookie, VisitRecord};

// ============================================================================
// WAI-01: Local Discovery
// ============================================================================

fn candidate_lines(count: usize) -> Vec<IceCandidate> {
    (0..count)
        .map(|i| {
            IceCandidate::new(format!(
                "candidate:{} 1 udp 2122260223 10.0.{}.{} {} typ host",
                i,
                (i / 250) % 250,
                i % 250,
                50000 + i
            ))
        })
        .collect()
}

fn bench_candidate_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("wai-01-local-discovery");
    let candidate = IceCandidate::new("candidate:1 1 udp 2122260223 192.168.1.20 54321 typ host");

    group.bench_function("extract_address", |b| {
        b.iter(|| black_box(candidate.address()))
    });

    for size in [8, 64, 512] {
        let candidates = candidate_lines(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("session_record", size), &candidates, |b, cs| {
            b.iter(|| {
                let mut session = DiscoverySession::new();
                for candidate in cs {
                    session.record(candidate);
                }
                black_box(session.try_resolve(Termination::GatheringComplete))
            })
        });
    }

    group.finish();
}

// ============================================================================
// WAI-02: Visit Counter
// ============================================================================

fn bench_cookie_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("wai-02-visit-counter");
    let payload = r#"{"count":41,"last":"2024-05-01T12:00:00.000Z"}"#;
    let encoded = encode_component(payload);
    let header = format!(
        "_ga=GA1.1.123; theme=dark; whoami_visit={}; session=abc",
        encoded
    );

    group.bench_function("find_cookie", |b| {
        b.iter(|| black_box(find_cookie(&header, "whoami_visit")))
    });

    group.bench_function("decode_and_parse", |b| {
        b.iter(|| {
            let json = decode_component(black_box(&encoded)).ok()?;
            VisitRecord::from_json(&json).ok()
        })
    });

    group.bench_function("encode", |b| b.iter(|| encode_component(black_box(payload))));

    group.finish();
}

criterion_group!(benches, bench_candidate_parsing, bench_cookie_codec);
criterion_main!(benches);
