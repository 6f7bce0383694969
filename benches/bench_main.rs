use aspath_graph::formats::emit;
use aspath_graph::parser::{extract_lines, extract_paths};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

/// A synthetic `show route all` response with `routes` routes.
fn build_response(routes: u32) -> Vec<u8> {
    let mut out = String::from("0001 BIRD 2.0.12 ready.\n1007-Table master4:\n");
    for i in 0..routes {
        out.push_str(&format!(
            "10.{}.{}.0/24 unicast [peer{} 2024-05-01] * (100) [AS{}i]\n",
            i / 256 % 256,
            i % 256,
            i % 8,
            64500 + i % 50
        ));
        out.push_str("\tBGP.origin: IGP\n");
        out.push_str(&format!(
            "\tBGP.as_path: {} {} 3356 {} {}\n",
            65000 + i % 8,
            65000 + i % 8,
            1299 + i % 13,
            64500 + i % 50
        ));
        out.push_str("\tBGP.next_hop: 192.0.2.1\n");
    }
    out.push_str("0000 \n");
    out.into_bytes()
}

fn chunked(data: &[u8]) -> Vec<Result<Vec<u8>, aspath_graph::AsGraphError>> {
    data.chunks(4096).map(|c| Ok(c.to_vec())).collect()
}

pub fn pipeline(c: &mut Criterion) {
    let response = build_response(20_000);

    c.bench_function("extract_lines", |b| {
        b.iter(|| extract_lines(chunked(black_box(&response))).count())
    });

    c.bench_function("extract_paths", |b| {
        b.iter(|| extract_paths(extract_lines(chunked(black_box(&response)))).unwrap())
    });

    let paths = extract_paths(extract_lines(chunked(&response)))
        .unwrap()
        .normalize();
    c.bench_function("emit_dot", |b| b.iter(|| emit(black_box(&paths))));
}

criterion_group!(benches, pipeline);
criterion_main!(benches);
