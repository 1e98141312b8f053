//! 工具函数性能基准测试

use criterion::{Criterion, criterion_group, criterion_main};
use geoip2_extras::api::middleware::{
    annotate_request, annotate_response, request_header_name, response_header_name,
};
use geoip2_extras::services::geoip::GeoRecord;
use geoip2_extras::utils::remote_addr;
use actix_web::http::header::HeaderMap;

// ============== remote_addr 基准测试 ==============

fn bench_remote_addr(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/remote_addr");

    group.bench_function("direct", |b| {
        b.iter(|| remote_addr(None, Some("203.0.113.7")));
    });

    group.bench_function("forwarded_single", |b| {
        b.iter(|| remote_addr(Some("8.8.8.8"), Some("10.0.0.1")));
    });

    let long_chain = (1..=16)
        .map(|i| format!("10.0.0.{}", i))
        .collect::<Vec<_>>()
        .join(", ");
    group.bench_function("forwarded_chain_16", |b| {
        b.iter(|| remote_addr(Some(&long_chain), Some("10.0.0.1")));
    });

    group.finish();
}

// ============== 头部写入基准测试 ==============

fn bench_annotate(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/annotate");
    let record = GeoRecord::unknown("8.8.8.8");

    group.bench_function("header_names", |b| {
        b.iter(|| {
            (
                request_header_name("is_in_european_union"),
                response_header_name("is_in_european_union"),
            )
        });
    });

    group.bench_function("request", |b| {
        b.iter(|| {
            let mut headers = HeaderMap::new();
            annotate_request(&mut headers, &record);
            headers
        });
    });

    group.bench_function("response", |b| {
        b.iter(|| {
            let mut headers = HeaderMap::new();
            annotate_response(&mut headers, &record);
            headers
        });
    });

    group.finish();
}

criterion_group!(benches, bench_remote_addr, bench_annotate);
criterion_main!(benches);
