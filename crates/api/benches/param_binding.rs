use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use cirrus_api::{bind, ElementKind, ParamKind, ParameterDescriptor, RawParams};

const DESCRIPTORS: &[ParameterDescriptor] = &[
    ParameterDescriptor::required("category", ParamKind::String),
    ParameterDescriptor::required("volumeid", ParamKind::Long),
    ParameterDescriptor::optional("forced", ParamKind::Boolean),
    ParameterDescriptor::optional("ids", ParamKind::List(ElementKind::Long)),
    ParameterDescriptor::optional("details", ParamKind::Map),
    ParameterDescriptor::optional("startdate", ParamKind::TzDate),
];

fn mixed_request() -> RawParams {
    RawParams::new()
        .with("category", "Advanced")
        .with("volumeid", "184467")
        .with("forced", "true")
        .with("ids", "1,2,3,4,5,6,7,8")
        .with("details[0].key", "cpu")
        .with("details[0].value", "8")
        .with("details[1].key", "memory")
        .with("details[1].value", "16384")
        .with("startdate", "2024-05-01T10:30:00Z")
}

fn bench_bind(c: &mut Criterion) {
    let raw = mixed_request();

    let mut group = c.benchmark_group("param_binding");
    group.throughput(Throughput::Elements(1));
    group.bench_function("bind_mixed_table", |b| {
        b.iter(|| bind(black_box(DESCRIPTORS), black_box(&raw)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_bind);
criterion_main!(benches);
