use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ontograph::cypher::executable_statements;
use ontograph::ontology::{LinkType, ObjectType, Property};
use ontograph::SchemaCompiler;

/// Schema with `size` object types chained by links, plus a few properties each
fn generate_schema(size: usize) -> (Vec<ObjectType>, Vec<LinkType>) {
    let types: Vec<ObjectType> = (0..size)
        .map(|i| {
            let mut obj = ObjectType::new(format!("Station {}", i))
                .with_description(format!("Work station #{}; generated", i));
            for p in 0..4 {
                obj = obj.with_property(Property::new(
                    format!("p{}", p),
                    format!("Metric {}", p),
                    "number",
                ));
            }
            if i % 3 == 0 {
                obj = obj.with_label("Station");
            }
            obj
        })
        .collect();

    let links = (1..size)
        .map(|i| LinkType::new("feeds into", format!("Station {}", i - 1), format!("Station {}", i)))
        .collect();

    (types, links)
}

/// Benchmark compilation throughput
fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    let compiler = SchemaCompiler::new();

    for size in [10, 100, 1000].iter() {
        let (types, links) = generate_schema(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| compiler.compile(&types, &links));
        });
    }
    group.finish();
}

/// Benchmark splitting a compiled script back into statements
fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split");
    let compiler = SchemaCompiler::new();

    for size in [10, 100, 1000].iter() {
        let (types, links) = generate_schema(*size);
        let text = compiler.compile(&types, &links).render();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| executable_statements(&text));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compile, bench_split);
criterion_main!(benches);
