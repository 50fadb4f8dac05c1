use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use salience_core::{CentralityConfig, LabelTable, Labels, Measure, PipelineConfig, Triple, TripleSet};
use salience_rank::{TripleGraph, centrality, run};

/// Entity count for each tier; triples are four times the entity count.
const TIERS: [(&str, u64); 3] = [("small", 200), ("medium", 1_000), ("large", 4_000)];

fn random_triples(rng: &mut StdRng, entities: u64, count: u64) -> TripleSet {
    (0..count)
        .map(|_| {
            Triple::new(
                rng.gen_range(0..entities),
                rng.gen_range(0..entities),
                rng.gen_range(0..16),
            )
        })
        .collect()
}

fn labels(entities: u64) -> Labels {
    Labels::new(
        (0..entities).map(|i| (i, format!("e{i}"))).collect::<LabelTable>(),
        (0..16).map(|i| (i, format!("r{i}"))).collect::<LabelTable>(),
    )
}

fn bench_centrality(c: &mut Criterion) {
    let mut group = c.benchmark_group("centrality");
    let config = CentralityConfig::default();

    for (name, entities) in TIERS {
        let mut rng = StdRng::seed_from_u64(0x5A11_u64 + entities);
        let triples = random_triples(&mut rng, entities, entities * 4);
        let graph = TripleGraph::build(&triples, false);
        group.throughput(Throughput::Elements(triples.len() as u64));

        for measure in [Measure::Degree, Measure::Eigenvector, Measure::PageRank] {
            group.bench_with_input(
                BenchmarkId::new(measure.name(), name),
                &graph,
                |b, graph| b.iter(|| black_box(centrality(graph, measure, &config).ok())),
            );
        }
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let config = PipelineConfig::default();

    for (name, entities) in TIERS {
        let mut rng = StdRng::seed_from_u64(0xC0FFEE_u64 + entities);
        let observed = random_triples(&mut rng, entities, entities * 4);
        let mut rows: Vec<Triple> = observed.iter().copied().collect();
        rows.extend(random_triples(&mut rng, entities, entities / 2).iter().copied());
        let candidate: TripleSet = rows.into_iter().collect();
        let labels = labels(entities);

        group.throughput(Throughput::Elements(observed.len() as u64));
        group.bench_function(BenchmarkId::new("run", name), |b| {
            b.iter(|| black_box(run(&observed, &candidate, &labels, &config).ok()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_centrality, bench_pipeline);
criterion_main!(benches);
