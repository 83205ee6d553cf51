use country_bubbles::chart::{
    renderer, ChartViewport, CountryMetric, LayoutSpec, Metric, RegionMetric, Simulation,
    SURFACE_SIZE,
};
use country_bubbles::data::{aggregate, Country, Dataset};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const REGIONS: [&str; 6] = ["Africa", "Americas", "Asia", "Europe", "Oceania", "Polar"];

/// Roughly the size of the full country list
fn synthetic_countries(n: usize) -> Vec<Country> {
    (0..n)
        .map(|i| Country {
            alpha3_code: format!("C{i:02}"),
            name: format!("Country {i}"),
            region: Some(REGIONS[i % REGIONS.len()].to_string()),
            population: (i as u64 + 1) * 1_337_000,
            timezones: Some(
                (0..(i % 5 + 1))
                    .map(|h| format!("UTC+{:02}:00", (i + h) % 14))
                    .collect(),
            ),
            borders: Some((0..(i % 7)).map(|b| format!("B{b}")).collect()),
            ..Country::default()
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let countries = synthetic_countries(250);
    c.bench_function("aggregate_250", |b| {
        b.iter(|| aggregate(black_box(&countries)))
    });
}

fn bench_layout(c: &mut Criterion) {
    let dataset = Dataset::new(synthetic_countries(250));
    let records = dataset.country_records();
    let metric = Metric::Country(CountryMetric::Population);

    c.bench_function("layout_select_and_nodes", |b| {
        b.iter(|| {
            let spec = LayoutSpec::select(metric, black_box(&records));
            spec.nodes(&records, 7, SURFACE_SIZE, SURFACE_SIZE)
        })
    });
}

fn bench_simulation(c: &mut Criterion) {
    let dataset = Dataset::new(synthetic_countries(250));
    let records = dataset.country_records();
    let spec = LayoutSpec::select(Metric::Country(CountryMetric::Population), &records);
    let nodes = spec.nodes(&records, 7, SURFACE_SIZE, SURFACE_SIZE);

    c.bench_function("simulation_10_ticks_250", |b| {
        b.iter(|| {
            let mut sim = Simulation::new(nodes.clone(), spec.strength(), SURFACE_SIZE, SURFACE_SIZE);
            sim.step(10);
            sim
        })
    });

    let regions = dataset.region_records();
    let region_spec = LayoutSpec::select(Metric::Region(RegionMetric::CountriesInRegion), &regions);
    let region_nodes = region_spec.nodes(&regions, 7, SURFACE_SIZE, SURFACE_SIZE);
    c.bench_function("simulation_settle_regions", |b| {
        b.iter(|| {
            let mut sim = Simulation::new(
                region_nodes.clone(),
                region_spec.strength(),
                SURFACE_SIZE,
                SURFACE_SIZE,
            );
            sim.settle();
            sim
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let dataset = Dataset::new(synthetic_countries(250));
    let records = dataset.country_records();
    let spec = LayoutSpec::select(Metric::Country(CountryMetric::Population), &records);
    let mut sim = Simulation::new(
        spec.nodes(&records, 7, SURFACE_SIZE, SURFACE_SIZE),
        spec.strength(),
        SURFACE_SIZE,
        SURFACE_SIZE,
    );
    sim.settle();
    let viewport = ChartViewport::new(0, 0, 160, 50);

    c.bench_function("render_braille_160x50", |b| {
        b.iter(|| renderer::render(black_box(sim.nodes()), Some(3), &viewport))
    });
}

criterion_group!(
    benches,
    bench_aggregate,
    bench_layout,
    bench_simulation,
    bench_render
);
criterion_main!(benches);
