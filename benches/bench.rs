// Criterion benchmarks for Propnest

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use propnest::core::{active_buckets, matches, FilterCriteria, Searcher, SizeUnit, PRICE_BUCKETS, SQ_GAZ_BUCKETS};
use propnest::models::{Property, PropertyStatus};
use chrono::Utc;

const LOCATIONS: [&str; 4] = ["Civil Lines, Bareilly", "Gomti Nagar, Lucknow", "Tajganj, Agra", "Kalyanpur, Kanpur"];

fn create_listing(id: usize) -> Property {
    Property {
        id: id as i32,
        user_id: (id % 50) as i32,
        title: format!("{}BHK Flat #{}", 1 + id % 4, id),
        description: String::new(),
        price: 500_000.0 + (id as f64 * 37_500.0) % 15_000_000.0,
        size: 300.0 + (id as f64 * 13.0) % 6_000.0,
        location: LOCATIONS[id % LOCATIONS.len()].to_string(),
        latitude: 28.367,
        longitude: 79.4304,
        images: vec![format!("uploads/{}.jpg", id)],
        phone: "9999999999".to_string(),
        condition: "good".to_string(),
        amenities: vec!["parking".to_string()],
        facilities: vec![],
        property_type: "flat".to_string(),
        bedrooms: Some((1 + id % 4) as i32),
        bathrooms: Some(1),
        furnished: id % 2 == 0,
        status: PropertyStatus::Active,
        created_at: Utc::now(),
    }
}

fn create_criteria() -> FilterCriteria {
    FilterCriteria::default()
        .with_price_bucket(&PRICE_BUCKETS[1])
        .with_size_bucket(&SQ_GAZ_BUCKETS[1], SizeUnit::SquareGaz)
        .with_query("bareilly")
}

fn bench_matches(c: &mut Criterion) {
    let property = create_listing(42);
    let criteria = create_criteria();

    c.bench_function("matches_single", |b| {
        b.iter(|| matches(black_box(&property), black_box(&criteria)));
    });
}

fn bench_search(c: &mut Criterion) {
    let searcher = Searcher::default();
    let criteria = create_criteria();

    let mut group = c.benchmark_group("search");

    for listing_count in [10, 100, 1000, 10_000].iter() {
        let listings: Vec<Property> = (0..*listing_count).map(create_listing).collect();

        group.bench_with_input(
            BenchmarkId::new("search", listing_count),
            listing_count,
            |b, _| {
                b.iter(|| searcher.search(black_box(listings.clone()), black_box(&criteria), None));
            },
        );
    }

    group.finish();
}

fn bench_active_buckets(c: &mut Criterion) {
    let criteria = create_criteria();

    c.bench_function("active_buckets", |b| {
        b.iter(|| active_buckets(black_box(&criteria), black_box(SizeUnit::SquareGaz)));
    });
}

criterion_group!(benches, bench_matches, bench_search, bench_active_buckets);

criterion_main!(benches);
