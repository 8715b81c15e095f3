use chrono::Utc;
use propnest::core::{
    bucket_for, filter_properties, from_canonical, matches, to_canonical, FilterCriteria, SizeUnit,
    DEFAULT_MAX_PRICE, DEFAULT_MAX_SIZE, PRICE_BUCKETS, SQ_FT_BUCKETS, SQ_GAZ_BUCKETS,
};
use propnest::models::{Property, PropertyStatus};
use proptest::prelude::*;

fn listing(id: i32, title: String, location: String, price: f64, size: f64) -> Property {
    Property {
        id,
        user_id: 1,
        title,
        description: String::new(),
        price,
        size,
        location,
        latitude: 0.0,
        longitude: 0.0,
        images: vec!["uploads/cover.jpg".to_string()],
        phone: "0".to_string(),
        condition: "good".to_string(),
        amenities: vec![],
        facilities: vec![],
        property_type: "flat".to_string(),
        bedrooms: None,
        bathrooms: None,
        furnished: false,
        status: PropertyStatus::Active,
        created_at: Utc::now(),
    }
}

fn arb_property() -> impl Strategy<Value = Property> {
    (
        any::<i32>(),
        "[A-Za-z0-9 ]{0,24}",
        "[A-Za-z ,]{0,24}",
        0.0..=DEFAULT_MAX_PRICE,
        0.0..=DEFAULT_MAX_SIZE,
    )
        .prop_map(|(id, title, location, price, size)| listing(id, title, location, price, size))
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    (0.0..1e8f64, 0.0..1e8f64, 0.0..1e4f64, 0.0..1e4f64, "[a-z]{0,3}").prop_map(
        |(a, b, c, d, query)| FilterCriteria {
            min_price: a.min(b),
            max_price: a.max(b),
            min_size: c.min(d),
            max_size: c.max(d),
            query,
        },
    )
}

proptest! {
    #[test]
    fn default_criteria_match_everything(property in arb_property()) {
        prop_assert!(matches(&property, &FilterCriteria::default()));
    }

    #[test]
    fn exceeding_any_bound_excludes(property in arb_property(), criteria in arb_criteria()) {
        if property.price > criteria.max_price
            || property.price < criteria.min_price
            || property.size > criteria.max_size
            || property.size < criteria.min_size
        {
            prop_assert!(!matches(&property, &criteria));
        }
    }

    #[test]
    fn query_case_does_not_matter(property in arb_property(), query in "[A-Za-z]{1,4}") {
        let lower = FilterCriteria::default().with_query(query.to_lowercase());
        let upper = FilterCriteria::default().with_query(query.to_uppercase());
        prop_assert_eq!(matches(&property, &lower), matches(&property, &upper));
    }

    #[test]
    fn gaz_round_trip(x in 0.0..1e9f64) {
        let back = to_canonical(from_canonical(x, SizeUnit::SquareGaz), SizeUnit::SquareGaz);
        prop_assert!((back - x).abs() <= x.abs() * 1e-12 + 1e-9);
    }

    #[test]
    fn every_price_has_exactly_one_bucket(price in 0.0..1e12f64) {
        let bucket = bucket_for(&PRICE_BUCKETS, price);
        prop_assert!(bucket.is_some());

        let last = PRICE_BUCKETS.len() - 1;
        let containing = PRICE_BUCKETS
            .iter()
            .enumerate()
            .filter(|(i, b)| price >= b.min as f64 && (*i == last || price < b.max as f64))
            .count();
        prop_assert_eq!(containing, 1);
    }

    #[test]
    fn every_size_has_exactly_one_bucket(size in 0.0..1e6f64) {
        prop_assert!(bucket_for(&SQ_FT_BUCKETS, size).is_some());
        prop_assert!(bucket_for(&SQ_GAZ_BUCKETS, from_canonical(size, SizeUnit::SquareGaz)).is_some());
    }

    #[test]
    fn filtering_preserves_order(
        properties in proptest::collection::vec(arb_property(), 0..40),
        criteria in arb_criteria(),
    ) {
        let filtered = filter_properties(&properties, &criteria);

        let expected: Vec<*const Property> = properties
            .iter()
            .filter(|p| matches(p, &criteria))
            .map(|p| p as *const Property)
            .collect();
        let actual: Vec<*const Property> = filtered.iter().map(|p| *p as *const Property).collect();

        prop_assert_eq!(actual, expected);
    }
}
