use actix_web::{web, HttpResponse, Responder};
use crate::core::{active_buckets, PRICE_BUCKETS};
use crate::models::{BucketTableParams, BucketTablesResponse, BucketView};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/filters/buckets", web::get().to(bucket_tables));
}

/// Quick-select bucket tables
///
/// GET /api/v1/filters/buckets?sizeUnit=sqgaz&minSize=999&maxSize=1998
///
/// Size buckets are returned in the requested unit. Current bounds are
/// canonical; each bucket is flagged active when its canonical bounds
/// equal them.
async fn bucket_tables(params: web::Query<BucketTableParams>) -> impl Responder {
    let unit = params.size_unit;
    let active = active_buckets(&params.current_criteria(), unit);

    let price = PRICE_BUCKETS
        .iter()
        .map(|bucket| {
            BucketView::new(bucket, (bucket.min, bucket.max), active.price == Some(bucket))
        })
        .collect();

    let size = unit
        .buckets()
        .iter()
        .map(|bucket| {
            BucketView::new(bucket, bucket.canonical_bounds(unit), active.size == Some(bucket))
        })
        .collect();

    HttpResponse::Ok().json(BucketTablesResponse {
        size_unit: unit,
        size_unit_label: unit.label().to_string(),
        price,
        size,
    })
}
