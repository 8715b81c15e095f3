use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::active_buckets;
use crate::models::{CreatePropertyRequest, SearchParams, SearchResponse, UpdatePropertyRequest};
use crate::routes::{bad_request, forbidden, internal_error, not_found, AppState};
use crate::services::{AuthenticatedUser, PostgresError};

/// Configure all listing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/properties", web::get().to(list_properties))
        .route("/properties", web::post().to(create_property))
        .route("/properties/search", web::get().to(search_properties))
        .route("/properties/{id}", web::get().to(get_property))
        .route("/properties/{id}", web::patch().to(update_property))
        .route("/properties/{id}", web::delete().to(delete_property))
        .route("/users/{user_id}/properties", web::get().to(list_user_properties));
}

/// GET /api/v1/properties
async fn list_properties(state: web::Data<AppState>) -> impl Responder {
    match state.all_properties().await {
        Ok(properties) => HttpResponse::Ok().json(properties),
        Err(e) => internal_error("Failed to fetch properties", &e),
    }
}

/// Search listings
///
/// GET /api/v1/properties/search?minPrice=&maxPrice=&minSize=&maxSize=&q=&sizeUnit=sqgaz&priceBucket=&sizeBucket=&limit=
///
/// Size bounds and the size bucket are read in `sizeUnit` and converted to
/// square feet before filtering. The response echoes the canonical criteria
/// and the buckets they correspond to.
async fn search_properties(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> impl Responder {
    if let Err(errors) = params.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let criteria = match params.to_criteria() {
        Ok(criteria) => criteria,
        Err(e) => return bad_request("Invalid filter", e.to_string()),
    };

    let candidates = match state.all_properties().await {
        Ok(properties) => properties,
        Err(e) => return internal_error("Failed to fetch properties", &e),
    };

    let result = state.searcher.search(candidates, &criteria, params.limit);
    let active = active_buckets(&criteria, params.size_unit);

    tracing::debug!(
        "Search matched {} of {} properties (criteria: {:?})",
        result.total_matches,
        result.total_candidates,
        criteria
    );

    HttpResponse::Ok().json(SearchResponse {
        total_results: result.properties.len(),
        total_matches: result.total_matches,
        properties: result.properties,
        criteria,
        size_unit: params.size_unit,
        active_price_bucket: active.price.map(|b| b.label.to_string()),
        active_size_bucket: active.size.map(|b| b.label.to_string()),
    })
}

/// GET /api/v1/properties/{id}
async fn get_property(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    let id = path.into_inner();

    match state.postgres.get_property(id).await {
        Ok(Some(property)) => HttpResponse::Ok().json(property),
        Ok(None) => not_found(format!("Property {} does not exist", id)),
        Err(e) => internal_error("Failed to fetch property", &e),
    }
}

/// POST /api/v1/properties
///
/// The caller becomes the owner. `size` may be given in `sizeUnit`.
async fn create_property(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<CreatePropertyRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_property: {:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let new_property = match req.into_inner().into_new_property(user.user_id) {
        Ok(new_property) => new_property,
        Err(e) => return bad_request("Validation failed", e.to_string()),
    };

    match state.postgres.create_property(new_property).await {
        Ok(property) => {
            state.invalidate_listings().await;
            HttpResponse::Created().json(property)
        }
        Err(e) => internal_error("Failed to create property", &e),
    }
}

/// PATCH /api/v1/properties/{id}
async fn update_property(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    req: web::Json<UpdatePropertyRequest>,
) -> impl Responder {
    let id = path.into_inner();

    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }
    if req.is_empty() {
        return bad_request("Validation failed", "No fields to update");
    }

    let property = match state.postgres.get_property(id).await {
        Ok(Some(property)) => property,
        Ok(None) => return not_found(format!("Property {} does not exist", id)),
        Err(e) => return internal_error("Failed to fetch property", &e),
    };

    if !user.can_modify(property.user_id) {
        tracing::info!("User {} may not modify property {}", user.user_id, id);
        return forbidden("Only the owner or an administrator may modify this property");
    }

    let changes = match req.into_inner().into_changes() {
        Ok(changes) => changes,
        Err(e) => return bad_request("Validation failed", e.to_string()),
    };

    match state.postgres.update_property(id, changes).await {
        Ok(updated) => {
            state.invalidate_listings().await;
            HttpResponse::Ok().json(updated)
        }
        Err(PostgresError::NotFound(_)) => not_found(format!("Property {} does not exist", id)),
        Err(e) => internal_error("Failed to update property", &e),
    }
}

/// DELETE /api/v1/properties/{id}
async fn delete_property(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
) -> impl Responder {
    let id = path.into_inner();

    let property = match state.postgres.get_property(id).await {
        Ok(Some(property)) => property,
        Ok(None) => return not_found(format!("Property {} does not exist", id)),
        Err(e) => return internal_error("Failed to fetch property", &e),
    };

    if !user.can_modify(property.user_id) {
        return forbidden("Only the owner or an administrator may delete this property");
    }

    match state.postgres.delete_property(id).await {
        Ok(true) => {
            state.invalidate_listings().await;
            tracing::info!("User {} deleted property {}", user.user_id, id);
            HttpResponse::NoContent().finish()
        }
        Ok(false) => not_found(format!("Property {} does not exist", id)),
        Err(e) => internal_error("Failed to delete property", &e),
    }
}

/// GET /api/v1/users/{user_id}/properties
async fn list_user_properties(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    let user_id = path.into_inner();

    match state.postgres.list_properties_by_user(user_id).await {
        Ok(properties) => HttpResponse::Ok().json(properties),
        Err(e) => internal_error("Failed to fetch user properties", &e),
    }
}
