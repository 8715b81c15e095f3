use actix_web::{web, HttpResponse, Responder};
use crate::models::UpdateStatusRequest;
use crate::routes::{forbidden, internal_error, not_found, AppState};
use crate::services::{AuthenticatedUser, PostgresError};

/// Configure administrator routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/admin/users", web::get().to(list_users))
        .route("/admin/properties/{id}/status", web::patch().to(set_property_status));
}

/// GET /api/v1/admin/users
async fn list_users(state: web::Data<AppState>, user: AuthenticatedUser) -> impl Responder {
    if !user.is_admin {
        return forbidden("Administrator access required");
    }

    match state.postgres.list_users().await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(e) => internal_error("Failed to fetch users", &e),
    }
}

/// Activate or deactivate a listing
///
/// PATCH /api/v1/admin/properties/{id}/status
///
/// ```json
/// { "status": "active|inactive" }
/// ```
async fn set_property_status(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    req: web::Json<UpdateStatusRequest>,
) -> impl Responder {
    if !user.is_admin {
        return forbidden("Administrator access required");
    }

    let id = path.into_inner();

    match state.postgres.set_property_status(id, req.status).await {
        Ok(property) => {
            state.invalidate_listings().await;
            tracing::info!("Admin {} set property {} to {:?}", user.user_id, id, req.status);
            HttpResponse::Ok().json(property)
        }
        Err(PostgresError::NotFound(_)) => not_found(format!("Property {} does not exist", id)),
        Err(e) => internal_error("Failed to update property status", &e),
    }
}
