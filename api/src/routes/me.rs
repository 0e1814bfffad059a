use actix_web::HttpResponse;
use ak_shared::ApiResponse;

use crate::middleware::auth::Authenticated;

/// Handler for GET /api/v1/me
///
/// Echoes the identity the gate bound to this request.
pub async fn me(auth: Authenticated) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(auth.into_inner()))
}
