use axum::Json;

use crate::models::{IndexResponse, SERVICE_BANNER};

pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: SERVICE_BANNER,
    })
}
