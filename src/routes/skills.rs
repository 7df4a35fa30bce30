/**
 * Skill Routes
 * CRUD API endpoints for skills
 */
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{Map, Value};

use crate::db::{
    models::{Entity, SkillFields},
    DeleteAck, InsertAck, UpdateAck,
};
use crate::routes::{collection, ApiError, ApiJson};
use crate::AppState;

/// POST /api/v1/skills - the body is stored verbatim
pub async fn create_skill(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Map<String, Value>>,
) -> Result<(StatusCode, Json<InsertAck>), ApiError> {
    let doc = collection::body_to_document(body)?;
    collection::create(&state, SkillFields::KIND, doc).await
}

/// GET /api/v1/skills
pub async fn list_skills(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    collection::list(&state, SkillFields::KIND).await
}

/// PUT /api/v1/skills/{id}
pub async fn update_skill(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<SkillFields>,
) -> Result<Json<UpdateAck>, ApiError> {
    collection::upsert(&state, &id, &payload).await
}

/// DELETE /api/v1/skills/{id}
pub async fn delete_skill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, ApiError> {
    collection::remove(&state, SkillFields::KIND, &id).await
}

#[cfg(test)]
mod tests {
    use crate::db::DocumentStore;
    use crate::routes::test_support::{
        assert_internal_error, inserted_id, send, test_app, unavailable_app,
    };
    use axum::http::StatusCode;
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;

    #[tokio::test]
    async fn test_skill_lifecycle() {
        let (app, _) = test_app();

        let (status, ack) = send(
            &app,
            "POST",
            "/api/v1/skills",
            Some(json!({ "name": "Go", "image": "go.png" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = inserted_id(&ack);

        let (status, list) = send(&app, "GET", "/api/v1/skills", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list, json!([{ "_id": id, "name": "Go", "image": "go.png" }]));

        let uri = format!("/api/v1/skills/{}", id);
        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deletedCount"], 1);

        let (_, list) = send(&app, "GET", "/api/v1/skills", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_create_skill_stores_body_verbatim() {
        let (app, _) = test_app();
        let (_, ack) = send(
            &app,
            "POST",
            "/api/v1/skills",
            Some(json!({ "name": "Rust", "image": "rust.png", "level": "advanced" })),
        )
        .await;

        let (_, list) = send(&app, "GET", "/api/v1/skills", None).await;
        assert_eq!(list[0]["_id"], json!(inserted_id(&ack)));
        assert_eq!(list[0]["level"], "advanced");
    }

    #[tokio::test]
    async fn test_create_skill_rejects_non_object_body() {
        let (app, _) = test_app();
        let (status, body) =
            send(&app, "POST", "/api/v1/skills", Some(json!(["Go", "go.png"]))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request body");
    }

    #[tokio::test]
    async fn test_update_skill_sets_name_and_image_only() {
        let (app, _) = test_app();
        let (_, ack) = send(
            &app,
            "POST",
            "/api/v1/skills",
            Some(json!({ "name": "Go", "image": "go.png", "level": "basic" })),
        )
        .await;
        let id = inserted_id(&ack);
        let uri = format!("/api/v1/skills/{}", id);

        let (status, update) = send(
            &app,
            "PUT",
            &uri,
            Some(json!({ "image": "gopher.png", "level": "expert" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(update["matchedCount"], 1);

        let (_, list) = send(&app, "GET", "/api/v1/skills", None).await;
        assert_eq!(
            list,
            json!([{ "_id": id, "name": "Go", "image": "gopher.png", "level": "basic" }])
        );
    }

    #[tokio::test]
    async fn test_update_unknown_skill_creates_it() {
        let (app, _) = test_app();
        let id = ObjectId::new().to_hex();
        let uri = format!("/api/v1/skills/{}", id);

        let (status, update) = send(
            &app,
            "PUT",
            &uri,
            Some(json!({ "name": "Zig", "image": "zig.png" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(update["upsertedId"], json!(id));

        let (_, list) = send(&app, "GET", "/api/v1/skills", None).await;
        assert_eq!(list, json!([{ "_id": id, "name": "Zig", "image": "zig.png" }]));
    }

    #[tokio::test]
    async fn test_update_skill_with_malformed_id_returns_bad_request() {
        let (app, _) = test_app();
        let (status, _) = send(
            &app,
            "PUT",
            "/api/v1/skills/xyz",
            Some(json!({ "name": "Zig" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_skill_routes_store_failure_return_internal_error() {
        let app = unavailable_app();
        let uri = format!("/api/v1/skills/{}", ObjectId::new().to_hex());

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/skills",
            Some(json!({ "name": "Go", "image": "go.png" })),
        )
        .await;
        assert_internal_error(status, &body);

        let (status, body) = send(&app, "GET", "/api/v1/skills", None).await;
        assert_internal_error(status, &body);

        let (status, body) = send(&app, "PUT", &uri, Some(json!({ "name": "Go" }))).await;
        assert_internal_error(status, &body);

        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_internal_error(status, &body);
    }

    #[tokio::test]
    async fn test_create_skill_oversized_body_returns_payload_too_large() {
        let (app, store) = test_app();
        let big = "x".repeat(3 * 1024 * 1024);
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/skills",
            Some(json!({ "name": "Go", "image": big })),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "Request body too large");
        assert!(store
            .find_all(crate::db::CollectionKind::Skills)
            .await
            .unwrap()
            .is_empty());
    }
}
