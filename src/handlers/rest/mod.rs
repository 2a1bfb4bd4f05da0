mod error;

use error::ApiError;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_macros::debug_handler;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use std::sync::Arc;

use crate::{
    dto::{CreateNoteRequest, ErrorResponse, NoteResponse, UpdateNoteRequest},
    service::NoteService,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        create_note,
        fetch_notes,
        fetch_note_by_id,
        update_note,
        delete_note
    ),
    components(schemas(NoteResponse, CreateNoteRequest, UpdateNoteRequest, ErrorResponse)),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

pub fn router(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/v1/notes", post(create_note).get(fetch_notes))
        .route(
            "/v1/notes/{id}",
            get(fetch_note_by_id).patch(update_note).delete(delete_note),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

fn parse_note_id(path: Result<Path<String>, PathRejection>) -> Result<Uuid, ApiError> {
    let Path(raw) = path.map_err(|e| {
        tracing::debug!("undecodable note ID: {}", e);
        ApiError::invalid_note_id()
    })?;

    Uuid::parse_str(raw.trim()).map_err(|e| {
        tracing::debug!("invalid note ID {:?}: {}", raw, e);
        ApiError::invalid_note_id()
    })
}

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(|e| {
        tracing::debug!("invalid request body: {}", e);
        ApiError::bad_request()
    })
}

#[utoipa::path(
    post,
    path = "/v1/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteResponse),
        (status = 400, description = "Missing or empty title or description", body = ErrorResponse),
        (status = 409, description = "Title already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Response {
    let note = match parse_body(payload).map(CreateNoteRequest::into_new_note) {
        Ok(Some(note)) => note,
        Ok(None) => return ApiError::bad_request().into_response(),
        Err(e) => return e.into_response(),
    };

    match service.create_note(note).await {
        Ok(note) => (StatusCode::CREATED, Json(NoteResponse::from(note))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/v1/notes",
    responses(
        (status = 200, description = "All notes, oldest first", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn fetch_notes(State(service): State<Arc<NoteService>>) -> Response {
    match service.fetch_notes().await {
        Ok(notes) => {
            let notes: Vec<NoteResponse> = notes.into_iter().map(NoteResponse::from).collect();
            (StatusCode::OK, Json(notes)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/v1/notes/{id}",
    params(
        ("id" = Uuid, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 400, description = "Malformed note ID", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn fetch_note_by_id(
    State(service): State<Arc<NoteService>>,
    id: Result<Path<String>, PathRejection>,
) -> Response {
    let id = match parse_note_id(id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match service.fetch_note_by_id(id).await {
        Ok(note) => (StatusCode::OK, Json(NoteResponse::from(note))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    patch,
    path = "/v1/notes/{id}",
    params(
        ("id" = Uuid, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 400, description = "Malformed note ID or body", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 409, description = "Title already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> Response {
    let id = match parse_note_id(id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    let patch = match parse_body(payload).map(UpdateNoteRequest::into_patch) {
        Ok(Some(patch)) => patch,
        Ok(None) => return ApiError::bad_request().into_response(),
        Err(e) => return e.into_response(),
    };

    match service.update_note(id, patch).await {
        Ok(note) => (StatusCode::OK, Json(NoteResponse::from(note))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/v1/notes/{id}",
    params(
        ("id" = Uuid, Path, description = "Note ID")
    ),
    responses(
        (status = 204, description = "Note deleted, or it did not exist"),
        (status = 400, description = "Malformed note ID", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    id: Result<Path<String>, PathRejection>,
) -> Response {
    let id = match parse_note_id(id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match service.delete_note(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

async fn route_not_found() -> Response {
    ApiError::NotFound(error::ROUTE_NOT_FOUND.to_string()).into_response()
}
