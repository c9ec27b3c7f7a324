// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use campus_complaints_api::{
    AdminStatsResponse, ApiError, ComplaintListResponse, ComplaintResponse, EscalateRequest,
    HistoryResponse, StudentStatsResponse, SubmitComplaintRequest, TransitionResponse,
    admin_stats, complaint_history, escalate_complaint, get_complaint, list_escalated,
    list_pending, list_resolved, list_role_queue, list_student_complaints, parse_complaint_id,
    parse_status_filter, resolve_complaint, student_stats, submit_complaint,
};
use campus_complaints_domain::{ComplaintId, ComplaintStatus};
use campus_complaints_persistence::Persistence;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::session::{AdminSession, RequestCause, StudentIdentity};

/// Campus Complaints Server - HTTP server for the Campus Complaints system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "CAMPUS_COMPLAINTS_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, env = "CAMPUS_COMPLAINTS_BIND", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, env = "CAMPUS_COMPLAINTS_PORT", default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// Each request holds the lock for its whole read-modify-write.
#[derive(Clone)]
struct AppState {
    /// The complaint store.
    persistence: Arc<Mutex<Persistence>>,
}

/// Query string for the role queue.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct QueueQuery {
    /// Comma-separated statuses, e.g. `pending,escalated`.
    status: Option<String>,
}

/// Query string for a student's complaint list.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct StudentComplaintsQuery {
    /// Only the most recent `limit` complaints.
    limit: Option<usize>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Stable error kind, e.g. `NotAssigned`.
    error: String,
    /// Human-readable message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.kind.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

/// The status code an API error is reported with.
const fn status_for(err: &ApiError) -> StatusCode {
    match err {
        ApiError::Unauthenticated { .. } | ApiError::InvalidRole { .. } => {
            StatusCode::UNAUTHORIZED
        }
        ApiError::NotAssigned { .. } | ApiError::NotVisible { .. } => StatusCode::FORBIDDEN,
        ApiError::TerminalAuthority { .. }
        | ApiError::AlreadyTerminal { .. }
        | ApiError::Conflict { .. } => StatusCode::CONFLICT,
        ApiError::InvalidTarget { .. } | ApiError::InvalidInput { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
        ApiError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = status_for(&err);
        if status.is_server_error() {
            error!(error = %err, "Complaint store error");
        }
        Self {
            status,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

fn complaint_id(raw: &str) -> Result<ComplaintId, HttpError> {
    Ok(parse_complaint_id(raw)?)
}

/// Handler for POST `/complaints` endpoint.
///
/// Files a complaint for the student named in `x-student-id`.
async fn handle_submit_complaint(
    AxumState(app_state): AxumState<AppState>,
    StudentIdentity(student_id): StudentIdentity,
    RequestCause(cause): RequestCause,
    Json(req): Json<SubmitComplaintRequest>,
) -> Result<(StatusCode, Json<ComplaintResponse>), HttpError> {
    info!(
        student_id = %student_id,
        complaint_type = %req.complaint_type,
        "Handling submit_complaint request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let response: ComplaintResponse = submit_complaint(
        &mut *persistence,
        &student_id,
        &req,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/complaints` endpoint.
///
/// Lists complaints visible to the caller, optionally filtered by `status`.
async fn handle_list_complaints(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(session): AdminSession,
    Query(query): Query<QueueQuery>,
) -> Result<Json<ComplaintListResponse>, HttpError> {
    let statuses: Option<Vec<ComplaintStatus>> = parse_status_filter(query.status.as_deref())?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ComplaintListResponse =
        list_role_queue(&mut *persistence, &session, statuses.as_deref())?;
    Ok(Json(response))
}

/// Handler for GET `/complaints/pending` endpoint.
async fn handle_list_pending(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(session): AdminSession,
) -> Result<Json<ComplaintListResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_pending(&mut *persistence, &session)?))
}

/// Handler for GET `/complaints/resolved` endpoint.
async fn handle_list_resolved(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(session): AdminSession,
) -> Result<Json<ComplaintListResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_resolved(&mut *persistence, &session)?))
}

/// Handler for GET `/complaints/escalated` endpoint.
async fn handle_list_escalated(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(session): AdminSession,
) -> Result<Json<ComplaintListResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_escalated(&mut *persistence, &session)?))
}

/// Handler for GET `/complaints/{id}` endpoint.
async fn handle_get_complaint(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(session): AdminSession,
    Path(id): Path<String>,
) -> Result<Json<ComplaintResponse>, HttpError> {
    let id: ComplaintId = complaint_id(&id)?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_complaint(&mut *persistence, &session, id)?))
}

/// Handler for POST `/complaints/{id}/resolve` endpoint.
async fn handle_resolve_complaint(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(session): AdminSession,
    RequestCause(cause): RequestCause,
    Path(id): Path<String>,
) -> Result<Json<TransitionResponse>, HttpError> {
    let id: ComplaintId = complaint_id(&id)?;
    info!(complaint_id = %id, "Handling resolve request");
    let mut persistence = app_state.persistence.lock().await;
    let response: TransitionResponse = resolve_complaint(
        &mut *persistence,
        &session,
        id,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/complaints/{id}/escalate` endpoint.
///
/// The body may name a `target_role` and a `reason`; `{}` uses the default ladder.
async fn handle_escalate_complaint(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(session): AdminSession,
    RequestCause(cause): RequestCause,
    Path(id): Path<String>,
    Json(req): Json<EscalateRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    let id: ComplaintId = complaint_id(&id)?;
    info!(
        complaint_id = %id,
        target_role = ?req.target_role,
        "Handling escalate request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let response: TransitionResponse = escalate_complaint(
        &mut *persistence,
        &session,
        id,
        req,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

/// Handler for GET `/complaints/{id}/history` endpoint.
async fn handle_complaint_history(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(session): AdminSession,
    Path(id): Path<String>,
) -> Result<Json<HistoryResponse>, HttpError> {
    let id: ComplaintId = complaint_id(&id)?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(complaint_history(&mut *persistence, &session, id)?))
}

/// Handler for GET `/students/{enrollment}/complaints` endpoint.
///
/// Lists only complaints filed by the calling student.
async fn handle_student_complaints(
    AxumState(app_state): AxumState<AppState>,
    StudentIdentity(student_id): StudentIdentity,
    Path(enrollment): Path<String>,
    Query(query): Query<StudentComplaintsQuery>,
) -> Result<Json<ComplaintListResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_student_complaints(
        &mut *persistence,
        &student_id,
        &enrollment,
        query.limit,
    )?))
}

/// Handler for GET `/students/{enrollment}/stats` endpoint.
async fn handle_student_stats(
    AxumState(app_state): AxumState<AppState>,
    StudentIdentity(student_id): StudentIdentity,
    Path(enrollment): Path<String>,
) -> Result<Json<StudentStatsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(student_stats(
        &mut *persistence,
        &student_id,
        &enrollment,
    )?))
}

/// Handler for GET `/stats` endpoint.
///
/// Dashboard counts for the caller's authority.
async fn handle_admin_stats(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(session): AdminSession,
) -> Result<Json<AdminStatsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(admin_stats(&mut *persistence, &session)?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/complaints",
            post(handle_submit_complaint).get(handle_list_complaints),
        )
        .route("/complaints/pending", get(handle_list_pending))
        .route("/complaints/resolved", get(handle_list_resolved))
        .route("/complaints/escalated", get(handle_list_escalated))
        .route("/complaints/{id}", get(handle_get_complaint))
        .route("/complaints/{id}/resolve", post(handle_resolve_complaint))
        .route("/complaints/{id}/escalate", post(handle_escalate_complaint))
        .route("/complaints/{id}/history", get(handle_complaint_history))
        .route(
            "/students/{enrollment}/complaints",
            get(handle_student_complaints),
        )
        .route("/students/{enrollment}/stats", get(handle_student_stats))
        .route("/stats", get(handle_admin_stats))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Campus Complaints Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
