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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod actor;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use geodir_api::{
    ApiError, AuthenticatedActor, CountryModel, CountryResponse, DeleteResponse,
    ExportStatesResponse, ImportStatesResponse, ListCountriesResponse, ListStatesResponse,
    ResourceCatalog, SetPublishedRequest, SetPublishedResponse, StateOption, StateProvinceModel,
    StateProvinceResponse, create_country, create_state, delete_country, delete_state,
    export_states, get_country, get_state, import_states, list_countries, list_states,
    set_countries_published, states_for_country, update_country, update_state,
};
use geodir_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::actor::RequestActor;

/// Geodir Server - HTTP server for country and state/province reference data
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// JSON file of resource-key to text overrides
    #[arg(short, long)]
    resources: Option<PathBuf>,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The reference-data store.
    persistence: Arc<Mutex<Persistence>>,
    /// User-facing text lookup.
    catalog: Arc<ResourceCatalog>,
}

impl AppState {
    fn new(persistence: Persistence, catalog: ResourceCatalog) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            catalog: Arc::new(catalog),
        }
    }
}

/// Query parameters for the list endpoints.
#[derive(Debug, Deserialize)]
struct ShowHiddenQuery {
    /// Whether unpublished records are included. Defaults to `true`.
    show_hidden: Option<bool>,
}

impl ShowHiddenQuery {
    const fn include_hidden(&self) -> bool {
        !matches!(self.show_hidden, Some(false))
    }
}

/// Query parameters for the address-form state drop-down.
#[derive(Debug, Deserialize)]
struct StatesForCountryQuery {
    /// Raw country ID from the form. Absent is the same as blank.
    #[serde(default)]
    country_id: String,
    #[serde(default)]
    add_select_state_item: bool,
    #[serde(default)]
    add_asterisk: bool,
    /// Working language for state names.
    language_id: Option<i64>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::IntegrityViolation { .. } => StatusCode::CONFLICT,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidCsvFormat { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Countries
// ============================================================================

/// Handler for GET `/countries`.
async fn handle_list_countries(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Query(query): Query<ShowHiddenQuery>,
) -> Result<Json<ListCountriesResponse>, HttpError> {
    let response: ListCountriesResponse = list_countries(
        &mut *app_state.persistence.lock().await,
        query.include_hidden(),
        &actor,
    )?;
    Ok(Json(response))
}

/// Handler for POST `/countries`.
async fn handle_create_country(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Json(req): Json<CountryModel>,
) -> Result<Json<CountryResponse>, HttpError> {
    info!(
        actor_id = %actor.id,
        name = %req.name,
        "Handling create_country request"
    );

    let response: CountryResponse = create_country(
        &mut *app_state.persistence.lock().await,
        app_state.catalog.as_ref(),
        &req,
        &actor,
    )?;
    Ok(Json(response))
}

/// Handler for GET `/countries/{id}`.
async fn handle_get_country(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Path(country_id): Path<i64>,
) -> Result<Json<CountryResponse>, HttpError> {
    let response: CountryResponse =
        get_country(&mut *app_state.persistence.lock().await, country_id, &actor)?;
    Ok(Json(response))
}

/// Handler for PUT `/countries/{id}`.
async fn handle_update_country(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Path(country_id): Path<i64>,
    Json(req): Json<CountryModel>,
) -> Result<Json<CountryResponse>, HttpError> {
    info!(actor_id = %actor.id, country_id, "Handling update_country request");

    let response: CountryResponse = update_country(
        &mut *app_state.persistence.lock().await,
        app_state.catalog.as_ref(),
        country_id,
        &req,
        &actor,
    )?;
    Ok(Json(response))
}

/// Handler for DELETE `/countries/{id}`.
async fn handle_delete_country(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Path(country_id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(actor_id = %actor.id, country_id, "Handling delete_country request");

    let response: DeleteResponse = delete_country(
        &mut *app_state.persistence.lock().await,
        app_state.catalog.as_ref(),
        country_id,
        &actor,
    )?;
    Ok(Json(response))
}

async fn set_published(
    app_state: &AppState,
    actor: &AuthenticatedActor,
    req: &SetPublishedRequest,
    published: bool,
) -> Result<Json<SetPublishedResponse>, HttpError> {
    info!(
        actor_id = %actor.id,
        published,
        requested = req.selected_ids.as_ref().map_or(0, Vec::len),
        "Handling set_published request"
    );

    let response: SetPublishedResponse = set_countries_published(
        &mut *app_state.persistence.lock().await,
        req.selected_ids.as_deref(),
        published,
        actor,
    )?;
    Ok(Json(response))
}

/// Handler for POST `/countries/publish`.
async fn handle_publish_countries(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Json(req): Json<SetPublishedRequest>,
) -> Result<Json<SetPublishedResponse>, HttpError> {
    set_published(&app_state, &actor, &req, true).await
}

/// Handler for POST `/countries/unpublish`.
async fn handle_unpublish_countries(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Json(req): Json<SetPublishedRequest>,
) -> Result<Json<SetPublishedResponse>, HttpError> {
    set_published(&app_state, &actor, &req, false).await
}

// ============================================================================
// States / Provinces
// ============================================================================

/// Handler for GET `/countries/{id}/states`.
async fn handle_list_states(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Path(country_id): Path<i64>,
    Query(query): Query<ShowHiddenQuery>,
) -> Result<Json<ListStatesResponse>, HttpError> {
    let response: ListStatesResponse = list_states(
        &mut *app_state.persistence.lock().await,
        country_id,
        query.include_hidden(),
        &actor,
    )?;
    Ok(Json(response))
}

/// Handler for POST `/states`.
async fn handle_create_state(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Json(req): Json<StateProvinceModel>,
) -> Result<Json<StateProvinceResponse>, HttpError> {
    info!(
        actor_id = %actor.id,
        country_id = req.country_id,
        name = %req.name,
        "Handling create_state request"
    );

    let response: StateProvinceResponse =
        create_state(&mut *app_state.persistence.lock().await, &req, &actor)?;
    Ok(Json(response))
}

/// Handler for GET `/states/{id}`.
async fn handle_get_state(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Path(state_province_id): Path<i64>,
) -> Result<Json<StateProvinceResponse>, HttpError> {
    let response: StateProvinceResponse = get_state(
        &mut *app_state.persistence.lock().await,
        state_province_id,
        &actor,
    )?;
    Ok(Json(response))
}

/// Handler for PUT `/states/{id}`.
async fn handle_update_state(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Path(state_province_id): Path<i64>,
    Json(req): Json<StateProvinceModel>,
) -> Result<Json<StateProvinceResponse>, HttpError> {
    info!(actor_id = %actor.id, state_province_id, "Handling update_state request");

    let response: StateProvinceResponse = update_state(
        &mut *app_state.persistence.lock().await,
        state_province_id,
        &req,
        &actor,
    )?;
    Ok(Json(response))
}

/// Handler for DELETE `/states/{id}`.
async fn handle_delete_state(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Path(state_province_id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(actor_id = %actor.id, state_province_id, "Handling delete_state request");

    let response: DeleteResponse = delete_state(
        &mut *app_state.persistence.lock().await,
        app_state.catalog.as_ref(),
        state_province_id,
        &actor,
    )?;
    Ok(Json(response))
}

/// Handler for GET `/states/by_country`.
///
/// Not authenticated: address forms call it anonymously.
async fn handle_states_for_country(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<StatesForCountryQuery>,
) -> Result<Json<Vec<StateOption>>, HttpError> {
    let catalog: ResourceCatalog = match query.language_id {
        Some(language_id) => app_state.catalog.as_ref().clone().with_language(language_id),
        None => app_state.catalog.as_ref().clone(),
    };
    let options: Vec<StateOption> = states_for_country(
        &mut *app_state.persistence.lock().await,
        &catalog,
        &query.country_id,
        query.add_select_state_item,
        query.add_asterisk,
    )?;
    Ok(Json(options))
}

/// Handler for GET `/states/export`.
///
/// Responds with the CSV as a file attachment.
async fn handle_export_states(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
) -> Result<Response, HttpError> {
    info!(actor_id = %actor.id, "Handling export_states request");

    let export: ExportStatesResponse =
        export_states(&mut *app_state.persistence.lock().await, &actor)?;

    let disposition: String = format!("attachment; filename=\"{}\"", export.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, export.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    )
        .into_response())
}

/// Handler for POST `/states/import`.
///
/// The request body is the raw CSV text.
async fn handle_import_states(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    body: String,
) -> Result<Json<ImportStatesResponse>, HttpError> {
    info!(
        actor_id = %actor.id,
        bytes = body.len(),
        "Handling import_states request"
    );

    let response: ImportStatesResponse = import_states(
        &mut *app_state.persistence.lock().await,
        app_state.catalog.as_ref(),
        &body,
        &actor,
    )?;
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/countries",
            get(handle_list_countries).post(handle_create_country),
        )
        .route("/countries/publish", post(handle_publish_countries))
        .route("/countries/unpublish", post(handle_unpublish_countries))
        .route(
            "/countries/{id}",
            get(handle_get_country)
                .put(handle_update_country)
                .delete(handle_delete_country),
        )
        .route("/countries/{id}/states", get(handle_list_states))
        .route("/states", post(handle_create_state))
        .route("/states/by_country", get(handle_states_for_country))
        .route("/states/export", get(handle_export_states))
        .route("/states/import", post(handle_import_states))
        .route(
            "/states/{id}",
            get(handle_get_state)
                .put(handle_update_state)
                .delete(handle_delete_state),
        )
        .with_state(app_state)
}

/// Builds the resource catalog, merging overrides from `path` if given.
fn load_catalog(
    path: Option<&std::path::Path>,
) -> Result<ResourceCatalog, Box<dyn std::error::Error>> {
    let catalog: ResourceCatalog = ResourceCatalog::english();
    let Some(path) = path else {
        return Ok(catalog);
    };

    let raw: String = std::fs::read_to_string(path)?;
    let overrides: HashMap<String, String> = serde_json::from_str(&raw)?;
    info!(
        count = overrides.len(),
        "Loaded resource overrides from {}",
        path.display()
    );
    Ok(catalog.with_overrides(overrides))
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

    info!("Initializing Geodir Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path.display());
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let catalog: ResourceCatalog = load_catalog(args.resources.as_deref())?;

    let app: Router = build_router(AppState::new(persistence, catalog));

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
