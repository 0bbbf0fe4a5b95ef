// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end router tests.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode as HttpStatusCode, header},
};
use geodir_api::{
    CountryModel, CountryResponse, DeleteResponse, ImportStatesResponse, ListCountriesResponse,
    ListStatesResponse, LocalizedNameModel, ResourceCatalog, SetPublishedResponse, StateOption,
    StateProvinceModel, StateProvinceResponse,
};
use geodir_domain::Address;
use geodir_persistence::Persistence;
use serde::Serialize;
use tower::ServiceExt;

use crate::actor::{ACTOR_ID_HEADER, ACTOR_ROLE_HEADER};
use crate::{AppState, ErrorResponse, build_router};

/// Helper to create test app state with in-memory persistence.
fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState::new(persistence, ResourceCatalog::english())
}

fn country_model(name: &str, iso2: &str, iso3: &str) -> CountryModel {
    CountryModel {
        name: name.to_string(),
        two_letter_iso_code: iso2.to_string(),
        three_letter_iso_code: iso3.to_string(),
        numeric_iso_code: 0,
        allows_billing: true,
        allows_shipping: true,
        subject_to_vat: false,
        published: true,
        display_order: 0,
        locales: Vec::new(),
        store_ids: Vec::new(),
    }
}

fn state_model(country_id: i64, name: &str, abbreviation: &str) -> StateProvinceModel {
    StateProvinceModel {
        country_id,
        name: name.to_string(),
        abbreviation: abbreviation.to_string(),
        published: true,
        display_order: 0,
        locales: Vec::new(),
    }
}

fn request(method: &str, uri: &str, role: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match role {
        Some(role) => builder
            .header(ACTOR_ID_HEADER, "tester")
            .header(ACTOR_ROLE_HEADER, role),
        None => builder,
    }
}

fn json_request<T: Serialize>(method: &str, uri: &str, role: &str, body: &T) -> Request<Body> {
    request(method, uri, Some(role))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str, role: Option<&str>) -> Request<Body> {
    request(method, uri, role).body(Body::empty()).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (HttpStatusCode, Vec<u8>) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status: HttpStatusCode = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body_bytes.to_vec())
}

async fn create_country_via_api(app: &Router, name: &str, iso2: &str, iso3: &str) -> i64 {
    let (status, body) = send(
        app,
        json_request("POST", "/countries", "admin", &country_model(name, iso2, iso3)),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    let response: CountryResponse = serde_json::from_slice(&body).unwrap();
    response.country.country_id
}

async fn create_state_via_api(app: &Router, country_id: i64, name: &str, abbr: &str) -> i64 {
    let (status, body) = send(
        app,
        json_request("POST", "/states", "admin", &state_model(country_id, name, abbr)),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    let response: StateProvinceResponse = serde_json::from_slice(&body).unwrap();
    response.state.state_province_id
}

#[tokio::test]
async fn test_create_and_get_country_as_admin() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/countries",
            "admin",
            &country_model("Canada", "ca", "can"),
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    let created: CountryResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(created.country.two_letter_iso_code, "CA");
    assert_eq!(
        created.message.as_deref(),
        Some("The new country has been added successfully.")
    );

    let uri: String = format!("/countries/{}", created.country.country_id);
    let (status, body) = send(&app, empty_request("GET", &uri, Some("Admin"))).await;
    assert_eq!(status, HttpStatusCode::OK);
    let loaded: CountryResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(loaded.country, created.country);
    assert!(loaded.message.is_none());
}

#[tokio::test]
async fn test_guest_is_forbidden() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/countries",
            "guest",
            &country_model("Canada", "CA", "CAN"),
        ),
    )
    .await;

    assert_eq!(status, HttpStatusCode::FORBIDDEN);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(error.error);
    assert!(error.message.contains("ManageCountries"));
}

#[tokio::test]
async fn test_missing_or_invalid_actor_is_unauthorized() {
    let app: Router = build_router(create_test_app_state());

    let (status, _) = send(&app, empty_request("GET", "/countries", None)).await;
    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, empty_request("GET", "/countries", Some("superuser"))).await;
    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(error.message.starts_with("Authentication failed"));

    let blank_id: Request<Body> = Request::builder()
        .method("GET")
        .uri("/countries")
        .header(ACTOR_ID_HEADER, " ")
        .header(ACTOR_ROLE_HEADER, "admin")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, blank_id).await;
    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        error.message,
        "Authentication failed: Actor ID cannot be empty"
    );
}

#[tokio::test]
async fn test_unknown_country_is_not_found() {
    let app: Router = build_router(create_test_app_state());

    let (status, _) = send(&app, empty_request("GET", "/countries/999", Some("admin"))).await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);

    let (status, _) = send(&app, empty_request("DELETE", "/states/999", Some("admin"))).await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_country_is_bad_request() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        json_request("POST", "/countries", "admin", &country_model("", "CA", "CAN")),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(error.message.contains("name"));
}

#[tokio::test]
async fn test_update_country_round_trip() {
    let app: Router = build_router(create_test_app_state());
    let id: i64 = create_country_via_api(&app, "Germany", "DE", "DEU").await;

    let mut change: CountryModel = country_model("Deutschland", "DE", "DEU");
    change.display_order = 5;
    let (status, body) = send(
        &app,
        json_request("PUT", &format!("/countries/{id}"), "admin", &change),
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    let updated: CountryResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(updated.country.name, "Deutschland");
    assert_eq!(updated.country.display_order, 5);
}

#[tokio::test]
async fn test_delete_country_with_addresses_is_conflict() {
    let app_state: AppState = create_test_app_state();
    let app: Router = build_router(app_state.clone());
    let id: i64 = create_country_via_api(&app, "Chile", "CL", "CHL").await;

    app_state
        .persistence
        .lock()
        .await
        .insert_address(&Address::new(Some(id), None, "Santiago"))
        .unwrap();

    let uri: String = format!("/countries/{id}");
    let (status, body) = send(&app, empty_request("DELETE", &uri, Some("admin"))).await;

    assert_eq!(status, HttpStatusCode::CONFLICT);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        error.message,
        "The country can't be deleted. It has associated addresses"
    );

    let (status, _) = send(&app, empty_request("GET", &uri, Some("admin"))).await;
    assert_eq!(status, HttpStatusCode::OK);
}

#[tokio::test]
async fn test_delete_country_without_addresses() {
    let app: Router = build_router(create_test_app_state());
    let id: i64 = create_country_via_api(&app, "Peru", "PE", "PER").await;

    let uri: String = format!("/countries/{id}");
    let (status, body) = send(&app, empty_request("DELETE", &uri, Some("admin"))).await;

    assert_eq!(status, HttpStatusCode::OK);
    let deleted: DeleteResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(deleted.id, id);

    let (status, _) = send(&app, empty_request("GET", &uri, Some("admin"))).await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_publish_and_unpublish_selected() {
    let app: Router = build_router(create_test_app_state());
    let a: i64 = create_country_via_api(&app, "Austria", "AT", "AUT").await;
    let b: i64 = create_country_via_api(&app, "Belgium", "BE", "BEL").await;

    let body = serde_json::json!({ "selected_ids": [a, b, 404] });
    let (status, response) = send(
        &app,
        json_request("POST", "/countries/unpublish", "admin", &body),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    let unpublished: SetPublishedResponse = serde_json::from_slice(&response).unwrap();
    assert_eq!(unpublished.updated_count, 2);
    assert!(!unpublished.published);

    let (_, listed) = send(
        &app,
        empty_request("GET", "/countries?show_hidden=false", Some("admin")),
    )
    .await;
    let visible: ListCountriesResponse = serde_json::from_slice(&listed).unwrap();
    assert_eq!(visible.total, 0);

    let (status, response) = send(
        &app,
        json_request("POST", "/countries/publish", "admin", &serde_json::json!({})),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    let noop: SetPublishedResponse = serde_json::from_slice(&response).unwrap();
    assert_eq!(noop.updated_count, 0);
}

#[tokio::test]
async fn test_state_crud_and_listing() {
    let app: Router = build_router(create_test_app_state());
    let us: i64 = create_country_via_api(&app, "United States", "US", "USA").await;
    let wa: i64 = create_state_via_api(&app, us, "Washington", "WA").await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/states/{wa}"),
            "admin",
            &state_model(us, "Washington", "WSH"),
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    let updated: StateProvinceResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(updated.state.abbreviation, "WSH");

    let (status, body) = send(
        &app,
        empty_request("GET", &format!("/countries/{us}/states"), Some("admin")),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    let listed: ListStatesResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(listed.total, 1);

    let (status, _) = send(
        &app,
        empty_request("DELETE", &format!("/states/{wa}"), Some("admin")),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
}

#[tokio::test]
async fn test_create_state_for_unknown_country_is_not_found() {
    let app: Router = build_router(create_test_app_state());

    let (status, _) = send(
        &app,
        json_request("POST", "/states", "admin", &state_model(77, "Nowhere", "NW")),
    )
    .await;

    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_states_by_country_needs_no_actor() {
    let app: Router = build_router(create_test_app_state());
    let us: i64 = create_country_via_api(&app, "United States", "US", "USA").await;
    create_state_via_api(&app, us, "Washington", "WA").await;

    let uri: String = format!("/states/by_country?country_id={us}&add_select_state_item=true");
    let (status, body) = send(&app, empty_request("GET", &uri, None)).await;
    assert_eq!(status, HttpStatusCode::OK);
    let options: Vec<StateOption> = serde_json::from_slice(&body).unwrap();
    assert_eq!(options.len(), 2);
    assert_eq!(options[0].id, "");
    assert_eq!(options[0].name, "Select state");
    assert_eq!(options[1].name, "Washington");

    let (status, body) = send(&app, empty_request("GET", "/states/by_country", None)).await;
    assert_eq!(status, HttpStatusCode::OK);
    let options: Vec<StateOption> = serde_json::from_slice(&body).unwrap();
    assert_eq!(options.len(), 1);
}

#[tokio::test]
async fn test_states_by_country_uses_requested_language() {
    let app: Router = build_router(create_test_app_state());
    let de: i64 = create_country_via_api(&app, "Germany", "DE", "DEU").await;
    let mut bavaria: StateProvinceModel = state_model(de, "Bavaria", "BY");
    bavaria.locales.push(LocalizedNameModel {
        language_id: 2,
        name: String::from("Bayern"),
    });
    let (status, _) = send(&app, json_request("POST", "/states", "admin", &bavaria)).await;
    assert_eq!(status, HttpStatusCode::OK);

    let uri: String = format!("/states/by_country?country_id={de}&language_id=2");
    let (_, body) = send(&app, empty_request("GET", &uri, None)).await;
    let options: Vec<StateOption> = serde_json::from_slice(&body).unwrap();
    assert_eq!(options[0].name, "Bayern");

    let uri: String = format!("/states/by_country?country_id={de}&language_id=9");
    let (_, body) = send(&app, empty_request("GET", &uri, None)).await;
    let options: Vec<StateOption> = serde_json::from_slice(&body).unwrap();
    assert_eq!(options[0].name, "Bavaria");
}

#[tokio::test]
async fn test_export_is_a_csv_attachment() {
    let app: Router = build_router(create_test_app_state());
    let us: i64 = create_country_via_api(&app, "United States", "US", "USA").await;
    create_state_via_api(&app, us, "Washington", "WA").await;

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/states/export", Some("admin")))
        .await
        .unwrap();

    assert_eq!(response.status(), HttpStatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv"
    );
    let disposition: &str = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(disposition.starts_with("attachment; filename=\"states_"));

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body_bytes[..], b"US,Washington,WA,true,0\n");
}

#[tokio::test]
async fn test_import_states_status_mapping() {
    let app: Router = build_router(create_test_app_state());
    create_country_via_api(&app, "United States", "US", "USA").await;

    let ok: Request<Body> = request("POST", "/states/import", Some("admin"))
        .header("content-type", "text/plain")
        .body(Body::from("US,Oregon,OR,true,0\nUS,Idaho,ID,true,1\n"))
        .unwrap();
    let (status, body) = send(&app, ok).await;
    assert_eq!(status, HttpStatusCode::OK);
    let imported: ImportStatesResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(imported.imported_count, 2);
    assert_eq!(imported.message, "2 states have been successfully imported");

    let malformed: Request<Body> = request("POST", "/states/import", Some("admin"))
        .header("content-type", "text/plain")
        .body(Body::from("US,Utah,UT\n"))
        .unwrap();
    let (status, _) = send(&app, malformed).await;
    assert_eq!(status, HttpStatusCode::UNPROCESSABLE_ENTITY);

    let empty: Request<Body> = request("POST", "/states/import", Some("admin"))
        .header("content-type", "text/plain")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, empty).await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(error.message.contains("Please upload a file"));
}
