//! End-to-end negotiation scenarios
//!
//! These tests drive a host round trip through the public API: a client
//! writes a version, the server reads, resolves and negotiates it against an
//! endpoint model, then reports its versions on the response.

use crate::prelude::*;
use crate::ErrorCode;
use http::{HeaderMap, Request, Response, StatusCode};

fn v(text: &str) -> ApiVersion {
    text.parse().unwrap()
}

fn orders_model() -> ApiVersionModel {
    ApiVersionConventionBuilder::new()
        .has_api_versions([v("1.0"), v("2.0")])
        .has_deprecated_api_version(v("0.9"))
        .build(&v("1.0"))
        .unwrap()
}

fn header_and_query() -> ApiVersioningOptions {
    ApiVersioningOptions::new().reader(
        QueryStringApiVersionReader::default().combine(HeaderApiVersionReader::new(["api-version"])),
    )
}

#[test]
fn test_canonical_forms_round_trip() {
    for text in ["1", "1.1", "1-Alpha", "2013-08-06", "2013-08-06.1.1-Beta"] {
        let parsed: ApiVersion = text.parse().unwrap();
        assert_eq!(parsed.to_string(), text, "round trip of {}", text);
    }
}

#[test]
fn test_idempotent_duplicate_query_value() {
    let request = Request::get("/orders?api-version=1.0&api-version=1.0").body(()).unwrap();
    let negotiated = ApiVersionNegotiator::default()
        .negotiate(&request, &orders_model())
        .unwrap();

    assert_eq!(negotiated.version(), &v("1.0"));
}

#[test]
fn test_genuine_query_conflict() {
    let request = Request::get("/orders?api-version=1.0&api-version=2.0").body(()).unwrap();
    let err = ApiVersionNegotiator::default()
        .negotiate(&request, &orders_model())
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::AmbiguousApiVersion);
    assert_eq!(err, VersioningError::ambiguous(vec!["1.0".into(), "2.0".into()]));
}

#[test]
fn test_cross_location_agreement() {
    let negotiator = ApiVersionNegotiator::new(header_and_query());
    let request = Request::get("/orders?api-version=1.0")
        .header("api-version", "1.0")
        .body(())
        .unwrap();

    let negotiated = negotiator.negotiate(&request, &orders_model()).unwrap();
    assert_eq!(negotiated.version(), &v("1.0"));
    assert_eq!(negotiated.source(), VersionSource::Requested);
}

#[test]
fn test_cross_location_spelling_differences_collapse() {
    let negotiator = ApiVersionNegotiator::new(header_and_query());
    let request = Request::get("/orders?api-version=1.0-beta")
        .header("api-version", "1.0-BETA")
        .body(())
        .unwrap();
    let model = ApiVersionModel::from_default(v("1.0-Beta"));

    assert!(negotiator.negotiate(&request, &model).is_ok());
}

#[test]
fn test_media_type_versioning() {
    let negotiator = ApiVersionNegotiator::new(
        ApiVersioningOptions::new().reader(MediaTypeApiVersionReader::default()),
    );
    let request = Request::get("/orders")
        .header("accept", "application/xml")
        .header("accept", "application/json;q=0.2;v=1.0")
        .body(())
        .unwrap();

    let negotiated = negotiator.negotiate(&request, &orders_model()).unwrap();
    assert_eq!(negotiated.version(), &v("1.0"));
}

#[test]
fn test_url_segment_versioning() {
    let negotiator = ApiVersionNegotiator::new(
        ApiVersioningOptions::new().reader(UrlSegmentApiVersionReader::default()),
    );
    let mut request = Request::get("/v2.0/orders").body(()).unwrap();
    request
        .extensions_mut()
        .insert(RouteValues::from_iter([("version", "2.0")]));

    let negotiated = negotiator.negotiate(&request, &orders_model()).unwrap();
    assert_eq!(negotiated.version(), &v("2.0"));
}

#[test]
fn test_client_writer_to_server_reader() {
    let writer = CompositeApiVersionWriter::new()
        .with(QueryStringApiVersionWriter::default())
        .with(HeaderApiVersionWriter::new("api-version"));
    let mut request = Request::get("http://localhost/orders").body(()).unwrap();
    writer.write(&mut request, &v("2.0"));

    assert_eq!(request.uri().query(), Some("api-version=2.0"));
    assert_eq!(request.headers()["api-version"], "2.0");

    let negotiated = ApiVersionNegotiator::new(header_and_query())
        .negotiate(&request, &orders_model())
        .unwrap();
    assert_eq!(negotiated.version(), &v("2.0"));
}

#[test]
fn test_writer_never_overwrites() {
    let mut request = Request::get("http://localhost/orders?api-version=9.9").body(()).unwrap();
    QueryStringApiVersionWriter::default().write(&mut request, &v("1.0"));

    assert_eq!(request.uri().query(), Some("api-version=9.9"));
}

#[test]
fn test_reporting_on_response() {
    let negotiator = ApiVersionNegotiator::new(ApiVersioningOptions::new().report_api_versions(true));
    let mut response = Response::builder().status(StatusCode::OK).body(()).unwrap();
    negotiator.report(&mut response, &orders_model());

    assert_eq!(response.headers()["api-supported-versions"], "1.0, 2.0");
    assert_eq!(response.headers()["api-deprecated-versions"], "0.9");
}

#[test]
fn test_error_response_body() {
    let request = Request::get("/orders?api-version=1.0&api-version=2.0").body(()).unwrap();
    let err = ApiVersionNegotiator::default()
        .negotiate(&request, &orders_model())
        .unwrap_err();

    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    let body = serde_json::to_value(err.to_response()).unwrap();
    assert_eq!(body["error"]["code"], "AmbiguousApiVersion");
    assert_eq!(body["error"]["candidates"], serde_json::json!(["1.0", "2.0"]));
}

#[test]
fn test_routes_sharing_a_path_aggregate_for_reporting() {
    let options = ApiVersioningOptions::new().report_api_versions(true);
    let models = ApiVersionConventions::new()
        .endpoint("orders.v1", |e: ApiVersionConventionBuilder| e.has_deprecated_api_version(v("1.0")))
        .endpoint("orders.v2", |e: ApiVersionConventionBuilder| e.has_api_version(v("2.0")))
        .build(&options)
        .unwrap();
    let route = ApiVersionModel::aggregate(models.values());

    let mut headers = HeaderMap::new();
    ApiVersionNegotiator::new(options).report(&mut headers, &route);

    assert_eq!(headers["api-supported-versions"], "2.0");
    assert_eq!(headers["api-deprecated-versions"], "1.0");
}

#[test]
fn test_group_versions_with_settings() {
    let settings = VersioningSettings {
        default_version: "2013-08-06".to_string(),
        assume_default_version_when_unspecified: true,
        query_parameters: Vec::new(),
        header_names: vec!["x-ms-version".to_string()],
        ..Default::default()
    };
    let negotiator = ApiVersionNegotiator::new(ApiVersioningOptions::try_from(settings).unwrap());
    let model = ApiVersionModel::from_default(v("2013-08-06"));

    let assumed = negotiator
        .negotiate(&Request::get("/").body(()).unwrap(), &model)
        .unwrap();
    assert_eq!(assumed.version(), &v("2013-08-06"));
    assert_eq!(assumed.source(), VersionSource::Assumed);

    let ignored_query = Request::get("/?api-version=2.0")
        .header("x-ms-version", "2013-08-06")
        .body(())
        .unwrap();
    assert_eq!(negotiator.negotiate(&ignored_query, &model).unwrap().source(), VersionSource::Requested);
}
