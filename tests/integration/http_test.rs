//! Load cycles against a live HTTP backend

use crate::support::{spawn_backend, Route, ANALYSIS_RESULTS, PRICE_DATA};
use changepoint_viewer::api::{AnalysisApi, ApiError, Endpoint, HttpApiClient};
use changepoint_viewer::config::{ApiConfig, Config};
use changepoint_viewer::load::{LoadError, Loader};
use changepoint_viewer::render::{OutputFormat, Renderer};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn config_for(base_url: String) -> Config {
    let mut config = Config::default();
    config.api = ApiConfig {
        base_url,
        timeout_secs: 5,
    };
    config
}

fn loader(config: &Config) -> Loader<HttpApiClient> {
    Loader::new(HttpApiClient::new(&config.api).unwrap(), config)
}

#[tokio::test]
async fn test_successful_load_cycle() {
    let base_url = spawn_backend(vec![
        Route::ok("/api/data", PRICE_DATA),
        Route::ok("/api/analysis_results", ANALYSIS_RESULTS),
    ])
    .await;
    let config = config_for(base_url);

    let dashboard = loader(&config).load().await.unwrap();

    assert_eq!(dashboard.series.len(), 3);
    assert_eq!(
        dashboard.series.points[0].date,
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
    );
    assert_eq!(dashboard.plotted_events().len(), 1);
    assert_eq!(dashboard.correlation.unplotted.len(), 1);
    assert_eq!(dashboard.change_point.unwrap().point_index, Some(1));

    let mu = &dashboard.parameters[0];
    assert_eq!(mu.before_mean(), Some(dec!(0.005)));
    assert!(!mu.has_comparison);
    let sigma = &dashboard.parameters[1];
    assert!(sigma.has_comparison);
    assert_eq!(sigma.mean_shift, Some(dec!(0.013)));
    assert_eq!(sigma.intervals_overlap, Some(false));

    let table = Renderer::new(config.display.clone()).render_dashboard(&dashboard);
    assert!(table.contains("Observations:     3 (0 skipped)"));
    assert!(table.contains("After Change Point:  No data"));

    let json = Renderer::default()
        .render(&dashboard, OutputFormat::Json)
        .unwrap();
    assert!(json.contains("\"has_comparison\": true"));
}

#[tokio::test]
async fn test_both_endpoints_failing_are_both_reported() {
    let base_url = spawn_backend(vec![
        Route::status("/api/data", 500),
        Route::status("/api/analysis_results", 500),
    ])
    .await;
    let config = config_for(base_url);

    let err = loader(&config).load().await.unwrap_err();

    assert!(matches!(err, LoadError::Fetch(ref failures) if failures.len() == 2));
    assert_eq!(
        err.failing_endpoints(),
        vec![Endpoint::PriceData, Endpoint::AnalysisResults]
    );
    let msg = err.to_string();
    assert!(msg.contains("/api/data"));
    assert!(msg.contains("/api/analysis_results"));
}

#[tokio::test]
async fn test_single_failure_aborts_cycle() {
    let base_url = spawn_backend(vec![
        Route::ok("/api/data", PRICE_DATA),
        Route::status("/api/analysis_results", 503),
    ])
    .await;
    let config = config_for(base_url);

    let err = loader(&config).load().await.unwrap_err();
    assert_eq!(err.failing_endpoints(), vec![Endpoint::AnalysisResults]);
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_status_error_carries_body() {
    let base_url = spawn_backend(vec![Route::status("/api/data", 500)]).await;
    let client = HttpApiClient::new(&config_for(base_url).api).unwrap();

    match client.fetch_price_data().await.unwrap_err() {
        ApiError::Status {
            endpoint,
            status,
            body,
        } => {
            assert_eq!(endpoint, Endpoint::PriceData);
            assert_eq!(status, 500);
            assert!(body.contains("Check backend logs"));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    let base_url = spawn_backend(vec![
        Route::ok("/api/data", "[{\"Date\": \"2020-01-01\", "),
        Route::ok("/api/analysis_results", ANALYSIS_RESULTS),
    ])
    .await;
    let config = config_for(base_url);

    let err = loader(&config).load().await.unwrap_err();
    match err {
        LoadError::Fetch(failures) => {
            assert_eq!(failures.len(), 1);
            assert!(matches!(
                failures[0],
                ApiError::Decode {
                    endpoint: Endpoint::PriceData,
                    ..
                }
            ));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_bad_event_date_fails_cycle() {
    let analysis = ANALYSIS_RESULTS.replace("2020-06-15", "mid-June");
    let base_url = spawn_backend(vec![
        Route::ok("/api/data", PRICE_DATA),
        Route::ok("/api/analysis_results", &analysis),
    ])
    .await;
    let config = config_for(base_url);

    let err = loader(&config).load().await.unwrap_err();
    assert!(matches!(err, LoadError::Analysis(_)));
    assert_eq!(err.failing_endpoints(), vec![Endpoint::AnalysisResults]);
}
