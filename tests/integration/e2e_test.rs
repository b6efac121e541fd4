//! End-to-end scenarios for the preparation pipeline

use changepoint_viewer::analysis::{format_parameter, AnalysisResult, CredibleInterval, ParameterSpec};
use changepoint_viewer::api::{RawAnalysisResults, RawPriceRecord};
use changepoint_viewer::config::Config;
use changepoint_viewer::series::{correlate_events, NormalizePolicy, Normalizer, PricePoint};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn normalized_pair() -> Vec<PricePoint> {
    let raw: Vec<RawPriceRecord> = serde_json::from_str(
        r#"[{"date": "2020-01-02", "price": 66.0}, {"date": "2020-01-01", "price": 65.0}]"#,
    )
    .unwrap();
    Normalizer::new(NormalizePolicy::Skip)
        .normalize(&raw)
        .unwrap()
        .points
}

#[test]
fn test_records_normalize_in_date_order() {
    let points = normalized_pair();
    assert_eq!(
        points,
        vec![
            PricePoint::new(ymd(2020, 1, 1), dec!(65.0)),
            PricePoint::new(ymd(2020, 1, 2), dec!(66.0)),
        ]
    );
}

#[test]
fn test_only_events_on_observed_dates_are_plotted() {
    let raw: RawAnalysisResults = serde_json::from_str(
        r#"{"events": [
            {"Date": "2020-01-01", "Event": "On series", "Description": ""},
            {"Date": "2020-06-15", "Event": "Off series", "Description": ""}
        ]}"#,
    )
    .unwrap();
    let analysis = AnalysisResult::from_raw(&raw, &[]).unwrap();

    let plotted = correlate_events(&normalized_pair(), &analysis.events);
    assert_eq!(plotted.len(), 1);
    assert_eq!(plotted[0].date, ymd(2020, 1, 1));
    assert_eq!(plotted[0].name, "On series");
}

#[test]
fn test_parameter_with_missing_after_regime() {
    let raw: RawAnalysisResults = serde_json::from_str(
        r#"{
            "summary": {"mu_1": {"mean": 0.005}},
            "parameter_hdis": {"mu_1": [-0.01, 0.02]}
        }"#,
    )
    .unwrap();
    let specs = ParameterSpec::defaults();
    let analysis = AnalysisResult::from_raw(&raw, &specs).unwrap();

    let mu = format_parameter(&specs[0], analysis.parameter_summaries.get("mu"));
    assert_eq!(mu.before_mean(), Some(dec!(0.005)));
    assert_eq!(
        mu.before_interval(),
        Some(CredibleInterval::new(dec!(-0.01), dec!(0.02)))
    );
    assert!(mu.after.is_none());
    assert!(!mu.has_comparison);
}

#[test]
fn test_config_example_drives_pipeline() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    let normalizer = Normalizer::new(config.pipeline.normalize_policy)
        .with_log_return_derivation(config.pipeline.derive_log_returns);

    let raw: Vec<RawPriceRecord> = serde_json::from_str(
        r#"[{"Date": "2020-01-02", "Price": 66.0}, {"Date": "junk", "Price": 1.0}, {"Date": "2020-01-01", "Price": 65.0}]"#,
    )
    .unwrap();
    let series = normalizer.normalize(&raw).unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series.skipped_count(), 1);
    assert!(series.points[1].log_return.is_some());
}
