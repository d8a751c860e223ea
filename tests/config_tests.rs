use topic_lens::api::{DEFAULT_MODEL, LensConfig};
use topic_lens::core::{AxisLabelLocale, ChartViewport, ForecastRequest, Granularity};
use topic_lens::LensError;

#[test]
fn empty_object_yields_defaults() {
    let config = LensConfig::from_json_str("{}").expect("config");
    assert_eq!(config, LensConfig::default());
    assert_eq!(config.model, DEFAULT_MODEL);
    assert_eq!(config.api_key_env, "API_KEY");
    assert_eq!(config.chart, ChartViewport::new(600.0, 320.0, 50.0));
    assert_eq!(config.default_forecast, ForecastRequest::default());
    assert!(config.search_grounding);
}

#[test]
fn partial_json_overrides_selected_fields() {
    let config = LensConfig::from_json_str(
        r#"{
            "model": "gemini-2.5-pro",
            "search_grounding": false,
            "locale": "EsEs",
            "chart": {"width": 800, "height": 400, "padding": 40},
            "default_forecast": {"duration_years": 10, "granularity": "months"}
        }"#,
    )
    .expect("config");
    assert_eq!(config.model, "gemini-2.5-pro");
    assert!(!config.search_grounding);
    assert_eq!(config.locale, AxisLabelLocale::EsEs);
    assert_eq!(config.chart, ChartViewport::new(800.0, 400.0, 40.0));
    assert_eq!(config.default_forecast.granularity, Granularity::Months);
}

#[test]
fn json_round_trip_preserves_config() {
    let config = LensConfig::default()
        .with_model("gemini-2.5-pro")
        .with_locale(AxisLabelLocale::EsEs)
        .with_chart(ChartViewport::new(900.0, 450.0, 60.0));
    let json = config.to_json_pretty().expect("serialize");
    assert_eq!(LensConfig::from_json_str(&json).expect("reload"), config);
}

#[test]
fn invalid_values_are_config_errors() {
    for raw in [
        r#"{"model": " "}"#,
        r#"{"api_base_url": "ftp://example.com"}"#,
        r#"{"request_timeout_secs": 0}"#,
        r#"{"chart": {"width": 80, "height": 320, "padding": 50}}"#,
        r#"{"default_forecast": {"duration_years": 7}}"#,
        r#"{"model": 3}"#,
    ] {
        let err = LensConfig::from_json_str(raw).expect_err(raw);
        assert!(matches!(err, LensError::Config(_)), "{raw}");
    }
}

#[test]
fn missing_config_file_is_reported() {
    let err = LensConfig::from_path("/nonexistent/topic-lens.json").expect_err("missing file");
    assert!(err.to_string().contains("/nonexistent/topic-lens.json"));
}

#[test]
fn unset_api_key_variable_is_a_config_error() {
    let mut config = LensConfig::default();
    config.api_key_env = "TOPIC_LENS_TEST_KEY_THAT_IS_NEVER_SET".to_owned();
    assert!(matches!(
        config.api_key_from_env(),
        Err(LensError::Config(_))
    ));
}
