use proptest::prelude::*;
use topic_lens::core::{ForecastDataPoint, ForecastResult, parse_forecast};

fn forecast_strategy() -> impl Strategy<Value = ForecastResult> {
    (
        "[a-zA-Z0-9 .,%]{1,40}",
        "[a-zA-Z0-9 .,%]{1,40}",
        "[a-zA-Z0-9 =+*]{0,20}",
        "[a-zA-Z0-9 %~]{0,20}",
        // Quarter steps keep every value exactly representable in short decimal text.
        proptest::collection::vec(
            ("[A-Z][a-z]{2} 20[2-4][0-9]", -4_000_000_000i64..4_000_000_000),
            0..24,
        ),
    )
        .prop_map(|(analysis, methodology, formula, error_measure, points)| ForecastResult {
            forecast: points
                .into_iter()
                .map(|(time, quarters)| ForecastDataPoint::new(time, quarters as f64 / 4.0))
                .collect(),
            analysis,
            methodology,
            formula,
            error_measure,
        })
}

proptest! {
    #[test]
    fn wrapped_json_round_trips(
        expected in forecast_strategy(),
        prefix in "[a-zA-Z :!\n`]{0,40}",
        suffix in "[a-zA-Z .!\n`]{0,40}",
    ) {
        let json = serde_json::to_string_pretty(&expected).expect("serialize");
        let raw = format!("{prefix}```json\n{json}\n```{suffix}");

        let parsed = parse_forecast(&raw).expect("parse");
        prop_assert_eq!(parsed, expected);
    }
}
