use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::core::{ForecastDataPoint, ForecastResult};
use crate::error::{LensError, LensResult};

/// Returns the inclusive span between the first `{` and the last `}`.
///
/// Models wrap JSON in prose or markdown fences; this is a tolerant
/// extraction, not a brace-balancing parser.
#[must_use]
pub fn extract_json_span(raw: &str) -> Option<&str> {
    let text = raw.trim();
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parses a raw forecast reply into a validated [`ForecastResult`].
///
/// Failure order: no `{...}` span is [`LensError::NoJsonObject`], an
/// undecodable span is [`LensError::InvalidJson`], and missing or mistyped
/// fields are [`LensError::InvalidForecast`]. An empty `forecast` array is
/// accepted.
pub fn parse_forecast(raw: &str) -> LensResult<ForecastResult> {
    let Some(span) = extract_json_span(raw) else {
        warn!(raw_len = raw.len(), "forecast reply has no json object boundary");
        return Err(LensError::NoJsonObject);
    };

    let value: Value = serde_json::from_str(span).map_err(|err| {
        warn!(error = %err, span_len = span.len(), "forecast reply is not valid json");
        LensError::InvalidJson(err)
    })?;

    let result = validate_forecast_value(value).inspect_err(|err| {
        if let LensError::InvalidForecast { reason } = err {
            warn!(reason = reason.as_str(), "forecast reply failed validation");
        }
    })?;

    debug!(
        points = result.forecast.len(),
        has_formula = !result.formula.is_empty(),
        "parsed forecast reply"
    );
    Ok(result)
}

fn validate_forecast_value(value: Value) -> LensResult<ForecastResult> {
    let Value::Object(mut object) = value else {
        return Err(LensError::invalid_forecast("top-level value is not an object"));
    };

    let analysis = required_text(&mut object, "analysis")?;
    let methodology = required_text(&mut object, "methodology")?;

    let forecast = match object.remove("forecast") {
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| data_point_from_value(index, item))
            .collect::<LensResult<Vec<_>>>()?,
        Some(_) => return Err(LensError::invalid_forecast("`forecast` is not an array")),
        None => return Err(LensError::invalid_forecast("`forecast` is missing")),
    };

    Ok(ForecastResult {
        forecast,
        analysis,
        methodology,
        formula: passthrough_text(object.remove("formula")),
        error_measure: passthrough_text(object.remove("errorMeasure")),
    })
}

fn required_text(object: &mut Map<String, Value>, field: &str) -> LensResult<String> {
    match object.remove(field) {
        Some(Value::String(text)) if !text.is_empty() => Ok(text),
        Some(Value::String(_)) => Err(LensError::invalid_forecast(format!(
            "`{field}` is empty"
        ))),
        Some(_) => Err(LensError::invalid_forecast(format!(
            "`{field}` is not a string"
        ))),
        None => Err(LensError::invalid_forecast(format!("`{field}` is missing"))),
    }
}

// Best-effort fields: absent or null surface as an empty string.
fn passthrough_text(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    }
}

fn data_point_from_value(index: usize, value: Value) -> LensResult<ForecastDataPoint> {
    let Value::Object(mut object) = value else {
        return Err(LensError::invalid_forecast(format!(
            "forecast[{index}] is not an object"
        )));
    };

    let time = match object.remove("time") {
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number.to_string(),
        _ => {
            return Err(LensError::invalid_forecast(format!(
                "forecast[{index}].time must be a string"
            )));
        }
    };

    let value = match object.remove("value") {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|value| value.is_finite())
    .ok_or_else(|| {
        LensError::invalid_forecast(format!("forecast[{index}].value must be a finite number"))
    })?;

    Ok(ForecastDataPoint { time, value })
}
