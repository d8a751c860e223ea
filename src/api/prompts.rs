use crate::core::ForecastRequest;

/// Prompt asking for a concise, web-grounded summary of `topic`.
#[must_use]
pub fn summary_prompt(topic: &str) -> String {
    format!("Generate a concise summary about the current state and future of \"{topic}\".")
}

/// Prompt asking for a JSON-only forecast reply.
///
/// The reply is still parsed tolerantly; models ignore the "raw JSON" rule
/// often enough.
#[must_use]
pub fn forecast_prompt(topic: &str, request: ForecastRequest) -> String {
    let duration = request.duration_years;
    let granularity = request.granularity;
    format!(
        r#"Perform a web search to gather the latest qualitative and quantitative data about "{topic}".
Based on the search results, generate a forecast for the next {duration} years, broken down by {granularity}.

Your response MUST be a single, raw JSON object, without any markdown formatting (like ```json).

The JSON object must follow this exact structure:
{{
  "analysis": "A brief analysis of the forecast trends based on the web search results.",
  "methodology": "Describe the forecasting approach used (e.g., trend analysis, regression, sentiment analysis).",
  "formula": "Specify the model or formula used (e.g., 'Linear Regression: y = mx + c', 'Exponential Smoothing'). Be specific.",
  "errorMeasure": "Provide an estimated forecast error measure, such as MAPE (Mean Absolute Percentage Error) or a confidence interval.",
  "forecast": [
    {{
      "time": "A concise label for the time period (e.g., 'W1 Jan', 'Jan 2025', '2025')",
      "value": "The actual, non-normalized predicted value (e.g., a stock price, index value)."
    }}
  ]
}}

Provide only the raw JSON object and nothing else."#
    )
}

#[cfg(test)]
mod tests {
    use super::{forecast_prompt, summary_prompt};
    use crate::core::{ForecastRequest, Granularity};

    #[test]
    fn summary_prompt_quotes_topic() {
        assert!(summary_prompt("solid-state batteries").contains("\"solid-state batteries\""));
    }

    #[test]
    fn forecast_prompt_names_horizon_and_granularity() {
        let request = ForecastRequest::new(10, Granularity::Months).expect("request");
        let prompt = forecast_prompt("copper prices", request);
        assert!(prompt.contains("next 10 years, broken down by months"));
        assert!(prompt.contains("\"errorMeasure\""));
        assert!(prompt.contains("{\n  \"analysis\""));
    }
}
