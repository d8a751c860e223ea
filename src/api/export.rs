use std::fmt::Write as _;

use crate::core::label_format::DEFAULT_FRACTION_DIGITS;
use crate::core::{AxisLabelLocale, ForecastResult, Reference, format_number};
use crate::error::{LensError, LensResult};

use super::ForecastSession;

/// Plain-text report of a session, as sent by email.
#[must_use]
pub fn format_email_body(
    topic: &str,
    summary: &str,
    forecast: Option<&ForecastResult>,
    references: &[Reference],
    locale: AxisLabelLocale,
) -> String {
    let mut body = String::new();
    // Writing into a String cannot fail.
    let _ = write!(body, "Analysis for Topic: {topic}\n\n");
    let _ = write!(body, "--- SUMMARY ---\n{summary}\n\n");

    if let Some(forecast) = forecast {
        body.push_str("--- FORECAST ---\n");
        let _ = writeln!(body, "Analysis: {}", forecast.analysis);
        let _ = writeln!(body, "Methodology: {}", forecast.methodology);
        let _ = writeln!(body, "Formula/Model: {}", forecast.formula);
        let _ = write!(body, "Estimated Error: {}\n\n", forecast.error_measure);
        body.push_str("Data Points:\n");
        for point in &forecast.forecast {
            let _ = writeln!(
                body,
                "  - {}: {}",
                point.time,
                format_number(point.value, DEFAULT_FRACTION_DIGITS, locale)
            );
        }
        body.push('\n');
    }

    if !references.is_empty() {
        body.push_str("--- REFERENCES ---\n");
        for reference in references {
            let _ = write!(body, "- {}\n  {}\n", reference.title, reference.uri);
        }
    }

    body
}

/// Email ready to hand to the platform mail composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDraft {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl EmailDraft {
    /// Drafts the report of `session` for `recipient`.
    pub fn from_session(
        recipient: &str,
        session: &ForecastSession,
        locale: AxisLabelLocale,
    ) -> LensResult<Self> {
        let recipient = recipient.trim();
        if !looks_like_address(recipient) {
            return Err(LensError::InvalidInput(format!(
                "`{recipient}` is not an email address"
            )));
        }
        Ok(Self {
            recipient: recipient.to_owned(),
            subject: format!("AI Analysis for: {}", session.topic()),
            body: format_email_body(
                session.topic(),
                session.summary(),
                session.forecast(),
                session.references(),
                locale,
            ),
        })
    }

    /// `mailto:` link with percent-encoded subject and body.
    #[must_use]
    pub fn mailto_url(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            urlencoding::encode(&self.subject),
            urlencoding::encode(&self.body)
        )
    }
}

fn looks_like_address(candidate: &str) -> bool {
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !candidate.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::{EmailDraft, looks_like_address};

    #[test]
    fn mailto_url_percent_encodes_subject_and_body() {
        let draft = EmailDraft {
            recipient: "team@example.com".to_owned(),
            subject: "a b&c=d".to_owned(),
            body: "line\nbreak it's (ok)!*~ €".to_owned(),
        };
        assert_eq!(
            draft.mailto_url(),
            "mailto:team@example.com?subject=a%20b%26c%3Dd\
             &body=line%0Abreak%20it%27s%20%28ok%29%21%2A~%20%E2%82%AC"
        );
    }

    #[test]
    fn address_check_needs_local_part_and_domain() {
        assert!(looks_like_address("name@example.com"));
        assert!(!looks_like_address("name@"));
        assert!(!looks_like_address("@example.com"));
        assert!(!looks_like_address("no at sign"));
        assert!(!looks_like_address("a b@example.com"));
    }
}
