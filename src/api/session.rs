use tracing::{debug, info, warn};

use crate::core::{ForecastRequest, ForecastResult, Reference, parse_forecast, references_from_grounding};
use crate::error::{LensError, LensResult, RequestKind};

use super::prompts::{forecast_prompt, summary_prompt};
use super::{GenerativeModel, ModelRequest, ModelResponse};

/// Proof that a request was started; redeemed exactly once by the matching
/// `finish_*` call.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a request ticket must be passed to the matching finish call"]
pub struct RequestTicket {
    kind: RequestKind,
    generation: u64,
    request: ModelRequest,
}

impl RequestTicket {
    #[must_use]
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Request to send to the model for this ticket.
    #[must_use]
    pub fn request(&self) -> &ModelRequest {
        &self.request
    }
}

/// State of one user session: the topic, what was fetched for it, and the
/// single in-flight request slot.
///
/// Starting a summary clears everything derived from the previous topic;
/// a forecast is replaced wholesale by the next forecast request.
#[derive(Debug, Default)]
pub struct ForecastSession {
    topic: String,
    summary: String,
    references: Vec<Reference>,
    forecast: Option<ForecastResult>,
    error: Option<String>,
    forecast_enabled: bool,
    search_grounding: bool,
    in_flight: Option<(RequestKind, u64)>,
    generation: u64,
}

impl ForecastSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            search_grounding: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_search_grounding(mut self, search_grounding: bool) -> Self {
        self.search_grounding = search_grounding;
        self
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    #[must_use]
    pub fn forecast(&self) -> Option<&ForecastResult> {
        self.forecast.as_ref()
    }

    /// User-facing message of the last failed request.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// `true` once a summary has loaded for the current topic.
    #[must_use]
    pub fn forecast_enabled(&self) -> bool {
        self.forecast_enabled
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn in_flight(&self) -> Option<RequestKind> {
        self.in_flight.map(|(kind, _)| kind)
    }

    /// Edits the topic. A different topic discards the current forecast.
    pub fn set_topic(&mut self, topic: impl Into<String>) -> LensResult<()> {
        self.ensure_idle()?;
        let topic = topic.into();
        if topic != self.topic {
            if self.forecast.take().is_some() {
                debug!("topic changed; discarded forecast");
            }
            self.topic = topic;
        }
        Ok(())
    }

    /// Starts a summary request for `topic`, clearing all derived state.
    pub fn begin_summary(&mut self, topic: impl Into<String>) -> LensResult<RequestTicket> {
        self.ensure_idle()?;
        let topic = topic.into();
        if topic.trim().is_empty() {
            return Err(LensError::EmptyTopic);
        }

        self.topic = topic;
        self.error = None;
        self.summary.clear();
        self.references.clear();
        self.forecast = None;
        self.forecast_enabled = false;

        let request = ModelRequest::new(RequestKind::Summary, summary_prompt(&self.topic))
            .with_search_grounding(self.search_grounding);
        Ok(self.open_ticket(request))
    }

    /// Completes a summary request with the transport outcome.
    pub fn finish_summary(
        &mut self,
        ticket: RequestTicket,
        outcome: LensResult<ModelResponse>,
    ) -> LensResult<()> {
        self.redeem(&ticket, RequestKind::Summary)?;
        match outcome {
            Ok(response) => {
                self.references = references_from_grounding(&response.grounding);
                self.summary = response.text;
                self.forecast_enabled = true;
                info!(
                    summary_len = self.summary.len(),
                    references = self.references.len(),
                    "summary loaded"
                );
                Ok(())
            }
            Err(err) => {
                warn!(error = ?err, "summary request failed");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Starts a forecast request for the current topic.
    pub fn begin_forecast(&mut self, request: ForecastRequest) -> LensResult<RequestTicket> {
        self.ensure_idle()?;
        let request = request.validate()?;
        if self.topic.trim().is_empty() {
            return Err(LensError::EmptyTopic);
        }
        if !self.forecast_enabled {
            return Err(LensError::ForecastUnavailable);
        }

        self.error = None;
        self.forecast = None;

        let request = ModelRequest::new(RequestKind::Forecast, forecast_prompt(&self.topic, request))
            .with_search_grounding(self.search_grounding);
        Ok(self.open_ticket(request))
    }

    /// Completes a forecast request; the reply text goes through
    /// [`parse_forecast`]. Nothing partial is kept on failure.
    pub fn finish_forecast(
        &mut self,
        ticket: RequestTicket,
        outcome: LensResult<ModelResponse>,
    ) -> LensResult<()> {
        self.redeem(&ticket, RequestKind::Forecast)?;
        match outcome.and_then(|response| parse_forecast(&response.text)) {
            Ok(forecast) => {
                info!(points = forecast.forecast.len(), "forecast loaded");
                self.forecast = Some(forecast);
                Ok(())
            }
            Err(err) => {
                warn!(error = ?err, "forecast request failed");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Runs a summary request end to end against `model`.
    pub fn run_summary<M>(&mut self, model: &M, topic: impl Into<String>) -> LensResult<()>
    where
        M: GenerativeModel + ?Sized,
    {
        let ticket = self.begin_summary(topic)?;
        let outcome = model.generate(ticket.request());
        self.finish_summary(ticket, outcome)
    }

    /// Runs a forecast request end to end against `model`.
    pub fn run_forecast<M>(&mut self, model: &M, request: ForecastRequest) -> LensResult<()>
    where
        M: GenerativeModel + ?Sized,
    {
        let ticket = self.begin_forecast(request)?;
        let outcome = model.generate(ticket.request());
        self.finish_forecast(ticket, outcome)
    }

    /// Releases the in-flight slot for `ticket` without touching any result.
    pub fn abandon(&mut self, ticket: RequestTicket) -> LensResult<()> {
        self.redeem(&ticket, ticket.kind)?;
        debug!(kind = %ticket.kind, generation = ticket.generation, "request abandoned");
        Ok(())
    }

    /// Clears the in-flight slot when its ticket was lost, e.g. after a
    /// transport panicked inside `run_*`. The lost ticket becomes stale.
    pub fn cancel_in_flight(&mut self) -> Option<RequestKind> {
        let (kind, generation) = self.in_flight.take()?;
        warn!(%kind, generation, "in-flight request cancelled without its ticket");
        Some(kind)
    }

    fn ensure_idle(&self) -> LensResult<()> {
        match self.in_flight {
            Some((kind, _)) => Err(LensError::RequestInFlight { kind }),
            None => Ok(()),
        }
    }

    fn open_ticket(&mut self, request: ModelRequest) -> RequestTicket {
        self.generation += 1;
        let kind = request.kind;
        self.in_flight = Some((kind, self.generation));
        debug!(%kind, generation = self.generation, "request started");
        RequestTicket {
            kind,
            generation: self.generation,
            request,
        }
    }

    fn redeem(&mut self, ticket: &RequestTicket, expected: RequestKind) -> LensResult<()> {
        if ticket.kind != expected || self.in_flight != Some((ticket.kind, ticket.generation)) {
            return Err(LensError::StaleTicket);
        }
        self.in_flight = None;
        Ok(())
    }
}
