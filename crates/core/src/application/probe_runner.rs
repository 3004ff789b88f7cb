// Probe Runner - sequential, non-retrying probe driver

use crate::domain::{
    Disposition, ProbeError, ProbeOutcome, ProbeResult, ProbeRoute, RangeProbe, RangeSample,
};
use crate::port::{ProbeSink, ProbeTransport, TransportError};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Issue one probe and classify the response
///
/// Pure with respect to persistence: nothing is written here.
///
/// # Errors
/// Transport failures only; HTTP error statuses are a `ProbeResult`.
pub async fn probe(
    transport: &dyn ProbeTransport,
    route: &ProbeRoute,
) -> Result<ProbeResult, TransportError> {
    let response = transport.get(route.relative_path(), None).await?;

    debug!(
        path = %route.relative_path(),
        status = response.status,
        bytes = response.body.len(),
        "Probe response received"
    );

    Ok(ProbeResult::classify(response.status, &response.body))
}

/// Outcomes of one full pass, in route order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub outcomes: Vec<ProbeOutcome>,
}

impl RunReport {
    pub fn saved_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_saved()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ProbeError> {
        self.outcomes.iter().filter_map(ProbeOutcome::error)
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

/// Probe runner
///
/// Requests run one at a time; each is fully handled before the next starts.
/// A per-probe failure is logged and recorded, a transport failure aborts the run.
pub struct ProbeRunner {
    transport: Arc<dyn ProbeTransport>,
    sink: Arc<dyn ProbeSink>,
}

impl ProbeRunner {
    pub fn new(transport: Arc<dyn ProbeTransport>, sink: Arc<dyn ProbeSink>) -> Self {
        Self { transport, sink }
    }

    /// Probe every route in order and persist the JSON ones
    ///
    /// # Errors
    /// The first `TransportError`; probes after it are not attempted.
    pub async fn run(&self, routes: &[ProbeRoute]) -> Result<RunReport, TransportError> {
        info!(routes = routes.len(), "Starting probe run");

        let mut report = RunReport::default();
        for route in routes {
            let outcome = self.run_route(route).await?;
            report.outcomes.push(outcome);
        }

        info!(
            saved = report.saved_count(),
            failed = report.failure_count(),
            "Probe run finished"
        );

        Ok(report)
    }

    /// Probe a single route and settle its result
    pub async fn run_route(&self, route: &ProbeRoute) -> Result<ProbeOutcome, TransportError> {
        let result = probe(self.transport.as_ref(), route).await?;
        Ok(self.settle(route.label(), result))
    }

    /// Persist or report one result
    fn settle(&self, label: String, result: ProbeResult) -> ProbeOutcome {
        let disposition = match result {
            ProbeResult::Json(payload) => match self.sink.persist(&label, &payload) {
                Ok(path) => {
                    info!(label = %label, path = %path.display(), "Probe saved");
                    Disposition::Saved(path)
                }
                Err(e) => Disposition::Failed(ProbeError::Persist {
                    label: label.clone(),
                    message: e.to_string(),
                }),
            },
            ProbeResult::MalformedJson { error } => {
                Disposition::Failed(ProbeError::MalformedResponse {
                    label: label.clone(),
                    message: error,
                })
            }
            ProbeResult::UnsuccessfulStatus { status } => {
                Disposition::Failed(ProbeError::UnsuccessfulStatus {
                    label: label.clone(),
                    status,
                })
            }
        };

        if let Disposition::Failed(e) = &disposition {
            warn!(label = %label, error = %e, "Probe failed");
        }

        ProbeOutcome { label, disposition }
    }

    /// Fetch a byte range of a static file for inspection
    ///
    /// Nothing is persisted; the sample goes back to the caller.
    pub async fn range_probe(&self, probe: &RangeProbe) -> Result<RangeSample, TransportError> {
        let response = self
            .transport
            .get(probe.relative_path(), Some(probe.range))
            .await?;

        let sample = RangeSample {
            status: response.status,
            content_range: response.content_range,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        };

        info!(
            path = %probe.relative_path(),
            range = %probe.range.header_value(),
            status = sample.status,
            content_range = ?sample.content_range,
            body = %sample.body,
            "Range probe"
        );

        Ok(sample)
    }
}
