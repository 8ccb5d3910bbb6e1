use std::time::Instant;

use futures::future::join_all;
use reqwest::header;
use tracing::{debug, info};

use super::types::DiffLocation;
use super::{PrError, USER_AGENT};

/// Fetch every diff body concurrently, pairing each with its location.
///
/// All requests are issued at once and joined; the output order matches the
/// input order regardless of completion order. A transport-level failure on
/// any request fails the whole batch with no partial results. Non-success
/// HTTP statuses are not treated as errors here — whatever body came back is
/// handed to analysis as-is. No retries, no imposed timeout, no cancellation.
pub async fn fetch_all(
    http: &reqwest::Client,
    locations: &[DiffLocation],
) -> Result<Vec<(DiffLocation, String)>, PrError> {
    info!(count = locations.len(), "fetching diff files");
    let started = Instant::now();

    let requests = locations.iter().map(|location| async move {
        let body = http
            .get(location.as_str())
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await?
            .text()
            .await?;
        debug!(location = %location, bytes = body.len(), "fetched diff");
        Ok::<String, PrError>(body)
    });
    let bodies = join_all(requests).await;

    let mut paired = Vec::with_capacity(locations.len());
    for (location, body) in locations.iter().zip(bodies) {
        paired.push((location.clone(), body?));
    }

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "fetched all diff files"
    );
    Ok(paired)
}
