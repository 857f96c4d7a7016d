//! Resolve-then-probe polling with cooperative cancellation.

use std::future::Future;
use std::sync::Arc;

use tokio::time::sleep;
use tracing::{debug, trace};
use url::Url;

use crate::domain::{Endpoint, ReadinessRequest, ReadinessState, RetryPolicy};
use crate::error::{ReadinessError, Result};
use crate::port::{EndpointResolver, ReadinessProbe};
use crate::runtime::StopListener;

/// Call `attempt` until it succeeds, pausing `policy.interval` between
/// failures.
///
/// Failures are logged and swallowed. The stop listener is checked before
/// every attempt and raced against both the attempt and the pause.
pub(crate) async fn retry_until<T, F, Fut>(
    phase: &'static str,
    policy: &RetryPolicy,
    stop: &mut StopListener,
    mut attempt: F,
) -> std::result::Result<T, ReadinessError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempts: u32 = 0;

    loop {
        if stop.is_stopped() {
            return Err(ReadinessError::Cancelled);
        }

        attempts += 1;
        let result = tokio::select! {
            result = attempt() => result,
            () = stop.stopped() => return Err(ReadinessError::Cancelled),
        };

        match result {
            Ok(value) => {
                debug!(phase, attempts, "attempt succeeded");
                return Ok(value);
            }
            Err(e) => trace!(phase, attempts, error = %e, "not yet available"),
        }

        if policy.exhausted(attempts) {
            return Err(ReadinessError::AttemptsExhausted { phase, attempts });
        }

        tokio::select! {
            () = sleep(policy.interval) => {}
            () = stop.stopped() => return Err(ReadinessError::Cancelled),
        }
    }
}

/// Resolve the service's published address, then probe it until it answers.
///
/// Resolution strictly precedes probing. The returned URL always points at a
/// connect address, never at a wildcard bind address.
pub(crate) async fn wait_until_ready(
    resolver: Arc<dyn EndpointResolver>,
    probe: Arc<dyn ReadinessProbe>,
    request: ReadinessRequest,
    mut stop: StopListener,
) -> std::result::Result<Url, ReadinessError> {
    let service = request.service();
    let port = request.port();
    let resolver = resolver.as_ref();
    let probe = probe.as_ref();

    debug!(state = %ReadinessState::ResolvingEndpoint, service, port);
    let raw = retry_until("resolve", request.retry(), &mut stop, || {
        resolver.resolve(service, port)
    })
    .await?;

    let endpoint = Endpoint::parse(&raw)?;
    let connect = endpoint.connect_address();
    let url = connect.url()?;
    if endpoint.is_wildcard() {
        debug!(bind = %endpoint, connect = %connect, "rewrote wildcard bind address");
    }

    debug!(state = %ReadinessState::ProbingReadiness, %url);
    retry_until("probe", request.retry(), &mut stop, || probe.probe(&url)).await?;

    Ok(url)
}
