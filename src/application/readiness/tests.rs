use super::*;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::time::Instant;
use url::Url;

use crate::domain::RetryPolicy;
use crate::error::{Error, Result};
use crate::port::ProgressHandle;

// -- Helpers --------------------------------------------------------------

fn not_running() -> Error {
    Error::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "service is not running",
    ))
}

/// Resolver that replays scripted answers, then repeats the fallback.
struct ScriptedResolver {
    answers: Mutex<VecDeque<Option<String>>>,
    fallback: Option<String>,
    calls: AtomicUsize,
    log: Arc<Mutex<Vec<&'static str>>>,
}

impl ScriptedResolver {
    fn always_failing() -> Self {
        Self::new(Vec::new(), None)
    }

    fn answering(address: &str) -> Self {
        Self::new(Vec::new(), Some(address.to_string()))
    }

    fn new(answers: Vec<Option<&str>>, fallback: Option<String>) -> Self {
        Self {
            answers: Mutex::new(
                answers
                    .into_iter()
                    .map(|answer| answer.map(str::to_string))
                    .collect(),
            ),
            fallback,
            calls: AtomicUsize::new(0),
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn with_log(mut self, log: Arc<Mutex<Vec<&'static str>>>) -> Self {
        self.log = log;
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EndpointResolver for ScriptedResolver {
    async fn resolve(&self, _service: &str, _port: u16) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let answer = self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        self.log
            .lock()
            .unwrap()
            .push(if answer.is_some() { "resolved" } else { "resolve_failed" });
        answer.ok_or_else(not_running)
    }
}

/// Probe that fails a fixed number of times (or forever) before answering.
struct CountingProbe {
    failures_before_success: Option<usize>,
    calls: AtomicUsize,
    urls: Mutex<Vec<Url>>,
    log: Arc<Mutex<Vec<&'static str>>>,
}

impl CountingProbe {
    fn succeeding() -> Self {
        Self::failing_for(Some(0))
    }

    fn never_succeeding() -> Self {
        Self::failing_for(None)
    }

    fn failing_for(failures_before_success: Option<usize>) -> Self {
        Self {
            failures_before_success,
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn with_log(mut self, log: Arc<Mutex<Vec<&'static str>>>) -> Self {
        self.log = log;
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReadinessProbe for CountingProbe {
    async fn probe(&self, url: &Url) -> Result<()> {
        let previous = self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.clone());
        self.log.lock().unwrap().push("probed");
        match self.failures_before_success {
            Some(failures) if previous >= failures => Ok(()),
            _ => Err(not_running()),
        }
    }
}

/// Progress reporter that only counts starts and stops.
#[derive(Default)]
struct RecordingProgress {
    starts: Arc<AtomicUsize>,
    stops: Arc<AtomicUsize>,
}

struct RecordingHandle {
    stops: Arc<AtomicUsize>,
}

impl ProgressReporter for RecordingProgress {
    fn start(&self, _message: &str) -> Box<dyn ProgressHandle> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        Box::new(RecordingHandle {
            stops: Arc::clone(&self.stops),
        })
    }
}

#[async_trait]
impl ProgressHandle for RecordingHandle {
    async fn stop(self: Box<Self>) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

struct Fixture {
    resolver: Arc<ScriptedResolver>,
    probe: Arc<CountingProbe>,
    progress: Arc<RecordingProgress>,
}

impl Fixture {
    fn new(resolver: ScriptedResolver, probe: CountingProbe) -> Self {
        Self {
            resolver: Arc::new(resolver),
            probe: Arc::new(probe),
            progress: Arc::new(RecordingProgress::default()),
        }
    }

    fn orchestrator(&self) -> ReadinessOrchestrator {
        ReadinessOrchestrator::new(
            self.resolver.clone(),
            self.probe.clone(),
            self.progress.clone(),
        )
    }

    fn starts(&self) -> usize {
        self.progress.starts.load(Ordering::SeqCst)
    }

    fn stops(&self) -> usize {
        self.progress.stops.load(Ordering::SeqCst)
    }
}

fn request(timeout: Duration) -> ReadinessRequest {
    ReadinessRequest::new("superset", 8088, timeout)
        .with_retry(RetryPolicy::fixed(Duration::from_secs(1)))
}

// -- Indicator threshold --------------------------------------------------

#[test]
fn indicator_threshold_is_strictly_greater_than_five_seconds() {
    let fixture = Fixture::new(ScriptedResolver::always_failing(), CountingProbe::succeeding());
    let orchestrator = fixture.orchestrator();

    assert!(!orchestrator.shows_indicator(Duration::from_secs(1)));
    assert!(!orchestrator.shows_indicator(Duration::from_secs(5)));
    assert!(orchestrator.shows_indicator(Duration::from_millis(5001)));
    assert!(orchestrator.shows_indicator(Duration::from_secs(60)));
}

#[tokio::test(start_paused = true)]
async fn short_timeouts_never_start_the_indicator() {
    for secs in [1, 2, 5] {
        let fixture =
            Fixture::new(ScriptedResolver::always_failing(), CountingProbe::succeeding());
        let outcome = fixture.orchestrator().wait(request(Duration::from_secs(secs))).await;

        assert_eq!(outcome, OrchestrationOutcome::TimedOut);
        assert_eq!(fixture.starts(), 0, "timeout of {secs}s started the indicator");
        assert_eq!(fixture.stops(), 0);
    }
}

// -- Outcomes -------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn unresolvable_service_times_out_after_the_deadline() {
    let fixture = Fixture::new(ScriptedResolver::always_failing(), CountingProbe::succeeding());

    let started = Instant::now();
    let outcome = fixture.orchestrator().wait(request(Duration::from_secs(2))).await;
    let elapsed = started.elapsed();

    assert_eq!(outcome, OrchestrationOutcome::TimedOut);
    assert!(elapsed >= Duration::from_secs(2), "returned early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(3), "returned late: {elapsed:?}");
    assert_eq!(fixture.probe.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn timed_out_polling_stops_instead_of_leaking() {
    let fixture = Fixture::new(ScriptedResolver::always_failing(), CountingProbe::succeeding());

    let outcome = fixture.orchestrator().wait(request(Duration::from_secs(2))).await;
    assert_eq!(outcome, OrchestrationOutcome::TimedOut);

    let calls_at_deadline = fixture.resolver.calls();
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(fixture.resolver.calls(), calls_at_deadline);
}

#[tokio::test(start_paused = true)]
async fn wildcard_address_becomes_loopback_url() {
    let fixture = Fixture::new(
        ScriptedResolver::answering("0.0.0.0:8088"),
        CountingProbe::succeeding(),
    );

    let outcome = fixture.orchestrator().wait(request(Duration::from_secs(10))).await;

    let url = match outcome {
        OrchestrationOutcome::Ready(url) => url,
        other => panic!("expected Ready, got {other:?}"),
    };
    assert_eq!(url.origin().ascii_serialization(), "http://127.0.0.1:8088");
    assert_eq!(fixture.resolver.calls(), 1);
    assert_eq!(fixture.probe.calls(), 1);
    assert_eq!(fixture.starts(), 1);
    assert_eq!(fixture.stops(), 1);
}

#[tokio::test(start_paused = true)]
async fn routable_address_is_probed_unchanged() {
    let fixture = Fixture::new(
        ScriptedResolver::answering("192.168.1.5:9000"),
        CountingProbe::succeeding(),
    );

    let outcome = fixture.orchestrator().wait(request(Duration::from_secs(2))).await;

    let url = match outcome {
        OrchestrationOutcome::Ready(url) => url,
        other => panic!("expected Ready, got {other:?}"),
    };
    assert_eq!(url.host_str(), Some("192.168.1.5"));
    assert_eq!(url.port(), Some(9000));
    assert_eq!(fixture.probe.urls.lock().unwrap()[0], url);
}

#[tokio::test(start_paused = true)]
async fn unanswered_probe_times_out() {
    let fixture = Fixture::new(
        ScriptedResolver::answering("0.0.0.0:8088"),
        CountingProbe::never_succeeding(),
    );

    let outcome = fixture.orchestrator().wait(request(Duration::from_secs(10))).await;

    assert_eq!(outcome, OrchestrationOutcome::TimedOut);
    assert_eq!(fixture.resolver.calls(), 1);
    assert!(fixture.probe.calls() >= 9, "probed {} times", fixture.probe.calls());
    assert_eq!(fixture.starts(), 1);
    assert_eq!(fixture.stops(), 1);
}

#[tokio::test(start_paused = true)]
async fn resolution_precedes_probing() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let resolver = ScriptedResolver::new(vec![None, None], Some("0.0.0.0:8088".into()))
        .with_log(Arc::clone(&log));
    let probe = CountingProbe::failing_for(Some(1)).with_log(Arc::clone(&log));
    let fixture = Fixture::new(resolver, probe);

    let started = Instant::now();
    let outcome = fixture.orchestrator().wait(request(Duration::from_secs(30))).await;

    assert!(outcome.is_ready(), "expected Ready, got {outcome:?}");
    assert_eq!(
        *log.lock().unwrap(),
        vec!["resolve_failed", "resolve_failed", "resolved", "probed", "probed"]
    );
    // Two failed resolves and one failed probe, one second apart.
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(3), "returned early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(4), "returned late: {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn empty_address_fails_immediately() {
    let fixture = Fixture::new(ScriptedResolver::answering("  \n"), CountingProbe::succeeding());

    let started = Instant::now();
    let outcome = fixture.orchestrator().wait(request(Duration::from_secs(60))).await;

    assert_eq!(outcome, OrchestrationOutcome::Failed(ReadinessError::EmptyAddress));
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(fixture.probe.calls(), 0);
    assert_eq!(fixture.starts(), 1);
    assert_eq!(fixture.stops(), 1);
}

#[tokio::test(start_paused = true)]
async fn unparsable_address_fails_without_retrying() {
    let fixture = Fixture::new(
        ScriptedResolver::answering("superset:http"),
        CountingProbe::succeeding(),
    );

    let outcome = fixture.orchestrator().wait(request(Duration::from_secs(2))).await;

    assert!(matches!(
        outcome,
        OrchestrationOutcome::Failed(ReadinessError::InvalidAddress { .. })
    ));
    assert_eq!(fixture.resolver.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn exhausted_retry_budget_reports_timeout() {
    let fixture = Fixture::new(ScriptedResolver::always_failing(), CountingProbe::succeeding());
    let request = ReadinessRequest::new("superset", 8088, Duration::from_secs(60))
        .with_retry(RetryPolicy::fixed(Duration::from_secs(1)).with_max_attempts(3));

    let started = Instant::now();
    let outcome = fixture.orchestrator().wait(request).await;

    assert_eq!(outcome, OrchestrationOutcome::TimedOut);
    assert_eq!(fixture.resolver.calls(), 3);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(2), "returned early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(3), "returned late: {elapsed:?}");
    assert_eq!(fixture.stops(), 1);
}

#[tokio::test(start_paused = true)]
async fn custom_threshold_controls_the_indicator() {
    let fixture = Fixture::new(
        ScriptedResolver::answering("0.0.0.0:8088"),
        CountingProbe::succeeding(),
    );
    let orchestrator = fixture
        .orchestrator()
        .with_indicator_threshold(Duration::from_millis(500))
        .with_message("Waiting...");

    let outcome = orchestrator.wait(request(Duration::from_secs(1))).await;

    assert!(outcome.is_ready());
    assert_eq!(fixture.starts(), 1);
    assert_eq!(fixture.stops(), 1);
}
