//! Terminal progress indicator.
//!
//! Draws `"<message> <frame>"`, waits one tick, then returns to the start of
//! the line and clears it before drawing the next frame.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::trace;

use crate::port::{ProgressHandle, ProgressReporter};
use crate::runtime::{stop_channel, StopListener, StopSender};

/// Braille spinner animation frames.
pub const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(200);

/// Carriage return plus ANSI "erase entire line".
const CLEAR_LINE: &str = "\r\x1b[2K";

/// Produces the writer the indicator draws to.
pub type Sink = Arc<dyn Fn() -> Box<dyn Write + Send> + Send + Sync>;

/// Frame index and running flag. Lives inside the indicator task only.
#[derive(Debug, Default)]
struct IndicatorState {
    frame: usize,
    running: bool,
}

impl IndicatorState {
    fn glyph(&self) -> &'static str {
        FRAMES[self.frame % FRAMES.len()]
    }

    fn advance(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }
}

/// Spinner written to the terminal (stdout by default).
#[derive(Clone)]
pub struct TerminalIndicator {
    sink: Sink,
    interval: Duration,
}

impl TerminalIndicator {
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(Arc::new(|| Box::new(std::io::stdout())))
    }

    /// Draw to writers produced by `sink` instead of stdout.
    #[must_use]
    pub fn with_sink(sink: Sink) -> Self {
        Self {
            sink,
            interval: DEFAULT_INTERVAL,
        }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

impl Default for TerminalIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for TerminalIndicator {
    fn start(&self, message: &str) -> Box<dyn ProgressHandle> {
        let (stop_tx, stop_rx) = stop_channel();
        let task = tokio::spawn(spin(
            (self.sink)(),
            message.to_string(),
            self.interval,
            stop_rx,
        ));
        Box::new(IndicatorHandle {
            stop: stop_tx,
            task,
        })
    }
}

async fn spin(
    mut out: Box<dyn Write + Send>,
    message: String,
    interval: Duration,
    mut stop: StopListener,
) {
    let mut state = IndicatorState {
        running: true,
        ..IndicatorState::default()
    };

    while state.running {
        if stop.is_stopped() {
            break;
        }

        // Terminal write errors are not worth failing the wait over.
        let _ = write!(out, "{message} {}", state.glyph());
        let _ = out.flush();

        tokio::select! {
            () = tokio::time::sleep(interval) => {}
            () = stop.stopped() => state.running = false,
        }

        let _ = write!(out, "{CLEAR_LINE}");
        let _ = out.flush();
        state.advance();
    }

    trace!(frame = state.frame, "indicator stopped");
}

/// Running indicator. Dropping it without [`ProgressHandle::stop`] still
/// halts the loop, since the stop sender goes away with it.
pub struct IndicatorHandle {
    stop: StopSender,
    task: JoinHandle<()>,
}

#[async_trait]
impl ProgressHandle for IndicatorHandle {
    async fn stop(self: Box<Self>) {
        self.stop.stop();
        let _ = self.task.await;
    }
}

/// Reporter that draws nothing, for quiet and JSON output modes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

struct SilentHandle;

impl ProgressReporter for SilentProgress {
    fn start(&self, _message: &str) -> Box<dyn ProgressHandle> {
        Box::new(SilentHandle)
    }
}

#[async_trait]
impl ProgressHandle for SilentHandle {
    async fn stop(self: Box<Self>) {}
}
