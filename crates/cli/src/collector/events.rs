// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test lifecycle events.
//!
//! A test runner reports outcomes as newline-delimited JSON:
//!
//! ```text
//! {"event":"test_passed","title":"logs in","parent":"Login suite2"}
//! {"event":"test_failed","title":"checks out","parent":"Cart","error":{"message":"Boom"}}
//! {"event":"run_ended"}
//! ```

use std::io::BufRead;

use serde::Deserialize;

/// Error attached to a failed test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TestError {
    #[serde(default)]
    pub message: String,
}

/// The runner's view of a completed test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TestDescriptor {
    /// Test case title.
    #[serde(default)]
    pub title: String,
    /// Enclosing suite, if any.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub error: Option<TestError>,
}

impl TestDescriptor {
    pub fn new(title: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            parent: Some(parent.into()),
            error: None,
        }
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(TestError {
            message: message.into(),
        });
        self
    }
}

/// One lifecycle notification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LifecycleEvent {
    TestPassed(TestDescriptor),
    TestFailed(TestDescriptor),
    RunEnded,
}

/// Receiver of per-test notifications.
pub trait LifecycleListener {
    fn on_test_passed(&mut self, test: &TestDescriptor);
    fn on_test_failed(&mut self, test: &TestDescriptor);
}

/// Whether the lifecycle continues after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    RunEnded,
}

/// Deliver one event to a listener.
pub fn dispatch<L: LifecycleListener + ?Sized>(event: &LifecycleEvent, listener: &mut L) -> Flow {
    match event {
        LifecycleEvent::TestPassed(test) => {
            listener.on_test_passed(test);
            Flow::Continue
        }
        LifecycleEvent::TestFailed(test) => {
            listener.on_test_failed(test);
            Flow::Continue
        }
        LifecycleEvent::RunEnded => Flow::RunEnded,
    }
}

/// A line of the event stream that could not be parsed.
#[derive(Debug)]
pub struct MalformedLine {
    /// 1-based line number.
    pub line: usize,
    pub reason: String,
}

/// Outcome of replaying an event stream into a listener.
#[derive(Debug, Default)]
pub struct Replay {
    /// Events delivered to the listener.
    pub dispatched: usize,
    /// Whether a `run_ended` event was seen.
    pub run_ended: bool,
    /// Events that arrived after `run_ended` and were dropped.
    pub ignored_after_end: usize,
    pub malformed: Vec<MalformedLine>,
    /// Read failure that cut the stream short.
    pub read_error: Option<std::io::Error>,
}

/// Feed newline-delimited events from `reader` to `listener`.
///
/// Blank lines are ignored. Malformed lines are recorded and skipped. Reading
/// stops at the first I/O error; everything dispatched so far is kept.
pub fn replay<R, L>(reader: R, listener: &mut L) -> Replay
where
    R: BufRead,
    L: LifecycleListener + ?Sized,
{
    let mut outcome = Replay::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                outcome.read_error = Some(e);
                break;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let event: LifecycleEvent = match serde_json::from_str(trimmed) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(line = idx + 1, error = %e, "skipping malformed event");
                outcome.malformed.push(MalformedLine {
                    line: idx + 1,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if outcome.run_ended {
            outcome.ignored_after_end += 1;
            continue;
        }

        tracing::trace!(line = idx + 1, ?event, "dispatching event");
        outcome.dispatched += 1;
        if dispatch(&event, listener) == Flow::RunEnded {
            outcome.run_ended = true;
        }
    }

    outcome
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
