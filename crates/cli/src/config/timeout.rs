// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `write_timeout` values.
//!
//! A timeout is either a bare count of seconds (`write_timeout = 30`) or a
//! string with a unit: `"500ms"`, `"30s"`, `"1.5s"`, `"2m"`. Zero is rejected.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

const UNITS_HINT: &str = "use ms, s or m, e.g. \"30s\"";

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimeout {
    Seconds(i64),
    Text(String),
}

/// Parse a timeout string such as `"30s"`, `"500ms"`, `"1.5s"` or `"2m"`.
pub fn parse_timeout(text: &str) -> Result<Duration, String> {
    let text = text.trim();
    let unit_at = text
        .find(|c: char| c.is_ascii_alphabetic())
        .ok_or_else(|| format!("missing unit in write_timeout `{text}` ({UNITS_HINT})"))?;
    let (amount, unit) = text.split_at(unit_at);
    let amount = amount.trim();

    let timeout = match unit {
        "ms" => amount.parse::<u64>().ok().map(Duration::from_millis),
        "s" => amount
            .parse::<f64>()
            .ok()
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok()),
        "m" => amount
            .parse::<u64>()
            .ok()
            .and_then(|mins| mins.checked_mul(60))
            .map(Duration::from_secs),
        _ => {
            return Err(format!(
                "unknown unit `{unit}` in write_timeout `{text}` ({UNITS_HINT})"
            ));
        }
    }
    .ok_or_else(|| format!("invalid write_timeout `{text}`"))?;

    nonzero(timeout, text)
}

fn nonzero(timeout: Duration, shown: &str) -> Result<Duration, String> {
    if timeout.is_zero() {
        Err(format!("write_timeout must be greater than zero, got `{shown}`"))
    } else {
        Ok(timeout)
    }
}

fn from_seconds(secs: i64) -> Result<Duration, String> {
    let shown = secs.to_string();
    let secs = u64::try_from(secs)
        .map_err(|_| format!("write_timeout must be greater than zero, got `{shown}`"))?;
    nonzero(Duration::from_secs(secs), &shown)
}

/// Deserialize an optional `write_timeout`.
pub fn deserialize_timeout<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawTimeout>::deserialize(deserializer)?
        .map(|raw| match raw {
            RawTimeout::Seconds(secs) => from_seconds(secs),
            RawTimeout::Text(text) => parse_timeout(&text),
        })
        .transpose()
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
#[path = "timeout_tests.rs"]
mod tests;
