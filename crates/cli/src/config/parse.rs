// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parse helper functions for configuration.

use std::path::{Path, PathBuf};

/// Parse a TOML string value as Option<PathBuf>.
pub(super) fn parse_path_option(value: Option<&toml::Value>) -> Option<PathBuf> {
    value.and_then(|v| v.as_str()).map(PathBuf::from)
}

/// Parse a TOML string value as a path with a default function.
pub(super) fn parse_path_or_else<F>(value: Option<&toml::Value>, default: F) -> PathBuf
where
    F: FnOnce() -> PathBuf,
{
    parse_path_option(value).unwrap_or_else(default)
}

/// Parse a TOML boolean value with a default.
pub(super) fn parse_bool_or(value: Option<&toml::Value>, default: bool) -> bool {
    value.and_then(|v| v.as_bool()).unwrap_or(default)
}

/// Warn about an unrecognized config key.
pub(super) fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "resultsheet: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}
