// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the QCalc shell.

use thiserror::Error;

/// Top-level error type for all QCalc shell operations.
///
/// Most of these never reach the hosted web content: the bridge turns them
/// into safe defaults at the JavaScript boundary. They exist so that host
/// implementations can report *why* something failed and the bridge can log it.
#[derive(Debug, Error)]
pub enum QCalcError {
    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    #[error("platform setting not found: {0}")]
    SettingNotFound(String),

    // -- JavaScript interface --
    #[error("unknown bridge method: {0}")]
    UnknownMethod(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, QCalcError>;
