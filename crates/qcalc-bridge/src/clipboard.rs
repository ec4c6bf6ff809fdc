// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Clipboard read access for the web layer.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::traits::NativeClipboard;

/// Reads the primary clip's text on demand.
///
/// Nothing is cached: the clipboard belongs to the system and can change
/// between any two calls.
#[derive(Clone)]
pub struct ClipboardAccessor {
    source: Arc<dyn NativeClipboard + Send + Sync>,
}

impl ClipboardAccessor {
    pub fn new(source: Arc<dyn NativeClipboard + Send + Sync>) -> Self {
        Self { source }
    }

    /// Text of the first clip item, if there is any.
    ///
    /// Every failure mode (service missing, empty clipboard, no items,
    /// non-text item) is `None`.
    pub fn read(&self) -> Option<String> {
        let clip = match self.source.primary_clip() {
            Ok(Some(clip)) => clip,
            Ok(None) => {
                debug!("clipboard is empty");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "clipboard read failed");
                return None;
            }
        };

        let Some(first) = clip.items.into_iter().next() else {
            debug!("primary clip has no items");
            return None;
        };

        match first.text {
            Some(text) => {
                debug!(len = text.len(), "clipboard text retrieved");
                Some(text)
            }
            None => {
                debug!("primary clip item is not text");
                None
            }
        }
    }

    /// JavaScript-facing read: missing text collapses to `""`.
    pub fn get_from_clipboard(&self) -> String {
        self.read().unwrap_or_default()
    }
}
