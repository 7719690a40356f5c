//! Size-dependent background geometry.
//!
//! The face keeps its background bitmap pre-scaled to the surface so a frame
//! is a single blit. Rescaling only happens when the surface size actually
//! changes; hosts tend to repeat resize notifications.

use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use log::{debug, warn};

/// Result of a resize notification.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResizeOutcome {
    /// Zero or negative dimensions; previous geometry kept.
    Ignored,
    /// Same size as the cached geometry; nothing recomputed.
    Unchanged,
    /// Geometry recomputed for the new size.
    Recomputed,
}

#[derive(Debug, Default)]
pub struct BackgroundCache {
    source: Option<Arc<RgbaImage>>,
    scaled: Option<Arc<RgbaImage>>,
    size: Option<(u32, u32)>,
}

impl BackgroundCache {
    /// `source` is the unscaled bitmap, if the face paints one.
    pub fn new(source: Option<Arc<RgbaImage>>) -> Self {
        Self {
            source,
            scaled: None,
            size: None,
        }
    }

    /// Surface size the cached geometry was computed for.
    #[inline]
    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }

    /// The source bitmap scaled to [`size`](Self::size).
    #[inline]
    pub fn scaled(&self) -> Option<&Arc<RgbaImage>> {
        self.scaled.as_ref()
    }

    pub fn resize(&mut self, width: i32, height: i32) -> ResizeOutcome {
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            warn!("ignoring resize to {width}x{height}");
            return ResizeOutcome::Ignored;
        };
        if w == 0 || h == 0 {
            warn!("ignoring resize to {width}x{height}");
            return ResizeOutcome::Ignored;
        }

        if self.size == Some((w, h)) {
            return ResizeOutcome::Unchanged;
        }

        self.scaled = self
            .source
            .as_ref()
            .map(|src| Arc::new(imageops::resize(src.as_ref(), w, h, FilterType::Triangle)));
        self.size = Some((w, h));
        debug!(
            "background geometry recomputed for {w}x{h} (bitmap: {})",
            self.scaled.is_some()
        );
        ResizeOutcome::Recomputed
    }

    /// Drops every bitmap; the cache is empty afterwards.
    pub fn release(&mut self) {
        self.source = None;
        self.scaled = None;
        self.size = None;
    }
}
