//! # Banner Rotation
//!
//! The hero banner's state machine, without any timer. The timer lives in
//! `storefront-live`; this module only knows how to advance.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │      new(list)                                                          │
//! │          │                                                              │
//! │          ▼                  tick                                        │
//! │   ┌──────────────┐ ───────────────────► ┌────────────────────────┐     │
//! │   │ Running(0)   │                      │ Running((i + 1) mod N) │ ─┐  │
//! │   └──────────────┘ ◄─────────────────── └────────────────────────┘  │  │
//! │          │              after N ticks              ▲        tick    │  │
//! │          │                                         └────────────────┘  │
//! │          │ stop (teardown)                                              │
//! │          ▼                                                              │
//! │   ┌──────────────┐                                                      │
//! │   │   Stopped    │  terminal: ticks are ignored                         │
//! │   └──────────────┘                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The published image is always the image at the index reached by the
//! tick, so what is rendered never lags behind the index.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::validation::validate_image_reference;
use crate::{DEFAULT_CTA_LABEL, DEFAULT_CTA_TARGET};

// =============================================================================
// Image List
// =============================================================================

/// A validated, non-empty, ordered list of banner image references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageList(Vec<String>);

impl ImageList {
    /// Validates and wraps the given references.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyImageList`] when `images` is empty
    /// - [`CoreError::InvalidImageReference`] for the first bad entry
    ///
    /// ```rust
    /// use storefront_core::banner::ImageList;
    ///
    /// assert!(ImageList::new(vec!["https://cdn.example.com/a.png".into()]).is_ok());
    /// assert!(ImageList::new(vec![]).is_err());
    /// ```
    pub fn new(images: Vec<String>) -> CoreResult<Self> {
        if images.is_empty() {
            return Err(CoreError::EmptyImageList);
        }

        for (index, reference) in images.iter().enumerate() {
            validate_image_reference(reference).map_err(|e| CoreError::InvalidImageReference {
                index,
                reference: reference.clone(),
                reason: e.to_string(),
            })?;
        }

        Ok(ImageList(images))
    }

    /// Number of images (always at least 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Image at `index`, wrapping around.
    #[inline]
    pub fn get(&self, index: usize) -> &str {
        &self.0[index % self.0.len()]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

// =============================================================================
// Call To Action
// =============================================================================

/// The link rendered on top of the banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CallToAction {
    pub label: String,
    pub target: String,
}

impl Default for CallToAction {
    fn default() -> Self {
        CallToAction {
            label: DEFAULT_CTA_LABEL.to_string(),
            target: DEFAULT_CTA_TARGET.to_string(),
        }
    }
}

// =============================================================================
// Rotation
// =============================================================================

/// Observable state of a [`Rotation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationState {
    Running { index: usize },
    Stopped,
}

/// The rotating pointer over an [`ImageList`].
#[derive(Debug, Clone)]
pub struct Rotation {
    images: ImageList,
    index: usize,
    stopped: bool,
}

impl Rotation {
    /// Starts at the first image.
    pub fn new(images: ImageList) -> Self {
        Rotation {
            images,
            index: 0,
            stopped: false,
        }
    }

    /// Advances to `(index + 1) mod N` and returns the new index.
    ///
    /// Returns `None` once stopped; the index no longer changes.
    pub fn tick(&mut self) -> Option<usize> {
        if self.stopped {
            return None;
        }
        self.index = (self.index + 1) % self.images.len();
        Some(self.index)
    }

    /// Moves to the terminal `Stopped` state.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn state(&self) -> RotationState {
        if self.stopped {
            RotationState::Stopped
        } else {
            RotationState::Running { index: self.index }
        }
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// The image to render right now.
    #[inline]
    pub fn current_image(&self) -> &str {
        self.images.get(self.index)
    }

    pub fn images(&self) -> &ImageList {
        &self.images
    }

    /// Snapshot of what the rendering layer needs for this cycle.
    pub fn frame(&self, call_to_action: &CallToAction) -> BannerFrame {
        BannerFrame {
            index: self.index,
            image: self.current_image().to_string(),
            call_to_action: call_to_action.clone(),
        }
    }
}

// =============================================================================
// Banner Frame
// =============================================================================

/// One render cycle of the banner: background image plus call to action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BannerFrame {
    pub index: usize,
    pub image: String,
    pub call_to_action: CallToAction,
}

// =============================================================================
// Unit Tests
// =============================================================================
