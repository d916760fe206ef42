//! Reading progress of a scrollable content region

/// Scroll geometry of the content region at one moment, in document pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Top of the region in the document, minus the header offset
    pub element_top: f64,
    pub element_height: f64,
    pub viewport_height: f64,
    pub scroll_y: f64,
}

/// Percentage (0-100) of the region that has scrolled past the viewport top.
///
/// Regions that fit in one screen jump straight from 0 to 100 once the
/// viewport reaches their top.
pub fn completion(geometry: &Geometry) -> f64 {
    let Geometry {
        element_top,
        element_height,
        viewport_height,
        scroll_y,
    } = *geometry;

    if element_height <= viewport_height {
        return if scroll_y < element_top { 0.0 } else { 100.0 };
    }

    let max_scroll = element_top + element_height - viewport_height;

    if scroll_y <= element_top {
        return 0.0;
    }
    if scroll_y >= max_scroll {
        return 100.0;
    }

    let progress = (scroll_y - element_top) / (max_scroll - element_top) * 100.0;
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 100.0)
    }
}

/// Window events that trigger a recomputation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportEvent {
    Scroll,
    Resize,
}

impl ViewportEvent {
    pub const ALL: [ViewportEvent; 2] = [ViewportEvent::Scroll, ViewportEvent::Resize];
}

/// Measured box of the content region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetRect {
    /// Distance from the viewport top to the region top
    pub top: f64,
    /// Rendered height of the region
    pub height: f64,
}

/// The host window the tracker observes
pub trait Viewport {
    /// Current vertical scroll offset
    fn scroll_y(&self) -> f64;

    /// Current window height
    fn inner_height(&self) -> f64;

    /// Box of the content region, `None` while it is not mounted
    fn target_rect(&self) -> Option<TargetRect>;

    fn add_listener(&mut self, event: ViewportEvent);

    fn remove_listener(&mut self, event: ViewportEvent);

    /// Ask for `ProgressTracker::on_frame` to be called before the next paint
    fn request_frame(&mut self);
}

/// Lifecycle of a tracker instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Uninitialized,
    Measuring,
    Tracking,
}

/// Keeps the completion of one content region up to date.
///
/// Scroll and resize events are coalesced: at most one frame request is
/// outstanding, and the recomputation happens when that frame runs.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    offset_top: f64,
    state: TrackerState,
    completion: f64,
    frame_pending: bool,
}

impl ProgressTracker {
    /// `offset_top` is subtracted from the region's top, e.g. a fixed header
    pub fn new(offset_top: f64) -> Self {
        Self {
            offset_top,
            state: TrackerState::Uninitialized,
            completion: 0.0,
            frame_pending: false,
        }
    }

    pub fn offset_top(&self) -> f64 {
        self.offset_top
    }

    pub fn completion(&self) -> f64 {
        self.completion
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Measure once, then start listening for scroll and resize
    pub fn attach<V: Viewport + ?Sized>(&mut self, viewport: &mut V) {
        if self.state != TrackerState::Uninitialized {
            return;
        }

        self.state = TrackerState::Measuring;
        self.recompute(viewport);

        for event in ViewportEvent::ALL {
            viewport.add_listener(event);
        }
        self.state = TrackerState::Tracking;
        tracing::trace!("Progress tracker attached at {:.1}%", self.completion);
    }

    /// Schedule a recomputation unless one is already pending
    pub fn handle_event<V: Viewport + ?Sized>(&mut self, viewport: &mut V, event: ViewportEvent) {
        if self.state != TrackerState::Tracking || self.frame_pending {
            return;
        }
        tracing::trace!("Scheduling progress update for {:?}", event);
        self.frame_pending = true;
        viewport.request_frame();
    }

    /// Run the scheduled recomputation
    pub fn on_frame<V: Viewport + ?Sized>(&mut self, viewport: &V) {
        self.frame_pending = false;
        if self.state == TrackerState::Tracking {
            self.recompute(viewport);
        }
    }

    /// Stop listening; frames that still arrive are ignored
    pub fn detach<V: Viewport + ?Sized>(&mut self, viewport: &mut V) {
        if self.state == TrackerState::Uninitialized {
            return;
        }
        for event in ViewportEvent::ALL {
            viewport.remove_listener(event);
        }
        self.frame_pending = false;
        self.state = TrackerState::Uninitialized;
    }

    fn recompute<V: Viewport + ?Sized>(&mut self, viewport: &V) {
        // Unmounted target: keep the last value
        let Some(rect) = viewport.target_rect() else {
            return;
        };

        let scroll_y = viewport.scroll_y();
        let geometry = Geometry {
            element_top: rect.top + scroll_y - self.offset_top,
            element_height: rect.height,
            viewport_height: viewport.inner_height(),
            scroll_y,
        };
        self.completion = completion(&geometry);
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new(0.0)
    }
}
