use std::time::{Duration, Instant};

/// Offsets closer than this are the same position.
const OFFSET_EPSILON: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pane {
    Original,
    Edited,
}

impl Pane {
    pub const ALL: [Pane; 2] = [Pane::Original, Pane::Edited];

    pub fn other(self) -> Self {
        match self {
            Pane::Original => Pane::Edited,
            Pane::Edited => Pane::Original,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Pane::Original => 0,
            Pane::Edited => 1,
        }
    }
}

/// Vertical scroll position of one pane.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    pub offset: f32,
    /// Content height minus viewport height; 0 when the pane cannot scroll.
    pub extent: f32,
}

impl ScrollMetrics {
    pub fn ratio(&self) -> f32 {
        if self.extent <= 0.0 {
            0.0
        } else {
            (self.offset / self.extent).clamp(0.0, 1.0)
        }
    }
}

/// Offset to apply to a pane on the next frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    pub pane: Pane,
    pub offset: f32,
}

/// Mirrors the scroll ratio of one pane onto the other.
///
/// Two guards stop the mirrored scroll from bouncing back: a short timed
/// window after every programmatic scroll, and an origin tag remembering the
/// offset last applied to each pane.
#[derive(Debug, Clone)]
pub struct ScrollSync {
    window: Duration,
    suppressed_until: Option<Instant>,
    observed: [ScrollMetrics; 2],
    applied: [Option<f32>; 2],
}

impl ScrollSync {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            suppressed_until: None,
            observed: [ScrollMetrics::default(); 2],
            applied: [None; 2],
        }
    }

    pub fn observed(&self, pane: Pane) -> ScrollMetrics {
        self.observed[pane.index()]
    }

    pub fn is_suppressed(&self, now: Instant) -> bool {
        self.suppressed_until.is_some_and(|until| now < until)
    }

    /// Start the suppression window, e.g. before a scroll-to-line that moves
    /// both panes at once.
    pub fn suppress(&mut self, now: Instant) {
        self.suppressed_until = Some(now + self.window);
    }

    /// Record where `pane` is now.
    ///
    /// Returns the command for the other pane when this is a user scroll that
    /// should be mirrored.
    pub fn observe(
        &mut self,
        pane: Pane,
        metrics: ScrollMetrics,
        enabled: bool,
        now: Instant,
    ) -> Option<ScrollCommand> {
        let previous = std::mem::replace(&mut self.observed[pane.index()], metrics);
        if (metrics.offset - previous.offset).abs() < OFFSET_EPSILON {
            return None;
        }

        if let Some(applied) = self.applied[pane.index()].take()
            && (metrics.offset - applied).abs() <= OFFSET_EPSILON
        {
            return None;
        }

        if !enabled || self.is_suppressed(now) {
            return None;
        }

        let target = pane.other();
        let offset = metrics.ratio() * self.observed[target.index()].extent;
        self.applied[target.index()] = Some(offset);
        self.suppress(now);

        Some(ScrollCommand {
            pane: target,
            offset,
        })
    }
}
