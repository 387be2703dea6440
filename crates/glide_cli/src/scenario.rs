//! Gesture scenario files
//!
//! A scenario describes a viewport, its content and a list of steps to
//! replay against a headless document:
//!
//! ```toml
//! [viewport]
//! width = 320
//! height = 400
//!
//! [content]
//! width = 320
//! height = 1200
//!
//! [[steps]]
//! action = "touch_start"
//! x = 100
//! y = 300
//!
//! [[steps]]
//! action = "touch_move"
//! x = 100
//! y = 200
//! after_ms = 50
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use glide_core::events::{event_types, EventType, TouchPoint};
use glide_core::{Axis, Point, Size};
use glide_layout::prelude::*;

/// Upper bound on frames played by a single `tick` step
const MAX_FRAMES: u64 = 10_000;

/// Top-level scenario file
#[derive(Debug, Deserialize, Serialize)]
pub struct Scenario {
    #[serde(default = "default_window")]
    pub window: SizeConfig,
    pub viewport: SizeConfig,
    pub content: SizeConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct SizeConfig {
    pub width: f32,
    pub height: f32,
}

impl From<SizeConfig> for Size {
    fn from(size: SizeConfig) -> Self {
        Size::new(size.width, size.height)
    }
}

fn default_window() -> SizeConfig {
    SizeConfig {
        width: 320.0,
        height: 480.0,
    }
}

fn default_frame_ms() -> u64 {
    16
}

/// One scripted step
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    TouchStart {
        x: f32,
        y: f32,
        /// Clock advance before the touch lands
        #[serde(default)]
        after_ms: u64,
    },
    TouchMove {
        x: f32,
        y: f32,
        #[serde(default)]
        after_ms: u64,
    },
    TouchEnd {
        x: f32,
        y: f32,
        #[serde(default)]
        after_ms: u64,
    },
    TouchCancel {
        #[serde(default)]
        after_ms: u64,
    },
    /// Play animation frames for `ms` milliseconds
    Tick {
        ms: u64,
        #[serde(default = "default_frame_ms")]
        frame_ms: u64,
    },
    ResizeContent {
        width: f32,
        height: f32,
    },
    /// Rotate the window, optionally resizing the viewport first
    OrientationChange {
        width: f32,
        height: f32,
        #[serde(default)]
        viewport: Option<SizeConfig>,
    },
}

/// State of the surface after a replay
#[derive(Debug, Serialize)]
pub struct Report {
    pub offset: [f32; 2],
    pub rendered: [f32; 2],
    pub max_offset: [f32; 2],
    pub state: String,
    pub clicks: usize,
    pub animating: bool,
    pub tracks: Vec<TrackReport>,
}

#[derive(Debug, Serialize)]
pub struct TrackReport {
    pub axis: &'static str,
    pub track_extent: f32,
    pub thumb_extent: f32,
    pub max_thumb_offset: f32,
    pub position: f32,
    pub visible: bool,
}

impl Scenario {
    /// Load a scenario from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Build the document and replay every step
    pub fn run(&self) -> Result<Report> {
        let mut doc = Document::new(self.window.into())?;
        let viewport_size = Size::from(self.viewport);
        let content_size = Size::from(self.content);
        let viewport = doc.create_element(
            doc.root(),
            LayoutStyle::viewport(viewport_size.width, viewport_size.height),
        )?;
        let content = doc.create_element(
            viewport,
            LayoutStyle::fixed_size(content_size.width, content_size.height),
        )?;
        let mut surface = ScrollSurface::new(&mut doc, content, self.scroll)?;
        surface.process_pending(&mut doc)?;

        for (index, step) in self.steps.iter().enumerate() {
            tracing::debug!(index, ?step, "step");
            match *step {
                Step::TouchStart { x, y, after_ms } => {
                    touch(&mut doc, content, event_types::TOUCH_START, x, y, after_ms)
                }
                Step::TouchMove { x, y, after_ms } => {
                    touch(&mut doc, content, event_types::TOUCH_MOVE, x, y, after_ms)
                }
                Step::TouchEnd { x, y, after_ms } => {
                    touch(&mut doc, content, event_types::TOUCH_END, x, y, after_ms)
                }
                Step::TouchCancel { after_ms } => {
                    touch(&mut doc, content, event_types::TOUCH_CANCEL, 0.0, 0.0, after_ms)
                }
                Step::Tick { ms, frame_ms } => {
                    let frame_ms = frame_ms.max(1);
                    let mut remaining = ms;
                    for _ in 0..MAX_FRAMES {
                        if remaining == 0 {
                            break;
                        }
                        let dt = remaining.min(frame_ms);
                        doc.tick(dt);
                        surface.process_pending(&mut doc)?;
                        remaining -= dt;
                    }
                }
                Step::ResizeContent { width, height } => {
                    doc.set_size(content, Size::new(width, height))?;
                }
                Step::OrientationChange {
                    width,
                    height,
                    viewport: resized,
                } => {
                    if let Some(size) = resized {
                        doc.set_size(viewport, size.into())?;
                    }
                    doc.set_window(Size::new(width, height))?;
                }
            }
            surface.process_pending(&mut doc)?;
        }

        Ok(Report::capture(&doc, &surface))
    }
}

fn touch(doc: &mut Document, target: LayoutNodeId, event_type: EventType, x: f32, y: f32, after_ms: u64) {
    doc.advance_clock(after_ms);
    doc.push_touch(event_type, TouchPoint::at(0, x, y, target.to_raw()));
}

impl Report {
    fn capture(doc: &Document, surface: &ScrollSurface) -> Self {
        let pair = |p: Point| [p.x, p.y];
        let tracks = Axis::BOTH
            .into_iter()
            .filter_map(|axis| surface.track(axis))
            .map(|track| TrackReport {
                axis: track.axis().name(),
                track_extent: track.track_extent(),
                thumb_extent: track.thumb_extent(),
                max_thumb_offset: track.max_thumb_offset(),
                position: doc
                    .render()
                    .computed_translate(track.bar())
                    .along(track.axis()),
                visible: track.is_visible(),
            })
            .collect();

        Self {
            offset: pair(surface.offset()),
            rendered: pair(doc.render().computed_translate(surface.content())),
            max_offset: pair(surface.max_offset()),
            state: format!("{:?}", surface.state()),
            clicks: doc.dispatched(event_types::CLICK),
            animating: doc.render().is_animating(),
            tracks,
        }
    }
}
