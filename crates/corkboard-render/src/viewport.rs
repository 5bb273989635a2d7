//! Pan/zoom camera and the pointer gesture state machine.
//!
//! All inputs are in client (screen) pixels; the camera maps board pixels to viewport pixels as
//! `screen = offset + board * scale`. Scale stays inside the configured range after every
//! operation. The offset is unconstrained.

use crate::util::fmt;
use corkboard_core::config::ViewportConfig;
use corkboard_layout::Point;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub type PointerId = i32;

/// Viewport rectangle in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewportRect {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    /// Client point relative to the rectangle's top-left corner.
    pub fn local(&self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub scale: f64,
    pub offset: Point,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Point::ORIGIN,
        }
    }
}

impl Camera {
    /// Rescales to `scale` keeping the viewport-local point `anchor` fixed on screen.
    fn zoom_around(&mut self, anchor: Point, scale: f64) {
        let ratio = scale / self.scale;
        self.offset = Point::new(
            anchor.x - (anchor.x - self.offset.x) * ratio,
            anchor.y - (anchor.y - self.offset.y) * ratio,
        );
        self.scale = scale;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum GestureState {
    Idle,
    Panning {
        start_pointer: Point,
        start_offset: Point,
    },
    Pinching {
        initial_distance: f64,
        initial_scale: f64,
        initial_offset: Point,
    },
}

#[derive(Debug, Clone)]
pub struct Viewport {
    config: ViewportConfig,
    rect: ViewportRect,
    camera: Camera,
    home: Camera,
    /// Active pointers in press order, with their last client position.
    pointers: IndexMap<PointerId, Point>,
    state: GestureState,
}

impl Viewport {
    pub fn new(config: ViewportConfig, rect: ViewportRect) -> Self {
        Self {
            config,
            rect,
            camera: Camera::default(),
            home: Camera::default(),
            pointers: IndexMap::new(),
            state: GestureState::Idle,
        }
    }

    /// Fits a `board_w` x `board_h` board into `rect` and stores the result as the reset target.
    pub fn fit(&mut self, board_w: f64, board_h: f64, rect: ViewportRect) {
        self.rect = rect;
        let raw = (rect.width / board_w).min(rect.height / board_h) * self.config.fit_margin;
        let scale = self.config.clamp_scale(raw);
        let camera = Camera {
            scale,
            offset: Point::new(
                (rect.width - board_w * scale) / 2.0,
                (rect.height - board_h * scale) / 2.0,
            ),
        };
        tracing::debug!(scale, board_w, board_h, "viewport fit");
        self.camera = camera;
        self.home = camera;
    }

    pub fn set_rect(&mut self, rect: ViewportRect) {
        self.rect = rect;
    }

    pub fn rect(&self) -> ViewportRect {
        self.rect
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn home(&self) -> Camera {
        self.home
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn active_pointers(&self) -> usize {
        self.pointers.len()
    }

    pub fn wheel(&mut self, client: Point, delta_y: f64) {
        let s = self.camera.scale;
        let next = self
            .config
            .clamp_scale(s - delta_y * self.config.wheel_sensitivity * s);
        let anchor = self.rect.local(client);
        self.camera.zoom_around(anchor, next);
    }

    pub fn pointer_down(&mut self, id: PointerId, client: Point, on_item: bool) {
        self.pointers.insert(id, client);
        match self.pointers.len() {
            1 if !on_item => {
                self.state = GestureState::Panning {
                    start_pointer: client,
                    start_offset: self.camera.offset,
                };
            }
            2 => {
                self.state = GestureState::Pinching {
                    initial_distance: self.pinch_distance(),
                    initial_scale: self.camera.scale,
                    initial_offset: self.camera.offset,
                };
            }
            _ => {}
        }
    }

    pub fn pointer_move(&mut self, id: PointerId, client: Point) {
        let Some(slot) = self.pointers.get_mut(&id) else {
            return;
        };
        *slot = client;

        match self.state {
            GestureState::Pinching {
                initial_distance,
                initial_scale,
                initial_offset,
            } if self.pointers.len() == 2 && initial_distance > 0.0 => {
                let scale = self
                    .config
                    .clamp_scale(initial_scale * (self.pinch_distance() / initial_distance));
                let mid = self.rect.local(self.pinch_midpoint());
                let ratio = scale / initial_scale;
                self.camera = Camera {
                    scale,
                    offset: Point::new(
                        mid.x - (mid.x - initial_offset.x) * ratio,
                        mid.y - (mid.y - initial_offset.y) * ratio,
                    ),
                };
            }
            GestureState::Panning {
                start_pointer,
                start_offset,
            } if self.pointers.len() == 1 => {
                self.camera.offset = Point::new(
                    start_offset.x + (client.x - start_pointer.x),
                    start_offset.y + (client.y - start_pointer.y),
                );
            }
            _ => {}
        }
    }

    pub fn pointer_up(&mut self, id: PointerId) {
        if self.pointers.shift_remove(&id).is_none() {
            return;
        }
        if self.pointers.is_empty() {
            self.state = GestureState::Idle;
        }
    }

    pub fn pointer_cancel(&mut self, id: PointerId) {
        self.pointer_up(id);
    }

    /// Multiplies the scale by `factor` around the viewport center.
    pub fn zoom_by(&mut self, factor: f64) {
        if factor.is_nan() || factor <= 0.0 {
            return;
        }
        let next = self.config.clamp_scale(self.camera.scale * factor);
        self.camera.zoom_around(self.rect.center(), next);
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(self.config.zoom_in_step);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(self.config.zoom_out_step);
    }

    /// Restores the fit camera. Active pointers are left alone.
    pub fn reset(&mut self) {
        self.camera = self.home;
    }

    /// CSS transform for the board surface.
    pub fn transform(&self) -> String {
        format!(
            "translate({}px,{}px) scale({})",
            fmt(self.camera.offset.x),
            fmt(self.camera.offset.y),
            fmt(self.camera.scale)
        )
    }

    pub fn screen_to_board(&self, client: Point) -> Point {
        let local = self.rect.local(client);
        Point::new(
            (local.x - self.camera.offset.x) / self.camera.scale,
            (local.y - self.camera.offset.y) / self.camera.scale,
        )
    }

    fn first_two(&self) -> Option<(Point, Point)> {
        let mut it = self.pointers.values();
        Some((*it.next()?, *it.next()?))
    }

    fn pinch_distance(&self) -> f64 {
        self.first_two().map_or(0.0, |(a, b)| a.distance(b))
    }

    fn pinch_midpoint(&self) -> Point {
        self.first_two().map_or(Point::ORIGIN, |(a, b)| a.midpoint(b))
    }
}
