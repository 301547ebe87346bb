//! Pan/zoom view over the space.
//!
//! The zoom is kept as the natural log of the enlargement so that repeated
//! multiplicative zooms add up. Screen coordinates have their origin in the
//! top-left corner of a `width` x `height` view; the view centre maps to
//! `position` in space coordinates.

use super::states::{Body, NVec2};

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub position: NVec2, // space point shown at the centre of the view
    pub zoom_level: f64, // ln(enlargement)
    pub velocity: NVec2, // drift used when following the bodies
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            position: NVec2::zeros(),
            zoom_level: 0.0,
            velocity: NVec2::zeros(),
        }
    }
}

impl Viewport {
    pub fn new(position: NVec2, zoom_level: f64) -> Self {
        Self {
            position,
            zoom_level,
            ..Self::default()
        }
    }

    /// Screen units per space unit
    pub fn enlargement(&self) -> f64 {
        self.zoom_level.exp()
    }

    /// Zoom by `factor` keeping the space point `focus` fixed on screen
    pub fn scale(&mut self, factor: f64, focus: NVec2) {
        self.position = focus * (1.0 - 1.0 / factor) + self.position / factor;
        self.zoom_level += factor.ln();
    }

    /// Pan by `delta` space units
    pub fn move_view(&mut self, delta: NVec2) {
        self.position += delta;
    }

    pub fn drift(&mut self, dt: f64) {
        self.position += self.velocity * dt;
    }

    /// Screen point -> space point
    pub fn to_space(&self, on_view: NVec2, width: f64, height: f64) -> NVec2 {
        let half = NVec2::new(width, height) * 0.5;
        self.position + (on_view - half) / self.enlargement()
    }

    /// Space point -> screen point
    pub fn to_view(&self, on_space: NVec2, width: f64, height: f64) -> NVec2 {
        let half = NVec2::new(width, height) * 0.5;
        (on_space - self.position) * self.enlargement() + half
    }

    /// Centre on the body nearest to the current centre.
    /// Returns the index of that body, `None` when there are no bodies.
    pub fn go_to_nearest<'a, I>(&mut self, bodies: I) -> Option<usize>
    where
        I: IntoIterator<Item = &'a Body>,
    {
        let (index, target) = bodies
            .into_iter()
            .map(|b| b.position)
            .enumerate()
            .fold(None, |best: Option<(usize, NVec2)>, (i, p)| match best {
                Some((_, q)) if (self.position - q).norm_squared() <= (self.position - p).norm_squared() => best,
                _ => Some((i, p)),
            })?;
        self.position = target;
        Some(index)
    }

    /// Mass-weighted mean velocity of `bodies`; zero when they carry no mass
    pub fn follow_velocity<'a, I>(bodies: I) -> NVec2
    where
        I: IntoIterator<Item = &'a Body>,
    {
        let (momentum, mass) = bodies
            .into_iter()
            .fold((NVec2::zeros(), 0.0), |(p, m), b| (p + b.momentum(), m + b.mass()));
        if mass == 0.0 {
            NVec2::zeros()
        } else {
            momentum / mass
        }
    }
}
