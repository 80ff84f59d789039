//! Drawing collaborator contract.
//!
//! The crate never paints anything itself. Each frame that changes the
//! picture hands a [`Scene`] to a [`Renderer`], which redraws the dial,
//! shackle and body from scratch.

use serde::{Deserialize, Serialize};

/// Everything needed to paint the lock.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Scene {
    /// Dial rotation in radians, clockwise.
    pub angle: f64,
    /// Dial radius in pixels; the shackle and body scale with it.
    pub radius: f64,
    pub ticks_on_dial: u32,
    /// Upward displacement of the shackle in pixels.
    pub shackle_lift: f64,
}

/// Paints a [`Scene`] onto some drawing surface.
///
/// Implementations must be pure functions of the scene: the engine may skip
/// frames that change nothing.
pub trait Renderer {
    fn draw(&mut self, scene: &Scene);
}

impl<F> Renderer for F
where
    F: FnMut(&Scene),
{
    fn draw(&mut self, scene: &Scene) {
        self(scene)
    }
}

/// Renderer that ignores every scene, for headless hosts.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn draw(&mut self, _scene: &Scene) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_renderers() {
        let mut drawn = Vec::new();
        let mut renderer = |scene: &Scene| drawn.push(scene.angle);

        let scene = Scene {
            angle: 1.5,
            radius: 100.0,
            ticks_on_dial: 40,
            shackle_lift: 0.0,
        };
        renderer.draw(&scene);
        renderer.draw(&scene);

        assert_eq!(drawn, vec![1.5, 1.5]);
    }
}
