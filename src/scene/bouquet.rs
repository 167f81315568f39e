use std::f64::consts::{FRAC_PI_2, FRAC_PI_6, TAU};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    foundation::{
        color::Rgba8,
        core::{Canvas, Point, TimeMs, Vec2},
    },
    render::surface::Surface,
    scene::rose::{Palette, Rose, RoseParams, RoseRole, RoseStyle},
};

/// Roses per ring.
pub const RING_SIZE: usize = 3;
/// Distance of the stems' convergence point below the bottom edge.
pub const CONVERGENCE_DROP_PX: f64 = 50.0;

const MAIN_SIZE: f64 = 80.0;
const MAIN_PETALS: u32 = 8;
const MAIN_TILT: f64 = 1.0;
const SECONDARY_SIZE: f64 = 50.0;
const SECONDARY_PETALS: u32 = 6;
const SECONDARY_TILT: f64 = 0.5;
const SECONDARY_RADIUS_FACTOR: f64 = 1.2;

/// pink/red, white/pink, pale-yellow/gold.
pub const DEFAULT_PALETTES: [Palette; RING_SIZE] = [
    Palette::new(Rgba8::rgb(0xff, 0xcc, 0xcc), Rgba8::rgb(0xff, 0x33, 0x66)),
    Palette::new(Rgba8::rgb(0xff, 0xff, 0xff), Rgba8::rgb(0xff, 0x99, 0xb3)),
    Palette::new(Rgba8::rgb(0xff, 0xff, 0xcc), Rgba8::rgb(0xff, 0xcc, 0x00)),
];

/// Inputs to [`create_bouquet`] besides the canvas and the random source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    /// Palette per ring position, shared by both rings.
    pub palettes: [Palette; RING_SIZE],
    pub rose: RoseStyle,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            palettes: DEFAULT_PALETTES,
            rose: RoseStyle::default(),
        }
    }
}

/// An ordered set of independent roses whose stems meet at one point.
#[derive(Clone, Debug)]
pub struct Bouquet {
    canvas: Canvas,
    convergence: Point,
    roses: Vec<Rose>,
}

impl Bouquet {
    /// Lay out a bouquet with stems drawn from a generator seeded with `seed`.
    pub fn seeded(canvas: Canvas, params: &LayoutParams, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        create_bouquet(canvas, params, &mut rng)
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn convergence(&self) -> Point {
        self.convergence
    }

    pub fn roses(&self) -> &[Rose] {
        &self.roses
    }

    pub fn roses_mut(&mut self) -> &mut [Rose] {
        &mut self.roses
    }

    pub fn len(&self) -> usize {
        self.roses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roses.is_empty()
    }

    pub fn is_full_bloom(&self) -> bool {
        self.roses.iter().all(Rose::is_full_bloom)
    }

    /// Run one frame: `update` then `draw` on each rose, in order.
    pub fn step(&mut self, now: TimeMs, surface: &mut dyn Surface) {
        for rose in &mut self.roses {
            rose.update(now);
            rose.draw(now, surface);
        }
    }
}

/// Point below the canvas where every stem ends.
pub fn convergence_point(canvas: Canvas) -> Point {
    Point::new(
        canvas.width_f64() / 2.0,
        canvas.height_f64() + CONVERGENCE_DROP_PX,
    )
}

/// Build a fresh bouquet for `canvas`: three main roses on a ring of radius
/// `min(w, h) / 4`, then three smaller secondary roses offset by 30 degrees on a ring
/// 1.2 times wider.
///
/// Positions, sizes and petal counts depend only on `canvas`; `rng` only shapes the
/// stems and sway phases.
#[tracing::instrument(skip(params, rng))]
pub fn create_bouquet<R: Rng>(canvas: Canvas, params: &LayoutParams, rng: &mut R) -> Bouquet {
    let center = canvas.center();
    let radius = canvas.min_side() / 4.0;
    let convergence = convergence_point(canvas);

    let main = (0..RING_SIZE).map(|i| RoseParams {
        position: center + Vec2::from_angle(ring_angle(i) - FRAC_PI_2) * radius,
        size: MAIN_SIZE,
        palette: params.palettes[i],
        petal_count: MAIN_PETALS,
        tilt: alternating(i, MAIN_TILT),
        role: RoseRole::Main,
    });
    let secondary = (0..RING_SIZE).map(|i| RoseParams {
        position: center
            + Vec2::from_angle(ring_angle(i) - FRAC_PI_2 + FRAC_PI_6)
                * (radius * SECONDARY_RADIUS_FACTOR),
        size: SECONDARY_SIZE,
        palette: params.palettes[i % RING_SIZE],
        petal_count: SECONDARY_PETALS,
        tilt: alternating(i, SECONDARY_TILT),
        role: RoseRole::Secondary,
    });

    let roses: Vec<Rose> = main
        .chain(secondary)
        .map(|p| Rose::new(p, params.rose, convergence, &mut *rng))
        .collect();

    tracing::debug!(roses = roses.len(), radius, "bouquet laid out");
    Bouquet {
        canvas,
        convergence,
        roses,
    }
}

fn ring_angle(i: usize) -> f64 {
    i as f64 * TAU / RING_SIZE as f64
}

/// `+magnitude` for even ring positions, `-magnitude` for odd ones.
fn alternating(i: usize, magnitude: f64) -> f64 {
    if i % 2 == 0 { magnitude } else { -magnitude }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/bouquet.rs"]
mod tests;
