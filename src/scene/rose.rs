use std::f64::consts::{FRAC_PI_2, TAU};

use rand::Rng;

use crate::{
    foundation::{
        color::Rgba8,
        core::{BezPath, Point, TimeMs, Vec2},
    },
    geometry::{
        bezier::{cubic_point, tangent_angle},
        petal::petal_outline,
    },
    render::surface::{Brush, Painter, Surface},
};

/// Stem parameters at which a leaf is attached.
pub const LEAF_POSITIONS: [f64; 2] = [0.4, 0.7];

/// Extra rotation per unit of tilt applied to every petal of a rose.
const PETAL_TWIST_RAD: f64 = 0.1;
/// Fully grown petal size relative to the rose size.
const PETAL_SCALE: f64 = 0.4;
/// Petal outline width, in unit-petal coordinates.
const PETAL_OUTLINE_WIDTH: f64 = 0.05;
const PETAL_GRADIENT_INNER: f64 = 0.1;
const PETAL_GRADIENT_OUTER: f64 = 0.5;
const CENTER_RADIUS: f64 = 0.1;
/// Vertical sway is damped relative to horizontal.
const SWAY_VERTICAL_DAMPING: f64 = 0.3;
const STEM_WIDTH: f64 = 0.08;
const STEM_JITTER_PX: f64 = 20.0;
const LEAF_RADII: (f64, f64) = (0.15, 0.06);

/// `[center, edge]` colors of a rose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    pub center: Rgba8,
    pub edge: Rgba8,
}

impl Palette {
    pub const fn new(center: Rgba8, edge: Rgba8) -> Self {
        Self { center, edge }
    }
}

/// Layout role. Only affects sizing at layout time; drawing ignores it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoseRole {
    Main,
    Secondary,
}

/// Staggered petal timing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BloomTiming {
    /// Delay between successive petal starts.
    pub petal_delay_ms: TimeMs,
    /// Time for one petal to grow from nothing to full size.
    pub petal_duration_ms: TimeMs,
}

impl Default for BloomTiming {
    fn default() -> Self {
        Self {
            petal_delay_ms: 300.0,
            petal_duration_ms: 500.0,
        }
    }
}

impl BloomTiming {
    /// Elapsed time after which the last of `petal_count` petals has finished growing.
    pub fn bloom_end_ms(&self, petal_count: u32) -> TimeMs {
        f64::from(petal_count) * self.petal_delay_ms + self.petal_duration_ms
    }

    /// Growth of petal `index` in `[0, 1]`: zero until its turn, then linear over
    /// `petal_duration_ms`. Undefined ratios (NaN) count as zero.
    pub fn petal_growth(&self, index: u32, elapsed: TimeMs) -> f64 {
        let petal_elapsed = elapsed - f64::from(index) * self.petal_delay_ms;
        let growth = petal_elapsed / self.petal_duration_ms;
        if growth.is_nan() {
            0.0
        } else {
            growth.clamp(0.0, 1.0)
        }
    }
}

/// Post-bloom oscillation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SwayParams {
    pub amplitude_px: f64,
    pub frequency_rad_per_ms: f64,
}

impl Default for SwayParams {
    fn default() -> Self {
        Self {
            amplitude_px: 10.0,
            frequency_rad_per_ms: 0.002,
        }
    }
}

/// Everything a rose shares with its siblings: timing, sway and foliage colors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoseStyle {
    pub timing: BloomTiming,
    pub sway: SwayParams,
    pub stem_color: Rgba8,
    pub leaf_color: Rgba8,
}

impl Default for RoseStyle {
    fn default() -> Self {
        Self {
            timing: BloomTiming::default(),
            sway: SwayParams::default(),
            stem_color: Rgba8::rgb(0x2e, 0x8b, 0x57),
            leaf_color: Rgba8::rgb(0x22, 0x8b, 0x22),
        }
    }
}

/// Per-rose placement, fixed by the layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoseParams {
    pub position: Point,
    pub size: f64,
    pub palette: Palette,
    pub petal_count: u32,
    pub tilt: f64,
    pub role: RoseRole,
}

/// Cubic stem from just below the bloom to the bouquet's convergence point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stem {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl Stem {
    fn grow<R: Rng>(position: Point, size: f64, convergence: Point, rng: &mut R) -> Self {
        let p0 = Point::new(position.x, position.y + size * 0.5);
        let p1 = Point::new(
            position.x + rng.gen_range(-STEM_JITTER_PX..STEM_JITTER_PX),
            position.y + size * 1.2,
        );
        let p2 = Point::new(
            (position.x + convergence.x) / 2.0 + rng.gen_range(-STEM_JITTER_PX..STEM_JITTER_PX),
            (position.y + convergence.y) / 2.0,
        );
        Self {
            p0,
            p1,
            p2,
            p3: convergence,
        }
    }

    pub fn point_at(&self, t: f64) -> Point {
        cubic_point(t, self.p0, self.p1, self.p2, self.p3)
    }

    pub fn angle_at(&self, t: f64) -> f64 {
        tangent_angle(t, self.p0, self.p1, self.p2, self.p3)
    }

    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.p0);
        path.curve_to(self.p1, self.p2, self.p3);
        path
    }
}

/// One rose: its bloom clock and everything needed to paint it at a timestamp.
#[derive(Clone, Debug)]
pub struct Rose {
    position: Point,
    initial: Point,
    size: f64,
    palette: Palette,
    petal_count: u32,
    tilt: f64,
    role: RoseRole,
    style: RoseStyle,
    phase: f64,
    stem: Stem,
    start: Option<TimeMs>,
    full_bloom: bool,
}

impl Rose {
    /// Build a rose whose stem ends at `convergence`.
    ///
    /// `rng` fixes the sway phase and the two interior stem control points; both stay
    /// constant for the rose's lifetime.
    pub fn new<R: Rng>(
        params: RoseParams,
        style: RoseStyle,
        convergence: Point,
        rng: &mut R,
    ) -> Self {
        let phase = rng.gen_range(0.0..TAU);
        let stem = Stem::grow(params.position, params.size, convergence, rng);
        Self {
            position: params.position,
            initial: params.position,
            size: params.size,
            palette: params.palette,
            petal_count: params.petal_count,
            tilt: params.tilt,
            role: params.role,
            style,
            phase,
            stem,
            start: None,
            full_bloom: false,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn initial_position(&self) -> Point {
        self.initial
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn petal_count(&self) -> u32 {
        self.petal_count
    }

    pub fn tilt(&self) -> f64 {
        self.tilt
    }

    pub fn role(&self) -> RoseRole {
        self.role
    }

    pub fn style(&self) -> &RoseStyle {
        &self.style
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn stem(&self) -> &Stem {
        &self.stem
    }

    pub fn start_time(&self) -> Option<TimeMs> {
        self.start
    }

    pub fn is_full_bloom(&self) -> bool {
        self.full_bloom
    }

    /// Advance the bloom clock.
    ///
    /// The first call latches the start time; full bloom is reached once elapsed time
    /// strictly exceeds the last petal's growth window and never reverts.
    pub fn update(&mut self, now: TimeMs) {
        let start = *self.start.get_or_insert(now);
        if self.full_bloom {
            return;
        }
        let elapsed = now - start;
        if elapsed > self.style.timing.bloom_end_ms(self.petal_count) {
            self.full_bloom = true;
            tracing::debug!(
                x = self.position.x,
                y = self.position.y,
                elapsed_ms = elapsed,
                "rose reached full bloom"
            );
        }
    }

    /// Time since the latched start; zero before the first `update`.
    pub fn elapsed(&self, now: TimeMs) -> TimeMs {
        self.start.map_or(0.0, |start| now - start)
    }

    pub fn petal_growth(&self, index: u32, now: TimeMs) -> f64 {
        self.style.timing.petal_growth(index, self.elapsed(now))
    }

    /// Offset applied to the bloom origin. Zero until full bloom.
    pub fn sway_offset(&self, now: TimeMs) -> Vec2 {
        if !self.full_bloom {
            return Vec2::ZERO;
        }
        let sway = self.style.sway;
        let s = (now * sway.frequency_rad_per_ms + self.phase).sin() * sway.amplitude_px;
        Vec2::new(s * self.tilt, s * SWAY_VERTICAL_DAMPING)
    }

    /// Paint petals, center, stem and leaves for `now`.
    pub fn draw(&self, now: TimeMs, surface: &mut dyn Surface) {
        let mut painter = Painter::new(surface);

        painter.save();
        painter.translate(self.position.to_vec2() + self.sway_offset(now));
        self.draw_petals(&mut painter, now);
        painter.fill_circle(
            Point::ORIGIN,
            self.size * CENTER_RADIUS,
            &Brush::solid(self.palette.edge),
        );
        painter.restore();

        self.draw_stem_and_leaves(&mut painter);
    }

    fn draw_petals(&self, painter: &mut Painter<'_>, now: TimeMs) {
        let outline = petal_outline();
        let fill = Brush::radial(
            Point::ORIGIN,
            PETAL_GRADIENT_INNER,
            PETAL_GRADIENT_OUTER,
            self.palette.center,
            self.palette.edge,
        );
        let edge = Brush::solid(self.palette.edge);

        for i in 0..self.petal_count {
            let growth = self.petal_growth(i, now);
            if growth <= 0.0 {
                continue;
            }
            let angle = f64::from(i) * TAU / f64::from(self.petal_count);

            painter.save();
            painter.rotate(angle + self.tilt * PETAL_TWIST_RAD);
            painter.scale(self.size * PETAL_SCALE * growth);
            painter.fill(outline, &fill);
            painter.stroke(outline, &edge, PETAL_OUTLINE_WIDTH);
            painter.restore();
        }
    }

    fn draw_stem_and_leaves(&self, painter: &mut Painter<'_>) {
        painter.stroke(
            &self.stem.to_path(),
            &Brush::solid(self.style.stem_color),
            self.size * STEM_WIDTH,
        );

        let leaf = Brush::solid(self.style.leaf_color);
        let radii = Vec2::new(self.size * LEAF_RADII.0, self.size * LEAF_RADII.1);
        for t in LEAF_POSITIONS {
            painter.save();
            painter.translate(self.stem.point_at(t).to_vec2());
            painter.rotate(self.stem.angle_at(t) + FRAC_PI_2);
            painter.fill_ellipse(Point::ORIGIN, radii, &leaf);
            painter.restore();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/rose.rs"]
mod tests;
