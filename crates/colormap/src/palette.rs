//! Piecewise-linear palettes described by per-channel anchor points.
//!
//! Each channel is a list of `(x, value)` anchors with `x` rising from 0 to 1.
//! Sampling interpolates linearly between the two anchors around `x`. Lookup
//! tables sample in index space, with anchors stretched over `0..=n-1`, which
//! rounds differently from sampling in `0..=1`.

/// One channel: anchors sorted by position, first at 0.0 and last at 1.0.
pub type Channel = &'static [(f64, f64)];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub name: &'static str,
    pub red: Channel,
    pub green: Channel,
    pub blue: Channel,
}

/// The classic "jet" palette: dark blue through cyan, yellow and red to dark red.
pub const JET: Palette = Palette {
    name: "jet",
    red: &[(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)],
    green: &[
        (0.0, 0.0),
        (0.125, 0.0),
        (0.375, 1.0),
        (0.64, 1.0),
        (0.91, 0.0),
        (1.0, 0.0),
    ],
    blue: &[(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)],
};

impl Palette {
    /// `[r, g, b]` in `0.0..=1.0` at position `x`, clamped to `0.0..=1.0`.
    pub fn sample(&self, x: f64) -> [f64; 3] {
        self.sample_scaled(x, 1.0)
    }

    /// Like `sample`, with anchor positions stretched to `0.0..=span` and `x` in that range.
    pub fn sample_scaled(&self, x: f64, span: f64) -> [f64; 3] {
        [
            sample_channel(self.red, x, span),
            sample_channel(self.green, x, span),
            sample_channel(self.blue, x, span),
        ]
    }
}

pub fn sample_channel(anchors: Channel, x: f64, span: f64) -> f64 {
    let (Some(first), Some(last)) = (anchors.first(), anchors.last()) else {
        return 0.0;
    };
    if x <= first.0 * span {
        return first.1;
    }
    if x >= last.0 * span {
        return last.1;
    }
    // first anchor at or beyond x; x lies strictly inside, so k >= 1
    let k = anchors.partition_point(|&(ax, _)| ax * span < x);
    let (x0, y0) = anchors[k - 1];
    let (x1, y1) = anchors[k];
    let distance = (x - x0 * span) / (x1 * span - x0 * span);
    (distance * (y1 - y0) + y0).clamp(0.0, 1.0)
}
