//! Enter animation for table rows: each newly mounted row slides in from the
//! right on a damped spring while fading in.
use std::time::{Duration, Instant};
use time::{Date, Month};

/// Horizontal offset a row starts from, as a fraction of the row's width
pub(crate) const INITIAL_OFFSET: f64 = 0.2;

/// How long the fade-in lasts
pub(crate) const FADE_DURATION: Duration = Duration::from_millis(300);

/// A row is considered settled once it is this close to its resting place (as
/// a fraction of the row's width) ...
const REST_DELTA: f64 = 0.005;

/// ... and moving slower than this (fractions of the row's width per second)
const REST_SPEED: f64 = 0.05;

pub(crate) const ROW_SPRING: Spring = Spring {
    stiffness: 250.0,
    mass: 0.5,
    damping: 10.0,
};

pub(crate) const EASE_OUT: CubicBezier = CubicBezier {
    x1: 0.0,
    y1: 0.0,
    x2: 0.58,
    y2: 1.0,
};

/// A damped harmonic oscillator released from a displacement of 1 with no
/// initial velocity
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Spring {
    pub(crate) stiffness: f64,
    pub(crate) mass: f64,
    pub(crate) damping: f64,
}

impl Spring {
    fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Returns the displacement and velocity at `t` seconds after release
    pub(crate) fn state(&self, t: f64) -> (f64, f64) {
        let w0 = self.natural_frequency();
        let zeta = self.damping_ratio();
        if (zeta - 1.0).abs() < 1e-9 {
            let decay = (-w0 * t).exp();
            (decay * w0.mul_add(t, 1.0), -w0 * w0 * t * decay)
        } else if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let decay = (-zeta * w0 * t).exp();
            let (sin, cos) = (wd * t).sin_cos();
            let x = decay * (zeta * w0 / wd).mul_add(sin, cos);
            let v = -decay * (w0 * w0 / wd) * sin;
            (x, v)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - root);
            let r2 = -w0 * (zeta + root);
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            let x = r2.mul_add(e1, -r1 * e2) / (r2 - r1);
            let v = r1 * r2 * (e1 - e2) / (r2 - r1);
            (x, v)
        }
    }

    pub(crate) fn position(&self, t: f64) -> f64 {
        self.state(t).0
    }
}

/// CSS-style cubic Bézier easing curve through (0, 0) and (1, 1)
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CubicBezier {
    pub(crate) x1: f64,
    pub(crate) y1: f64,
    pub(crate) x2: f64,
    pub(crate) y2: f64,
}

impl CubicBezier {
    fn sample(a: f64, b: f64, s: f64) -> f64 {
        // B(s) for control values 0, a, b, 1
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
    }

    /// Map linear progress `p` in [0, 1] to eased progress
    pub(crate) fn ease(&self, p: f64) -> f64 {
        if p <= 0.0 {
            return 0.0;
        } else if p >= 1.0 {
            return 1.0;
        }
        let (mut lo, mut hi) = (0.0, 1.0);
        let mut s = p;
        for _ in 0..32 {
            let x = Self::sample(self.x1, self.x2, s);
            if (x - p).abs() < 1e-7 {
                break;
            }
            if x < p {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        Self::sample(self.y1, self.y2, s)
    }
}

/// Where a row is drawn at some instant of its enter animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct RowFrame {
    /// Horizontal displacement as a fraction of the row's width
    pub(crate) offset: f64,
    pub(crate) opacity: f64,
}

impl RowFrame {
    pub(crate) const REST: RowFrame = RowFrame {
        offset: 0.0,
        opacity: 1.0,
    };

    pub(crate) const INITIAL: RowFrame = RowFrame {
        offset: INITIAL_OFFSET,
        opacity: 0.0,
    };

    /// Number of columns to shift a row of the given width by
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn shift(&self, width: u16) -> i32 {
        let limit = f64::from(width);
        // Clamped to ±width, so the cast cannot truncate
        (self.offset * limit).round().clamp(-limit, limit) as i32
    }
}

/// Returns the state of an entering row `elapsed` after it was mounted
pub(crate) fn enter_frame(elapsed: Duration) -> RowFrame {
    if elapsed.is_zero() {
        return RowFrame::INITIAL;
    }
    if enter_settled(elapsed) {
        return RowFrame::REST;
    }
    let t = elapsed.as_secs_f64();
    let progress = (t / FADE_DURATION.as_secs_f64()).min(1.0);
    RowFrame {
        offset: INITIAL_OFFSET * ROW_SPRING.position(t),
        opacity: EASE_OUT.ease(progress),
    }
}

/// Whether a row mounted `elapsed` ago has finished entering
pub(crate) fn enter_settled(elapsed: Duration) -> bool {
    if elapsed < FADE_DURATION {
        return false;
    }
    let (x, v) = ROW_SPRING.state(elapsed.as_secs_f64());
    (INITIAL_OFFSET * x).abs() < REST_DELTA && (INITIAL_OFFSET * v).abs() < REST_SPEED
}

/// Identity of a rendered row: the same week of the same displayed month is
/// the same row across redraws
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct RowKey {
    pub(crate) week_number: u8,
    pub(crate) year: i32,
    pub(crate) month: Month,
}

impl RowKey {
    pub(crate) fn new(week_number: u8, display_month: Date) -> RowKey {
        RowKey {
            week_number,
            year: display_month.year(),
            month: display_month.month(),
        }
    }
}

/// Tracks which rows are mounted and when each one started entering.
///
/// Rows present the first time the set is synced appear immediately.  Rows
/// that disappear are dropped at once, as rows have no exit animation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Presence<K> {
    mounted: Vec<(K, Option<Instant>)>,
    initialized: bool,
}

impl<K: PartialEq> Presence<K> {
    pub(crate) fn new() -> Self {
        Presence {
            mounted: Vec::new(),
            initialized: false,
        }
    }

    pub(crate) fn sync<I: IntoIterator<Item = K>>(&mut self, keys: I, now: Instant) {
        let mut mounted = Vec::with_capacity(self.mounted.len());
        let mut entering = 0usize;
        for key in keys {
            let start = match self.mounted.iter().find(|(k, _)| *k == key) {
                Some(&(_, start)) => start,
                None if self.initialized => {
                    entering += 1;
                    Some(now)
                }
                None => None,
            };
            mounted.push((key, start));
        }
        if entering > 0 {
            log::debug!("{entering} row(s) entering");
        }
        self.mounted = mounted;
        self.initialized = true;
    }

    pub(crate) fn frame(&self, key: &K, now: Instant) -> RowFrame {
        match self.mounted.iter().find(|(k, _)| k == key) {
            Some((_, Some(start))) => enter_frame(now.saturating_duration_since(*start)),
            _ => RowFrame::REST,
        }
    }

    pub(crate) fn is_animating(&self, now: Instant) -> bool {
        self.mounted.iter().any(|(_, start)| {
            start.is_some_and(|s| !enter_settled(now.saturating_duration_since(s)))
        })
    }
}
