//! Property interpolation over time. Times are in seconds on a single
//! monotonic clock supplied by the caller.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power1Out,
    Power3Out,
    Power4Out,
}

impl Ease {
    /// Maps linear progress in `[0, 1]` to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let inv = 1.0 - t;
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - inv.powi(2),
            Ease::Power3Out => 1.0 - inv.powi(4),
            Ease::Power4Out => 1.0 - inv.powi(5),
        }
    }
}

/// The animatable properties. `None` means "not touched".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Props {
    pub opacity: Option<f64>,
    /// Vertical offset in CSS pixels.
    pub y: Option<f64>,
}

impl Props {
    /// Fully visible, no offset.
    pub fn settled() -> Self {
        Self {
            opacity: Some(1.0),
            y: Some(0.0),
        }
    }

    pub fn opacity(value: f64) -> Self {
        Self {
            opacity: Some(value),
            y: None,
        }
    }

    pub fn y(value: f64) -> Self {
        Self {
            opacity: None,
            y: Some(value),
        }
    }

    /// Interpolates every property set in `to`; unknown start values jump.
    fn lerp(from: &Props, to: &Props, k: f64) -> Props {
        let mix = |a: Option<f64>, b: Option<f64>| b.map(|b| a.map_or(b, |a| a + (b - a) * k));
        Props {
            opacity: mix(from.opacity, to.opacity),
            y: mix(from.y, to.y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub to: Props,
    pub duration: f64,
    pub delay: f64,
    pub ease: Ease,
}

impl Tween {
    pub fn new(to: Props, duration: f64, delay: f64, ease: Ease) -> Self {
        Self {
            to,
            duration,
            delay,
            ease,
        }
    }
}

#[derive(Debug)]
struct Running<T> {
    target: T,
    from: Props,
    to: Props,
    start: f64,
    duration: f64,
    ease: Ease,
}

/// Set of in-flight tweens. Finished tweens emit their final values once
/// and are dropped.
#[derive(Debug)]
pub struct Tweener<T> {
    running: Vec<Running<T>>,
}

impl<T> Default for Tweener<T> {
    fn default() -> Self {
        Self {
            running: Vec::new(),
        }
    }
}

impl<T: Clone> Tweener<T> {
    pub fn add(&mut self, target: T, from: Props, tween: Tween, now: f64) {
        self.running.push(Running {
            target,
            from,
            to: tween.to,
            start: now + tween.delay.max(0.0),
            duration: tween.duration.max(0.0),
            ease: tween.ease,
        });
    }

    /// Values to apply at `now`. Tweens still in their delay emit nothing.
    pub fn tick(&mut self, now: f64) -> Vec<(T, Props)> {
        let mut out = Vec::new();
        self.running.retain(|run| {
            if now < run.start {
                return true;
            }
            let progress = if run.duration == 0.0 {
                1.0
            } else {
                ((now - run.start) / run.duration).min(1.0)
            };
            out.push((
                run.target.clone(),
                Props::lerp(&run.from, &run.to, run.ease.apply(progress)),
            ));
            progress < 1.0
        });
        out
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }
}

/// Vertical translation of a computed CSS `transform` value
/// (`none`, `matrix(..)` or `matrix3d(..)`).
pub fn translate_y(transform: &str) -> f64 {
    let transform = transform.trim();
    let (body, index) = if let Some(rest) = transform.strip_prefix("matrix3d(") {
        (rest, 13)
    } else if let Some(rest) = transform.strip_prefix("matrix(") {
        (rest, 5)
    } else {
        return 0.0;
    };
    body.trim_end_matches(')')
        .split(',')
        .nth(index)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0.0)
}
