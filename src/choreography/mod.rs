//! Entrance and reveal sequencing.
//!
//! Three independent groups: the hero load sequence (plays once), scroll
//! reveals (one-shot per element once its top crosses a line in the
//! viewport) and mask-text latches (one-shot per element on intersection).
//! Played/latched state lives here, never in the document.

pub mod tween;

pub use tween::{translate_y, Ease, Props, Tween, Tweener};

use crate::config::RevealConfig;

const BADGE_DELAY: f64 = 0.5;
const TITLE_DELAY: f64 = 0.3;
const TITLE_DURATION: f64 = 0.1;
const LINES_DELAY: f64 = 0.5;
const LINES_STAGGER: f64 = 0.2;
const LINES_DURATION: f64 = 1.2;
const SUBTITLE_DELAY: f64 = 1.2;
const CTA_DELAY: f64 = 1.5;
const SCROLL_HINT_DELAY: f64 = 2.0;
const ENTRANCE_DURATION: f64 = 1.0;

/// Animates targets towards property values.
pub trait Timeline {
    type Target;
    fn to(&mut self, target: &Self::Target, tween: Tween);
}

/// Hero elements, each group in document order.
#[derive(Debug, Clone)]
pub struct HeroTargets<T> {
    pub badge: Vec<T>,
    pub title: Vec<T>,
    pub title_lines: Vec<T>,
    pub subtitle: Vec<T>,
    pub cta: Vec<T>,
    pub scroll_hint: Vec<T>,
}

impl<T> Default for HeroTargets<T> {
    fn default() -> Self {
        Self {
            badge: Vec::new(),
            title: Vec::new(),
            title_lines: Vec::new(),
            subtitle: Vec::new(),
            cta: Vec::new(),
            scroll_hint: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct LoadSequence {
    played: bool,
}

impl LoadSequence {
    /// Queues the hero entrance. Returns `false` if it already played.
    pub fn play<L: Timeline>(&mut self, timeline: &mut L, hero: &HeroTargets<L::Target>) -> bool {
        if self.played {
            return false;
        }
        self.played = true;

        let settle = |delay| Tween::new(Props::settled(), ENTRANCE_DURATION, delay, Ease::Power3Out);
        for badge in &hero.badge {
            timeline.to(badge, settle(BADGE_DELAY));
        }
        for title in &hero.title {
            timeline.to(
                title,
                Tween::new(Props::opacity(1.0), TITLE_DURATION, TITLE_DELAY, Ease::Power1Out),
            );
        }
        for (i, line) in hero.title_lines.iter().enumerate() {
            let delay = LINES_DELAY + i as f64 * LINES_STAGGER;
            timeline.to(line, Tween::new(Props::y(0.0), LINES_DURATION, delay, Ease::Power4Out));
        }
        for subtitle in &hero.subtitle {
            timeline.to(subtitle, settle(SUBTITLE_DELAY));
        }
        for cta in &hero.cta {
            timeline.to(cta, settle(CTA_DELAY));
        }
        for hint in &hero.scroll_hint {
            timeline.to(
                hint,
                Tween::new(Props::opacity(1.0), ENTRANCE_DURATION, SCROLL_HINT_DELAY, Ease::Power3Out),
            );
        }
        log::debug!("hero entrance queued");
        true
    }

    pub fn played(&self) -> bool {
        self.played
    }
}

/// One-way per-target flags.
#[derive(Debug)]
pub struct Latches<T> {
    entries: Vec<(T, bool)>,
}

impl<T> Default for Latches<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: PartialEq> Latches<T> {
    /// Registering a target twice is a no-op.
    pub fn register(&mut self, target: T) {
        if !self.entries.iter().any(|(t, _)| *t == target) {
            self.entries.push((target, false));
        }
    }

    /// `true` only the first time a registered target is tripped.
    pub fn trip(&mut self, target: &T) -> bool {
        match self.entries.iter_mut().find(|(t, _)| t == target) {
            Some((_, tripped)) if !*tripped => {
                *tripped = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_tripped(&self, target: &T) -> bool {
        self.entries.iter().any(|(t, tripped)| t == target && *tripped)
    }

    pub fn pending(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().filter(|(_, tripped)| !*tripped).map(|(t, _)| t)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug)]
pub struct ScrollReveal<T> {
    latches: Latches<T>,
    start_fraction: f64,
    duration: f64,
}

impl<T: PartialEq> ScrollReveal<T> {
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            latches: Latches::default(),
            start_fraction: config.start_fraction,
            duration: config.duration,
        }
    }

    pub fn register(&mut self, target: T) {
        self.latches.register(target);
    }

    /// Fires every pending target whose top edge is at or above the trigger
    /// line. `top_of` returns the top edge relative to the viewport.
    pub fn update<L>(&mut self, timeline: &mut L, viewport_height: f64, top_of: impl Fn(&T) -> f64) -> usize
    where
        L: Timeline<Target = T>,
    {
        let line = viewport_height * self.start_fraction;
        let mut fired = 0;
        for (target, tripped) in self.latches.entries.iter_mut() {
            if *tripped || top_of(&*target) > line {
                continue;
            }
            *tripped = true;
            timeline.to(
                &*target,
                Tween::new(Props::settled(), self.duration, 0.0, Ease::Power3Out),
            );
            fired += 1;
        }
        fired
    }

    pub fn is_revealed(&self, target: &T) -> bool {
        self.latches.is_tripped(target)
    }

    pub fn pending(&self) -> usize {
        self.latches.pending().count()
    }
}

#[derive(Debug)]
pub struct MaskReveal<T> {
    latches: Latches<T>,
    threshold: f64,
}

impl<T: PartialEq> MaskReveal<T> {
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            latches: Latches::default(),
            threshold: config.mask_threshold,
        }
    }

    pub fn register(&mut self, target: T) {
        self.latches.register(target);
    }

    /// Visible fraction an observer should report crossings at.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// `true` when this crossing latches the target; the caller then applies
    /// the revealed style. Leaving the viewport never unlatches.
    pub fn on_intersection(&mut self, target: &T, is_intersecting: bool) -> bool {
        is_intersecting && self.latches.trip(target)
    }

    pub fn is_revealed(&self, target: &T) -> bool {
        self.latches.is_tripped(target)
    }
}

/// All choreography state for one page.
#[derive(Debug)]
pub struct Choreographer<T> {
    pub load: LoadSequence,
    pub scroll: ScrollReveal<T>,
    pub mask: MaskReveal<T>,
}

impl<T: PartialEq> Choreographer<T> {
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            load: LoadSequence::default(),
            scroll: ScrollReveal::new(config),
            mask: MaskReveal::new(config),
        }
    }
}
