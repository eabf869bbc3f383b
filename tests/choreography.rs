use portfolio_wasm::choreography::{
    Choreographer, Ease, HeroTargets, Props, Timeline, Tween, Tweener,
};
use portfolio_wasm::config::RevealConfig;

/// Records every queued tween instead of animating.
#[derive(Default)]
struct Recorder {
    queued: Vec<(&'static str, Tween)>,
}

impl Timeline for Recorder {
    type Target = &'static str;

    fn to(&mut self, target: &&'static str, tween: Tween) {
        self.queued.push((*target, tween));
    }
}

fn hero() -> HeroTargets<&'static str> {
    HeroTargets {
        badge: vec!["badge"],
        title: vec!["title"],
        title_lines: vec!["line-1", "line-2", "line-3"],
        subtitle: vec!["subtitle"],
        cta: vec!["cta"],
        scroll_hint: vec!["hint"],
    }
}

fn top_of(tops: &[(&str, f64)], target: &str) -> f64 {
    tops.iter()
        .find(|(t, _)| *t == target)
        .map_or(0.0, |(_, top)| *top)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn load_sequence_plays_once() {
    let mut choreo = Choreographer::<&str>::new(&RevealConfig::default());
    let mut timeline = Recorder::default();
    let hero = hero();

    assert!(choreo.load.play(&mut timeline, &hero));
    let first = timeline.queued.len();
    assert_eq!(first, 8);

    assert!(!choreo.load.play(&mut timeline, &hero));
    assert_eq!(timeline.queued.len(), first);
    assert!(choreo.load.played());
}

#[test]
fn load_sequence_timing() {
    let mut choreo = Choreographer::<&str>::new(&RevealConfig::default());
    let mut timeline = Recorder::default();
    choreo.load.play(&mut timeline, &hero());

    let tween = |name: &str| {
        timeline
            .queued
            .iter()
            .find(|(t, _)| *t == name)
            .map(|(_, tween)| *tween)
            .unwrap()
    };

    let badge = tween("badge");
    assert_eq!(badge.to, Props::settled());
    assert!(approx(badge.delay, 0.5) && approx(badge.duration, 1.0));
    assert_eq!(badge.ease, Ease::Power3Out);

    let title = tween("title");
    assert_eq!(title.to, Props::opacity(1.0));
    assert!(approx(title.delay, 0.3) && approx(title.duration, 0.1));
    assert_eq!(title.ease, Ease::Power1Out);

    // Lines slide in 0.2s apart, starting at 0.5s.
    for (i, line) in ["line-1", "line-2", "line-3"].into_iter().enumerate() {
        let t = tween(line);
        assert_eq!(t.to, Props::y(0.0));
        assert!(approx(t.delay, 0.5 + 0.2 * i as f64), "{line}: {}", t.delay);
        assert!(approx(t.duration, 1.2));
        assert_eq!(t.ease, Ease::Power4Out);
    }

    assert!(approx(tween("subtitle").delay, 1.2));
    assert!(approx(tween("cta").delay, 1.5));

    let hint = tween("hint");
    assert_eq!(hint.to, Props::opacity(1.0));
    assert!(approx(hint.delay, 2.0));
}

#[test]
fn empty_hero_still_counts_as_played() {
    let mut choreo = Choreographer::<&str>::new(&RevealConfig::default());
    let mut timeline = Recorder::default();
    assert!(choreo.load.play(&mut timeline, &HeroTargets::default()));
    assert!(timeline.queued.is_empty());
    assert!(!choreo.load.play(&mut timeline, &hero()));
}

#[test]
fn scroll_reveal_fires_once_per_element() {
    let mut choreo = Choreographer::new(&RevealConfig::default());
    let mut timeline = Recorder::default();
    choreo.scroll.register("near");
    choreo.scroll.register("far");

    // Viewport 1000px tall: trigger line at 850px.
    let mut tops = [("near", 900.0), ("far", 2000.0)];

    assert_eq!(choreo.scroll.update(&mut timeline, 1000.0, |t| top_of(&tops, t)), 0);

    // Exactly on the line counts.
    tops[0].1 = 850.0;
    assert_eq!(choreo.scroll.update(&mut timeline, 1000.0, |t| top_of(&tops, t)), 1);
    assert!(choreo.scroll.is_revealed(&"near"));
    assert_eq!(choreo.scroll.pending(), 1);

    // Scrolling back out and in again does nothing more.
    tops[0].1 = 1200.0;
    choreo.scroll.update(&mut timeline, 1000.0, |t| top_of(&tops, t));
    tops[0].1 = 100.0;
    assert_eq!(choreo.scroll.update(&mut timeline, 1000.0, |t| top_of(&tops, t)), 0);

    let (target, tween) = timeline.queued[0];
    assert_eq!(target, "near");
    assert_eq!(tween.to, Props::settled());
    assert!(approx(tween.duration, 1.0) && approx(tween.delay, 0.0));
    assert_eq!(tween.ease, Ease::Power3Out);
    assert_eq!(timeline.queued.len(), 1);
}

#[test]
fn taller_viewport_reveals_without_scrolling() {
    let mut choreo = Choreographer::new(&RevealConfig::default());
    let mut timeline = Recorder::default();
    choreo.scroll.register("card");
    let tops = [("card", 800.0)];

    // 800px tall: line at 680px, the card sits below it.
    assert_eq!(choreo.scroll.update(&mut timeline, 800.0, |t| top_of(&tops, t)), 0);
    // The window grows to 1000px: line at 850px, same scroll position.
    assert_eq!(choreo.scroll.update(&mut timeline, 1000.0, |t| top_of(&tops, t)), 1);
    assert!(choreo.scroll.is_revealed(&"card"));
}

#[test]
fn mask_latch_is_one_way() {
    let mut choreo = Choreographer::new(&RevealConfig::default());
    choreo.mask.register("heading");
    assert!(approx(choreo.mask.threshold(), 0.2));

    assert!(!choreo.mask.on_intersection(&"heading", false));
    assert!(!choreo.mask.is_revealed(&"heading"));

    assert!(choreo.mask.on_intersection(&"heading", true));
    assert!(choreo.mask.is_revealed(&"heading"));

    // Leaving and re-entering never re-fires or clears the latch.
    assert!(!choreo.mask.on_intersection(&"heading", false));
    assert!(!choreo.mask.on_intersection(&"heading", true));
    assert!(choreo.mask.is_revealed(&"heading"));

    // Unregistered elements never latch.
    assert!(!choreo.mask.on_intersection(&"other", true));
}

#[test]
fn tweener_interpolates_after_delay() {
    let mut tweens = Tweener::default();
    let from = Props {
        opacity: Some(0.0),
        y: Some(30.0),
    };
    tweens.add(
        "badge",
        from,
        Tween::new(Props::settled(), 1.0, 0.5, Ease::Linear),
        10.0,
    );

    assert!(tweens.tick(10.2).is_empty());
    assert_eq!(tweens.len(), 1);

    let mid = tweens.tick(11.0);
    assert_eq!(mid.len(), 1);
    let (target, props) = mid[0];
    assert_eq!(target, "badge");
    assert!(approx(props.opacity.unwrap(), 0.5));
    assert!(approx(props.y.unwrap(), 15.0));

    let end = tweens.tick(12.0);
    assert_eq!(end[0].1, Props::settled());
    assert!(tweens.is_empty());
}

#[test]
fn untouched_props_stay_untouched() {
    let mut tweens = Tweener::default();
    tweens.add(
        "hint",
        Props {
            opacity: Some(0.0),
            y: Some(20.0),
        },
        Tween::new(Props::opacity(1.0), 1.0, 0.0, Ease::Power3Out),
        0.0,
    );
    let (_, props) = tweens.tick(0.5)[0];
    assert!(props.y.is_none());
    assert!(props.opacity.unwrap() > 0.5);
}
