use super::*;

#[test]
fn negative_interval_never_fires() {
    let t0 = Instant::now();
    let mut t = RenderTicker::default();
    t.arm(-1, t0);
    assert!(t.is_armed());
    assert!(!t.poll(t0 + Duration::from_secs(3600)));
}

#[test]
fn zero_interval_uses_default() {
    let t0 = Instant::now();
    let mut t = RenderTicker::default();
    t.arm(0, t0);
    assert_eq!(t.interval(), Some(DEFAULT_RENDER_INTERVAL));
    assert!(!t.poll(t0));
    assert!(t.poll(t0 + DEFAULT_RENDER_INTERVAL));
}

#[test]
fn fires_once_per_deadline_and_reschedules() {
    let t0 = Instant::now();
    let mut t = RenderTicker::default();
    t.arm(10, t0);
    let later = t0 + Duration::from_millis(35);
    assert!(t.poll(later));
    assert!(!t.poll(later));
    assert!(t.poll(later + Duration::from_millis(10)));
}

#[test]
fn stop_disarms_and_is_safe_without_arm() {
    let mut t = RenderTicker::default();
    t.stop();
    assert!(!t.is_armed());
    t.arm(5, Instant::now());
    t.stop();
    assert!(!t.poll(Instant::now() + Duration::from_secs(1)));
}
