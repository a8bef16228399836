use super::*;
use crate::foundation::core::Rgba8Premul;
use std::time::Duration;

#[derive(Debug)]
struct Counter {
    base: NodeBase,
    calls: u8,
    natural: Size,
}

impl Counter {
    fn new(interval_ms: Option<i64>) -> Self {
        Self {
            base: NodeBase::new(None, None, interval_ms),
            calls: 0,
            natural: Size::new(3, 2),
        }
    }
}

impl Component for Counter {
    fn kind(&self) -> &'static str {
        "counter"
    }
    fn base(&self) -> &NodeBase {
        &self.base
    }
    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }
    fn init(&mut self, parent: Size) -> BoardResult<()> {
        self.base.resolve(parent, self.natural);
        self.base.arm(0, Instant::now());
        Ok(())
    }
    fn render(&mut self) -> BoardResult<Bitmap> {
        self.calls += 1;
        Ok(Bitmap::filled(
            self.size(),
            Rgba8Premul::opaque(self.calls, 0, 0),
        ))
    }
}

#[test]
fn negative_interval_renders_once_then_reuses() {
    let mut c = Counter::new(Some(-1));
    c.init(Size::new(10, 10)).unwrap();
    let t0 = Instant::now();

    render_or_reuse(&mut c, t0).unwrap();
    let first = c.prev_img().cloned().unwrap();
    for i in 1..5u64 {
        render_or_reuse(&mut c, t0 + Duration::from_secs(i)).unwrap();
        assert_eq!(c.prev_img(), Some(&first));
    }
    assert_eq!(c.calls, 1);
    assert_eq!(c.base().render_count(), 1);
}

#[test]
fn first_pass_renders_before_the_ticker_fires() {
    let mut c = Counter::new(Some(60_000));
    c.init(Size::new(10, 10)).unwrap();
    let now = Instant::now();
    assert!(c.prev_img().is_none());
    render_or_reuse(&mut c, now).unwrap();
    assert_eq!(c.calls, 1);
    assert!(c.prev_img().is_some());

    render_or_reuse(&mut c, now + Duration::from_millis(1)).unwrap();
    assert_eq!(c.calls, 1);
}

#[test]
fn elapsed_interval_rerenders() {
    let mut c = Counter::new(Some(10));
    c.init(Size::new(10, 10)).unwrap();
    let now = Instant::now();
    render_or_reuse(&mut c, now).unwrap();
    render_or_reuse(&mut c, now + Duration::from_millis(50)).unwrap();
    assert_eq!(c.calls, 2);
    assert_eq!(c.prev_img().unwrap().pixel(0, 0), Rgba8Premul::opaque(2, 0, 0));
}

#[test]
fn resolve_prefers_declared_dims() {
    let mut base = NodeBase::new(Some(Dim::Percent(50.0)), None, None);
    let size = base.resolve(Size::new(65, 20), Size::new(4, 7));
    assert_eq!(size, Size::new(32, 7));
}

#[test]
fn stop_without_init_is_safe() {
    let mut c = Counter::new(None);
    c.stop();
    assert_eq!(c.size(), Size::default());
}

#[test]
fn init_clears_the_cached_frame() {
    let mut c = Counter::new(Some(-1));
    c.init(Size::new(4, 4)).unwrap();
    render_or_reuse(&mut c, Instant::now()).unwrap();
    assert!(c.prev_img().is_some());
    c.init(Size::new(4, 4)).unwrap();
    assert!(c.prev_img().is_none());
}
