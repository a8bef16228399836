use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
struct Ticking {
    updates: AtomicUsize,
    every: Option<Duration>,
}

impl View for Ticking {
    fn kind(&self) -> &'static str {
        "ticking"
    }
    fn template(&self) -> String {
        r##"<template background="#FF0000"><text>{{ .N }}</text></template>"##.to_owned()
    }
    fn data(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut m = serde_json::Map::new();
        m.insert("N".into(), self.updates.load(Ordering::SeqCst).into());
        m
    }
    fn update(&self) -> BoardResult<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
    fn refresh_interval(&self) -> Option<Duration> {
        self.every
    }
}

fn presentation() -> Arc<Presentation> {
    let mut p = Presentation::default();
    p.canvas = crate::foundation::core::Canvas::new(16, 8).unwrap();
    Arc::new(p)
}

#[test]
fn slot_publish_returns_the_previous_tree() {
    let slot = TemplateSlot::new();
    assert!(slot.current().is_none());
    assert!(slot.publish(Template::new()).is_none());
    let first = slot.current().unwrap();
    let old = slot.publish(Template::new()).unwrap();
    assert!(Arc::ptr_eq(&first, &old));
    assert!(slot.take().is_some());
    assert!(slot.current().is_none());
}

#[test]
fn uninitialized_handle_renders_blank_canvas() {
    let h = ViewHandle::new(Arc::new(Ticking::default()), presentation());
    let img = h.render_frame(Instant::now()).unwrap();
    assert_eq!(img.size(), crate::foundation::core::Size::new(16, 8));
    assert!(img.data().iter().all(|b| *b == 0));
}

#[test]
fn init_compiles_and_renders_canvas_sized_frames() {
    let view = Arc::new(Ticking::default());
    let h = ViewHandle::new(view.clone(), presentation());
    h.init().unwrap();
    assert_eq!(view.updates.load(Ordering::SeqCst), 1);
    assert_eq!(h.kind(), "ticking");
    let img = h.render_frame(Instant::now()).unwrap();
    assert_eq!(img.size(), crate::foundation::core::Size::new(16, 8));
    assert_eq!(img.data()[3], 255);

    h.stop();
    assert!(h.slot().current().is_none());
}

#[test]
fn refresher_updates_until_stopped() {
    let view = Arc::new(Ticking {
        every: Some(Duration::from_millis(15)),
        ..Ticking::default()
    });
    let h = ViewHandle::new(view.clone(), presentation());
    h.init().unwrap();
    let first = h.slot().current().unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while view.updates.load(Ordering::SeqCst) < 3 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(view.updates.load(Ordering::SeqCst) >= 3);

    h.stop();
    let after_stop = view.updates.load(Ordering::SeqCst);
    std::thread::sleep(Duration::from_millis(60));
    assert_eq!(view.updates.load(Ordering::SeqCst), after_stop);
    drop(first);
}
