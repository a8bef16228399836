use super::*;
use crate::view::ViewHandle;

fn build(v: serde_json::Value) -> BoardResult<Arc<dyn View>> {
    serde_json::from_value::<VisualConfig>(v)
        .unwrap()
        .build(&Presentation::default())
}

#[test]
fn every_visual_renders_full_canvas() {
    for kind in VISUALS {
        let h = ViewHandle::new(
            build(serde_json::json!({"kind": kind, "seed": 3, "text": "HI"})).unwrap(),
            Arc::new(Presentation::default()),
        );
        h.init().unwrap();
        let img = h.render_frame(std::time::Instant::now()).unwrap();
        assert_eq!(img.size(), Presentation::default().canvas.size(), "{kind}");
        h.stop();
    }
}

#[test]
fn unknown_visual_is_rejected() {
    assert!(matches!(
        build(serde_json::json!({"kind": "template"})),
        Err(BoardError::Config(_))
    ));
}
