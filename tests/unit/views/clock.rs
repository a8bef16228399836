use super::*;
use crate::view::refresh::template_context;

fn cfg(v: serde_json::Value) -> ClockConfig {
    serde_json::from_value(v).unwrap()
}

fn markup(v: &dyn View) -> String {
    let ctx = template_context(&Presentation::default(), v.data());
    crate::expand::expand(&v.template(), &ctx).unwrap()
}

#[test]
fn defaults() {
    let c = cfg(serde_json::json!({}));
    assert_eq!(c.format, "%H:%M");
    assert!(!c.show_date);
    let v = c.build(&Presentation::default()).unwrap();
    assert_eq!(v.refresh_interval(), Some(Duration::from_secs(1)));
}

#[test]
fn literal_format_passes_through() {
    let v = cfg(serde_json::json!({"format": "noon"}))
        .build(&Presentation::default())
        .unwrap();
    let m = markup(v.as_ref());
    assert!(m.contains("<text>noon</text>"), "{m}");
    assert_eq!(m.matches("<text>").count(), 1);
}

#[test]
fn show_date_adds_a_line() {
    let v = cfg(serde_json::json!({"show_date": true, "refresh_secs": 5}))
        .build(&Presentation::default())
        .unwrap();
    assert_eq!(markup(v.as_ref()).matches("<text>").count(), 2);
    assert_eq!(v.refresh_interval(), Some(Duration::from_secs(5)));
}

#[test]
fn invalid_format_is_rejected() {
    let err = cfg(serde_json::json!({"format": "%Q"})).build(&Presentation::default());
    assert!(matches!(err, Err(BoardError::Config(_))));
}
