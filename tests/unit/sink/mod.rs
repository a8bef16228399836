use super::*;
use crate::config::Presentation;
use crate::foundation::core::Canvas;
use crate::pipeline::animation::{FaultPolicy, PipelineOpts};
use crate::view::View;
use std::sync::Arc;

#[derive(Debug)]
struct Green;

impl View for Green {
    fn kind(&self) -> &'static str {
        "green"
    }
    fn template(&self) -> String {
        r##"<template background="#00FF00"/>"##.to_owned()
    }
    fn data(&self) -> serde_json::Map<String, serde_json::Value> {
        serde_json::Map::new()
    }
}

fn running() -> Animation {
    let a = Animation::new(
        PipelineOpts {
            min_frame_delay_ms: 1,
            idle_backoff_ms: 1,
            fault_policy: FaultPolicy::Halt,
            ..PipelineOpts::default()
        },
        Arc::new(Presentation {
            canvas: Canvas::new(6, 3).unwrap(),
            ..Presentation::default()
        }),
    );
    a.install(Arc::new(Green)).unwrap();
    a
}

#[test]
fn drive_fills_an_in_memory_sink() {
    let a = running();
    let mut sink = InMemorySink::new();
    drive(&a, &mut sink, 4).unwrap();
    assert_eq!(
        sink.config(),
        Some(SinkConfig {
            width: 6,
            height: 3
        })
    );
    assert_eq!(sink.frames().len(), 4);
    assert!(sink.is_ended());
    assert!(sink.frames().windows(2).all(|w| w[0].seq < w[1].seq));
}

#[test]
fn png_sequence_writes_numbered_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("frames");
    let a = running();
    let mut sink = PngSequenceSink::new(&out);
    drive(&a, &mut sink, 3).unwrap();
    assert_eq!(sink.written(), 3);
    let img = image::open(out.join("frame_00002.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (6, 3));
    assert_eq!(img.get_pixel(0, 0).0, [0, 255, 0, 255]);
    assert!(!out.join("frame_00003.png").exists());
}
