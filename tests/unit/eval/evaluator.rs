use super::*;
use crate::composition::builder::{ElementBuilder, SlideshowBuilder};
use crate::foundation::core::ScreenSize;

fn two_layer_show() -> Slideshow {
    SlideshowBuilder::new(ScreenSize::new(2.0, 1.0))
        .element(
            ElementBuilder::image("bottom.jpg")
                .position(0.0, 0.0)
                .size(2.0, 1.0)
                .duration(10.0)
                .fades(0.0, 0.0),
        )
        .element(
            ElementBuilder::image("top.jpg")
                .position(1.0, 0.0)
                .size(1.0, 1.0)
                .start(2.0)
                .duration(4.0),
        )
        .build()
        .unwrap()
}

#[test]
fn hidden_elements_emit_nothing() {
    let show = two_layer_show();
    let frame = Evaluator::eval_frame(&show, 1.0);
    assert_eq!(frame.draws.len(), 1);
    assert_eq!(frame.draws[0].path, "bottom.jpg");
    assert_eq!(frame.draws[0].layer, 1);

    // Exactly at start with a fade-in: opacity 0, so skipped.
    assert_eq!(Evaluator::eval_frame(&show, 2.0).draws.len(), 1);
    assert_eq!(Evaluator::eval_frame(&show, 10.0).draws.len(), 0);
}

#[test]
fn list_order_is_topmost_first_and_paint_order_reverses_it() {
    let show = two_layer_show();
    let frame = Evaluator::eval_frame(&show, 3.0);
    let listed: Vec<_> = frame.draws.iter().map(|d| d.path.as_str()).collect();
    assert_eq!(listed, ["top.jpg", "bottom.jpg"]);

    let painted: Vec<_> = frame.paint_order().map(|d| d.path.as_str()).collect();
    assert_eq!(painted, ["bottom.jpg", "top.jpg"]);
}

#[test]
fn draws_carry_device_space_and_opacity() {
    let show = two_layer_show();
    let frame = Evaluator::eval_frame(&show, 2.5);
    let top = &frame.draws[0];
    assert_eq!(top.layer, 0);
    assert_eq!(top.position, Vec2::new(0.5, 0.0));
    assert_eq!(top.device.origin, Vec2::new(0.0, -1.0));
    assert_eq!(top.device.extent, Vec2::new(1.0, 2.0));
    assert_eq!(top.transform, top.device.model_transform());
    assert!((top.opacity - 0.5).abs() < 1e-12);
}

#[test]
fn frame_serializes_to_json() {
    let show = two_layer_show();
    let json = serde_json::to_value(Evaluator::eval_frame(&show, 3.0)).unwrap();
    assert_eq!(json["frame_time"], 3.0);
    assert_eq!(json["draws"][0]["path"], "top.jpg");
    assert_eq!(json["draws"][0]["kind"], "image");
}
