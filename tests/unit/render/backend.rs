use super::*;
use crate::composition::model::ElementKind;
use crate::eval::opacity::DeviceRect;
use crate::foundation::core::Vec2;

fn draw(path: &str) -> DrawInstruction {
    let device = DeviceRect::from_normalized(Vec2::ZERO, Vec2::new(1.0, 1.0));
    DrawInstruction {
        layer: 0,
        kind: ElementKind::Image,
        path: path.to_string(),
        position: Vec2::ZERO,
        size: Vec2::new(1.0, 1.0),
        device,
        transform: device.model_transform(),
        opacity: 1.0,
    }
}

#[test]
fn handles_are_unique_and_released() {
    let mut r = HeadlessRenderer::new();
    let a = r
        .load_element(&SlideElement::new(ElementKind::Image, "a.jpg"))
        .unwrap();
    let b = r
        .load_element(&SlideElement::new(ElementKind::Image, "b.jpg"))
        .unwrap();
    assert_ne!(a, b);
    assert_eq!(r.live_handles(), 2);
    assert_eq!(r.path_of(b), Some("b.jpg"));

    r.release_element(a);
    r.release_element(a);
    assert_eq!(r.live_handles(), 1);
    assert_eq!(r.path_of(a), None);
}

#[test]
fn frame_protocol_is_enforced() {
    let mut r = HeadlessRenderer::new();
    let h = r
        .load_element(&SlideElement::new(ElementKind::Image, "a.jpg"))
        .unwrap();

    assert!(r.draw_element(h, draw("a.jpg")).is_err());
    assert!(r.end_frame().is_err());

    r.begin_frame(0.0).unwrap();
    assert!(r.begin_frame(0.0).is_err());
    r.draw_element(h, draw("a.jpg")).unwrap();
    assert!(r.draw_element(ElementHandle(99), draw("x.jpg")).is_err());
    r.end_frame().unwrap();

    assert_eq!(r.frames_rendered, 1);
    assert_eq!(r.draws_submitted, 1);
    assert_eq!(r.last_frame.len(), 1);
}

#[test]
fn verifying_renderer_rejects_missing_images() {
    let mut r = HeadlessRenderer::verifying_images();
    let err = r
        .load_element(&SlideElement::new(
            ElementKind::Image,
            "target/definitely-missing.jpg",
        ))
        .unwrap_err();
    assert!(matches!(err, SlideshowError::Render(_)));
    assert_eq!(r.live_handles(), 0);
}

#[test]
fn verifying_renderer_reads_real_images() {
    let dir = std::path::PathBuf::from("target").join("headless_renderer");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("tiny.png");
    image::RgbaImage::new(3, 2).save(&path).unwrap();

    let mut r = HeadlessRenderer::verifying_images();
    let element = SlideElement::new(ElementKind::Image, path.to_string_lossy());
    r.load_element(&element).unwrap();
    assert_eq!(r.live_handles(), 1);
}
