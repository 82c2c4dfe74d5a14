use super::*;

fn el(path: &str, start: f64, duration: f64) -> SlideElement {
    SlideElement {
        start,
        duration,
        ..SlideElement::new(ElementKind::Image, path)
    }
}

#[test]
fn defaults_match_block_form() {
    let e = SlideElement::new(ElementKind::Image, "a.jpg");
    assert_eq!(e.position, Vec2::ZERO);
    assert_eq!(e.size, Vec2::ZERO);
    assert_eq!(e.start, 0.0);
    assert_eq!(e.duration, 5.0);
    assert_eq!(e.fade_in, 1.0);
    assert_eq!(e.fade_out, 1.0);
}

#[test]
fn declared_order_is_reversed() {
    let show = Slideshow::from_declared(
        ScreenSize::new(1.0, 1.0),
        vec![el("first", 0.0, 1.0), el("second", 0.0, 1.0)],
    );
    let paths: Vec<_> = show.elements().iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, ["second", "first"]);
}

#[test]
fn total_duration_is_latest_end() {
    let show = Slideshow::from_declared(
        ScreenSize::new(1.0, 1.0),
        vec![el("a", 0.0, 4.0), el("b", 10.0, 2.5), el("c", 3.0, 1.0)],
    );
    assert_eq!(show.total_duration(), 12.5);
}

#[test]
fn total_duration_has_a_floor() {
    let empty = Slideshow::from_declared(ScreenSize::new(1.0, 1.0), vec![]);
    assert!(empty.is_empty());
    assert_eq!(empty.total_duration(), MIN_TOTAL_DURATION);

    let short = total_duration_of(&[el("a", 0.0, 0.25)]);
    assert_eq!(short, MIN_TOTAL_DURATION);
}

#[test]
fn validate_flags_unusable_timing() {
    let ok = SlideElement::new(ElementKind::Image, "a.jpg");
    assert!(ok.validate().is_ok());

    let zero = SlideElement {
        duration: 0.0,
        ..ok.clone()
    };
    assert!(zero.validate().unwrap_err().to_string().contains("duration"));

    let negative_fade = SlideElement {
        fade_out: -1.0,
        ..ok.clone()
    };
    assert!(negative_fade.validate().unwrap_err().to_string().contains("fade_out"));

    let unnamed = SlideElement::new(ElementKind::Slide, " ");
    assert!(unnamed.validate().is_err());
}
