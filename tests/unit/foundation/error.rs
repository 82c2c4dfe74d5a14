use super::*;
use crate::foundation::core::SourcePos;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SlideshowError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SlideshowError::render("x")
            .to_string()
            .contains("render error:")
    );
    let parse = SlideshowError::from(ParseError::ExpectedNumber {
        pos: SourcePos::new(2, 7),
    });
    assert_eq!(
        parse.to_string(),
        "parse error: at 2:7, expected number"
    );
}

#[test]
fn as_parse_exposes_position() {
    let err = SlideshowError::from(ParseError::ScreenNotSet {
        pos: SourcePos::new(4, 1),
    });
    let pos = err.as_parse().unwrap().pos();
    assert_eq!((pos.line, pos.column), (4, 1));
    assert!(SlideshowError::validation("x").as_parse().is_none());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SlideshowError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
