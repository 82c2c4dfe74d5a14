//! Slideshow configuration grammar.
//!
//! ```text
//! file       := (ws-nl directive)*
//! directive  := "screen" "=" vec2
//!             | "imageDir" "=" string
//!             | "captionDir" "=" string
//!             | "image" (block | pair)
//!             | "customimage" block
//!             | "slide" string float
//!             | <any other character>            skipped
//! block      := string ws-nl "{" (key "=" value)* "}" ws "\n"
//! pair       := float vec2 cell cell
//! ```
//!
//! Unknown text between directives is skipped one character at a time, but
//! an unknown key inside a block is fatal.

use std::path::Path;

use anyhow::Context as _;

use crate::{
    composition::model::{ElementKind, SlideElement, Slideshow},
    config::cursor::{AssignmentTerminator, Cursor},
    config::error::{ParseError, ParseResult},
    foundation::core::{ScreenSize, SourcePos, Vec2},
    foundation::error::SlideshowResult,
};

/// Seconds added to a `slide` for its fade-in and fade-out.
const SLIDE_FADE_PADDING: f64 = 2.0;
const PAIR_DURATION: f64 = 12.0;
/// Sentinel picture number selecting the `last` artwork of a numbered pair.
const PAIR_LAST_NUMBER: i64 = 99;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseOptions {
    pub terminator: AssignmentTerminator,
}

impl ParseOptions {
    pub fn strict_newlines() -> Self {
        Self {
            terminator: AssignmentTerminator::RequireNewline,
        }
    }
}

/// Parses configuration text with default options.
pub fn parse_str(src: &str) -> ParseResult<Slideshow> {
    parse_str_with(src, ParseOptions::default())
}

#[tracing::instrument(skip(src), fields(bytes = src.len()))]
pub fn parse_str_with(src: &str, opts: ParseOptions) -> ParseResult<Slideshow> {
    let mut parser = ShowParser::new(src, opts);
    parser.run()?;
    parser.finish()
}

/// Reads and parses a configuration file.
pub fn parse_file(path: &Path, opts: ParseOptions) -> SlideshowResult<Slideshow> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read slideshow config '{}'", path.display()))?;
    Ok(parse_str_with(&text, opts)?)
}

struct ShowParser<'a> {
    cursor: Cursor<'a>,
    opts: ParseOptions,
    screen: Option<ScreenSize>,
    image_dir: String,
    caption_dir: String,
    /// Start time handed to the next auto-sequenced element.
    sequence_start: f64,
    /// 1-based counter used in numbered pair file names.
    pair_index: u32,
    declared: Vec<SlideElement>,
}

impl<'a> ShowParser<'a> {
    fn new(src: &'a str, opts: ParseOptions) -> Self {
        Self {
            cursor: Cursor::new(src),
            opts,
            screen: None,
            image_dir: String::new(),
            caption_dir: String::new(),
            sequence_start: 0.0,
            pair_index: 1,
            declared: Vec::new(),
        }
    }

    fn run(&mut self) -> ParseResult<()> {
        loop {
            self.cursor.skip_whitespace(true);
            if self.cursor.at_end() {
                return Ok(());
            }

            let at = self.cursor.pos();
            if self.cursor.try_consume_word("screen") {
                self.screen_directive(at)?;
            } else if self.cursor.try_consume_word("imageDir") {
                self.image_dir = self.cursor.read_assigned_string()?;
                tracing::debug!(dir = %self.image_dir, "image directory");
            } else if self.cursor.try_consume_word("captionDir") {
                self.caption_dir = self.cursor.read_assigned_string()?;
                tracing::debug!(dir = %self.caption_dir, "caption directory");
            } else if self.cursor.try_consume_word("slide") {
                self.slide(at)?;
            } else if self.cursor.try_consume_word("image") {
                self.image(at)?;
            } else if self.cursor.try_consume_word("customimage") {
                let screen = self.require_screen(at)?;
                self.image_block(screen, at)?;
            } else {
                self.cursor.advance()?;
            }
        }
    }

    fn finish(self) -> ParseResult<Slideshow> {
        let screen = match self.screen {
            Some(screen) => screen,
            None => {
                return Err(ParseError::ScreenNotSet {
                    pos: self.cursor.pos(),
                });
            }
        };
        let show = Slideshow::from_declared(screen, self.declared);
        tracing::info!(
            elements = show.len(),
            total_duration = show.total_duration(),
            "parsed slideshow"
        );
        Ok(show)
    }

    fn screen_directive(&mut self, at: SourcePos) -> ParseResult<()> {
        if self.screen.is_some() {
            return Err(ParseError::DuplicateScreen { pos: at });
        }
        let raw = self.cursor.read_assigned_vec2(self.opts.terminator)?;
        let screen = ScreenSize::new(raw.x, raw.y);
        if !screen.is_usable() {
            return Err(ParseError::InvalidScreen {
                width: raw.x,
                height: raw.y,
                pos: at,
            });
        }
        tracing::debug!(width = screen.width, height = screen.height, "screen");
        self.screen = Some(screen);
        Ok(())
    }

    fn require_screen(&self, at: SourcePos) -> ParseResult<ScreenSize> {
        self.screen.ok_or(ParseError::ScreenNotSet { pos: at })
    }

    fn image(&mut self, at: SourcePos) -> ParseResult<()> {
        let screen = self.require_screen(at)?;
        self.cursor.skip_whitespace(false);
        match self.cursor.peek() {
            b'"' => self.image_block(screen, at),
            b'-' | b'0'..=b'9' => self.numbered_pair(screen, at),
            _ => Err(ParseError::ExpectedToken {
                expected: "\"".to_string(),
                pos: self.cursor.pos(),
            }),
        }
    }

    fn image_block(&mut self, screen: ScreenSize, at: SourcePos) -> ParseResult<()> {
        self.cursor.skip_whitespace(false);
        let file = self.cursor.read_quoted_string()?;
        self.cursor.skip_whitespace(true);
        self.cursor.expect("{")?;

        let mut element = SlideElement::new(ElementKind::Image, format!("{}{file}", self.image_dir));
        element.declared_at = at;
        let mut position = Vec2::ZERO;
        let mut size = Vec2::ZERO;
        let t = self.opts.terminator;

        loop {
            self.cursor.skip_whitespace(true);
            if self.cursor.at_end() {
                return Err(ParseError::UnexpectedEnd {
                    pos: self.cursor.pos(),
                });
            }
            if self.cursor.try_consume_word("}") {
                break;
            }

            let c = &mut self.cursor;
            if c.try_consume_word("position") {
                position = c.read_assigned_vec2(t)?;
            } else if c.try_consume_word("size") {
                size = c.read_assigned_vec2(t)?;
            } else if c.try_consume_word("start") {
                element.start = c.read_assigned_float(t)?;
            } else if c.try_consume_word("duration") {
                element.duration = c.read_assigned_float(t)?;
            } else if c.try_consume_word("fadeIn") {
                element.fade_in = c.read_assigned_float(t)?;
            } else if c.try_consume_word("fadeOut") {
                element.fade_out = c.read_assigned_float(t)?;
            } else {
                return Err(ParseError::UnexpectedToken {
                    found: c.peek_char().unwrap_or('\0'),
                    pos: c.pos(),
                });
            }
        }

        self.cursor.skip_whitespace(false);
        if !self.cursor.at_end() {
            self.cursor.expect("\n")?;
        }

        element.position = screen.normalize(position);
        element.size = screen.normalize(size);
        self.push(element);
        Ok(())
    }

    fn slide(&mut self, at: SourcePos) -> ParseResult<()> {
        let screen = self.require_screen(at)?;
        self.cursor.skip_whitespace(false);
        let file = self.cursor.read_quoted_string()?;
        self.cursor.skip_whitespace(false);
        let secs = self.cursor.read_float()?;

        let element = SlideElement {
            position: screen.normalize(Vec2::new(1.0, 0.0)),
            size: screen.normalize(Vec2::new(4.0, 4.0)),
            start: self.sequence_start,
            duration: (secs + SLIDE_FADE_PADDING).trunc(),
            declared_at: at,
            ..SlideElement::new(ElementKind::Slide, format!("{}{file}", self.image_dir))
        };
        self.sequence_start += element.duration + 1.0;
        self.push(element);
        Ok(())
    }

    /// `image <number> <w>,<h> <cell> <cell>`: a picture plus its caption
    /// card, both sequenced back to back with earlier pairs.
    fn numbered_pair(&mut self, screen: ScreenSize, at: SourcePos) -> ParseResult<()> {
        let number = self.cursor.read_float()?.trunc() as i64;
        self.cursor.skip_whitespace(false);
        let size = self.cursor.read_vec2()?;
        self.cursor.skip_whitespace(false);
        let image_cell = self.read_cell()?;
        self.cursor.skip_whitespace(false);
        let caption_cell = self.read_cell()?;

        let index = self.pair_index;
        self.pair_index += 1;
        let (image_file, caption_file) = if number == PAIR_LAST_NUMBER {
            (format!("{index}-last.jpg"), "Last-C.jpg".to_string())
        } else {
            (format!("{index}-{number}.jpg"), format!("{number}-C.jpg"))
        };

        let timed = |kind, path: String, position: Vec2, size: Vec2| SlideElement {
            position: screen.normalize(position),
            size: screen.normalize(size),
            start: self.sequence_start,
            duration: PAIR_DURATION,
            declared_at: at,
            ..SlideElement::new(kind, path)
        };
        let image = timed(
            ElementKind::Image,
            format!("{}{image_file}", self.image_dir),
            image_cell,
            size,
        );
        let caption = timed(
            ElementKind::Caption,
            format!("{}{caption_file}", self.caption_dir),
            caption_cell,
            Vec2::new(1.0, 1.0),
        );

        self.sequence_start += PAIR_DURATION + 1.0;
        self.push(image);
        self.push(caption);
        Ok(())
    }

    /// Grid cell such as `3b`: 1-based column, then a row letter from `a`.
    fn read_cell(&mut self) -> ParseResult<Vec2> {
        let column = self.cursor.read_float()?.trunc() - 1.0;
        let pos = self.cursor.pos();
        if self.cursor.at_end() {
            return Err(ParseError::UnexpectedEnd { pos });
        }
        let row = self.cursor.peek();
        if !row.is_ascii_lowercase() {
            return Err(ParseError::UnexpectedToken {
                found: self.cursor.peek_char().unwrap_or('\0'),
                pos,
            });
        }
        self.cursor.advance()?;
        Ok(Vec2::new(column, f64::from(row - b'a')))
    }

    fn push(&mut self, element: SlideElement) {
        tracing::debug!(
            path = %element.path,
            kind = ?element.kind,
            start = element.start,
            duration = element.duration,
            "loading element"
        );
        // Accepted as written; such an element may never become visible.
        if let Err(e) = element.validate() {
            tracing::warn!(at = %element.declared_at, "{e}");
        }
        self.declared.push(element);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/parser.rs"]
mod tests;
