use crate::foundation::core::SourcePos;

/// Fatal configuration syntax error.
///
/// Every variant carries the position where the parser stopped. Parsing never
/// recovers from one of these: the whole show is rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("at {pos}, screen dimensions have already been set")]
    DuplicateScreen { pos: SourcePos },

    #[error("at {pos}, screen dimensions have not been set, cannot define an image")]
    ScreenNotSet { pos: SourcePos },

    #[error("at {pos}, expected {}", describe_expected(.expected))]
    ExpectedToken { expected: String, pos: SourcePos },

    #[error("at {pos}, expected number")]
    ExpectedNumber { pos: SourcePos },

    #[error("at {pos}, unterminated string, expected '\"'")]
    UnterminatedString { pos: SourcePos },

    #[error("at {pos}, unexpected character {found:?}")]
    UnexpectedToken { found: char, pos: SourcePos },

    #[error("at {pos}, reached end of file")]
    UnexpectedEnd { pos: SourcePos },

    #[error("at {pos}, screen dimensions must be non-zero (got {width}, {height})")]
    InvalidScreen {
        width: f64,
        height: f64,
        pos: SourcePos,
    },
}

impl ParseError {
    pub fn pos(&self) -> SourcePos {
        match self {
            Self::DuplicateScreen { pos }
            | Self::ScreenNotSet { pos }
            | Self::ExpectedToken { pos, .. }
            | Self::ExpectedNumber { pos }
            | Self::UnterminatedString { pos }
            | Self::UnexpectedToken { pos, .. }
            | Self::UnexpectedEnd { pos }
            | Self::InvalidScreen { pos, .. } => *pos,
        }
    }

    pub fn line(&self) -> u32 {
        self.pos().line
    }

    pub fn column(&self) -> u32 {
        self.pos().column
    }
}

// A bare newline would print across two lines.
fn describe_expected(expected: &str) -> String {
    if expected == "\n" {
        "newline".to_string()
    } else {
        format!("'{expected}'")
    }
}

/// Result type of the configuration parser.
pub type ParseResult<T> = Result<T, ParseError>;
