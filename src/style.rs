//! Face and override-policy types
//!
//! A `Face` describes how a matched span is rendered: colors plus a few
//! terminal attributes. Bindings carry two faces (base and mouse-hover)
//! and an `OverridePolicy` that says how the base face composes with
//! styling already present on the text.

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// A render face: colors and text attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Face {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
    /// Reverse video (swap fg/bg)
    pub reverse: bool,
}

impl Face {
    /// Create a face with just a foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Create a face with just a background color
    pub fn bg(color: Color) -> Self {
        Self {
            bg: color,
            ..Default::default()
        }
    }

    /// The designated default face for clickable text (link-like)
    pub fn link() -> Self {
        Self::fg(Color::Blue).with_underline()
    }

    /// The designated default mouse-hover face
    pub fn highlight() -> Self {
        Self {
            reverse: true,
            ..Default::default()
        }
    }

    /// Builder: set foreground color
    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Builder: set reverse
    pub fn with_reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Merge two faces, fields of `self` winning over `under`
    ///
    /// Unset colors and attributes fall through to `under`.
    pub fn over(self, under: Face) -> Face {
        Face {
            fg: if self.fg == Color::Default { under.fg } else { self.fg },
            bg: if self.bg == Color::Default { under.bg } else { self.bg },
            bold: self.bold || under.bold,
            italic: self.italic || under.italic,
            underline: self.underline || under.underline,
            reverse: self.reverse || under.reverse,
        }
    }
}

/// How a rule's face composes with styling already on the text
///
/// Applied per regex match by the rendering engine:
/// - `None`: skip the whole match if any position in it is already faced
/// - `Keep`: style only positions that have no face yet
/// - `Prepend`: merge, the rule's face winning
/// - `Append`: merge, the existing face winning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverridePolicy {
    None,
    Keep,
    Prepend,
    #[default]
    Append,
}
