use anyhow::{Result, bail};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

const DEFAULT_HL_COLOR: Color = Color::Indexed(130);

#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Raw(Box<str>),
    Hl(Box<str>),
}

impl Fragment {
    #[inline]
    pub fn raw<S: Into<Box<str>>>(s: S) -> Self {
        Self::Raw(s.into())
    }

    #[inline]
    pub fn hl<S: Into<Box<str>>>(s: S) -> Self {
        Self::Hl(s.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shortcut {
    parts: Vec<Fragment>,
}

impl Shortcut {
    pub fn new(parts: Vec<Fragment>) -> Self {
        Self { parts }
    }

    /// Creates a `Shortcut` from `s`, highlighting the character at `hl_idx`.
    ///
    /// # Notes
    /// - **ASCII-only**: treats `hl_idx` as both byte and char index (single-byte chars).
    pub fn from<S: AsRef<str>>(s: S, hl_idx: usize) -> Result<Self> {
        let text = s.as_ref();
        if !text.is_ascii() {
            bail!("Shortcut::from expects ASCII text");
        }
        let len = text.len();
        if hl_idx >= len {
            bail!("hl_idx {} is out of bounds for string of length {}", hl_idx, len);
        }

        let pivot = hl_idx + 1;
        let mut parts = Vec::with_capacity(3);
        if hl_idx > 0 {
            parts.push(Fragment::raw(&text[..hl_idx]));
        }
        parts.push(Fragment::hl(&text[hl_idx..pivot]));
        if pivot < len {
            parts.push(Fragment::raw(&text[pivot..]));
        }

        Ok(Self::new(parts))
    }

    pub fn spans(&'_ self, hl_style: Option<Style>) -> Vec<Span<'_>> {
        let hl_style = hl_style.unwrap_or(Style::default().fg(DEFAULT_HL_COLOR));
        self.parts
            .iter()
            .map(|v| match v {
                Fragment::Raw(s) if !s.is_empty() => Span::raw(s.as_ref()),
                Fragment::Hl(s) if !s.is_empty() => Span::styled(s.as_ref(), hl_style),
                _ => Span::raw(""),
            })
            .collect()
    }
}

/// Converts this `Shortcut` into a [`Line`],
/// using the default highlight color [DEFAULT_HL_COLOR].
impl<'a> From<Shortcut> for Line<'a> {
    fn from(value: Shortcut) -> Self {
        let spans: Vec<Span<'static>> = value
            .parts
            .into_iter()
            .map(|v| match v {
                Fragment::Raw(s) if !s.is_empty() => Span::raw(s.into_string()),
                Fragment::Hl(s) if !s.is_empty() => {
                    Span::styled(s.into_string(), Style::default().fg(DEFAULT_HL_COLOR))
                }
                _ => Span::raw(""),
            })
            .collect();
        Line::from(spans)
    }
}
