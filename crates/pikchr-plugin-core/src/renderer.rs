//! Renderer capability
//!
//! The diagram renderer is an external function. It is injected behind
//! [`DiagramRenderer`] and reports a tagged [`RenderOutcome`] instead of a
//! nullable pointer.

use std::ffi::CStr;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::error::{PluginError, Result};

/// Flag bits understood by pikchr.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RenderFlags(u32);

impl RenderFlags {
    /// Report errors as plain text instead of HTML.
    pub const PLAINTEXT_ERRORS: Self = Self(0x0001);
    /// Render with colors suitable for a dark background.
    pub const DARK_MODE: Self = Self(0x0002);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for RenderFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for RenderFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for RenderFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RenderFlags({:#06x})", self.0)
    }
}

/// Output of a successful renderer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered<T> {
    /// Text bytes of the result, without terminator.
    pub output: T,
    /// Width reported by the renderer (negative when the output is an error document).
    pub width: i32,
    /// Height reported by the renderer.
    pub height: i32,
}

/// Tagged result of a renderer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome<T> {
    /// The renderer produced output; ownership passes to the caller.
    Rendered(Rendered<T>),
    /// The renderer returned its null sentinel.
    Failed,
}

impl<T> RenderOutcome<T> {
    /// Successful outcome without size information.
    pub fn text(output: T) -> Self {
        RenderOutcome::Rendered(Rendered {
            output,
            width: 0,
            height: 0,
        })
    }

    pub fn into_result(self) -> Result<Rendered<T>> {
        match self {
            RenderOutcome::Rendered(rendered) => Ok(rendered),
            RenderOutcome::Failed => Err(PluginError::RenderFailed),
        }
    }
}

/// A function turning diagram markup into output text.
pub trait DiagramRenderer {
    /// Owned output buffer; dropping it releases the renderer's allocation.
    type Output: AsRef<[u8]>;

    /// Render `markup` with the given class label and flags.
    fn render(&mut self, markup: &CStr, class: &CStr, flags: RenderFlags) -> RenderOutcome<Self::Output>;
}

impl<F, T> DiagramRenderer for F
where
    F: FnMut(&CStr, &CStr, RenderFlags) -> RenderOutcome<T>,
    T: AsRef<[u8]>,
{
    type Output = T;

    fn render(&mut self, markup: &CStr, class: &CStr, flags: RenderFlags) -> RenderOutcome<T> {
        self(markup, class, flags)
    }
}
