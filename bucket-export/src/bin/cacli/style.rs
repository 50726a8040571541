/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt::Display;

use crossterm::style::{StyledContent, Stylize};
use crossterm::tty::IsTty;

/// Terminal styling for one output stream.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Style {
    color: bool,
}

impl Style {
    pub(crate) fn stdout() -> Self {
        Self::detect(std::io::stdout().is_tty())
    }

    pub(crate) fn stderr() -> Self {
        Self::detect(std::io::stderr().is_tty())
    }

    #[cfg(test)]
    pub(crate) fn plain() -> Self {
        Self { color: false }
    }

    // https://no-color.org
    fn detect(is_tty: bool) -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            color: is_tty && !no_color,
        }
    }

    fn paint<'a>(&self, text: &'a str, styled: fn(&'a str) -> StyledContent<&'a str>) -> String {
        if self.color {
            styled(text).to_string()
        } else {
            text.to_owned()
        }
    }

    pub(crate) fn red(&self, text: &str) -> String {
        self.paint(text, |t| t.red())
    }

    pub(crate) fn green(&self, text: &str) -> String {
        self.paint(text, |t| t.green())
    }

    pub(crate) fn dim(&self, text: &str) -> String {
        self.paint(text, |t| t.dim())
    }

    /// Bold text on the highlighted picker row
    pub(crate) fn highlight(&self, text: impl Display) -> String {
        let text = text.to_string();
        if self.color {
            text.as_str().cyan().bold().to_string()
        } else {
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_style_leaves_text_alone() {
        let style = Style::plain();
        assert_eq!("error", style.red("error"));
        assert_eq!("success", style.green("success"));
        assert_eq!("(hint)", style.dim("(hint)"));
        assert_eq!("> bucket", style.highlight("> bucket"));
    }

    #[test]
    fn test_color_style_wraps_text() {
        let style = Style { color: true };
        for (painted, text) in [
            (style.red("error"), "error"),
            (style.green("success"), "success"),
            (style.dim("(hint)"), "(hint)"),
        ] {
            assert!(painted.starts_with("\x1b["), "{painted:?}");
            assert!(painted.contains(text), "{painted:?}");
            assert_ne!(text, painted);
        }
        assert_ne!(style.red("x"), style.green("x"));
    }
}
