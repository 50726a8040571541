/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::io::{self, BufRead, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, ClearType};
use crossterm::tty::IsTty;
use crossterm::{cursor, queue};

use crate::style::Style;

const ARROW_HINT: &str = "(Use arrow keys)";

/// Lets the user choose one bucket out of a list.
pub(crate) trait BucketPicker {
    /// Show `prompt` and `buckets`, returning the chosen bucket name.
    fn pick(&mut self, prompt: &str, buckets: &[String]) -> io::Result<String>;
}

/// The arrow key menu when stdin and stderr are a terminal, a numbered prompt otherwise.
pub(crate) fn for_terminal() -> Box<dyn BucketPicker> {
    if io::stdin().is_tty() && io::stderr().is_tty() {
        Box::new(ArrowPicker::stderr())
    } else {
        Box::new(PromptPicker::stdio())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Moved,
    Select,
    Cancel,
    Ignore,
}

/// Highlighted row of an arrow key menu; wraps around at both ends.
#[derive(Debug)]
struct Menu {
    selected: usize,
    len: usize,
}

impl Menu {
    fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    fn handle(&mut self, key: KeyEvent) -> MenuAction {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                MenuAction::Cancel
            }
            KeyCode::Esc => MenuAction::Cancel,
            KeyCode::Enter => MenuAction::Select,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = (self.selected + self.len - 1) % self.len;
                MenuAction::Moved
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1) % self.len;
                MenuAction::Moved
            }
            KeyCode::Home => {
                self.selected = 0;
                MenuAction::Moved
            }
            KeyCode::End => {
                self.selected = self.len - 1;
                MenuAction::Moved
            }
            _ => MenuAction::Ignore,
        }
    }
}

/// Leaves raw mode when dropped.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            tracing::warn!("unable to leave raw terminal mode: {err}");
        }
    }
}

/// Menu driven by Up/Down/Enter key events in raw mode.
#[derive(Debug)]
pub(crate) struct ArrowPicker<W> {
    output: W,
    style: Style,
}

impl ArrowPicker<io::Stderr> {
    pub(crate) fn stderr() -> Self {
        Self {
            output: io::stderr(),
            style: Style::stderr(),
        }
    }
}

impl<W: Write> ArrowPicker<W> {
    // raw mode needs explicit carriage returns
    fn render(&mut self, prompt: &str, buckets: &[String], menu: &Menu) -> io::Result<()> {
        queue!(
            self.output,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::FromCursorDown)
        )?;
        write!(self.output, "{prompt} {}\r\n", self.style.dim(ARROW_HINT))?;
        for (idx, bucket) in buckets.iter().enumerate() {
            if idx == menu.selected {
                write!(self.output, "{}\r\n", self.style.highlight(format_args!("> {bucket}")))?;
            } else {
                write!(self.output, "  {bucket}\r\n")?;
            }
        }
        self.output.flush()
    }

    fn rewind(&mut self, lines: usize) -> io::Result<()> {
        let lines = u16::try_from(lines).unwrap_or(u16::MAX);
        queue!(self.output, cursor::MoveToPreviousLine(lines))
    }

    fn select(&mut self, prompt: &str, buckets: &[String]) -> io::Result<String> {
        let lines = buckets.len() + 1;
        let mut menu = Menu::new(buckets.len());
        self.render(prompt, buckets, &menu)?;

        loop {
            let key = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => key,
                _ => continue,
            };
            match menu.handle(key) {
                MenuAction::Moved => {
                    self.rewind(lines)?;
                    self.render(prompt, buckets, &menu)?;
                }
                MenuAction::Select => return Ok(buckets[menu.selected].clone()),
                MenuAction::Cancel => {
                    return Err(io::Error::new(
                        io::ErrorKind::Interrupted,
                        "bucket selection was cancelled",
                    ))
                }
                MenuAction::Ignore => {}
            }
        }
    }
}

impl<W: Write> BucketPicker for ArrowPicker<W> {
    fn pick(&mut self, prompt: &str, buckets: &[String]) -> io::Result<String> {
        if buckets.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "there are no buckets to choose from",
            ));
        }

        let _raw = RawMode::enable()?;
        queue!(self.output, cursor::Hide)?;
        let result = self.select(prompt, buckets);

        // collapse the menu into a single answered line
        self.rewind(buckets.len() + 1)?;
        queue!(
            self.output,
            terminal::Clear(ClearType::FromCursorDown),
            cursor::Show
        )?;
        if let Ok(bucket) = &result {
            write!(self.output, "{prompt} {}\r\n", self.style.highlight(bucket))?;
        }
        self.output.flush()?;
        result
    }
}

/// Numbered menu read from a line based input.
#[derive(Debug)]
pub(crate) struct PromptPicker<R, W> {
    input: R,
    output: W,
}

impl PromptPicker<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr and read the selection from stdin
    pub(crate) fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> PromptPicker<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_choice<'a>(&mut self, buckets: &'a [String]) -> io::Result<Option<&'a String>> {
        write!(self.output, "> ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no bucket was selected",
            ));
        }

        let answer = line.trim();
        let by_index = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| buckets.get(idx));
        Ok(by_index.or_else(|| buckets.iter().find(|b| b.as_str() == answer)))
    }
}

impl<R: BufRead, W: Write> BucketPicker for PromptPicker<R, W> {
    fn pick(&mut self, prompt: &str, buckets: &[String]) -> io::Result<String> {
        if buckets.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "there are no buckets to choose from",
            ));
        }

        writeln!(self.output, "{prompt}")?;
        for (idx, bucket) in buckets.iter().enumerate() {
            writeln!(self.output, "  {:>2}) {bucket}", idx + 1)?;
        }

        loop {
            if let Some(bucket) = self.read_choice(buckets)? {
                return Ok(bucket.clone());
            }
            writeln!(
                self.output,
                "Enter a number between 1 and {} or a bucket name.",
                buckets.len()
            )?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn buckets() -> Vec<String> {
        vec!["alpha".to_owned(), "beta".to_owned(), "gamma".to_owned()]
    }

    fn pick_with_input(input: &str) -> (io::Result<String>, String) {
        let mut output = Vec::new();
        let result = {
            let mut picker = PromptPicker::new(Cursor::new(input.as_bytes()), &mut output);
            picker.pick("Choose a bucket to export:", &buckets())
        };
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_pick_by_number() {
        let (result, output) = pick_with_input("2\n");
        assert_eq!("beta", result.unwrap());
        assert!(output.starts_with("Choose a bucket to export:\n"), "{output}");
        assert!(output.contains("   1) alpha"), "{output}");
        assert!(output.contains("   3) gamma"), "{output}");
    }

    #[test]
    fn test_pick_by_name() {
        let (result, _) = pick_with_input("gamma\n");
        assert_eq!("gamma", result.unwrap());
    }

    #[test]
    fn test_invalid_choice_reprompts() {
        let (result, output) = pick_with_input("0\n4\nnope\n1\n");
        assert_eq!("alpha", result.unwrap());
        assert_eq!(3, output.matches("Enter a number between 1 and 3").count());
    }

    #[test]
    fn test_end_of_input() {
        let (result, _) = pick_with_input("");
        assert_eq!(io::ErrorKind::UnexpectedEof, result.unwrap_err().kind());
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_menu_moves_and_wraps() {
        let mut menu = Menu::new(3);
        assert_eq!(MenuAction::Moved, menu.handle(key(KeyCode::Down)));
        assert_eq!(1, menu.selected);
        menu.handle(key(KeyCode::Down));
        menu.handle(key(KeyCode::Down));
        assert_eq!(0, menu.selected);

        assert_eq!(MenuAction::Moved, menu.handle(key(KeyCode::Up)));
        assert_eq!(2, menu.selected);
        menu.handle(key(KeyCode::Char('k')));
        assert_eq!(1, menu.selected);

        menu.handle(key(KeyCode::End));
        assert_eq!(2, menu.selected);
        menu.handle(key(KeyCode::Home));
        assert_eq!(0, menu.selected);
    }

    #[test]
    fn test_menu_select_and_cancel() {
        let mut menu = Menu::new(2);
        assert_eq!(MenuAction::Ignore, menu.handle(key(KeyCode::Char('x'))));
        assert_eq!(MenuAction::Select, menu.handle(key(KeyCode::Enter)));
        assert_eq!(MenuAction::Cancel, menu.handle(key(KeyCode::Esc)));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(MenuAction::Cancel, menu.handle(ctrl_c));
        assert_eq!(0, menu.selected);
    }

    #[test]
    fn test_menu_render_highlights_selection() {
        let mut picker = ArrowPicker {
            output: Vec::new(),
            style: Style::plain(),
        };
        let mut menu = Menu::new(3);
        menu.handle(key(KeyCode::Down));
        picker.render("Choose a bucket to export:", &buckets(), &menu).unwrap();

        let output = String::from_utf8(picker.output).unwrap();
        assert!(
            output.contains("Choose a bucket to export: (Use arrow keys)\r\n"),
            "{output:?}"
        );
        assert!(output.contains("  alpha\r\n"), "{output:?}");
        assert!(output.contains("> beta\r\n"), "{output:?}");
        assert!(output.contains("  gamma\r\n"), "{output:?}");
    }

    #[test]
    fn test_no_buckets() {
        let mut picker = PromptPicker::new(Cursor::new(&b"1\n"[..]), Vec::new());
        let err = picker.pick("Choose:", &[]).unwrap_err();
        assert_eq!(io::ErrorKind::InvalidInput, err.kind());
    }
}
