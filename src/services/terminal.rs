//! Terminal side effects standing in for the page title

use std::io::{self, Write};

/// Write the OSC 0 sequence that sets a terminal's window title
pub fn write_title<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    write!(out, "\x1b]0;{}\x07", title)?;
    out.flush()
}

/// Set the title of the terminal on stdout
pub fn set_terminal_title(title: &str) -> io::Result<()> {
    write_title(&mut io::stdout(), title)
}
