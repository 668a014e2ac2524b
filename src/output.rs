use std::io::{self, Write};

/// Writes `message` plus a newline to stdout and mirrors it into `writer`.
pub fn println(message: &str, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    print(&format!("{message}\n"), writer)
}

/// Writes `message` verbatim to stdout and mirrors it into `writer`.
pub fn print(message: &str, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    if let Err(e) = write!(io::stdout(), "{message}") {
        eprintln!("Failed to write to stdout: {e}");
    }

    if let Some(w) = writer {
        write!(w, "{message}")?;
    }

    Ok(())
}
