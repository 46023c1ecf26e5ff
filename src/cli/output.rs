//! Colored terminal output for publish runs

use std::io::Write;
use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    verbose: bool,
    quiet: bool,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self::new(self.verbose, self.quiet)
    }
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
            verbose,
            quiet,
        }
    }

    /// Write `symbol message` with the symbol (and optionally the text) colored
    fn tagged(&self, symbol: Symbol, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        write_tagged(&mut buffer, symbol, message)?;
        self.bufwtr.print(&buffer)
    }

    /// Print an info message
    pub fn info(&self, message: &str) -> std::io::Result<()> {
        self.tagged(Symbol::new("ℹ", Color::Cyan), message)
    }

    /// Print a success message
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.tagged(Symbol::new("✓", Color::Green).bold(), message)
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.tagged(
            Symbol::new("⚠", Color::Yellow).bold().text(Color::Yellow),
            message,
        )
    }

    /// Print an error message to stderr (shown even in quiet mode)
    pub fn error(&self, message: &str) {
        let bufwtr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();

        let written = write_tagged(
            &mut buffer,
            Symbol::new("✗", Color::Red).bold().text(Color::Red),
            message,
        )
        .and_then(|()| bufwtr.print(&buffer));

        if written.is_err() {
            println!("[STDERR ERROR] ✗ {}", message);
        }
    }

    /// Print a detail message (only in verbose mode)
    pub fn verbose(&self, message: &str) -> std::io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        self.tagged(Symbol::new("→", Color::Blue).text(Color::White), message)
    }

    /// Print a section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        writeln!(&mut buffer)?;
        buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        writeln!(&mut buffer, "═══ {} ═══", title)?;
        buffer.reset()?;
        self.bufwtr.print(&buffer)
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.println(&format!("    {}", message))
    }

    /// Print a plain message (respects quiet mode)
    pub fn println(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        writeln!(&mut buffer, "{}", message)?;
        self.bufwtr.print(&buffer)
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

/// Leading status symbol and its colors
#[derive(Debug, Clone)]
struct Symbol {
    glyph: &'static str,
    color: Color,
    bold: bool,
    text: Option<Color>,
}

impl Symbol {
    fn new(glyph: &'static str, color: Color) -> Self {
        Self {
            glyph,
            color,
            bold: false,
            text: None,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn text(mut self, color: Color) -> Self {
        self.text = Some(color);
        self
    }
}

fn write_tagged(buffer: &mut Buffer, symbol: Symbol, message: &str) -> std::io::Result<()> {
    buffer.set_color(ColorSpec::new().set_fg(Some(symbol.color)).set_bold(symbol.bold))?;
    write!(buffer, "{}", symbol.glyph)?;
    buffer.reset()?;
    if let Some(color) = symbol.text {
        buffer.set_color(ColorSpec::new().set_fg(Some(color)))?;
    }
    writeln!(buffer, " {}", message)?;
    buffer.reset()
}
