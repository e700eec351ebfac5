//! Sample display

use std::fmt::Write as _;
use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

use scribe_core::{ScribeError, ScribeResult};
use scribe_kinematics::Sample;

const RULE_WIDTH: usize = 40;

/// How samples are written out
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    /// Clear the screen and redraw each frame
    Terminal,
    /// Frames written one after another
    Plain,
    /// One JSON object per line
    JsonLines,
}

/// Render a sample as a text frame
pub fn render(sample: &Sample) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "Joint angles relative to home:");
    for (axis, degrees) in sample.angles.iter() {
        let label = format!("{}:", axis.label());
        let _ = writeln!(
            out,
            "  {:<19}{:7.2}\u{b0} ({})",
            label, degrees, sample.reading[axis]
        );
    }
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Probe tip position:");
    let _ = writeln!(out, "  X: {:7.2} mm", sample.pose.x);
    let _ = writeln!(out, "  Y: {:7.2} mm", sample.pose.y);
    let _ = writeln!(out, "  Z: {:7.2} mm", sample.pose.z);
    let _ = writeln!(out, "{}", rule);
    out
}

/// Writes samples to an output stream
pub struct Display<W: Write> {
    mode: DisplayMode,
    out: W,
}

impl Display<io::Stdout> {
    pub fn stdout(mode: DisplayMode) -> Self {
        Self::new(mode, io::stdout())
    }
}

impl<W: Write> Display<W> {
    pub fn new(mode: DisplayMode, out: W) -> Self {
        Display { mode, out }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn show(&mut self, sample: &Sample) -> ScribeResult<()> {
        self.write_sample(sample).map_err(|e| ScribeError::Transport(e.to_string()))
    }

    fn write_sample(&mut self, sample: &Sample) -> io::Result<()> {
        match self.mode {
            DisplayMode::Terminal => {
                queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
                self.out.write_all(render(sample).as_bytes())?;
            }
            DisplayMode::Plain => {
                self.out.write_all(render(sample).as_bytes())?;
            }
            DisplayMode::JsonLines => {
                serde_json::to_writer(&mut self.out, sample)?;
                self.out.write_all(b"\n")?;
            }
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
