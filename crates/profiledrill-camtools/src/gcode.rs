//! G-code rendering from toolpath operations.
//!
//! Emits the Mach3 dialect, one line per [`ToolpathOp`]. Output is plain
//! ASCII: the multiplication sign in profile types becomes `x`, other
//! characters outside the ASCII range are dropped, and parentheses inside
//! comment text become brackets so the comment stays balanced.

use crate::toolpath::{HomeAxes, ToolpathOp};

/// G-code renderer for drilling programs.
#[derive(Debug, Clone, Copy, Default)]
pub struct GcodeRenderer {
    line_numbers_enabled: bool,
}

impl GcodeRenderer {
    /// Creates a new renderer without line numbers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new renderer with `N` line numbers enabled or disabled.
    pub fn with_line_numbers(enabled: bool) -> Self {
        Self {
            line_numbers_enabled: enabled,
        }
    }

    /// Renders a whole program. Every line, the last one included, ends with
    /// a newline.
    pub fn render(&self, ops: &[ToolpathOp]) -> String {
        let mut gcode = String::new();
        let mut line_number = 10;

        for op in ops {
            let line = render_op(op);
            if self.line_numbers_enabled && !line.is_empty() {
                gcode.push_str(&format!("N{} ", line_number));
                line_number += 10;
            }
            gcode.push_str(&line);
            gcode.push('\n');
        }

        gcode
    }
}

/// Renders a single operation without line number.
pub fn render_op(op: &ToolpathOp) -> String {
    match op {
        ToolpathOp::Comment(text) => format!("({})", sanitize_comment(text)),
        ToolpathOp::ModalSetup => "G90 G94 G91.1 G40 G49 G17".to_string(),
        ToolpathOp::SelectUnits(units) => units.gcode().to_string(),
        ToolpathOp::ReturnHome(HomeAxes::Z) => "G28 G91 Z0.".to_string(),
        ToolpathOp::ReturnHome(HomeAxes::XY) => "G28 G91 X0. Y0.".to_string(),
        ToolpathOp::AbsoluteMode => "G90".to_string(),
        ToolpathOp::WorkOffset => "G54".to_string(),
        ToolpathOp::SpindleOn { rpm } => format!("S{} M3", rpm),
        ToolpathOp::SpindleOff => "M5".to_string(),
        ToolpathOp::CoolantOff => "M9".to_string(),
        ToolpathOp::RapidMove { x, y, z } => {
            let mut line = String::from("G0");
            for (axis, value) in [('X', x), ('Y', y), ('Z', z)] {
                if let Some(v) = value {
                    line.push_str(&format!(" {}{:.3}", axis, v));
                }
            }
            line
        }
        ToolpathOp::FeedMove { z, feedrate } => format!("G1 Z{:.3} F{}", z, feedrate),
        ToolpathOp::OperatorPause { message } => format!("M0 ({})", sanitize_comment(message)),
        ToolpathOp::ProgramEnd => "M30".to_string(),
        ToolpathOp::Blank => String::new(),
    }
}

fn sanitize_comment(text: &str) -> String {
    text.chars()
        .map(|c| if c == '×' { 'x' } else { c })
        .filter(char::is_ascii)
        .filter(|c| !c.is_ascii_control())
        .map(|c| match c {
            '(' => '[',
            ')' => ']',
            other => other,
        })
        .collect()
}
