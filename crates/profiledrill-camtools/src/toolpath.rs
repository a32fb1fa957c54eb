//! Drilling toolpath generation
//!
//! Turns one [`ProfileRecord`] into an ordered list of [`ToolpathOp`]s:
//! header, then the TOP, SIDE and OTHER face groups (each after a manual
//! flip of the profile), then the footer. Z=0 is the bottom of the stock;
//! every hole is drilled through to `-overtravel_depth_mm`.

use crate::error::CamToolResult;
use crate::height::HeightResolver;
use profiledrill_core::{
    FaceBucket, FaceGroup, HeightCatalog, HoleSpec, MachineUnits, ProfileRecord, ToolpathConfig,
};
use tracing::debug;

/// Machine home reference returned to by `G28`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeAxes {
    Z,
    XY,
}

/// A single machine operation
#[derive(Debug, Clone, PartialEq)]
pub enum ToolpathOp {
    /// Human readable comment
    Comment(String),
    /// Safe modal state: absolute, feed per minute, no compensation, XY plane
    ModalSetup,
    SelectUnits(MachineUnits),
    /// Return to the machine home reference on the given axes
    ReturnHome(HomeAxes),
    /// Back to absolute distance mode after a homing move
    AbsoluteMode,
    /// Select the first work offset (G54)
    WorkOffset,
    SpindleOn { rpm: u32 },
    SpindleOff,
    CoolantOff,
    RapidMove {
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
    },
    FeedMove { z: f64, feedrate: f64 },
    /// Program stop until the operator resumes
    OperatorPause { message: String },
    ProgramEnd,
    /// Separator between programs in a combined file
    Blank,
}

impl ToolpathOp {
    pub fn rapid_xy(x: f64, y: f64) -> Self {
        Self::RapidMove {
            x: Some(x),
            y: Some(y),
            z: None,
        }
    }

    pub fn rapid_x(x: f64) -> Self {
        Self::RapidMove {
            x: Some(x),
            y: None,
            z: None,
        }
    }

    pub fn rapid_z(z: f64) -> Self {
        Self::RapidMove {
            x: None,
            y: None,
            z: Some(z),
        }
    }
}

/// Generated program for one profile
#[derive(Debug, Clone, PartialEq)]
pub struct DrillProgram {
    pub profile_name: String,
    pub ops: Vec<ToolpathOp>,
}

/// Message shown while the machine waits for a manual flip
pub const FLIP_MESSAGE: &str = "<<< ROTATE PROFILE MANUALLY >>>";

/// Generator for profile drilling programs
#[derive(Debug, Clone)]
pub struct ToolpathGenerator<'a> {
    config: &'a ToolpathConfig,
    heights: HeightResolver<'a>,
}

impl<'a> ToolpathGenerator<'a> {
    /// Create a generator, validating the configuration and the catalog.
    pub fn new(config: &'a ToolpathConfig, catalog: &'a HeightCatalog) -> CamToolResult<Self> {
        config.validate()?;
        catalog.validate()?;
        Ok(Self {
            config,
            heights: HeightResolver::new(catalog),
        })
    }

    /// Generate the program for one profile
    pub fn generate(&self, profile: &ProfileRecord) -> DrillProgram {
        let mut ops = Vec::new();

        self.emit_header(&mut ops, profile);

        let mut first_group = true;
        for group in FaceGroup::ORDER {
            let mut faces: Vec<&FaceBucket> = profile
                .holes_by_face
                .iter()
                .filter(|b| b.label.group() == group && !b.holes.is_empty())
                .collect();
            if faces.is_empty() {
                continue;
            }
            faces.sort_by(|a, b| {
                a.label
                    .row_offset_mm()
                    .total_cmp(&b.label.row_offset_mm())
                    .then_with(|| a.label.to_string().cmp(&b.label.to_string()))
            });

            self.emit_group(&mut ops, profile, group, &faces, first_group);
            first_group = false;
        }

        self.emit_footer(&mut ops);

        debug!("Generated {} operations for profile {}", ops.len(), profile.name);
        DrillProgram {
            profile_name: profile.name.clone(),
            ops,
        }
    }

    /// Generate one self-contained program per profile, in the given order.
    pub fn generate_all(&self, profiles: &[ProfileRecord]) -> Vec<DrillProgram> {
        profiles.iter().map(|p| self.generate(p)).collect()
    }

    /// Concatenate the programs of all profiles, separated by blank markers.
    pub fn generate_batch(&self, profiles: &[ProfileRecord]) -> Vec<ToolpathOp> {
        concat_programs(profiles.iter().map(|p| self.generate(p).ops))
    }

    fn emit_header(&self, ops: &mut Vec<ToolpathOp>, profile: &ProfileRecord) {
        let title = match profile.cross_section_type.as_deref() {
            Some(kind) => format!("{} - {} L={:.1} mm", profile.name, kind, profile.length_mm),
            None => format!("{} - L={:.1} mm", profile.name, profile.length_mm),
        };
        ops.push(ToolpathOp::Comment(title));
        ops.push(ToolpathOp::ModalSetup);
        ops.push(ToolpathOp::SelectUnits(self.config.units));
        ops.push(ToolpathOp::ReturnHome(HomeAxes::Z));
        ops.push(ToolpathOp::AbsoluteMode);
        ops.push(ToolpathOp::WorkOffset);
        ops.push(ToolpathOp::SpindleOn {
            rpm: self.config.spindle_rpm,
        });
    }

    fn emit_group(
        &self,
        ops: &mut Vec<ToolpathOp>,
        profile: &ProfileRecord,
        group: FaceGroup,
        faces: &[&FaceBucket],
        first_group: bool,
    ) {
        let c = self.config;
        let side_height = self.heights.side_height(
            profile.cross_section_type.as_deref(),
            Some(&profile.name),
            group,
        );
        let safe_z = side_height + c.clearance_margin_mm;

        ops.push(ToolpathOp::Comment(format!(
            "OPERATION: {} (height={} -> Zc={})",
            group,
            format_height(side_height),
            format_height(safe_z)
        )));

        if first_group {
            ops.push(ToolpathOp::Comment("Clamp profile".to_string()));
            ops.push(ToolpathOp::rapid_z(safe_z));
        } else {
            ops.push(ToolpathOp::Comment(format!(
                "Rotate profile to {} face",
                group
            )));
            ops.push(ToolpathOp::SpindleOff);
            ops.push(ToolpathOp::rapid_z(c.park_height_mm));
            ops.push(ToolpathOp::OperatorPause {
                message: FLIP_MESSAGE.to_string(),
            });
            ops.push(ToolpathOp::SpindleOn { rpm: c.spindle_rpm });
            ops.push(ToolpathOp::rapid_z(safe_z));
        }

        for face in faces {
            ops.push(ToolpathOp::Comment(format!("ROW: {}", face.label)));
            ops.push(ToolpathOp::rapid_xy(0.0, face.label.row_offset_mm()));

            for (i, hole) in sorted_by_offset(&face.holes).iter().enumerate() {
                ops.push(ToolpathOp::Comment(format!(
                    "HOLE {} dia={}",
                    i + 1,
                    hole.diameter_mm()
                )));
                self.emit_plunge(ops, hole, side_height, safe_z);
            }
        }

        ops.push(ToolpathOp::rapid_xy(0.0, c.clear_y_mm));
    }

    /// Two-phase plunge from travel height: soft feed through the top of the
    /// face, drill feed down to below the stock bottom, then back up.
    fn emit_plunge(&self, ops: &mut Vec<ToolpathOp>, hole: &HoleSpec, side_height: f64, safe_z: f64) {
        let c = self.config;
        let bottom_z = below_zero(c.overtravel_depth_mm);
        let soft_end_z = (side_height - c.soft_zone_depth_mm).max(bottom_z);

        ops.push(ToolpathOp::rapid_x(hole.offset_mm()));
        ops.push(ToolpathOp::FeedMove {
            z: soft_end_z,
            feedrate: c.soft_feed,
        });
        ops.push(ToolpathOp::FeedMove {
            z: bottom_z,
            feedrate: c.drill_feed,
        });
        ops.push(ToolpathOp::rapid_z(safe_z));
    }

    fn emit_footer(&self, ops: &mut Vec<ToolpathOp>) {
        ops.push(ToolpathOp::CoolantOff);
        ops.push(ToolpathOp::SpindleOff);
        ops.push(ToolpathOp::ReturnHome(HomeAxes::Z));
        ops.push(ToolpathOp::AbsoluteMode);
        ops.push(ToolpathOp::ReturnHome(HomeAxes::XY));
        ops.push(ToolpathOp::AbsoluteMode);
        ops.push(ToolpathOp::ProgramEnd);
    }
}

/// Joins whole programs into one op list with a blank marker between each pair.
pub fn concat_programs<I>(programs: I) -> Vec<ToolpathOp>
where
    I: IntoIterator<Item = Vec<ToolpathOp>>,
{
    let mut ops = Vec::new();
    for (i, program) in programs.into_iter().enumerate() {
        if i > 0 {
            ops.push(ToolpathOp::Blank);
        }
        ops.extend(program);
    }
    ops
}

/// Height for comments: three decimals at most, trailing zeros trimmed.
fn format_height(value: f64) -> String {
    let text = format!("{:.3}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Holes ordered by offset; equal offsets keep spreadsheet order.
fn sorted_by_offset(holes: &[HoleSpec]) -> Vec<HoleSpec> {
    let mut sorted = holes.to_vec();
    sorted.sort_by(|a, b| a.offset_mm().total_cmp(&b.offset_mm()));
    sorted
}

/// Z below the stock bottom, without producing a negative zero.
fn below_zero(depth_mm: f64) -> f64 {
    if depth_mm == 0.0 {
        0.0
    } else {
        -depth_mm
    }
}
