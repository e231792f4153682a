//! Core types for the traffic dashboard
//!
//! These are standalone types that don't depend on Bevy.

use std::fmt;
use std::time::Duration;

/// Unique identifier for an incident
///
/// Derived from the simulated creation time in milliseconds, bumped past the
/// previous id when two incidents are created within the same millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IncidentId(pub u64);

impl fmt::Display for IncidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A 3D position in scene space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Read the coordinate along an axis of travel
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Z => self.z,
        }
    }

    /// Mutable access to the coordinate along an axis of travel
    pub fn along_mut(&mut self, axis: Axis) -> &mut f32 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Z => &mut self.z,
        }
    }
}

/// Ground-plane axis a vehicle travels along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Z,
}

/// A plain RGB color, stored as 0xRRGGBB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u32);

impl Rgb {
    pub fn red(&self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    pub fn green(&self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    pub fn blue(&self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Channels as floats in 0..=1, for renderers that want sRGB floats
    pub fn to_f32(&self) -> [f32; 3] {
        [
            self.red() as f32 / 255.0,
            self.green() as f32 / 255.0,
            self.blue() as f32 / 255.0,
        ]
    }

    pub fn hex(&self) -> String {
        format!("#{:06x}", self.0)
    }
}

/// How bad an incident is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    /// Background band a display sink paints behind an incident row
    pub fn band(&self) -> Rgb {
        match self {
            Severity::High => SEVERITY_HIGH_BAND,
            Severity::Medium => SEVERITY_MEDIUM_BAND,
            Severity::Low => SEVERITY_LOW_BAND,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What kind of incident was reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncidentCategory {
    Accident,
    Breakdown,
    Obstruction,
}

impl IncidentCategory {
    pub const ALL: [IncidentCategory; 3] = [
        IncidentCategory::Accident,
        IncidentCategory::Breakdown,
        IncidentCategory::Obstruction,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IncidentCategory::Accident => "Accident",
            IncidentCategory::Breakdown => "Breakdown",
            IncidentCategory::Obstruction => "Obstruction",
        }
    }
}

impl fmt::Display for IncidentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Status label shown above the incident list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficStatus {
    /// No incidents on record
    Normal,
    /// At least one incident on record
    Congested,
    /// Emergency services were just alerted (transient override)
    Alerted,
}

impl TrafficStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TrafficStatus::Normal => "✅ Normal Flow",
            TrafficStatus::Congested => "⚠️ Congestion Detected",
            TrafficStatus::Alerted => "🚨 Emergency services alerted!",
        }
    }
}

impl fmt::Display for TrafficStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Format a simulated timestamp as `HH:MM:SS`
pub fn clock_label(at: Duration) -> String {
    let secs = at.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        (secs / 3600) % 24,
        (secs / 60) % 60,
        secs % 60
    )
}

/// How long an incident stays on the register
pub const INCIDENT_TTL: Duration = Duration::from_secs(20);

/// How long the alert override supersedes the derived status
pub const ALERT_DURATION: Duration = Duration::from_secs(3);

pub const SEVERITY_HIGH_BAND: Rgb = Rgb(0xfee2e2);
pub const SEVERITY_MEDIUM_BAND: Rgb = Rgb(0xfef9c3);
pub const SEVERITY_LOW_BAND: Rgb = Rgb(0xdcfce7);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_bands_match_display_contract() {
        assert_eq!(Severity::High.band().hex(), "#fee2e2");
        assert_eq!(Severity::Medium.band().hex(), "#fef9c3");
        assert_eq!(Severity::Low.band().hex(), "#dcfce7");
    }

    #[test]
    fn rgb_channels() {
        let color = Rgb(0x111133);
        assert_eq!((color.red(), color.green(), color.blue()), (0x11, 0x11, 0x33));
        assert_eq!(color.to_f32()[2], 0x33 as f32 / 255.0);
    }

    #[test]
    fn clock_label_wraps_hours() {
        assert_eq!(clock_label(Duration::from_secs(0)), "00:00:00");
        assert_eq!(clock_label(Duration::from_millis(3_725_900)), "01:02:05");
        assert_eq!(clock_label(Duration::from_secs(25 * 3600)), "01:00:00");
    }

    #[test]
    fn position_axis_access() {
        let mut pos = Position::new(1.0, 2.0, 3.0);
        assert_eq!(pos.along(Axis::X), 1.0);
        *pos.along_mut(Axis::Z) = 7.0;
        assert_eq!(pos.z, 7.0);
    }
}
