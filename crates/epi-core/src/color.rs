//! Color-mapping policy.
//!
//! Every mapping is a fixed lookup table with an explicit default, so a
//! lookup can never come back empty.  Coverage of the enumerated domains is
//! checked once, by [`ColorMapping::validate`], when an animation is built.
//!
//! | Mapping            | Key                         | Default            |
//! |--------------------|-----------------------------|--------------------|
//! | `status_color`     | statistics column label     | [`UNMAPPED_COLOR`] |
//! | `agent_color`      | `Status` + severity         | [`UNMAPPED_COLOR`] |
//! | `quintile_color`   | quintile label (`Q1`..`Q5`) | [`UNMAPPED_COLOR`] |
//! | `quintile_legend`  | quintile label              | the label itself   |

use std::collections::BTreeMap;
use std::fmt;

use crate::{CoreError, CoreResult, InfectionSeverity, Quintile, Status};

// ── NamedColor ────────────────────────────────────────────────────────────────

/// The fixed palette the pipeline draws with (CSS color names and values).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NamedColor {
    LightBlue,
    Gray,
    LightGreen,
    Black,
    Orange,
    Red,
    White,
    Yellow,
    Green,
    Blue,
    Pink,
    DarkBlue,
    DarkRed,
}

impl NamedColor {
    /// 8-bit RGB components.
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            NamedColor::LightBlue  => (173, 216, 230),
            NamedColor::Gray       => (128, 128, 128),
            NamedColor::LightGreen => (144, 238, 144),
            NamedColor::Black      => (0, 0, 0),
            NamedColor::Orange     => (255, 165, 0),
            NamedColor::Red        => (255, 0, 0),
            NamedColor::White      => (255, 255, 255),
            NamedColor::Yellow     => (255, 255, 0),
            NamedColor::Green      => (0, 128, 0),
            NamedColor::Blue       => (0, 0, 255),
            NamedColor::Pink       => (255, 192, 203),
            NamedColor::DarkBlue   => (0, 0, 139),
            NamedColor::DarkRed    => (139, 0, 0),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            NamedColor::LightBlue  => "lightblue",
            NamedColor::Gray       => "gray",
            NamedColor::LightGreen => "lightgreen",
            NamedColor::Black      => "black",
            NamedColor::Orange     => "orange",
            NamedColor::Red        => "red",
            NamedColor::White      => "white",
            NamedColor::Yellow     => "yellow",
            NamedColor::Green      => "green",
            NamedColor::Blue       => "blue",
            NamedColor::Pink       => "pink",
            NamedColor::DarkBlue   => "darkblue",
            NamedColor::DarkRed    => "darkred",
        }
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Color returned for any value outside a mapping's table.
pub const UNMAPPED_COLOR: NamedColor = NamedColor::White;

/// Column labels that must have a `status_color` entry: the four statuses
/// plus the two severities plotted on the contagion panel.
pub const STATUS_COLUMNS: &[&str] = &[
    "Susceptible",
    "Infected",
    "Recovered_Immune",
    "Death",
    "Hospitalization",
    "Severe",
];

/// Severities an infected agent must have a dedicated color for; every
/// other severity uses the infected fallback.
const INFECTED_SEVERITIES: &[InfectionSeverity] =
    &[InfectionSeverity::Asymptomatic, InfectionSeverity::Hospitalization];

// ── ColorMapping ──────────────────────────────────────────────────────────────

/// All color and legend tables used by the renderers.
///
/// [`ColorMapping::standard`] is the stock palette.  Tables can be edited
/// with the `set_*` methods; call [`validate`][Self::validate] afterwards.
#[derive(Clone, Debug)]
pub struct ColorMapping {
    status:           BTreeMap<String, NamedColor>,
    agent:            BTreeMap<Status, NamedColor>,
    infected:         BTreeMap<InfectionSeverity, NamedColor>,
    infected_other:   Option<NamedColor>,
    quintile:         BTreeMap<Quintile, NamedColor>,
    legend:           BTreeMap<Quintile, String>,
    default:          NamedColor,
}

impl ColorMapping {
    /// Empty tables; every lookup yields `default` until entries are set.
    pub fn empty(default: NamedColor) -> Self {
        Self {
            status:         BTreeMap::new(),
            agent:          BTreeMap::new(),
            infected:       BTreeMap::new(),
            infected_other: None,
            quintile:       BTreeMap::new(),
            legend:         BTreeMap::new(),
            default,
        }
    }

    /// The stock palette.
    pub fn standard() -> Self {
        use NamedColor::*;

        let mut m = Self::empty(UNMAPPED_COLOR);

        for (label, color) in [
            ("Susceptible",      LightBlue),
            ("Infected",         Gray),
            ("Recovered_Immune", LightGreen),
            ("Death",            Black),
            ("Hospitalization",  Orange),
            ("Severe",           Red),
        ] {
            m.set_status_color(label, color);
        }

        m.set_agent_color(Status::Susceptible, LightBlue);
        m.set_agent_color(Status::RecoveredImmune, LightGreen);
        m.set_agent_color(Status::Death, Black);
        m.set_infected_color(InfectionSeverity::Asymptomatic, Gray);
        m.set_infected_color(InfectionSeverity::Hospitalization, Orange);
        m.set_infected_fallback(Red);

        for (q, color, legend) in [
            (Quintile::Q1, Red,    "Most Poor"),
            (Quintile::Q2, Orange, "Poor"),
            (Quintile::Q3, Yellow, "Working Class"),
            (Quintile::Q4, Green,  "Rich"),
            (Quintile::Q5, Blue,   "Most Rich"),
        ] {
            m.set_quintile(q, color, legend);
        }

        m
    }

    // ── Table edits ───────────────────────────────────────────────────────

    pub fn set_status_color(&mut self, label: impl Into<String>, color: NamedColor) {
        self.status.insert(label.into(), color);
    }

    /// Color for a non-infected status.  `Infected` is refined by severity
    /// via [`set_infected_color`][Self::set_infected_color] instead.
    pub fn set_agent_color(&mut self, status: Status, color: NamedColor) {
        self.agent.insert(status, color);
    }

    pub fn set_infected_color(&mut self, severity: InfectionSeverity, color: NamedColor) {
        self.infected.insert(severity, color);
    }

    /// Color for infected agents whose severity has no explicit entry.
    pub fn set_infected_fallback(&mut self, color: NamedColor) {
        self.infected_other = Some(color);
    }

    pub fn set_quintile(&mut self, q: Quintile, color: NamedColor, legend: impl Into<String>) {
        self.quintile.insert(q, color);
        self.legend.insert(q, legend.into());
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// Color of a contagion-panel series, keyed by column label.
    pub fn status_color(&self, label: &str) -> NamedColor {
        self.status.get(label).copied().unwrap_or(self.default)
    }

    /// Color of one agent dot.
    pub fn agent_color(&self, status: Status, severity: InfectionSeverity) -> NamedColor {
        match status {
            Status::Infected => self
                .infected
                .get(&severity)
                .copied()
                .or(self.infected_other)
                .unwrap_or(self.default),
            other => self.agent.get(&other).copied().unwrap_or(self.default),
        }
    }

    /// Color of an economy-panel series, keyed by quintile label.
    pub fn quintile_color(&self, label: &str) -> NamedColor {
        label
            .parse::<Quintile>()
            .ok()
            .and_then(|q| self.quintile.get(&q).copied())
            .unwrap_or(self.default)
    }

    /// Legend text of an economy-panel series.  Unknown labels are shown
    /// as-is.
    pub fn quintile_legend<'a>(&'a self, label: &'a str) -> &'a str {
        label
            .parse::<Quintile>()
            .ok()
            .and_then(|q| self.legend.get(&q))
            .map_or(label, String::as_str)
    }

    /// The default returned for unmapped values.
    pub fn default_color(&self) -> NamedColor {
        self.default
    }

    // ── Validation ────────────────────────────────────────────────────────

    /// Check that every enumerated domain value has its own table entry.
    pub fn validate(&self) -> CoreResult<()> {
        for label in STATUS_COLUMNS {
            if !self.status.contains_key(*label) {
                return Err(unmapped("status_color", label));
            }
        }
        for status in Status::ALL.iter().filter(|s| **s != Status::Infected) {
            if !self.agent.contains_key(status) {
                return Err(unmapped("agent_color", status.label()));
            }
        }
        for severity in INFECTED_SEVERITIES {
            if !self.infected.contains_key(severity) {
                return Err(unmapped("infected_color", severity.label()));
            }
        }
        if self.infected_other.is_none() {
            return Err(unmapped("infected_fallback", Status::Infected.label()));
        }
        for q in Quintile::ALL {
            if !self.quintile.contains_key(q) {
                return Err(unmapped("quintile_color", q.label()));
            }
            if !self.legend.contains_key(q) {
                return Err(unmapped("quintile_legend", q.label()));
            }
        }
        Ok(())
    }
}

impl Default for ColorMapping {
    fn default() -> Self {
        Self::standard()
    }
}

fn unmapped(map: &'static str, value: &str) -> CoreError {
    CoreError::UnmappedDomainValue { map, value: value.to_owned() }
}
