use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day of the week, in the order the agenda is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Lunes,
    Martes,
    Miercoles,
    Jueves,
    Viernes,
    Sabado,
    Domingo,
}

impl Weekday {
    /// All days, Monday first
    pub const ALL: [Weekday; 7] = [
        Weekday::Lunes,
        Weekday::Martes,
        Weekday::Miercoles,
        Weekday::Jueves,
        Weekday::Viernes,
        Weekday::Sabado,
        Weekday::Domingo,
    ];

    /// Spanish display name, as it appears in headings and prompts
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Lunes => "Lunes",
            Weekday::Martes => "Martes",
            Weekday::Miercoles => "Miércoles",
            Weekday::Jueves => "Jueves",
            Weekday::Viernes => "Viernes",
            Weekday::Sabado => "Sábado",
            Weekday::Domingo => "Domingo",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A weekly commitment that never moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBlock {
    pub day: Weekday,
    pub label: &'static str,
    pub time_range: &'static str,
}

impl FixedBlock {
    pub const fn new(day: Weekday, label: &'static str, time_range: &'static str) -> Self {
        Self {
            day,
            label,
            time_range,
        }
    }
}

/// A single agenda entry.
///
/// The day is free text: entries added from a model reply keep whatever the
/// model wrote, which may not name a weekday at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduledItem {
    #[serde(rename = "dia")]
    pub day: String,

    #[serde(rename = "tarea")]
    pub label: String,

    #[serde(rename = "hora")]
    pub time_range: String,
}

impl ScheduledItem {
    pub fn new(day: impl Into<String>, label: impl Into<String>, time_range: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            label: label.into(),
            time_range: time_range.into(),
        }
    }
}

impl From<&FixedBlock> for ScheduledItem {
    fn from(block: &FixedBlock) -> Self {
        Self::new(block.day.name(), block.label, block.time_range)
    }
}

/// How long the new task takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskDuration {
    #[serde(rename = "15 min")]
    #[default]
    Min15,
    #[serde(rename = "30 min")]
    Min30,
    #[serde(rename = "45 min")]
    Min45,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "1h 30min")]
    Hour1Min30,
    #[serde(rename = "2h")]
    Hour2,
    #[serde(rename = "3h")]
    Hour3,
}

impl TaskDuration {
    pub const ALL: [TaskDuration; 7] = [
        TaskDuration::Min15,
        TaskDuration::Min30,
        TaskDuration::Min45,
        TaskDuration::Hour1,
        TaskDuration::Hour1Min30,
        TaskDuration::Hour2,
        TaskDuration::Hour3,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TaskDuration::Min15 => "15 min",
            TaskDuration::Min30 => "30 min",
            TaskDuration::Min45 => "45 min",
            TaskDuration::Hour1 => "1h",
            TaskDuration::Hour1Min30 => "1h 30min",
            TaskDuration::Hour2 => "2h",
            TaskDuration::Hour3 => "3h",
        }
    }

    pub fn minutes(self) -> u32 {
        match self {
            TaskDuration::Min15 => 15,
            TaskDuration::Min30 => 30,
            TaskDuration::Min45 => 45,
            TaskDuration::Hour1 => 60,
            TaskDuration::Hour1Min30 => 90,
            TaskDuration::Hour2 => 120,
            TaskDuration::Hour3 => 180,
        }
    }
}

impl fmt::Display for TaskDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskDuration {
    type Err = String;

    /// Accepts the display label ("1h 30min") or a compact form ("90m", "1h30")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        let duration = match normalized.as_str() {
            "15min" | "15m" | "15" => TaskDuration::Min15,
            "30min" | "30m" | "30" => TaskDuration::Min30,
            "45min" | "45m" | "45" => TaskDuration::Min45,
            "1h" | "60m" | "60" => TaskDuration::Hour1,
            "1h30min" | "1h30" | "90m" | "90" => TaskDuration::Hour1Min30,
            "2h" | "120m" | "120" => TaskDuration::Hour2,
            "3h" | "180m" | "180" => TaskDuration::Hour3,
            _ => return Err(format!("unknown duration: {s:?}")),
        };
        Ok(duration)
    }
}

/// Task priority, as picked on the slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    Baja,
    #[default]
    Media,
    Alta,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Baja, Priority::Media, Priority::Alta];

    pub fn label(self) -> &'static str {
        match self {
            Priority::Baja => "Baja",
            Priority::Media => "Media",
            Priority::Alta => "Alta",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "baja" | "low" => Ok(Priority::Baja),
            "media" | "medium" => Ok(Priority::Media),
            "alta" | "high" => Ok(Priority::Alta),
            _ => Err(format!("unknown priority: {s:?}")),
        }
    }
}

/// A task the user wants placed somewhere in the week
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskRequest {
    #[serde(rename = "tarea", default)]
    pub task: String,

    #[serde(rename = "duracion", default)]
    pub duration: TaskDuration,

    #[serde(rename = "prioridad", default)]
    pub priority: Priority,
}

impl TaskRequest {
    pub fn new(task: impl Into<String>, duration: TaskDuration, priority: Priority) -> Self {
        Self {
            task: task.into(),
            duration,
            priority,
        }
    }
}
