use crate::types::{FixedBlock, ScheduledItem, Weekday};

/// Day used for entries whose reply could not be split into day and time
pub const SENTINEL_DAY: &str = "Por asignar";

/// Weekly commitments the assistant must never schedule over
pub const FIXED_BLOCKS: &[FixedBlock] = &[
    FixedBlock::new(Weekday::Lunes, "Clases", "18:00 - 20:00"),
    FixedBlock::new(Weekday::Martes, "Clases", "18:00 - 20:00"),
    FixedBlock::new(Weekday::Miercoles, "Pole Dance", "16:00 - 18:00"),
    FixedBlock::new(Weekday::Miercoles, "Clases", "18:00 - 20:00"),
    FixedBlock::new(Weekday::Jueves, "Universidad (B1)", "13:00 - 15:00"),
    FixedBlock::new(Weekday::Jueves, "Universidad (B2)", "20:00 - 22:00"),
    FixedBlock::new(Weekday::Viernes, "Clases", "18:00 - 20:00"),
];

/// The week's entries, fixed and added, in insertion order.
///
/// Nothing here rejects duplicates or overlapping slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaState {
    fixed: &'static [FixedBlock],
    items: Vec<ScheduledItem>,
}

/// Items listed under one heading of the rendered week
#[derive(Debug, PartialEq, Eq)]
pub struct DayGroup<'a> {
    pub heading: &'static str,
    pub items: Vec<&'a ScheduledItem>,
}

impl AgendaState {
    /// Agenda seeded from the default fixed blocks
    pub fn new() -> Self {
        Self::with_fixed(FIXED_BLOCKS)
    }

    pub fn with_fixed(fixed: &'static [FixedBlock]) -> Self {
        Self {
            fixed,
            items: seed(fixed),
        }
    }

    pub fn items(&self) -> &[ScheduledItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: ScheduledItem) {
        self.items.push(item);
    }

    /// Drop every added entry and go back to the fixed blocks
    pub fn reset(&mut self) {
        self.items = seed(self.fixed);
    }

    /// Fixed styling is decided by label alone, so an added task that shares a
    /// label with a fixed block is styled as fixed too.
    pub fn is_fixed(&self, item: &ScheduledItem) -> bool {
        self.fixed.iter().any(|block| block.label == item.label)
    }

    /// Group entries under each weekday whose name occurs in the entry's day.
    ///
    /// Matching is by substring, so "Lunes y Martes" lands under both Lunes
    /// and Martes. Weekdays without entries are left out. Entries that match
    /// no weekday at all are collected in a trailing `Por asignar` group.
    pub fn group_by_day(&self) -> Vec<DayGroup<'_>> {
        let mut groups: Vec<DayGroup<'_>> = Weekday::ALL
            .iter()
            .map(|day| DayGroup {
                heading: day.name(),
                items: self
                    .items
                    .iter()
                    .filter(|item| item.day.contains(day.name()))
                    .collect(),
            })
            .filter(|group| !group.items.is_empty())
            .collect();

        let unmatched: Vec<&ScheduledItem> = self
            .items
            .iter()
            .filter(|item| !Weekday::ALL.iter().any(|day| item.day.contains(day.name())))
            .collect();

        if !unmatched.is_empty() {
            groups.push(DayGroup {
                heading: SENTINEL_DAY,
                items: unmatched,
            });
        }

        groups
    }
}

impl Default for AgendaState {
    fn default() -> Self {
        Self::new()
    }
}

fn seed(fixed: &[FixedBlock]) -> Vec<ScheduledItem> {
    fixed.iter().map(ScheduledItem::from).collect()
}
