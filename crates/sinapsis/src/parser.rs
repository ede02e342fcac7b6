use crate::agenda::SENTINEL_DAY;
use crate::error::ScheduleError;
use crate::types::ScheduledItem;
use crate::variant::Fallback;

/// Label the model sometimes puts before the day
const DAY_PREFIX: &str = "Día:";

/// How much of an unsplittable reply is kept as the time field
const SNIPPET_CHARS: usize = 30;

/// Day, time and optional reason pulled out of a model reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSlot {
    pub day: String,
    pub time_range: String,
    pub reason: Option<String>,
}

/// Split a reply on `|`.
///
/// Returns `None` when there is no delimiter. Otherwise the first field, with
/// every `Día:` removed and trimmed, is the day; the second, trimmed, is the
/// time range; a non-empty third field is the reason. Anything past that is
/// ignored, and nothing checks that the day or time make sense.
pub fn parse_reply(text: &str) -> Option<ParsedSlot> {
    if !text.contains('|') {
        return None;
    }

    let mut fields = text.split('|');
    let day = fields.next().unwrap_or_default().replace(DAY_PREFIX, "");
    let time_range = fields.next().unwrap_or_default().trim().to_string();
    let reason = fields
        .next()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);

    Some(ParsedSlot {
        day: day.trim().to_string(),
        time_range,
        reason,
    })
}

/// First `SNIPPET_CHARS` characters of the reply, untrimmed
pub fn snippet(text: &str) -> String {
    text.chars().take(SNIPPET_CHARS).collect()
}

/// What a reply turned into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// The reply named a day and time
    Scheduled {
        item: ScheduledItem,
        reason: Option<String>,
    },
    /// The reply could not be split and was filed under the sentinel day
    Unassigned { item: ScheduledItem },
}

impl Placement {
    pub fn item(&self) -> &ScheduledItem {
        match self {
            Placement::Scheduled { item, .. } | Placement::Unassigned { item } => item,
        }
    }
}

/// Turn a reply into an agenda entry for `task`, applying the fallback when
/// the reply cannot be split.
pub fn item_from_reply(reply: &str, task: &str, fallback: Fallback) -> Result<Placement, ScheduleError> {
    match (parse_reply(reply), fallback) {
        (Some(slot), _) => Ok(Placement::Scheduled {
            item: ScheduledItem::new(slot.day, task, slot.time_range),
            reason: slot.reason,
        }),
        (None, Fallback::Discard) => Err(ScheduleError::UnparseableReply {
            raw: reply.to_string(),
        }),
        (None, Fallback::Sentinel) => Ok(Placement::Unassigned {
            item: ScheduledItem::new(SENTINEL_DAY, task, snippet(reply)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== parse_reply tests ==========

    #[test]
    fn test_parse_reply_three_fields() {
        let slot = parse_reply("Miércoles | 20:15 - 20:45 | hueco libre").unwrap();

        assert_eq!(slot.day, "Miércoles");
        assert_eq!(slot.time_range, "20:15 - 20:45");
        assert_eq!(slot.reason.as_deref(), Some("hueco libre"));
    }

    #[test]
    fn test_parse_reply_strips_day_prefix() {
        let slot = parse_reply("Día: Sábado | Hora: 10:00 - 11:00 | Razón: libre").unwrap();

        assert_eq!(slot.day, "Sábado");
        // Only the day prefix is removed
        assert_eq!(slot.time_range, "Hora: 10:00 - 11:00");
    }

    #[test]
    fn test_parse_reply_removes_every_day_prefix() {
        let slot = parse_reply("Día:Lunes Día: | 09:00").unwrap();
        assert_eq!(slot.day, "Lunes");
    }

    #[test]
    fn test_parse_reply_two_fields() {
        let slot = parse_reply("Viernes|08:00 - 09:00").unwrap();

        assert_eq!(slot.day, "Viernes");
        assert_eq!(slot.time_range, "08:00 - 09:00");
        assert_eq!(slot.reason, None);
    }

    #[test]
    fn test_parse_reply_trailing_delimiter() {
        let slot = parse_reply("Domingo |").unwrap();

        assert_eq!(slot.day, "Domingo");
        assert_eq!(slot.time_range, "");
        assert_eq!(slot.reason, None);
    }

    #[test]
    fn test_parse_reply_leading_delimiter() {
        let slot = parse_reply("| 10:00 - 11:00 | motivo").unwrap();

        assert_eq!(slot.day, "");
        assert_eq!(slot.time_range, "10:00 - 11:00");
    }

    #[test]
    fn test_parse_reply_ignores_extra_fields() {
        let slot = parse_reply("Martes | 07:00 - 08:00 | temprano | extra | más").unwrap();

        assert_eq!(slot.day, "Martes");
        assert_eq!(slot.time_range, "07:00 - 08:00");
        assert_eq!(slot.reason.as_deref(), Some("temprano"));
    }

    #[test]
    fn test_parse_reply_blank_reason_is_none() {
        let slot = parse_reply("Martes | 07:00 |   ").unwrap();
        assert_eq!(slot.reason, None);
    }

    #[test]
    fn test_parse_reply_multiline_reply() {
        let slot = parse_reply("\n  Día: Jueves | 16:00 - 17:00 | antes de B2\n").unwrap();

        assert_eq!(slot.day, "Jueves");
        assert_eq!(slot.time_range, "16:00 - 17:00");
        assert_eq!(slot.reason.as_deref(), Some("antes de B2"));
    }

    #[test]
    fn test_parse_reply_accepts_nonsense_day() {
        let slot = parse_reply("Cuando puedas | pronto").unwrap();

        assert_eq!(slot.day, "Cuando puedas");
        assert_eq!(slot.time_range, "pronto");
    }

    #[test]
    fn test_parse_reply_no_delimiter() {
        assert_eq!(parse_reply("Necesito más información"), None);
        assert_eq!(parse_reply(""), None);
    }

    // ========== snippet tests ==========

    #[test]
    fn test_snippet_truncates_to_30_chars() {
        let text = "Necesito más información sobre la tarea para decidir";
        let cut = snippet(text);

        assert_eq!(cut.chars().count(), 30);
        assert_eq!(cut, "Necesito más información sobre");
    }

    #[test]
    fn test_snippet_short_text_unchanged() {
        assert_eq!(snippet("Necesito más información"), "Necesito más información");
    }

    #[test]
    fn test_snippet_counts_chars_not_bytes() {
        let text = "ñ".repeat(40);
        assert_eq!(snippet(&text), "ñ".repeat(30));
    }

    // ========== item_from_reply tests ==========

    #[test]
    fn test_item_from_reply_example() {
        let placement = item_from_reply(
            "Miércoles | 20:15 - 20:45 | hueco libre",
            "Leer",
            Fallback::Discard,
        )
        .unwrap();

        assert_eq!(
            placement,
            Placement::Scheduled {
                item: ScheduledItem::new("Miércoles", "Leer", "20:15 - 20:45"),
                reason: Some("hueco libre".to_string()),
            }
        );
    }

    #[test]
    fn test_item_from_reply_same_result_for_both_fallbacks() {
        let reply = "Sábado | 10:00 - 11:00 | fin de semana";
        let a = item_from_reply(reply, "Gym", Fallback::Discard).unwrap();
        let b = item_from_reply(reply, "Gym", Fallback::Sentinel).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_item_from_reply_discard_fallback() {
        let err = item_from_reply("Necesito más información", "Leer", Fallback::Discard).unwrap_err();

        match err {
            ScheduleError::UnparseableReply { raw } => assert_eq!(raw, "Necesito más información"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_item_from_reply_sentinel_fallback() {
        let placement = item_from_reply("Necesito más información", "Leer", Fallback::Sentinel).unwrap();

        assert_eq!(
            placement,
            Placement::Unassigned {
                item: ScheduledItem::new("Por asignar", "Leer", "Necesito más información"),
            }
        );
    }

    #[test]
    fn test_item_from_reply_sentinel_truncates_long_reply() {
        let reply = "No hay ningún hueco disponible esta semana, lo siento mucho";
        let placement = item_from_reply(reply, "Leer", Fallback::Sentinel).unwrap();
        let item = placement.item();

        assert_eq!(item.day, SENTINEL_DAY);
        assert_eq!(item.time_range, "No hay ningún hueco disponible");
    }
}
