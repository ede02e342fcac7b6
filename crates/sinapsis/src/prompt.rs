use crate::types::{ScheduledItem, TaskRequest};
use crate::variant::Variant;

/// Minutes kept free before and after every commitment in the strict prompt
const BUFFER_MINUTES: u32 = 15;

/// Build the prompt for the given variant from the current agenda
pub fn build_prompt(items: &[ScheduledItem], request: &TaskRequest, variant: Variant) -> String {
    match variant {
        Variant::Compact => compact_prompt(items, request),
        Variant::Strict => strict_prompt(items, request),
    }
}

/// One line per entry: `"{day} {time}: {label}"`
pub fn commitment_lines(items: &[ScheduledItem]) -> String {
    items
        .iter()
        .map(|item| format!("{} {}: {}", item.day, item.time_range, item.label))
        .collect::<Vec<_>>()
        .join("\n")
}

fn compact_prompt(items: &[ScheduledItem], request: &TaskRequest) -> String {
    format!(
        "Asistente: Bloqueos: {}. Nueva: {} ({}). Prioridad: {}. Responde corto: Día | Hora | Razón.",
        commitment_lines(items),
        request.task,
        request.duration,
        request.priority,
    )
}

fn strict_prompt(items: &[ScheduledItem], request: &TaskRequest) -> String {
    let mut prompt = String::from(
        "Eres un asistente de agenda semanal. Tu trabajo es encontrar un hueco para una tarea nueva.\n\n",
    );

    prompt.push_str("Compromisos existentes (no se pueden mover):\n");
    for item in items {
        prompt.push_str(&format!("- {} {}: {}\n", item.day, item.time_range, item.label));
    }
    prompt.push('\n');

    prompt.push_str(&format!(
        "Tarea nueva: {}\nDuración: {} ({} minutos)\nPrioridad: {}\n\n",
        request.task,
        request.duration,
        request.duration.minutes(),
        request.priority,
    ));

    prompt.push_str(&format!(
        "Reglas:\n\
         - Nunca solapes la tarea con ningún compromiso existente.\n\
         - Deja al menos {BUFFER_MINUTES} minutos libres antes y después de cada compromiso.\n\
         - Usa solo horas entre las 08:00 y las 23:00.\n\
         - Las tareas de prioridad Alta van lo antes posible en la semana.\n\n"
    ));

    prompt.push_str(
        "Responde con una sola línea, sin nada más, con este formato exacto:\n\
         Día | HH:MM - HH:MM | Razón",
    );

    prompt
}
