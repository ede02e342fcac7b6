use tracing::{info, warn};

use crate::agenda::AgendaState;
use crate::error::ScheduleError;
use crate::llm::GeminiClient;
use crate::parser::{self, Placement};
use crate::prompt;
use crate::types::TaskRequest;
use crate::variant::Variant;

/// Ask the model where `request` fits and append the answer to `agenda`.
///
/// The agenda is only touched on success. The suggested slot is taken as-is:
/// nothing here checks it against the fixed blocks.
pub async fn schedule_task(
    agenda: &mut AgendaState,
    request: &TaskRequest,
    client: &GeminiClient,
    variant: Variant,
) -> Result<Placement, ScheduleError> {
    let prompt = prompt::build_prompt(agenda.items(), request, variant);
    let reply = client.generate(&prompt, variant.generation_config()).await?;

    let placement = match parser::item_from_reply(&reply, &request.task, variant.fallback()) {
        Ok(placement) => placement,
        Err(e) => {
            warn!(task = %request.task, reply = %reply, "Reply has no day/time delimiter, discarding");
            return Err(e);
        }
    };

    match &placement {
        Placement::Scheduled { item, reason } => info!(
            task = %item.label,
            day = %item.day,
            time = %item.time_range,
            reason = reason.as_deref().unwrap_or(""),
            "Task scheduled"
        ),
        Placement::Unassigned { item } => warn!(
            task = %item.label,
            reply = %reply,
            "Reply has no day/time delimiter, filing as unassigned"
        ),
    }

    agenda.push(placement.item().clone());
    Ok(placement)
}
