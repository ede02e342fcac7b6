use anyhow::Result;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::fs;
use std::path::Path;

use crate::agenda::{AgendaState, DayGroup};
use crate::types::{Priority, TaskDuration};

/// Transient message shown above the form after a failed submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Warning,
    Error,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    fn class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Warning => "notice notice-warning",
            NoticeKind::Error => "notice notice-error",
        }
    }
}

/// Write the page for `agenda` to `path`
pub fn generate_html(agenda: &AgendaState, path: &Path) -> Result<()> {
    let html = render_page(agenda, None);
    fs::write(path, html.into_string())?;
    Ok(())
}

pub fn render_page(agenda: &AgendaState, notice: Option<&Notice>) -> Markup {
    let groups = agenda.group_by_day();

    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Synapse & Flow" }
                style { (PreEscaped(CSS)) }
            }
            body {
                div.container {
                    p.gradient-text { "✨ Synapse & Flow" }
                    div.columns {
                        div.column-form {
                            h2 { "📝 Nueva Tarea" }
                            @if let Some(notice) = notice {
                                div class=(notice.class()) { (notice.message) }
                            }
                            (render_form())
                            form method="post" action="/reiniciar" {
                                button.reset-button type="submit" { "🗑️ REINICIAR SEMANA" }
                            }
                        }
                        div.column-agenda {
                            h2 { "📅 Cronograma Semanal" }
                            div.agenda #"agenda" {
                                @if agenda.is_empty() {
                                    div.empty-state {
                                        p { "No hay nada en la agenda." }
                                    }
                                } @else {
                                    @for group in &groups {
                                        (render_day_group(agenda, group))
                                    }
                                }
                            }
                        }
                    }
                }
                script { (PreEscaped(JAVASCRIPT)) }
            }
        }
    }
}

fn render_form() -> Markup {
    html! {
        form #"agenda-form" method="post" action="/agendar" {
            label for="tarea" { "¿Qué quieres hacer?" }
            input #"tarea" type="text" name="tarea";

            label for="duracion" { "Duración" }
            select #"duracion" name="duracion" {
                @for duration in TaskDuration::ALL {
                    option value=(duration.label()) { (duration.label()) }
                }
            }

            label for="prioridad" { "Prioridad" }
            select #"prioridad" name="prioridad" {
                @for priority in Priority::ALL {
                    option value=(priority.label()) selected[priority == Priority::default()] {
                        (priority.label())
                    }
                }
            }

            button.submit-button type="submit" { "AGENDAR CON IA" }
            div.spinner #"spinner" hidden { "IA organizando tu semana..." }
        }
    }
}

fn render_day_group(agenda: &AgendaState, group: &DayGroup<'_>) -> Markup {
    html! {
        div.day-group {
            h3.day-header { (group.heading) }
            @for item in &group.items {
                @let card_class = if agenda.is_fixed(item) { "glass-card fixed-card" } else { "glass-card" };
                div class=(card_class) {
                    strong { (item.time_range) }
                    " - "
                    (item.label)
                }
            }
        }
    }
}

const CSS: &str = r#"
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Inter', sans-serif;
    background: #0a0b1e;
    color: #fff;
    min-height: 100vh;
    line-height: 1.4;
}

.container {
    max-width: 1200px;
    margin: 0 auto;
    padding: 40px 24px 60px;
}

.gradient-text {
    background: linear-gradient(90deg, #d946ef, #06b6d4);
    -webkit-background-clip: text;
    -webkit-text-fill-color: transparent;
    font-size: 40px;
    font-weight: bold;
    margin-bottom: 32px;
}

h2 {
    font-size: 1.3em;
    margin-bottom: 20px;
}

.columns {
    display: grid;
    grid-template-columns: 1fr 2fr;
    gap: 40px;
}

form {
    display: flex;
    flex-direction: column;
    gap: 10px;
    margin-bottom: 20px;
}

label {
    color: #aaa;
    font-size: 0.9em;
}

input, select {
    background: rgba(255, 255, 255, 0.08);
    border: 1px solid rgba(255, 255, 255, 0.15);
    border-radius: 8px;
    color: #fff;
    padding: 10px;
    font-size: 1em;
}

button {
    border: none;
    border-radius: 8px;
    padding: 12px;
    font-weight: bold;
    cursor: pointer;
}

.submit-button {
    background: linear-gradient(90deg, #d946ef, #06b6d4);
    color: #fff;
    margin-top: 10px;
}

.reset-button {
    background: rgba(255, 255, 255, 0.08);
    color: #ccc;
}

.spinner {
    color: #06b6d4;
    font-size: 0.9em;
}

.notice {
    border-radius: 8px;
    padding: 12px;
    margin-bottom: 16px;
}

.notice-warning {
    background: rgba(234, 179, 8, 0.15);
    border: 1px solid #eab308;
}

.notice-error {
    background: rgba(239, 68, 68, 0.15);
    border: 1px solid #ef4444;
}

.day-header {
    font-size: 1.2em;
    margin: 24px 0 12px;
}

.glass-card {
    background: rgba(255, 255, 255, 0.05);
    backdrop-filter: blur(10px);
    border-radius: 12px;
    padding: 15px;
    border-left: 5px solid #06b6d4;
    margin-bottom: 10px;
}

.fixed-card {
    border-left: 5px solid #d946ef;
}

.empty-state {
    padding: 60px 20px;
    text-align: center;
    color: #666;
}

@media (max-width: 768px) {
    .columns {
        grid-template-columns: 1fr;
    }
}
"#;

const JAVASCRIPT: &str = r#"
// Show the spinner while the model is working; one submission at a time
document.getElementById('agenda-form').addEventListener('submit', function() {
    this.querySelector('.submit-button').disabled = true;
    document.getElementById('spinner').hidden = false;
});
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agenda::SENTINEL_DAY;
    use crate::types::ScheduledItem;

    fn page(agenda: &AgendaState, notice: Option<&Notice>) -> String {
        render_page(agenda, notice).into_string()
    }

    #[test]
    fn test_render_page_has_form_and_reset() {
        let html = page(&AgendaState::new(), None);

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains(r#"action="/agendar""#));
        assert!(html.contains(r#"action="/reiniciar""#));
        assert!(html.contains("AGENDAR CON IA"));
        assert!(html.contains("REINICIAR SEMANA"));
    }

    #[test]
    fn test_render_page_lists_duration_and_priority_options() {
        let html = page(&AgendaState::new(), None);

        for duration in TaskDuration::ALL {
            assert!(html.contains(&format!(r#"<option value="{}">"#, duration.label())));
        }
        assert!(html.contains(r#"<option value="Media" selected>"#));
        assert!(html.contains(r#"<option value="Baja">"#));
    }

    #[test]
    fn test_render_page_groups_fixed_blocks_by_day() {
        let html = page(&AgendaState::new(), None);

        assert!(html.contains(r#"<h3 class="day-header">Lunes</h3>"#));
        assert!(html.contains(r#"<h3 class="day-header">Miércoles</h3>"#));
        assert!(!html.contains(r#"<h3 class="day-header">Sábado</h3>"#));
        assert!(html.contains("<strong>16:00 - 18:00</strong> - Pole Dance"));
    }

    #[test]
    fn test_render_page_day_order() {
        let html = page(&AgendaState::new(), None);

        let lunes = html.find(">Lunes</h3>").unwrap();
        let jueves = html.find(">Jueves</h3>").unwrap();
        let viernes = html.find(">Viernes</h3>").unwrap();
        assert!(lunes < jueves && jueves < viernes);
    }

    #[test]
    fn test_render_page_fixed_and_added_styles() {
        let mut agenda = AgendaState::new();
        agenda.push(ScheduledItem::new("Sábado", "Gym", "10:00 - 11:00"));
        let html = page(&agenda, None);

        assert!(html.contains(r#"<div class="glass-card fixed-card"><strong>18:00 - 20:00</strong> - Clases</div>"#));
        assert!(html.contains(r#"<div class="glass-card"><strong>10:00 - 11:00</strong> - Gym</div>"#));
    }

    #[test]
    fn test_render_page_item_under_every_matching_day() {
        let mut agenda = AgendaState::with_fixed(&[]);
        agenda.push(ScheduledItem::new("Lunes y Martes", "Repaso", "10:00"));
        let html = page(&agenda, None);

        assert_eq!(html.matches("<strong>10:00</strong> - Repaso").count(), 2);
    }

    #[test]
    fn test_render_page_shows_unassigned_group() {
        let mut agenda = AgendaState::new();
        agenda.push(ScheduledItem::new(SENTINEL_DAY, "Leer", "Necesito más información"));
        let html = page(&agenda, None);

        assert!(html.contains(r#"<h3 class="day-header">Por asignar</h3>"#));
        assert!(html.contains("Necesito más información"));
    }

    #[test]
    fn test_render_page_escapes_model_text() {
        let mut agenda = AgendaState::new();
        agenda.push(ScheduledItem::new("Lunes", "<script>alert(1)</script>", "10:00"));
        let html = page(&agenda, None);

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_render_page_empty_agenda() {
        let html = page(&AgendaState::with_fixed(&[]), None);
        assert!(html.contains("No hay nada en la agenda."));
    }

    #[test]
    fn test_render_page_notices() {
        let agenda = AgendaState::new();

        let warning = Notice::warning("formato extraño");
        let html = page(&agenda, Some(&warning));
        assert!(html.contains(r#"<div class="notice notice-warning">formato extraño</div>"#));

        let error = Notice::error("sin conexión");
        let html = page(&agenda, Some(&error));
        assert!(html.contains(r#"<div class="notice notice-error">sin conexión</div>"#));

        let html = page(&agenda, None);
        assert!(!html.contains("notice-warning"));
    }

    #[test]
    fn test_generate_html_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");

        generate_html(&AgendaState::new(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Synapse &amp; Flow"));
        assert!(content.contains("Universidad (B1)"));
    }
}
