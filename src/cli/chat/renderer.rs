use std::io::Write;

use color_print::cwriteln;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use eyre::Result;

use crate::cli::chat::conversation_state::ConversationEntry;
use crate::model::{ModelError, ResponseKind};

/// Resets the terminal before a full-history redraw. Every interaction
/// redraws the whole conversation from the top, so the screen is wiped
/// first in interactive sessions.
pub fn clear_screen(mut output: &mut dyn Write) -> Result<()> {
    execute!(&mut output, Clear(ClearType::All), MoveTo(0, 0))?;
    Ok(())
}

/// Redraws the entire conversation, oldest entry first. Cost is linear in
/// history length on every call.
pub fn render_history(output: &mut dyn Write, entries: &[ConversationEntry]) -> Result<()> {
    for entry in entries {
        render_entry(output, entry)?;
    }
    Ok(())
}

/// Draws one prompt/response pair. Content rendering cannot fail: a record
/// with an unrecognized kind is shown through the raw-dump fallback instead
/// of propagating an error. Only sink I/O errors bubble up.
pub fn render_entry(output: &mut dyn Write, entry: &ConversationEntry) -> Result<()> {
    cwriteln!(
        output,
        "<dim>[{}]</dim> <bold>You:</bold> {}",
        entry.created_at.format("%Y-%m-%d %H:%M:%S"),
        entry.prompt
    )?;
    cwriteln!(output, "<bold>✅ AI Response:</bold>")?;

    match &entry.response.kind {
        ResponseKind::Text => {
            cwriteln!(output, "<green>Отримано текст:</green>")?;
            cwriteln!(output, "<bold>{}</bold>", entry.response.content)?;
        }
        ResponseKind::Image => {
            cwriteln!(output, "<green>Отримано зображення:</green>")?;
            writeln!(output, "{}", entry.response.content)?;
            let source = entry
                .response
                .metadata
                .get("source")
                .and_then(|value| value.as_str())
                .unwrap_or("unknown");
            cwriteln!(output, "<dim>Згенеровано моделлю: {}</dim>", source)?;
        }
        ResponseKind::Other(_) => {
            cwriteln!(output, "<red>Помилка: Невідомий тип відповіді від моделі!</red>")?;
            writeln!(output, "{}", serde_json::to_string_pretty(&entry.response)?)?;
        }
    }

    writeln!(output, "---")?;
    cwriteln!(
        output,
        "<dim>Metadata: {}</dim>",
        serde_json::to_string(&entry.response.metadata)?
    )?;
    writeln!(output)?;

    Ok(())
}

/// Error banner for a failed model call, plus a generic retry hint. The
/// history is not redrawn on failure.
pub fn render_model_error(output: &mut dyn Write, error: &ModelError) -> Result<()> {
    cwriteln!(output, "<red>❌ Model Error: {}</red>", error)?;
    cwriteln!(output, "<yellow>Щось пішло не так, мабуть виникла якась помилка.</yellow>")?;
    Ok(())
}
