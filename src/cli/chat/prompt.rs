use rustyline::{Config, Editor, Result};

use crate::model::ModelMode;

pub fn generate_prompt(mode: ModelMode) -> String {
    format!("[{}]> ", mode.label())
}

pub fn rl() -> Result<Editor<()>> {
    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();
    Editor::with_config(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_shows_the_active_mode() {
        assert_eq!(generate_prompt(ModelMode::Simulated), "[sim]> ");
        assert_eq!(generate_prompt(ModelMode::Live), "[live]> ");
    }
}
