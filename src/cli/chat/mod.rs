pub mod conversation_state;
pub mod prompt;
pub mod renderer;

use std::io::Write;
use std::process::ExitCode;

use color_print::cwriteln;
use conversation_state::{ConversationEntry, ConversationState};
use eyre::{bail, Result};
use prompt::generate_prompt;
use tracing::{debug, error};

use crate::gemini_client::GeminiClient;
use crate::model::{ModelMode, ResponseProducer};
use crate::simulated_client::SimulatedModel;

const WELCOME_TEXT: &str = "
Prompt-to-Result Service. Введи промпт, і побачиш магію AI.

Things to try
• Ask anything and read the model's reply.
• Include the word \"image\" to get a picture back.
• Start over at any point with /clear.

/help         Show the help dialogue
/quit         Quit the application
";

const HELP_TEXT: &str = "
Prompt-to-Result CLI

/clear        Clear the conversation history
/help         Show this help dialogue
/quit         Quit the application
";

const EMPTY_PROMPT_WARNING: &str =
    "Не забудьте ввести Prompt! Модель не вміє читати ваші думки (поки що).";
const WAITING_TEXT: &str = "Чекаємо на відповідь від моделі...";

pub struct ChatContext {
    output: Box<dyn Write>,
    input: Option<String>,
    interactive: bool,
    mode: ModelMode,
    conversation_state: ConversationState,
    producer: Option<Box<dyn ResponseProducer>>,
}

impl ChatContext {
    pub fn new(
        output: Box<dyn Write>,
        input: Option<String>,
        interactive: bool,
        mode: ModelMode,
    ) -> Self {
        Self {
            output,
            input,
            interactive,
            mode,
            conversation_state: ConversationState::new(),
            producer: None,
        }
    }

    pub async fn run(&mut self) -> Result<ExitCode> {
        // A missing API key in live mode surfaces here, before any prompt is
        // read.
        self.producer = match build_producer(self.mode) {
            Ok(producer) => Some(producer),
            Err(e) => {
                writeln!(self.output, "Failed to initialize model client: {}", e)?;
                return Ok(ExitCode::FAILURE);
            }
        };

        if self.interactive {
            self.print_welcome()?;
        }

        // Handle non-interactive mode (single query)
        if let Some(input) = self.input.take() {
            self.handle_input(&input).await?;
            return Ok(ExitCode::SUCCESS);
        }

        if self.interactive {
            self.run_interactive().await?;
        }

        Ok(ExitCode::SUCCESS)
    }

    fn print_welcome(&mut self) -> Result<()> {
        writeln!(self.output, "{}", WELCOME_TEXT)?;
        Ok(())
    }

    async fn run_interactive(&mut self) -> Result<()> {
        let mut rl = prompt::rl()?;

        loop {
            let prompt_text = generate_prompt(self.mode);
            let readline = rl.readline(&prompt_text);

            match readline {
                Ok(line) => {
                    if line.trim().is_empty() {
                        cwriteln!(self.output, "<yellow>{}</yellow>", EMPTY_PROMPT_WARNING)?;
                        continue;
                    }

                    rl.add_history_entry(line.as_str());

                    if line.trim() == "/quit" {
                        break;
                    }

                    if let Err(e) = self.handle_input(&line).await {
                        writeln!(self.output, "Error: {}", e)?;
                    }
                }
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    break;
                }
            }
        }

        Ok(())
    }

    async fn handle_input(&mut self, input: &str) -> Result<()> {
        match input.trim() {
            "" => {
                cwriteln!(self.output, "<yellow>{}</yellow>", EMPTY_PROMPT_WARNING)?;
            }
            "/help" => {
                writeln!(self.output, "{}", HELP_TEXT)?;
            }
            "/clear" => {
                self.conversation_state = ConversationState::new();
                writeln!(self.output, "Conversation cleared.")?;
            }
            _ => {
                self.process_prompt(input).await?;
            }
        }

        Ok(())
    }

    /// One full interaction: call the producer, and either record the entry
    /// and redraw the whole conversation, or show the error banner and leave
    /// the history untouched. The session continues either way.
    async fn process_prompt(&mut self, prompt: &str) -> Result<()> {
        let producer = match &self.producer {
            Some(producer) => producer,
            None => bail!("Model client not initialized"),
        };

        cwriteln!(self.output, "<dim>{}</dim>", WAITING_TEXT)?;

        match producer.produce(prompt).await {
            Ok(response) => {
                debug!("Model returned a '{}' response", response.kind.as_str());
                self.conversation_state
                    .push(ConversationEntry::new(prompt, response));
                if self.interactive {
                    renderer::clear_screen(self.output.as_mut())?;
                }
                renderer::render_history(self.output.as_mut(), self.conversation_state.entries())?;
            }
            Err(model_error) => {
                error!("Model call failed: {}", model_error);
                renderer::render_model_error(self.output.as_mut(), &model_error)?;
            }
        }

        Ok(())
    }
}

fn build_producer(mode: ModelMode) -> Result<Box<dyn ResponseProducer>> {
    match mode {
        ModelMode::Simulated => Ok(Box::new(SimulatedModel::new())),
        ModelMode::Live => Ok(Box::new(GeminiClient::new()?)),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::ResponseKind;

    fn simulated_context() -> ChatContext {
        let mut context = ChatContext::new(Box::new(Vec::new()), None, false, ModelMode::Simulated);
        context.producer = Some(Box::new(SimulatedModel::new()));
        context
    }

    #[tokio::test]
    async fn successful_prompts_append_history_entries_in_order() {
        let mut context = simulated_context();

        context.process_prompt("first question").await.unwrap();
        context.process_prompt("second question").await.unwrap();
        context.process_prompt("third question").await.unwrap();

        let prompts: Vec<&str> = context
            .conversation_state
            .entries()
            .iter()
            .map(|entry| entry.prompt.as_str())
            .collect();
        assert_eq!(prompts, vec!["first question", "second question", "third question"]);
        assert!(context
            .conversation_state
            .entries()
            .iter()
            .all(|entry| entry.response.kind == ResponseKind::Text));
    }

    #[tokio::test]
    async fn failed_calls_leave_the_history_unchanged() {
        let mut context = simulated_context();

        context.process_prompt("hello").await.unwrap();
        assert_eq!(context.conversation_state.len(), 1);

        // The failure is reported, not propagated; the session continues.
        context.process_prompt("trigger an error please").await.unwrap();
        assert_eq!(context.conversation_state.len(), 1);
    }

    #[tokio::test]
    async fn image_prompts_are_recorded_with_their_url() {
        let mut context = simulated_context();

        context
            .process_prompt("draw me an image of a cat")
            .await
            .unwrap();

        let entry = &context.conversation_state.entries()[0];
        assert_eq!(entry.response.kind, ResponseKind::Image);
        assert!(entry.response.content.starts_with("https://"));
    }

    #[tokio::test]
    async fn empty_input_never_reaches_the_producer() {
        let mut context = simulated_context();

        context.handle_input("   ").await.unwrap();

        assert!(context.conversation_state.is_empty());
    }

    #[tokio::test]
    async fn clear_resets_the_session_history() {
        let mut context = simulated_context();

        context.process_prompt("hello").await.unwrap();
        context.handle_input("/clear").await.unwrap();

        assert!(context.conversation_state.is_empty());
    }
}
