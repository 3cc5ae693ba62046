use dialoguer::Input;

/// Source of answers to free-text questions.
pub trait Prompt {
    fn ask(&mut self, question: &str) -> anyhow::Result<String>;
}

/// Reads answers from the terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask(&mut self, question: &str) -> anyhow::Result<String> {
        let answer = tokio::task::block_in_place(|| {
            Input::<String>::new()
                .with_prompt(question)
                .allow_empty(true)
                .interact_text()
        })?;
        Ok(answer)
    }
}

#[cfg(test)]
pub use scripted::ScriptedPrompt;

#[cfg(test)]
mod scripted {
    use std::collections::VecDeque;

    use super::Prompt;

    /// Answers questions from a fixed list, recording what was asked.
    #[derive(Debug, Default)]
    pub struct ScriptedPrompt {
        answers: VecDeque<String>,
        pub questions: Vec<String>,
    }

    impl ScriptedPrompt {
        pub fn new<I, S>(answers: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                answers: answers.into_iter().map(Into::into).collect(),
                questions: Vec::new(),
            }
        }
    }

    impl Prompt for ScriptedPrompt {
        fn ask(&mut self, question: &str) -> anyhow::Result<String> {
            self.questions.push(question.to_string());
            self.answers
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("no answer scripted for {question:?}"))
        }
    }
}
