//! TerminalWizard - line-oriented host for the assessment controller.
//!
//! Renders each step's prompts, feeds the answers into the controller and
//! shows guard messages under the step. Typing `back` at any prompt returns
//! to the previous step. Pressing Enter on an empty line keeps the current
//! answer.

use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::info;

use crate::application::AssessmentController;
use crate::domain::assessment::{common_condition, Answer, Prompt, Trimester, COMMON_CONDITIONS};
use crate::domain::foundation::DomainError;

const BACK_COMMAND: &str = "back";

const WELCOME: &str = "Health Assessment\n\
    Please answer a few questions to help us provide personalized guidance.\n\
    Type 'back' to return to the previous step.";

const DONE: &str = "Thank you! Your assessment has been saved.";

/// How a wizard session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardOutcome {
    /// The record was persisted.
    Completed,
    /// Input ended before the last step; nothing was persisted.
    Abandoned,
}

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// What the user did on a step.
enum StepInput {
    Answered,
    Back,
    Eof,
}

/// One line of user input.
enum Reply {
    Text(String),
    Back,
    Eof,
}

pub struct TerminalWizard<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalWizard<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Returns the output sink, e.g. to inspect what was rendered.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Drives `controller` until it completes or input runs out.
    ///
    /// # Errors
    ///
    /// - `Io` if reading or writing the terminal fails
    /// - `Domain` for non-validation controller errors such as a failed save
    pub fn run(
        &mut self,
        controller: &mut AssessmentController,
    ) -> Result<WizardOutcome, TerminalError> {
        writeln!(self.output, "{}", WELCOME)?;

        while let Some(step) = controller.current_step() {
            writeln!(self.output)?;
            writeln!(self.output, "{}", controller.progress())?;
            writeln!(self.output, "{}", step.question())?;
            writeln!(self.output, "{}", step.hint())?;

            match self.ask_step(controller)? {
                StepInput::Eof => {
                    info!(assessment_id = %controller.id(), %step, "assessment abandoned");
                    return Ok(WizardOutcome::Abandoned);
                }
                StepInput::Back => {
                    controller.retreat()?;
                    continue;
                }
                StepInput::Answered => {}
            }

            match controller.advance() {
                Ok(_) => {}
                Err(e) if e.is_validation() => writeln!(self.output, "! {}", e.message)?,
                Err(e) => return Err(e.into()),
            }
        }

        writeln!(self.output)?;
        writeln!(self.output, "{}", DONE)?;
        Ok(WizardOutcome::Completed)
    }

    // Prompts are re-read after every answer since a "yes" reveals the follow-up.
    fn ask_step(&mut self, controller: &mut AssessmentController) -> Result<StepInput, TerminalError> {
        let mut idx = 0;
        loop {
            let prompts = controller.prompts();
            let Some(prompt) = prompts.get(idx).copied() else {
                return Ok(StepInput::Answered);
            };
            match self.ask_prompt(prompt, controller)? {
                StepInput::Answered => idx += 1,
                other => return Ok(other),
            }
        }
    }

    fn ask_prompt(
        &mut self,
        prompt: Prompt,
        controller: &mut AssessmentController,
    ) -> Result<StepInput, TerminalError> {
        match prompt {
            Prompt::Age => self.ask_age(controller),
            Prompt::HasConditions => {
                let current = controller.record().has_pre_existing_conditions();
                self.ask_yes_no(
                    "Any pre-existing conditions?",
                    current,
                    controller,
                    Answer::HasPreExistingConditions,
                )
            }
            Prompt::ConditionList => self.ask_conditions(controller),
            Prompt::PregnancyStatus => {
                let current = controller.record().is_pregnant();
                self.ask_yes_no("Are you pregnant?", current, controller, Answer::IsPregnant)
            }
            Prompt::PregnancyWeek => self.ask_week(controller),
            Prompt::TakingMedications => {
                let current = controller.record().taking_medications();
                self.ask_yes_no(
                    "Taking any medications?",
                    current,
                    controller,
                    Answer::TakingMedications,
                )
            }
            Prompt::MedicationList => self.ask_medications(controller),
        }
    }

    fn ask_age(&mut self, controller: &mut AssessmentController) -> Result<StepInput, TerminalError> {
        loop {
            let reply = self.read_reply("Enter your age: ")?;
            let text = match reply {
                Reply::Text(text) => text,
                Reply::Back => return Ok(StepInput::Back),
                Reply::Eof => return Ok(StepInput::Eof),
            };
            if text.is_empty() {
                return Ok(StepInput::Answered);
            }
            match text.parse::<i32>() {
                Ok(age) => {
                    controller.update_answer(Answer::Age(Some(age)))?;
                    return Ok(StepInput::Answered);
                }
                Err(_) => writeln!(self.output, "! Please enter a whole number")?,
            }
        }
    }

    fn ask_yes_no(
        &mut self,
        question: &str,
        current: bool,
        controller: &mut AssessmentController,
        answer: impl Fn(bool) -> Answer,
    ) -> Result<StepInput, TerminalError> {
        let label = format!("{} [{}]: ", question, if current { "Y/n" } else { "y/N" });
        loop {
            let text = match self.read_reply(&label)? {
                Reply::Text(text) => text,
                Reply::Back => return Ok(StepInput::Back),
                Reply::Eof => return Ok(StepInput::Eof),
            };
            let value = if text.is_empty() {
                Some(current)
            } else {
                parse_yes_no(&text)
            };
            match value {
                Some(value) => {
                    controller.update_answer(answer(value))?;
                    return Ok(StepInput::Answered);
                }
                None => writeln!(self.output, "! Please answer yes or no")?,
            }
        }
    }

    fn ask_conditions(
        &mut self,
        controller: &mut AssessmentController,
    ) -> Result<StepInput, TerminalError> {
        writeln!(self.output, "Common conditions:")?;
        for (idx, name) in COMMON_CONDITIONS.iter().enumerate() {
            let mark = if controller.record().conditions().iter().any(|c| c == name) {
                "x"
            } else {
                " "
            };
            writeln!(self.output, "  {}. [{}] {}", idx + 1, mark, name)?;
        }

        let text = match self.read_reply(
            "Numbers toggle a listed condition; other text adds your own (comma separated): ",
        )? {
            Reply::Text(text) => text,
            Reply::Back => return Ok(StepInput::Back),
            Reply::Eof => return Ok(StepInput::Eof),
        };

        for token in split_list(&text) {
            let answer = match token.parse::<usize>().ok().and_then(common_condition) {
                Some(name) => Answer::ToggleCondition(name.to_string()),
                None => Answer::AddCondition(token.to_string()),
            };
            controller.update_answer(answer)?;
        }
        Ok(StepInput::Answered)
    }

    fn ask_week(&mut self, controller: &mut AssessmentController) -> Result<StepInput, TerminalError> {
        for trimester in Trimester::ALL {
            writeln!(
                self.output,
                "  {}. {} - {}",
                trimester.number(),
                trimester.label(),
                trimester.description()
            )?;
        }

        let trimester = loop {
            let text = match self.read_reply("Which trimester are you in? (1-3): ")? {
                Reply::Text(text) => text,
                Reply::Back => return Ok(StepInput::Back),
                Reply::Eof => return Ok(StepInput::Eof),
            };
            if text.is_empty() {
                if let Some(current) = controller.record().trimester() {
                    break current;
                }
            }
            match text.parse::<u8>().ok().and_then(Trimester::from_number) {
                Some(trimester) => {
                    if controller.record().trimester() != Some(trimester) {
                        controller.update_answer(Answer::Trimester(trimester))?;
                    }
                    break trimester;
                }
                None => writeln!(self.output, "! Please choose 1, 2 or 3")?,
            }
        };

        let weeks = trimester.weeks();
        let current = controller
            .record()
            .pregnancy_week()
            .unwrap_or_else(|| trimester.default_week());
        let label = format!(
            "Which week? ({}-{}, Enter for week {}): ",
            weeks.start(),
            weeks.end(),
            current
        );
        loop {
            let text = match self.read_reply(&label)? {
                Reply::Text(text) => text,
                Reply::Back => return Ok(StepInput::Back),
                Reply::Eof => return Ok(StepInput::Eof),
            };
            let week = if text.is_empty() {
                Some(current)
            } else {
                text.parse::<i32>().ok().filter(|w| weeks.contains(w))
            };
            match week {
                Some(week) => {
                    controller.update_answer(Answer::PregnancyWeek(Some(week)))?;
                    return Ok(StepInput::Answered);
                }
                None => writeln!(
                    self.output,
                    "! Please enter a week between {} and {}",
                    weeks.start(),
                    weeks.end()
                )?,
            }
        }
    }

    fn ask_medications(
        &mut self,
        controller: &mut AssessmentController,
    ) -> Result<StepInput, TerminalError> {
        if !controller.record().medications().is_empty() {
            writeln!(
                self.output,
                "Current list: {}",
                controller.record().medications().join(", ")
            )?;
        }
        let text = match self.read_reply("List your medications (comma separated): ")? {
            Reply::Text(text) => text,
            Reply::Back => return Ok(StepInput::Back),
            Reply::Eof => return Ok(StepInput::Eof),
        };
        if !text.is_empty() {
            let entries = split_list(&text).map(str::to_string).collect();
            controller.update_answer(Answer::Medications(entries))?;
        }
        Ok(StepInput::Answered)
    }

    fn read_reply(&mut self, label: &str) -> Result<Reply, TerminalError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(Reply::Eof);
        }
        let text = line.trim();
        if text.eq_ignore_ascii_case(BACK_COMMAND) {
            Ok(Reply::Back)
        } else {
            Ok(Reply::Text(text.to_string()))
        }
    }
}

fn parse_yes_no(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|s| !s.is_empty())
}
