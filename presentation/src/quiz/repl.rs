//! Interactive quiz loop

use colored::Colorize;
use dpc_application::{QuizController, QuizError, QuizEvent};
use dpc_domain::SubmissionOutcome;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};

/// A parsed line of quiz input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizInput {
    /// 1-based option number
    Choose(usize),
    /// Keep the current selection and move on
    Continue,
    Back,
    Restart,
    Help,
    Quit,
    Invalid,
}

/// Parse one line typed at the quiz prompt
///
/// Option numbers are 1-based and must be within `option_count`.
pub fn parse_input(line: &str, option_count: usize) -> QuizInput {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "" => QuizInput::Continue,
        "/back" | "/b" | "<" | "voltar" => QuizInput::Back,
        "/restart" | "/r" => QuizInput::Restart,
        "/help" | "/h" | "/?" => QuizInput::Help,
        "/quit" | "/exit" | "/q" | "sair" => QuizInput::Quit,
        other => match other.parse::<usize>() {
            Ok(n) if (1..=option_count).contains(&n) => QuizInput::Choose(n),
            _ => QuizInput::Invalid,
        },
    }
}

/// Interactive quiz REPL
pub struct QuizRepl {
    controller: QuizController,
}

impl QuizRepl {
    pub fn new(controller: QuizController) -> Self {
        Self { controller }
    }

    /// Run until the diagnostic is submitted or the user quits
    ///
    /// Returns `None` when the user left before finishing; progress stays
    /// stored for the next run.
    pub async fn run(&mut self) -> RlResult<Option<SubmissionOutcome>> {
        let mut rl = DefaultEditor::new()?;

        self.print_welcome();
        self.print_question();

        loop {
            let readline = rl.readline("> ");

            match readline {
                Ok(line) => {
                    let option_count = self.controller.session().current_question().options.len();
                    match parse_input(&line, option_count) {
                        QuizInput::Choose(n) => {
                            let option_id = self.controller.session().current_question().options
                                [n - 1]
                                .id
                                .clone();
                            self.controller.select(&option_id);
                            if let Some(outcome) = self.advance().await {
                                return Ok(Some(outcome));
                            }
                        }
                        QuizInput::Continue => {
                            if self.controller.session().selected_option().is_none() {
                                println!("{}", "Escolha uma alternativa pelo número.".yellow());
                                continue;
                            }
                            if let Some(outcome) = self.advance().await {
                                return Ok(Some(outcome));
                            }
                        }
                        QuizInput::Back => match self.controller.retreat() {
                            Ok(_) => self.print_question(),
                            Err(e) => println!("{}", e.to_string().yellow()),
                        },
                        QuizInput::Restart => {
                            self.controller.restart();
                            println!("{}", "Recomeçando do início.".cyan());
                            self.print_question();
                        }
                        QuizInput::Help => self.print_help(),
                        QuizInput::Quit => {
                            println!("Seu progresso foi salvo. Até logo!");
                            return Ok(None);
                        }
                        QuizInput::Invalid => {
                            println!(
                                "{} digite um número de 1 a {} ou /help",
                                "Entrada inválida:".yellow(),
                                option_count
                            );
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Seu progresso foi salvo. Até logo!");
                    return Ok(None);
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Advance; returns the outcome once the last answer was submitted
    async fn advance(&mut self) -> Option<SubmissionOutcome> {
        if self.controller.session().is_last() {
            println!("{}", "Calculando seu perfil...".cyan());
        }
        match self.controller.advance().await {
            Ok(QuizEvent::Moved { .. }) => {
                self.print_question();
                None
            }
            Ok(QuizEvent::Completed(outcome)) => Some(outcome),
            Err(QuizError::Navigation(e)) => {
                println!("{}", e.to_string().yellow());
                None
            }
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                println!("Pressione Enter para tentar novamente, ou /back para revisar.");
                None
            }
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            Diagnóstico DPC - Quiz           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        if self.controller.resumed() {
            println!(
                "{}",
                "Retomando de onde você parou (use /restart para recomeçar)."
                    .cyan()
            );
            println!();
        }
        println!("Responda com o número da alternativa.");
        println!("Commands:");
        println!("  /back     - Previous question");
        println!("  /quit     - Save progress and exit");
        println!("  /help     - Show all commands");
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        println!("  <n>             - Choose option n and continue");
        println!("  <Enter>         - Keep the marked option and continue");
        println!("  /back, /b, <    - Previous question");
        println!("  /restart, /r    - Discard answers and start over");
        println!("  /help, /h, /?   - Show this help");
        println!("  /quit, /q       - Save progress and exit");
        println!();
    }

    fn print_question(&self) {
        let session = self.controller.session();
        let question = session.current_question();
        let selected = session.selected_option();

        println!();
        println!(
            "{} {}",
            format!("Pergunta {}/{}", session.index() + 1, session.total())
                .cyan()
                .bold(),
            question.text.bold()
        );
        for (i, option) in question.options.iter().enumerate() {
            if selected == Some(option.id.as_str()) {
                println!("  {} {}", format!("[{}]", i + 1).green().bold(), option.text);
            } else {
                println!("  {} {}", format!(" {} ", i + 1).dimmed(), option.text);
            }
        }
    }
}
