use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use bmcc_core::secret::SecretService;
use bmcc_core::{MessageRole, WizardStage};
use bmcc_infrastructure::{ConfigService, GuidePaths, SecretServiceImpl, init_tracing};
use bmcc_interaction::{CompletionClient, InteractionManager, InteractionResult};

mod helper;

use helper::CliHelper;

#[derive(Parser)]
#[command(name = "bmcc-guide")]
#[command(about = "BMCC international student admissions guide", long_about = None)]
struct Cli {
    /// Directory holding config.toml, secret.json and logs/
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Gemini model to use, overriding config.toml and secret.json
    #[arg(long, value_name = "NAME")]
    model: Option<String>,
}

/// What the REPL should do with one line of input.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Quit,
    Reset,
    Profile,
    History,
    Suggest,
    Help,
    Suggestion(usize),
    Unknown(String),
    Text(String),
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        let command = match trimmed {
            "quit" | "exit" => Command::Quit,
            "/reset" => Command::Reset,
            "/profile" => Command::Profile,
            "/history" => Command::History,
            "/suggest" => Command::Suggest,
            "/help" => Command::Help,
            "/1" => Command::Suggestion(0),
            "/2" => Command::Suggestion(1),
            "/3" => Command::Suggestion(2),
            other if other.starts_with('/') => Command::Unknown(other.to_string()),
            other => Command::Text(other.to_string()),
        };
        Some(command)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ===== Configuration =====
    let paths = GuidePaths::resolve(cli.config_dir.as_deref())?;
    let _log_guard = init_tracing(&paths.logs_dir())
        .with_context(|| format!("Failed to set up logging in {}", paths.logs_dir().display()))?;
    let secret_path = paths.ensure_secret_file()?;

    let secrets = Arc::new(SecretServiceImpl::new(&paths));
    let secret_config = secrets.load_secrets().await.unwrap_or_else(|e| {
        tracing::warn!("[Main] could not read secrets: {}", e);
        Default::default()
    });

    let mut config = ConfigService::new(&paths)
        .effective_config(&secret_config)
        .with_context(|| format!("Invalid {}", paths.config_file().display()))?;
    if let Some(model) = cli.model {
        config.completion.model = model;
    }
    let knowledge = ConfigService::knowledge_base(&config)?;
    let client = CompletionClient::gemini(&config.completion, secrets, knowledge)?;
    tracing::info!("[Main] using model {}", client.model());
    let mut manager = InteractionManager::new(client);

    // ===== REPL Setup =====
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== BMCC International Student Guide ===".bright_magenta().bold());
    println!(
        "{}",
        "Answer a few questions, then ask anything about applying. Type '/help' for commands or 'quit' to exit."
            .bright_black()
    );
    if secret_config.gemini_api_key().is_none() {
        println!(
            "{}",
            format!(
                "No API key found. Add it to {} or set GEMINI_API_KEY before chatting.",
                secret_path.display()
            )
            .yellow()
        );
    }
    println!();

    let mut show_stage = true;

    // ===== Main REPL Loop =====
    loop {
        if show_stage && !manager.session().is_chat_ready() {
            print_stage(manager.stage());
        }
        show_stage = false;

        let prompt = if manager.session().is_chat_ready() { ">> " } else { "#> " };
        let line = match rl.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        let Some(command) = Command::parse(&line) else {
            continue;
        };
        let _ = rl.add_history_entry(line.trim());

        match command {
            Command::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Command::Reset => {
                manager.reset();
                println!("{}", "Starting over.".bright_black());
                println!();
                show_stage = true;
            }
            Command::Profile => print_profile(&manager),
            Command::History => print_history(&manager),
            Command::Help => print_help(),
            Command::Suggest => {
                if manager.session().is_chat_ready() {
                    print_suggestions(&manager);
                } else {
                    println!("{}", "Suggestions appear once the questions are answered.".bright_black());
                }
            }
            Command::Unknown(cmd) => {
                println!("{}", format!("Unknown command: {cmd}").bright_black());
            }
            Command::Suggestion(index) => {
                if !manager.session().is_chat_ready() {
                    println!("{}", "Please answer the questions above first.".bright_black());
                    continue;
                }
                match manager.suggestions().get(index).map(str::to_string) {
                    Some(question) => {
                        println!("{}", format!("> {}", question).green());
                        print_thinking();
                        let result = manager.select_suggestion(index).await;
                        show_turn(&manager, result);
                    }
                    None => println!("{}", "No such suggestion.".bright_black()),
                }
            }
            Command::Text(text) if manager.session().is_chat_ready() => {
                println!("{}", format!("> {}", text).green());
                print_thinking();
                let result = manager.handle_input(&text).await;
                show_turn(&manager, result);
            }
            Command::Text(text) => {
                let stage = manager.stage();
                match text.parse::<usize>() {
                    Ok(n) if (1..=stage.choices().len()).contains(&n) => {
                        show_wizard_result(manager.choose_index(n - 1));
                        show_stage = true;
                    }
                    _ => println!(
                        "{}",
                        format!("Please enter a number from 1 to {}.", stage.choices().len())
                            .bright_black()
                    ),
                }
            }
        }
    }

    Ok(())
}

fn print_thinking() {
    println!("{}", "Thinking...".bright_black());
}

fn show_wizard_result(result: InteractionResult) {
    match result {
        InteractionResult::ChatReady { greeting } => {
            println!();
            print_assistant(&greeting);
            println!(
                "{}",
                "Ask a question, or pick a suggestion with /1, /2 or /3:".bright_black()
            );
        }
        InteractionResult::StageChanged(_) | InteractionResult::NoOp => {}
        other => tracing::debug!("[Main] unexpected wizard result: {:?}", other),
    }
}

fn show_turn(manager: &InteractionManager, result: bmcc_core::Result<InteractionResult>) {
    match result {
        Ok(InteractionResult::Answer {
            text,
            suggestions_changed,
        }) => {
            print_assistant(&text);
            if suggestions_changed {
                print_suggestions(manager);
            }
        }
        Ok(InteractionResult::TurnFailed { text, .. }) => {
            println!("{}", text.red());
            println!();
        }
        Ok(_) => {}
        Err(err) => println!("{}", err.user_message().red()),
    }
}

fn print_stage(stage: WizardStage) {
    println!("{}", stage.question().bright_yellow().bold());
    if let Some(hint) = stage.hint() {
        println!("{}", hint.bright_black());
    }
    for (i, choice) in stage.choices().iter().enumerate() {
        println!("  {}", format!("{}. {}", i + 1, choice.label()).yellow());
    }
}

fn print_assistant(text: &str) {
    for line in text.lines() {
        println!("{}", line.bright_blue());
    }
    println!();
}

fn print_suggestions(manager: &InteractionManager) {
    println!("{}", "Suggested questions:".bright_black());
    for (i, suggestion) in manager.suggestions().iter().enumerate() {
        println!("  {}", format!("/{} {}", i + 1, suggestion).cyan());
    }
    println!();
}

fn print_profile(manager: &InteractionManager) {
    println!("{}", "Your Profile".bright_magenta().bold());
    for (label, value) in manager.profile_panel() {
        println!("  {}: {}", label.bright_black(), value);
    }
    println!();
}

/// `HH:MM` in local time for an RFC 3339 stamp; the raw text if it does not parse.
fn format_time(timestamp: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.with_timezone(&chrono::Local).format("%H:%M").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

fn print_history(manager: &InteractionManager) {
    let session = manager.session();
    let log = session.log();
    if log.is_empty() {
        println!("{}", "No messages yet.".bright_black());
        return;
    }
    println!(
        "{}",
        format!("Session started at {}", format_time(session.created_at())).bright_black()
    );
    for message in log {
        let time = format!("[{}]", format_time(message.timestamp())).bright_black();
        match message.role() {
            MessageRole::User => println!("{} {}", time, format!("> {}", message.text()).green()),
            MessageRole::Assistant => {
                println!("{}", time);
                print_assistant(message.text());
            }
        }
    }
}

fn print_help() {
    println!("{}", "Commands:".bright_magenta());
    let rows = [
        ("1, 2, ...", "answer the current question"),
        ("/1 /2 /3", "ask a suggested question"),
        ("/suggest", "list suggested questions"),
        ("/profile", "show your profile"),
        ("/history", "replay the conversation"),
        ("/reset", "start over"),
        ("quit, exit", "leave the guide"),
    ];
    for (cmd, what) in rows {
        println!("  {:<12} {}", cmd.bright_cyan(), what);
    }
    println!();
}
