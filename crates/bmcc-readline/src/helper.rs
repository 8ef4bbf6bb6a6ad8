use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

pub const COMMANDS: [&str; 8] = [
    "/1", "/2", "/3", "/suggest", "/profile", "/reset", "/history", "/help",
];

/// Rustyline helper: completion, highlighting and hints for slash commands.
#[derive(Clone)]
pub struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    pub fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn matching<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a String> {
        self.commands.iter().filter(move |cmd| cmd.starts_with(prefix))
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates = self
                .matching(line)
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.matching(line)
                .find(|cmd| cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}
