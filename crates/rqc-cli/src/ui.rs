//! Console chrome: banner, prompt input with history, help text

use std::io::{self, IsTerminal, Write};

use colored::*;
use crossterm::{
    event::{self, Event, KeyCode},
    terminal::{disable_raw_mode, enable_raw_mode, size},
};

use rqc_core::Result;

use crate::theme::Theme;

/// Display the startup banner
pub fn display_banner(theme: &Theme) {
    let terminal_width = size().map(|(w, _)| w as usize).unwrap_or(80);
    let banner_width = std::cmp::min(60, terminal_width.saturating_sub(4));
    let inner = banner_width - 2;

    let top = format!("┌{}┐", "─".repeat(inner));
    let bottom = format!("└{}┘", "─".repeat(inner));
    let blank = format!("│{}│", " ".repeat(inner));

    let lines = [
        "rqc - RAG Query Console",
        "",
        "Screens:",
        "• sources - upload documents, track ingestion",
        "• query - ask questions, see cited answers",
        "",
        "↑/↓ input history • 'help' for commands",
    ];

    println!();
    println!("{}", top.color(theme.accent()));
    println!("{}", blank.color(theme.accent()));
    for line in lines {
        if line.is_empty() {
            println!("{}", blank.color(theme.accent()));
        } else {
            let pad = inner.saturating_sub(line.chars().count() + 2);
            let content = format!("│  {}{}│", line, " ".repeat(pad));
            println!("{}", content.color(theme.accent()));
        }
    }
    println!("{}", blank.color(theme.accent()));
    println!("{}", bottom.color(theme.accent()));
    println!();
}

/// Read one line of input with ↑/↓ history navigation.
///
/// Returns `None` once input is exhausted. When stdin is not a terminal
/// (piped input, tests) the raw-mode editor is skipped and a plain line
/// read is used instead.
pub async fn read_input(
    label: &str,
    theme: &Theme,
    history: &mut Vec<String>,
) -> Result<Option<String>> {
    if !io::stdin().is_terminal() {
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        let input = input.trim().to_string();
        if !input.is_empty() {
            history.push(input.clone());
        }
        return Ok(Some(input));
    }

    let prompt = format!("{}>", label).color(theme.prompt()).bold();
    let redraw = |input: &str| -> Result<()> {
        // Overdraw with spaces first so shortened input leaves no tail.
        print!("\r{} {}  \r{} {}", prompt, " ".repeat(60), prompt, input);
        io::stdout().flush()?;
        Ok(())
    };

    enable_raw_mode()?;
    let mut input = String::new();
    let mut history_index: Option<usize> = None;

    print!("{} ", prompt);
    io::stdout().flush()?;

    loop {
        if let Event::Key(key_event) = event::read()? {
            match key_event.code {
                KeyCode::Enter => {
                    disable_raw_mode()?;
                    println!();
                    if !input.is_empty() {
                        history.push(input.clone());
                    }
                    return Ok(Some(input));
                }
                KeyCode::Char(c) => {
                    input.push(c);
                    redraw(&input)?;
                }
                KeyCode::Backspace => {
                    if input.pop().is_some() {
                        redraw(&input)?;
                    }
                }
                KeyCode::Up => {
                    if !history.is_empty() {
                        let next = match history_index {
                            None => history.len() - 1,
                            Some(idx) if idx > 0 => idx - 1,
                            Some(idx) => idx,
                        };
                        history_index = Some(next);
                        input = history[next].clone();
                        redraw(&input)?;
                    }
                }
                KeyCode::Down => {
                    if let Some(idx) = history_index {
                        if idx < history.len() - 1 {
                            history_index = Some(idx + 1);
                            input = history[idx + 1].clone();
                        } else {
                            history_index = None;
                            input.clear();
                        }
                        redraw(&input)?;
                    }
                }
                KeyCode::Esc => {
                    disable_raw_mode()?;
                    println!();
                    return Ok(Some(String::new()));
                }
                _ => {}
            }
        }
    }
}

/// Prompt for one plain line (no history, no raw mode)
pub fn read_plain(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Yes/no confirmation, defaulting to yes
pub fn confirm(question: &str) -> Result<bool> {
    print!("{} [Y/n]: ", question);
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    let response = response.trim().to_lowercase();

    Ok(response.is_empty() || response == "y" || response == "yes")
}

/// One-line error alert in the theme's error color
pub fn print_alert(theme: &Theme, message: &str) {
    eprintln!("{}", format!("error: {}", message).color(theme.error()));
}

/// Display the command reference
pub fn print_help() {
    println!("{}", "Available commands:".bold());
    println!("  {} - switch to the document upload screen", "sources".green());
    println!("  {} - switch to the question screen", "query".green());
    println!("  {} - toggle light/dark colors", "theme".green());
    println!("  {} - show this help message", "help".green());
    println!("  {} - leave the console", "exit/quit".green());
    println!();
    println!("{}", "On the sources screen:".bold());
    println!("  enter a file path (.pdf, .docx, .txt, .csv, .xlsx) to upload it");
    println!();
    println!("{}", "On the query screen:".bold());
    println!("  enter a question; an optional JSON filter is asked for next");
}
