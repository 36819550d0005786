//! The ask flow: transport call, parse, render, execution menu
//!
//! This is the default command. Everything runs on one thread: wait for the
//! API, parse the reply into segments, render them, then (optionally) walk
//! the execution menu.

use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result};

use crate::api::{ApiClient, Metadata};
use crate::domain::parse_reply;
use crate::storage::{Config, History};

use super::input::TerminalInput;
use super::menu::ExecutionMenu;
use super::output::Output;
use super::render::Renderer;
use super::runner::ShellRunner;

pub fn run(output: &Output, question: &str, fresh: bool) -> Result<()> {
    let config = Config::load()?;
    let config_dir = Config::config_dir()?;

    let mut history = History::load(&config_dir);
    if fresh {
        output.verbose_ctx("ask", "Clearing interaction history");
        history.clear();
    }

    let metadata = if config.meta {
        Some(Metadata::collect())
    } else {
        None
    };
    output.verbose_ctx(
        "ask",
        &format!("Sending question, metadata shared: {}", metadata.is_some()),
    );

    let client = ApiClient::new()?;

    let loading = output.is_text() && io::stdout().is_terminal();
    if loading {
        print!("⌛ Waiting for an answer...");
        io::stdout().flush().ok();
    }

    let result = client.question(&config, question, history.entries(), metadata.as_ref());

    if loading {
        // Clear the loading line before anything else is printed
        print!("\r\x1b[2K");
        io::stdout().flush().ok();
    }

    let answer = result.context("The assistant could not answer")?;

    history.add(
        question.to_string(),
        answer.reply.clone(),
        answer.persona_reply.clone(),
    );
    if let Err(e) = history.save() {
        output.warn(&format!("Could not save history: {:#}", e));
    }

    // The persona answer, when present, replaces the plain one
    let reply_text = answer.persona_reply.as_deref().unwrap_or(&answer.reply);
    let segments = parse_reply(reply_text);
    output.verbose_ctx("ask", &format!("Parsed {} segments", segments.len()));

    if output.is_json() {
        output.data(&segments);
        return Ok(());
    }

    let renderer = Renderer::from_config(&config, output);
    let mut stdout = io::stdout().lock();
    renderer.render(&segments, &mut stdout)?;

    let has_commands = segments.iter().any(|s| s.is_command());
    let interactive = io::stdin().is_terminal() && io::stdout().is_terminal();

    if config.run && has_commands && interactive {
        drop(stdout);
        let mut runner = ShellRunner;
        let mut input = TerminalInput;
        let mut writer = io::stdout().lock();
        let summary =
            ExecutionMenu::new(&renderer, &mut runner, &mut input, &mut writer).run(&segments)?;
        output.verbose_ctx(
            "ask",
            &format!(
                "Menu finished: {} executed, {} skipped, aborted: {}",
                summary.executed, summary.skipped, summary.aborted
            ),
        );
    }

    if let Some(latest) = answer.latest_version.as_deref() {
        if is_newer(latest, env!("CARGO_PKG_VERSION")) {
            println!();
            println!(
                "A newer version ({}) is available, please consider updating.",
                latest
            );
        }
    }

    Ok(())
}

/// Compares dotted version strings numerically, component by component
fn is_newer(latest: &str, current: &str) -> bool {
    let parse = |v: &str| -> Vec<u64> {
        v.split('.')
            .map(|part| part.trim().parse().unwrap_or(0))
            .collect()
    };
    parse(latest) > parse(current)
}
