use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tasklist_core::Config;
use tasklist_services::{RetryConfig, TaskClient};
use tasklist_ui::{execute, parse_command, render_view, ConfirmPrompt, Outcome, TaskListModel};
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Confirms by reading the next input line.
struct LinePrompt<'a> {
    lines: &'a mut UnboundedReceiver<String>,
}

#[async_trait]
impl ConfirmPrompt for LinePrompt<'_> {
    async fn confirm(&mut self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        let _ = std::io::stdout().flush();
        match self.lines.recv().await {
            Some(answer) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            None => false,
        }
    }
}

/// Read stdin on a plain thread; the channel closes at EOF.
fn spawn_stdin_reader() -> UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

fn redraw(model: &TaskListModel) {
    println!("\n{}", render_view(model));
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn build_store(config: &Config) -> Result<TaskClient> {
    let store = &config.store;
    let retry = RetryConfig::new(
        store.max_retries,
        store.retry_initial_delay_ms,
        store.retry_max_delay_ms,
    );
    TaskClient::with_options(
        &store.base_url,
        Duration::from_secs(store.timeout_secs),
        retry,
    )
    .context("Failed to create task store client")
}

#[tokio::main]
async fn main() -> Result<()> {
    tasklist_core::init()?;

    let config = Config::load_validated()?;
    let client = build_store(&config)?;
    tracing::info!("Using task store at {}", client.base_url());

    let mut model = TaskListModel::new(Arc::new(client), tokio::runtime::Handle::current())
        .with_failure_notices(config.notices.report_failures);
    let mut lines = spawn_stdin_reader();

    model.fetch_tasks();
    println!("Type `help` for commands.");
    redraw(&model);

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };
                let command = match parse_command(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{}", e);
                        print!("> ");
                        let _ = std::io::stdout().flush();
                        continue;
                    }
                };

                let mut prompt = LinePrompt { lines: &mut lines };
                match execute(&mut model, command, &mut prompt).await {
                    Outcome::Render => redraw(&model),
                    Outcome::Say(text) => {
                        println!("{}", text);
                        print!("> ");
                        let _ = std::io::stdout().flush();
                    }
                    Outcome::Quit => break,
                }
            }
            applied = model.next_message(), if model.in_flight() > 0 => {
                if applied {
                    model.process_messages();
                    redraw(&model);
                }
            }
        }
    }

    tracing::info!("Tasklist exiting");
    Ok(())
}
