//! Interactive AI assistant session
//!
//! Lines are sent as messages. `/retry` resends the last failed message,
//! `/clear` starts over and `/quit` leaves.

use aqua_client::chat::{ChatMessage, ChatWidget};
use shared::models::ChatSpeaker;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::Console;

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Message(String),
    Retry,
    Clear,
    Quit,
    Empty,
}

pub fn parse_input(line: &str) -> Input {
    match line.trim() {
        "" => Input::Empty,
        "/retry" => Input::Retry,
        "/clear" => Input::Clear,
        "/quit" | "/exit" => Input::Quit,
        text => Input::Message(text.to_string()),
    }
}

fn speaker(message: &ChatMessage) -> &'static str {
    match message.speaker {
        ChatSpeaker::User => "you",
        ChatSpeaker::Assistant => "assistant",
        ChatSpeaker::Error => "error",
    }
}

fn print_from(out: &mut impl Write, widget: &ChatWidget, from: usize) -> io::Result<()> {
    for message in widget.messages().iter().skip(from) {
        if message.speaker != ChatSpeaker::User {
            writeln!(out, "{:>9}> {}", speaker(message), message.content)?;
        }
    }
    Ok(())
}

pub async fn run(console: &Console) -> anyhow::Result<()> {
    let mut widget = ChatWidget::open(console.api().clone());
    let mut out = io::stdout();

    match widget.load_history().await {
        Ok(0) => {}
        Ok(n) => {
            writeln!(out, "Resumed session with {n} earlier messages")?;
            for message in widget.messages() {
                writeln!(out, "{:>9}> {}", speaker(message), message.content)?;
            }
        }
        Err(e) => tracing::warn!(error = %e, "Chat history unavailable"),
    }
    writeln!(out, "Ask about water quality, licensing or your plants. /retry /clear /quit")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(out, "      you> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let before = widget.messages().len();
        match parse_input(&line) {
            Input::Empty => continue,
            Input::Quit => break,
            Input::Clear => {
                widget.clear().await;
                writeln!(out, "Conversation cleared")?;
            }
            Input::Retry => {
                if !widget.retry() {
                    writeln!(out, "Nothing to retry")?;
                    continue;
                }
                if let Err(e) = widget.send().await {
                    tracing::debug!(error = %e, "Retry failed");
                }
                writeln!(out, "({} retries left)", widget.retries_left())?;
            }
            Input::Message(text) => {
                widget.set_input(text);
                if let Err(e) = widget.send().await {
                    tracing::debug!(error = %e, "Chat message failed");
                }
            }
        }
        print_from(&mut out, &widget, before)?;
        console.flush(&mut out)?;
    }
    Ok(())
}
