//! Line-oriented terminal loop over the inference proxy.
//!
//! Each line is an independent query; nothing is remembered between turns.
//! The loop is generic over its reader and writer so it runs the same way
//! against stdin/stdout and in-memory buffers.

use firstaid_core::AdviceService;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

const RULE_WIDTH: usize = 60;
const PROMPT: &str = "You: ";

/// Words that end the session, compared case-insensitively.
pub const EXIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

/// What a single line of input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    Quit,
    Empty,
    Query(&'a str),
}

impl<'a> Input<'a> {
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            Input::Empty
        } else if EXIT_WORDS.iter().any(|w| trimmed.eq_ignore_ascii_case(w)) {
            Input::Quit
        } else {
            Input::Query(trimmed)
        }
    }
}

/// Runs the read-ask-print loop until an exit word or end of input.
pub async fn run<R, W>(input: R, output: &mut W, advisor: &dyn AdviceService) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let rule = "=".repeat(RULE_WIDTH);
    let banner = format!(
        "{rule}\nEmergency Health Assistant - Terminal\n{rule}\n\
         Type your health emergency query below.\n\
         Type 'quit' or 'exit' to stop.\n\n"
    );
    output.write_all(banner.as_bytes()).await?;

    let mut lines = input.lines();
    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            output.write_all(b"\n").await?;
            break;
        };

        let message = match Input::parse(&line) {
            Input::Quit => break,
            Input::Empty => {
                output.write_all(b"Please enter a query.\n\n").await?;
                continue;
            }
            Input::Query(message) => message,
        };

        output.write_all(b"\nThinking...\n").await?;
        output.flush().await?;

        let reply = match advisor.generate_advice(message).await {
            Ok(advice) => format!("\nAssistant: {}\n\n", advice.assistant_text),
            Err(e) => {
                debug!(kind = %e.kind(), "Turn failed");
                format!("\nError: {}\n\n", e)
            }
        };
        output.write_all(reply.as_bytes()).await?;
        output.write_all(format!("{}\n", "-".repeat(RULE_WIDTH)).as_bytes()).await?;
    }

    output.write_all(b"\nGoodbye! Stay safe!\n").await?;
    output.flush().await
}
