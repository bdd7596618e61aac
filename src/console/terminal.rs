//! Line-oriented terminal driver for the console menus.

use std::time::Duration;

use anyhow::Result;
use log::debug;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use super::commands::CommandProcessor;
use super::session::Session;
use crate::config::Config;
use crate::social::SocialStore;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Run the menus on the process's stdin/stdout until the user exits or stdin closes.
///
/// When stdin is a terminal, passwords are read without echo.
pub async fn run(store: &mut SocialStore, config: &Config) -> Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let mut writer = tokio::io::stdout();
    let hide_passwords = atty::is(atty::Stream::Stdin);
    run_with(reader, &mut writer, store, config, hide_passwords).await
}

/// Drive a session over arbitrary async I/O. Returns when the session exits or
/// the reader reaches end of input.
pub async fn run_with<R, W>(
    reader: R,
    writer: &mut W,
    store: &mut SocialStore,
    config: &Config,
    hide_passwords: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let processor = CommandProcessor::new();
    let mut session = Session::new();
    let mut lines = reader.lines();

    while !session.is_exited() {
        writer.write_all(session.prompt(config).as_bytes()).await?;
        writer.flush().await?;

        let line = if hide_passwords && session.awaits_secret() {
            Some(tokio::task::spawn_blocking(rpassword::read_password).await??)
        } else {
            lines.next_line().await?
        };
        let Some(line) = line else {
            debug!("console input closed");
            break;
        };

        let reply = processor.process(&mut session, &line, store);
        if reply.is_empty() {
            continue;
        }
        writer.write_all(reply.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        pace(writer, config).await?;
    }
    Ok(())
}

/// Optional pause and screen clear after a result, as configured in `[console]`.
async fn pace<W: AsyncWrite + Unpin>(writer: &mut W, config: &Config) -> Result<()> {
    if config.console.pause_ms > 0 {
        tokio::time::sleep(Duration::from_millis(config.console.pause_ms)).await;
    }
    if config.console.clear_screen {
        writer.write_all(CLEAR_SCREEN.as_bytes()).await?;
        writer.flush().await?;
    }
    Ok(())
}
