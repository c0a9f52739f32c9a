//! Interactive terminal loop
//!
//! Reads commands line by line while background completions keep arriving.
//! The screen is redrawn after every change to the workspace.

use crate::commands::{Command, HELP};
use crate::error::ClientResult;
use crate::render;
use crate::session::Session;
use fitness_coach_shared::Event;
use std::future::Future;
use std::io::ErrorKind;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

enum Input {
    Line(std::io::Result<Option<String>>),
    Completion(Option<Event>),
    Shutdown,
}

/// Run the loop until `quit`, end of input, or `shutdown` resolves
///
/// At end of input the loop waits for outstanding work before returning.
pub async fn run<R, W, S>(session: &mut Session, input: R, mut output: W, shutdown: S) -> ClientResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: Future<Output = ()>,
{
    session.apply(Event::LoadMotivation);
    draw(session, &mut output).await?;

    let mut lines = input.lines();
    tokio::pin!(shutdown);

    loop {
        let next = tokio::select! {
            _ = &mut shutdown => Input::Shutdown,
            line = lines.next_line() => Input::Line(line),
            event = session.next_completion() => Input::Completion(event),
        };

        match next {
            Input::Shutdown => {
                info!("Shutting down session");
                break;
            }
            Input::Line(Err(err)) if err.kind() == ErrorKind::InvalidData => {
                warn!(error = %err, "Skipping unreadable input line");
                say(&mut output, &format!("Could not read that line: {}", err)).await?;
            }
            Input::Line(Err(err)) => return Err(err.into()),
            Input::Line(Ok(None)) => {
                debug!("End of input, waiting for outstanding work");
                session.settle().await;
                draw(session, &mut output).await?;
                break;
            }
            Input::Line(Ok(Some(line))) => match Command::parse(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(Command::Help)) => say(&mut output, HELP).await?,
                Ok(Some(command)) => match command.into_event(session.workspace()) {
                    Ok(Some(event)) => {
                        session.apply(event);
                        draw(session, &mut output).await?;
                    }
                    Ok(None) => draw(session, &mut output).await?,
                    Err(err) => say(&mut output, &err.to_string()).await?,
                },
                Err(err) => say(&mut output, &err.to_string()).await?,
            },
            Input::Completion(Some(event)) => {
                session.apply(event);
                draw(session, &mut output).await?;
            }
            Input::Completion(None) => {}
        }
    }

    output.flush().await?;
    Ok(())
}

async fn draw<W: AsyncWrite + Unpin>(session: &mut Session, output: &mut W) -> ClientResult<()> {
    let mut text = render::screen(&session.screen());
    text.push_str(&render::notices(&session.take_notices()));
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"> ").await?;
    output.flush().await?;
    Ok(())
}

async fn say<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> ClientResult<()> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n> ").await?;
    output.flush().await?;
    Ok(())
}
