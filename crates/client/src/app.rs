//! Composition of the runtime, the transport and the chat commands.

use anyhow::{Context, Result};
use dice_core::Position;
use runtime::{Event, Runtime, RuntimeConfig, RuntimeHandle, Topic};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::command::ChatCommand;
use crate::transport::{Inbound, LineSink, LineWriter};

/// Client application driving one runtime over a line transport.
pub struct App<W> {
    runtime: Runtime,
    writer: LineWriter<W>,
}

impl<W> App<W>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    /// Builds the runtime with a sink that writes to `output`.
    pub fn new(config: RuntimeConfig, output: W) -> Result<Self> {
        let writer = LineWriter::new(output);
        let runtime = Runtime::builder()
            .config(config)
            .sink(LineSink::new(writer.clone()))
            .build()
            .context("Failed to build runtime")?;

        Ok(Self { runtime, writer })
    }

    /// Processes inbound lines until `input` is exhausted, then waits for
    /// in-flight commands and shuts the runtime down.
    pub async fn run<R>(self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let handle = self.runtime.handle();
        let mut consumers = spawn_event_consumers(&handle, self.writer.clone());
        let mut commands = JoinSet::new();

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await.context("Failed to read input")? {
            let inbound = match Inbound::parse(&line) {
                Ok(inbound) => inbound,
                Err(err) => {
                    warn!("Skipping line {:?}: {}", line, err);
                    continue;
                }
            };

            match inbound {
                Inbound::ObserverMoved { x, y } => {
                    handle.observer_moved(Position::new(x, y)).await;
                }
                Inbound::Object { id, x, y } => handle.object_report(id, x, y).await?,
                Inbound::Value { id, raw } => handle.value_report(id, raw).await?,
                Inbound::Chat(text) => match ChatCommand::recognize(&text) {
                    Some(command) => execute(&handle, command, &mut commands).await,
                    None => self.writer.forward(&text).await?,
                },
            }

            // Reap finished commands so the set does not grow unbounded.
            while let Some(joined) = commands.try_join_next() {
                log_join(joined);
            }
        }

        info!("Input closed, waiting for {} pending commands", commands.len());
        while let Some(joined) = commands.join_next().await {
            log_join(joined);
        }

        drop(handle);
        self.runtime.shutdown().await?;

        while let Some(joined) = consumers.join_next().await {
            log_join(joined);
        }
        Ok(())
    }
}

/// Runs one chat command. Packet sequences are spawned so the input loop keeps
/// draining reports while they are paced out.
async fn execute(handle: &RuntimeHandle, command: ChatCommand, commands: &mut JoinSet<()>) {
    debug!("Chat command: {}", command);
    match command {
        ChatCommand::Close => {
            // Stopped before any later report is read, so none can complete it.
            handle.stop_capture().await;
            let handle = handle.clone();
            commands.spawn(async move {
                handle.close_all().await;
            });
        }
        ChatCommand::Setup => handle.start_capture().await,
        ChatCommand::Roll => {
            let handle = handle.clone();
            commands.spawn(async move {
                handle.roll_all().await;
            });
        }
        ChatCommand::Triangle => {
            let handle = handle.clone();
            commands.spawn(async move {
                handle.roll_triangle().await;
            });
        }
        ChatCommand::DisableMessages => handle.set_poker_messages(false),
        ChatCommand::EnableMessages => handle.set_poker_messages(true),
    }
}

/// One task per topic: notices go back to the roller, everything is logged
/// as JSON for offline inspection.
fn spawn_event_consumers<W>(handle: &RuntimeHandle, writer: LineWriter<W>) -> JoinSet<()>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let mut consumers = JoinSet::new();
    for (topic, rx) in handle.subscribe_multiple(&Topic::ALL) {
        let writer = writer.clone();
        consumers.spawn(consume(topic, rx, writer));
    }
    consumers
}

async fn consume<W>(topic: Topic, mut rx: broadcast::Receiver<Event>, writer: LineWriter<W>)
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    loop {
        let event = match rx.recv().await {
            Ok(event) => event,
            Err(RecvError::Lagged(skipped)) => {
                warn!("{:?} consumer lagged, skipped {} events", topic, skipped);
                continue;
            }
            Err(RecvError::Closed) => break,
        };

        match serde_json::to_string(&event) {
            Ok(json) => debug!(target: "easydice::events", "{}", json),
            Err(err) => warn!("Failed to serialize event: {}", err),
        }

        if let Event::Notice(notice) = &event
            && let Err(err) = writer.chat(&notice.to_string()).await
        {
            warn!("Failed to write notice: {}", err);
        }
    }
}

fn log_join(joined: Result<(), tokio::task::JoinError>) {
    if let Err(err) = joined {
        warn!("Background task failed: {}", err);
    }
}
