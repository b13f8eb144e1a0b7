// Framework bootstrap for the client runtime and its single event loop.

use crate::domain::{Command, CommandError, CommandTransport, Notifier};
use crate::frameworks::config;
use crate::interface_adapters::clients::ApiClient;
use crate::interface_adapters::console::{self, Console};
use crate::interface_adapters::net::{Connection, PatchReceiver};
use crate::use_cases::{CommandDispatcher, Gesture, Presenter, StateStore, ViewBinding};

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use std::io::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

type CommandOutcome = (Command, std::result::Result<(), CommandError>);

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Logs go to stderr; stdout belongs to the console view.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Runs one client session until the gesture source closes and in-flight commands settle.
///
/// Push frames, command completions, and gestures are serviced by one loop on one task.
/// The store is written only by frames from `connection`; commands never touch it.
/// Returns the store so callers can inspect the final mirrored state.
pub async fn run<T, N, P>(
    connection: Connection,
    dispatcher: CommandDispatcher<T, N>,
    presenter: P,
    mut gestures: mpsc::Receiver<Gesture>,
) -> StateStore
where
    T: CommandTransport + 'static,
    N: Notifier + 'static,
    P: Presenter,
{
    let mut receiver = PatchReceiver::new(connection);
    let mut store = StateStore::new();
    let mut snapshots = store.subscribe();
    let mut view = ViewBinding::new();
    let dispatcher = Arc::new(dispatcher);
    let mut in_flight: FuturesUnordered<BoxFuture<'static, CommandOutcome>> =
        FuturesUnordered::new();

    let mut push_open = true;
    let mut gestures_open = true;

    let initial = snapshots.borrow_and_update().clone();
    presenter.show(&view.render(&initial));

    while gestures_open || !in_flight.is_empty() {
        let mut selection_changed = false;

        tokio::select! {
            frame = receiver.next_frame(), if push_open => match frame {
                Ok(Some(frame)) => {
                    receiver.forward(frame, &mut store);
                }
                Ok(None) => {
                    warn!("push channel closed by server; view is now stale");
                    receiver.log_stats();
                    push_open = false;
                }
                Err(e) => {
                    error!(error = %e, "push channel failed; view is now stale");
                    receiver.log_stats();
                    push_open = false;
                }
            },
            Some(outcome) = in_flight.next(), if !in_flight.is_empty() => {
                report_outcome(outcome);
            }
            gesture = gestures.recv(), if gestures_open => match gesture {
                Some(gesture) => {
                    let snapshot = snapshots.borrow().clone();
                    let selected = view.selected_game_id();
                    if let Some(command) = view.handle(gesture, &snapshot) {
                        in_flight.push(dispatch(dispatcher.clone(), command));
                    }
                    selection_changed = selected != view.selected_game_id();
                }
                None => {
                    debug!(pending = in_flight.len(), "gesture source closed");
                    gestures_open = false;
                }
            },
            else => break,
        }

        let snapshot_changed = snapshots.has_changed().unwrap_or(false);
        if snapshot_changed || selection_changed {
            let snapshot = snapshots.borrow_and_update().clone();
            presenter.show(&view.render(&snapshot));
        }
    }

    if push_open {
        receiver.log_stats();
    }
    store
}

fn dispatch<T, N>(
    dispatcher: Arc<CommandDispatcher<T, N>>,
    command: Command,
) -> BoxFuture<'static, CommandOutcome>
where
    T: CommandTransport + 'static,
    N: Notifier + 'static,
{
    async move {
        let result = dispatcher.execute(command.clone()).await;
        (command, result)
    }
    .boxed()
}

fn report_outcome((command, result): CommandOutcome) {
    match result {
        Ok(()) => debug!(command = command.name(), "command completed"),
        // Already surfaced per the command's rejection policy.
        Err(CommandError::Rejected { status, .. }) => {
            debug!(command = command.name(), status, "command rejected")
        }
        Err(CommandError::Transport(e)) => {
            error!(command = command.name(), error = %e, "command failed")
        }
    }
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let push_url = config::push_url();
    let api_base_url = config::api_base_url();
    let session_cookie = config::session_cookie();
    let request_timeout = config::request_timeout();

    let api = ApiClient::new(
        api_base_url.clone(),
        request_timeout,
        session_cookie.as_deref(),
    )
    .map_err(|e| std::io::Error::other(format!("failed to initialize api client: {e}")))?;
    debug!(
        api_base_url = %api_base_url,
        request_timeout_ms = request_timeout.as_millis(),
        has_session_cookie = session_cookie.is_some(),
        "api client configured"
    );

    // The push connection is opened exactly once per process.
    let connection = Connection::open(&push_url, session_cookie.as_deref())
        .await
        .inspect_err(|e| {
            tracing::error!(%push_url, error = %e, "failed to open push channel");
        })
        .map_err(std::io::Error::other)?;

    let (gesture_tx, gesture_rx) = mpsc::channel::<Gesture>(config::GESTURE_CHANNEL_CAPACITY);
    tokio::spawn(console::read_gestures(gesture_tx));

    let dispatcher = CommandDispatcher::new(api, Console);
    run(connection, dispatcher, Console, gesture_rx).await;

    info!("session ended");
    Ok(())
}
