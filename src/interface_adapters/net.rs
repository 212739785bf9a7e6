use crate::frameworks::config;
use crate::interface_adapters::protocol::{ClientMessage, ServerMessage};
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::utils::session_id::next_session_id;
use crate::use_cases::{GameEvent, SessionEvent};

use axum::{
    Error,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::SinkExt;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn};

#[derive(Debug)]
enum NetError {
    // Categorizes connection lifecycle failures so callers can decide policy.
    #[allow(dead_code)]
    Ws(axum::Error),
    #[allow(dead_code)]
    Serialization(serde_json::Error),
    EventsClosed,
    OutboundClosed,
}

impl From<axum::Error> for NetError {
    fn from(e: axum::Error) -> Self {
        NetError::Ws(e)
    }
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    // The session id doubles as the player id; assigned once per connection
    // and never reused.
    let session_id = next_session_id();
    let span = info_span!("conn", session_id);
    let _enter = span.enter();

    let mut ctx = match bootstrap_connection(&state, session_id).await {
        Ok(ctx) => ctx,
        Err(e) => {
            warn!(error = ?e, "failed to bootstrap connection");
            let _ = socket.close().await;
            return;
        }
    };

    info!("client connected");

    // Main Client Loop
    if let Err(e) = run_client_loop(&mut socket, &mut ctx).await {
        warn!(error = ?e, "client loop exited with error");
    }
}

struct ConnCtx {
    pub session_id: u64,
    pub events_tx: mpsc::Sender<GameEvent>,
    pub outbound_rx: mpsc::Receiver<SessionEvent>,
    // Periodic gameState fan-out scoped to this connection's lifetime.
    pub broadcast_timer: JoinHandle<()>,

    pub msgs_in: u64,
    pub msgs_out: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,

    pub invalid_msgs: u32,

    pub last_invalid_msg_log: Instant,
    pub last_event_full_log: Instant,
}

async fn bootstrap_connection(state: &AppState, session_id: u64) -> Result<ConnCtx, NetError> {
    // Register with the world task. The Init reply arrives on the outbound
    // queue ahead of any broadcast addressed to this session, because the
    // queue is FIFO and the world processes Connect first.
    let (outbound_tx, outbound_rx) = mpsc::channel(config::OUTBOUND_CHANNEL_CAPACITY);
    state
        .events_tx
        .send(GameEvent::Connect {
            session_id,
            outbound_tx,
        })
        .await
        .map_err(|_| NetError::EventsClosed)?;

    // Start this session's broadcast timer. Every tick asks the world task
    // to fan out a full snapshot to all live sessions.
    let timer_events_tx = state.events_tx.clone();
    let broadcast_timer = tokio::spawn(async move {
        let mut interval = tokio::time::interval(config::BROADCAST_INTERVAL);
        loop {
            interval.tick().await;
            if timer_events_tx.send(GameEvent::Snapshot).await.is_err() {
                break;
            }
        }
    });

    let now = Instant::now() - LOG_THROTTLE;
    Ok(ConnCtx {
        session_id,
        events_tx: state.events_tx.clone(),
        outbound_rx,
        broadcast_timer,

        msgs_in: 0,
        msgs_out: 0,
        bytes_in: 0,
        bytes_out: 0,

        invalid_msgs: 0,

        last_invalid_msg_log: now,
        last_event_full_log: now,
    })
}

enum LoopControl {
    Continue,
    Disconnect,
}

const LOG_THROTTLE: Duration = Duration::from_secs(2);

fn should_log(last: &mut Instant) -> bool {
    if last.elapsed() >= LOG_THROTTLE {
        *last = Instant::now();
        true
    } else {
        false
    }
}

async fn run_client_loop(socket: &mut WebSocket, ctx: &mut ConnCtx) -> Result<(), NetError> {
    let session_id = ctx.session_id;

    // Split borrows so `tokio::select!` can hold them concurrently.
    let ConnCtx {
        events_tx,
        outbound_rx,
        msgs_in,
        msgs_out,
        bytes_in,
        bytes_out,
        invalid_msgs,
        last_invalid_msg_log,
        last_event_full_log,
        ..
    } = ctx;

    let mut fatal: Option<NetError> = None;

    loop {
        // disconnect becomes true on error
        let disconnect: bool = tokio::select! {
            // Incoming Message from Client
            incoming = socket.recv() => {
                match handle_incoming_ws(
                    incoming,
                    session_id,
                    events_tx,
                    msgs_in,
                    bytes_in,
                    invalid_msgs,
                    last_invalid_msg_log,
                    last_event_full_log,
                ) {
                    Ok(LoopControl::Continue) => false,
                    Ok(LoopControl::Disconnect) => true,
                    Err(e) => {
                        fatal = Some(e);
                        true
                    }
                }
            }

            // Outgoing event from the world task.
            outbound = outbound_rx.recv() => {
                match outbound {
                    Some(event) => match forward_session_event(event, socket, msgs_out, bytes_out).await {
                        LoopControl::Continue => false,
                        LoopControl::Disconnect => true,
                    },
                    None => {
                        warn!(session_id, "outbound queue closed; disconnecting");
                        fatal = Some(NetError::OutboundClosed);
                        true
                    }
                }
            }
        };

        if disconnect {
            if let Err(err) = socket.close().await.map_err(NetError::Ws) {
                debug!(error = ?err, "socket close error");
            }
            break;
        }
    }

    if let Err(e) = disconnect_cleanup(ctx).await {
        warn!(error = ?e, "error during disconnect cleanup");
        if fatal.is_none() {
            fatal = Some(e);
        }
    }

    if let Some(err) = fatal {
        Err(err)
    } else {
        Ok(())
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_incoming_ws(
    incoming: Option<Result<Message, Error>>,
    session_id: u64,
    events_tx: &mpsc::Sender<GameEvent>,
    msgs_in: &mut u64,
    bytes_in: &mut u64,
    invalid_msgs: &mut u32,
    last_invalid_msg_log: &mut Instant,
    last_event_full_log: &mut Instant,
) -> Result<LoopControl, NetError> {
    match incoming {
        Some(Ok(msg)) => match msg {
            Message::Text(text) => {
                *msgs_in += 1;
                *bytes_in += text.len() as u64;

                // Unknown tokens and malformed payloads are dropped without
                // surfacing anything to the sender.
                match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::MovePlayer(direction)) => {
                        match events_tx.try_send(GameEvent::Move {
                            session_id,
                            direction: direction.into(),
                        }) {
                            Ok(()) => Ok(LoopControl::Continue),
                            Err(mpsc::error::TrySendError::Full(_)) => {
                                if should_log(last_event_full_log) {
                                    warn!(session_id, "event channel full; dropping movement");
                                }
                                Ok(LoopControl::Continue)
                            }
                            Err(mpsc::error::TrySendError::Closed(_)) => Err(NetError::EventsClosed),
                        }
                    }
                    Err(parse_err) => {
                        *invalid_msgs += 1;
                        if should_log(last_invalid_msg_log) {
                            warn!(
                                session_id,
                                bytes = text.len(),
                                error = %parse_err,
                                "unparseable client message; ignoring"
                            );
                        }
                        Ok(LoopControl::Continue)
                    }
                }
            }
            Message::Binary(_) => {
                // Only text frames carry protocol messages.
                *invalid_msgs += 1;
                if should_log(last_invalid_msg_log) {
                    warn!(session_id, "binary frame ignored");
                }
                Ok(LoopControl::Continue)
            }
            Message::Ping(_) | Message::Pong(_) => Ok(LoopControl::Continue),
            Message::Close(_) => Ok(LoopControl::Disconnect),
        },
        Some(Err(e)) => {
            warn!(session_id, error = %e, "websocket recv error");
            Ok(LoopControl::Disconnect)
        }
        None => {
            info!(session_id, "websocket closed");
            Ok(LoopControl::Disconnect)
        }
    }
}

async fn send_message(socket: &mut WebSocket, msg: &ServerMessage) -> Result<usize, NetError> {
    let txt = serde_json::to_string(msg).map_err(NetError::Serialization)?;
    let bytes = txt.len();
    socket
        .send(Message::Text(txt.into()))
        .await
        .map_err(NetError::Ws)?;
    Ok(bytes)
}

async fn forward_session_event(
    event: SessionEvent,
    socket: &mut WebSocket,
    msgs_out: &mut u64,
    bytes_out: &mut u64,
) -> LoopControl {
    let msg = ServerMessage::from(event);
    match send_message(socket, &msg).await {
        Ok(bytes) => {
            *msgs_out += 1;
            *bytes_out += bytes as u64;
            LoopControl::Continue
        }
        Err(err) => {
            // Log unexpected send failures; disconnect will follow immediately.
            warn!(error = ?err, "failed to send session event");
            LoopControl::Disconnect
        }
    }
}

async fn disconnect_cleanup(ctx: &mut ConnCtx) -> Result<(), NetError> {
    // Stop the broadcast timer before the world forgets this session, so no
    // tick can fire against a removed player entry.
    ctx.broadcast_timer.abort();

    ctx.events_tx
        .send(GameEvent::Disconnect {
            session_id: ctx.session_id,
        })
        .await
        .map_err(|_| NetError::EventsClosed)?;

    debug!(
        session_id = ctx.session_id,
        msgs_in = ctx.msgs_in,
        msgs_out = ctx.msgs_out,
        bytes_in = ctx.bytes_in,
        bytes_out = ctx.bytes_out,
        invalid_msgs = ctx.invalid_msgs,
        "connection stats"
    );
    info!(session_id = ctx.session_id, "client disconnected");
    Ok(())
}
