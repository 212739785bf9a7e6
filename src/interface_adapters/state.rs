use crate::use_cases::GameEvent;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct AppState {
    // Events flowing from the network into the world loop.
    pub events_tx: mpsc::Sender<GameEvent>,
}
