//! Assembles a session: seats, channels, AI drivers and the turn watchdog.

use std::collections::{HashMap, HashSet};

use futures::future::join_all;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::Value as JsonValue;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::ai::{create_model, AiConfig, AiDriver, DecisionModel};
use crate::config::{BackpressurePolicy, TableConfig, TurnPolicy};
use crate::domain::Seat;
use crate::error::AppError;
use crate::game::GameKind;
use crate::session::delivery::{channel, Outbox};
use crate::session::participant::Registry;
use crate::session::watchdog::spawn_turn_watchdog;
use crate::session::{FailureNotice, ParticipantId, Session, SessionHandle, SharedUpdate};

/// The receiving ends handed to a human player's transport.
#[derive(Debug)]
pub struct PlayerEndpoint {
    pub id: ParticipantId,
    pub seat: Seat,
    pub updates: mpsc::Receiver<SharedUpdate>,
    pub failures: mpsc::Receiver<FailureNotice>,
}

#[derive(Debug)]
pub struct ViewerEndpoint {
    pub id: ParticipantId,
    pub updates: mpsc::Receiver<SharedUpdate>,
}

#[derive(Debug)]
enum SeatSpec {
    Human {
        client_id: u64,
        nickname: String,
    },
    Ai {
        model: String,
        nickname: String,
        config: AiConfig,
    },
}

impl SeatSpec {
    fn nickname(&self) -> &str {
        match self {
            SeatSpec::Human { nickname, .. } | SeatSpec::Ai { nickname, .. } => nickname,
        }
    }
}

/// Builder for [`Table`] instances (used by the runner binary and tests).
#[derive(Debug)]
pub struct TableBuilder {
    session_id: u64,
    game: String,
    settings: Option<JsonValue>,
    config: TableConfig,
    seats: Vec<SeatSpec>,
    viewers: Vec<(u64, String)>,
}

pub fn build_table(game: impl Into<String>) -> TableBuilder {
    TableBuilder::new(game)
}

impl TableBuilder {
    pub fn new(game: impl Into<String>) -> Self {
        Self {
            session_id: 1,
            game: game.into(),
            settings: None,
            config: TableConfig::default(),
            seats: Vec::new(),
            viewers: Vec::new(),
        }
    }

    pub fn with_session_id(mut self, id: u64) -> Self {
        self.session_id = id;
        self
    }

    pub fn with_settings(mut self, settings: JsonValue) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Seat a human, identified by its transport client id.
    pub fn with_player(mut self, client_id: u64, nickname: impl Into<String>) -> Self {
        self.seats.push(SeatSpec::Human {
            client_id,
            nickname: nickname.into(),
        });
        self
    }

    /// Seat an AI driven by the registered model `model`.
    pub fn with_ai(
        mut self,
        model: impl Into<String>,
        nickname: impl Into<String>,
        config: Option<&JsonValue>,
    ) -> Self {
        self.seats.push(SeatSpec::Ai {
            model: model.into(),
            nickname: nickname.into(),
            config: AiConfig::from_json(config),
        });
        self
    }

    pub fn with_viewer(mut self, client_id: u64, nickname: impl Into<String>) -> Self {
        self.viewers.push((client_id, nickname.into()));
        self
    }

    /// Construct the game and session and spawn the background tasks.
    ///
    /// Fails without producing a session when the game rejects the seat
    /// count or settings, or a model name is unknown. A table without human
    /// seats starts immediately; otherwise the game starts once every human
    /// has connected.
    pub async fn build(self) -> Result<Table, AppError> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let nicknames = self.seats.iter().map(|s| s.nickname().to_string()).collect();
        let game = GameKind::create(&self.game, nicknames, self.settings.as_ref(), seed)?;

        let capacity = self.config.channel_capacity.max(1);
        let policy = self.config.backpressure;
        let mut registry = Registry::default();
        let mut players = HashMap::new();
        let mut pending_ai: Vec<(Seat, ParticipantId, Box<dyn DecisionModel>, ChaCha8Rng, PlayerEndpoint)> =
            Vec::new();
        let mut human_seats = HashSet::new();
        let mut next_ai_id = 0u32;

        for spec in self.seats {
            let (utx, urx) = channel(capacity);
            let (ftx, frx) = channel(capacity);
            let (id, model) = match &spec {
                SeatSpec::Human { client_id, .. } => (ParticipantId::Client(*client_id), None),
                SeatSpec::Ai { model, config, .. } => {
                    next_ai_id += 1;
                    (ParticipantId::Ai(next_ai_id), Some((create_model(model, config)?, config.seed())))
                }
            };
            let label = format!("{id}");
            // AI seats never block: their drivers only drain between lock acquisitions.
            let seat_policy = if model.is_some() {
                BackpressurePolicy::DropNewest
            } else {
                policy
            };
            let seat = registry
                .add_player(
                    id,
                    spec.nickname().to_string(),
                    Outbox::new(utx, seat_policy, label.clone()),
                    Outbox::new(ftx, seat_policy, format!("{label}/failures")),
                )
                .ok_or_else(|| AppError::invalid("DUPLICATE_PARTICIPANT", format!("{id} is seated twice")))?;
            let endpoint = PlayerEndpoint {
                id,
                seat,
                updates: urx,
                failures: frx,
            };
            match model {
                Some((model, ai_seed)) => {
                    let rng = ChaCha8Rng::seed_from_u64(ai_seed.unwrap_or_else(|| mix(seed, seat)));
                    pending_ai.push((seat, id, model, rng, endpoint));
                }
                None => {
                    human_seats.insert(seat);
                    players.insert(id, endpoint);
                }
            }
        }

        let mut viewers = HashMap::new();
        for (client_id, nickname) in self.viewers {
            let id = ParticipantId::Client(client_id);
            let (utx, urx) = channel(capacity);
            registry
                .add_viewer(id, nickname, Outbox::new(utx, policy, format!("{id}/viewer")))
                .ok_or_else(|| AppError::invalid("DUPLICATE_PARTICIPANT", format!("{id} joined twice")))?;
            viewers.insert(id, ViewerEndpoint { id, updates: urx });
        }

        let handle = SessionHandle::new(Session::new(self.session_id, registry, game));
        info!(
            session_id = self.session_id,
            game = %self.game,
            humans = human_seats.len(),
            ais = pending_ai.len(),
            seed,
            "table built"
        );

        let mut tasks = Vec::new();
        for (seat, id, model, rng, endpoint) in pending_ai {
            let driver = AiDriver::new(seat, id, model, rng, endpoint.updates, endpoint.failures);
            tasks.push(driver.spawn(handle.clone()));
        }
        if let TurnPolicy::AutoPlay { after } = self.config.turn_policy {
            let rng = ChaCha8Rng::seed_from_u64(seed.rotate_left(29));
            tasks.push(spawn_turn_watchdog(handle.clone(), human_seats.clone(), after, rng));
        }

        if human_seats.is_empty() {
            handle.start().await?;
        }

        Ok(Table {
            handle,
            players,
            viewers,
            tasks,
        })
    }
}

fn mix(seed: u64, seat: Seat) -> u64 {
    seed ^ (seat as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// A running session with its background tasks.
#[derive(Debug)]
pub struct Table {
    handle: SessionHandle,
    players: HashMap<ParticipantId, PlayerEndpoint>,
    viewers: HashMap<ParticipantId, ViewerEndpoint>,
    tasks: Vec<JoinHandle<()>>,
}

impl Table {
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Receivers for a human seat; `None` once taken or for unknown ids.
    pub fn take_player_endpoint(&mut self, client_id: u64) -> Option<PlayerEndpoint> {
        self.players.remove(&ParticipantId::Client(client_id))
    }

    pub fn take_viewer_endpoint(&mut self, client_id: u64) -> Option<ViewerEndpoint> {
        self.viewers.remove(&ParticipantId::Client(client_id))
    }

    /// Wait for the game to end and return the reason.
    pub async fn wait_for_end(&self) -> String {
        self.handle.termination().wait().await
    }

    /// Wait for the game to end, then for every background task to stop.
    pub async fn finish(self) -> String {
        let reason = self.wait_for_end().await;
        for result in join_all(self.tasks).await {
            if let Err(e) = result {
                warn!(session_id = self.handle.id(), error = %e, "table task failed");
            }
        }
        reason
    }
}
