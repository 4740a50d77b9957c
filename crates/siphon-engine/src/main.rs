//! Demo driver binary for the Siphon interaction model.
//!
//! Wires the core session together the way a host game would: loads
//! configuration, assembles one actor and the configured supply nodes,
//! subscribes a console display sink to every broadcaster, and then plays
//! a short scripted interaction in real time -- select the first node,
//! walk onto it, siphon until the loop halts, walk off.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `siphon-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Assemble the session from the configuration
//! 4. Subscribe the console sink to the actor and every node
//! 5. Activate everything (initial status frames)
//! 6. Run the scripted interaction until the transfer loop halts
//! 7. Unsubscribe observers and log the outcome

mod console;
mod error;
mod naming;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use siphon_core::config::SiphonConfig;
use siphon_core::controller::ActionController;
use siphon_core::endpoint::TransferEndpoint;
use siphon_core::session::{self, SessionState};
use siphon_types::{EntityId, InputEvent, ObserverId};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::console::ConsoleSink;
use crate::error::EngineError;

/// Real time (and simulation time) per drive-loop iteration.
const FRAME_MS: u64 = 100;

/// Upper bound on the scripted run, in case configuration makes the
/// transfer loop effectively endless.
const MAX_RUN_MS: u64 = 120_000;

/// Application entry point for the demo driver.
///
/// # Errors
///
/// Returns an error if configuration cannot be parsed or names no nodes.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the config level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with_target(true)
        .init();

    info!("siphon-engine starting");
    info!(
        capacity = %config.actor.capacity,
        amount_per_action = %config.actor.amount_per_action,
        period_ms = config.actor.period_ms(),
        node_count = config.nodes.len(),
        "Configuration loaded"
    );

    // 3. Assemble the session.
    let actor_name = naming::random_actor_name();
    let actor_entity = EntityId::new();
    let mut names = BTreeMap::new();
    names.insert(actor_entity, actor_name.clone());

    let actor = ActionController::new(actor_entity, &config.actor);
    let mut state = SessionState::new(actor);

    let mut node_entities = Vec::new();
    for node in &config.nodes {
        let entity = state.add_endpoint(TransferEndpoint::new(
            EntityId::new(),
            node.capacity,
            node.load_styles,
        ));
        names.insert(entity, node.name.clone());
        node_entities.push(entity);
    }
    let first_node = *node_entities.first().ok_or(EngineError::NoNodes)?;
    info!(actor = %actor_name, nodes = node_entities.len(), "Session assembled");

    // 4. Subscribe the console sink everywhere. Every subscription is
    //    released again at shutdown.
    let sink = Arc::new(ConsoleSink::new(names));
    let mut subscriptions: Vec<(Option<EntityId>, ObserverId)> = Vec::new();

    let actor_sink = Arc::clone(&sink);
    let id = state
        .actor
        .subscribe(Box::new(move |frame| actor_sink.render(frame)));
    subscriptions.push((None, id));

    for &entity in &node_entities {
        if let Some(endpoint) = state.endpoints.get_mut(&entity) {
            let node_sink = Arc::clone(&sink);
            let id = endpoint.subscribe(Box::new(move |frame| node_sink.render(frame)));
            subscriptions.push((Some(entity), id));
        }
    }

    // 5. Activate: initial status frames flow through the sink.
    state.actor.activate();
    for &entity in &node_entities {
        if let Some(endpoint) = state.endpoints.get_mut(&entity) {
            endpoint.activate();
        }
    }

    // 6. The scripted interaction: select the first node and walk onto it.
    session::apply_event(&mut state, InputEvent::SelectTarget { entity: first_node });
    session::apply_event(&mut state, InputEvent::OverlapEnter { entity: first_node });

    let mut elapsed_ms: u64 = 0;
    while state.actor.is_running() && elapsed_ms < MAX_RUN_MS {
        tokio::time::sleep(Duration::from_millis(FRAME_MS)).await;
        let _ = session::advance(&mut state, FRAME_MS);
        elapsed_ms = elapsed_ms.saturating_add(FRAME_MS);
    }

    // Walk off and deselect, whatever ended the loop.
    session::apply_event(&mut state, InputEvent::OverlapExit { entity: first_node });
    session::apply_event(&mut state, InputEvent::ClearTarget);

    info!(
        elapsed_ms,
        actor_load = %state.actor.inventory().current(),
        "Scripted interaction finished"
    );

    // 7. Release every subscription before the session goes away.
    for (entity, id) in subscriptions {
        match entity {
            None => {
                let _ = state.actor.unsubscribe(id);
            }
            Some(entity) => {
                if let Some(endpoint) = state.endpoints.get_mut(&entity) {
                    let _ = endpoint.unsubscribe(id);
                }
            }
        }
    }

    info!("siphon-engine shutdown complete");
    Ok(())
}

/// Load the session configuration from `siphon-config.yaml`.
///
/// Looks for the config file relative to the current working directory
/// and falls back to defaults when it does not exist.
fn load_config() -> Result<SiphonConfig, EngineError> {
    let config_path = Path::new("siphon-config.yaml");
    if config_path.exists() {
        let config = SiphonConfig::from_file(config_path)?;
        Ok(config)
    } else {
        Ok(SiphonConfig::default())
    }
}
