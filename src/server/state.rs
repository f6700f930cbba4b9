use std::sync::Arc;

use crate::config::ServerConfig;
use crate::notifications::dispatcher::Dispatcher;
use crate::slack::ChatDelivery;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub delivery: Arc<dyn ChatDelivery>,
    pub server_config: Option<ServerConfig>,
}
