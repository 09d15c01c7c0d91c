//! HTTP server configuration object.

use std::net::SocketAddr;

use electives::inbound::http::session_config::SessionSettings;
use electives::outbound::persistence::DbPool;

/// Everything needed to start the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) bcrypt_cost: u32,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            session,
            bind_addr,
            db_pool,
            bcrypt_cost: electives::outbound::password::BcryptPasswordHasher::DEFAULT_COST,
        }
    }

    /// Override the bcrypt work factor for new password hashes.
    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}
