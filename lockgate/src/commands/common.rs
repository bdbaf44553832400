use std::sync::Arc;

use anyhow::{Context, Result};
use lockgate_common::LockgateConfig;
use lockgate_core::db::connect_to_db;
use lockgate_core::{DatabasePrincipalStore, LockoutService};
use tokio::sync::Mutex;

pub(crate) struct Services {
    pub store: Arc<DatabasePrincipalStore>,
    pub lockout: LockoutService,
}

impl Services {
    pub async fn new(config: &LockgateConfig) -> Result<Self> {
        let db = connect_to_db(config)
            .await
            .context("Could not connect to the database")?;
        let store = Arc::new(DatabasePrincipalStore::new(Arc::new(Mutex::new(db))));
        let lockout = LockoutService::new(&config.store.lockout, store.clone());
        Ok(Self { store, lockout })
    }
}
