//! 数据库基础设施

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions},
    Error,
};
use std::{str::FromStr, time::Duration};

use crate::config::DatabaseConfig;

pub struct DatabaseManager {
    pool: MySqlPool,
}

impl DatabaseManager {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, Error> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(connect_options(config)?)
            .await?;

        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn connect_options(config: &DatabaseConfig) -> Result<MySqlConnectOptions, Error> {
    if let Some(url) = &config.url {
        return MySqlConnectOptions::from_str(url);
    }

    let mut options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password);
    if let Some(name) = &config.name {
        options = options.database(name);
    }
    Ok(options)
}
