//! Typed default configurations for each environment.
//!
//! Each environment (development, testnet, mainnet) gets a fully constructed
//! [`ConfigRaw`] via [`config_for`]. Shared defaults are factored into helper
//! functions so the per-environment differences stay visible.

use std::path::PathBuf;

use pq_blockchain::BlockchainConfigRaw;
use pq_pinning::PinningConfigRaw;
use pq_repository::{DatabaseBackend, RepositoryManagerConfigRaw};

use super::{ConfigError, ConfigRaw};
use crate::{
    http_api::HttpApiConfig,
    indexer::IndexerConfig,
    logger::{LogFormat, LoggerConfig, TelemetryConfig, TelemetryMetricsConfig},
    managers::ManagersConfigRaw,
};

/// Returns the default [`ConfigRaw`] for the given environment name.
pub(crate) fn config_for(environment: &str) -> Result<ConfigRaw, ConfigError> {
    match environment {
        "development" => Ok(development()),
        "testnet" => Ok(testnet()),
        "mainnet" => Ok(mainnet()),
        _ => Err(ConfigError::UnknownEnvironment(environment.to_string())),
    }
}

// ── Shared defaults ─────────────────────────────────────────────

fn http_api() -> HttpApiConfig {
    HttpApiConfig {
        enabled: true,
        port: 8900,
    }
}

fn telemetry(enabled: bool) -> TelemetryConfig {
    TelemetryConfig {
        metrics: TelemetryMetricsConfig {
            enabled,
            bind_address: "0.0.0.0:9464".to_string(),
        },
    }
}

fn mysql_repository() -> RepositoryManagerConfigRaw {
    RepositoryManagerConfigRaw {
        backend: DatabaseBackend::Mysql,
        user: "root".to_string(),
        password: None,
        database: "photo_quest".to_string(),
        host: "localhost".to_string(),
        port: 3306,
        sqlite_path: None,
        max_connections: 10,
        min_connections: 2,
    }
}

fn public_chain(blockchain_id: &str, rpc_endpoint: &str) -> BlockchainConfigRaw {
    BlockchainConfigRaw {
        blockchain_id: blockchain_id.into(),
        // Deployment specific, must come from config.toml.
        contract_address: String::new(),
        start_block: 0,
        rpc_endpoints: vec![rpc_endpoint.to_string()],
        wallet_private_key: None,
        max_rpc_requests_per_second: Some(10),
        tx_confirmations: 2,
        tx_receipt_timeout_ms: 120_000,
    }
}

fn indexer(poll_interval_ms: u64, log_batch_size: u64) -> IndexerConfig {
    IndexerConfig {
        enabled: true,
        poll_interval_ms,
        confirmations: 2,
        max_blocks_to_sync: 10_000,
        log_batch_size,
    }
}

// ── Environments ────────────────────────────────────────────────

fn development() -> ConfigRaw {
    ConfigRaw {
        environment: "development".to_string(),
        managers: ManagersConfigRaw {
            blockchain: BlockchainConfigRaw {
                blockchain_id: "hardhat:31337".into(),
                // First contract deployed by the default hardhat account.
                contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
                start_block: 0,
                rpc_endpoints: vec!["http://127.0.0.1:8545".to_string()],
                wallet_private_key: None,
                max_rpc_requests_per_second: None,
                tx_confirmations: 1,
                tx_receipt_timeout_ms: 60_000,
            },
            repository: RepositoryManagerConfigRaw {
                backend: DatabaseBackend::Sqlite,
                sqlite_path: Some(PathBuf::from("data/photo_quest.sqlite")),
                max_connections: 5,
                min_connections: 1,
                ..mysql_repository()
            },
        },
        pinning: PinningConfigRaw::default(),
        indexer: indexer(4_000, 1_000),
        http_api: http_api(),
        logger: LoggerConfig {
            level: "photo_quest_node=debug,pq_blockchain=debug,info".to_string(),
            format: LogFormat::Pretty,
        },
        telemetry: telemetry(true),
    }
}

fn testnet() -> ConfigRaw {
    ConfigRaw {
        environment: "testnet".to_string(),
        managers: ManagersConfigRaw {
            blockchain: public_chain("base-sepolia:84532", "https://sepolia.base.org"),
            repository: mysql_repository(),
        },
        pinning: PinningConfigRaw::default(),
        indexer: indexer(10_000, 500),
        http_api: http_api(),
        logger: LoggerConfig {
            level: "photo_quest_node=info,info".to_string(),
            format: LogFormat::Pretty,
        },
        telemetry: telemetry(false),
    }
}

fn mainnet() -> ConfigRaw {
    ConfigRaw {
        environment: "mainnet".to_string(),
        managers: ManagersConfigRaw {
            blockchain: public_chain("base:8453", "https://mainnet.base.org"),
            repository: mysql_repository(),
        },
        pinning: PinningConfigRaw::default(),
        indexer: indexer(10_000, 500),
        http_api: http_api(),
        logger: LoggerConfig {
            level: "photo_quest_node=info,info".to_string(),
            format: LogFormat::Json,
        },
        telemetry: telemetry(false),
    }
}
