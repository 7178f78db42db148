use std::{num::NonZeroUsize, sync::Arc};

use alloy::{
    network::{Ethereum, EthereumWallet},
    providers::{DynProvider, Provider, ProviderBuilder, WsConnect},
    rpc::client::RpcClient,
    transports::{
        BoxTransport, IntoBoxTransport,
        http::{Http, reqwest::Url},
        layers::FallbackLayer,
    },
};
use tower::ServiceBuilder;

use crate::{BlockchainConfig, error::BlockchainError, wallets::wallet_from_private_key};

pub(crate) type BlockchainProvider = Arc<DynProvider<Ethereum>>;

async fn collect_transports(rpc_endpoints: &[String]) -> Vec<(String, BoxTransport)> {
    let mut transports = Vec::new();

    for endpoint in rpc_endpoints {
        if endpoint.starts_with("ws://") || endpoint.starts_with("wss://") {
            match RpcClient::connect_pubsub(WsConnect::new(endpoint)).await {
                Ok(client) => {
                    transports.push((
                        endpoint.clone(),
                        client.transport().clone().into_box_transport(),
                    ));
                    tracing::debug!("WebSocket RPC endpoint added: {}", endpoint);
                }
                Err(e) => {
                    tracing::warn!("Failed to connect to WebSocket RPC '{}': {}", endpoint, e);
                }
            }
        } else {
            match endpoint.parse::<Url>() {
                Ok(url) => {
                    transports.push((endpoint.clone(), Http::new(url).into_box_transport()));
                    tracing::debug!("HTTP RPC endpoint added: {}", endpoint);
                }
                Err(e) => {
                    tracing::warn!("Invalid RPC URL '{}': {}", endpoint, e);
                }
            }
        }
    }

    transports
}

/// Builds a failover provider over every reachable endpoint, signing with
/// `wallet` when one is given.
pub(crate) async fn initialize_provider_with_wallet(
    rpc_endpoints: &[String],
    wallet: Option<EthereumWallet>,
) -> Result<BlockchainProvider, BlockchainError> {
    let (valid_endpoints, transports): (Vec<String>, Vec<BoxTransport>) =
        collect_transports(rpc_endpoints).await.into_iter().unzip();

    if transports.is_empty() {
        return Err(BlockchainError::RpcConnectionFailed {
            attempts: rpc_endpoints.len(),
        });
    }

    // One transport at a time; the layer ranks them and fails over.
    let fallback_layer = FallbackLayer::default().with_active_transport_count(NonZeroUsize::MIN);
    let transport = ServiceBuilder::new()
        .layer(fallback_layer)
        .service(transports);
    let client = RpcClient::builder().transport(transport, false);

    let provider = match wallet {
        Some(wallet) => ProviderBuilder::new()
            .wallet(wallet)
            .connect_client(client)
            .erased(),
        None => ProviderBuilder::new().connect_client(client).erased(),
    };

    match provider.get_block_number().await {
        Ok(block) => {
            tracing::info!(
                "Blockchain provider initialized with {} RPC endpoints (block: {}): {:?}",
                valid_endpoints.len(),
                block,
                valid_endpoints
            );
            Ok(Arc::new(provider))
        }
        Err(e) => {
            tracing::error!("All RPC endpoints failed connectivity check: {}", e);
            Err(BlockchainError::RpcConnectionFailed {
                attempts: valid_endpoints.len(),
            })
        }
    }
}

pub(crate) async fn initialize_provider(
    config: &BlockchainConfig,
) -> Result<BlockchainProvider, BlockchainError> {
    let wallet = config
        .wallet_private_key()
        .map(wallet_from_private_key)
        .transpose()?;

    initialize_provider_with_wallet(config.rpc_endpoints(), wallet).await
}
