use clap::Args;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tracing::info;

use crate::api;
use crate::config::Config;
use crate::core::services::stub;
use crate::error::Result;
use crate::services::ServiceFactory;

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind (overrides server_host)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides server_port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Also run the built-in stub details service (overrides use_stub_api)
    #[arg(long)]
    stub: bool,
}

pub async fn execute(args: ServeArgs, config: &Config) -> Result<()> {
    let mut config = config.clone();
    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }
    if args.stub {
        config.use_stub_api = true;
    }

    let services = ServiceFactory::new(Arc::new(config.clone()));

    let stub_handle = if config.use_stub_api {
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, config.stub_api_port));
        let (local, handle) = stub::spawn(addr).await?;
        info!("Using stub lookup API at {}", local);
        Some(handle)
    } else {
        info!("Using lookup API at {}", config.lookup_api_url);
        None
    };

    let catalog = services.create_catalog().await?;
    let result = api::run(&config, catalog).await;

    if let Some(handle) = stub_handle {
        handle.abort();
    }

    result
}
