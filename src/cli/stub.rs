use clap::Args;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio::net::TcpListener;

use crate::config::Config;
use crate::core::services::stub;
use crate::error::Result;
use crate::signal_handler::shutdown_signal;

#[derive(Args)]
pub struct StubArgs {
    /// Address to bind
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    host: IpAddr,

    /// Port to listen on (overrides stub_api_port)
    #[arg(short, long)]
    port: Option<u16>,
}

pub async fn execute(args: StubArgs, config: &Config) -> Result<()> {
    let port = args.port.unwrap_or(config.stub_api_port);
    let listener = TcpListener::bind(SocketAddr::new(args.host, port)).await?;

    stub::serve(listener, shutdown_signal()).await
}
