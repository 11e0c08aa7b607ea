use anyhow::Result;
use draftseal_daemon::DaemonServer;

pub async fn execute(socket: &str) -> Result<()> {
    tracing::info!("Starting draftseal daemon on socket: {}", socket);

    let server = DaemonServer::new(socket);
    server.run().await?;

    Ok(())
}
