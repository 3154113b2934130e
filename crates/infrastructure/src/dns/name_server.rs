use hickory_server::ServerFuture;
use std::net::SocketAddr;
use std::time::Duration;
use tenant_dns_domain::DomainError;
use tokio::net::{TcpListener, UdpSocket};
use tracing::{error, info};

use super::handler::AuthoritativeHandler;

/// Running nameserver: UDP and TCP listeners for every configured address.
pub struct NameServer {
    server: ServerFuture<AuthoritativeHandler>,
    local_addrs: Vec<SocketAddr>,
}

impl NameServer {
    /// Binds every address and starts serving.
    ///
    /// TCP is bound to the port UDP actually got, so port 0 yields one
    /// ephemeral port per address shared by both protocols.
    ///
    /// # Errors
    ///
    /// * `DomainError::IoError` - If any address cannot be bound; nothing is
    ///   left listening in that case
    pub async fn start(
        listen: &[SocketAddr],
        handler: AuthoritativeHandler,
        tcp_timeout: Duration,
    ) -> Result<Self, DomainError> {
        let mut server = ServerFuture::new(handler);
        let mut local_addrs = Vec::with_capacity(listen.len());

        for addr in listen {
            let udp_socket = UdpSocket::bind(addr).await.map_err(|e| {
                error!(addr = %addr, error = %e, "UDP bind failed");
                DomainError::IoError(format!("UDP bind {}: {}", addr, e))
            })?;
            let bound = udp_socket
                .local_addr()
                .map_err(|e| DomainError::IoError(format!("UDP local address {}: {}", addr, e)))?;

            let tcp_listener = TcpListener::bind(bound).await.map_err(|e| {
                error!(addr = %bound, error = %e, "TCP bind failed");
                DomainError::IoError(format!("TCP bind {}: {}", bound, e))
            })?;

            server.register_socket(udp_socket);
            server.register_listener(tcp_listener, tcp_timeout);
            info!(addr = %bound, "Nameserver listening (UDP + TCP)");
            local_addrs.push(bound);
        }

        Ok(Self {
            server,
            local_addrs,
        })
    }

    pub fn local_addrs(&self) -> &[SocketAddr] {
        &self.local_addrs
    }

    /// Closes the listeners and waits for in-flight requests to finish.
    pub async fn stop(mut self) -> Result<(), DomainError> {
        info!(addrs = ?self.local_addrs, "Stopping nameserver");
        self.server
            .shutdown_gracefully()
            .await
            .map_err(|e| DomainError::IoError(format!("Nameserver shutdown: {}", e)))?;
        info!("Nameserver stopped");
        Ok(())
    }
}
