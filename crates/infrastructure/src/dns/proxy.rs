use async_trait::async_trait;
use dashmap::DashSet;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use pyrewall_application::ports::{BlocklistRepository, DnsProxyPort};
use pyrewall_domain::DomainError;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::Notify;
use tracing::{debug, error, info, warn};

/// UDP listener on `0.0.0.0:53`. Answers queries for cached blocked domains
/// with `NXDOMAIN`; forwards everything else to the configured upstream.
///
/// The blocked-domain cache is a concurrent set refreshed on demand via
/// `refresh_from_db()`; refresh is read-only and safe against concurrent
/// lookups.
pub struct DnsProxy {
    bind_address: SocketAddr,
    upstream: SocketAddr,
    forward_timeout: Duration,
    receive_timeout: Duration,
    blocklist_repo: Arc<dyn BlocklistRepository>,
    cache: Arc<DashSet<String>>,
    stop: Arc<Notify>,
    stopped: Arc<AtomicBool>,
}

impl DnsProxy {
    pub fn new(
        bind_address: SocketAddr,
        upstream: SocketAddr,
        forward_timeout: Duration,
        receive_timeout: Duration,
        blocklist_repo: Arc<dyn BlocklistRepository>,
    ) -> Self {
        Self {
            bind_address,
            upstream,
            forward_timeout,
            receive_timeout,
            blocklist_repo,
            cache: Arc::new(DashSet::new()),
            stop: Arc::new(Notify::new()),
            stopped: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether `query` (already trailing-dot-stripped, lowercased) matches
    /// a cached blocked domain, honoring the leading `*.` wildcard rule.
    fn is_blocked(cache: &DashSet<String>, query: &str) -> bool {
        cache.iter().any(|entry| {
            let d = entry.as_str();
            let d = d.strip_prefix("*.").unwrap_or(d);
            query == d || query.ends_with(&format!(".{d}"))
        })
    }

    fn nxdomain_response(request: &Message) -> Vec<u8> {
        let mut response = Message::new();
        response
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .set_op_code(request.op_code())
            .set_authoritative(true)
            .set_recursion_desired(request.recursion_desired())
            .set_recursion_available(true)
            .set_response_code(ResponseCode::NXDomain);
        for query in request.queries() {
            response.add_query(query.clone());
        }
        response.to_vec().unwrap_or_default()
    }

    async fn handle_query(
        socket: Arc<UdpSocket>,
        peer: SocketAddr,
        buf: Vec<u8>,
        cache: Arc<DashSet<String>>,
        upstream: SocketAddr,
        forward_timeout: Duration,
    ) {
        let request = match Message::from_vec(&buf) {
            Ok(m) => m,
            Err(e) => {
                debug!(error = %e, "failed to parse DNS query, dropping");
                return;
            }
        };

        let query_name = request
            .queries()
            .first()
            .map(|q| q.name().to_string().trim_end_matches('.').to_lowercase());

        let blocked = match &query_name {
            Some(name) => Self::is_blocked(&cache, name),
            None => false,
        };

        if blocked {
            let response = Self::nxdomain_response(&request);
            if let Err(e) = socket.send_to(&response, peer).await {
                warn!(error = %e, %peer, "failed to send NXDOMAIN response");
            }
            return;
        }

        match Self::forward(&buf, upstream, forward_timeout).await {
            Ok(response) => {
                if let Err(e) = socket.send_to(&response, peer).await {
                    warn!(error = %e, %peer, "failed to send forwarded response");
                }
            }
            Err(e) => {
                debug!(error = %e, %peer, "upstream forward failed");
            }
        }
    }

    async fn forward(
        query: &[u8],
        upstream: SocketAddr,
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .map_err(|e| DomainError::IoError(e.to_string()))?;

        socket
            .send_to(query, upstream)
            .await
            .map_err(|e| DomainError::IoError(e.to_string()))?;

        let mut buf = vec![0u8; 4096];
        let len = tokio::time::timeout(timeout, socket.recv(&mut buf))
            .await
            .map_err(|_| DomainError::ResolverTransient("upstream forward timed out".to_string()))?
            .map_err(|e| DomainError::IoError(e.to_string()))?;

        buf.truncate(len);
        Ok(buf)
    }
}

#[async_trait]
impl DnsProxyPort for DnsProxy {
    async fn start(&self) -> Result<(), DomainError> {
        self.refresh_from_db().await?;

        let socket = match UdpSocket::bind(self.bind_address).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                error!(address = %self.bind_address, "permission denied binding DNS listener, refraining from serving DNS");
                return Ok(());
            }
            Err(e) => {
                error!(error = %e, address = %self.bind_address, "failed to bind DNS listener");
                return Err(DomainError::BindPrivilege(e.to_string()));
            }
        };

        info!(address = %self.bind_address, upstream = %self.upstream, "DNS proxy listening");
        self.stopped.store(false, Ordering::SeqCst);

        let socket = Arc::new(socket);
        let cache = self.cache.clone();
        let upstream = self.upstream;
        let forward_timeout = self.forward_timeout;
        let receive_timeout = self.receive_timeout;
        let stop = self.stop.clone();
        let stopped = self.stopped.clone();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            loop {
                tokio::select! {
                    _ = stop.notified() => {
                        info!("DNS proxy stopping");
                        break;
                    }
                    result = tokio::time::timeout(receive_timeout, socket.recv_from(&mut buf)) => {
                        match result {
                            Ok(Ok((len, peer))) => {
                                let packet = buf[..len].to_vec();
                                let socket = socket.clone();
                                let cache = cache.clone();
                                tokio::spawn(Self::handle_query(
                                    socket,
                                    peer,
                                    packet,
                                    cache,
                                    upstream,
                                    forward_timeout,
                                ));
                            }
                            Ok(Err(e)) => {
                                error!(error = %e, "DNS proxy recv error, stopping");
                                break;
                            }
                            Err(_) => continue,
                        }
                    }
                }
            }
            stopped.store(true, Ordering::SeqCst);
        });

        Ok(())
    }

    async fn stop(&self) -> Result<(), DomainError> {
        self.stop.notify_one();
        Ok(())
    }

    async fn refresh_from_db(&self) -> Result<(), DomainError> {
        let domains = self.blocklist_repo.get_all().await?;
        let fresh: DashSet<String> = domains.into_iter().map(|d| d.domain.to_string()).collect();

        self.cache.clear();
        for d in fresh {
            self.cache.insert(d);
        }

        debug!(count = self.cache.len(), "DNS proxy blocklist cache refreshed");
        Ok(())
    }
}
