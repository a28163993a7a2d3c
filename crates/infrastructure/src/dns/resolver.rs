use async_trait::async_trait;
use hickory_resolver::config::ResolverConfig;
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::Resolver;
use pyrewall_application::ports::DomainResolver;
use pyrewall_domain::DomainError;
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Conventional subdomain prefixes tried in addition to the bare domain.
const VARIANT_PREFIXES: &[&str] = &["www", "m", "api", "cdn", "video", "static", "media"];

/// Resolves a domain to its set of A-record IPv4 addresses by fanning out
/// over a fixed list of conventional subdomain variants with bounded
/// parallelism. Individual lookup failures are swallowed; the overall call
/// returns within ~5 s on typical networks via `overall_timeout`.
pub struct HickoryDomainResolver {
    resolver: Resolver<TokioConnectionProvider>,
    max_parallel: usize,
    overall_timeout: Duration,
}

impl HickoryDomainResolver {
    pub fn new() -> Self {
        let resolver = Resolver::builder_with_config(
            ResolverConfig::default(),
            TokioConnectionProvider::default(),
        )
        .build();

        Self {
            resolver,
            max_parallel: 4,
            overall_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_max_parallel(mut self, max_parallel: usize) -> Self {
        self.max_parallel = max_parallel;
        self
    }

    fn variants(domain: &str) -> Vec<String> {
        let mut out = Vec::with_capacity(VARIANT_PREFIXES.len() + 1);
        out.push(domain.to_string());
        for prefix in VARIANT_PREFIXES {
            out.push(format!("{prefix}.{domain}"));
        }
        out
    }

    async fn resolve_one(resolver: &Resolver<TokioConnectionProvider>, name: &str) -> Vec<Ipv4Addr> {
        match resolver.ipv4_lookup(name).await {
            Ok(response) => response.iter().map(|record| record.0).collect(),
            Err(e) => {
                debug!(name, error = %e, "variant lookup failed, skipping");
                Vec::new()
            }
        }
    }
}

impl Default for HickoryDomainResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DomainResolver for HickoryDomainResolver {
    async fn resolve(&self, domain: &str) -> Result<HashSet<Ipv4Addr>, DomainError> {
        let semaphore = Arc::new(Semaphore::new(self.max_parallel));
        let names = Self::variants(domain);

        let fanout = async {
            let mut handles = Vec::with_capacity(names.len());
            for name in names {
                let permit = semaphore.clone().acquire_owned().await.expect("semaphore not closed");
                let resolver = self.resolver.clone();
                handles.push(tokio::spawn(async move {
                    let _permit = permit;
                    Self::resolve_one(&resolver, &name).await
                }));
            }

            let mut merged = HashSet::new();
            for handle in handles {
                if let Ok(ips) = handle.await {
                    merged.extend(ips);
                }
            }
            merged
        };

        match tokio::time::timeout(self.overall_timeout, fanout).await {
            Ok(merged) => Ok(merged),
            Err(_) => {
                warn!(domain, "resolve() exceeded overall timeout, returning partial results");
                Ok(HashSet::new())
            }
        }
    }
}
