use std::collections::VecDeque;
use std::net::IpAddr;
use std::time::Duration;
use std::time::Instant;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceRequest;
use actix_web::dev::ServiceResponse;
use actix_web::web::Data;
use actix_web_lab::middleware::Next;
use dashmap::DashMap;

use crate::routes::ContactError;

/// Sliding-window log per client address: a request is allowed if fewer than
/// `max_requests` requests from the same address were allowed in the last
/// `window`.
///
/// This is the only mutable state shared between requests. Each address's log
/// lives behind its own shard lock in the `DashMap`, so check-and-record is
/// atomic per address while different addresses do not contend.
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    clients: DashMap<IpAddr, VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(
        max_requests: usize,
        window: Duration,
    ) -> Self {
        Self {
            max_requests,
            window,
            clients: DashMap::new(),
        }
    }

    pub fn window(&self) -> Duration { self.window }

    /// Record an attempt from `client` at `now`. Returns `false` (and records
    /// nothing) if the client is over the limit.
    pub fn attempt(
        &self,
        client: IpAddr,
        now: Instant,
    ) -> bool {
        // the entry guard holds the shard lock until it is dropped
        let mut log = self.clients.entry(client).or_default();
        self.expire(&mut log, now);
        if log.len() >= self.max_requests {
            return false;
        }
        log.push_back(now);
        true
    }

    /// Drop clients that have no attempts left inside the window, so the map
    /// does not grow with every address ever seen
    pub fn purge(
        &self,
        now: Instant,
    ) {
        self.clients.retain(|_, log| {
            self.expire(log, now);
            !log.is_empty()
        });
    }

    pub fn tracked_clients(&self) -> usize { self.clients.len() }

    fn expire(
        &self,
        log: &mut VecDeque<Instant>,
        now: Instant,
    ) {
        while let Some(oldest) = log.front() {
            match now.saturating_duration_since(*oldest) >= self.window {
                true => log.pop_front(),
                false => break,
            };
        }
    }
}

/// Middleware guarding `/api/contact`. Every request counts toward the limit,
/// whether or not it later passes validation; rejected requests never reach
/// the handler.
///
/// Clients are identified by the TCP peer address. Forwarding headers are
/// ignored, since anyone can set them.
pub async fn limit_by_client_address(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let limiter = req
        .app_data::<Data<RateLimiter>>()
        .ok_or_else(|| ContactError::UnexpectedFailure(anyhow::anyhow!("no rate limiter registered")))?;
    let client = req
        .peer_addr()
        .ok_or_else(|| ContactError::UnexpectedFailure(anyhow::anyhow!("peer address unavailable")))?
        .ip();

    match limiter.attempt(client, Instant::now()) {
        true => next.call(req).await,
        false => {
            tracing::warn!(%client, "rate limit exceeded");
            Err(ContactError::RateLimited.into())
        }
    }
}

/// To be run next to the API, for as long as the API runs
pub async fn init_purge_worker(limiter: Data<RateLimiter>) -> Result<(), anyhow::Error> {
    let mut interval = tokio::time::interval(limiter.window());
    loop {
        interval.tick().await;
        limiter.purge(Instant::now());
        tracing::debug!(
            clients = limiter.tracked_clients(),
            "purged expired rate limit entries"
        );
    }
}
