//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Sustained requests per second allowed per client IP.
pub const PER_SECOND: u64 = 20;
/// Requests a client may issue in a burst before throttling applies.
pub const BURST_SIZE: u32 = 100;

/// Creates the per-IP rate limiter wrapping the whole router.
///
/// # Limits
///
/// - **Rate**: [`PER_SECOND`] requests per second
/// - **Burst**: [`BURST_SIZE`] requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address, so the service must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(PER_SECOND)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("rate limit values are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
