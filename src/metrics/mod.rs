use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Covers both sides of the order exchange:
// - Checkout submissions (outcome counts, round-trip latency)
// - The echo endpoint (orders accepted and rejected)
//
// Rendered in the Prometheus text format via `/metrics` on the echo endpoint.
// ============================================================================

pub struct Metrics {
    registry: Registry,

    // Checkout
    pub orders_submitted: IntCounterVec,
    pub submission_duration: Histogram,

    // Echo endpoint
    pub orders_echoed: IntCounter,
    pub orders_rejected: IntCounter,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_submitted = IntCounterVec::new(
            Opts::new("orders_submitted_total", "Order submissions by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(orders_submitted.clone()))?;

        let submission_duration = Histogram::with_opts(
            HistogramOpts::new(
                "order_submission_duration_seconds",
                "Order submission round-trip duration",
            )
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        )?;
        registry.register(Box::new(submission_duration.clone()))?;

        let orders_echoed = IntCounter::new("orders_echoed_total", "Orders echoed by the endpoint")?;
        registry.register(Box::new(orders_echoed.clone()))?;

        let orders_rejected = IntCounter::new(
            "orders_rejected_total",
            "Order payloads the endpoint could not decode",
        )?;
        registry.register(Box::new(orders_rejected.clone()))?;

        Ok(Self {
            registry,
            orders_submitted,
            submission_duration,
            orders_echoed,
            orders_rejected,
        })
    }

    /// `outcome` is one of `confirmed`, `failed` or `cancelled`.
    pub fn record_submission(&self, outcome: &str, elapsed: Duration) {
        self.orders_submitted.with_label_values(&[outcome]).inc();
        self.submission_duration.observe(elapsed.as_secs_f64());
    }

    pub fn render(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
