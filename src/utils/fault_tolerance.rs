use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::AppError;

/// Circuit breaker state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl CircuitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CircuitState::Closed => "closed",
            CircuitState::Open => "open",
            CircuitState::HalfOpen => "half_open",
        }
    }
}

/// Configuration for circuit breaker behavior
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Number of consecutive failures before opening the circuit
    pub failure_threshold: usize,
    /// Number of successes in half-open state before closing
    pub success_threshold: usize,
    /// Time to wait before transitioning from open to half-open
    pub reset_timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            success_threshold: 1,
            reset_timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CircuitBreakerMetrics {
    pub total_calls: u64,
    pub successful_calls: u64,
    pub failed_calls: u64,
    pub rejected_calls: u64,
    pub state_transitions: u64,
}

/// Circuit breaker guarding calls to an external service
pub struct ServiceCircuitBreaker {
    failure_count: AtomicUsize,
    success_count: AtomicUsize,
    state: Arc<Mutex<CircuitState>>,
    config: CircuitBreakerConfig,
    opened_at: Arc<Mutex<Option<Instant>>>,
    service_name: String,
    metrics: Arc<Mutex<CircuitBreakerMetrics>>,
}

impl ServiceCircuitBreaker {
    pub fn new(service_name: &str) -> Self {
        Self::with_config(service_name, CircuitBreakerConfig::default())
    }

    pub fn with_config(service_name: &str, config: CircuitBreakerConfig) -> Self {
        info!(service = service_name, ?config, "Initializing circuit breaker");

        Self {
            failure_count: AtomicUsize::new(0),
            success_count: AtomicUsize::new(0),
            state: Arc::new(Mutex::new(CircuitState::Closed)),
            config,
            opened_at: Arc::new(Mutex::new(None)),
            service_name: service_name.to_string(),
            metrics: Arc::new(Mutex::new(CircuitBreakerMetrics::default())),
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub async fn state(&self) -> CircuitState {
        self.check_timeout().await;
        *self.state.lock().await
    }

    pub async fn get_metrics(&self) -> CircuitBreakerMetrics {
        self.metrics.lock().await.clone()
    }

    /// Execute an operation with circuit breaker protection
    pub async fn call<F, Fut, T>(&self, operation: F) -> Result<T, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<T, AppError>>,
    {
        self.metrics.lock().await.total_calls += 1;
        self.check_timeout().await;

        let current_state = *self.state.lock().await;
        if current_state == CircuitState::Open {
            warn!(service = %self.service_name, "Circuit breaker is OPEN, rejecting call");
            self.metrics.lock().await.rejected_calls += 1;
            return Err(AppError::CircuitOpen(format!(
                "Service {} circuit breaker is open",
                self.service_name
            )));
        }

        match operation().await {
            Ok(value) => {
                self.on_success(current_state).await;
                Ok(value)
            }
            Err(error) => {
                self.on_failure(current_state).await;
                Err(error)
            }
        }
    }

    async fn on_success(&self, state: CircuitState) {
        self.metrics.lock().await.successful_calls += 1;

        match state {
            CircuitState::HalfOpen => {
                let successes = self.success_count.fetch_add(1, Ordering::SeqCst) + 1;
                if successes >= self.config.success_threshold {
                    self.transition_to_state(CircuitState::Closed).await;
                    self.failure_count.store(0, Ordering::SeqCst);
                    self.success_count.store(0, Ordering::SeqCst);
                }
            }
            CircuitState::Closed => self.failure_count.store(0, Ordering::SeqCst),
            CircuitState::Open => {}
        }
    }

    async fn on_failure(&self, state: CircuitState) {
        let failures = self.failure_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.metrics.lock().await.failed_calls += 1;

        warn!(
            service = %self.service_name,
            failures,
            threshold = self.config.failure_threshold,
            state = state.as_str(),
            "Circuit breaker recorded failure"
        );

        match state {
            CircuitState::HalfOpen => self.transition_to_state(CircuitState::Open).await,
            CircuitState::Closed if failures >= self.config.failure_threshold => {
                self.transition_to_state(CircuitState::Open).await
            }
            _ => {}
        }
    }

    async fn check_timeout(&self) {
        let current_state = *self.state.lock().await;
        if current_state != CircuitState::Open {
            return;
        }

        let elapsed = self.opened_at.lock().await.map(|opened| opened.elapsed());
        if elapsed.map_or(true, |elapsed| elapsed >= self.config.reset_timeout) {
            self.success_count.store(0, Ordering::SeqCst);
            self.transition_to_state(CircuitState::HalfOpen).await;
        }
    }

    async fn transition_to_state(&self, new_state: CircuitState) {
        let mut state = self.state.lock().await;
        if *state == new_state {
            return;
        }

        info!(
            service = %self.service_name,
            from = state.as_str(),
            to = new_state.as_str(),
            "Circuit breaker state transition"
        );

        *state = new_state;
        *self.opened_at.lock().await = if new_state == CircuitState::Open {
            Some(Instant::now())
        } else {
            None
        };
        self.metrics.lock().await.state_transitions += 1;
    }
}
