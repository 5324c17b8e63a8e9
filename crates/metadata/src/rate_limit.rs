use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

pub const DEFAULT_BUDGET: u32 = 50;
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(1);

/// Fixed-window throttle for outbound metadata requests.
///
/// One instance is shared by every request of a run. The counter and window
/// start sit behind a mutex so the check-then-increment is atomic even if
/// lookups are ever issued concurrently.
#[derive(Debug)]
pub struct RateLimiter {
    inner: Mutex<WindowState>,
    budget: u32,
    window: Duration,
}

#[derive(Debug)]
struct WindowState {
    requests_in_window: u32,
    window_start: Instant,
}

impl RateLimiter {
    pub fn new(budget: u32, window: Duration) -> Self {
        Self {
            inner: Mutex::new(WindowState {
                requests_in_window: 0,
                window_start: Instant::now(),
            }),
            budget: budget.max(1),
            window,
        }
    }

    /// Wait for a request slot. Call once immediately before each request.
    ///
    /// Returns at once while the window has budget left. Once it is spent,
    /// sleeps until the window ends, then starts a fresh window at the
    /// resume time with this request counted in it.
    pub async fn acquire(&self) {
        let mut state = self.inner.lock().await;

        let now = Instant::now();
        if now.duration_since(state.window_start) >= self.window {
            state.window_start = now;
            state.requests_in_window = 0;
        }

        if state.requests_in_window >= self.budget {
            let resume_at = state.window_start + self.window;
            debug!(
                budget = self.budget,
                wait_ms = resume_at.saturating_duration_since(now).as_millis() as u64,
                "rate limit reached, waiting for window reset"
            );
            tokio::time::sleep_until(resume_at).await;
            state.window_start = Instant::now();
            state.requests_in_window = 0;
        }

        state.requests_in_window += 1;
    }

    /// Requests counted in the current window.
    pub async fn requests_in_window(&self) -> u32 {
        self.inner.lock().await.requests_in_window
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_BUDGET, DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn budget_requests_pass_without_waiting() {
        let limiter = RateLimiter::new(50, Duration::from_secs(1));
        let start = Instant::now();
        for _ in 0..50 {
            limiter.acquire().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(limiter.requests_in_window().await, 50);
    }

    #[tokio::test(start_paused = true)]
    async fn request_over_budget_waits_for_window_reset() {
        let limiter = RateLimiter::new(50, Duration::from_secs(1));
        let start = Instant::now();
        for _ in 0..50 {
            limiter.acquire().await;
        }

        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_secs(1));
        assert_eq!(limiter.requests_in_window().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_covers_only_remainder_of_window() {
        let limiter = RateLimiter::new(2, Duration::from_secs(1));
        limiter.acquire().await;
        limiter.acquire().await;

        tokio::time::advance(Duration::from_millis(400)).await;
        let before = Instant::now();
        limiter.acquire().await;
        let waited = before.elapsed();
        assert!(waited >= Duration::from_millis(600));
        assert!(waited < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_window_resets_without_waiting() {
        let limiter = RateLimiter::new(1, Duration::from_secs(1));
        limiter.acquire().await;
        tokio::time::advance(Duration::from_secs(2)).await;

        let before = Instant::now();
        limiter.acquire().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
        assert_eq!(limiter.requests_in_window().await, 1);
    }

    #[test]
    fn zero_budget_is_clamped() {
        let limiter = RateLimiter::new(0, DEFAULT_WINDOW);
        assert_eq!(limiter.budget(), 1);
        assert_eq!(RateLimiter::default().budget(), DEFAULT_BUDGET);
    }
}
