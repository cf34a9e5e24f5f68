//! Tests for in-flight request coalescing

#[cfg(test)]
mod tests {
    use prism_domain::{AiResponse, Capability, RouteResult, RouterError};
    use prism_infrastructure::routing::RequestCoalescer;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::oneshot;
    use tokio_util::sync::CancellationToken;

    const LONG: Duration = Duration::from_secs(60);

    fn response(text: &str) -> Arc<AiResponse> {
        Arc::new(AiResponse::text("gemini", Capability::Text, text))
    }

    #[tokio::test(start_paused = true)]
    async fn test_identical_requests_share_one_flight() {
        let coalescer = RequestCoalescer::new();
        let produced = Arc::new(AtomicUsize::new(0));

        let make = |produced: Arc<AtomicUsize>| {
            move |_abandon: CancellationToken| async move {
                produced.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(100)).await;
                RouteResult::Ok(response("shared"))
            }
        };

        let first = coalescer.join("text:k", make(Arc::clone(&produced)));
        let second = coalescer.join("text:k", make(Arc::clone(&produced)));
        assert!(!first.joined());
        assert!(second.joined());
        assert_eq!(coalescer.pending_count(), 1);

        let (a, b) = tokio::join!(
            first.wait(None),
            second.wait(None)
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(produced.load(Ordering::SeqCst), 1);
        assert_eq!(coalescer.pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_are_shared_too() {
        let coalescer = RequestCoalescer::new();
        let failing = |_abandon: CancellationToken| async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            RouteResult::<Arc<AiResponse>>::Err(RouterError::CircuitOpenForAll {
                capability: Capability::Text,
            })
        };

        let first = coalescer.join("text:e", failing);
        let second = coalescer.join("text:e", failing);
        let (a, b) = tokio::join!(
            first.wait(None),
            second.wait(None)
        );
        assert_eq!(a.unwrap_err(), b.unwrap_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_different_keys_run_independently() {
        let coalescer = RequestCoalescer::new();
        let a = coalescer.join("text:a", |_| async { RouteResult::Ok(response("a")) });
        let b = coalescer.join("text:b", |_| async { RouteResult::Ok(response("b")) });
        assert!(!a.joined());
        assert!(!b.joined());

        let a = a.wait(None).await.unwrap();
        let b = b.wait(None).await.unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscriber_cancellation_yields_cancelled() {
        let coalescer = RequestCoalescer::new();
        let subscription = coalescer.join("text:slow", |_| async {
            tokio::time::sleep(LONG).await;
            RouteResult::Ok(response("late"))
        });

        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let result = subscription.wait(Some(&token)).await;
        assert_eq!(result.unwrap_err(), RouterError::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_subscriber_leaving_abandons_flight() {
        let coalescer = RequestCoalescer::new();
        let (tx, rx) = oneshot::channel();

        let subscription = coalescer.join("text:abandon", move |abandon| async move {
            abandon.cancelled().await;
            let _ = tx.send(());
            RouteResult::<Arc<AiResponse>>::Err(RouterError::Cancelled)
        });
        let other = coalescer.join("text:abandon", |_| async {
            RouteResult::Ok(response("unused"))
        });
        assert!(other.joined());

        drop(subscription);
        tokio::task::yield_now().await;
        drop(other);

        tokio::time::timeout(Duration::from_secs(1), rx)
            .await
            .expect("producer observed abandonment")
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_join_after_abandonment_starts_new_flight() {
        let coalescer = RequestCoalescer::new();
        let first = coalescer.join("text:again", |_| async {
            tokio::time::sleep(LONG).await;
            RouteResult::Ok(response("old"))
        });
        drop(first);

        let second = coalescer.join("text:again", |_| async {
            RouteResult::Ok(response("fresh"))
        });
        assert!(!second.joined());
        let value = second.wait(None).await.unwrap();
        assert_eq!(value.content.as_text(), Some("fresh"));
    }
}
