//! End-to-end demo: draw a small group, then let the scheduler deliver the
//! DrawCompleted notifications through a mailer that fails a couple of times
//! first.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::time::sleep;

use giftwheel_core::app::{DeliveryProcessor, Scheduler, SchedulerConfig};
use giftwheel_core::domain::{
    ExclusionConstraint, ExclusionSet, GroupId, MailError, ParticipantId,
};
use giftwheel_core::draw::{DrawOrchestrator, DrawRequest};
use giftwheel_core::impls::{InMemoryDrawStore, InMemoryNotificationStore};
use giftwheel_core::ports::{Mailer, NotificationStore, SystemClock, UlidGenerator};
use giftwheel_core::queue::{NotificationQueue, RetryPolicy};
use rand::SeedableRng;

/// Console "mail provider" that rejects the first few sends, so the retry
/// path is visible in the output.
struct ConsoleMailer {
    remaining_failures: AtomicU32,
}

impl ConsoleMailer {
    fn new(failures: u32) -> Self {
        Self {
            remaining_failures: AtomicU32::new(failures),
        }
    }
}

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send_draw_completed(
        &self,
        recipient: &ParticipantId,
        group: &GroupId,
        budget: Option<&str>,
    ) -> Result<(), MailError> {
        let left = self.remaining_failures.load(Ordering::Relaxed);
        if left > 0 {
            self.remaining_failures.fetch_sub(1, Ordering::Relaxed);
            return Err(MailError::with_code(
                format!("intentional failure (left={left})"),
                "421",
            ));
        }
        println!(
            "[mail] to={recipient}: the draw for {group} is done{}",
            budget.map(|b| format!(" (budget: {b})")).unwrap_or_default()
        );
        Ok(())
    }

    async fn send_wishlist_updated(
        &self,
        recipient: &ParticipantId,
        group: &GroupId,
        giftee: &ParticipantId,
    ) -> Result<(), MailError> {
        println!("[mail] to={recipient}: {giftee}'s wishlist in {group} changed");
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // (A) Wire the core: clock, stores, queue, orchestrator.
    let clock = Arc::new(SystemClock);
    let draws = Arc::new(InMemoryDrawStore::new());
    let notifications = Arc::new(InMemoryNotificationStore::new());

    // Short backoff so the demo retries within seconds instead of minutes.
    let policy = RetryPolicy {
        base_delay: Duration::from_secs(1),
        ..RetryPolicy::default()
    };

    let queue = NotificationQueue::new(
        notifications.clone(),
        Arc::new(UlidGenerator::new(SystemClock)),
        clock.clone(),
        policy.clone(),
    );
    let orchestrator = DrawOrchestrator::new(draws.clone(), queue);

    // (B) Run the draw: four people, alice and bob must not be paired.
    let group = GroupId::new("holiday-2026");
    let participants: Vec<ParticipantId> = ["alice", "bob", "carol", "dana"]
        .iter()
        .map(|name| ParticipantId::new(*name))
        .collect();
    let mut exclusions = ExclusionSet::new();
    exclusions.insert(
        ExclusionConstraint::new(ParticipantId::new("alice"), ParticipantId::new("bob"))
            .expect("distinct participants"),
    );

    let mut rng = rand::rngs::StdRng::from_entropy();
    let outcome = orchestrator
        .run_draw(
            DrawRequest {
                group_id: group.clone(),
                participants,
                exclusions,
                budget: Some("30 EUR".to_string()),
            },
            &mut rng,
        )
        .await
        .expect("draw should be feasible");

    println!("draw for {group}:");
    for edge in &outcome.assignments {
        println!("  {} gives to {}", edge.santa, edge.recipient);
    }

    // (C) Start the delivery loop against a mailer that fails twice.
    let mailer = Arc::new(ConsoleMailer::new(2));
    let processor = Arc::new(DeliveryProcessor::new(
        notifications.clone(),
        mailer,
        clock.clone(),
        policy,
    ));
    let scheduler = Scheduler::spawn(
        SchedulerConfig {
            enabled: true,
            tick_interval: Duration::from_millis(200),
        },
        processor,
    );

    // (D) Poll until every notification reached a terminal state.
    loop {
        let counts = notifications
            .counts_by_state(chrono::Utc::now())
            .await
            .expect("in-memory store");
        if counts.sent + counts.failed == outcome.notified {
            println!(
                "queue settled: sent={} failed={} (of {})",
                counts.sent, counts.failed, outcome.notified
            );
            break;
        }
        sleep(Duration::from_millis(100)).await;
    }

    scheduler.shutdown_and_join().await;
}
