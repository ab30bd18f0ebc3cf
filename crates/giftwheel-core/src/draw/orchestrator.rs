//! Draw orchestrator: thin coordinator around the cycle generator.
//!
//! Validates the request, runs the generator, persists the assignment edges,
//! and enqueues one DrawCompleted notification per participant. Rejections
//! happen before any write; a draw is one-shot per group.

use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;

use super::generator::{self, MIN_PARTICIPANTS};
use crate::domain::{Assignment, DrawError, ExclusionSet, GroupId, NotificationPayload, ParticipantId};
use crate::ports::DrawStore;
use crate::queue::NotificationQueue;

/// What the external draw trigger supplies.
#[derive(Debug, Clone)]
pub struct DrawRequest {
    pub group_id: GroupId,
    pub participants: Vec<ParticipantId>,
    pub exclusions: ExclusionSet,
    /// Agreed budget hint, passed through into the notifications.
    pub budget: Option<String>,
}

/// Result of a successful draw.
#[derive(Debug, Clone)]
pub struct DrawOutcome {
    pub assignments: Vec<Assignment>,
    /// Number of DrawCompleted notifications enqueued (one per participant).
    pub notified: usize,
}

pub struct DrawOrchestrator {
    draws: Arc<dyn DrawStore>,
    queue: NotificationQueue,
}

impl DrawOrchestrator {
    pub fn new(draws: Arc<dyn DrawStore>, queue: NotificationQueue) -> Self {
        Self { draws, queue }
    }

    /// Run the draw for a group.
    ///
    /// The RNG is supplied by the caller so concurrent draws never share
    /// mutable random state and tests can fix the seed.
    pub async fn run_draw<R: Rng + Send>(
        &self,
        request: DrawRequest,
        rng: &mut R,
    ) -> Result<DrawOutcome, DrawError> {
        let group = &request.group_id;

        if request.participants.len() < MIN_PARTICIPANTS {
            return Err(DrawError::InsufficientParticipants {
                found: request.participants.len(),
                min: MIN_PARTICIPANTS,
            });
        }
        validate_exclusions(&request.participants, &request.exclusions)?;

        if self.draws.is_drawn(group).await? {
            return Err(DrawError::AlreadyDrawn(group.clone()));
        }

        let cycle = generator::generate_cycle(&request.participants, &request.exclusions, rng)?;
        let assignments = Assignment::from_cycle(&cycle);

        // Check-and-insert: a concurrent duplicate draw loses here instead
        // of writing a second cycle.
        if !self
            .draws
            .try_record_draw(group, assignments.clone())
            .await?
        {
            return Err(DrawError::AlreadyDrawn(group.clone()));
        }

        let mut notified = 0;
        for participant in &request.participants {
            self.queue
                .enqueue(
                    participant.clone(),
                    NotificationPayload::DrawCompleted {
                        group_id: group.clone(),
                        budget: request.budget.clone(),
                    },
                    None,
                )
                .await?;
            notified += 1;
        }

        tracing::info!(
            group = %group,
            participants = request.participants.len(),
            exclusions = request.exclusions.len(),
            "draw completed"
        );
        Ok(DrawOutcome {
            assignments,
            notified,
        })
    }
}

/// Exclusions may only reference draw participants.
fn validate_exclusions(
    participants: &[ParticipantId],
    exclusions: &ExclusionSet,
) -> Result<(), DrawError> {
    let known: HashSet<&ParticipantId> = participants.iter().collect();
    for constraint in exclusions.iter() {
        for p in [constraint.first(), constraint.second()] {
            if !known.contains(p) {
                return Err(DrawError::UnknownParticipant(p.clone()));
            }
        }
    }
    Ok(())
}
