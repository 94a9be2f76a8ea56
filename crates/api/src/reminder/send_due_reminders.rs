use crate::shared::usecase::UseCase;
use calendar_domain::Reminder;
use calendar_infra::{CalendarContext, MarkSentResult};
use chrono::{DateTime, Utc};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Sends every `Reminder` that is due within the `lookahead` window and
/// marks it as sent.
///
/// Every reminder is handled on its own. A reminder that cannot be delivered
/// or committed stays unsent and is picked up again by the next run, while
/// the remaining reminders are still processed.
#[derive(Debug)]
pub struct SendDueRemindersUseCase {
    pub lookahead: Duration,
    /// Checked between two reminders, a reminder is never left half processed
    pub cancel: CancellationToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EventNotFound,
    UserNotFound,
    /// Someone else marked the reminder as sent after it was scanned
    AlreadySent,
    /// The reminder was deleted after it was scanned
    ReminderDeleted,
}

#[derive(Debug)]
pub enum DispatchOutcome {
    Sent,
    Skipped(SkipReason),
    Failed(anyhow::Error),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub scanned: usize,
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl TickReport {
    fn record(&mut self, outcome: &DispatchOutcome) {
        match outcome {
            DispatchOutcome::Sent => self.sent += 1,
            DispatchOutcome::Skipped(_) => self.skipped += 1,
            DispatchOutcome::Failed(_) => self.failed += 1,
        }
    }
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl SendDueRemindersUseCase {
    fn due_before(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        chrono::Duration::from_std(self.lookahead)
            .ok()
            .and_then(|lookahead| now.checked_add_signed(lookahead))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDueRemindersUseCase {
    type Response = TickReport;

    type Error = UseCaseError;

    const NAME: &'static str = "SendDueReminders";

    async fn execute(&mut self, ctx: &CalendarContext) -> Result<Self::Response, Self::Error> {
        let before = self.due_before(ctx.sys.now());
        let due = ctx
            .repos
            .reminder_repo
            .find_due(before)
            .await
            .map_err(|e| {
                error!("Unable to fetch due reminders: {:?}", e);
                UseCaseError::StorageError
            })?;

        let mut report = TickReport {
            scanned: due.len(),
            ..Default::default()
        };
        for (processed, reminder) in due.iter().enumerate() {
            if self.cancel.is_cancelled() {
                info!(
                    "Reminder dispatch cancelled, {} due reminders left for the next run",
                    due.len() - processed
                );
                break;
            }

            let outcome = AssertUnwindSafe(dispatch(reminder, ctx))
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| {
                    Err(anyhow::anyhow!(
                        "Panicked while dispatching: {}",
                        panic_message(panic.as_ref())
                    ))
                })
                .unwrap_or_else(DispatchOutcome::Failed);
            log_outcome(reminder, &outcome);
            report.record(&outcome);
        }

        if report.scanned > 0 {
            info!(
                scanned = report.scanned,
                sent = report.sent,
                skipped = report.skipped,
                failed = report.failed,
                "Reminder dispatch finished"
            );
        } else {
            debug!("No due reminders");
        }

        Ok(report)
    }
}

/// Resolves the event and the user of the reminder, notifies the user and
/// commits the reminder as sent
async fn dispatch(reminder: &Reminder, ctx: &CalendarContext) -> anyhow::Result<DispatchOutcome> {
    let event = match ctx.repos.event_repo.find(&reminder.event_id).await? {
        Some(event) => event,
        None => return Ok(DispatchOutcome::Skipped(SkipReason::EventNotFound)),
    };
    let user = match ctx.repos.user_repo.find(&event.user_id).await? {
        Some(user) => user,
        None => return Ok(DispatchOutcome::Skipped(SkipReason::UserNotFound)),
    };

    ctx.notifier.notify(&user, &event, reminder).await?;

    let outcome = match ctx
        .repos
        .reminder_repo
        .mark_sent(&reminder.id, ctx.sys.now())
        .await?
    {
        MarkSentResult::Sent => DispatchOutcome::Sent,
        MarkSentResult::AlreadySent => DispatchOutcome::Skipped(SkipReason::AlreadySent),
        MarkSentResult::NotFound => DispatchOutcome::Skipped(SkipReason::ReminderDeleted),
    };

    Ok(outcome)
}

fn log_outcome(reminder: &Reminder, outcome: &DispatchOutcome) {
    match outcome {
        DispatchOutcome::Sent => debug!(reminder_id = %reminder.id, "Reminder sent"),
        DispatchOutcome::Skipped(reason @ SkipReason::EventNotFound)
        | DispatchOutcome::Skipped(reason @ SkipReason::UserNotFound) => warn!(
            reminder_id = %reminder.id,
            event_id = %reminder.event_id,
            "Skipping orphaned reminder: {:?}",
            reason
        ),
        DispatchOutcome::Skipped(reason) => debug!(
            reminder_id = %reminder.id,
            "Reminder no longer pending: {:?}",
            reason
        ),
        DispatchOutcome::Failed(e) => error!(
            reminder_id = %reminder.id,
            "Unable to send reminder, will retry on the next run: {:?}",
            e
        ),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}
