use crate::{
    reminder::send_due_reminders::SendDueRemindersUseCase,
    shared::usecase::execute,
};
use calendar_infra::{CalendarContext, ReminderJobConfig};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

struct RunningJob {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Runs the reminder dispatch in the background on a fixed interval.
///
/// Owned by the `Application`. A run always finishes before the next one
/// starts, a run that would have started in the meantime is skipped.
pub struct ReminderJobScheduler {
    ctx: CalendarContext,
    config: ReminderJobConfig,
    job: Option<RunningJob>,
}

impl ReminderJobScheduler {
    pub fn new(ctx: CalendarContext) -> Self {
        let config = ctx.config.reminder_job.clone();
        Self {
            ctx,
            config,
            job: None,
        }
    }

    /// Starts the background job. Returns `false` if it was already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }

        let cancel = CancellationToken::new();
        let handle = actix_web::rt::spawn(run_reminder_job(
            self.ctx.clone(),
            self.config.clone(),
            cancel.clone(),
        ));
        self.job = Some(RunningJob { cancel, handle });
        info!(
            interval = ?self.config.interval,
            lookahead = ?self.config.lookahead,
            "Reminder job started"
        );
        true
    }

    /// Stops the background job and waits for the current run to finish
    /// the reminder it is working on
    pub async fn stop(&mut self) {
        let job = match self.job.take() {
            Some(job) => job,
            None => return,
        };
        job.cancel.cancel();
        if let Err(e) = job.handle.await {
            error!("Reminder job did not shut down cleanly: {:?}", e);
        }
    }

    pub fn is_running(&self) -> bool {
        match &self.job {
            Some(job) => !job.handle.is_finished(),
            None => false,
        }
    }
}

async fn run_reminder_job(ctx: CalendarContext, config: ReminderJobConfig, cancel: CancellationToken) {
    if config.align_to_minute {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = sleep(Duration::from_secs(secs_to_next_run as u64)) => {}
        }
    }

    let mut ticker = interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let usecase = SendDueRemindersUseCase {
                    lookahead: config.lookahead,
                    cancel: cancel.clone(),
                };
                // Failures are logged by the use case, the next tick starts over
                let _ = execute(usecase, &ctx).await;
            }
        }
    }
    info!("Reminder job stopped");
}
