//! Service reminder notification generator
//!
//! One background job scans active reminders whose notify window has
//! opened and writes a notification per reminder, at most once per dedup
//! window. A failed run is retried after a shorter backoff.

use std::sync::Arc;

use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, Utc};
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{debug, info, warn};

use crate::config::NotificationConfig;
use crate::domain::{
    DomainError, DomainResult, Notification, NotificationPriority, RepositoryProvider,
    ServiceReminder,
};
use crate::shared::shutdown::ShutdownSignal;

/// Outcome of one scan
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub due: usize,
    pub created: usize,
    pub skipped_duplicate: usize,
    pub skipped_unresolved: usize,
    /// Shutdown cut the scan short; the remaining reminders wait for the next run
    pub interrupted: bool,
}

pub struct NotificationGenerator {
    repos: Arc<dyn RepositoryProvider>,
    config: NotificationConfig,
}

impl NotificationGenerator {
    pub fn new(repos: Arc<dyn RepositoryProvider>, config: NotificationConfig) -> Self {
        Self { repos, config }
    }

    /// Scan once as of `today`, deduplicating against notifications created
    /// since `now - dedup_window`. `shutdown` is checked before every
    /// reminder and raced against every database call.
    pub async fn run_once(
        &self,
        today: NaiveDate,
        now: DateTime<Utc>,
        shutdown: &ShutdownSignal,
    ) -> DomainResult<ScanReport> {
        let mut report = ScanReport::default();

        let Some(reminders) = shutdown.run_until(self.repos.reminders().find_due(today)).await else {
            report.interrupted = true;
            return Ok(report);
        };
        let reminders = reminders?;
        report.due = reminders.len();

        let since = ChronoDuration::try_hours(self.config.dedup_window_hours.max(0))
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        for reminder in reminders {
            if shutdown.is_triggered() {
                report.interrupted = true;
                break;
            }

            let Some(duplicate) = shutdown
                .run_until(
                    self.repos
                        .notifications()
                        .exists_for_reminder_since(reminder.id, since),
                )
                .await
            else {
                report.interrupted = true;
                break;
            };
            if duplicate? {
                report.skipped_duplicate += 1;
                continue;
            }

            let Some(built) = shutdown.run_until(self.build(&reminder, today, now)).await else {
                report.interrupted = true;
                break;
            };
            let Some(notification) = built? else {
                report.skipped_unresolved += 1;
                continue;
            };

            let Some(saved) = shutdown
                .run_until(self.repos.notifications().save(notification))
                .await
            else {
                report.interrupted = true;
                break;
            };
            let saved = saved?;
            metrics::counter!("notifications_created_total").increment(1);
            debug!(
                reminder_id = reminder.id,
                notification_id = saved.id,
                priority = saved.priority.as_str(),
                "Notification created"
            );
            report.created += 1;
        }

        if report.interrupted {
            info!(
                due = report.due,
                created = report.created,
                "Notification scan interrupted by shutdown"
            );
        }
        Ok(report)
    }

    /// Resolve display fields; `None` when the vehicle, its owner or the
    /// service no longer exists
    async fn build(
        &self,
        reminder: &ServiceReminder,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Notification>> {
        let Some(vehicle) = self.repos.vehicles().find_by_id(reminder.vehicle_id).await? else {
            warn!(reminder_id = reminder.id, vehicle_id = reminder.vehicle_id, "Reminder vehicle not found, skipping");
            return Ok(None);
        };
        let Some(customer) = self.repos.customers().find_by_id(vehicle.customer_id).await? else {
            warn!(reminder_id = reminder.id, customer_id = vehicle.customer_id, "Vehicle owner not found, skipping");
            return Ok(None);
        };
        let Some(service) = self.repos.catalog().find_service(reminder.service_id).await? else {
            warn!(reminder_id = reminder.id, service_id = reminder.service_id, "Reminder service not found, skipping");
            return Ok(None);
        };

        let days = reminder.days_until_due(today);
        let priority = NotificationPriority::for_days_until_due(days);
        let vehicle_display = vehicle.display_name();

        Ok(Some(Notification {
            id: 0,
            customer_id: customer.id,
            vehicle_id: vehicle.id,
            service_reminder_id: Some(reminder.id),
            title: format!("{} reminder", service.name),
            message: reminder_message(&service.name, &vehicle_display, days),
            priority,
            color: priority.color().to_string(),
            customer_name: customer.full_name,
            vehicle_display,
            service_name: service.name,
            due_date: Some(reminder.reminder_date),
            is_read: false,
            created_at: now,
        }))
    }

    /// Spawn the periodic scan. The first run starts immediately.
    pub fn start(self: Arc<Self>, shutdown: ShutdownSignal) -> JoinHandle<()> {
        tokio::spawn(async move {
            let interval = Duration::from_secs(self.config.scan_interval_secs.max(1));
            let backoff = Duration::from_secs(self.config.retry_backoff_secs.max(1));
            let run_timeout = Duration::from_secs(self.config.run_timeout_secs.max(1));

            info!(
                interval_secs = interval.as_secs(),
                backoff_secs = backoff.as_secs(),
                "🔔 Notification generator started"
            );

            loop {
                if shutdown.is_triggered() {
                    break;
                }

                let now = Utc::now();
                let outcome = match tokio::time::timeout(
                    run_timeout,
                    self.run_once(now.date_naive(), now, &shutdown),
                )
                .await
                {
                    Ok(result) => result,
                    Err(_) => Err(DomainError::Storage(format!(
                        "notification scan exceeded {}s",
                        run_timeout.as_secs()
                    ))),
                };

                let next = match outcome {
                    Ok(report) if report.interrupted => break,
                    Ok(report) => {
                        if report.created > 0 {
                            info!(
                                due = report.due,
                                created = report.created,
                                skipped_duplicate = report.skipped_duplicate,
                                skipped_unresolved = report.skipped_unresolved,
                                "Notification scan finished"
                            );
                        }
                        interval
                    }
                    Err(e) => {
                        metrics::counter!("notification_scan_failures_total").increment(1);
                        warn!(
                            error = %e,
                            transient = e.is_transient(),
                            retry_in_secs = backoff.as_secs(),
                            "Notification scan failed"
                        );
                        backoff
                    }
                };

                tokio::select! {
                    _ = tokio::time::sleep(next) => {}
                    _ = shutdown.wait() => break,
                }
            }

            info!("🔔 Notification generator stopped");
        })
    }
}

fn reminder_message(service_name: &str, vehicle: &str, days_until_due: i64) -> String {
    match days_until_due {
        d if d < 0 => format!(
            "{} for {} is overdue by {} day(s)",
            service_name,
            vehicle,
            -d
        ),
        0 => format!("{} for {} is due today", service_name, vehicle),
        d => format!("{} for {} is due in {} day(s)", service_name, vehicle, d),
    }
}
