//! Stateless list queries
//!
//! Read-only operations answered in one message. None of them touch the
//! session store, so an active flow is neither required nor disturbed when
//! the router is asked for a listing.

use std::collections::BTreeMap;

use bot_core::record::{AttendanceRecord, ScheduleKey};
use record_store::with_retry;

use crate::error::FlowError;
use crate::flows::FlowServices;
use crate::replies;

/// All registered schedules, sorted by date then title.
pub async fn list_schedules(svc: &FlowServices) -> Result<Vec<String>, FlowError> {
    let mut records = with_retry(&svc.retry, || svc.schedules.scan()).await?;
    if records.is_empty() {
        return Ok(vec![replies::NO_SCHEDULES.to_string()]);
    }
    records.sort_by_key(|record| record.key());
    let blocks: Vec<String> = records.iter().map(replies::render_schedule).collect();
    Ok(vec![replies::schedule_listing(&blocks)])
}

/// The calling participant's planned attendance (attending or tentative),
/// sorted by date then title. Declined answers are not shown.
pub async fn list_my_attendance(
    svc: &FlowServices,
    participant_id: &str,
) -> Result<Vec<String>, FlowError> {
    let mut rows: Vec<AttendanceRecord> = with_retry(&svc.retry, || svc.attendance.scan())
        .await?
        .into_iter()
        .filter(|row| row.participant_id == participant_id && row.status.is_planned())
        .collect();
    if rows.is_empty() {
        return Ok(vec![replies::NO_PLANNED_ATTENDANCE.to_string()]);
    }
    rows.sort_by_key(|row| row.key().schedule_key());
    let lines: Vec<String> = rows.iter().map(replies::attendance_line).collect();
    Ok(vec![replies::my_attendance_listing(&lines)])
}

/// All attendance answers grouped by schedule, sorted by schedule key, with
/// per-participant status and remarks.
pub async fn list_participants(svc: &FlowServices) -> Result<Vec<String>, FlowError> {
    let rows = with_retry(&svc.retry, || svc.attendance.scan()).await?;
    if rows.is_empty() {
        return Ok(vec![replies::NO_ATTENDANCE_ROWS.to_string()]);
    }
    let mut groups: BTreeMap<ScheduleKey, Vec<AttendanceRecord>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.key().schedule_key()).or_default().push(row);
    }
    let blocks: Vec<String> = groups
        .iter_mut()
        .map(|(key, rows)| {
            rows.sort_by(|a, b| a.display_name.cmp(&b.display_name));
            replies::participant_block(key, rows)
        })
        .collect();
    Ok(vec![replies::participant_listing(&blocks)])
}
