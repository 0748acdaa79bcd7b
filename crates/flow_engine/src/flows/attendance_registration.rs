//! Attendance registration flow
//!
//! On entry the flow computes the participant's unanswered schedules (keys
//! with no attendance row for them), sorted by date, and walks that pending
//! list one item at a time: status, then remarks, then an immediate upsert.
//! Answers committed before a cancellation stay committed.

use std::collections::HashSet;

use bot_core::record::{AttendanceRecord, ScheduleKey};
use bot_core::status::AttendanceStatus;
use bot_state::session::Session;
use bot_state::step::{AttendanceRegistrationStep, FlowStep};
use record_store::with_retry;

use crate::error::FlowError;
use crate::flows::{normalize_remarks, FlowServices};
use crate::replies;

pub async fn start(
    svc: &FlowServices,
    conversation_id: &str,
    participant_id: &str,
) -> Result<Vec<String>, FlowError> {
    let schedules = with_retry(&svc.retry, || svc.schedules.scan()).await?;
    let answered: HashSet<ScheduleKey> = with_retry(&svc.retry, || svc.attendance.scan())
        .await?
        .into_iter()
        .filter(|row| row.participant_id == participant_id)
        .map(|row| row.key().schedule_key())
        .collect();

    let mut pending: Vec<ScheduleKey> = schedules
        .iter()
        .map(|record| record.key())
        .filter(|key| !answered.contains(key))
        .collect();
    pending.sort();

    let first = match pending.first() {
        // No session is created when there is nothing to answer.
        None => return Ok(vec![replies::NO_PENDING_ATTENDANCE.to_string()]),
        Some(first) => first.clone(),
    };

    let mut session = Session::start(FlowStep::AttendanceRegistration(
        AttendanceRegistrationStep::AskStatus,
    ));
    session.pending = pending;
    let count = session.pending.len();
    svc.sessions.set(conversation_id, session).await;
    Ok(vec![
        replies::attendance_started(count),
        replies::ask_status(&first),
    ])
}

pub async fn handle(
    svc: &FlowServices,
    conversation_id: &str,
    participant_id: &str,
    display_name: &str,
    mut session: Session,
    step: AttendanceRegistrationStep,
    input: &str,
) -> Result<Vec<String>, FlowError> {
    let key = match session.current_pending() {
        Some(key) => key.clone(),
        None => {
            svc.sessions.clear(conversation_id).await;
            return Ok(vec![replies::SESSION_RESET.to_string()]);
        }
    };

    match step {
        AttendanceRegistrationStep::AskStatus => match AttendanceStatus::parse(input) {
            None => Ok(vec![replies::STATUS_REPROMPT.to_string()]),
            Some(status) => {
                session.current_step = FlowStep::AttendanceRegistration(
                    AttendanceRegistrationStep::AskRemarks(status),
                );
                svc.sessions.set(conversation_id, session).await;
                Ok(vec![replies::ASK_REMARKS.to_string()])
            }
        },
        AttendanceRegistrationStep::AskRemarks(status) => {
            let row = AttendanceRecord {
                date: key.date,
                title: key.title.clone(),
                participant_id: participant_id.to_string(),
                display_name: display_name.to_string(),
                status,
                remarks: normalize_remarks(input),
            };
            with_retry(&svc.retry, || svc.attendance.upsert_by_key(row.clone())).await?;

            session.cursor += 1;
            match session.current_pending().cloned() {
                Some(next) => {
                    session.current_step = FlowStep::AttendanceRegistration(
                        AttendanceRegistrationStep::AskStatus,
                    );
                    svc.sessions.set(conversation_id, session).await;
                    Ok(vec![
                        replies::ATTENDANCE_RECORDED.to_string(),
                        replies::ask_status(&next),
                    ])
                }
                None => {
                    svc.sessions.clear(conversation_id).await;
                    Ok(vec![
                        replies::ATTENDANCE_RECORDED.to_string(),
                        replies::ATTENDANCE_COMPLETE.to_string(),
                    ])
                }
            }
        }
    }
}
