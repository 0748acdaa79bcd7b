//! Attendance edit flow
//!
//! Looks up the participant's own attendance answer for a schedule, then
//! offers to cancel it outright or to rewrite the remarks. Only the caller's
//! own rows are reachable; the key always includes their participant id.

use bot_core::schema::{FieldId, FieldKind};
use bot_core::validate::validate_field;
use bot_state::session::Session;
use bot_state::step::{AttendanceEditStep, FlowStep};
use record_store::{with_retry, RecordStoreError};

use crate::error::FlowError;
use crate::flows::{attendance_key_from, normalize_remarks, parse_yes_no, FlowServices};
use crate::replies;

pub async fn start(svc: &FlowServices, conversation_id: &str) -> Result<Vec<String>, FlowError> {
    let session = Session::start(FlowStep::AttendanceEdit(AttendanceEditStep::AskDate));
    svc.sessions.set(conversation_id, session).await;
    Ok(vec![
        replies::ATTENDANCE_EDIT_STARTED.to_string(),
        FieldId::Date.descriptor().prompt.to_string(),
    ])
}

pub async fn handle(
    svc: &FlowServices,
    conversation_id: &str,
    participant_id: &str,
    mut session: Session,
    step: AttendanceEditStep,
    input: &str,
) -> Result<Vec<String>, FlowError> {
    match step {
        AttendanceEditStep::AskDate => {
            let value = match validate_field(FieldKind::Date, input) {
                Ok(value) => value,
                Err(err) => return Ok(vec![err.to_string()]),
            };
            session.put_field(FieldId::Date, value);
            session.current_step = FlowStep::AttendanceEdit(AttendanceEditStep::AskTitle);
            svc.sessions.set(conversation_id, session).await;
            Ok(vec![FieldId::Title.descriptor().prompt.to_string()])
        }
        AttendanceEditStep::AskTitle => {
            let value = match validate_field(FieldKind::RequiredText, input) {
                Ok(value) => value,
                Err(err) => return Ok(vec![err.to_string()]),
            };
            session.put_field(FieldId::Title, value);
            let key = match attendance_key_from(&session, participant_id) {
                Some(key) => key,
                None => {
                    svc.sessions.clear(conversation_id).await;
                    return Ok(vec![replies::SESSION_RESET.to_string()]);
                }
            };
            let found = with_retry(&svc.retry, || svc.attendance.find_by_key(&key)).await?;
            match found {
                None => {
                    svc.sessions.clear(conversation_id).await;
                    Ok(vec![replies::ATTENDANCE_NOT_FOUND.to_string()])
                }
                Some(row) => {
                    session.current_step =
                        FlowStep::AttendanceEdit(AttendanceEditStep::ConfirmCancel);
                    svc.sessions.set(conversation_id, session).await;
                    Ok(vec![
                        replies::current_attendance(&row),
                        replies::ASK_CANCEL_ATTENDANCE.to_string(),
                    ])
                }
            }
        }
        AttendanceEditStep::ConfirmCancel => match parse_yes_no(input) {
            Some(true) => {
                let key = match attendance_key_from(&session, participant_id) {
                    Some(key) => key,
                    None => {
                        svc.sessions.clear(conversation_id).await;
                        return Ok(vec![replies::SESSION_RESET.to_string()]);
                    }
                };
                match with_retry(&svc.retry, || svc.attendance.delete_by_key(&key)).await {
                    Ok(()) => {
                        session.fields.clear();
                        session.current_step =
                            FlowStep::AttendanceEdit(AttendanceEditStep::Continue);
                        svc.sessions.set(conversation_id, session).await;
                        Ok(vec![
                            replies::ATTENDANCE_CANCELLED.to_string(),
                            replies::ASK_EDIT_ANOTHER_ATTENDANCE.to_string(),
                        ])
                    }
                    Err(RecordStoreError::AttendanceNotFound(_)) => {
                        svc.sessions.clear(conversation_id).await;
                        Ok(vec![replies::ATTENDANCE_NOT_FOUND.to_string()])
                    }
                    Err(err) => Err(err.into()),
                }
            }
            Some(false) => {
                session.current_step =
                    FlowStep::AttendanceEdit(AttendanceEditStep::AskEditRemarks);
                svc.sessions.set(conversation_id, session).await;
                Ok(vec![replies::ASK_EDIT_REMARKS.to_string()])
            }
            None => Ok(vec![replies::ANSWER_YES_NO.to_string()]),
        },
        AttendanceEditStep::AskEditRemarks => match parse_yes_no(input) {
            Some(true) => {
                session.current_step =
                    FlowStep::AttendanceEdit(AttendanceEditStep::AskNewRemarks);
                svc.sessions.set(conversation_id, session).await;
                Ok(vec![replies::ASK_NEW_REMARKS.to_string()])
            }
            Some(false) => {
                session.fields.clear();
                session.current_step = FlowStep::AttendanceEdit(AttendanceEditStep::Continue);
                svc.sessions.set(conversation_id, session).await;
                Ok(vec![replies::ASK_EDIT_ANOTHER_ATTENDANCE.to_string()])
            }
            None => Ok(vec![replies::ANSWER_YES_NO.to_string()]),
        },
        AttendanceEditStep::AskNewRemarks => {
            let key = match attendance_key_from(&session, participant_id) {
                Some(key) => key,
                None => {
                    svc.sessions.clear(conversation_id).await;
                    return Ok(vec![replies::SESSION_RESET.to_string()]);
                }
            };
            let found = with_retry(&svc.retry, || svc.attendance.find_by_key(&key)).await?;
            let mut row = match found {
                Some(row) => row,
                None => {
                    svc.sessions.clear(conversation_id).await;
                    return Ok(vec![replies::ATTENDANCE_NOT_FOUND.to_string()]);
                }
            };
            row.remarks = normalize_remarks(input);
            with_retry(&svc.retry, || svc.attendance.upsert_by_key(row.clone())).await?;

            session.fields.clear();
            session.current_step = FlowStep::AttendanceEdit(AttendanceEditStep::Continue);
            svc.sessions.set(conversation_id, session).await;
            Ok(vec![
                replies::REMARKS_UPDATED.to_string(),
                replies::ASK_EDIT_ANOTHER_ATTENDANCE.to_string(),
            ])
        }
        AttendanceEditStep::Continue => {
            if parse_yes_no(input) == Some(true) {
                start(svc, conversation_id).await
            } else {
                svc.sessions.clear(conversation_id).await;
                Ok(vec![replies::ATTENDANCE_EDIT_FINISHED.to_string()])
            }
        }
    }
}
