//! Schedule deletion flow
//!
//! Identifies a schedule by its natural key, shows the matched record for
//! confirmation and removes it. Attendance rows referencing the deleted
//! schedule are left in place.

use bot_core::schema::{FieldId, FieldKind};
use bot_core::validate::validate_field;
use bot_state::session::Session;
use bot_state::step::{FlowStep, ScheduleDeletionStep};
use record_store::{with_retry, RecordStoreError};

use crate::error::FlowError;
use crate::flows::{parse_yes_no, schedule_key_from, FlowServices};
use crate::replies;

pub async fn start(svc: &FlowServices, conversation_id: &str) -> Result<Vec<String>, FlowError> {
    let session = Session::start(FlowStep::ScheduleDeletion(ScheduleDeletionStep::AskDate));
    svc.sessions.set(conversation_id, session).await;
    Ok(vec![
        replies::DELETION_STARTED.to_string(),
        FieldId::Date.descriptor().prompt.to_string(),
    ])
}

pub async fn handle(
    svc: &FlowServices,
    conversation_id: &str,
    mut session: Session,
    step: ScheduleDeletionStep,
    input: &str,
) -> Result<Vec<String>, FlowError> {
    match step {
        ScheduleDeletionStep::AskDate => {
            let value = match validate_field(FieldKind::Date, input) {
                Ok(value) => value,
                Err(err) => return Ok(vec![err.to_string()]),
            };
            session.put_field(FieldId::Date, value);
            session.current_step = FlowStep::ScheduleDeletion(ScheduleDeletionStep::AskTitle);
            svc.sessions.set(conversation_id, session).await;
            Ok(vec![FieldId::Title.descriptor().prompt.to_string()])
        }
        ScheduleDeletionStep::AskTitle => {
            let value = match validate_field(FieldKind::RequiredText, input) {
                Ok(value) => value,
                Err(err) => return Ok(vec![err.to_string()]),
            };
            session.put_field(FieldId::Title, value);
            let key = match schedule_key_from(&session) {
                Some(key) => key,
                None => {
                    svc.sessions.clear(conversation_id).await;
                    return Ok(vec![replies::SESSION_RESET.to_string()]);
                }
            };
            let found = with_retry(&svc.retry, || svc.schedules.find_by_key(&key)).await?;
            match found {
                None => {
                    svc.sessions.clear(conversation_id).await;
                    Ok(vec![replies::SCHEDULE_NOT_FOUND.to_string()])
                }
                Some(record) => {
                    session.current_step =
                        FlowStep::ScheduleDeletion(ScheduleDeletionStep::Confirm);
                    svc.sessions.set(conversation_id, session).await;
                    Ok(vec![replies::confirm_deletion(&record)])
                }
            }
        }
        ScheduleDeletionStep::Confirm => match parse_yes_no(input) {
            Some(true) => {
                let key = match schedule_key_from(&session) {
                    Some(key) => key,
                    None => {
                        svc.sessions.clear(conversation_id).await;
                        return Ok(vec![replies::SESSION_RESET.to_string()]);
                    }
                };
                match with_retry(&svc.retry, || svc.schedules.delete_by_key(&key)).await {
                    Ok(()) => {
                        session.fields.clear();
                        session.current_step =
                            FlowStep::ScheduleDeletion(ScheduleDeletionStep::Continue);
                        svc.sessions.set(conversation_id, session).await;
                        Ok(vec![
                            replies::SCHEDULE_DELETED.to_string(),
                            replies::ASK_DELETE_ANOTHER.to_string(),
                        ])
                    }
                    Err(RecordStoreError::ScheduleNotFound(_)) => {
                        svc.sessions.clear(conversation_id).await;
                        Ok(vec![replies::SCHEDULE_NOT_FOUND.to_string()])
                    }
                    Err(err) => Err(err.into()),
                }
            }
            Some(false) => {
                svc.sessions.clear(conversation_id).await;
                Ok(vec![replies::DELETION_DISCARDED.to_string()])
            }
            None => Ok(vec![replies::ANSWER_YES_NO.to_string()]),
        },
        ScheduleDeletionStep::Continue => {
            if parse_yes_no(input) == Some(true) {
                start(svc, conversation_id).await
            } else {
                svc.sessions.clear(conversation_id).await;
                Ok(vec![replies::DELETION_FINISHED.to_string()])
            }
        }
    }
}
