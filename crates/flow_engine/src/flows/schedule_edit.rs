//! Schedule edit flow
//!
//! Identifies a schedule by its natural key, asks which field to change and
//! applies the new value through `update_by_key`. The key fields themselves
//! are not editable; changing them is a deletion plus a fresh registration.

use std::collections::BTreeMap;

use bot_core::schema::{editable_field_by_label, FieldId, FieldKind};
use bot_core::validate::validate_field;
use bot_state::session::Session;
use bot_state::step::{FlowStep, ScheduleEditStep};
use record_store::{with_retry, RecordStoreError};

use crate::error::FlowError;
use crate::flows::{parse_yes_no, schedule_key_from, FlowServices};
use crate::replies;

pub async fn start(svc: &FlowServices, conversation_id: &str) -> Result<Vec<String>, FlowError> {
    let session = Session::start(FlowStep::ScheduleEdit(ScheduleEditStep::AskDate));
    svc.sessions.set(conversation_id, session).await;
    Ok(vec![
        replies::EDIT_STARTED.to_string(),
        FieldId::Date.descriptor().prompt.to_string(),
    ])
}

pub async fn handle(
    svc: &FlowServices,
    conversation_id: &str,
    mut session: Session,
    step: ScheduleEditStep,
    input: &str,
) -> Result<Vec<String>, FlowError> {
    match step {
        ScheduleEditStep::AskDate => {
            let value = match validate_field(FieldKind::Date, input) {
                Ok(value) => value,
                Err(err) => return Ok(vec![err.to_string()]),
            };
            session.put_field(FieldId::Date, value);
            session.current_step = FlowStep::ScheduleEdit(ScheduleEditStep::AskTitle);
            svc.sessions.set(conversation_id, session).await;
            Ok(vec![FieldId::Title.descriptor().prompt.to_string()])
        }
        ScheduleEditStep::AskTitle => {
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
                    session.current_step = FlowStep::ScheduleEdit(ScheduleEditStep::AskField);
                    svc.sessions.set(conversation_id, session).await;
                    Ok(vec![
                        replies::current_values(&record),
                        replies::ask_edit_field(),
                    ])
                }
            }
        }
        ScheduleEditStep::AskField => match editable_field_by_label(input) {
            None => Ok(vec![replies::unknown_edit_field()]),
            Some(field) => {
                session.current_step = FlowStep::ScheduleEdit(ScheduleEditStep::AskValue(field));
                svc.sessions.set(conversation_id, session).await;
                Ok(vec![field.descriptor().prompt.to_string()])
            }
        },
        ScheduleEditStep::AskValue(field) => {
            let value = match validate_field(field.descriptor().kind, input) {
                Ok(value) => value,
                Err(err) => return Ok(vec![err.to_string()]),
            };
            let key = match schedule_key_from(&session) {
                Some(key) => key,
                None => {
                    svc.sessions.clear(conversation_id).await;
                    return Ok(vec![replies::SESSION_RESET.to_string()]);
                }
            };
            let patch = BTreeMap::from([(field, value)]);
            match with_retry(&svc.retry, || {
                svc.schedules.update_by_key(&key, patch.clone())
            })
            .await
            {
                Ok(()) => {
                    session.fields.clear();
                    session.current_step = FlowStep::ScheduleEdit(ScheduleEditStep::Continue);
                    svc.sessions.set(conversation_id, session).await;
                    Ok(vec![
                        replies::field_updated(field),
                        replies::ASK_EDIT_ANOTHER.to_string(),
                    ])
                }
                Err(RecordStoreError::ScheduleNotFound(_)) => {
                    svc.sessions.clear(conversation_id).await;
                    Ok(vec![replies::SCHEDULE_NOT_FOUND.to_string()])
                }
                Err(err) => Err(err.into()),
            }
        }
        ScheduleEditStep::Continue => {
            if parse_yes_no(input) == Some(true) {
                start(svc, conversation_id).await
            } else {
                svc.sessions.clear(conversation_id).await;
                Ok(vec![replies::EDIT_FINISHED.to_string()])
            }
        }
    }
}
