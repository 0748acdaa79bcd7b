//! Schedule registration flow
//!
//! Collects one value per schema field in order, shows a confirmation
//! summary, inserts the record and offers to register another. Invalid field
//! input re-prompts without advancing; a duplicate natural key ends the flow
//! with nothing written.

use bot_core::record::ScheduleRecord;
use bot_core::schema::FieldId;
use bot_core::validate::validate_field;
use bot_state::session::Session;
use bot_state::step::{FlowStep, ScheduleRegistrationStep};
use record_store::{with_retry, RecordStoreError};

use crate::error::FlowError;
use crate::flows::{parse_yes_no, FlowServices};
use crate::replies;

pub async fn start(svc: &FlowServices, conversation_id: &str) -> Result<Vec<String>, FlowError> {
    let session = Session::start(FlowStep::ScheduleRegistration(
        ScheduleRegistrationStep::first(),
    ));
    svc.sessions.set(conversation_id, session).await;
    Ok(vec![
        replies::REGISTRATION_STARTED.to_string(),
        FieldId::Date.descriptor().prompt.to_string(),
    ])
}

pub async fn handle(
    svc: &FlowServices,
    conversation_id: &str,
    mut session: Session,
    step: ScheduleRegistrationStep,
    input: &str,
) -> Result<Vec<String>, FlowError> {
    // Field-collecting steps share one path driven by the schema.
    if let Some(field) = step.field() {
        let value = match validate_field(field.descriptor().kind, input) {
            Ok(value) => value,
            Err(err) => return Ok(vec![err.to_string()]),
        };
        session.put_field(field, value);
        let next = step.next();
        session.current_step = FlowStep::ScheduleRegistration(next);

        let reply = if let Some(next_field) = next.field() {
            next_field.descriptor().prompt.to_string()
        } else {
            // All fields collected; show the summary for confirmation.
            match ScheduleRecord::from_fields(&session.fields) {
                Ok(record) => replies::confirm_registration(&record),
                Err(_) => {
                    svc.sessions.clear(conversation_id).await;
                    return Ok(vec![replies::SESSION_RESET.to_string()]);
                }
            }
        };
        svc.sessions.set(conversation_id, session).await;
        return Ok(vec![reply]);
    }

    match step {
        ScheduleRegistrationStep::Confirm => match parse_yes_no(input) {
            Some(true) => {
                let record = match ScheduleRecord::from_fields(&session.fields) {
                    Ok(record) => record,
                    Err(_) => {
                        svc.sessions.clear(conversation_id).await;
                        return Ok(vec![replies::SESSION_RESET.to_string()]);
                    }
                };
                match with_retry(&svc.retry, || svc.schedules.insert(record.clone())).await {
                    Ok(()) => {
                        session.fields.clear();
                        session.current_step =
                            FlowStep::ScheduleRegistration(ScheduleRegistrationStep::Continue);
                        svc.sessions.set(conversation_id, session).await;
                        Ok(vec![
                            replies::SCHEDULE_REGISTERED.to_string(),
                            replies::ASK_REGISTER_ANOTHER.to_string(),
                        ])
                    }
                    Err(RecordStoreError::Duplicate(key)) => {
                        svc.sessions.clear(conversation_id).await;
                        Ok(vec![replies::duplicate_schedule(&key)])
                    }
                    Err(err) => Err(err.into()),
                }
            }
            Some(false) => {
                svc.sessions.clear(conversation_id).await;
                Ok(vec![replies::REGISTRATION_DISCARDED.to_string()])
            }
            None => Ok(vec![replies::ANSWER_YES_NO.to_string()]),
        },
        ScheduleRegistrationStep::Continue => {
            if parse_yes_no(input) == Some(true) {
                start(svc, conversation_id).await
            } else {
                svc.sessions.clear(conversation_id).await;
                Ok(vec![replies::REGISTRATION_FINISHED.to_string()])
            }
        }
        // Field steps returned above.
        _ => {
            svc.sessions.clear(conversation_id).await;
            Ok(vec![replies::SESSION_RESET.to_string()])
        }
    }
}
