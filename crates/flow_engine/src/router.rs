//! Command router
//!
//! One inbound message goes in, the ordered reply messages come out.
//! Precedence: universal keywords first, then the active flow step, then the
//! Idle command table, then help. Step dispatch is an exhaustive match over
//! the `FlowStep` union, so an unknown step cannot occur. Store failures that
//! survive the retry policy become one failure reply and a session reset;
//! the router itself never panics on user input.

use std::sync::Arc;

use bot_state::step::FlowStep;
use bot_state::store::SessionStore;
use record_store::{AttendanceStore, RetryPolicy, ScheduleStore};

use crate::error::FlowError;
use crate::flows::{self, FlowServices};
use crate::queries;
use crate::replies;

const KEYWORD_CANCEL: &str = "cancel";
const KEYWORD_END_SESSION: &str = "end session";

const CMD_REGISTER_SCHEDULE: &str = "register schedule";
const CMD_LIST_SCHEDULES: &str = "list schedules";
const CMD_EDIT_SCHEDULE: &str = "edit schedule";
const CMD_DELETE_SCHEDULE: &str = "delete schedule";
const CMD_REGISTER_ATTENDANCE: &str = "register attendance";
const CMD_LIST_MY_ATTENDANCE: &str = "list my attendance";
const CMD_EDIT_ATTENDANCE: &str = "edit attendance";
const CMD_LIST_PARTICIPANTS: &str = "list participants";

/// One inbound chat message with its conversation and sender identity.
#[derive(Debug, Clone, Copy)]
pub struct InboundMessage<'a> {
    pub conversation_id: &'a str,
    pub user_id: &'a str,
    pub display_name: &'a str,
    pub text: &'a str,
}

pub struct Router {
    services: FlowServices,
}

impl Router {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        schedules: Arc<dyn ScheduleStore>,
        attendance: Arc<dyn AttendanceStore>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            services: FlowServices {
                sessions,
                schedules,
                attendance,
                retry,
            },
        }
    }

    /// Handle one message and return the replies to deliver, in order.
    pub async fn route(&self, msg: &InboundMessage<'_>) -> Vec<String> {
        let text = msg.text.trim();
        match self.dispatch(msg, text).await {
            Ok(replies) => replies,
            Err(err) => {
                tracing::error!(
                    conversation_id = msg.conversation_id,
                    error = %err,
                    "flow failed, resetting session"
                );
                self.services.sessions.clear(msg.conversation_id).await;
                vec![replies::STORE_FAILURE.to_string()]
            }
        }
    }

    async fn dispatch(
        &self,
        msg: &InboundMessage<'_>,
        text: &str,
    ) -> Result<Vec<String>, FlowError> {
        let svc = &self.services;

        // Universal keywords clear the session from any state, including Idle.
        if text == KEYWORD_CANCEL {
            svc.sessions.clear(msg.conversation_id).await;
            return Ok(vec![replies::CANCEL_ACK.to_string()]);
        }
        if text == KEYWORD_END_SESSION {
            svc.sessions.clear(msg.conversation_id).await;
            return Ok(vec![replies::END_ACK.to_string()]);
        }

        let session = svc.sessions.get(msg.conversation_id).await;
        tracing::debug!(
            conversation_id = msg.conversation_id,
            flow = ?session.current_step.flow_kind(),
            "dispatching message"
        );
        match session.current_step {
            FlowStep::Idle => self.handle_command(msg, text).await,
            FlowStep::ScheduleRegistration(step) => {
                flows::schedule_registration::handle(svc, msg.conversation_id, session, step, text)
                    .await
            }
            FlowStep::ScheduleEdit(step) => {
                flows::schedule_edit::handle(svc, msg.conversation_id, session, step, text).await
            }
            FlowStep::ScheduleDeletion(step) => {
                flows::schedule_deletion::handle(svc, msg.conversation_id, session, step, text)
                    .await
            }
            FlowStep::AttendanceRegistration(step) => {
                flows::attendance_registration::handle(
                    svc,
                    msg.conversation_id,
                    msg.user_id,
                    msg.display_name,
                    session,
                    step,
                    text,
                )
                .await
            }
            FlowStep::AttendanceEdit(step) => {
                flows::attendance_edit::handle(
                    svc,
                    msg.conversation_id,
                    msg.user_id,
                    session,
                    step,
                    text,
                )
                .await
            }
        }
    }

    /// The Idle command table. Exact match, case sensitive.
    async fn handle_command(
        &self,
        msg: &InboundMessage<'_>,
        text: &str,
    ) -> Result<Vec<String>, FlowError> {
        let svc = &self.services;
        match text {
            CMD_REGISTER_SCHEDULE => {
                flows::schedule_registration::start(svc, msg.conversation_id).await
            }
            CMD_LIST_SCHEDULES => queries::list_schedules(svc).await,
            CMD_EDIT_SCHEDULE => flows::schedule_edit::start(svc, msg.conversation_id).await,
            CMD_DELETE_SCHEDULE => {
                flows::schedule_deletion::start(svc, msg.conversation_id).await
            }
            CMD_REGISTER_ATTENDANCE => {
                flows::attendance_registration::start(svc, msg.conversation_id, msg.user_id).await
            }
            CMD_LIST_MY_ATTENDANCE => queries::list_my_attendance(svc, msg.user_id).await,
            CMD_EDIT_ATTENDANCE => flows::attendance_edit::start(svc, msg.conversation_id).await,
            CMD_LIST_PARTICIPANTS => queries::list_participants(svc).await,
            _ => Ok(vec![replies::help()]),
        }
    }
}
