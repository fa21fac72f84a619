//! Task polling.
//!
//! Writes are acknowledged before they are applied. Waiting for the
//! acknowledged task to finish is a poll loop against `GET /tasks/{uid}`,
//! shared by the client and the index handles.

use tokio::time::{sleep, Instant};
use tracing::{debug, instrument};

use delphi_shared::Task;

use crate::config::WaitPolicy;
use crate::errors::Error;
use crate::transport::{request_json, HttpTransport, Method};

/// Fetch one task by uid.
pub(crate) async fn get_task(transport: &dyn HttpTransport, task_uid: u32) -> Result<Task, Error> {
    request_json(
        transport,
        Method::Get,
        &format!("tasks/{task_uid}"),
        &[],
        None,
    )
    .await
}

/// Poll a task until it reaches a terminal state.
///
/// Polls every `policy.interval` and gives up with `Error::TaskTimeout`
/// once `policy.timeout` elapses without the task finishing. The task is
/// always polled at least once, so a task that is already finished never
/// times out.
#[instrument(skip(transport, policy))]
pub(crate) async fn wait_for_task(
    transport: &dyn HttpTransport,
    policy: WaitPolicy,
    task_uid: u32,
) -> Result<Task, Error> {
    let deadline = Instant::now() + policy.timeout;
    loop {
        let task = get_task(transport, task_uid).await?;
        if task.is_finished() {
            debug!(task_uid, status = %task.status, "Task finished");
            return Ok(task);
        }
        if Instant::now() + policy.interval > deadline {
            return Err(Error::TaskTimeout { task_uid });
        }
        sleep(policy.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;
    use delphi_shared::TaskStatus;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn task_body(status: &str) -> Value {
        json!({
            "uid": 7,
            "indexUid": "movies",
            "status": status,
            "type": "documentAdditionOrUpdate",
            "enqueuedAt": "2026-08-20T09:29:45.175Z"
        })
    }

    fn policy() -> WaitPolicy {
        WaitPolicy::new(Duration::from_millis(50), Duration::from_secs(5))
    }

    #[tokio::test(start_paused = true)]
    async fn returns_once_the_task_finishes() {
        let transport = MockTransport::new();
        transport.queue(200, task_body("enqueued")).await;
        transport.queue(200, task_body("processing")).await;
        transport.queue(200, task_body("succeeded")).await;

        let task = wait_for_task(transport.as_ref(), policy(), 7).await.unwrap();

        assert_eq!(task.status, TaskStatus::Succeeded);
        assert_eq!(transport.requests().await.len(), 3);
        for request in transport.requests().await {
            assert_eq!(request.route, "tasks/7");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn finished_tasks_are_returned_immediately() {
        let transport = MockTransport::new();
        transport.queue(200, task_body("failed")).await;

        let task = wait_for_task(transport.as_ref(), policy(), 7).await.unwrap();

        assert_eq!(task.status, TaskStatus::Failed);
        assert_eq!(transport.requests().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_on_tasks_that_never_finish() {
        let transport = MockTransport::new();
        // A 100ms timeout at a 50ms interval allows at most three polls.
        for _ in 0..4 {
            transport.queue(200, task_body("enqueued")).await;
        }

        let policy = WaitPolicy::new(Duration::from_millis(50), Duration::from_millis(100));
        let result = wait_for_task(transport.as_ref(), policy, 7).await;

        assert!(matches!(result, Err(Error::TaskTimeout { task_uid: 7 })));
        assert!(transport.requests().await.len() <= 3);
    }

    #[tokio::test(start_paused = true)]
    async fn service_errors_abort_the_wait() {
        let transport = MockTransport::new();
        transport
            .queue(
                404,
                json!({
                    "message": "Task `7` not found.",
                    "code": "task_not_found",
                    "type": "invalid_request",
                    "link": "https://docs.delphi.dev/errors#task_not_found"
                }),
            )
            .await;

        let result = wait_for_task(transport.as_ref(), policy(), 7).await;
        assert_eq!(result.unwrap_err().code(), Some("task_not_found"));
    }
}
