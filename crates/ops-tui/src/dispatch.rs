// Background API calls. Each call runs on its own task and reports back to the
// render loop through an unbounded channel; app state is only touched there.

use ops_core::models::{CheckIn, CheckInRequest, Habit, InterviewEntry, NewInterviewEntry, TodaySummary};
use ops_core::ApiClient;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug)]
pub enum ApiEvent {
    TodayLoaded {
        habits: Vec<Habit>,
        check_ins: Vec<CheckIn>,
        summary: TodaySummary,
    },
    TodayFailed(String),
    HabitCreated(String),
    InterviewLoaded(Vec<InterviewEntry>),
    InterviewSaved,
    InterviewFailed(String),
    HealthLoaded {
        ready: Value,
        /// `None` when the liveness probe itself failed
        live: Option<Value>,
        webhooks: Vec<Value>,
    },
    HealthFailed(String),
}

#[derive(Clone)]
pub struct ApiDispatcher {
    client: ApiClient,
    tx: UnboundedSender<ApiEvent>,
}

impl ApiDispatcher {
    pub fn new(client: ApiClient, tx: UnboundedSender<ApiEvent>) -> Self {
        Self { client, tx }
    }

    fn spawn<F, Fut>(&self, job: F)
    where
        F: FnOnce(ApiClient, UnboundedSender<ApiEvent>) -> Fut,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(job(self.client.clone(), self.tx.clone()));
    }

    // today

    pub fn refresh_today(&self, date: String) {
        self.spawn(|client, tx| async move {
            let _ = tx.send(load_today(&client, &date).await);
        });
    }

    pub fn upsert_check_in(&self, request: CheckInRequest) {
        self.spawn(|client, tx| async move {
            let event = match client.upsert_check_in(&request).await {
                Ok(_) => load_today(&client, &request.date).await,
                Err(e) => ApiEvent::TodayFailed(e.to_string()),
            };
            let _ = tx.send(event);
        });
    }

    pub fn set_habit_active(&self, habit_id: String, active: bool, date: String) {
        self.spawn(|client, tx| async move {
            let event = match client.set_habit_active(&habit_id, active).await {
                Ok(_) => load_today(&client, &date).await,
                Err(e) => ApiEvent::TodayFailed(e.to_string()),
            };
            let _ = tx.send(event);
        });
    }

    pub fn create_habit(&self, name: String, date: String) {
        self.spawn(|client, tx| async move {
            match client.create_habit(&name).await {
                Ok(_) => {
                    let _ = tx.send(ApiEvent::HabitCreated(name));
                    let _ = tx.send(load_today(&client, &date).await);
                }
                Err(e) => {
                    let _ = tx.send(ApiEvent::TodayFailed(e.to_string()));
                }
            }
        });
    }

    // interview

    pub fn refresh_interview(&self, topic: String) {
        self.spawn(|client, tx| async move {
            let _ = tx.send(load_interview(&client, &topic).await);
        });
    }

    /// Save, then reload the list with the active filter
    pub fn save_interview(&self, entry: NewInterviewEntry, filter: String) {
        self.spawn(|client, tx| async move {
            match client.add_interview(&entry).await {
                Ok(_) => {
                    let _ = tx.send(ApiEvent::InterviewSaved);
                    let _ = tx.send(load_interview(&client, &filter).await);
                }
                Err(e) => {
                    let _ = tx.send(ApiEvent::InterviewFailed(e.to_string()));
                }
            }
        });
    }

    // health

    pub fn refresh_health(&self) {
        self.spawn(|client, tx| async move {
            let (ready, live, webhooks) = tokio::join!(
                client.ready(),
                client.live(),
                client.recent_webhook_events()
            );
            let event = match ready {
                Ok(ready) => ApiEvent::HealthLoaded {
                    ready,
                    live: live.ok(),
                    webhooks,
                },
                Err(e) => ApiEvent::HealthFailed(e.to_string()),
            };
            let _ = tx.send(event);
        });
    }
}

/// Habits, today's check-ins and the summary, all or nothing
async fn load_today(client: &ApiClient, date: &str) -> ApiEvent {
    let result = tokio::try_join!(
        client.list_habits(),
        client.list_check_ins(date),
        client.summary_today()
    );
    match result {
        Ok((habits, check_ins, summary)) => ApiEvent::TodayLoaded {
            habits,
            check_ins,
            summary,
        },
        Err(e) => ApiEvent::TodayFailed(e.to_string()),
    }
}

async fn load_interview(client: &ApiClient, topic: &str) -> ApiEvent {
    match client.list_interview(topic).await {
        Ok(entries) => ApiEvent::InterviewLoaded(entries),
        Err(e) => ApiEvent::InterviewFailed(e.to_string()),
    }
}
