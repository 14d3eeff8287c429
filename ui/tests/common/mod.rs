use std::time::Duration;

use egui_kittest::Harness;
use erpdesk_business::Session;
use erpdesk_ui::TaskRunner;
use wiremock::MockServer;

/// How long a test waits for the mock server before stepping again.
#[allow(unused)]
pub const DEFAULT_NETWORK_WAIT_MS: u64 = 100;

pub struct TestCtx<'a, T> {
    mock_server: MockServer,
    harness: Harness<'a, T>,
}

impl<'a, T> TestCtx<'a, T> {
    pub fn harness_mut(&mut self) -> &mut Harness<'a, T> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, T> {
        &self.harness
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }
}

impl<'a, T: 'a> TestCtx<'a, T> {
    /// Build the page under test from a session pointing at `mock_server`.
    pub fn new(
        mock_server: MockServer,
        build: impl FnOnce(Session, TaskRunner) -> T,
        app: impl FnMut(&mut egui::Ui, &mut T) + 'a,
    ) -> Self {
        let session = Session::new(format!("{}/api", mock_server.uri()));
        let tasks = TaskRunner::new().expect("task runner");
        let state = build(session, tasks);
        let harness = Harness::new_ui_state(app, state);

        Self {
            mock_server,
            harness,
        }
    }
}

pub async fn start_mock_server() -> MockServer {
    let _ = env_logger::builder().is_test(true).try_init();
    MockServer::start().await
}

/// Step the harness, give the background task time to hit the mock server,
/// then step again so the page drains its channel.
#[allow(unused)]
pub async fn step_with_network<T>(harness: &mut Harness<'_, T>) {
    for _ in 0..3 {
        harness.step();
    }
    tokio::time::sleep(Duration::from_millis(DEFAULT_NETWORK_WAIT_MS)).await;
    for _ in 0..3 {
        harness.step();
    }
}
