mod fixtures;
pub use fixtures::*;

use snapdetect::models::PipelineState;
use tokio::sync::watch;

/// Drains state changes until the pipeline reaches Ok or Error.
pub async fn wait_for_settled(rx: &mut watch::Receiver<PipelineState>) -> PipelineState {
    loop {
        rx.changed().await.expect("state channel closed");
        let state = rx.borrow_and_update().clone();
        if state.is_settled() {
            return state;
        }
    }
}
