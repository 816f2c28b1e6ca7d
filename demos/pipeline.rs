//! A custom `Listener` implementation plus root-relative addressing:
//! stage workers report into their own channel, a tree-wide auditor
//! subscribes from deep in the tree via the `^` marker.
//!
//! Run with: `cargo run --example pipeline`

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use treecast::{Channel, Listener, ListenerError};

/// Collects every report it sees, newest last.
struct Auditor {
    seen: Mutex<Vec<String>>,
}

#[async_trait]
impl Listener<String> for Auditor {
    async fn on_event(&self, payload: &String) -> Result<(), ListenerError> {
        self.seen.lock().await.push(payload.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "auditor"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let root: Channel<String> = Channel::root();
    let auditor = Arc::new(Auditor {
        seen: Mutex::new(Vec::new()),
    });

    // Stage channels under pipeline.*
    root.add_channel("pipeline").await;
    let pipeline = root.channel("pipeline").await.expect("pipeline exists");
    pipeline.add_channel("build").await;
    pipeline.add_channel("test").await;

    // From a stage channel, ^audit.report addresses root.audit - no need
    // to hold a handle to the root.
    let build = pipeline.channel("build").await.expect("build exists");
    build.on("^audit.report", auditor.clone()).await;

    // Each stage emits upward; the report bubbles through pipeline to the
    // root, but audit is a sibling subtree, so it only hears what is sent
    // to it explicitly.
    build.emit("report", &"build ok".to_string()).await;
    root.emit("audit.report", &"nightly summary".to_string())
        .await;

    for line in auditor.seen.lock().await.iter() {
        println!("audited: {line}");
    }
}
