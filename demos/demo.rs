//! Minimal treecast walkthrough: one tree, both propagation directions.
//!
//! Run with: `cargo run --example demo`

use treecast::{Channel, ListenerError, ListenerFn, ListenerRef};

fn printer(tag: &'static str) -> ListenerRef<String> {
    ListenerFn::arc(tag, move |msg: String| async move {
        println!("[{tag}] {msg}");
        Ok::<_, ListenerError>(())
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let root: Channel<String> = Channel::root();

    // Dotted registration materializes the channel path.
    root.on("sensors.kitchen.reading", printer("kitchen")).await;
    root.on("sensors.hall.reading", printer("hall")).await;
    root.on("reading", printer("root")).await;

    // Upward: fires on sensors.kitchen, then bubbles to sensors and root.
    println!("-- emit sensors.kitchen.reading --");
    root.emit("sensors.kitchen.reading", &"21.5C".to_string())
        .await;

    // Downward: fires on sensors, then cascades into every room.
    println!("-- broadcast sensors.reading --");
    root.broadcast("sensors.reading", &"poll".to_string()).await;

    // Unresolved paths fail soft.
    let delivered = root.emit("garage.reading", &"?".to_string()).await;
    println!("-- emit garage.reading: delivered={delivered} --");
}
