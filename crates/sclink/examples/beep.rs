//! Send a short command sequence to a running synthesis server.
//!
//! Point it at the server's UDP port:
//!
//! ```text
//! cargo run --example beep -- 127.0.0.1:57110
//! ```

use std::thread;
use std::time::Duration;

use sclink::{OscArg, Server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:57110".to_string());

    let mut server = Server::new(&addr)?;
    server.connect()?;
    server.dump_osc(true)?;

    let id = server.new_synth(
        "default",
        &[
            OscArg::from("freq"),
            OscArg::from(440.0f32),
            OscArg::from("amp"),
            OscArg::from(0.2f32),
        ],
    )?;
    println!("playing node {id}");
    thread::sleep(Duration::from_secs(1));

    server.set_node_controls(id, &[OscArg::from("freq"), OscArg::from(660.0f32)])?;
    thread::sleep(Duration::from_secs(1));

    server.free_node(id)?;
    server.dump_osc(false)?;
    server.disconnect()?;
    Ok(())
}
