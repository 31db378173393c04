//! Example: real-time playback of a sorting trace.
//!
//! Run with:
//! `cargo run --example sort_playback -- quick-sort "5, 3, 8, 1, 9, 2"`
//!
//! The controller is shared with a `RealtimeDriver` thread that feeds it
//! wall-clock time; the main thread polls and prints each new step.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use stepviz::{
    AlgorithmId, Catalog, ControllerBuilder, Limits, RawInput, RealtimeDriver, Status,
};

fn main() {
    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "quick-sort".to_string());
    let values = args
        .next()
        .unwrap_or_else(|| "38, 27, 43, 3, 9, 82, 10".to_string());

    let id: AlgorithmId = match name.parse() {
        Ok(id) => id,
        Err(err) => {
            eprintln!("sort_playback: {err}");
            std::process::exit(2);
        }
    };
    let raw = RawInput {
        values,
        ..RawInput::default()
    };
    let problem = match id.prepare(&raw, &Limits::default()) {
        Ok(problem) => problem,
        Err(err) => {
            eprintln!("sort_playback: {err}");
            std::process::exit(2);
        }
    };

    let mut player = ControllerBuilder::new(Catalog).with_speed_ms(40).build();
    player.generate(problem);
    println!("{id}: {} steps", player.total_steps());
    player.play();

    let player = Arc::new(Mutex::new(player));
    let driver = RealtimeDriver::spawn(Arc::clone(&player), Duration::from_millis(5));

    let mut shown = 0;
    loop {
        thread::sleep(Duration::from_millis(10));
        let Ok(guard) = player.lock() else { break };
        let trace = match guard.trace() {
            Some(trace) => trace,
            None => break,
        };
        while shown < guard.current_index() {
            if let Some(step) = trace.get(shown) {
                println!("{:>4}  {}", shown + 1, step.description);
            }
            shown += 1;
        }
        if guard.status() == Status::Completed {
            if let Some(frame) = guard.render_state() {
                println!("final: {:?}", frame.values);
            }
            if let Some(result) = guard.result() {
                println!("{result}");
            }
            break;
        }
    }
    driver.stop();
}
