//! Example: scrub an edit-distance trace and print the DP table.
//!
//! Run with:
//! `cargo run --example edit_script -- kitten sitting`

use stepviz::{
    AlgorithmId, Catalog, Checkpointing, ControllerBuilder, EditOp, Frame, Limits, Outcome,
    RawInput,
};

fn main() {
    let mut args = std::env::args().skip(1);
    let raw = RawInput {
        text: args.next().unwrap_or_else(|| "kitten".to_string()),
        pattern: args.next().unwrap_or_else(|| "sitting".to_string()),
        ..RawInput::default()
    };
    let problem = match AlgorithmId::EditDistance.prepare(&raw, &Limits::default()) {
        Ok(problem) => problem,
        Err(err) => {
            eprintln!("edit_script: {err}");
            std::process::exit(2);
        }
    };

    let mut player = ControllerBuilder::new(Catalog)
        .with_checkpoints(Checkpointing::Auto)
        .build();
    player.generate(problem);
    let total = player.total_steps();

    // halfway through the fill, then the finished table
    for index in [total / 2, total] {
        player.seek(index);
        println!("after {index}/{total} steps:");
        if let Some(frame) = player.render_state() {
            print_table(frame);
        }
        println!();
    }

    if let Some(Outcome::EditDistance { distance, script }) = player.result() {
        println!("distance {distance}");
        for op in script {
            match op {
                EditOp::Insert(c) => println!("  insert '{c}'"),
                EditOp::Delete(c) => println!("  delete '{c}'"),
                EditOp::Substitute { from, to } => println!("  substitute '{from}' -> '{to}'"),
            }
        }
    }
}

fn print_table(frame: &Frame) {
    let table = &frame.table;
    print!("      ");
    for c in &frame.pattern {
        print!("{c:>3}");
    }
    println!();
    for row in 0..table.rows() {
        let label = row
            .checked_sub(1)
            .and_then(|i| frame.text.get(i))
            .copied()
            .unwrap_or(' ');
        print!("{label:>3}");
        for col in 0..table.cols() {
            let on_path = frame.path.contains(&(row, col));
            match table.get(row, col) {
                Some(v) if on_path => print!("{:>3}", format!("*{v}")),
                Some(v) => print!("{v:>3}"),
                None => print!("  ."),
            }
        }
        println!();
    }
}
