use stepviz::{Catalog, ControllerBuilder, PlaybackController, Problem, SortAlgorithm, Status};

fn loaded(values: Vec<i64>) -> PlaybackController<Catalog> {
    let mut player = ControllerBuilder::new(Catalog).with_speed_ms(100).build();
    player.generate(Problem::Sort {
        algorithm: SortAlgorithm::Selection,
        values,
    });
    player
}

#[test]
fn play_pause_play_advances_exactly_once_per_interval() {
    let mut player = loaded(vec![4, 3, 2, 1]);
    assert!(player.play());
    assert!(player.pause());
    assert!(player.play());
    assert_eq!(player.live_timers(), 1);
    let before = player.current_index();
    assert_eq!(player.advance(100), 1);
    assert_eq!(player.current_index(), before + 1);
}

#[test]
fn repeated_play_does_not_add_a_timer() {
    let mut player = loaded(vec![4, 3, 2, 1]);
    assert!(player.play());
    assert!(!player.play());
    assert!(!player.play());
    assert_eq!(player.live_timers(), 1);
    player.advance(100);
    assert_eq!(player.current_index(), 1);
}

#[test]
fn ticks_taken_before_pause_are_inert() {
    let mut player = loaded(vec![4, 3, 2, 1]);
    player.play();
    let stale = player.scheduler().peek().expect("armed while playing");
    player.pause();
    player.play();
    assert!(!player.on_tick(stale));
    assert_eq!(player.current_index(), 0);
    let live = player.scheduler().peek().expect("armed while playing");
    assert!(player.on_tick(live));
    assert_eq!(player.current_index(), 1);
}

#[test]
fn pause_is_idempotent_and_cancels_synchronously() {
    let mut player = loaded(vec![2, 1]);
    player.play();
    assert!(player.pause());
    assert!(!player.pause());
    assert_eq!(player.status(), Status::Paused);
    assert_eq!(player.live_timers(), 0);
    assert_eq!(player.advance(10_000), 0);
    assert_eq!(player.current_index(), 0);
}

#[test]
fn stepping_while_playing_pauses_first() {
    let mut player = loaded(vec![3, 1, 2]);
    player.play();
    assert!(player.step_forward());
    assert_eq!(player.status(), Status::Paused);
    assert_eq!(player.live_timers(), 0);
    assert_eq!(player.current_index(), 1);

    player.play();
    assert!(player.step_backward());
    assert_eq!(player.status(), Status::Paused);
    assert_eq!(player.current_index(), 0);
}

#[test]
fn backward_at_zero_and_forward_at_end_are_no_ops() {
    let mut player = loaded(vec![2, 1]);
    player.step_forward();
    assert!(player.step_backward());
    assert!(!player.step_backward());
    assert_eq!(player.current_index(), 0);

    assert!(player.seek(usize::MAX));
    assert_eq!(player.status(), Status::Completed);
    assert!(!player.step_forward());
    assert!(!player.play());
    assert_eq!(player.current_index(), player.total_steps());
}

#[test]
fn step_backward_from_completed_resumes_as_paused() {
    let mut player = loaded(vec![3, 2, 1]);
    player.seek(usize::MAX);
    let last = player.total_steps();
    assert!(player.step_backward());
    assert_eq!(player.status(), Status::Paused);
    assert_eq!(player.current_index(), last - 1);
    assert!(player.play());
    player.advance(100);
    assert_eq!(player.status(), Status::Completed);
    assert_eq!(player.live_timers(), 0);
}

#[test]
fn seek_clamps_and_sets_status() {
    let mut player = loaded(vec![5, 4, 3]);
    let len = player.total_steps();
    assert!(player.seek(2));
    assert_eq!((player.current_index(), player.status()), (2, Status::Paused));
    assert!(player.seek(len + 50));
    assert_eq!((player.current_index(), player.status()), (len, Status::Completed));
    assert!(player.seek(0));
    assert_eq!((player.current_index(), player.status()), (0, Status::Paused));
}

#[test]
fn reset_returns_to_seeded_and_is_repeatable() {
    let mut player = loaded(vec![3, 1, 2]);
    let seed = player.render_state().cloned();
    player.play();
    player.advance(300);
    assert!(player.reset());
    assert!(player.reset());
    assert_eq!(player.status(), Status::Seeded);
    assert_eq!(player.current_index(), 0);
    assert_eq!(player.live_timers(), 0);
    assert_eq!(player.render_state().cloned(), seed);
}

#[test]
fn reset_with_new_input_replaces_the_trace() {
    let mut player = loaded(vec![3, 1, 2]);
    player.play();
    player.advance(100);
    player.reset_with(Problem::Sort {
        algorithm: SortAlgorithm::Heap,
        values: vec![9, 8],
    });
    assert_eq!(player.status(), Status::Seeded);
    assert_eq!(player.live_timers(), 0);
    assert_eq!(player.render_state().map(|f| f.values.clone()), Some(vec![9, 8]));
}

#[test]
fn generate_while_playing_cancels_the_old_timer() {
    let mut player = loaded(vec![3, 1, 2]);
    player.play();
    let stale = player.scheduler().peek().expect("armed");
    player.generate(Problem::Sort {
        algorithm: SortAlgorithm::Bubble,
        values: vec![2, 1],
    });
    assert_eq!(player.live_timers(), 0);
    assert!(!player.on_tick(stale));
    assert_eq!(player.current_index(), 0);
}

#[test]
fn speed_change_applies_after_the_scheduled_tick() {
    let mut player = loaded(vec![6, 5, 4, 3, 2, 1]);
    player.play();
    player.advance(40);
    player.set_speed(10);
    assert_eq!(player.speed_ms(), 10);
    // the tick armed for t = 100 is not pulled in
    assert_eq!(player.advance(59), 0);
    assert_eq!(player.advance(1), 1);
    assert_eq!(player.advance(10), 1);
}

#[test]
fn completion_invariant_holds_along_the_whole_run() {
    let mut player = loaded(vec![5, 1, 4, 2, 3]);
    player.play();
    while player.status() == Status::Playing {
        assert!(player.current_index() < player.total_steps());
        assert_eq!(player.live_timers(), 1);
        player.advance(100);
    }
    assert_eq!(player.status(), Status::Completed);
    assert_eq!(player.current_index(), player.total_steps());
}
