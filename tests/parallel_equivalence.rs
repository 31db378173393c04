#![cfg(feature = "parallel")]

use proptest::prelude::*;
use stepviz::render::{render, render_all};
use stepviz::{Algorithm, Catalog, Checkpoints, Problem, SortAlgorithm};

fn serial_states(problem: &Problem) -> Vec<stepviz::Frame> {
    let trace = Catalog.generate(problem);
    let mut state = Catalog.seed(problem);
    let mut out = vec![state.clone()];
    for step in &trace {
        Catalog.interpret(&mut state, step);
        out.push(state.clone());
    }
    out
}

proptest! {
    #[test]
    fn sort_prefixes_match_incremental_fold(
        algorithm in prop::sample::select(SortAlgorithm::ALL.to_vec()),
        values in prop::collection::vec(-30i64..30, 0..10),
    ) {
        let problem = Problem::Sort { algorithm, values };
        let trace = Catalog.generate(&problem);
        prop_assert_eq!(render_all(&Catalog, &problem, &trace), serial_states(&problem));
    }

    #[test]
    fn edit_distance_prefixes_match_incremental_fold(a in "[ACGT]{0,8}", b in "[ACGT]{0,8}") {
        let problem = Problem::EditDistance { source: a, target: b };
        let trace = Catalog.generate(&problem);
        prop_assert_eq!(render_all(&Catalog, &problem, &trace), serial_states(&problem));
    }

    #[test]
    fn kmp_prefixes_match_checkpoint_replay(text in "[ab]{1,12}", pattern in "[ab]{1,4}") {
        let problem = Problem::Kmp { text, pattern };
        let trace = Catalog.generate(&problem);
        let all = render_all(&Catalog, &problem, &trace);
        let cps = Checkpoints::build(&Catalog, &problem, &trace, None);
        for (k, state) in all.iter().enumerate() {
            prop_assert_eq!(state, &cps.render(&Catalog, &problem, trace.steps(), k));
        }
    }
}

#[test]
fn last_parallel_state_is_the_full_replay() {
    let problem = Problem::SlidingWindowMax {
        values: vec![1, 3, -1, -3, 5, 3, 6, 7],
        window: 3,
    };
    let trace = Catalog.generate(&problem);
    let all = render_all(&Catalog, &problem, &trace);
    assert_eq!(all.len(), trace.len() + 1);
    assert_eq!(all.last(), Some(&render(&Catalog, &problem, trace.steps())));
}
