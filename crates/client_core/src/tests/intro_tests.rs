use super::*;

fn greetings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn mounted(items: &[&str]) -> IntroSequencer {
    let mut intro = IntroSequencer::new(greetings(items), IntroTimings::default());
    intro.mount(0);
    intro
}

#[test]
fn three_greetings_follow_the_documented_timeline() {
    let mut intro = mounted(&["Hi", "Hola", "Bye"]);
    assert_eq!(intro.current_greeting(), Some("Hi"));

    assert!(intro.advance_to(199).is_empty());
    assert_eq!(intro.index(), 0);

    intro.advance_to(200);
    assert_eq!(intro.current_greeting(), Some("Hola"));

    intro.advance_to(400);
    assert_eq!(intro.current_greeting(), Some("Bye"));
    assert_eq!(intro.phase(), IntroPhase::Greeting);

    assert!(intro.advance_to(1_199).is_empty());
    let changes = intro.advance_to(1_200);
    assert_eq!(
        changes,
        vec![PhaseChange {
            at: 1_200,
            phase: IntroPhase::Finishing
        }]
    );
    assert!(intro.intro_finished());
    assert!(!intro.content_shown());

    let changes = intro.advance_to(1_350);
    assert_eq!(changes[0].phase, IntroPhase::ContentShown);
    assert_eq!(changes[0].at, 1_350);
    assert!(intro.overlay_present());

    assert!(intro.advance_to(2_399).is_empty());
    let changes = intro.advance_to(2_400);
    assert_eq!(
        changes,
        vec![PhaseChange {
            at: 2_400,
            phase: IntroPhase::OverlayRemoved
        }]
    );
    assert!(!intro.overlay_present());
    assert_eq!(intro.current_greeting(), Some("Bye"));
}

#[test]
fn one_large_jump_reports_every_phase_with_its_own_instant() {
    let mut intro = mounted(&["Hi", "Hola", "Bye"]);
    let changes = intro.advance_to(10_000);

    assert_eq!(
        changes,
        vec![
            PhaseChange {
                at: 1_200,
                phase: IntroPhase::Finishing
            },
            PhaseChange {
                at: 1_350,
                phase: IntroPhase::ContentShown
            },
            PhaseChange {
                at: 2_400,
                phase: IntroPhase::OverlayRemoved
            },
        ]
    );
    assert_eq!(intro.index(), 2);
}

#[test]
fn terminal_state_is_reached_once_and_frozen() {
    let mut intro = mounted(&["Hello", "Hallo"]);
    intro.advance_to(5_000);
    assert_eq!(intro.phase(), IntroPhase::OverlayRemoved);

    assert!(intro.advance_to(50_000).is_empty());
    assert_eq!(intro.next_deadline(), None);
    assert_eq!(intro.index(), 1);
}

#[test]
fn unmount_cancels_pending_transitions() {
    let mut intro = mounted(&["Hi", "Hola", "Bye"]);
    intro.advance_to(200);
    intro.unmount();

    assert!(intro.advance_to(10_000).is_empty());
    assert_eq!(intro.index(), 1);
    assert_eq!(intro.phase(), IntroPhase::Greeting);
}

#[test]
fn unmount_after_finishing_keeps_overlay_until_remount() {
    let mut intro = mounted(&["Hi"]);
    intro.advance_to(800);
    assert_eq!(intro.phase(), IntroPhase::Finishing);

    intro.unmount();
    assert!(intro.advance_to(5_000).is_empty());
    assert!(!intro.content_shown());
    assert!(intro.overlay_present());

    intro.mount(5_000);
    let phases: Vec<_> = intro
        .advance_to(50_000)
        .into_iter()
        .map(|change| (change.at, change.phase))
        .collect();
    assert_eq!(
        phases,
        vec![
            (5_150, IntroPhase::ContentShown),
            (6_200, IntroPhase::OverlayRemoved),
        ]
    );
    assert!(!intro.overlay_present());
}

#[test]
fn remount_after_content_only_rearms_overlay_removal() {
    let mut intro = mounted(&["Hi"]);
    intro.advance_to(1_000);
    assert!(intro.content_shown());

    intro.unmount();
    intro.mount(3_000);
    assert_eq!(intro.next_deadline(), Some(4_200));
    let changes = intro.advance_to(4_200);
    assert_eq!(
        changes,
        vec![PhaseChange {
            at: 4_200,
            phase: IntroPhase::OverlayRemoved
        }]
    );
}

#[test]
fn zero_timings_settle_in_one_step() {
    let timings = IntroTimings {
        step_ms: 0,
        finish_delay_ms: 0,
        content_delay_ms: 0,
        overlay_delay_ms: 0,
    };
    let mut intro = IntroSequencer::new(greetings(&["Hi", "Hola", "Bye"]), timings);
    intro.mount(0);
    intro.advance_to(0);
    assert_eq!(intro.index(), 2);
    assert_eq!(intro.phase(), IntroPhase::OverlayRemoved);
    assert_eq!(intro.next_deadline(), None);
}

#[test]
fn single_greeting_goes_straight_to_finish_delay() {
    let mut intro = mounted(&["Hello"]);
    assert_eq!(intro.next_deadline(), Some(800));
    let changes = intro.advance_to(800);
    assert_eq!(changes[0].phase, IntroPhase::Finishing);
}

#[test]
fn empty_greeting_list_still_finishes() {
    let mut intro = mounted(&[]);
    assert_eq!(intro.current_greeting(), None);
    intro.advance_to(3_000);
    assert_eq!(intro.phase(), IntroPhase::OverlayRemoved);
}

#[test]
fn overlay_removal_never_precedes_content_reveal() {
    let timings = IntroTimings {
        content_delay_ms: 500,
        overlay_delay_ms: 100,
        ..IntroTimings::default()
    };
    let mut intro = IntroSequencer::new(greetings(&["Hi"]), timings);
    intro.mount(0);

    let phases: Vec<_> = intro
        .advance_to(5_000)
        .into_iter()
        .map(|change| change.phase)
        .collect();
    assert_eq!(
        phases,
        vec![
            IntroPhase::Finishing,
            IntroPhase::ContentShown,
            IntroPhase::OverlayRemoved
        ]
    );
}

#[test]
fn every_index_is_visited_once_in_order() {
    for len in 1..8 {
        let items: Vec<String> = (0..len).map(|i| format!("g{i}")).collect();
        let mut intro = IntroSequencer::new(items, IntroTimings::default());
        intro.mount(0);

        let mut visited = vec![intro.index()];
        let mut now = 0;
        while intro.phase() == IntroPhase::Greeting {
            now += 50;
            intro.advance_to(now);
            if *visited.last().expect("non-empty") != intro.index() {
                visited.push(intro.index());
            }
        }
        assert_eq!(visited, (0..len).collect::<Vec<_>>());
    }
}
