mod support;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use boards_core::{Action, ApiError, Completion, PageRequest, Settled, StoreSnapshot};
use boards_engine::{MemoryBoardsApi, SharedStore};
use pretty_assertions::assert_eq;
use serde_json::json;
use support::{collect_until, count, drain_for, home_store, init_logging, start};

fn board(n: usize) -> serde_json::Value {
    json!({
        "_id": format!("board-{n}"),
        "title": format!("Board {n}"),
        "description": "",
        "starred": n % 5 == 0,
    })
}

fn position(trace: &[Action], wanted: impl Fn(&Action) -> bool) -> usize {
    trace.iter().position(wanted).unwrap()
}

#[tokio::test]
async fn progress_bar_wraps_paired_list_fetches() {
    init_logging();
    let api = Arc::new(MemoryBoardsApi::seeded(45));
    let engine = start(&api, &home_store(0, 0, false));
    let mut trace = engine.subscribe();

    engine.dispatch(Action::BoardsFetchRequest { page_index: 1 });
    engine.dispatch(Action::BoardsFetchStarredRequest);
    let trace = collect_until(&mut trace, |seen| {
        seen.contains(&Action::ProgressBarStop)
    })
    .await;

    assert_eq!(count(&trace, |a| *a == Action::ProgressBarStart), 1);
    let started = position(&trace, |a| *a == Action::ProgressBarStart);
    let stopped = position(&trace, |a| *a == Action::ProgressBarStop);
    let listed = position(&trace, |a| matches!(a, Action::BoardsFetchSuccess { .. }));
    let starred = position(&trace, |a| {
        matches!(a, Action::BoardsFetchStarredSuccess { .. })
    });
    assert!(started > position(&trace, |a| *a == Action::BoardsFetchStarredRequest));
    assert!(stopped > listed && stopped > starred);

    let Action::BoardsFetchSuccess { payload, request } = &trace[listed] else {
        unreachable!();
    };
    assert_eq!(*request, PageRequest { page_index: 1 });
    assert_eq!(payload.as_array().map(Vec::len), Some(20));
    let Action::BoardsFetchStarredSuccess { payload } = &trace[starred] else {
        unreachable!();
    };
    assert_eq!(payload.as_array().map(Vec::len), Some(9));
}

#[tokio::test]
async fn bar_cycles_again_for_the_next_pair() {
    init_logging();
    let api = Arc::new(MemoryBoardsApi::seeded(5));
    let engine = start(&api, &home_store(0, 0, false));
    let mut trace = engine.subscribe();

    for _ in 0..2 {
        engine.dispatch(Action::BoardsFetchStarredRequest);
        engine.dispatch(Action::BoardsFetchRequest { page_index: 1 });
        let cycle = collect_until(&mut trace, |seen| seen.contains(&Action::ProgressBarStop)).await;
        assert_eq!(count(&cycle, |a| *a == Action::ProgressBarStart), 1);
    }
}

#[tokio::test]
async fn removal_refills_from_the_server_list() {
    init_logging();
    let api = Arc::new(MemoryBoardsApi::seeded(45));
    let engine = start(&api, &home_store(20, 1, false));
    let mut trace = engine.subscribe();

    engine.dispatch(Action::BoardRemoveRequest {
        id: "board-3".to_string(),
    });
    let trace = collect_until(&mut trace, |seen| seen.contains(&Action::ModalHide)).await;

    // The refill asks for offset 21 of a list that already shrank by one.
    assert_eq!(
        trace,
        vec![
            Action::BoardRemoveRequest {
                id: "board-3".to_string(),
            },
            Action::BoardAdd {
                payload: json!([board(22)]),
            },
            Action::BoardRemoveSuccess { payload: board(3) },
            Action::ModalHide,
        ]
    );
    assert_eq!(api.calls(), vec!["remove_board", "fetch_boards"]);
    assert_eq!(api.boards().len(), 44);
}

#[tokio::test]
async fn removal_on_last_page_does_not_refill() {
    init_logging();
    let api = Arc::new(MemoryBoardsApi::seeded(45));
    let engine = start(&api, &home_store(45, 3, true));
    let mut trace = engine.subscribe();

    engine.dispatch(Action::BoardRemoveRequest {
        id: "board-44".to_string(),
    });
    let trace = collect_until(&mut trace, |seen| seen.contains(&Action::ModalHide)).await;

    assert_eq!(
        trace,
        vec![
            Action::BoardRemoveRequest {
                id: "board-44".to_string(),
            },
            Action::BoardRemoveSuccess {
                payload: board(44),
            },
            Action::ModalHide,
        ]
    );
    assert_eq!(api.calls(), vec!["remove_board"]);
}

#[tokio::test]
async fn scroll_over_loaded_page_never_calls_the_api() {
    init_logging();
    let api = Arc::new(MemoryBoardsApi::seeded(45));
    let engine = start(&api, &home_store(40, 1, false));
    let mut trace = engine.subscribe();

    engine.dispatch(Action::ScrollBottom);
    let mut seen = collect_until(&mut trace, |seen| {
        seen.contains(&Action::BoardsSetPageIndex { page_index: 2 })
    })
    .await;
    seen.extend(drain_for(&mut trace, Duration::from_millis(100)).await);

    assert_eq!(
        seen,
        vec![
            Action::ScrollBottom,
            Action::BoardsSetPageIndex { page_index: 2 },
        ]
    );
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn scroll_past_loaded_boards_fetches_next_page() {
    init_logging();
    let api = Arc::new(MemoryBoardsApi::seeded(45));
    let engine = start(&api, &home_store(20, 1, false));
    let mut trace = engine.subscribe();

    engine.dispatch(Action::ScrollBottom);
    let trace = collect_until(&mut trace, |seen| {
        seen.iter()
            .any(|a| matches!(a, Action::BoardsFetchSuccess { .. }))
    })
    .await;

    let second_page: Vec<_> = (21..=40).map(board).collect();
    assert_eq!(
        trace,
        vec![
            Action::ScrollBottom,
            Action::BoardsFetchRequest { page_index: 2 },
            Action::BoardsFetchSuccess {
                payload: json!(second_page),
                request: PageRequest { page_index: 2 },
            },
        ]
    );
}

#[tokio::test]
async fn scroll_off_the_list_route_is_ignored() {
    init_logging();
    let api = Arc::new(MemoryBoardsApi::seeded(45));
    let store = home_store(20, 1, false);
    store.update(|state| {
        state.routing.location_before_transitions.pathname = "/boards/board-1".to_string();
    });
    let engine = start(&api, &store);
    let mut trace = engine.subscribe();

    engine.dispatch(Action::ScrollBottom);
    let seen = drain_for(&mut trace, Duration::from_millis(200)).await;

    assert_eq!(seen, vec![Action::ScrollBottom]);
    assert!(api.calls().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn every_request_gets_its_own_task() {
    init_logging();
    let api = Arc::new(MemoryBoardsApi::seeded(10));
    let engine = start(&api, &home_store(10, 1, true));
    let mut trace = engine.subscribe();

    for n in 1..=3 {
        engine.dispatch(Action::BoardFetchRequest {
            id: format!("board-{n}"),
        });
    }
    let trace = collect_until(&mut trace, |seen| {
        count(seen, |a| *a == Action::ProgressBarStop) == 3
            && count(seen, |a| matches!(a, Action::BoardFetchSuccess { .. })) == 3
    })
    .await;

    let fetched: HashSet<String> = trace
        .iter()
        .filter_map(|action| match action {
            Action::BoardFetchSuccess { payload } => payload["_id"].as_str().map(str::to_string),
            _ => None,
        })
        .collect();
    let expected: HashSet<String> = (1..=3).map(|n| format!("board-{n}")).collect();
    assert_eq!(fetched, expected);
    assert_eq!(count(&trace, |a| *a == Action::ProgressBarStart), 3);
}

#[tokio::test]
async fn failing_task_does_not_disturb_others() {
    init_logging();
    let api = Arc::new(MemoryBoardsApi::seeded(10));
    api.fail("fetch_board", ApiError::new("backend down"));
    let engine = start(&api, &home_store(10, 1, true));
    let mut trace = engine.subscribe();

    engine.dispatch(Action::BoardFetchRequest {
        id: "board-1".to_string(),
    });
    engine.dispatch(Action::BoardMoveRequest {
        source_id: "board-1".to_string(),
        target_id: "board-4".to_string(),
    });
    let seen = collect_until(&mut trace, |seen| {
        seen.contains(&Action::ProgressBarStop)
            && seen
                .iter()
                .any(|a| matches!(a, Action::BoardMoveSuccess { .. }))
    })
    .await;
    assert!(seen.contains(&Action::BoardFetchFailure {
        error: "backend down".to_string(),
    }));

    api.clear_failure("fetch_board");
    engine.dispatch(Action::BoardFetchRequest {
        id: "board-2".to_string(),
    });
    let seen = collect_until(&mut trace, |seen| {
        seen.iter()
            .any(|a| matches!(a, Action::BoardFetchSuccess { .. }))
    })
    .await;
    assert!(seen.contains(&Action::BoardFetchSuccess { payload: board(2) }));
}

#[tokio::test]
async fn create_settles_the_form_completion() {
    init_logging();
    let api = Arc::new(MemoryBoardsApi::seeded(45));
    let engine = start(&api, &home_store(20, 1, false));
    let mut trace = engine.subscribe();

    let (completion, receiver) = Completion::channel();
    engine.dispatch(Action::BoardCreateRequest {
        title: "Roadmap".to_string(),
        description: "Q3".to_string(),
        completion,
    });
    assert_eq!(receiver.wait().await, Some(Settled::Resolved));
    let seen = collect_until(&mut trace, |seen| seen.contains(&Action::ModalHide)).await;
    assert!(seen.iter().any(|a| matches!(
        a,
        Action::BoardCreateSuccess { payload } if payload["title"] == "Roadmap"
    )));
    assert_eq!(api.boards().len(), 46);

    let (completion, receiver) = Completion::channel();
    engine.dispatch(Action::BoardCreateRequest {
        title: "  ".to_string(),
        description: String::new(),
        completion,
    });
    assert_eq!(receiver.wait().await, Some(Settled::Rejected));
    let seen = collect_until(&mut trace, |seen| {
        seen.iter()
            .any(|a| matches!(a, Action::BoardCreateFailure { .. }))
    })
    .await;
    assert!(seen.contains(&Action::BoardCreateFailure {
        error: "title is required".to_string(),
    }));
    assert!(!seen.contains(&Action::ModalHide));
}

#[tokio::test]
async fn toggling_star_updates_the_board() {
    init_logging();
    let api = Arc::new(MemoryBoardsApi::seeded(3));
    let engine = start(&api, &home_store(3, 1, true));
    let mut trace = engine.subscribe();

    engine.dispatch(Action::BoardToggleStarredRequest {
        id: "board-2".to_string(),
        starred: true,
    });
    let seen = collect_until(&mut trace, |seen| {
        seen.iter()
            .any(|a| matches!(a, Action::BoardToggleStarredSuccess { .. }))
    })
    .await;

    let mut starred = board(2);
    starred["starred"] = json!(true);
    assert!(seen.contains(&Action::BoardToggleStarredSuccess { payload: starred }));
    assert_eq!(api.boards()[1]["starred"], json!(true));
}

#[tokio::test]
async fn shutdown_stops_every_process() {
    init_logging();
    let api = Arc::new(MemoryBoardsApi::seeded(3));
    let store = Arc::new(SharedStore::new(StoreSnapshot::default()));
    let engine = start(&api, &store);
    let bus = engine.bus();
    assert_eq!(bus.subscriber_count(), 11);

    let stopped = tokio::time::timeout(Duration::from_secs(5), engine.shutdown()).await;

    assert!(stopped.is_ok());
    assert!(bus.is_closed());
    assert!(!bus.publish(Action::ScrollBottom));
}
