//! Search box wired to a mounted document view.

use crate::integration::test_utils::{run_for, snapshot_of, DelayedExecutor};
use docview::config::DocviewConfig;
use docview::{
    DocumentManager, EntityStatus, QueryModel, SearchInputSynchronizer, SortDirection,
    SubmitOutcome, SyncDecision, ViewScope,
};
use std::cell::RefCell;
use std::sync::Arc;

#[tokio::test(start_paused = true)]
async fn test_submitted_term_drives_view_without_echo() {
    let executor = Arc::new(DelayedExecutor::immediate(vec![snapshot_of(&[
        EntityStatus::Success,
    ])]));
    let view = RefCell::new(DocumentManager::new(
        executor.clone(),
        None,
        ViewScope::Collection,
        &QueryModel::new().with_term("alpha"),
        &DocviewConfig::default(),
    ));
    view.borrow_mut().mount();

    let mut sync = SearchInputSynchronizer::new(Some(&view.borrow().query()));
    assert_eq!(sync.value(), "alpha");

    sync.edit("beta");
    let updater = |query: QueryModel| {
        view.borrow_mut().update_query(&query);
    };
    let outcome = sync.submit(Some(&updater));
    assert!(matches!(outcome, SubmitOutcome::Updated(_)));

    run_for(10).await;
    let calls = executor.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].term(), Some("beta"));
    // The default sort applied by the view survives the submit.
    assert!(calls[1].has_sort());

    assert_eq!(sync.observe(&view.borrow().query()), SyncDecision::Keep);
    assert_eq!(sync.value(), "beta");
}

#[tokio::test(start_paused = true)]
async fn test_external_resort_keeps_in_progress_edit() {
    let executor = Arc::new(DelayedExecutor::immediate(vec![snapshot_of(&[
        EntityStatus::Success,
    ])]));
    let mut view = DocumentManager::new(
        executor,
        None,
        ViewScope::Collection,
        &QueryModel::new().with_term("invoice"),
        &DocviewConfig::default(),
    );
    view.mount();

    let mut sync = SearchInputSynchronizer::new(Some(&view.query()));
    sync.edit("invo");

    let resorted = view.query().with_sort("created_at", SortDirection::Desc);
    assert!(view.update_query(&resorted));
    assert_eq!(sync.observe(&view.query()), SyncDecision::Keep);
    assert_eq!(sync.value(), "invo");

    let renamed = view.query().with_term("receipt");
    view.update_query(&renamed);
    assert_eq!(
        sync.observe(&view.query()),
        SyncDecision::Overwrite("receipt".to_string())
    );
    assert_eq!(sync.value(), "receipt");
}

#[test]
fn test_submit_without_owner_navigates_with_term_only() {
    let start = QueryModel::new()
        .with_term("old")
        .with_filter("filter:schema", "Pdf")
        .with_sort("name", SortDirection::Asc);
    let mut sync = SearchInputSynchronizer::new(Some(&start));
    sync.edit("q3 & q4");

    match sync.submit(None) {
        SubmitOutcome::Navigate(location) => {
            assert_eq!(location.to_url(), "/search?q=q3%20%26%20q4");
        }
        other => panic!("expected navigation, got {:?}", other),
    }
}
