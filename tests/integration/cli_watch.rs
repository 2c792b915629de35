//! `docview watch` against fixture files, driven through the run context.

use docview::cli::{RunContext, WatchOptions};
use docview::config::DocviewConfig;
use docview::{EntityRecord, EntityStatus, ResultSnapshot};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

use EntityStatus::{Pending, Success};

fn write_fixture(dir: &Path, snapshots: &[ResultSnapshot]) -> PathBuf {
    let path = dir.join("fixture.json");
    std::fs::write(&path, serde_json::to_string(snapshots).unwrap()).unwrap();
    path
}

fn two_docs(first: EntityStatus, second: EntityStatus) -> ResultSnapshot {
    ResultSnapshot::loaded(
        2,
        vec![
            EntityRecord::new("doc-1", first).with_name("scan-001.pdf"),
            EntityRecord::new("doc-2", second).with_name("scan-002.pdf"),
        ],
    )
}

fn options(fixture: PathBuf) -> WatchOptions {
    WatchOptions {
        fixture,
        query: None,
        writeable: false,
        interval_ms: None,
        max_wait: Duration::from_secs(60),
        color: false,
    }
}

#[tokio::test(start_paused = true)]
async fn test_watch_until_settled() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = write_fixture(
        temp_dir.path(),
        &[
            two_docs(Pending, Pending),
            two_docs(Success, Pending),
            two_docs(Success, Success),
        ],
    );

    let context = RunContext::with_config(DocviewConfig::default());
    let mut tables = Vec::new();
    let summary = context
        .watch(&options(fixture), |table| tables.push(table))
        .await
        .unwrap();

    assert_eq!(
        summary,
        "All documents processed after 3 executions (3 snapshots shown)"
    );
    assert_eq!(tables.len(), 3);
    assert!(tables[0].contains("Documents are being processed"));
    assert!(tables[0].contains("scan-001.pdf"));
    assert!(!tables[2].contains("Documents are being processed"));
}

#[tokio::test(start_paused = true)]
async fn test_watch_gives_up_after_max_wait() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = write_fixture(temp_dir.path(), &[two_docs(Pending, Success)]);

    let context = RunContext::with_config(DocviewConfig::default());
    let mut watch = options(fixture);
    watch.max_wait = Duration::from_millis(5000);
    watch.interval_ms = Some(1000);

    let mut shown = 0;
    let summary = context.watch(&watch, |_| shown += 1).await.unwrap();

    assert!(summary.starts_with("Stopped waiting"));
    assert_eq!(shown, 1);
}

#[tokio::test]
async fn test_watch_rejects_empty_fixture() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = write_fixture(temp_dir.path(), &[]);

    let context = RunContext::with_config(DocviewConfig::default());
    let result = context.watch(&options(fixture), |_| {}).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_config_command_prints_json() {
    let context = RunContext::with_config(DocviewConfig::default());
    let output = context
        .execute(&docview::cli::Commands::Config, false)
        .await
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["refresh"]["interval_ms"], 2000);
    assert_eq!(value["listing"]["default_sort_field"], "name");
}
