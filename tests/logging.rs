use tracing::{debug, info};

// Global-subscriber installation is once per process, so the whole file sink
// lifecycle lives in a single test.
#[test]
fn file_sink_creates_parent_dirs_and_appends() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("nested").join("logs").join("pinger.log");

    lib::logging::init(Some(log_path.as_path())).unwrap();

    info!("file sink smoke line");
    debug!("debug reaches the file sink only");

    let contents = std::fs::read_to_string(&log_path).unwrap();
    assert!(contents.contains("file sink smoke line"));
    assert!(contents.contains("debug reaches the file sink only"));
    assert!(contents.contains("INFO"));
    assert!(contents.contains("DEBUG"));

    // Second init must fail instead of double-installing.
    assert!(lib::logging::init(None).is_err());
}
