use iphreeqc::config::Settings;
use iphreeqc::router::{Emission, Router};
use iphreeqc::{Action, Cell, Stop, StreamKind};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn router_in(dir: &Path) -> Router {
    Router::new(&Settings {
        output_dir: dir.to_path_buf(),
        ..Settings::default()
    })
}

fn write(router: &mut Router, stream: StreamKind, text: &str) -> Result<bool, Stop> {
    router.dispatch(Action::Write {
        stream,
        text: text.to_string(),
        fatal: false,
    })
}

fn punch(router: &mut Router, name: &str, value: Cell) {
    router
        .dispatch(Action::Punch {
            name: name.to_string(),
            value,
        })
        .expect("punch");
}

#[test]
fn disabling_file_switch_stops_growth_while_capture_continues() {
    let dir = tempdir().expect("tempdir");
    let mut router = router_in(dir.path());
    router.switches_mut().set_file_on(StreamKind::Dump, true);
    router.switches_mut().set_capture_on(StreamKind::Dump, true);

    write(&mut router, StreamKind::Dump, "SOLUTION_RAW 1\n").expect("write");
    let path = dir.path().join("dump.out");
    let before = fs::read_to_string(&path).expect("read dump");

    router.switches_mut().set_file_on(StreamKind::Dump, false);
    write(&mut router, StreamKind::Dump, "SOLUTION_RAW 2\n").expect("write");

    assert_eq!(fs::read_to_string(&path).expect("read dump"), before);
    let captured = router.buffer(StreamKind::Dump).expect("dump buffer");
    assert_eq!(captured.line_count(), 2);
    assert_eq!(captured.line_at(1), "SOLUTION_RAW 2");
}

#[test]
fn nothing_touches_disk_while_file_switches_are_off() {
    let dir = tempdir().expect("tempdir");
    let mut router = router_in(dir.path());
    write(&mut router, StreamKind::Output, "hello\n").expect("write");
    write(&mut router, StreamKind::Error, "bad").expect("write");

    assert_eq!(fs::read_dir(dir.path()).expect("read dir").count(), 0);
    assert!(!router.sinks().is_open(StreamKind::Output));
    assert_eq!(router.buffer(StreamKind::Output).expect("buffer").as_text(), "");
}

#[test]
fn errors_and_warnings_are_counted_and_optionally_filed() {
    let dir = tempdir().expect("tempdir");
    let mut router = router_in(dir.path());
    router.switches_mut().set_file_on(StreamKind::Error, true);

    write(&mut router, StreamKind::Error, "ERROR: unknown keyword\n").expect("write");
    write(&mut router, StreamKind::Warning, "WARNING: low charge").expect("write");

    assert_eq!(router.diagnostics().errors.count(), 1);
    assert_eq!(
        router.diagnostics().errors.line_at(0),
        "ERROR: unknown keyword"
    );
    assert_eq!(router.diagnostics().warnings.count(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("phreeqc.err")).expect("read err"),
        "ERROR: unknown keyword\n"
    );
    assert!(!dir.path().join("phreeqc.warn").exists());
}

#[test]
fn fatal_emission_routes_then_stops() {
    let dir = tempdir().expect("tempdir");
    let mut router = router_in(dir.path());

    let stop = router
        .route(Emission {
            stream: StreamKind::Error,
            text: "ERROR: stopping".to_string(),
            fatal: true,
        })
        .expect_err("fatal must stop");

    assert_eq!(stop, Stop::fatal(StreamKind::Error, "ERROR: stopping"));
    assert_eq!(router.diagnostics().errors.count(), 1);
}

#[test]
fn fatal_emission_keeps_staged_row_in_progress() {
    let dir = tempdir().expect("tempdir");
    let mut router = router_in(dir.path());
    punch(&mut router, "Ca", Cell::Number(1.0));
    router.dispatch(Action::EndRow).expect("end row");
    punch(&mut router, "Ca", Cell::Number(2.0));

    let result = router.dispatch(Action::Write {
        stream: StreamKind::Error,
        text: "boom".to_string(),
        fatal: true,
    });

    assert!(result.is_err());
    assert_eq!(router.grid().row_count(), 1);
    assert!(router.grid().has_staged());
}

#[test]
fn selected_output_sink_starts_with_headings_matching_grid_order() {
    let dir = tempdir().expect("tempdir");
    let mut router = router_in(dir.path());
    router.switches_mut().set_file_on(StreamKind::Punch, true);

    punch(&mut router, "sim", Cell::Integer(1));
    punch(&mut router, "pH", Cell::Number(7.5));
    router.dispatch(Action::EndRow).expect("end row");
    punch(&mut router, "sim", Cell::Integer(2));
    punch(&mut router, "pH", Cell::Number(8.0));
    router.dispatch(Action::EndRow).expect("end row");

    let written = fs::read_to_string(dir.path().join("selected.out")).expect("read");
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines, vec!["sim\tpH", "1\t7.5000e0", "2\t8.0000e0"]);
    assert_eq!(
        lines[0].split('\t').collect::<Vec<_>>(),
        router.grid().headings()
    );
}

#[test]
fn sink_actions_open_redirect_close_and_query() {
    let dir = tempdir().expect("tempdir");
    let mut router = router_in(dir.path());
    router.switches_mut().set_file_on(StreamKind::Punch, true);
    let custom = dir.path().join("ex2.sel");

    let opened = router
        .dispatch(Action::OpenSink {
            stream: StreamKind::Punch,
            path: custom.clone(),
        })
        .expect("open");
    assert!(opened);
    assert!(router
        .dispatch(Action::QueryIsOpen {
            stream: StreamKind::Punch
        })
        .expect("query"));

    // Opening the same path again is a no-op.
    assert!(router
        .dispatch(Action::OpenSink {
            stream: StreamKind::Punch,
            path: custom.clone(),
        })
        .expect("reopen"));

    router
        .dispatch(Action::CloseSink {
            stream: StreamKind::Punch,
        })
        .expect("close");
    assert!(!router
        .dispatch(Action::QueryIsOpen {
            stream: StreamKind::Punch
        })
        .expect("query"));
    assert!(custom.exists());
    assert!(!dir.path().join("selected.out").exists());
}

#[test]
fn open_sink_with_file_switch_off_only_records_the_path() {
    let dir = tempdir().expect("tempdir");
    let mut router = router_in(dir.path());
    let custom = dir.path().join("custom.dmp");

    assert!(router
        .dispatch(Action::OpenSink {
            stream: StreamKind::Dump,
            path: custom.clone(),
        })
        .expect("open"));
    assert!(!custom.exists());
    assert_eq!(router.sinks().path(StreamKind::Dump), custom.as_path());
}

#[test]
fn unusable_sink_records_one_error() {
    let dir = tempdir().expect("tempdir");
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "file, not directory").expect("write blocker");
    let mut router = Router::new(&Settings {
        output_dir: blocker,
        ..Settings::default()
    });
    router.switches_mut().set_file_on(StreamKind::Output, true);

    write(&mut router, StreamKind::Output, "one\n").expect("write");
    write(&mut router, StreamKind::Output, "two\n").expect("write");

    assert_eq!(router.diagnostics().errors.count(), 1);
    assert!(router
        .diagnostics()
        .errors
        .line_at(0)
        .starts_with("failed to open sink"));
}

#[test]
fn unusable_selected_output_sink_still_commits_rows() {
    let dir = tempdir().expect("tempdir");
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "file, not directory").expect("write blocker");
    let mut router = Router::new(&Settings {
        output_dir: blocker,
        ..Settings::default()
    });
    router.switches_mut().set_file_on(StreamKind::Punch, true);

    punch(&mut router, "pH", Cell::Number(7.0));
    router.dispatch(Action::EndRow).expect("end row");
    punch(&mut router, "pH", Cell::Number(7.1));
    router.dispatch(Action::EndRow).expect("end row");

    assert_eq!(router.grid().row_count(), 2);
    assert_eq!(router.diagnostics().errors.count(), 1);
}

#[test]
fn setting_a_switch_twice_changes_nothing_else() {
    let dir = tempdir().expect("tempdir");
    let mut router = router_in(dir.path());
    write(&mut router, StreamKind::Warning, "w").expect("write");

    router.switches_mut().set_capture_on(StreamKind::Log, true);
    let snapshot = *router.switches();
    router.switches_mut().set_capture_on(StreamKind::Log, true);

    assert_eq!(*router.switches(), snapshot);
    assert_eq!(router.diagnostics().warnings.count(), 1);
    assert_eq!(router.buffer(StreamKind::Log).expect("log").as_text(), "");
}
