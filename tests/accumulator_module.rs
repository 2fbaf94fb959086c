mod common;

use common::{ScriptEngine, DATABASE};
use iphreeqc::capture::Accumulator;
use iphreeqc::Session;

#[test]
fn appended_lines_are_terminated() {
    let mut accumulator = Accumulator::new();
    accumulator.append_line("TITLE x").expect("append");
    accumulator.append_line("END").expect("append");

    assert_eq!(accumulator.get(), "TITLE x\nEND\n");

    accumulator.clear();
    assert_eq!(accumulator.get(), "");
}

#[test]
fn accumulated_input_is_run_verbatim_and_replaced_by_next_batch() {
    let mut session = Session::new(ScriptEngine::new());
    assert_eq!(session.load_database_string(DATABASE), 0);
    session.set_output_string_on(true);

    session.accumulate_line("OUT first batch").expect("accumulate");
    session.accumulate_line("END").expect("accumulate");
    assert_eq!(session.run_accumulated(), 0);
    assert_eq!(session.output_string(), "first batch\n");
    assert_eq!(session.accumulated_lines(), "OUT first batch\nEND\n");

    session.accumulate_line("OUT second batch").expect("accumulate");
    assert_eq!(session.accumulated_lines(), "OUT second batch\n");

    let mut echoed = Vec::new();
    session
        .write_accumulated_lines(&mut echoed)
        .expect("write accumulated");
    assert_eq!(echoed, b"OUT second batch\n");

    session.clear_accumulated_lines();
    assert_eq!(session.accumulated_lines(), "");
}
