#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{ScriptParser, Session, StepReport};
use std::num::NonZeroUsize;

pub fn run_script(src: &str) -> (Session, Vec<StepReport>) {
    run_script_with_limit(src, None)
}

pub fn run_script_with_limit(src: &str, limit: Option<NonZeroUsize>) -> (Session, Vec<StepReport>) {
    let script = ScriptParser::parse(src).expect("script should parse");
    let mut session = Session::new("", limit);
    let reports = session.run(&script).expect("script should run");
    (session, reports)
}

pub fn texts(session: &Session) -> Vec<String> {
    session
        .history()
        .snapshots()
        .iter()
        .map(|s| s.text().to_string())
        .collect()
}
