//! Tests for CommandDispatcher: verb resolution, splitting and handler wiring

use std::sync::{Arc, Mutex};

use rstest::rstest;

use hackmyresume::application::services::{CommandDispatcher, HandlerSet, Outcome};
use hackmyresume::application::ApplicationError;
use hackmyresume::cli::ClapOptionParser;
use hackmyresume::domain::{ArgumentGroup, CommandError, Options, Verb};
use hackmyresume::infrastructure::traits::{HandlerError, MessageSink, VerbHandler};
use hackmyresume::util::testing;

/// One recorded handler invocation
#[derive(Debug, Clone, PartialEq, Eq)]
struct Call {
    label: &'static str,
    sources: Vec<String>,
    destinations: Vec<String>,
    options: Options,
}

/// Mock handler that records its calls and logs one line per call
struct RecordingHandler {
    label: &'static str,
    calls: Arc<Mutex<Vec<Call>>>,
    result: Result<(), HandlerError>,
}

impl VerbHandler for RecordingHandler {
    fn handle(
        &self,
        sources: &[String],
        destinations: &[String],
        options: &Options,
        log: &dyn Fn(&str),
    ) -> Result<(), HandlerError> {
        self.calls.lock().unwrap().push(Call {
            label: self.label,
            sources: sources.to_vec(),
            destinations: destinations.to_vec(),
            options: options.clone(),
        });
        log(&format!("{} ran", self.label));
        self.result.clone()
    }
}

/// Mock sink that keeps every message
#[derive(Default)]
struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl MessageSink for RecordingSink {
    fn emit(&self, msg: &str) {
        self.messages.lock().unwrap().push(msg.to_string());
    }
}

struct Fixture {
    dispatcher: CommandDispatcher,
    calls: Arc<Mutex<Vec<Call>>>,
    sink: Arc<RecordingSink>,
}

impl Fixture {
    fn new() -> Self {
        Self::with_result(Ok(()))
    }

    fn with_result(result: Result<(), HandlerError>) -> Self {
        testing::init_test_setup();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let handler = |label: &'static str| -> Arc<dyn VerbHandler> {
            Arc::new(RecordingHandler {
                label,
                calls: Arc::clone(&calls),
                result: result.clone(),
            })
        };
        let handlers = HandlerSet {
            new: handler("new"),
            validate: handler("validate"),
            convert: handler("convert"),
            analyze: handler("analyze"),
            build: handler("build"),
        };
        let sink = Arc::new(RecordingSink::default());
        let dispatcher = CommandDispatcher::new(
            Arc::new(ClapOptionParser),
            handlers,
            Arc::clone(&sink) as Arc<dyn MessageSink>,
            Options::default(),
        );
        Self {
            dispatcher,
            calls,
            sink,
        }
    }

    fn dispatch(&self, args: &[&str]) -> Result<Outcome, ApplicationError> {
        let mut raw = vec!["hackmyresume"];
        raw.extend_from_slice(args);
        self.dispatcher.dispatch(raw)
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn messages(&self) -> Vec<String> {
        self.sink.messages.lock().unwrap().clone()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn command_error(result: Result<Outcome, ApplicationError>) -> CommandError {
    match result {
        Err(ApplicationError::Command(e)) => e,
        other => panic!("expected command error, got {other:?}"),
    }
}

// ============================================================
// End-to-end dispatch
// ============================================================

#[test]
fn given_build_with_to_when_dispatching_then_handler_gets_split_groups() {
    let fx = Fixture::new();

    let outcome = fx.dispatch(&["build", "resume.json", "TO", "out.html"]).unwrap();

    assert_eq!(
        outcome,
        Outcome::Dispatched {
            verb: Verb::Build,
            group: ArgumentGroup {
                sources: strings(&["resume.json"]),
                destinations: strings(&["out.html"]),
            },
        }
    );
    let calls = fx.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].label, "build");
    assert_eq!(calls[0].sources, strings(&["resume.json"]));
    assert_eq!(calls[0].destinations, strings(&["out.html"]));
}

#[test]
fn given_validate_when_dispatching_then_flat_sources_no_destinations() {
    let fx = Fixture::new();

    fx.dispatch(&["validate", "resume.json"]).unwrap();

    let calls = fx.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].label, "validate");
    assert_eq!(calls[0].sources, strings(&["resume.json"]));
    assert!(calls[0].destinations.is_empty());
}

#[test]
fn given_flat_verb_with_to_token_when_dispatching_then_to_is_a_source() {
    let fx = Fixture::new();

    fx.dispatch(&["analyze", "a.json", "to", "b.json"]).unwrap();

    let calls = fx.calls();
    assert_eq!(calls[0].sources, strings(&["a.json", "to", "b.json"]));
    assert!(calls[0].destinations.is_empty());
}

#[rstest]
#[case("build", "build")]
#[case("BUILD", "build")]
#[case("Build", "build")]
#[case("generate", "build")]
#[case("GENERATE", "build")]
#[case("new", "new")]
#[case("Create", "new")]
#[case("Convert", "convert")]
#[case("ANALYZE", "analyze")]
#[case("vAlIdAtE", "validate")]
fn given_verb_in_any_case_or_alias_when_dispatching_then_same_handler(
    #[case] verb: &str,
    #[case] expected: &str,
) {
    let fx = Fixture::new();

    fx.dispatch(&[verb, "resume.json", "to", "out.json"]).unwrap();

    let calls = fx.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].label, expected);
}

#[test]
fn given_two_separators_when_dispatching_then_only_first_splits() {
    let fx = Fixture::new();

    fx.dispatch(&["convert", "a", "to", "b", "to", "c"]).unwrap();

    let calls = fx.calls();
    assert_eq!(calls[0].sources, strings(&["a"]));
    assert_eq!(calls[0].destinations, strings(&["b", "to", "c"]));
}

#[test]
fn given_filename_case_when_dispatching_then_preserved() {
    let fx = Fixture::new();

    fx.dispatch(&["BUILD", "My Resume.JSON", "To", "Out/Resume.HTML"])
        .unwrap();

    let calls = fx.calls();
    assert_eq!(calls[0].sources, strings(&["My Resume.JSON"]));
    assert_eq!(calls[0].destinations, strings(&["Out/Resume.HTML"]));
}

#[test]
fn given_flags_before_verb_when_dispatching_then_verb_found() {
    let fx = Fixture::new();

    fx.dispatch(&["-s", "Build", "r.json", "-t", "compact"])
        .unwrap();

    let calls = fx.calls();
    assert_eq!(calls[0].label, "build");
    assert_eq!(calls[0].options.theme, "compact");
    assert!(calls[0].options.silent);
}

// ============================================================
// Failures
// ============================================================

#[test]
fn given_unknown_verb_when_dispatching_then_invalid_command_and_no_handler() {
    let fx = Fixture::new();

    let err = command_error(fx.dispatch(&["foo", "resume.json"]));

    assert_eq!(
        err,
        CommandError::InvalidCommand {
            attempted: Some("foo".to_string())
        }
    );
    assert!(fx.calls().is_empty());
}

#[test]
fn given_unknown_verb_alone_when_dispatching_then_invalid_command_keeps_case() {
    let fx = Fixture::new();

    let err = command_error(fx.dispatch(&["FooBar"]));

    assert_eq!(err.attempted(), Some("FooBar"));
}

#[test]
fn given_unknown_verb_with_bad_flags_when_dispatching_then_invalid_command_first() {
    let fx = Fixture::new();

    let err = command_error(fx.dispatch(&["--bogus", "foo", "--worse"]));

    assert_eq!(err.attempted(), Some("foo"));
}

#[test]
fn given_no_verb_when_dispatching_then_invalid_command_without_attempt() {
    let fx = Fixture::new();

    let err = command_error(fx.dispatch(&["-s"]));

    assert_eq!(err, CommandError::InvalidCommand { attempted: None });
    let err = command_error(fx.dispatch(&[]));
    assert_eq!(err, CommandError::InvalidCommand { attempted: None });
}

#[rstest]
#[case("new")]
#[case("create")]
#[case("validate")]
#[case("convert")]
#[case("analyze")]
#[case("build")]
#[case("generate")]
fn given_verb_without_arguments_when_dispatching_then_resume_not_found(#[case] verb: &str) {
    let fx = Fixture::new();

    let err = command_error(fx.dispatch(&[verb]));

    assert_eq!(err, CommandError::ResumeNotFound);
    assert!(fx.calls().is_empty());
}

#[rstest]
#[case(&["build", "resume.json", "to"])]
#[case(&["convert", "a.json", "b.json", "TO"])]
#[case(&["generate", "to"])]
fn given_trailing_separator_when_dispatching_then_malformed_split_and_no_handler(
    #[case] args: &[&str],
) {
    let fx = Fixture::new();

    let err = command_error(fx.dispatch(args));

    assert_eq!(err, CommandError::MalformedSplit);
    assert!(err.is_fatal());
    assert!(fx.calls().is_empty());
}

#[test]
fn given_separator_first_when_dispatching_then_resume_not_found() {
    let fx = Fixture::new();

    let err = command_error(fx.dispatch(&["build", "TO", "out.html"]));

    assert_eq!(err, CommandError::ResumeNotFound);
    assert!(fx.calls().is_empty());
}

#[test]
fn given_option_missing_value_when_dispatching_then_missing_argument() {
    let fx = Fixture::new();

    let err = command_error(fx.dispatch(&["build", "resume.json", "--theme"]));

    assert!(matches!(err, CommandError::MissingArgument { .. }));
    assert!(fx.calls().is_empty());
}

#[test]
fn given_unknown_flag_when_dispatching_then_invalid_options() {
    let fx = Fixture::new();

    let err = fx
        .dispatch(&["validate", "resume.json", "--bogus"])
        .unwrap_err();

    assert!(matches!(err, ApplicationError::InvalidOptions(_)), "{err:?}");
    assert!(fx.calls().is_empty());
}

#[test]
fn given_handler_failure_when_dispatching_then_reported_with_verb() {
    let fx = Fixture::with_result(Err(HandlerError::warning("theme not found")));

    let err = fx.dispatch(&["build", "resume.json"]).unwrap_err();

    match err {
        ApplicationError::Handler {
            verb,
            message,
            fatal,
        } => {
            assert_eq!(verb, Verb::Build);
            assert_eq!(message, "theme not found");
            assert!(!fatal);
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(fx.calls().len(), 1);
}

// ============================================================
// Help, version, logging
// ============================================================

#[rstest]
#[case(&["build", "--help"])]
#[case(&["VALIDATE", "-h"])]
#[case(&["-s", "convert", "--help"])]
#[case(&["generate", "r.json", "-h"])]
fn given_help_flag_when_dispatching_then_help_outcome_and_no_handler(#[case] args: &[&str]) {
    let fx = Fixture::new();

    let outcome = fx.dispatch(args).unwrap();

    assert_eq!(outcome, Outcome::Help);
    assert!(fx.calls().is_empty());
}

#[test]
fn given_help_with_unknown_verb_when_dispatching_then_invalid_command() {
    let fx = Fixture::new();

    let err = command_error(fx.dispatch(&["foo", "--help"]));

    assert_eq!(err.attempted(), Some("foo"));
}

#[rstest]
#[case(&["--help"])]
#[case(&["-h"])]
#[case(&["-s", "--help"])]
#[case(&["--version"])]
#[case(&["-V"])]
fn given_help_or_version_without_verb_when_dispatching_then_invalid_command(
    #[case] args: &[&str],
) {
    let fx = Fixture::new();

    let err = command_error(fx.dispatch(args));

    assert_eq!(err, CommandError::InvalidCommand { attempted: None });
    assert!(fx.calls().is_empty());
}

#[rstest]
#[case(&["build", "r.json", "-V"])]
#[case(&["Analyze", "--version"])]
fn given_version_flag_after_verb_when_dispatching_then_version_outcome(
    #[case] args: &[&str],
) {
    let fx = Fixture::new();

    assert_eq!(fx.dispatch(args).unwrap(), Outcome::Version);
    assert!(fx.calls().is_empty());
}

#[test]
fn given_not_silent_when_dispatching_then_log_reaches_sink() {
    let fx = Fixture::new();

    fx.dispatch(&["validate", "resume.json"]).unwrap();

    assert_eq!(fx.messages(), vec!["validate ran"]);
}

#[rstest]
#[case(&["-s", "validate", "resume.json"])]
#[case(&["validate", "--silent", "resume.json"])]
#[case(&["build", "resume.json", "TO", "out.pdf", "-s"])]
fn given_silent_when_dispatching_then_log_is_noop(#[case] args: &[&str]) {
    let fx = Fixture::new();

    fx.dispatch(args).unwrap();

    assert_eq!(fx.calls().len(), 1);
    assert!(fx.calls()[0].options.silent);
    assert!(fx.messages().is_empty());
}

#[test]
fn given_consecutive_dispatches_then_options_do_not_leak() {
    let fx = Fixture::new();

    fx.dispatch(&["-s", "build", "a.json", "-t", "compact", "-n"])
        .unwrap();
    fx.dispatch(&["build", "b.json"]).unwrap();

    let calls = fx.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].options, Options::default());
    assert_eq!(fx.messages(), vec!["build ran"]);
}
