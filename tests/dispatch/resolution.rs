use crate::support::{
    helpers::{argv, init_tracing},
    recording::{RecordingHarness, RecordingProfile},
};
use rdas::{
    ApplicationName, BackendCatalog, DispatchState, Dispatcher, Fv3Jedi, LaunchError, LaunchMode,
    MpasJedi, NameKind,
};
use std::sync::Arc;

#[test]
fn application_tokens_resolve_case_insensitively() {
    init_tracing();
    for token in ["HofX4D", "hofx4d", "HOFX4D"] {
        let harness = RecordingHarness::with_status(0);
        let mut dispatcher = Dispatcher::new(LaunchMode::single(Fv3Jedi));
        let status = dispatcher
            .dispatch(argv(&["rdas_fv3jedi", token, "hofx.json"]), harness.factory())
            .unwrap();

        assert_eq!(status, 0);
        assert_eq!(harness.executed(), vec![ApplicationName::HofX4D]);
    }
}

#[test]
fn backend_tokens_resolve_case_insensitively() {
    init_tracing();
    let harness = RecordingHarness::with_status(0);
    let mut dispatcher = Dispatcher::new(LaunchMode::Multi(BackendCatalog::standard()));
    dispatcher
        .dispatch(argv(&["rdas", "MPASJEDI", "Variational", "3dvar.json"]), harness.factory())
        .unwrap();

    assert_eq!(harness.executed(), vec![ApplicationName::Variational]);
    assert_eq!(harness.args(), argv(&["rdas", "3dvar.json"]));
}

#[test]
fn unknown_application_registers_nothing() {
    init_tracing();
    let profile = RecordingProfile::new(Fv3Jedi);
    let harness = RecordingHarness::with_status(0);
    let mut dispatcher = Dispatcher::new(LaunchMode::Single(Arc::new(profile.clone())));

    let err = dispatcher
        .dispatch(argv(&["prog", "bogus", "x.json"]), harness.factory())
        .unwrap_err();

    match &err {
        LaunchError::UnrecognizedName { kind, token, .. } => {
            assert_eq!(*kind, NameKind::Application);
            assert_eq!(token, "bogus");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().starts_with("Application not recognized: bogus"));
    assert_eq!(err.stage(), DispatchState::Start);
    assert_eq!(dispatcher.state(), DispatchState::Start);
    assert!(dispatcher.registry().is_empty());
    assert!(profile.calls().is_empty());
    assert!(harness.executed().is_empty());
}

#[test]
fn unknown_backend_is_rejected_before_the_application() {
    init_tracing();
    let harness = RecordingHarness::with_status(0);
    let mut dispatcher = Dispatcher::new(LaunchMode::Multi(BackendCatalog::standard()));

    let err = dispatcher
        .dispatch(argv(&["rdas", "wrf", "bogus"]), harness.factory())
        .unwrap_err();

    assert!(matches!(
        err,
        LaunchError::UnrecognizedName {
            kind: NameKind::Backend,
            ..
        }
    ));
    assert!(err.to_string().contains("fv3jedi, mpasjedi"));
    assert!(harness.executed().is_empty());
}

#[test]
fn missing_application_is_a_usage_error() {
    init_tracing();
    let harness = RecordingHarness::with_status(0);
    let mut dispatcher = Dispatcher::new(LaunchMode::single(MpasJedi));

    let err = dispatcher
        .dispatch(argv(&["prog"]), harness.factory())
        .unwrap_err();

    assert_eq!(err.to_string(), "Usage: prog <application> <options>");
    assert_eq!(err.exit_status(), 2);
    assert!(dispatcher.registry().is_empty());
    assert!(harness.executed().is_empty());
}

#[test]
fn harness_sees_argv_without_resolved_tokens() {
    init_tracing();
    let harness = RecordingHarness::with_status(0);
    let mut dispatcher = Dispatcher::new(LaunchMode::single(Fv3Jedi));
    let original = argv(&["prog", "LocalEnsembleDA", "letkf.json", "letkf.log", "--validate-only"]);

    dispatcher
        .dispatch(original.clone(), harness.factory())
        .unwrap();

    let forwarded = harness.args();
    assert_eq!(forwarded.len(), original.len() - 1);
    assert_eq!(
        forwarded,
        argv(&["prog", "letkf.json", "letkf.log", "--validate-only"])
    );
}
