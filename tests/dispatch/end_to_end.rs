use crate::support::{
    helpers::{argv, fixture, init_tracing},
    recording::RecordingHarness,
};
use rdas::{launch, ApplicationName, BackendCatalog, Dispatcher, Fv3Jedi, LaunchMode, MpasJedi};
use std::ffi::OsString;

fn launch_fixture(backend: &str, application: &str, fixture_name: &str) -> i32 {
    let mut args = argv(&["rdas", backend, application]);
    args.push(fixture(fixture_name).into_os_string());
    launch(args, LaunchMode::Multi(BackendCatalog::standard()))
}

#[test]
fn harness_status_is_returned_verbatim() {
    init_tracing();
    for status in [0, 1, 42] {
        let harness = RecordingHarness::with_status(status);
        let mut dispatcher = Dispatcher::new(LaunchMode::single(MpasJedi));
        let returned = dispatcher
            .dispatch(argv(&["prog", "hofx4d", "hofx.json"]), harness.factory())
            .unwrap();

        assert_eq!(returned, status);
        assert_eq!(harness.executed(), vec![ApplicationName::HofX4D]);
    }
}

#[test]
fn launch_validates_a_real_configuration() {
    init_tracing();
    let config = fixture("hofx4d_mpas.json");
    let status = launch(
        argv(&[
            "rdas",
            "mpasjedi",
            "hofx4d",
            config.to_str().unwrap(),
            "--validate-only",
        ]),
        LaunchMode::Multi(BackendCatalog::standard()),
    );
    assert_eq!(status, 0);
}

#[test]
fn launch_runs_hofx4d_to_completion() {
    init_tracing();
    let config = fixture("hofx4d_mpas.json");
    let status = launch(
        argv(&["rdas_mpasjedi", "HofX4D", config.to_str().unwrap()]),
        LaunchMode::single(MpasJedi),
    );
    assert_eq!(status, 0);
}

#[test]
fn launch_rejects_a_model_from_another_backend() {
    init_tracing();
    let config = fixture("hofx4d_fv3_model.json");
    let status = launch(
        argv(&["rdas_mpasjedi", "hofx4d", config.to_str().unwrap(), "--validate-only"]),
        LaunchMode::single(MpasJedi),
    );
    assert_eq!(status, 1);
}

#[test]
fn launch_reports_harness_option_errors() {
    init_tracing();
    let status = launch(
        argv(&["rdas", "fv3jedi", "variational", "--no-such-flag"]),
        LaunchMode::Multi(BackendCatalog::standard()),
    );
    assert_eq!(status, 1);
}

#[test]
fn launch_runs_variational_with_saber_localization() {
    init_tracing();
    assert_eq!(launch_fixture("mpasjedi", "variational", "variational_mpas.json"), 0);
}

#[test]
fn launch_rejects_variational_localization_without_backend_support() {
    init_tracing();
    assert_eq!(launch_fixture("fv3jedi", "variational", "variational_mpas.json"), 1);
}

#[test]
fn launch_runs_local_ensemble_da_with_vertical_localization() {
    init_tracing();
    assert_eq!(
        launch_fixture("fv3jedi", "LocalEnsembleDA", "letkf_fv3.json"),
        0
    );
}

#[test]
fn launch_runs_the_error_covariance_toolbox() {
    init_tracing();
    let status = launch(
        [OsString::from("rdas_fv3jedi"), OsString::from("bump"), fixture("bump_fv3.json").into()],
        LaunchMode::single(Fv3Jedi),
    );
    assert_eq!(status, 0);
}

#[test]
fn launch_runs_convertstate_over_every_pair() {
    init_tracing();
    assert_eq!(launch_fixture("mpasjedi", "convertstate", "convertstate.json"), 0);
}
