use crate::support::{
    helpers::{argv, init_tracing},
    recording::{RecordingHarness, RecordingProfile},
};
use rdas::registry::{apply_step, RegistrationPlan};
use rdas::{
    register_capabilities, ApplicationName, CapabilityKind, CapabilityRegistry, DispatchState,
    Dispatcher, Fv3Jedi, LaunchError, LaunchMode, MpasJedi, RegistrationStep, RegistryError,
};
use std::sync::Arc;

fn dispatch_counting(profile: &RecordingProfile, application: &str) -> Vec<&'static str> {
    let harness = RecordingHarness::with_status(0);
    let mut dispatcher = Dispatcher::new(LaunchMode::Single(Arc::new(profile.clone())));
    dispatcher
        .dispatch(argv(&["prog", application, "cfg.json"]), harness.factory())
        .unwrap();
    profile.calls()
}

#[test]
fn local_ensemble_da_adds_obs_localizations() {
    init_tracing();
    let profile = RecordingProfile::new(Fv3Jedi);
    let calls = dispatch_counting(&profile, "localensembleda");
    assert_eq!(
        calls,
        vec![
            "models",
            "covariances",
            "obs errors",
            "obs filters",
            "obs localizations"
        ]
    );
}

#[test]
fn convert_state_binds_only_the_unconditional_steps() {
    init_tracing();
    let profile = RecordingProfile::new(MpasJedi);
    let calls = dispatch_counting(&profile, "convertstate");
    assert_eq!(calls, vec!["models", "covariances", "obs errors", "obs filters"]);
}

#[test]
fn variational_localization_depends_on_the_backend() {
    init_tracing();
    let fv3 = RecordingProfile::new(Fv3Jedi);
    assert_eq!(dispatch_counting(&fv3, "variational").len(), 4);

    let mpas = RecordingProfile::new(MpasJedi);
    let calls = dispatch_counting(&mpas, "variational");
    assert_eq!(calls.len(), 5);
    assert_eq!(calls.last(), Some(&"localizations"));
}

#[test]
fn registry_holds_what_the_plan_asked_for() {
    init_tracing();
    let mut registry = CapabilityRegistry::new();
    let summary =
        register_capabilities(&Fv3Jedi, ApplicationName::LocalEnsembleDa, &mut registry).unwrap();

    assert_eq!(
        summary.applied,
        RegistrationPlan::for_application(ApplicationName::LocalEnsembleDa).steps()
    );
    assert!(registry.contains(CapabilityKind::Model, "FV3LM"));
    assert!(registry.contains(CapabilityKind::ObsLocalization, "Horizontal Gaspari-Cohn"));
    assert_eq!(registry.count(CapabilityKind::Localization), 0);
}

#[test]
fn repeating_a_step_is_a_no_op() {
    init_tracing();
    let mut registry = CapabilityRegistry::new();
    register_capabilities(&MpasJedi, ApplicationName::Variational, &mut registry).unwrap();
    let before = registry.len();
    let models = registry.names(CapabilityKind::Model).join(",");

    for step in [RegistrationStep::Models, RegistrationStep::ObsFilters] {
        apply_step(&MpasJedi, step, &mut registry).unwrap();
    }
    register_capabilities(&MpasJedi, ApplicationName::Variational, &mut registry).unwrap();

    assert_eq!(registry.len(), before);
    assert_eq!(registry.names(CapabilityKind::Model).join(","), models);
}

#[test]
fn backends_keep_their_own_model_bindings() {
    init_tracing();
    let mut fv3 = CapabilityRegistry::new();
    register_capabilities(&Fv3Jedi, ApplicationName::HofX4D, &mut fv3).unwrap();
    let mut mpas = CapabilityRegistry::new();
    register_capabilities(&MpasJedi, ApplicationName::HofX4D, &mut mpas).unwrap();

    assert!(fv3.contains(CapabilityKind::Model, "FV3LM"));
    assert!(!fv3.contains(CapabilityKind::Model, "MPAS"));
    assert!(mpas.contains(CapabilityKind::Model, "MPAS"));
    assert!(!mpas.contains(CapabilityKind::Model, "FV3LM"));
}

#[test]
fn two_products_under_one_name_abort_dispatch() {
    init_tracing();
    let profile = RecordingProfile::new(Fv3Jedi).with_shadow_model();
    let harness = RecordingHarness::with_status(0);
    let mut dispatcher = Dispatcher::new(LaunchMode::Single(Arc::new(profile.clone())));

    let err = dispatcher
        .dispatch(argv(&["prog", "hofx4d", "cfg.json"]), harness.factory())
        .unwrap_err();

    match &err {
        LaunchError::RegistrationConflict(RegistryError::Conflict { kind, name, .. }) => {
            assert_eq!(*kind, CapabilityKind::Model);
            assert_eq!(name, "FV3LM");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.stage(), DispatchState::ArgsValidated);
    assert_eq!(err.exit_status(), 1);
    assert!(err.to_string().contains("FV3LM"));
    assert_eq!(dispatcher.state(), DispatchState::ArgsValidated);
    assert_eq!(profile.calls(), vec!["models"]);
    assert!(harness.executed().is_empty());
}
