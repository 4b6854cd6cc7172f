use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_default_config() {
    let config = SessionConfig::default();
    assert!(config.editor);
    assert!(config.parallel);
    assert!(!config.warnings_as_errors);
    let parse = config.parse_config();
    assert!(parse.editor);
    assert_eq!(parse.module_kind, ModuleKind::Runtime);
}

#[test]
fn test_header_ids_follow_the_intrinsic_header() {
    let mut session = Session::new(SessionConfig::default());
    assert_eq!(session.headers().len(), 1);
    assert_eq!(session.headers()[0].path, INTRINSIC_HEADER);
    assert_eq!(session.add_header("A.h", ""), HeaderId(1));
    assert_eq!(session.add_header("B.h", ""), HeaderId(2));
    assert!(session.header("B.h").is_some());
}

#[test]
fn test_intrinsics_are_clean() {
    for parallel in [true, false] {
        let mut session = Session::new(SessionConfig {
            parallel,
            ..SessionConfig::default()
        });
        assert_eq!(session.run(), Ok(()));
        assert_eq!(session.take_diagnostics(), []);
        for name in ["UObject", "AActor", "UInterface", "IInterface", "FVector", "FColor"] {
            assert!(session.types().contains(name), "{name} missing");
        }
    }
}

#[test]
fn test_phase_names() {
    assert_eq!(Phase::BindBases.to_string(), "bind bases");
    let err = SessionError {
        phase: Phase::Validate,
        errors: 2,
    };
    assert_eq!(err.to_string(), "2 errors after validate");
}

#[test]
fn test_barrier_stops_the_run() {
    let mut session = Session::new(SessionConfig::default());
    session.add_header(
        "Broken.h",
        "#include \"Broken.generated.h\"\nUCLASS() class UBroken : public UObject { };\n",
    );
    let err = session.run().unwrap_err();
    assert_eq!(err.phase, Phase::Parse);
    assert_eq!(err.errors, 1);
    // Binding never ran.
    let broken = session.header("Broken.h").unwrap();
    let id = session.types().lookup("UBroken").unwrap().id;
    assert_eq!(broken.node(id.node).as_class().unwrap().super_type, None);
}
