use super::*;
use pretty_assertions::assert_eq;

fn classify(text: &str) -> Option<RecordedMatch> {
    let tokens = uht_lexer::lex_fragment(text, 1).unwrap();
    match_declaration(&tokens, "UWidget")
}

#[test]
fn test_default_constructors() {
    assert_eq!(
        classify("UWidget();"),
        Some(RecordedMatch::Constructor(ConstructorFlags::DEFAULT))
    );
    assert_eq!(
        classify("explicit UWidget(void);"),
        Some(RecordedMatch::Constructor(ConstructorFlags::DEFAULT))
    );
}

#[test]
fn test_object_initializer_constructor() {
    assert_eq!(
        classify("UWidget(const FObjectInitializer& ObjectInitializer);"),
        Some(RecordedMatch::Constructor(ConstructorFlags::OBJECT_INITIALIZER))
    );
    assert_eq!(
        classify("UWidget(const FObjectInitializer& Init = FObjectInitializer::Get());"),
        Some(RecordedMatch::Constructor(
            ConstructorFlags::OBJECT_INITIALIZER | ConstructorFlags::DEFAULT
        ))
    );
}

#[test]
fn test_special_constructors() {
    assert_eq!(
        classify("FOO_API UWidget(FVTableHelper& Helper);"),
        Some(RecordedMatch::Constructor(ConstructorFlags::VTABLE_HELPER))
    );
    assert_eq!(
        classify("UWidget(const UWidget& Other) = delete;"),
        Some(RecordedMatch::Constructor(ConstructorFlags::COPY))
    );
    assert_eq!(
        classify("UWidget(UWidget&&);"),
        Some(RecordedMatch::Constructor(ConstructorFlags::COPY))
    );
}

#[test]
fn test_other_constructor_is_ignored() {
    assert_eq!(classify("UWidget(int32 Count);"), None);
    assert_eq!(
        classify("UWidget(int32 Count = 0);"),
        Some(RecordedMatch::Constructor(ConstructorFlags::DEFAULT))
    );
}

#[test]
fn test_serializers() {
    assert_eq!(
        classify("virtual void Serialize(FArchive& Ar) override;"),
        Some(RecordedMatch::Serializer(SerializerArchive::ARCHIVE))
    );
    assert_eq!(
        classify("virtual void Serialize(FStructuredArchive::FRecord Record) override;"),
        Some(RecordedMatch::Serializer(
            SerializerArchive::STRUCTURED_ARCHIVE_RECORD
        ))
    );
    assert_eq!(classify("void Serialize(FArchive& Ar, int32 Version);"), None);
}

#[test]
fn test_lifetime_replicated_props() {
    assert_eq!(
        classify(
            "virtual void GetLifetimeReplicatedProps(TArray<FLifetimeProperty>& OutLifetimeProps) const override;"
        ),
        Some(RecordedMatch::LifetimeReplicatedProps)
    );
}

#[test]
fn test_unrelated_declarations() {
    assert_eq!(classify("int32 NotReflected = 0;"), None);
    assert_eq!(classify("void Tick(float DeltaTime);"), None);
    assert_eq!(classify("friend class UOther;"), None);
    assert_eq!(classify(""), None);
}
