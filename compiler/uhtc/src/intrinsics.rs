//! Engine types every header may refer to without declaring them.

/// Path of the built-in header, always header 0 of a session.
pub const INTRINSIC_HEADER: &str = "NoExportTypes.h";

/// Root object, actor and interface classes plus the math structs that
/// default values understand.
pub const INTRINSIC_SOURCE: &str = r#"#include "NoExportTypes.generated.h"

UCLASS(Abstract)
class COREUOBJECT_API UObject
{
	GENERATED_BODY()
};

UINTERFACE()
class COREUOBJECT_API UInterface : public UObject
{
	GENERATED_BODY()
};

class COREUOBJECT_API IInterface
{
	GENERATED_BODY()
};

UCLASS(Abstract, Blueprintable)
class ENGINE_API AActor : public UObject
{
	GENERATED_BODY()
};

UCLASS(Abstract, EditInlineNew)
class ENGINE_API UActorComponent : public UObject
{
	GENERATED_BODY()
};

USTRUCT(Atomic, BlueprintType)
struct FVector
{
	GENERATED_BODY()
	UPROPERTY() double X;
	UPROPERTY() double Y;
	UPROPERTY() double Z;
};

USTRUCT(Atomic, BlueprintType)
struct FVector2D
{
	GENERATED_BODY()
	UPROPERTY() double X;
	UPROPERTY() double Y;
};

USTRUCT(Atomic, BlueprintType)
struct FRotator
{
	GENERATED_BODY()
	UPROPERTY() double Pitch;
	UPROPERTY() double Yaw;
	UPROPERTY() double Roll;
};

USTRUCT(Atomic, BlueprintType)
struct FLinearColor
{
	GENERATED_BODY()
	UPROPERTY() float R;
	UPROPERTY() float G;
	UPROPERTY() float B;
	UPROPERTY() float A;
};

USTRUCT(BlueprintType)
struct FColor
{
	GENERATED_BODY()
	UPROPERTY() uint8 B;
	UPROPERTY() uint8 G;
	UPROPERTY() uint8 R;
	UPROPERTY() uint8 A;
};

USTRUCT()
struct FTableRowBase
{
	GENERATED_BODY()
};
"#;
