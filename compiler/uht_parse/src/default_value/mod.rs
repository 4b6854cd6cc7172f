//! Default-value sanitizing.
//!
//! Parameter defaults are captured as raw tokens. Once the parameter's type
//! is resolved they are replayed here and rewritten into the canonical text
//! stored as `CPP_Default_<Param>` metadata. Anything outside the accepted
//! literal forms yields `None`; the caller reports that as a warning.

use uht_ir::{Token, TokenKind};
use uht_types::PropertyType;

use crate::stream::TokenStream;
use crate::{ParseResult, TokenReplay};

/// Canonical text for a default value of type `ty`, or `None` when the
/// tokens are not a recognized literal form for it.
pub fn sanitize_default(ty: &PropertyType, tokens: &[Token]) -> Option<String> {
    let mut replay = TokenReplay::new(tokens);
    let value = sanitize(ty, &mut replay).ok().flatten()?;
    match replay.at_eof() {
        Ok(true) => Some(value),
        _ => None,
    }
}

fn sanitize(ty: &PropertyType, r: &mut TokenReplay<'_>) -> ParseResult<Option<String>> {
    match ty {
        PropertyType::Bool { .. } => boolean(r),
        PropertyType::Int(_) => Ok(integer(r)?.map(|value| value.to_string())),
        PropertyType::Float | PropertyType::Double => Ok(float(r)?.map(format_float)),
        PropertyType::Str => string(r),
        PropertyType::Name => name(r),
        PropertyType::Text => text(r),
        PropertyType::Enum { name, .. } => enumerator(r, name),
        PropertyType::Object { .. } | PropertyType::Interface { .. } => null(r),
        PropertyType::Struct { name, .. } => structure(r, name),
        _ => Ok(None),
    }
}

fn boolean(r: &mut TokenReplay<'_>) -> ParseResult<Option<String>> {
    let token = r.advance()?;
    Ok(match token.text.as_str() {
        "true" | "false" if token.is_identifier() => Some(token.text),
        _ => None,
    })
}

/// Optionally signed integer literal.
fn integer(r: &mut TokenReplay<'_>) -> ParseResult<Option<i64>> {
    let negative = sign(r)?;
    let Some(value) = r.advance()?.int_value() else {
        return Ok(None);
    };
    Ok(if negative { value.checked_neg() } else { Some(value) })
}

/// Optionally signed float or integer literal.
fn float(r: &mut TokenReplay<'_>) -> ParseResult<Option<f64>> {
    let negative = sign(r)?;
    let token = r.advance()?;
    let value = match token.kind {
        TokenKind::FloatConst => token.text.trim_end_matches(['f', 'F']).parse::<f64>().ok(),
        TokenKind::DecimalConst | TokenKind::HexConst => token
            .int_value()
            .and_then(|v| i32::try_from(v).ok())
            .map(f64::from),
        _ => None,
    };
    Ok(value.map(|v| if negative { -v } else { v }))
}

fn sign(r: &mut TokenReplay<'_>) -> ParseResult<bool> {
    if r.eat_symbol("-")? {
        return Ok(true);
    }
    r.eat_symbol("+")?;
    Ok(false)
}

fn format_float(value: f64) -> String {
    format!("{value:.6}")
}

/// `"x"` or `TEXT("x")`.
fn string_literal(r: &mut TokenReplay<'_>) -> ParseResult<Option<String>> {
    if r.eat_ident("TEXT")? {
        r.expect_symbol("(")?;
        let value = r.advance()?.string_value();
        r.expect_symbol(")")?;
        return Ok(value);
    }
    Ok(r.advance()?.string_value())
}

fn string(r: &mut TokenReplay<'_>) -> ParseResult<Option<String>> {
    if r.eat_ident("FString")? {
        r.expect_symbol("(")?;
        if r.eat_symbol(")")? {
            return Ok(Some(String::new()));
        }
        let value = string_literal(r)?;
        r.expect_symbol(")")?;
        return Ok(value);
    }
    string_literal(r)
}

fn name(r: &mut TokenReplay<'_>) -> ParseResult<Option<String>> {
    if r.eat_ident("NAME_None")? {
        return Ok(Some("None".to_owned()));
    }
    if r.eat_ident("FName")? {
        r.expect_symbol("(")?;
        if r.eat_symbol(")")? {
            return Ok(Some("None".to_owned()));
        }
        let value = string_literal(r)?;
        r.expect_symbol(")")?;
        return Ok(value);
    }
    string_literal(r)
}

/// Empty text, or a localization macro kept in its source form.
fn text(r: &mut TokenReplay<'_>) -> ParseResult<Option<String>> {
    if r.eat_ident("FText")? {
        if r.eat_symbol("::")? {
            r.expect_keyword("GetEmpty")?;
        }
        r.expect_symbol("(")?;
        r.expect_symbol(")")?;
        return Ok(Some(String::new()));
    }
    let keyword = r.advance()?;
    let arity = match keyword.text.as_str() {
        "INVTEXT" => 1,
        "LOCTEXT" => 2,
        "NSLOCTEXT" => 3,
        _ => return Ok(None),
    };
    r.expect_symbol("(")?;
    let mut args = Vec::with_capacity(arity);
    for index in 0..arity {
        if index > 0 {
            r.expect_symbol(",")?;
        }
        let token = r.advance()?;
        if token.kind != TokenKind::StringConst {
            return Ok(None);
        }
        args.push(token.text);
    }
    r.expect_symbol(")")?;
    Ok(Some(format!("{}({})", keyword.text, args.join(", "))))
}

/// `EFoo::Value`, `EFoo::Type::Value` or a bare `Value`.
fn enumerator(r: &mut TokenReplay<'_>, enum_name: &str) -> ParseResult<Option<String>> {
    if r.check_ident(enum_name)? && r.peek_nth(1).is_symbol("::") {
        r.advance()?;
        r.advance()?;
        if r.check_ident("Type")? && r.peek_nth(1).is_symbol("::") {
            r.advance()?;
            r.advance()?;
        }
    }
    let value = r.advance()?;
    Ok(value.is_identifier().then_some(value.text))
}

fn null(r: &mut TokenReplay<'_>) -> ParseResult<Option<String>> {
    let token = r.advance()?;
    Ok(matches!(token.text.as_str(), "nullptr" | "NULL")
        .then(|| "None".to_owned()))
}

fn structure(r: &mut TokenReplay<'_>, struct_name: &str) -> ParseResult<Option<String>> {
    match struct_name {
        "FVector" => vector(r),
        "FVector2D" => vector_2d(r),
        "FRotator" => rotator(r),
        "FLinearColor" => linear_color(r),
        "FColor" => color(r),
        _ => {
            // Only a default-constructed value is accepted for other structs.
            if !r.eat_ident(struct_name)? {
                return Ok(None);
            }
            r.expect_symbol("(")?;
            r.expect_symbol(")")?;
            Ok(Some(String::new()))
        }
    }
}

/// `Type::Constant` or `Type(args)` with every argument numeric.
enum StructValue {
    Constant(String),
    Args(Vec<f64>),
}

fn struct_value(r: &mut TokenReplay<'_>, type_name: &str) -> ParseResult<Option<StructValue>> {
    if !r.eat_ident(type_name)? {
        return Ok(None);
    }
    if r.eat_symbol("::")? {
        return Ok(Some(StructValue::Constant(r.advance()?.text)));
    }
    r.expect_symbol("(")?;
    if is_force_init(r)? {
        r.expect_symbol(")")?;
        return Ok(Some(StructValue::Args(Vec::new())));
    }
    let mut args = Vec::new();
    loop {
        let Some(value) = float(r)? else {
            return Ok(None);
        };
        args.push(value);
        if r.eat_symbol(")")? {
            return Ok(Some(StructValue::Args(args)));
        }
        r.expect_symbol(",")?;
    }
}

/// `ForceInit`, `ForceInitToZero` or `EForceInit::ForceInit`.
fn is_force_init(r: &mut TokenReplay<'_>) -> ParseResult<bool> {
    if r.check_ident("EForceInit")? && r.peek_nth(1).is_symbol("::") {
        r.advance()?;
        r.advance()?;
    }
    Ok(r.eat_ident("ForceInit")? || r.eat_ident("ForceInitToZero")?)
}

fn join_floats(values: &[f64]) -> String {
    values
        .iter()
        .map(|&v| format_float(v))
        .collect::<Vec<_>>()
        .join(",")
}

fn vector(r: &mut TokenReplay<'_>) -> ParseResult<Option<String>> {
    let values = match struct_value(r, "FVector")? {
        Some(StructValue::Constant(name)) => match name.as_str() {
            "ZeroVector" => [0.0, 0.0, 0.0],
            "OneVector" => [1.0, 1.0, 1.0],
            "UpVector" => [0.0, 0.0, 1.0],
            "ForwardVector" => [1.0, 0.0, 0.0],
            "RightVector" => [0.0, 1.0, 0.0],
            _ => return Ok(None),
        },
        Some(StructValue::Args(args)) => match args[..] {
            [] => [0.0, 0.0, 0.0],
            [v] => [v, v, v],
            [x, y, z] => [x, y, z],
            _ => return Ok(None),
        },
        None => return Ok(None),
    };
    Ok(Some(join_floats(&values)))
}

fn vector_2d(r: &mut TokenReplay<'_>) -> ParseResult<Option<String>> {
    let (x, y) = match struct_value(r, "FVector2D")? {
        Some(StructValue::Constant(name)) => match name.as_str() {
            "ZeroVector" => (0.0, 0.0),
            "UnitVector" => (1.0, 1.0),
            _ => return Ok(None),
        },
        Some(StructValue::Args(args)) => match args[..] {
            [] => (0.0, 0.0),
            [x, y] => (x, y),
            _ => return Ok(None),
        },
        None => return Ok(None),
    };
    Ok(Some(format!(
        "(X={},Y={})",
        format_float(x),
        format_float(y)
    )))
}

fn rotator(r: &mut TokenReplay<'_>) -> ParseResult<Option<String>> {
    let values = match struct_value(r, "FRotator")? {
        Some(StructValue::Constant(name)) if name == "ZeroRotator" => [0.0, 0.0, 0.0],
        Some(StructValue::Args(args)) => match args[..] {
            [] => [0.0, 0.0, 0.0],
            [pitch, yaw, roll] => [pitch, yaw, roll],
            _ => return Ok(None),
        },
        _ => return Ok(None),
    };
    Ok(Some(join_floats(&values)))
}

fn linear_color(r: &mut TokenReplay<'_>) -> ParseResult<Option<String>> {
    let [red, green, blue, alpha] = match struct_value(r, "FLinearColor")? {
        Some(StructValue::Constant(name)) => match name.as_str() {
            "White" => [1.0, 1.0, 1.0, 1.0],
            "Black" => [0.0, 0.0, 0.0, 1.0],
            "Transparent" => [0.0, 0.0, 0.0, 0.0],
            _ => return Ok(None),
        },
        Some(StructValue::Args(args)) => match args[..] {
            [] => [0.0, 0.0, 0.0, 0.0],
            [red, green, blue] => [red, green, blue, 1.0],
            [red, green, blue, alpha] => [red, green, blue, alpha],
            _ => return Ok(None),
        },
        None => return Ok(None),
    };
    Ok(Some(format!(
        "(R={},G={},B={},A={})",
        format_float(red),
        format_float(green),
        format_float(blue),
        format_float(alpha)
    )))
}

fn color(r: &mut TokenReplay<'_>) -> ParseResult<Option<String>> {
    if !r.eat_ident("FColor")? {
        return Ok(None);
    }
    if r.eat_symbol("::")? {
        let [red, green, blue, alpha] = match r.advance()?.text.as_str() {
            "White" => [255, 255, 255, 255],
            "Black" => [0, 0, 0, 255],
            "Transparent" => [0, 0, 0, 0],
            _ => return Ok(None),
        };
        return Ok(Some(format!("(R={red},G={green},B={blue},A={alpha})")));
    }
    r.expect_symbol("(")?;
    let mut channels = Vec::with_capacity(4);
    loop {
        match integer(r)? {
            Some(value) if (0..=255).contains(&value) => channels.push(value),
            _ => return Ok(None),
        }
        if r.eat_symbol(")")? {
            break;
        }
        r.expect_symbol(",")?;
    }
    let [red, green, blue, alpha] = match channels[..] {
        [red, green, blue] => [red, green, blue, 255],
        [red, green, blue, alpha] => [red, green, blue, alpha],
        _ => return Ok(None),
    };
    Ok(Some(format!("(R={red},G={green},B={blue},A={alpha})")))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
