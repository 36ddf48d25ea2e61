//! Scalar coercion policy
//!
//! Variables are stored loosely typed (a value loaded from the environment
//! is always a string) but parameters declare an exact primitive kind.
//! Coercion only succeeds when it is lossless and unambiguous; everything
//! else is left untouched so the caller can report the original kind.

use crate::error::{DiError, DiResult};
use crate::value::{Scalar, ScalarKind};

/// Renders a float the way JSON does, keeping a trailing `.0` on whole
/// numbers (`1.0` stays `"1.0"`, never `"1"`).
///
/// Returns `None` for NaN and infinities, which have no JSON rendering.
pub fn render_float(value: f64) -> Option<String> {
	if !value.is_finite() {
		return None;
	}
	serde_json::to_string(&value).ok()
}

/// Applies the policy for `target`, returning the coerced scalar or the
/// input unchanged when the policy rejects it.
pub fn coerce(scalar: Scalar, target: ScalarKind) -> Scalar {
	match target {
		ScalarKind::String => to_string(scalar),
		ScalarKind::Int => to_int(scalar),
		ScalarKind::Float => to_float(scalar),
		ScalarKind::Bool => to_bool(scalar),
	}
}

/// Coerces a variable and verifies the resulting kind.
///
/// # Examples
///
/// ```
/// use autowire_di::coercion::coerce_variable;
/// use autowire_di::{DiError, Scalar, ScalarKind};
///
/// let value = coerce_variable("ratio", Scalar::Float(1.0), ScalarKind::String).unwrap();
/// assert_eq!(value, Scalar::String("1.0".to_string()));
///
/// let error = coerce_variable("count", Scalar::from("00"), ScalarKind::Int).unwrap_err();
/// assert!(matches!(error, DiError::TypeMismatch { .. }));
/// ```
pub fn coerce_variable(name: &str, scalar: Scalar, target: ScalarKind) -> DiResult<Scalar> {
	let coerced = coerce(scalar, target);
	if coerced.kind() == target {
		Ok(coerced)
	} else {
		Err(DiError::TypeMismatch {
			name: name.to_string(),
			expected: target,
			actual: coerced.kind().to_string(),
		})
	}
}

fn to_string(scalar: Scalar) -> Scalar {
	match scalar {
		Scalar::Int(value) => Scalar::String(value.to_string()),
		Scalar::Bool(value) => Scalar::String(value.to_string()),
		Scalar::Float(value) => match render_float(value) {
			Some(rendered) => Scalar::String(rendered),
			None => Scalar::Float(value),
		},
		other => other,
	}
}

fn to_int(scalar: Scalar) -> Scalar {
	match scalar {
		Scalar::Bool(value) => Scalar::Int(i64::from(value)),
		Scalar::String(text) => match canonical_int(&text) {
			Some(value) => Scalar::Int(value),
			None => Scalar::String(text),
		},
		Scalar::Float(value) if is_whole(value) => Scalar::Int(value as i64),
		other => other,
	}
}

fn to_float(scalar: Scalar) -> Scalar {
	match scalar {
		Scalar::Int(value) => Scalar::Float(value as f64),
		Scalar::Bool(value) => Scalar::Float(if value { 1.0 } else { 0.0 }),
		Scalar::String(text) => match canonical_float(&text) {
			Some(value) => Scalar::Float(value),
			None => Scalar::String(text),
		},
		other => other,
	}
}

fn to_bool(scalar: Scalar) -> Scalar {
	match scalar {
		Scalar::Int(0) => Scalar::Bool(false),
		Scalar::Int(1) => Scalar::Bool(true),
		Scalar::String(text) => match text.to_ascii_lowercase().as_str() {
			"false" | "0" | "no" | "off" | "" => Scalar::Bool(false),
			"true" | "1" | "yes" | "on" => Scalar::Bool(true),
			_ => Scalar::String(text),
		},
		other => other,
	}
}

/// Accepts only the exact decimal rendering of an integer.
fn canonical_int(text: &str) -> Option<i64> {
	text.parse::<i64>()
		.ok()
		.filter(|value| value.to_string() == text)
}

/// Accepts a string only if rendering the parsed float reproduces it,
/// with or without the preserved zero fraction (`"1"` and `"1.0"`).
fn canonical_float(text: &str) -> Option<f64> {
	let value = text.parse::<f64>().ok()?;
	let rendered = render_float(value)?;
	let short = rendered.strip_suffix(".0").unwrap_or(&rendered);
	(rendered == text || short == text).then_some(value)
}

fn is_whole(value: f64) -> bool {
	value.is_finite() && value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64
}
