// SPDX-License-Identifier: MPL-2.0
//! `%`-style positional substitution.
//!
//! Supported: `%[flags][width][.precision]type` with flags `-`, `0`, `+`,
//! space and `#`, length modifiers `h`/`l`/`L` (ignored), and the types
//! `s r d i u f F e E g G x X o c`. `%%` is a literal percent sign.

use super::{FormatArg, FormatError};
use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Default, Clone, Copy)]
struct Spec {
    left: bool,
    zero: bool,
    plus: bool,
    space: bool,
    alt: bool,
    width: usize,
    precision: Option<usize>,
}

pub(super) fn apply(template: &str, args: &[FormatArg]) -> Result<String, FormatError> {
    if !template.contains('%') {
        return Ok(template.to_string());
    }

    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut consumed = 0usize;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let spec = read_spec(&mut chars);
        let conversion = chars.next().ok_or(FormatError::IncompleteSpec)?;
        if conversion == '%' {
            out.push('%');
            continue;
        }
        if !"srdiufFeEgGxXoc".contains(conversion) {
            return Err(FormatError::UnsupportedConversion(conversion));
        }

        let arg = args.get(consumed).ok_or(FormatError::NotEnoughArguments)?;
        consumed += 1;
        out.push_str(&convert(conversion, arg, spec)?);
    }

    // Templates that take no arguments ignore whatever was passed.
    if consumed > 0 && consumed < args.len() {
        return Err(FormatError::TooManyArguments);
    }
    Ok(out)
}

fn read_spec(chars: &mut Peekable<Chars<'_>>) -> Spec {
    let mut spec = Spec::default();
    while let Some(&flag) = chars.peek() {
        match flag {
            '-' => spec.left = true,
            '0' => spec.zero = true,
            '+' => spec.plus = true,
            ' ' => spec.space = true,
            '#' => spec.alt = true,
            _ => break,
        }
        chars.next();
    }
    spec.width = read_number(chars).unwrap_or(0);
    if chars.peek() == Some(&'.') {
        chars.next();
        spec.precision = Some(read_number(chars).unwrap_or(0));
    }
    while matches!(chars.peek(), Some('h' | 'l' | 'L')) {
        chars.next();
    }
    spec
}

fn read_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        let current = value.unwrap_or(0);
        value = Some(current.saturating_mul(10).saturating_add(digit as usize));
        chars.next();
    }
    value
}

fn convert(conversion: char, arg: &FormatArg, spec: Spec) -> Result<String, FormatError> {
    match conversion {
        's' | 'r' => {
            let mut body = if conversion == 'r' {
                repr(arg)
            } else {
                arg.to_string()
            };
            if let Some(precision) = spec.precision {
                body = body.chars().take(precision).collect();
            }
            Ok(pad("", &body, spec, false))
        }
        'd' | 'i' | 'u' => {
            let value = as_int(conversion, arg)?;
            let digits = zero_extend(value.unsigned_abs().to_string(), spec.precision);
            Ok(pad(sign(value < 0, spec), &digits, spec, true))
        }
        'x' | 'X' | 'o' => {
            let value = as_integral(conversion, arg)?;
            let magnitude = value.unsigned_abs();
            let (digits, prefix) = match conversion {
                'x' => (format!("{:x}", magnitude), "0x"),
                'X' => (format!("{:X}", magnitude), "0X"),
                _ => (format!("{:o}", magnitude), "0o"),
            };
            let digits = zero_extend(digits, spec.precision);
            let mut lead = sign(value < 0, spec).to_string();
            if spec.alt {
                lead.push_str(prefix);
            }
            Ok(pad(&lead, &digits, spec, true))
        }
        'f' | 'F' | 'e' | 'E' | 'g' | 'G' => {
            let value = as_float(conversion, arg)?;
            let upper = conversion.is_ascii_uppercase();
            if !value.is_finite() {
                let body = match (value.is_nan(), upper) {
                    (true, false) => "nan",
                    (true, true) => "NAN",
                    (false, false) => "inf",
                    (false, true) => "INF",
                };
                let negative = value.is_infinite() && value < 0.0;
                let spec = Spec { zero: false, ..spec };
                return Ok(pad(sign(negative, spec), body, spec, true));
            }
            let precision = spec.precision.unwrap_or(6);
            let magnitude = value.abs();
            let body = match conversion {
                'f' | 'F' => format!("{:.*}", precision, magnitude),
                'e' | 'E' => exponent(magnitude, precision, upper),
                _ => general(magnitude, precision, upper, spec.alt),
            };
            Ok(pad(sign(value.is_sign_negative() && value != 0.0, spec), &body, spec, true))
        }
        'c' => {
            let ch = match arg {
                FormatArg::Int(v) => u32::try_from(*v).ok().and_then(char::from_u32),
                FormatArg::Str(s) if s.chars().count() == 1 => s.chars().next(),
                _ => None,
            };
            let ch = ch.ok_or(FormatError::TypeMismatch {
                conversion,
                found: arg.kind(),
            })?;
            Ok(pad("", &ch.to_string(), spec, false))
        }
        other => Err(FormatError::UnsupportedConversion(other)),
    }
}

fn repr(arg: &FormatArg) -> String {
    match arg {
        FormatArg::Str(s) => format!("{:?}", s),
        other => other.to_string(),
    }
}

fn as_int(conversion: char, arg: &FormatArg) -> Result<i64, FormatError> {
    match arg {
        FormatArg::Int(v) => Ok(*v),
        FormatArg::Bool(v) => Ok(i64::from(*v)),
        FormatArg::Float(v) if v.is_finite() => Ok(v.trunc() as i64),
        other => Err(FormatError::TypeMismatch {
            conversion,
            found: other.kind(),
        }),
    }
}

fn as_integral(conversion: char, arg: &FormatArg) -> Result<i64, FormatError> {
    match arg {
        FormatArg::Int(v) => Ok(*v),
        FormatArg::Bool(v) => Ok(i64::from(*v)),
        other => Err(FormatError::TypeMismatch {
            conversion,
            found: other.kind(),
        }),
    }
}

fn as_float(conversion: char, arg: &FormatArg) -> Result<f64, FormatError> {
    match arg {
        FormatArg::Float(v) => Ok(*v),
        FormatArg::Int(v) => Ok(*v as f64),
        FormatArg::Bool(v) => Ok(if *v { 1.0 } else { 0.0 }),
        other => Err(FormatError::TypeMismatch {
            conversion,
            found: other.kind(),
        }),
    }
}

fn sign(negative: bool, spec: Spec) -> &'static str {
    if negative {
        "-"
    } else if spec.plus {
        "+"
    } else if spec.space {
        " "
    } else {
        ""
    }
}

fn zero_extend(digits: String, precision: Option<usize>) -> String {
    match precision {
        Some(min) if digits.len() < min => format!("{}{}", "0".repeat(min - digits.len()), digits),
        _ => digits,
    }
}

fn pad(lead: &str, body: &str, spec: Spec, numeric: bool) -> String {
    let len = lead.chars().count() + body.chars().count();
    if spec.width <= len {
        return format!("{lead}{body}");
    }
    let fill = spec.width - len;
    if spec.left {
        format!("{lead}{body}{}", " ".repeat(fill))
    } else if spec.zero && numeric {
        format!("{lead}{}{body}", "0".repeat(fill))
    } else {
        format!("{}{lead}{body}", " ".repeat(fill))
    }
}

/// Scientific notation with a signed, at-least-two-digit exponent.
pub(super) fn exponent(value: f64, precision: usize, upper: bool) -> String {
    let raw = format!("{:.*e}", precision, value);
    let (mantissa, exp) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let marker = if upper { 'E' } else { 'e' };
    let exp_sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}{marker}{exp_sign}{:02}", exp.unsigned_abs())
}

/// Decimal exponent of `value` once rounded to `significant` digits.
pub(super) fn decimal_exponent(value: f64, significant: usize) -> i32 {
    if value == 0.0 {
        return 0;
    }
    let rounded = format!("{:.*e}", significant.max(1) - 1, value);
    rounded
        .split_once('e')
        .and_then(|(_, e)| e.parse::<i32>().ok())
        .unwrap_or(0)
}

pub(super) fn general(value: f64, precision: usize, upper: bool, alt: bool) -> String {
    let significant = precision.max(1);
    let exp = decimal_exponent(value, significant);
    let limit = i32::try_from(significant).unwrap_or(i32::MAX);

    if exp < -4 || exp >= limit {
        let formatted = exponent(value, significant - 1, upper);
        if alt {
            return formatted;
        }
        let marker = if upper { 'E' } else { 'e' };
        match formatted.split_once(marker) {
            Some((mantissa, rest)) => format!("{}{marker}{rest}", strip_zeros(mantissa)),
            None => formatted,
        }
    } else {
        let decimals = usize::try_from(limit - 1 - exp).unwrap_or(0);
        let formatted = format!("{:.*}", decimals, value);
        if alt {
            formatted
        } else {
            strip_zeros(&formatted)
        }
    }
}

pub(super) fn strip_zeros(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(template: &str, args: &[FormatArg]) -> Result<String, FormatError> {
        apply(template, args)
    }

    #[test]
    fn string_and_integer_conversions() {
        let args = [FormatArg::from("Lix"), FormatArg::from(3)];
        assert_eq!(fmt("%s has %d messages", &args).unwrap(), "Lix has 3 messages");
    }

    #[test]
    fn literal_percent_is_unescaped() {
        assert_eq!(fmt("100%% done", &[]).unwrap(), "100% done");
    }

    #[test]
    fn width_and_alignment() {
        assert_eq!(fmt("[%5s]", &[FormatArg::from("ab")]).unwrap(), "[   ab]");
        assert_eq!(fmt("[%-5s]", &[FormatArg::from("ab")]).unwrap(), "[ab   ]");
        assert_eq!(fmt("[%05d]", &[FormatArg::from(-42)]).unwrap(), "[-0042]");
        assert_eq!(fmt("[%+d]", &[FormatArg::from(7)]).unwrap(), "[+7]");
    }

    #[test]
    fn float_conversions() {
        assert_eq!(fmt("%.2f", &[FormatArg::from(3.14159)]).unwrap(), "3.14");
        assert_eq!(fmt("%f", &[FormatArg::from(1)]).unwrap(), "1.000000");
        assert_eq!(fmt("%e", &[FormatArg::from(1500.0)]).unwrap(), "1.500000e+03");
        assert_eq!(fmt("%g", &[FormatArg::from(0.0001)]).unwrap(), "0.0001");
        assert_eq!(fmt("%g", &[FormatArg::from(1234567.0)]).unwrap(), "1.23457e+06");
        assert_eq!(fmt("%g", &[FormatArg::from(2.5)]).unwrap(), "2.5");
    }

    #[test]
    fn hex_and_octal() {
        assert_eq!(fmt("%x", &[FormatArg::from(255)]).unwrap(), "ff");
        assert_eq!(fmt("%#X", &[FormatArg::from(255)]).unwrap(), "0XFF");
        assert_eq!(fmt("%o", &[FormatArg::from(8)]).unwrap(), "10");
    }

    #[test]
    fn precision_truncates_strings() {
        assert_eq!(fmt("%.3s", &[FormatArg::from("abcdef")]).unwrap(), "abc");
    }

    #[test]
    fn char_conversion() {
        assert_eq!(fmt("%c", &[FormatArg::from(65)]).unwrap(), "A");
        assert_eq!(fmt("%c", &[FormatArg::from("z")]).unwrap(), "z");
    }

    #[test]
    fn too_few_arguments_fail() {
        assert_eq!(
            fmt("%s %s", &[FormatArg::from("a")]),
            Err(FormatError::NotEnoughArguments)
        );
    }

    #[test]
    fn too_many_arguments_fail() {
        let args = [FormatArg::from("a"), FormatArg::from("b")];
        assert_eq!(fmt("%s", &args), Err(FormatError::TooManyArguments));
    }

    #[test]
    fn template_without_conversions_ignores_arguments() {
        let args = [FormatArg::from("a")];
        assert_eq!(fmt("no placeholders", &args).unwrap(), "no placeholders");
        assert_eq!(fmt("50%% off", &args).unwrap(), "50% off");
    }

    #[test]
    fn numeric_conversion_rejects_strings() {
        assert_eq!(
            fmt("%d", &[FormatArg::from("x")]),
            Err(FormatError::TypeMismatch {
                conversion: 'd',
                found: "string"
            })
        );
        assert_eq!(
            fmt("%x", &[FormatArg::from(1.5)]),
            Err(FormatError::TypeMismatch {
                conversion: 'x',
                found: "float"
            })
        );
    }

    #[test]
    fn trailing_percent_is_incomplete() {
        assert_eq!(fmt("oops %", &[]), Err(FormatError::IncompleteSpec));
    }

    #[test]
    fn unknown_conversion_is_rejected() {
        assert_eq!(
            fmt("%y", &[FormatArg::from(1)]),
            Err(FormatError::UnsupportedConversion('y'))
        );
    }
}
