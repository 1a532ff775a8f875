// SPDX-License-Identifier: MPL-2.0
//! `{name}`-style substitution.

use super::{percent, FormatArg, FormatError, NamedArgs};

pub(super) fn apply(template: &str, named: &NamedArgs) -> Result<String, FormatError> {
    if !template.contains(['{', '}']) {
        return Ok(template.to_string());
    }

    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut field = String::new();
                let mut closed = false;
                for f in chars.by_ref() {
                    match f {
                        '}' => {
                            closed = true;
                            break;
                        }
                        '{' => return Err(FormatError::UnbalancedBrace),
                        _ => field.push(f),
                    }
                }
                if !closed {
                    return Err(FormatError::UnbalancedBrace);
                }
                out.push_str(&render_field(&field, named)?);
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(FormatError::UnbalancedBrace);
                }
            }
            _ => out.push(c),
        }
    }
    Ok(out)
}

fn render_field(field: &str, named: &NamedArgs) -> Result<String, FormatError> {
    let (head, spec) = match field.split_once(':') {
        Some((head, spec)) => (head, Some(spec)),
        None => (field, None),
    };
    let (name, conversion) = match head.split_once('!') {
        Some((name, conversion)) => (name, Some(conversion)),
        None => (head, None),
    };

    let value = named
        .get(name)
        .ok_or_else(|| FormatError::MissingNamed(name.to_string()))?;

    let value = match conversion {
        None | Some("s") => value.clone(),
        Some("r") => match value {
            FormatArg::Str(s) => FormatArg::Str(format!("{:?}", s)),
            other => other.clone(),
        },
        Some(other) => return Err(FormatError::InvalidSpec(format!("!{other}"))),
    };

    match spec {
        Some(raw) if !raw.is_empty() => FieldSpec::parse(raw)?.render(&value, raw),
        _ => Ok(value.to_string()),
    }
}

/// `[[fill]align][sign][#][0][width][grouping][.precision][type]`
///
/// Alignments are `<`, `>`, `^` and `=` (pad after the sign). Types are
/// `s` for strings, `d n b o x X c` for integers and `e E f F g G n %` for
/// integers and floats.
#[derive(Debug, Clone, Copy, Default)]
struct FieldSpec {
    fill: Option<char>,
    align: Option<char>,
    sign: Option<char>,
    alt: bool,
    zero: bool,
    width: usize,
    grouping: Option<char>,
    precision: Option<usize>,
    kind: Option<char>,
}

impl FieldSpec {
    fn parse(raw: &str) -> Result<Self, FormatError> {
        let chars: Vec<char> = raw.chars().collect();
        let invalid = || FormatError::InvalidSpec(raw.to_string());
        let is_align = |c: char| matches!(c, '<' | '>' | '^' | '=');
        let mut spec = FieldSpec::default();

        let mut i = 0;
        if chars.len() >= 2 && is_align(chars[1]) {
            spec.fill = Some(chars[0]);
            spec.align = Some(chars[1]);
            i = 2;
        } else if chars.first().copied().is_some_and(is_align) {
            spec.align = Some(chars[0]);
            i = 1;
        }

        if let Some(&sign @ ('+' | '-' | ' ')) = chars.get(i) {
            spec.sign = Some(sign);
            i += 1;
        }
        if chars.get(i) == Some(&'#') {
            spec.alt = true;
            i += 1;
        }
        if chars.get(i) == Some(&'0') {
            spec.zero = true;
            i += 1;
        }

        let (width, next) = digits(&chars, i);
        spec.width = width.unwrap_or(0);
        i = next;

        if let Some(&sep @ (',' | '_')) = chars.get(i) {
            spec.grouping = Some(sep);
            i += 1;
        }

        if chars.get(i) == Some(&'.') {
            let (precision, next) = digits(&chars, i + 1);
            spec.precision = Some(precision.ok_or_else(invalid)?);
            i = next;
        }

        if let Some(&kind) = chars.get(i) {
            if !"sdnboxXceEfFgG%".contains(kind) {
                return Err(invalid());
            }
            spec.kind = Some(kind);
            i += 1;
        }

        if i != chars.len() {
            return Err(invalid());
        }
        Ok(spec)
    }

    fn render(&self, value: &FormatArg, raw: &str) -> Result<String, FormatError> {
        let invalid = || FormatError::InvalidSpec(raw.to_string());
        let (lead, body, numeric) = match value {
            FormatArg::Str(s) => (String::new(), self.text(s).ok_or_else(invalid)?, false),
            FormatArg::Int(v) => {
                let (lead, body) = self.integer(*v).ok_or_else(invalid)?;
                (lead, body, true)
            }
            FormatArg::Bool(v) => {
                let (lead, body) = self.integer(i64::from(*v)).ok_or_else(invalid)?;
                (lead, body, true)
            }
            FormatArg::Float(v) => {
                let (lead, body) = self.float(*v).ok_or_else(invalid)?;
                (lead, body, true)
            }
        };
        Ok(self.pad(&lead, &body, numeric))
    }

    fn text(&self, value: &str) -> Option<String> {
        let plain = self.sign.is_none() && !self.alt && self.grouping.is_none();
        if !plain || self.align == Some('=') || !matches!(self.kind, None | Some('s')) {
            return None;
        }
        Some(match self.precision {
            Some(p) => value.chars().take(p).collect(),
            None => value.to_string(),
        })
    }

    fn integer(&self, value: i64) -> Option<(String, String)> {
        let kind = self.kind.unwrap_or('d');
        if !matches!(kind, 'd' | 'n' | 'b' | 'o' | 'x' | 'X' | 'c') {
            return self.float(value as f64);
        }
        if self.precision.is_some() {
            return None;
        }

        let magnitude = value.unsigned_abs();
        let (digits, prefix) = match kind {
            'b' => (format!("{:b}", magnitude), "0b"),
            'o' => (format!("{:o}", magnitude), "0o"),
            'x' => (format!("{:x}", magnitude), "0x"),
            'X' => (format!("{:X}", magnitude), "0X"),
            'c' => {
                let ch = u32::try_from(value).ok().and_then(char::from_u32)?;
                return Some((String::new(), ch.to_string()));
            }
            _ => (magnitude.to_string(), ""),
        };
        let digits = match (self.grouping, kind) {
            (None, _) => digits,
            (Some(sep), 'd' | 'n') => group_digits(&digits, sep, 3),
            (Some('_'), _) => group_digits(&digits, '_', 4),
            _ => return None,
        };

        let mut lead = self.sign_for(value < 0).to_string();
        if self.alt {
            lead.push_str(prefix);
        }
        Some((lead, digits))
    }

    fn float(&self, value: f64) -> Option<(String, String)> {
        if matches!(self.kind, Some('s' | 'd' | 'b' | 'o' | 'x' | 'X' | 'c')) {
            return None;
        }
        let upper = self.kind.is_some_and(|k| k.is_ascii_uppercase());
        let magnitude = value.abs();

        let body = if !value.is_finite() {
            let word = match (value.is_nan(), upper) {
                (true, false) => "nan",
                (true, true) => "NAN",
                (false, false) => "inf",
                (false, true) => "INF",
            };
            if self.kind == Some('%') {
                format!("{word}%")
            } else {
                word.to_string()
            }
        } else {
            match self.kind {
                Some('f' | 'F') => format!("{:.*}", self.precision.unwrap_or(6), magnitude),
                Some('e' | 'E') => percent::exponent(magnitude, self.precision.unwrap_or(6), upper),
                Some('g' | 'G' | 'n') => {
                    percent::general(magnitude, self.precision.unwrap_or(6), upper, self.alt)
                }
                Some('%') => format!("{:.*}%", self.precision.unwrap_or(6), magnitude * 100.0),
                None => match self.precision {
                    Some(p) => shortest(magnitude, p, self.alt),
                    None => super::float_repr(magnitude),
                },
                Some(_) => return None,
            }
        };

        let body = match self.grouping {
            Some(sep) if value.is_finite() => group_digits(&body, sep, 3),
            _ => body,
        };
        let negative = value.is_sign_negative() && !value.is_nan();
        Some((self.sign_for(negative).to_string(), body))
    }

    fn sign_for(&self, negative: bool) -> &'static str {
        match (negative, self.sign) {
            (true, _) => "-",
            (false, Some('+')) => "+",
            (false, Some(' ')) => " ",
            _ => "",
        }
    }

    fn pad(&self, lead: &str, body: &str, numeric: bool) -> String {
        let len = lead.chars().count() + body.chars().count();
        if self.width <= len {
            return format!("{lead}{body}");
        }
        let fill = self.width - len;
        let fill_char = self.fill.unwrap_or(if self.zero { '0' } else { ' ' });
        let repeat = |n: usize| fill_char.to_string().repeat(n);
        let align = self.align.unwrap_or(match (numeric, self.zero) {
            (true, true) => '=',
            (true, false) => '>',
            (false, _) => '<',
        });
        match align {
            '<' => format!("{lead}{body}{}", repeat(fill)),
            '^' => format!("{}{lead}{body}{}", repeat(fill / 2), repeat(fill - fill / 2)),
            '=' => format!("{lead}{}{body}", repeat(fill)),
            _ => format!("{}{lead}{body}", repeat(fill)),
        }
    }
}

/// `precision` significant digits; like `g`, but fixed-point output keeps at
/// least one fractional digit and exponents start at `precision - 1`.
fn shortest(value: f64, precision: usize, alt: bool) -> String {
    let significant = precision.max(1);
    let exp = percent::decimal_exponent(value, significant);
    let limit = i32::try_from(significant).unwrap_or(i32::MAX);

    if exp < -4 || exp >= limit - 1 {
        let formatted = percent::exponent(value, significant - 1, false);
        if alt {
            return formatted;
        }
        return match formatted.split_once('e') {
            Some((mantissa, rest)) => format!("{}e{rest}", percent::strip_zeros(mantissa)),
            None => formatted,
        };
    }

    let decimals = usize::try_from(limit - 1 - exp).unwrap_or(0);
    let formatted = format!("{:.*}", decimals, value);
    let trimmed = if alt {
        formatted
    } else {
        percent::strip_zeros(&formatted)
    };
    if trimmed.contains('.') {
        trimmed
    } else {
        format!("{trimmed}.0")
    }
}

/// Inserts `sep` every `size` digits into the leading run of digits.
fn group_digits(body: &str, sep: char, size: usize) -> String {
    let end = body
        .find(|c: char| !c.is_ascii_hexdigit() || (size == 3 && !c.is_ascii_digit()))
        .unwrap_or(body.len());
    let (digits, rest) = body.split_at(end);

    let mut out = String::with_capacity(body.len() + digits.len() / size);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % size == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out.push_str(rest);
    out
}

fn digits(chars: &[char], start: usize) -> (Option<usize>, usize) {
    let mut i = start;
    let mut value: Option<usize> = None;
    while let Some(d) = chars.get(i).and_then(|c| c.to_digit(10)) {
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(d as usize));
        i += 1;
    }
    (value, i)
}
