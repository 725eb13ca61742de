//! Minimal printf-style formatting for user-authored text templates.
//!
//! Supports `%s`, `%f`/`%F`, `%d`/`%i` and `%%` with the `-`, `+`, space and `0` flags, a
//! field width and a precision. Length modifiers (`l`, `h`, `L`) are accepted and ignored.
//! Unknown conversions, and conversions whose width or precision exceeds [`MAX_FIELD`], are
//! copied through verbatim.

use std::{iter::Peekable, str::Chars};

/// Largest accepted field width or precision. Larger conversions are copied through verbatim.
pub const MAX_FIELD: usize = 255;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FormatArg<'a> {
    Float(f64),
    Str(&'a str),
}

#[derive(Clone, Copy, Debug, Default)]
struct Spec {
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
    width: usize,
    precision: Option<usize>,
}

pub fn format_printf(fmt: &str, args: &[FormatArg<'_>]) -> String {
    let mut out = String::with_capacity(fmt.len() + 16);
    let mut args = args.iter().copied();
    let mut chars = fmt.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let mut raw = String::from('%');
        let mut spec = Spec::default();

        while let Some(&f) = chars.peek() {
            match f {
                '-' => spec.left = true,
                '+' => spec.plus = true,
                ' ' => spec.space = true,
                '0' => spec.zero = true,
                '#' => {}
                _ => break,
            }
            raw.push(f);
            chars.next();
        }
        let width = read_field(&mut chars, &mut raw);
        let precision = if chars.peek() == Some(&'.') {
            raw.extend(chars.next());
            read_field(&mut chars, &mut raw).map(Some)
        } else {
            Some(None)
        };
        while matches!(chars.peek(), Some('l' | 'h' | 'L')) {
            raw.extend(chars.next());
        }

        let Some(conv) = chars.next() else {
            out.push_str(&raw);
            break;
        };
        let (Some(width), Some(precision)) = (width, precision) else {
            out.push_str(&raw);
            out.push(conv);
            continue;
        };
        spec.width = width;
        spec.precision = precision;
        match conv {
            '%' => out.push('%'),
            's' => {
                let mut s = args.next().map(arg_to_string).unwrap_or_default();
                if let Some(p) = spec.precision {
                    s = s.chars().take(p).collect();
                }
                pad_text(&mut out, &s, spec);
            }
            'f' | 'F' => {
                let v = args.next().map_or(0.0, arg_to_f64);
                let prec = spec.precision.unwrap_or(6);
                let body = format!("{:.*}", prec, v.abs());
                pad_number(&mut out, v.is_sign_negative() && !v.is_nan(), &body, spec);
            }
            'd' | 'i' => {
                let v = args.next().map_or(0.0, arg_to_f64).trunc();
                let body = format!("{}", v.abs() as i64);
                pad_number(&mut out, v < 0.0, &body, spec);
            }
            other => {
                out.push_str(&raw);
                out.push(other);
            }
        }
    }
    out
}

/// Reads a run of digits; `None` when the value exceeds [`MAX_FIELD`].
fn read_field(chars: &mut Peekable<Chars<'_>>, raw: &mut String) -> Option<usize> {
    let mut value = Some(0usize);
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        value = value
            .and_then(|v| v.checked_mul(10))
            .and_then(|v| v.checked_add(d as usize))
            .filter(|&v| v <= MAX_FIELD);
        raw.extend(chars.next());
    }
    value
}

fn arg_to_string(arg: FormatArg<'_>) -> String {
    match arg {
        FormatArg::Str(s) => s.to_owned(),
        FormatArg::Float(v) => format!("{v}"),
    }
}

fn arg_to_f64(arg: FormatArg<'_>) -> f64 {
    match arg {
        FormatArg::Float(v) => v,
        FormatArg::Str(s) => s.trim().parse().unwrap_or(0.0),
    }
}

fn pad_text(out: &mut String, s: &str, spec: Spec) {
    let len = s.chars().count();
    let fill = spec.width.saturating_sub(len);
    if spec.left {
        out.push_str(s);
        out.extend(std::iter::repeat_n(' ', fill));
    } else {
        out.extend(std::iter::repeat_n(' ', fill));
        out.push_str(s);
    }
}

fn pad_number(out: &mut String, negative: bool, body: &str, spec: Spec) {
    let sign = if negative {
        "-"
    } else if spec.plus {
        "+"
    } else if spec.space {
        " "
    } else {
        ""
    };
    let fill = spec.width.saturating_sub(sign.len() + body.len());
    if spec.left {
        out.push_str(sign);
        out.push_str(body);
        out.extend(std::iter::repeat_n(' ', fill));
    } else if spec.zero {
        out.push_str(sign);
        out.extend(std::iter::repeat_n('0', fill));
        out.push_str(body);
    } else {
        out.extend(std::iter::repeat_n(' ', fill));
        out.push_str(sign);
        out.push_str(body);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/format.rs"]
mod tests;
