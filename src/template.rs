//! printf-style substitution of positional arguments.
//!
//! Arguments are already rendered to strings, so every verb prints its argument as
//! text. `%q` quotes it and `%x` hex-encodes it; the remaining verbs (`%s`, `%v`, `%d`
//! and friends) print it verbatim. Flags `-` and `0`, a width and a precision are
//! honoured.

use std::fmt::Write;

/// Substitute `args` into `template`.
///
/// A verb without an argument renders as `%!v(MISSING)`; arguments left over at the end
/// are appended as `%!(EXTRA a, b)`.
pub fn sprintf(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len() + args.iter().map(String::len).sum::<usize>());
    let mut chars = template.chars().peekable();
    let mut next_arg = 0;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut spec = Spec::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => spec.left = true,
                '0' => spec.zero = true,
                '+' | ' ' | '#' => {}
                _ => break,
            }
            chars.next();
        }
        spec.width = read_number(&mut chars);
        if chars.peek() == Some(&'.') {
            chars.next();
            spec.precision = Some(read_number(&mut chars).unwrap_or(0));
        }

        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };
        if verb == '%' {
            out.push('%');
            continue;
        }

        match args.get(next_arg) {
            Some(arg) => {
                spec.render(&mut out, verb, arg);
                next_arg += 1;
            }
            None => {
                let _ = write!(out, "%!{}(MISSING)", verb);
            }
        }
    }

    if next_arg < args.len() {
        let _ = write!(out, "%!(EXTRA {})", args[next_arg..].join(", "));
    }

    out
}

#[derive(Debug, Default)]
struct Spec {
    left: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

impl Spec {
    fn render(&self, out: &mut String, verb: char, arg: &str) {
        let body = match verb {
            'q' => format!("{:?}", arg),
            'x' => arg.bytes().map(|b| format!("{:02x}", b)).collect(),
            'X' => arg.bytes().map(|b| format!("{:02X}", b)).collect(),
            _ => match self.precision {
                Some(p) => arg.chars().take(p).collect(),
                None => arg.to_string(),
            },
        };

        let len = body.chars().count();
        let pad = self.width.unwrap_or(0).saturating_sub(len);
        if pad == 0 {
            out.push_str(&body);
        } else if self.left {
            out.push_str(&body);
            out.extend(std::iter::repeat_n(' ', pad));
        } else if self.zero {
            // Zeros go after a leading sign.
            let (sign, digits) = match body.strip_prefix('-') {
                Some(rest) => ("-", rest),
                None => ("", body.as_str()),
            };
            out.push_str(sign);
            out.extend(std::iter::repeat_n('0', pad));
            out.push_str(digits);
        } else {
            out.extend(std::iter::repeat_n(' ', pad));
            out.push_str(&body);
        }
    }
}

fn read_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(d as usize));
        chars.next();
    }
    value
}
