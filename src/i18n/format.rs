//! printf-style formatting of translation templates.
//!
//! Templates use `%[flags][width][.precision]verb` directives that consume
//! arguments positionally. Mismatches never fail, they are written into the
//! output as diagnostics:
//!
//! - missing argument: `%!d(MISSING)`
//! - verb does not fit the argument, or unknown verb: `%!d(string=foo)`
//! - template ends in a lone `%`: `%!(NOVERB)`
//! - width or precision above 1e6: `%!(BADWIDTH)` / `%!(BADPREC)`, the
//!   directive is then formatted without it
//! - unused arguments: `%!(EXTRA string=foo, int=1)` appended at the end

use regex::{Captures, Regex};
use std::fmt;
use std::sync::OnceLock;

/// A positional argument for a translation template.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
}

impl FormatArg {
    fn type_name(&self) -> &'static str {
        match self {
            FormatArg::Str(_) => "string",
            FormatArg::Int(_) => "int",
            FormatArg::Uint(_) => "uint",
            FormatArg::Float(_) => "float64",
            FormatArg::Bool(_) => "bool",
        }
    }
}

/// Default (`%v`) representation.
impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatArg::Str(s) => f.write_str(s),
            FormatArg::Int(i) => write!(f, "{}", i),
            FormatArg::Uint(u) => write!(f, "{}", u),
            FormatArg::Float(x) => {
                let (sign, body) = float_parts(*x, 'g', None, &Directive::default());
                write!(f, "{}{}", sign, body)
            }
            FormatArg::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        FormatArg::Str(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        FormatArg::Str(value)
    }
}

impl From<&String> for FormatArg {
    fn from(value: &String) -> Self {
        FormatArg::Str(value.clone())
    }
}

impl From<char> for FormatArg {
    fn from(value: char) -> Self {
        FormatArg::Str(value.to_string())
    }
}

impl From<bool> for FormatArg {
    fn from(value: bool) -> Self {
        FormatArg::Bool(value)
    }
}

macro_rules! impl_from_number {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for FormatArg {
                fn from(value: $source) -> Self {
                    FormatArg::$variant(value as $target)
                }
            }
        )+
    };
}

impl_from_number!(Int as i64: i8, i16, i32, i64, isize);
impl_from_number!(Uint as u64: u8, u16, u32, u64, usize);
impl_from_number!(Float as f64: f32, f64);

/// Largest width or precision a template may request.
const MAX_WIDTH: usize = 1_000_000;

/// Parsed flags, width and precision of one directive.
#[derive(Debug, Default)]
struct Directive {
    minus: bool,
    plus: bool,
    space: bool,
    zero: bool,
    sharp: bool,
    width: Option<usize>,
    precision: Option<usize>,
    bad_width: bool,
    bad_precision: bool,
}

impl Directive {
    fn from_captures(cap: &Captures<'_>) -> Self {
        let flags = cap.get(1).map_or("", |m| m.as_str());
        let width_digits = cap.get(2).map_or("", |m| m.as_str());
        let width = bounded(width_digits);

        // "%.f" means precision zero
        let precision_digits = cap.get(3).map(|m| m.as_str());
        let precision = precision_digits.map(|digits| {
            if digits.is_empty() {
                Some(0)
            } else {
                bounded(digits)
            }
        });

        Self {
            minus: flags.contains('-'),
            plus: flags.contains('+'),
            space: flags.contains(' '),
            zero: flags.contains('0'),
            sharp: flags.contains('#'),
            width,
            precision: precision.flatten(),
            bad_width: !width_digits.is_empty() && width.is_none(),
            bad_precision: matches!(precision, Some(None)),
        }
    }

    fn sign(&self, negative: bool) -> &'static str {
        if negative {
            "-"
        } else if self.plus {
            "+"
        } else if self.space {
            " "
        } else {
            ""
        }
    }

    /// Apply width padding. Zero padding goes after the sign and only for numbers.
    fn pad(&self, sign: &str, body: &str, numeric: bool) -> String {
        let len = sign.chars().count() + body.chars().count();
        let fill = self.width.unwrap_or(0).saturating_sub(len);

        if fill == 0 {
            format!("{}{}", sign, body)
        } else if self.minus {
            format!("{}{}{}", sign, body, " ".repeat(fill))
        } else if self.zero && numeric {
            format!("{}{}{}", sign, "0".repeat(fill), body)
        } else {
            format!("{}{}{}", " ".repeat(fill), sign, body)
        }
    }
}

/// Parse a width or precision, `None` when it overflows or exceeds [`MAX_WIDTH`].
fn bounded(digits: &str) -> Option<usize> {
    digits.parse::<usize>().ok().filter(|n| *n <= MAX_WIDTH)
}

static DIRECTIVE_REGEX: OnceLock<Regex> = OnceLock::new();

fn directive_regex() -> &'static Regex {
    DIRECTIVE_REGEX.get_or_init(|| Regex::new(r"(?s)%([-+ 0#]*)(\d*)(?:\.(\d*))?(.)?").unwrap())
}

/// Format `template` with positional `args`.
///
/// Directives are always interpreted, even when `args` is empty, so a template
/// holding `%s` without arguments yields `%!s(MISSING)` and `%%` yields `%`.
///
/// # Example
/// ```
/// use json_i18n::i18n::{sprintf, FormatArg};
///
/// let text = sprintf("%s ist erforderlich!", &[FormatArg::from("Benutzername")]);
/// assert_eq!(text, "Benutzername ist erforderlich!");
/// ```
pub fn sprintf(template: &str, args: &[FormatArg]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut last_end = 0;
    let mut next_arg = 0;

    for cap in directive_regex().captures_iter(template) {
        let Some(whole) = cap.get(0) else {
            continue;
        };
        result.push_str(&template[last_end..whole.start()]);
        last_end = whole.end();

        let Some(verb) = cap.get(4).and_then(|m| m.as_str().chars().next()) else {
            result.push_str("%!(NOVERB)");
            continue;
        };

        if verb == '%' {
            result.push('%');
            continue;
        }

        let directive = Directive::from_captures(&cap);
        if directive.bad_width {
            result.push_str("%!(BADWIDTH)");
        }
        if directive.bad_precision {
            result.push_str("%!(BADPREC)");
        }

        match args.get(next_arg) {
            Some(arg) => {
                next_arg += 1;
                result.push_str(&format_arg(verb, &directive, arg));
            }
            None => {
                result.push_str(&format!("%!{}(MISSING)", verb));
            }
        }
    }

    result.push_str(&template[last_end..]);

    if next_arg < args.len() {
        let extra: Vec<String> = args[next_arg..]
            .iter()
            .map(|arg| format!("{}={}", arg.type_name(), arg))
            .collect();
        result.push_str(&format!("%!(EXTRA {})", extra.join(", ")));
    }

    result
}

fn format_arg(verb: char, directive: &Directive, arg: &FormatArg) -> String {
    let rendered = match (verb, arg) {
        ('v' | 's', FormatArg::Str(s)) => Some(("", truncate(s, directive.precision), false)),
        ('q', FormatArg::Str(s)) => Some(("", format!("{:?}", s), false)),
        ('x' | 'X', FormatArg::Str(s)) => Some(("", hex_bytes(s, verb == 'X'), false)),
        ('v' | 't', FormatArg::Bool(b)) => Some(("", b.to_string(), false)),
        (
            'v' | 'd' | 'x' | 'X' | 'o' | 'b' | 'c' | 'q',
            FormatArg::Int(_) | FormatArg::Uint(_),
        ) => integer_parts(verb, directive, arg).map(|(sign, body)| (sign, body, true)),
        ('v' | 'e' | 'E' | 'f' | 'F' | 'g' | 'G', FormatArg::Float(x)) => {
            let verb = if verb == 'v' { 'g' } else { verb };
            let (sign, body) = float_parts(*x, verb, directive.precision, directive);
            Some((sign, body, x.is_finite()))
        }
        _ => None,
    };

    match rendered {
        Some((sign, body, numeric)) => directive.pad(sign, &body, numeric),
        None => format!("%!{}({}={})", verb, arg.type_name(), arg),
    }
}

fn truncate(s: &str, precision: Option<usize>) -> String {
    match precision {
        Some(max) => s.chars().take(max).collect(),
        None => s.to_string(),
    }
}

fn hex_bytes(s: &str, upper: bool) -> String {
    s.bytes()
        .map(|b| {
            if upper {
                format!("{:02X}", b)
            } else {
                format!("{:02x}", b)
            }
        })
        .collect()
}

/// Sign (including any `0x` prefix) and digits of an integer argument.
fn integer_parts(
    verb: char,
    directive: &Directive,
    arg: &FormatArg,
) -> Option<(&'static str, String)> {
    let (negative, magnitude) = match arg {
        FormatArg::Int(i) => (*i < 0, i.unsigned_abs()),
        FormatArg::Uint(u) => (false, *u),
        _ => return None,
    };

    let body = match verb {
        'v' | 'd' => magnitude.to_string(),
        'x' => format!("{:x}", magnitude),
        'X' => format!("{:X}", magnitude),
        'o' => format!("{:o}", magnitude),
        'b' => format!("{:b}", magnitude),
        'c' | 'q' => {
            let c = u32::try_from(magnitude)
                .ok()
                .filter(|_| !negative)
                .and_then(char::from_u32)
                .unwrap_or('\u{FFFD}');
            let body = if verb == 'q' {
                format!("{:?}", c)
            } else {
                c.to_string()
            };
            return Some(("", body));
        }
        _ => return None,
    };

    let sign = match (verb, directive.sharp, negative) {
        ('x', true, true) => "-0x",
        ('x', true, false) => "0x",
        ('X', true, true) => "-0X",
        ('X', true, false) => "0X",
        _ => directive.sign(negative),
    };

    Some((sign, body))
}

/// Sign and digits of a float argument for the `e`, `f` and `g` verb families.
fn float_parts(
    x: f64,
    verb: char,
    precision: Option<usize>,
    directive: &Directive,
) -> (&'static str, String) {
    if x.is_nan() {
        let sign = if directive.plus { "+" } else { "" };
        return (sign, "NaN".to_string());
    }
    if x.is_infinite() {
        let sign = if x < 0.0 { "-" } else { "+" };
        return (sign, "Inf".to_string());
    }

    let sign = directive.sign(x.is_sign_negative());
    let abs = x.abs();

    let body = match verb {
        'f' | 'F' => format!("{:.*}", precision.unwrap_or(6), abs),
        'e' => exponent_form(abs, precision.unwrap_or(6)),
        'E' => exponent_form(abs, precision.unwrap_or(6)).to_uppercase(),
        'G' => general_form(abs, precision).to_uppercase(),
        _ => general_form(abs, precision),
    };

    (sign, body)
}

/// Split Rust's `{:e}` output ("1.5e-7") into mantissa and exponent.
fn split_exponent(formatted: &str) -> (&str, i32) {
    match formatted.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse().unwrap_or(0)),
        None => (formatted, 0),
    }
}

fn with_exponent(mantissa: &str, exp: i32) -> String {
    let exp_sign = if exp < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, exp_sign, exp.abs())
}

fn exponent_form(abs: f64, precision: usize) -> String {
    let formatted = format!("{:.*e}", precision, abs);
    let (mantissa, exp) = split_exponent(&formatted);
    with_exponent(mantissa, exp)
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

/// `%g`: exponent form for large or tiny exponents, plain decimals otherwise.
///
/// Without precision the shortest round-trip digits are used and the switch to
/// exponent form happens at 1e6.
fn general_form(abs: f64, precision: Option<usize>) -> String {
    match precision {
        None => {
            let formatted = format!("{:e}", abs);
            let (mantissa, exp) = split_exponent(&formatted);
            if !(-4..6).contains(&exp) {
                with_exponent(mantissa, exp)
            } else {
                abs.to_string()
            }
        }
        Some(precision) => {
            let precision = precision.max(1);
            let formatted = format!("{:.*e}", precision - 1, abs);
            let (mantissa, exp) = split_exponent(&formatted);
            if exp < -4 || exp >= precision as i32 {
                with_exponent(trim_fraction(mantissa), exp)
            } else {
                let decimals = (precision as i32 - 1 - exp).max(0) as usize;
                trim_fraction(&format!("{:.*}", decimals, abs)).to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Plain Substitution Tests ====================

    #[test]
    fn test_no_directives() {
        assert_eq!(sprintf("Benutzername", &[]), "Benutzername");
    }

    #[test]
    fn test_string_substitution() {
        assert_eq!(
            sprintf("%s is mandatory!", &["Username".into()]),
            "Username is mandatory!"
        );
    }

    #[test]
    fn test_multiple_arguments() {
        let result = sprintf(
            "%s has %d new messages (%t)",
            &["Anna".into(), 3.into(), true.into()],
        );
        assert_eq!(result, "Anna has 3 new messages (true)");
    }

    #[test]
    fn test_percent_literal() {
        assert_eq!(sprintf("100%%", &[]), "100%");
        assert_eq!(sprintf("%d%%", &[50.into()]), "50%");
    }

    #[test]
    fn test_default_verb() {
        let result = sprintf(
            "%v %v %v %v",
            &["a".into(), (-4).into(), 2.5.into(), false.into()],
        );
        assert_eq!(result, "a -4 2.5 false");
    }

    // ==================== Mismatch Tests ====================

    #[test]
    fn test_missing_argument() {
        assert_eq!(
            sprintf("%s ist erforderlich!", &[]),
            "%!s(MISSING) ist erforderlich!"
        );
        assert_eq!(sprintf("%s and %d", &["x".into()]), "x and %!d(MISSING)");
    }

    #[test]
    fn test_extra_arguments() {
        assert_eq!(
            sprintf("hello", &["a".into(), 1.into()]),
            "hello%!(EXTRA string=a, int=1)"
        );
    }

    #[test]
    fn test_wrong_type() {
        assert_eq!(sprintf("%d", &["foo".into()]), "%!d(string=foo)");
        assert_eq!(sprintf("%s", &[5.into()]), "%!s(int=5)");
        assert_eq!(sprintf("%f", &[true.into()]), "%!f(bool=true)");
    }

    #[test]
    fn test_unknown_verb() {
        assert_eq!(sprintf("%z", &["a".into()]), "%!z(string=a)");
    }

    #[test]
    fn test_trailing_percent() {
        assert_eq!(sprintf("50%", &[]), "50%!(NOVERB)");
    }

    // ==================== Width and Flag Tests ====================

    #[test]
    fn test_width_padding() {
        assert_eq!(sprintf("[%5s]", &["ab".into()]), "[   ab]");
        assert_eq!(sprintf("[%-5s]", &["ab".into()]), "[ab   ]");
        assert_eq!(sprintf("[%05d]", &[(-42).into()]), "[-0042]");
        assert_eq!(sprintf("[%+d]", &[7.into()]), "[+7]");
    }

    #[test]
    fn test_zero_flag_ignored_for_strings() {
        assert_eq!(sprintf("[%05s]", &["ab".into()]), "[   ab]");
    }

    #[test]
    fn test_oversized_width_is_rejected() {
        assert_eq!(sprintf("%999999999s", &["x".into()]), "%!(BADWIDTH)x");
        assert_eq!(
            sprintf("%99999999999999999999999d", &[5.into()]),
            "%!(BADWIDTH)5"
        );
        assert_eq!(sprintf("[%1000000d]", &[5.into()]).len(), 1_000_002);
    }

    #[test]
    fn test_oversized_precision_is_rejected() {
        assert_eq!(sprintf("%.9999999f", &[1.5.into()]), "%!(BADPREC)1.500000");
        assert_eq!(sprintf("%.9999999s", &[]), "%!(BADPREC)%!s(MISSING)");
    }

    #[test]
    fn test_string_precision_truncates() {
        assert_eq!(sprintf("%.3s", &["Benutzername".into()]), "Ben");
    }

    // ==================== Integer Verb Tests ====================

    #[test]
    fn test_integer_radix_verbs() {
        assert_eq!(
            sprintf("%x %X %o %b", &[255.into(), 255.into(), 8.into(), 5.into()]),
            "ff FF 10 101"
        );
        assert_eq!(sprintf("%#x", &[255u32.into()]), "0xff");
        assert_eq!(sprintf("%x", &[(-255).into()]), "-ff");
    }

    #[test]
    fn test_char_verbs() {
        assert_eq!(sprintf("%c", &[65.into()]), "A");
        assert_eq!(sprintf("%q", &[65.into()]), "'A'");
    }

    #[test]
    fn test_string_hex_and_quote() {
        assert_eq!(sprintf("%x", &["hi".into()]), "6869");
        assert_eq!(sprintf("%q", &["a\"b".into()]), "\"a\\\"b\"");
    }

    // ==================== Float Verb Tests ====================

    #[test]
    fn test_float_fixed() {
        assert_eq!(sprintf("%f", &[1.5.into()]), "1.500000");
        assert_eq!(sprintf("%.2f", &[3.14159.into()]), "3.14");
        assert_eq!(sprintf("%.f", &[2.7.into()]), "3");
        assert_eq!(sprintf("%8.2f", &[(-1.5).into()]), "   -1.50");
    }

    #[test]
    fn test_float_exponent() {
        assert_eq!(sprintf("%e", &[1234.5678.into()]), "1.234568e+03");
        assert_eq!(sprintf("%.2E", &[0.000123.into()]), "1.23E-04");
    }

    #[test]
    fn test_float_general() {
        assert_eq!(sprintf("%g", &[100000.0.into()]), "100000");
        assert_eq!(sprintf("%g", &[1000000.0.into()]), "1e+06");
        assert_eq!(sprintf("%g", &[0.0001.into()]), "0.0001");
        assert_eq!(sprintf("%g", &[0.00001.into()]), "1e-05");
        assert_eq!(sprintf("%.3g", &[3.14159.into()]), "3.14");
        assert_eq!(sprintf("%.3g", &[1000.0.into()]), "1e+03");
        assert_eq!(sprintf("%.3g", &[100.0.into()]), "100");
    }

    #[test]
    fn test_float_special_values() {
        assert_eq!(sprintf("%f", &[f64::INFINITY.into()]), "+Inf");
        assert_eq!(sprintf("%v", &[f64::NEG_INFINITY.into()]), "-Inf");
        assert_eq!(sprintf("%g", &[f64::NAN.into()]), "NaN");
        assert_eq!(sprintf("%05f", &[f64::INFINITY.into()]), " +Inf");
    }

    // ==================== Conversion Tests ====================

    #[test]
    fn test_from_conversions() {
        assert_eq!(FormatArg::from("a"), FormatArg::Str("a".to_string()));
        assert_eq!(FormatArg::from(String::from("b")), FormatArg::Str("b".to_string()));
        assert_eq!(FormatArg::from(-3i8), FormatArg::Int(-3));
        assert_eq!(FormatArg::from(7usize), FormatArg::Uint(7));
        assert_eq!(FormatArg::from(0.5f32), FormatArg::Float(0.5));
        assert_eq!(FormatArg::from('x'), FormatArg::Str("x".to_string()));
    }
}
