//! Text → slot conversion.
//!
//! Numeric parsing is lenient: the longest numeric prefix is used and text
//! without one converts to zero. There is no conversion error.

use log::{trace, warn};

use crate::input::ParamScratch;
use crate::service::{Service, Slot};
use crate::types::copy_truncated;

/// Whitespace as understood by C `isspace`.
fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn skip_space(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| is_c_space(**b)).count()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Base-10 integer prefix of `text`.
///
/// Leading whitespace and one sign are accepted, digits are consumed up to
/// the first non-digit. No digits gives `0`. Values beyond the `i64` range
/// saturate.
pub fn parse_int(text: &str) -> i64 {
    let bytes = text.as_bytes();
    let mut pos = skip_space(bytes);

    let negative = match bytes.get(pos) {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    for b in bytes[pos..].iter().take_while(|b| b.is_ascii_digit()) {
        let digit = (b - b'0') as i64;
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };
    }
    value
}

/// Decimal floating-point prefix of `text`.
///
/// Accepts leading whitespace, a sign, digits with an optional fraction and
/// an optional exponent (`e`/`E`, sign, digits). An exponent marker without
/// digits is not part of the number. No mantissa digits gives `0.0`.
pub fn parse_float(text: &str) -> f64 {
    let bytes = text.as_bytes();
    let start = skip_space(bytes);
    let mut end = start;

    if matches!(bytes.get(end), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    // the prefix is pure ASCII, so slicing stays on char boundaries
    text[start..end].parse::<f64>().unwrap_or(0.0)
}

/// Writes `text` into the storage behind `slot`, according to its kind.
///
/// Integer kinds narrower than 64 bits keep the low bits of the parsed value.
/// `Raw` and `None` slots are left untouched. A `Text` slot currently
/// borrowed elsewhere is skipped with a warning.
pub fn convert(text: &str, slot: &Slot<'_>) {
    match *slot {
        Slot::Int8(c) => c.set(parse_int(text) as i8),
        Slot::Int16(c) => c.set(parse_int(text) as i16),
        Slot::Int32(c) => c.set(parse_int(text) as i32),
        Slot::Int64(c) => c.set(parse_int(text)),
        Slot::Float32(c) => c.set(parse_float(text) as f32),
        Slot::Float64(c) => c.set(parse_float(text)),
        Slot::Text(t) => match t.try_borrow_mut() {
            Ok(mut t) => copy_truncated(&mut *t, text),
            Err(_) => warn!("text slot busy, '{}' not stored", text),
        },
        Slot::Raw(_) | Slot::None => {}
    }
}

/// Converts every active slot of `service` from the matching scratch entry.
pub fn convert_all(service: &Service<'_>, scratch: &ParamScratch<'_>) {
    for (i, slot) in service.slots().iter().enumerate() {
        trace!("{}[{}] <- '{}' as {}", service.token(), i, scratch.get(i), slot.kind().name());
        convert(scratch.get(i), slot);
    }
}

#[cfg(test)]
mod tests {
    use core::cell::{Cell, RefCell};

    use super::*;
    use crate::types::ParamText;

    #[test]
    fn test_parse_int_plain() {
        assert_eq!(parse_int("42"), 42);
        assert_eq!(parse_int("-17"), -17);
        assert_eq!(parse_int("+8"), 8);
        assert_eq!(parse_int("  \t12"), 12);
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int("12abc"), 12);
        assert_eq!(parse_int("3.9"), 3);
        assert_eq!(parse_int("7 8"), 7);
    }

    #[test]
    fn test_parse_int_no_digits_is_zero() {
        assert_eq!(parse_int("abc"), 0);
        assert_eq!(parse_int(""), 0);
        assert_eq!(parse_int("-"), 0);
        assert_eq!(parse_int("- 5"), 0);
    }

    #[test]
    fn test_parse_int_saturates() {
        assert_eq!(parse_int("99999999999999999999999"), i64::MAX);
        assert_eq!(parse_int("-99999999999999999999999"), i64::MIN);
        assert_eq!(parse_int("-9223372036854775808"), i64::MIN);
    }

    #[test]
    fn test_parse_float_forms() {
        assert_eq!(parse_float("3.5"), 3.5);
        assert_eq!(parse_float("-0.25"), -0.25);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("2."), 2.0);
        assert_eq!(parse_float("1e3"), 1000.0);
        assert_eq!(parse_float("1.5E-1"), 0.15);
        assert_eq!(parse_float(" 7"), 7.0);
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float("0.12xyz"), 0.12);
        assert_eq!(parse_float("4e"), 4.0);
        assert_eq!(parse_float("4e+"), 4.0);
        assert_eq!(parse_float("1.2.3"), 1.2);
    }

    #[test]
    fn test_parse_float_no_mantissa_is_zero() {
        assert_eq!(parse_float("abc"), 0.0);
        assert_eq!(parse_float("."), 0.0);
        assert_eq!(parse_float("-e5"), 0.0);
        assert_eq!(parse_float(""), 0.0);
    }

    #[test]
    fn test_convert_narrow_ints_truncate() {
        let c8 = Cell::new(0i8);
        convert("300", &Slot::Int8(&c8));
        assert_eq!(c8.get(), 300i64 as i8);

        let c16 = Cell::new(0i16);
        convert("-2", &Slot::Int16(&c16));
        assert_eq!(c16.get(), -2);

        let c32 = Cell::new(5i32);
        convert("abc", &Slot::Int32(&c32));
        assert_eq!(c32.get(), 0);
    }

    #[test]
    fn test_convert_floats() {
        let f = Cell::new(0.0f32);
        convert("3.5", &Slot::Float32(&f));
        assert_eq!(f.get(), 3.5);

        let d = Cell::new(1.0f64);
        convert("", &Slot::Float64(&d));
        assert_eq!(d.get(), 0.0);
    }

    #[test]
    fn test_convert_text() {
        let t = RefCell::new(ParamText::new());
        convert("hello", &Slot::Text(&t));
        assert_eq!(t.borrow().as_str(), "hello");
    }

    #[test]
    fn test_convert_busy_text_is_skipped() {
        let t = RefCell::new(ParamText::new());
        let guard = t.borrow();
        convert("hello", &Slot::Text(&t));
        assert!(guard.is_empty());
    }

    #[test]
    fn test_convert_raw_and_none_untouched() {
        let marker = 99u32;
        convert("5", &Slot::Raw(&marker));
        convert("5", &Slot::None);
        assert_eq!(marker, 99);
    }

    #[test]
    fn test_convert_all_in_slot_order() {
        let p = Cell::new(0i32);
        let i = Cell::new(0.0f32);
        let d = Cell::new(0.0f32);
        let pid = Service::new("PID")
            .param(Slot::Int32(&p))
            .param(Slot::Float32(&i))
            .param(Slot::Float32(&d));

        let mut scratch = ParamScratch::new();
        scratch.fill("15;0.12;0.23", ";", 3).unwrap();
        convert_all(&pid, &scratch);

        assert_eq!(p.get(), 15);
        assert!((i.get() - 0.12).abs() < 1e-6);
        assert!((d.get() - 0.23).abs() < 1e-6);
    }
}
