//! Escaping and formatting helpers shared by the HTML and script generators.

/// Escape text for use in HTML element content and quoted attribute values.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Encode a string as a script string literal.
///
/// `</` is written as `<\/` so the literal cannot close the surrounding
/// `<script>` element when embedded inline.
pub fn js_string(s: &str) -> String {
    let quoted = serde_json::Value::String(s.to_string()).to_string();
    quoted.replace("</", "<\\/")
}

/// Format a number for script or attribute output.
///
/// Always carries a fractional part or exponent (`1.0`, `0.1`, `1e-7`) so
/// the generated text reads as a float literal.
pub fn js_number(v: f64) -> String {
    format!("{v:?}")
}

/// Percent-encode a relative path for use in an `href`.
///
/// Path separators are kept; everything outside the unreserved set is
/// encoded byte by byte.
pub fn href_encode(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for b in path.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

/// Largest power of ten not exceeding one hundredth of `span`.
pub fn slider_step(span: f64) -> f64 {
    if !span.is_finite() || span <= 0.0 {
        return 0.01;
    }
    let exp = (span / 100.0).log10().floor() as i32;
    10f64.powi(exp)
}

/// Decimal places shown for a slider whose `step` is a power of ten.
pub fn step_decimals(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 2;
    }
    (-step.log10()).round().max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escape_covers_markup_and_quotes() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn js_string_escapes_script_close() {
        assert_eq!(js_string("a</script>b"), r#""a<\/script>b""#);
        assert_eq!(js_string("line\n\"q\""), r#""line\n\"q\"""#);
    }

    #[test]
    fn js_number_keeps_fraction() {
        assert_eq!(js_number(1.0), "1.0");
        assert_eq!(js_number(0.1), "0.1");
        assert_eq!(js_number(3.0), "3.0");
        assert_eq!(js_number(-2.5), "-2.5");
    }

    #[test]
    fn href_encode_spaces_and_unicode() {
        assert_eq!(href_encode("01-X/visualization.html"), "01-X/visualization.html");
        assert_eq!(href_encode("02-Helix Path/v.html"), "02-Helix%20Path/v.html");
        assert_eq!(href_encode("é"), "%C3%A9");
    }

    #[test]
    fn slider_step_is_power_of_ten() {
        let close = |a: f64, b: f64| (a - b).abs() < 1e-12;
        assert!(close(slider_step(2.9), 0.01));
        assert!(close(slider_step(10.0), 0.1));
        assert!(close(slider_step(200.0), 1.0));
        assert!(close(slider_step(0.0), 0.01));
    }

    #[test]
    fn step_decimals_follow_step() {
        assert_eq!(step_decimals(slider_step(0.99)), 3);
        assert_eq!(step_decimals(0.01), 2);
        assert_eq!(step_decimals(0.1), 1);
        assert_eq!(step_decimals(1.0), 0);
        assert_eq!(step_decimals(10.0), 0);
    }
}
