use once_cell::sync::Lazy;
use regex::Regex;
use std::str::CharIndices;

// Start of a module's export value, CommonJS or ESM form.
static MODULE_EXPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\w$.])(?:module\.exports\s*=|export\s+default\b)\s*").unwrap()
});

// Identifiers that hold the bundle's public path at runtime. The unpacker treats it as empty.
const PUBLIC_PATH_IDENTS: [&str; 2] = ["__webpack_public_path__", "__webpack_require__.p"];

/// Statically extract the value a loader-generated wrapper module exports.
///
/// Webpack loaders store text and binary assets as tiny modules, for example
/// `module.exports = "data:image/png;base64,..."` (url-loader) or
/// `module.exports = __webpack_public_path__ + "img/logo.png"` (file-loader).
/// The exported expression is evaluated only if it is a `+` chain of string literals and
/// public-path references; the public path evaluates to `""`. Nothing is executed.
///
/// Returns `None` when no such export exists.
pub fn extract_module_export(source: &str) -> Option<String> {
    let m = MODULE_EXPORT_RE.find(source)?;
    evaluate_concat(&source[m.end()..])
}

/// Evaluate `operand (+ operand)*` up to `;`, a line break, a closing `}` or `)`, or end of input.
fn evaluate_concat(mut rest: &str) -> Option<String> {
    let mut value = String::new();
    loop {
        rest = rest.trim_start();
        let (piece, after) = parse_operand(rest)?;
        value.push_str(&piece);

        let trimmed = after.trim_start();
        let crossed_newline = after[..after.len() - trimmed.len()].contains('\n');
        match trimmed.chars().next() {
            Some('+') => rest = &trimmed[1..],
            None | Some(';') | Some('}') | Some(')') => return Some(value),
            Some(_) if crossed_newline => return Some(value),
            Some(_) => return None,
        }
    }
}

fn parse_operand(rest: &str) -> Option<(String, &str)> {
    match rest.chars().next()? {
        '"' | '\'' | '`' => parse_string_literal(rest),
        _ => {
            for ident in PUBLIC_PATH_IDENTS {
                if let Some(after) = rest.strip_prefix(ident) {
                    let continues = after
                        .chars()
                        .next()
                        .map_or(false, |c| c.is_alphanumeric() || c == '_' || c == '$');
                    if !continues {
                        return Some((String::new(), after));
                    }
                }
            }
            None
        }
    }
}

/// Parse a quoted JavaScript string literal at the start of `rest`.
/// Template literals are accepted only without `${}` substitutions.
fn parse_string_literal(rest: &str) -> Option<(String, &str)> {
    let mut chars = rest.char_indices();
    let (_, quote) = chars.next()?;
    let mut out = String::new();

    while let Some((idx, c)) = chars.next() {
        match c {
            c if c == quote => return Some((out, &rest[idx + c.len_utf8()..])),
            '\\' => read_escape(&mut chars, &mut out)?,
            '\n' | '\r' if quote != '`' => return None,
            '$' if quote == '`' && rest[idx + 1..].starts_with('{') => return None,
            c => out.push(c),
        }
    }
    // unterminated
    None
}

fn read_escape(chars: &mut CharIndices<'_>, out: &mut String) -> Option<()> {
    let (_, c) = chars.next()?;
    match c {
        'n' => out.push('\n'),
        'r' => out.push('\r'),
        't' => out.push('\t'),
        'b' => out.push('\u{8}'),
        'f' => out.push('\u{c}'),
        'v' => out.push('\u{b}'),
        '0' => out.push('\0'),
        'x' => {
            let code = read_hex(chars, 2)?;
            out.push(char::from_u32(code)?);
        }
        'u' => {
            let unit = read_unicode_escape(chars)?;
            push_code_unit(chars, out, unit)?;
        }
        // line continuation
        '\n' | '\u{2028}' | '\u{2029}' => {}
        '\r' => {
            let mut peek = chars.clone();
            if let Some((_, '\n')) = peek.next() {
                chars.next();
            }
        }
        other => out.push(other),
    }
    Some(())
}

/// `\uXXXX` or `\u{X...}`; the leading `\u` is already consumed.
fn read_unicode_escape(chars: &mut CharIndices<'_>) -> Option<u32> {
    let mut peek = chars.clone();
    if let Some((_, '{')) = peek.next() {
        chars.next();
        let mut code: u32 = 0;
        let mut digits = 0;
        for (_, c) in chars.by_ref() {
            if c == '}' {
                return if digits > 0 { Some(code) } else { None };
            }
            code = code.checked_mul(16)?.checked_add(c.to_digit(16)?)?;
            digits += 1;
        }
        None
    } else {
        read_hex(chars, 4)
    }
}

/// Push a UTF-16 code unit or code point, pairing surrogates written as two escapes.
fn push_code_unit(chars: &mut CharIndices<'_>, out: &mut String, unit: u32) -> Option<()> {
    if (0xD800..0xDC00).contains(&unit) {
        let mut peek = chars.clone();
        if let (Some((_, '\\')), Some((_, 'u'))) = (peek.next(), peek.next()) {
            if let Some(low) = read_unicode_escape(&mut peek) {
                if (0xDC00..0xE000).contains(&low) {
                    *chars = peek;
                    let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    out.push(char::from_u32(combined)?);
                    return Some(());
                }
            }
        }
        out.push(char::REPLACEMENT_CHARACTER);
        return Some(());
    }
    out.push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER));
    Some(())
}

fn read_hex(chars: &mut CharIndices<'_>, len: usize) -> Option<u32> {
    let mut code = 0;
    for _ in 0..len {
        let (_, c) = chars.next()?;
        code = code * 16 + c.to_digit(16)?;
    }
    Some(code)
}
