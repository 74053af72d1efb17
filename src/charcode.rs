// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Character predicates and char code computation shared by the
// pattern lexer and the character class lexer.

/// Chars that end a literal run outside of character classes.
pub fn is_pattern_meta_char(c: char) -> bool {
    matches!(
        c,
        '.' | '?' | '*' | '+' | '^' | '$' | '{' | '[' | '(' | ')' | '|' | '\\'
    )
}

/// `d`, `D`, `s`, `S`, `w` and `W`, as in `\d`.
pub fn is_shorthand_class_letter(c: char) -> bool {
    matches!(c, 'd' | 'D' | 's' | 'S' | 'w' | 'W')
}

pub fn is_octal_digit(c: char) -> bool {
    matches!(c, '0'..='7')
}

/// The number of chars that follow `first` in an octal escape, i.e. the
/// longest tail allowed by `[0-3][0-7]{0,2}` or `[4-7][0-7]?`.
pub fn octal_tail_limit(first: char) -> usize {
    match first {
        '0'..='3' => 2,
        '4'..='7' => 1,
        _ => 0,
    }
}

/// The first UTF-16 code unit of `c`, i.e. the high surrogate of a char
/// outside the BMP.
pub fn first_utf16_unit(c: char) -> u32 {
    u32::from(c.encode_utf16(&mut [0; 2])[0])
}

/// The last UTF-16 code unit of `c`, i.e. the low surrogate of a char
/// outside the BMP.
pub fn last_utf16_unit(c: char) -> u32 {
    let mut buffer = [0; 2];
    let units = c.encode_utf16(&mut buffer);
    u32::from(units[units.len() - 1])
}

/// Returns the code of the char a class token stands for.
///
/// Codes are UTF-16 code units, which is how ranges are ordered by
/// engines without the `u` flag.
///
/// `token` is a single lexeme of a character class: an escape sequence or a
/// run of literal chars (the code of its first unit is returned).
/// Returns `None` for tokens that do not denote a single char, e.g.
/// shorthand classes, incomplete escapes and the lone backslash.
pub fn token_char_code(token: &str) -> Option<u32> {
    match token.strip_prefix('\\') {
        Some("") => None,
        Some(escaped) => escape_char_code(escaped),
        None => token.chars().next().map(first_utf16_unit),
    }
}

fn escape_char_code(escaped: &str) -> Option<u32> {
    let mut chars = escaped.chars();
    let first = chars.next()?;
    let tail = chars.as_str();

    // control char, e.g. `\cM`
    if first == 'c' {
        let mut tail_chars = tail.chars();
        if let (Some(letter), None) = (tail_chars.next(), tail_chars.next()) {
            if letter.is_ascii_alphabetic() {
                return Some(u32::from(letter.to_ascii_uppercase()) - u32::from('A') + 1);
            }
        }
    }

    // two or four digit hex char code
    if ((first == 'x' && tail.len() == 2) || (first == 'u' && tail.len() == 4))
        && tail.chars().all(|c| c.is_ascii_hexdigit())
    {
        return u32::from_str_radix(tail, 16).ok();
    }

    // one to three digit octal char code, up to `\377`
    if is_octal_digit(first)
        && tail.len() <= octal_tail_limit(first)
        && tail.chars().all(is_octal_digit)
    {
        return u32::from_str_radix(escaped, 8).ok();
    }

    if !tail.is_empty() {
        return None;
    }

    match first {
        // shorthand class or incomplete token
        'c' | 'u' | 'x' => None,
        c if is_shorthand_class_letter(c) => None,
        'b' => Some(8),  // backspace
        'f' => Some(12), // form feed
        'n' => Some(10), // line feed
        'r' => Some(13), // carriage return
        't' => Some(9),  // horizontal tab
        'v' => Some(11), // vertical tab
        c => Some(first_utf16_unit(c)),
    }
}
