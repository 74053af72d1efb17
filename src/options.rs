// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::error::ColorizerError;

pub const DEFAULT_CLASS_NAME: &str = "regex";

/// Presentation options shared by the command-line adapter and
/// library users who embed the annotations into their own pages.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ColorizerOptions {
    class_name: String,
}

impl Default for ColorizerOptions {
    fn default() -> Self {
        Self {
            class_name: DEFAULT_CLASS_NAME.to_owned(),
        }
    }
}

impl ColorizerOptions {
    /// Creates options with a custom class name for the containers of
    /// the annotated patterns.
    ///
    /// The name must be a CSS identifier, e.g. `regex` or `my-regex`.
    pub fn new(class_name: &str) -> Result<Self, ColorizerError> {
        if !is_css_identifier(class_name) {
            return Err(ColorizerError::InvalidClassName(class_name.to_owned()));
        }

        Ok(Self {
            class_name: class_name.to_owned(),
        })
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Returns the default stylesheet, scoped to the class name.
    pub fn stylesheet(&self) -> String {
        const RULES: [(&str, &str); 11] = [
            ("", "font-family: monospace;"),
            (" b", "background: #aad1f7;"),   // metasequence
            (" i", "background: #e3e3e3;"),   // charset
            (" i b", "background: #9fb6dc;"), // charset metasequence
            (" i u", "background: #c3c3c3;"), // range hyphen
            (" b.g1", "background: #b4fa50; color: #000;"),
            (" b.g2", "background: #8cd400; color: #000;"),
            (" b.g3", "background: #26b809; color: #fff;"),
            (" b.g4", "background: #30ea60; color: #000;"),
            (" b.g5", "background: #0c8d15; color: #fff;"),
            (" b.err", "background: #e30000; color: #fff;"),
        ];

        let name = &self.class_name;
        let mut lines: Vec<String> = RULES
            .iter()
            .map(|(selector, declarations)| format!(".{}{} {{{}}}", name, selector, declarations))
            .collect();

        lines.push(format!(
            ".{0} b, .{0} i, .{0} u {{font-weight: normal; font-style: normal; text-decoration: none;}}",
            name
        ));

        lines.join("\n")
    }
}

// `[A-Za-z_-][A-Za-z0-9_-]*`, except `-` followed by a digit
fn is_css_identifier(s: &str) -> bool {
    let mut chars = s.chars();

    let first_valid = match chars.next() {
        Some('-') => !matches!(s.chars().nth(1), Some('0'..='9')),
        Some(c) => c.is_ascii_alphabetic() || c == '_',
        None => false,
    };

    first_valid && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
