// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyboard rendering: core layout variants to Bot API `reply_markup`.

use kapterka_core::types::Keyboard;
use serde_json::{json, Value};

/// Renders a keyboard layout to a `reply_markup` payload. [`Keyboard::None`]
/// renders to nothing -- the previous keyboard stays as is.
pub fn reply_markup(keyboard: &Keyboard) -> Option<Value> {
    let rows: Vec<Vec<&str>> = match keyboard {
        Keyboard::Grid(rows) => rows
            .iter()
            .map(|row| row.iter().map(String::as_str).collect())
            .collect(),
        Keyboard::List(items) => items.iter().map(|item| vec![item.as_str()]).collect(),
        Keyboard::None => return None,
    };

    let buttons: Vec<Vec<Value>> = rows
        .iter()
        .map(|row| row.iter().map(|text| json!({ "text": text })).collect())
        .collect();

    Some(json!({
        "keyboard": buttons,
        "resize_keyboard": true,
        "one_time_keyboard": false,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_renders_row_by_row() {
        let markup = reply_markup(&Keyboard::grid(&[&["a", "b"], &["c"]])).unwrap();
        assert_eq!(markup["keyboard"][0][1]["text"], "b");
        assert_eq!(markup["keyboard"][1][0]["text"], "c");
        assert_eq!(markup["resize_keyboard"], true);
        assert_eq!(markup["one_time_keyboard"], false);
    }

    #[test]
    fn list_renders_one_button_per_row() {
        let markup =
            reply_markup(&Keyboard::List(vec!["x".into(), "y".into()])).unwrap();
        assert_eq!(markup["keyboard"][0][0]["text"], "x");
        assert_eq!(markup["keyboard"][1][0]["text"], "y");
    }

    #[test]
    fn none_renders_to_nothing() {
        assert!(reply_markup(&Keyboard::None).is_none());
    }
}
