// Digit-context correction for OCR text: glyphs that OCR engines commonly
// confuse with digits are rewritten only when they sit next to a digit.

use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    static ref DIGIT_CONFUSIONS: HashMap<char, char> = {
        let mut m = HashMap::new();
        m.insert('O', '0');
        m.insert('o', '0');
        m.insert('D', '0');
        m.insert('Q', '0');
        m.insert('I', '1');
        m.insert('l', '1');
        m.insert('|', '1');
        m.insert('Z', '2');
        m.insert('S', '5');
        m.insert('G', '6');
        m.insert('B', '8');
        m
    };
}

/// Rewrite digit look-alikes that are adjacent to an ASCII digit.
///
/// "1234 5678 9O12" becomes "1234 5678 9012", while words such as "GOVERNMENT"
/// are untouched because none of their letters touch a digit.
pub fn correct_numeric_confusions(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut corrected = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        match DIGIT_CONFUSIONS.get(&c) {
            Some(&digit) if has_digit_neighbour(&chars, i) => corrected.push(digit),
            _ => corrected.push(c),
        }
    }

    corrected
}

fn has_digit_neighbour(chars: &[char], i: usize) -> bool {
    let before = i > 0 && chars[i - 1].is_ascii_digit();
    let after = i + 1 < chars.len() && chars[i + 1].is_ascii_digit();
    before || after
}
