//! Line folding for the full tier.

/// Maximum line length in octets (not characters), continuation space included.
pub const MAX_LINE_OCTETS: usize = 75;

/// Folds a content line (without its CRLF) into 75-octet physical lines.
///
/// Continuation lines start with a single space and the split never lands
/// inside a UTF-8 sequence.
#[must_use]
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut result = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut current_len = 0;

    for c in line.chars() {
        let char_len = c.len_utf8();

        if current_len + char_len > MAX_LINE_OCTETS {
            result.push_str("\r\n ");
            current_len = 1;
        }

        result.push(c);
        current_len += char_len;
    }

    result
}

/// Joins folded continuation lines back into logical lines.
#[must_use]
pub fn unfold(text: &str) -> String {
    text.replace("\r\n ", "")
}


/// Folding laws over arbitrary escaped content lines
#[cfg(test)]
mod folding_laws {
    use super::*;
    use crate::vcard::sanitize;
    use proptest::prelude::*;

    proptest! {
        /// Physical lines fit in 75 octets and unfolding restores the line
        #[test]
        fn fold_fits_and_unfolds_losslessly(raw in any::<String>()) {
            let line = format!("NOTE:{}", sanitize(&raw));
            let folded = fold_line(&line);

            for (index, part) in folded.split("\r\n").enumerate() {
                prop_assert!(part.len() <= MAX_LINE_OCTETS, "{} octets: {:?}", part.len(), part);
                if index > 0 {
                    prop_assert!(part.starts_with(' '), "continuation without space: {:?}", part);
                }
            }
            prop_assert_eq!(unfold(&folded), line);
        }
    }
}
