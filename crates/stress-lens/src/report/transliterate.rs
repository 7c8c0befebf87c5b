use std::borrow::Cow;

/// Substitute for characters with no entry in [`TRANSLITERATIONS`].
pub const REPLACEMENT: char = '?';

/// Plain-ASCII stand-ins for characters the built-in PDF fonts cannot show.
pub static TRANSLITERATIONS: &[(char, &str)] = &[
    ('\u{2010}', "-"),
    ('\u{2011}', "-"),
    ('\u{2012}', "-"),
    ('\u{2013}', "-"),
    ('\u{2014}', "-"),
    ('\u{2015}', "-"),
    ('\u{2212}', "-"),
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201A}', ","),
    ('\u{201B}', "'"),
    ('\u{2032}', "'"),
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{201E}', "\""),
    ('\u{2033}', "\""),
    ('\u{00AB}', "\""),
    ('\u{00BB}', "\""),
    ('\u{2022}', "*"),
    ('\u{00B7}', "*"),
    ('\u{2026}', "..."),
    ('\u{00A0}', " "),
    ('\u{2002}', " "),
    ('\u{2003}', " "),
    ('\u{2009}', " "),
    ('\u{200B}', ""),
    ('\u{FEFF}', ""),
    ('\u{00E0}', "a"),
    ('\u{00E1}', "a"),
    ('\u{00E2}', "a"),
    ('\u{00E3}', "a"),
    ('\u{00E4}', "a"),
    ('\u{00E5}', "a"),
    ('\u{00C0}', "A"),
    ('\u{00C1}', "A"),
    ('\u{00C2}', "A"),
    ('\u{00C3}', "A"),
    ('\u{00C4}', "A"),
    ('\u{00C5}', "A"),
    ('\u{00E6}', "ae"),
    ('\u{00C6}', "AE"),
    ('\u{00E7}', "c"),
    ('\u{00C7}', "C"),
    ('\u{00E8}', "e"),
    ('\u{00E9}', "e"),
    ('\u{00EA}', "e"),
    ('\u{00EB}', "e"),
    ('\u{00C8}', "E"),
    ('\u{00C9}', "E"),
    ('\u{00CA}', "E"),
    ('\u{00CB}', "E"),
    ('\u{00EC}', "i"),
    ('\u{00ED}', "i"),
    ('\u{00EE}', "i"),
    ('\u{00EF}', "i"),
    ('\u{00CC}', "I"),
    ('\u{00CD}', "I"),
    ('\u{00CE}', "I"),
    ('\u{00CF}', "I"),
    ('\u{00F1}', "n"),
    ('\u{00D1}', "N"),
    ('\u{00F2}', "o"),
    ('\u{00F3}', "o"),
    ('\u{00F4}', "o"),
    ('\u{00F5}', "o"),
    ('\u{00F6}', "o"),
    ('\u{00F8}', "o"),
    ('\u{00D2}', "O"),
    ('\u{00D3}', "O"),
    ('\u{00D4}', "O"),
    ('\u{00D5}', "O"),
    ('\u{00D6}', "O"),
    ('\u{00D8}', "O"),
    ('\u{0153}', "oe"),
    ('\u{0152}', "OE"),
    ('\u{00DF}', "ss"),
    ('\u{00F9}', "u"),
    ('\u{00FA}', "u"),
    ('\u{00FB}', "u"),
    ('\u{00FC}', "u"),
    ('\u{00D9}', "U"),
    ('\u{00DA}', "U"),
    ('\u{00DB}', "U"),
    ('\u{00DC}', "U"),
    ('\u{00FD}', "y"),
    ('\u{00FF}', "y"),
    ('\u{00DD}', "Y"),
    ('\u{00D7}', "x"),
    ('\u{20AC}', "EUR"),
    ('\u{00A9}', "(c)"),
    ('\u{00AE}', "(R)"),
    ('\u{2122}', "TM"),
    ('\u{2192}', "->"),
    ('\u{2190}', "<-"),
];

/// Rewrites `text` into printable ASCII plus `\n`.
///
/// Tabs and other control characters become spaces; non-ASCII characters are
/// looked up in [`TRANSLITERATIONS`] and fall back to [`REPLACEMENT`].
pub fn to_ascii(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_printable) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if is_printable(c) {
            out.push(c);
        } else if c.is_ascii_control() {
            out.push(' ');
        } else {
            match lookup(c) {
                Some(replacement) => out.push_str(replacement),
                None => out.push(REPLACEMENT),
            }
        }
    }
    Cow::Owned(out)
}

fn is_printable(c: char) -> bool {
    c == '\n' || (' '..='~').contains(&c)
}

fn lookup(c: char) -> Option<&'static str> {
    TRANSLITERATIONS
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ascii_is_borrowed() {
        assert!(matches!(to_ascii("Stress Level: 3"), Cow::Borrowed(_)));
    }

    #[test]
    fn typographic_punctuation_is_flattened() {
        assert_eq!(
            to_ascii("Mild Stress – “bad” in your story’s end…"),
            "Mild Stress - \"bad\" in your story's end..."
        );
        assert_eq!(to_ascii("• item"), "* item");
    }

    #[test]
    fn accented_letters_lose_their_marks() {
        assert_eq!(to_ascii("Café naïve Ångström Straße"), "Cafe naive Angstrom Strasse");
    }

    #[test]
    fn unmapped_characters_are_replaced() {
        assert_eq!(to_ascii("calm 😊 ✓"), "calm ? ?");
    }

    #[test]
    fn control_characters_become_spaces_but_newlines_stay() {
        assert_eq!(to_ascii("a\tb\r\nc"), "a b \nc");
    }

    #[test]
    fn table_entries_are_unique_and_ascii() {
        for (index, (from, to)) in TRANSLITERATIONS.iter().enumerate() {
            assert!(!from.is_ascii(), "{from:?} needs no mapping");
            assert!(to.chars().all(is_printable), "{to:?} is not printable ASCII");
            assert!(
                TRANSLITERATIONS[index + 1..].iter().all(|(other, _)| other != from),
                "{from:?} mapped twice"
            );
        }
    }
}
