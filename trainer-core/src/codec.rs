//! Bidirectional character <-> Morse pattern codec.
//!
//! Prosigns are written in brackets (`[AR]`) and encode as a single
//! gap-free ligature group. The round trip is lossy for characters the
//! table does not cover: they pass through `text_to_morse` unmapped and
//! unknown patterns decode to `?`. That is documented behavior, not a
//! defect.

/// Character to pattern table (ITU). Space is handled separately as `/`.
const MORSE_TABLE: &[(char, &str)] = &[
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('.', ".-.-.-"),
    (',', "--..--"),
    ('?', "..--.."),
    ('\'', ".----."),
    ('!', "-.-.--"),
    ('/', "-..-."),
    ('(', "-.--."),
    (')', "-.--.-"),
    ('&', ".-..."),
    (':', "---..."),
    (';', "-.-.-."),
    ('=', "-...-"),
    ('+', ".-.-."),
    ('-', "-....-"),
    ('_', "..--.-"),
    ('"', ".-..-."),
    ('$', "...-..-"),
    ('@', ".--.-."),
];

/// Pattern for a single (upper-case) character, if mapped.
pub fn encode_char(c: char) -> Option<&'static str> {
    MORSE_TABLE
        .iter()
        .find(|(ch, _)| *ch == c)
        .map(|(_, pattern)| *pattern)
}

/// Character for a single pattern group, if mapped.
pub fn decode_group(pattern: &str) -> Option<char> {
    MORSE_TABLE
        .iter()
        .find(|(_, p)| *p == pattern)
        .map(|(ch, _)| *ch)
}

/// Encode text as space-separated Morse groups.
///
/// Input is upper-cased. `[ABC]` encodes as one ligature group with no
/// inter-letter gaps. A space becomes the `/` word mark. Characters the
/// table does not cover pass through unmapped.
pub fn text_to_morse(text: &str) -> String {
    let chars: Vec<char> = text.to_uppercase().chars().collect();
    let mut groups: Vec<String> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '[' => {
                // Prosign run: members join with no gap into one group.
                match chars[i + 1..].iter().position(|c| *c == ']') {
                    Some(len) => {
                        let ligature: String = chars[i + 1..i + 1 + len]
                            .iter()
                            .map(|c| match encode_char(*c) {
                                Some(p) => p.to_string(),
                                None => c.to_string(),
                            })
                            .collect();
                        if !ligature.is_empty() {
                            groups.push(ligature);
                        }
                        i += len + 2;
                    }
                    None => {
                        // Unterminated bracket: treat it as a literal.
                        groups.push('['.to_string());
                        i += 1;
                    }
                }
            }
            ' ' => {
                groups.push("/".to_string());
                i += 1;
            }
            c => {
                match encode_char(c) {
                    Some(p) => groups.push(p.to_string()),
                    None => groups.push(c.to_string()),
                }
                i += 1;
            }
        }
    }

    groups.join(" ")
}

/// Decode whitespace-separated Morse groups back to text.
///
/// `/` decodes to a literal space; unknown patterns decode to `?`.
pub fn morse_to_text(morse: &str) -> String {
    morse
        .split_whitespace()
        .map(|group| {
            if group == "/" {
                ' '
            } else {
                decode_group(group).unwrap_or('?')
            }
        })
        .collect()
}
