//! Arabic text behind each recorded segment.
//!
//! Used to render the human-readable form of an announcement, and as the
//! input text when a segment has to be re-recorded or spoken by a fallback
//! synthesizer.

use crate::token::{CatalogToken, Phrase};

const UNITS: [&str; 10] = [
    "صفر", "واحد", "اثنان", "ثلاثة", "أربعة", "خمسة", "ستة", "سبعة", "ثمانية", "تسعة",
];

const TEENS: [&str; 10] = [
    "عشرة",
    "أحد عشر",
    "اثنا عشر",
    "ثلاثة عشر",
    "أربعة عشر",
    "خمسة عشر",
    "ستة عشر",
    "سبعة عشر",
    "ثمانية عشر",
    "تسعة عشر",
];

// Indexed by tens digit; 0 and 1 are covered by UNITS and TEENS.
const TENS: [&str; 10] = [
    "", "", "عشرون", "ثلاثون", "أربعون", "خمسون", "ستون", "سبعون", "ثمانون", "تسعون",
];

// Indexed by hundreds digit. 200 is the dual, 300-900 the construct forms.
const HUNDREDS: [&str; 10] = [
    "", "مائة", "مئتان", "ثلاثمائة", "أربعمائة", "خمسمائة", "ستمائة", "سبعمائة", "ثمانمائة",
    "تسعمائة",
];

pub const PREFIX_TEXT: &str = "على العميل رقم";
pub const CONJUNCTION_TEXT: &str = "و";

/// Clinic names the stock asset set was recorded with.
pub const DEFAULT_CLINIC_NAMES: [(u32, &str); 10] = [
    (1, "عيادة طب الأسرة"),
    (2, "عيادة الأسنان"),
    (3, "عيادة الجلدية"),
    (4, "عيادة العيون"),
    (5, "عيادة الأنف والأذن والحنجرة"),
    (6, "عيادة القلب"),
    (7, "عيادة الباطنة"),
    (8, "عيادة الجراحة"),
    (9, "عيادة النساء والولادة"),
    (10, "عيادة الأطفال"),
];

/// Fixed notices recorded apart from the segments, by file stem.
pub const INSTANT_NOTICES: [(&str, &str); 6] = [
    ("announcement1", "يرجى الالتزام بالدور"),
    ("announcement2", "شكراً لزيارتكم مركزنا الطبي"),
    ("emergency", "حالة طوارئ، يرجى الانتباه"),
    ("welcome", "أهلاً وسهلاً بكم في مركزنا الطبي"),
    ("closing", "سيتم إغلاق المركز خلال نصف ساعة"),
    ("prayer", "حان وقت الصلاة، سيتم التوقف لمدة نصف ساعة"),
];

/// Text of a stock notice.
pub fn notice_text(name: &str) -> Option<&'static str> {
    INSTANT_NOTICES
        .iter()
        .find(|(stem, _)| *stem == name)
        .map(|(_, text)| *text)
}

/// Text of a single segment. The chime is a sound, so its text is empty, as
/// is the text of any token outside its valid range.
pub fn spoken_text(token: CatalogToken) -> &'static str {
    if !token.is_valid() {
        return "";
    }
    match token {
        CatalogToken::Unit(v) => UNITS[usize::from(v)],
        CatalogToken::Teen(v) => TEENS[usize::from(v - 10)],
        CatalogToken::TensMultiple(v) => TENS[usize::from(v / 10)],
        CatalogToken::HundredsMultiple(v) => HUNDREDS[usize::from(v / 100)],
        CatalogToken::Phrase(Phrase::Prefix) => PREFIX_TEXT,
        CatalogToken::Phrase(Phrase::Conjunction) => CONJUNCTION_TEXT,
        CatalogToken::Phrase(Phrase::Chime) => "",
    }
}

/// Text for a clinic: its known name, or "عيادة رقم N".
pub fn clinic_text(clinic: u32, names: &[(u32, &str)]) -> String {
    names
        .iter()
        .find(|(id, _)| *id == clinic)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format!("عيادة رقم {clinic}"))
}

/// Join token texts into a sentence.
///
/// Words are space separated; the conjunction is a prefix letter in written
/// Arabic, so it is attached to the word after it. Silent tokens are dropped.
pub fn render(tokens: &[CatalogToken]) -> String {
    let mut out = String::new();
    let mut attach_next = false;
    for &token in tokens {
        let text = spoken_text(token);
        if text.is_empty() {
            continue;
        }
        if token == CatalogToken::CONJUNCTION {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(text);
            attach_next = true;
            continue;
        }
        if !out.is_empty() && !attach_next {
            out.push(' ');
        }
        out.push_str(text);
        attach_next = false;
    }
    out
}
