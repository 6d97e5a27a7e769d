//! 文本规范化处理器。

use std::borrow::Cow;

use any_ascii::any_ascii;
use unicode_normalization::{IsNormalized, UnicodeNormalization, is_nfc_quick};

use crate::annotator::types::NormalizationMode;

/// 按指定模式规范化文本。
///
/// 对歌词和片段必须使用同一种模式，否则子串查找会静默失败。
/// 三种模式都是幂等的，对已经规范化的文本不会产生任何改变。
pub fn normalize(text: &str, mode: NormalizationMode) -> Cow<'_, str> {
    match mode {
        NormalizationMode::None => Cow::Borrowed(text),
        NormalizationMode::Nfc => to_nfc(text),
        NormalizationMode::Ascii => {
            if text.is_ascii() {
                return Cow::Borrowed(text);
            }
            Cow::Owned(any_ascii(&to_nfc(text)))
        }
    }
}

fn to_nfc(text: &str) -> Cow<'_, str> {
    match is_nfc_quick(text.chars()) {
        IsNormalized::Yes => Cow::Borrowed(text),
        _ => Cow::Owned(text.nfc().collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_none_mode_is_identity() {
        let text = "Beyoncé – déjà vu";
        assert_eq!(normalize(text, NormalizationMode::None), text);
    }

    #[test]
    fn test_nfc_composes_combining_marks() {
        let decomposed = "cafe\u{301}";
        assert_eq!(normalize(decomposed, NormalizationMode::Nfc), "café");
    }

    #[test]
    fn test_ascii_transliterates() {
        assert_eq!(normalize("café", NormalizationMode::Ascii), "cafe");
        assert_eq!(normalize("cafe\u{301}", NormalizationMode::Ascii), "cafe");
        assert_eq!(normalize("don’t", NormalizationMode::Ascii), "don't");
    }

    #[test]
    fn test_ascii_input_is_borrowed() {
        assert!(matches!(
            normalize("plain words", NormalizationMode::Ascii),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_every_mode_is_idempotent() {
        let text = "Ça plaît à l’été\u{301}";
        for mode in NormalizationMode::iter() {
            let once = normalize(text, mode).into_owned();
            let twice = normalize(&once, mode).into_owned();
            assert_eq!(once, twice, "模式 {mode} 不是幂等的");
        }
    }
}
