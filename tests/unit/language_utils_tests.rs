/*!
 * Tests for language code utilities
 */

use subburn::language_utils::{
    get_language_name, is_supported_code, language_from_srt_stem, resolve_source_language,
    validate_language_code, AUTO_LANGUAGE, SUPPORTED_CODES,
};

#[test]
fn test_is_supported_code_withSupportedCodes_shouldReturnTrue() {
    for code in SUPPORTED_CODES {
        assert!(is_supported_code(code), "expected {} to be supported", code);
    }
    assert!(is_supported_code("ES"));
    assert!(is_supported_code(" en "));
}

#[test]
fn test_is_supported_code_withUnsupportedCodes_shouldReturnFalse() {
    assert!(!is_supported_code("ja"));
    assert!(!is_supported_code("xx"));
    assert!(!is_supported_code("auto"));
    assert!(!is_supported_code(""));
}

#[test]
fn test_validate_language_code_withAuto_shouldAccept() {
    assert_eq!(validate_language_code("auto").unwrap(), AUTO_LANGUAGE);
    assert_eq!(validate_language_code("AUTO").unwrap(), AUTO_LANGUAGE);
}

#[test]
fn test_validate_language_code_withSupportedCode_shouldNormalizeCase() {
    assert_eq!(validate_language_code("ES").unwrap(), "es");
    assert_eq!(validate_language_code("de").unwrap(), "de");
}

#[test]
fn test_validate_language_code_withInvalidCode_shouldFail() {
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("spanish").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_resolve_source_language_withAuto_shouldUseDefault() {
    assert_eq!(resolve_source_language("auto", "es").unwrap(), "es");
    assert_eq!(resolve_source_language("", "fr").unwrap(), "fr");
}

#[test]
fn test_resolve_source_language_withExplicitCode_shouldKeepIt() {
    assert_eq!(resolve_source_language("pt", "es").unwrap(), "pt");
}

#[test]
fn test_resolve_source_language_withInvalidDefault_shouldFail() {
    assert!(resolve_source_language("auto", "xx").is_err());
}

#[test]
fn test_get_language_name_withSupportedCodes_shouldReturnNames() {
    assert_eq!(get_language_name("es").unwrap(), "Spanish");
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("de").unwrap(), "German");
}

#[test]
fn test_language_from_srt_stem_withSuffix_shouldInferLanguage() {
    assert_eq!(language_from_srt_stem("movie_en", "es"), "en");
    assert_eq!(language_from_srt_stem("my_clip_fr", "es"), "fr");
    assert_eq!(language_from_srt_stem("Movie_DE", "es"), "de");
}

#[test]
fn test_language_from_srt_stem_withoutSuffix_shouldFallBack() {
    assert_eq!(language_from_srt_stem("movie", "es"), "es");
    assert_eq!(language_from_srt_stem("movie_final", "es"), "es");
    assert_eq!(language_from_srt_stem("", "es"), "es");
}
