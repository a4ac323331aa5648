/*!
 * Tests for language code utilities
 */

use subtran::language_utils::{get_language_name, to_deepl_code, validate_language_code};

#[test]
fn test_validateLanguageCode_withTwoLetterCodes_shouldAccept() {
    assert!(validate_language_code("en").is_ok());
    assert!(validate_language_code("fr").is_ok());
    assert!(validate_language_code("ja").is_ok());
    // Case and surrounding whitespace are tolerated
    assert!(validate_language_code(" DE ").is_ok());
}

#[test]
fn test_validateLanguageCode_withThreeLetterCodes_shouldAccept() {
    assert!(validate_language_code("eng").is_ok());
    assert!(validate_language_code("deu").is_ok());
}

#[test]
fn test_validateLanguageCode_withRegionalVariant_shouldValidatePrimarySubtag() {
    assert!(validate_language_code("en-US").is_ok());
    assert!(validate_language_code("pt-BR").is_ok());
    assert!(validate_language_code("zz-XX").is_err());
}

#[test]
fn test_validateLanguageCode_withUnknownCodes_shouldReject() {
    assert!(validate_language_code("zz").is_err());
    assert!(validate_language_code("klingon").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_getLanguageName_withKnownCodes_shouldReturnEnglishName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("fra").unwrap(), "French");
    assert!(get_language_name("zz").is_err());
}

#[test]
fn test_toDeeplCode_shouldUppercaseValidCodes() {
    assert_eq!(to_deepl_code("fr").unwrap(), "FR");
    assert_eq!(to_deepl_code("pt-br").unwrap(), "PT-BR");
    assert!(to_deepl_code("zz").is_err());
}
