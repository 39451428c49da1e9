use super::*;

#[test]
fn test_key_code() {
    assert_eq!(key_code("a"), Some(4));
    assert_eq!(key_code("A"), Some(4));
    assert_eq!(key_code("-"), Some(45));
    assert_eq!(key_code("1"), Some(usage::ONE));
    assert_eq!(key_code("Left_Shift"), Some(0xe1));
    assert_eq!(key_code("left-shift"), Some(0xe1));
    assert_eq!(key_code("F24"), Some(0x73));
    assert_eq!(key_code("mouseup"), None);
}

#[test]
fn test_key_name() {
    assert_eq!(key_name(usage::ENTER), Some("enter"));
    assert_eq!(key_name(usage::NON_US_HASH), Some("nonushash"));
    assert_eq!(key_name(0xff), None);
}

#[test]
fn modifiers() {
    assert!(key_range::is_modifier(usage::LEFT_CTRL));
    assert!(key_range::is_modifier(usage::RIGHT_GUI));
    assert!(!key_range::is_modifier(usage::Z));
    assert_eq!(key_range::modifier_bit(usage::LEFT_ALT), 4);
    assert_eq!(key_range::modifier_bit(usage::RIGHT_GUI), 128);
}
