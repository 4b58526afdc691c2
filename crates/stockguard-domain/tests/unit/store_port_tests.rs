//! Unit tests for the coordination store port types

use stockguard_domain::ports::{AtomicScript, ReplyKind, ScriptReply};

#[test]
fn test_reply_kinds() {
    assert_eq!(AtomicScript::AcquireReentrant.reply_kind(), ReplyKind::Integer);
    assert_eq!(AtomicScript::ReleaseReentrant.reply_kind(), ReplyKind::Integer);
    assert_eq!(AtomicScript::RenewLease.reply_kind(), ReplyKind::Boolean);
}

#[test]
fn test_reply_from_raw() {
    assert_eq!(
        ScriptReply::from_raw(ReplyKind::Boolean, 1),
        ScriptReply::Boolean(true)
    );
    assert_eq!(
        ScriptReply::from_raw(ReplyKind::Boolean, 0),
        ScriptReply::Boolean(false)
    );
    assert_eq!(
        ScriptReply::from_raw(ReplyKind::Integer, -1),
        ScriptReply::Integer(-1)
    );
}

#[test]
fn test_reply_extraction_checks_kind() {
    assert_eq!(ScriptReply::Integer(3).into_integer().unwrap(), 3);
    assert!(ScriptReply::Integer(3).into_boolean().is_err());
    assert!(ScriptReply::Boolean(true).into_boolean().unwrap());
    assert!(ScriptReply::Boolean(true).into_integer().is_err());
}

#[test]
fn test_arity_check() {
    let keys = vec!["lock".to_string()];
    let args = vec!["holder".to_string(), "1".to_string(), "10".to_string()];
    assert!(AtomicScript::AcquireReentrant.check_arity(&keys, &args).is_ok());
    assert!(AtomicScript::RenewLease.check_arity(&keys, &args).is_err());
    assert!(AtomicScript::ReleaseReentrant.check_arity(&[], &args[..1]).is_err());
}
