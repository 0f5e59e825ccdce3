//! Integration tests for the predicate-first front end.

use std::future::IntoFuture;

use avow::assertions::builtins::{matches, rejects, resolves, throws};
use avow::prelude::*;
use regex::Regex;

fn message_of(result: Result<Assertion>) -> String {
    match result {
        Ok(assertion) => panic!("expected a failure, got {assertion:?}"),
        Err(error) => error.to_string(),
    }
}

fn pattern(source: &str) -> Value {
    Regex::new(source).unwrap().into()
}

/// A literal `true` passes.
#[test]
fn test_boolean_predicate_passes() {
    assert!(actually(true, argv![]).is_ok());
}

/// A literal `false` fails, and `throws` sees it.
#[test]
fn test_boolean_predicate_fails() {
    let f = predicate!(|| actually(false, argv![]));
    assert!(actually(throws(), argv![f]).is_ok());
}

#[test]
fn test_function_predicate_passes() {
    let eq = predicate!(|a, b| a == b);
    assert!(actually(eq, argv![true, true]).is_ok());
}

/// The subject of a `throws` failure is rendered by name.
#[test]
fn test_function_reported_when_it_does_not_throw() {
    let callee = predicate!(fn callee(a) { a });
    let caller = predicate!(|| actually(throws(), argv![callee.clone()]));

    assert!(actually(throws(), argv!["Expected callee() to throw an exception.", caller]).is_ok());
}

#[test]
fn test_function_predicate_fails() {
    let f = predicate!(|| actually(predicate!(|a, b| a == b), argv![true, false]));
    assert!(actually(throws(), argv![f]).is_ok());
}

// Sources below are written out the way a scripting host renders them.

fn arrow(source: &'static str) -> Predicate {
    Predicate::new(source, |_| Ok(Value::Bool(false)))
}

#[test]
fn test_arrow_predicate_messages() {
    assert_eq!(
        message_of(actually(arrow("() => false"), argv![])),
        "Assertion failed. () => false"
    );
    assert_eq!(
        message_of(actually(arrow("() => false"), argv!["a"])),
        "Assertion failed. ('a') => false"
    );
    assert_eq!(
        message_of(actually(arrow("() => false"), argv!["a", "b"])),
        "Assertion failed. ('a', 'b') => false"
    );
    assert_eq!(
        message_of(actually(arrow("(a) => a !== a"), argv!["a"])),
        "Assertion failed. (a = 'a') => a !== a"
    );
    assert_eq!(
        message_of(actually(arrow("(a) => a !== a"), argv!["a", "b"])),
        "Assertion failed. (a = 'a', 'b') => a !== a"
    );
    assert_eq!(
        message_of(actually(arrow("(a, b) => a === b"), argv!["a", "b"])),
        "Assertion failed. (a = 'a', b = 'b') => a === b"
    );
}

#[test]
fn test_generic_predicate_messages() {
    let generic = |source| Predicate::new(source, |_| Ok(Value::Bool(false)));

    assert_eq!(
        message_of(actually(generic("function () {\n  return false;\n}"), argv![])),
        "Assertion failed. function () { return false; }"
    );
    assert_eq!(
        message_of(actually(generic("function () { return false; }"), argv!["a", "b"])),
        "Assertion failed. function ('a', 'b') { return false; }"
    );
    assert_eq!(
        message_of(actually(generic("function (a) { return a !== a; }"), argv!["a", "b"])),
        "Assertion failed. function (a = 'a', 'b') { return a !== a; }"
    );
    assert_eq!(
        message_of(actually(generic("function (a, b) { return a === b; }"), argv!["a", "b"])),
        "Assertion failed. function (a = 'a', b = 'b') { return a === b; }"
    );
}

#[test]
fn test_named_predicate_messages() {
    let named = |source| Predicate::new(source, |_| Ok(Value::Bool(false)));

    assert_eq!(
        message_of(actually(named("function predicate() { return false; }"), argv![])),
        "Assertion failed. predicate();"
    );
    assert_eq!(
        message_of(actually(named("function predicate() { return false; }"), argv!["a", "b"])),
        "Assertion failed. predicate('a', 'b');"
    );
    assert_eq!(
        message_of(actually(named("function predicate(a) { return a !== a; }"), argv!["a", "b"])),
        "Assertion failed. predicate(a = 'a', 'b');"
    );
    assert_eq!(
        message_of(actually(
            named("function predicate(a, b) { return a === b; }"),
            argv!["a", "b"]
        )),
        "Assertion failed. predicate(a = 'a', b = 'b');"
    );
}

#[test]
fn test_rust_predicate_messages() {
    let positive = predicate!(fn positive(n) { n.is_truthy() });
    assert_eq!(message_of(actually(positive, argv![0])), "Assertion failed. positive(n = 0);");

    let eq = predicate!(|a, b| a == b);
    assert_eq!(
        message_of(actually(eq, argv!["x", 1, "extra"])),
        "Assertion failed. |a = 'x', b = 1, 'extra'| a == b"
    );
}

/// `fn` outside a definition head is an ordinary parameter name.
#[test]
fn test_fn_as_arrow_parameter() {
    assert_eq!(
        message_of(actually(arrow("(fn) => fn()"), argv![1])),
        "Assertion failed. (fn = 1) => fn()"
    );
}

#[test]
fn test_annotated_closure_parameters() {
    let annotated = Predicate::new("|a: &'static str, b: i32| a.len() == b", |_| {
        Ok(Value::Bool(false))
    });
    assert_eq!(
        message_of(actually(annotated, argv!["x", 2])),
        "Assertion failed. |a = 'x', b = 2| a.len() == b"
    );
}

/// A subject that is not callable is judged by truthiness, even an error.
#[test]
fn test_literal_subjects() {
    assert!(actually(Value::from(Failure::error("x")), argv![]).is_ok());
    assert!(actually("non-empty", argv![]).is_ok());
    assert_eq!(message_of(actually(0, argv![])), "Assertion failed. 0");
}

#[test]
fn test_fails_with_custom_message() {
    let f = predicate!(|| actually(
        predicate!(|a, b| if a == b { Ok(true) } else { Err(Failure::error("${0} does not equal ${1}.")) }),
        argv![true, false],
    ));

    assert!(actually(throws(), argv![Class::ERROR, pattern("does not equal"), f]).is_ok());
}

#[test]
fn test_custom_message_text() {
    let eq = predicate!(|a, b| if a == b {
        Ok(true)
    } else {
        Err(Failure::error("${0} does not equal ${1}."))
    });
    assert_eq!(
        message_of(actually(eq, argv![true, "b"])),
        "Assertion failed. true does not equal 'b'."
    );
}

#[test]
fn test_fails_with_custom_arguments() {
    let eq = predicate!(|a, b| if a == b {
        Ok(true)
    } else {
        Err(Failure::error("${0} did not equal ${1} at ${2}.").with_argv(argv![a, b, "noon"]))
    });
    let f = predicate!(|| actually(eq.clone(), argv![true, false]));

    assert!(actually(throws(), argv![Class::ERROR, pattern(r"did not equal \S+ at"), f]).is_ok());
}

#[test]
fn test_manually_fails() {
    let f = predicate!(|| Err::<bool, _>(Failure::error("`f()` should not have been called.")));
    assert!(actually(throws(), argv![Class::ERROR, "`f()` should not have been called.", f]).is_ok());
}

#[test]
fn test_unsupported_parameter_is_reported() {
    let destructured = Predicate::new("({ a }) => a", |_| Ok(Value::Bool(false)));
    match actually(destructured, argv![1]) {
        Err(Error::UnsupportedParameter { parameter, .. }) => assert_eq!(parameter, "{ a }"),
        other => panic!("expected an unsupported parameter, got {other:?}"),
    }
}

#[tokio::test]
async fn test_resolves() {
    let assertion = actually(resolves(), argv![Deferred::resolved(Value::Undefined)]).unwrap();
    assert!(assertion.await.is_ok());
}

#[tokio::test]
async fn test_resolves_with_predicate() {
    let is_resolution = predicate!(|a| a == Value::from("resolution"));
    let assertion =
        actually(resolves(), argv![is_resolution, Deferred::resolved("resolution")]).unwrap();
    assert!(assertion.await.is_ok());
}

#[tokio::test]
async fn test_resolves_with_arguments_and_predicate() {
    let assertion = actually(
        resolves(),
        argv![matches(), pattern("^qwerty$"), Deferred::resolved("qwerty")],
    )
    .unwrap();
    assert!(assertion.await.is_ok());
}

#[tokio::test]
async fn test_rejects_with_custom_type() {
    let promise = Deferred::rejected(Failure::new(Class::TYPE_ERROR, "!"));
    let assertion = actually(rejects(), argv![Class::TYPE_ERROR, promise]).unwrap();
    assert!(assertion.await.is_ok());
}

#[tokio::test]
async fn test_rejects_with_custom_message() {
    let promise = Deferred::rejected(Failure::error("† Failed."));
    let assertion = actually(rejects(), argv!["†", promise]).unwrap();
    assert!(assertion.await.is_ok());
}

#[tokio::test]
async fn test_rejects_with_custom_type_and_message() {
    let promise = Deferred::rejected(Failure::new(Class::TYPE_ERROR, "† Failed."));
    let assertion = actually(rejects(), argv![Class::TYPE_ERROR, "†", promise]).unwrap();
    assert!(assertion.await.is_ok());
}

#[tokio::test]
async fn test_rejection_with_mismatched_type_fails() {
    let promise = Deferred::rejected(Failure::error("!"));
    let failed = actually(rejects(), argv![Class::TYPE_ERROR, promise]).unwrap();

    let assertion = actually(
        rejects(),
        argv![Class::ERROR, pattern("reject with reason [^\"]"), failed],
    )
    .unwrap();
    assert!(assertion.await.is_ok());
}

#[tokio::test]
async fn test_rejection_with_mismatched_message_fails() {
    let promise = Deferred::rejected(Failure::error("!"));
    let failed = actually(rejects(), argv!["¶", promise]).unwrap();

    let assertion = actually(rejects(), argv!["reject with reason '", failed]).unwrap();
    assert!(assertion.await.is_ok());
}

#[tokio::test]
async fn test_rejection_with_mismatched_type_and_message_fails() {
    let promise = Deferred::rejected(Failure::error("!"));
    let failed = actually(rejects(), argv![Class::TYPE_ERROR, "¶", promise]).unwrap();

    let error = failed.await.unwrap_err();
    assert_eq!(
        error.to_string(),
        "Assertion failed. Expected promise to reject with reason TypeError() '¶', but caught Error() '!'."
    );
}

#[tokio::test]
async fn test_chained_failure_is_not_prefixed_twice() {
    let promise = Deferred::rejected(Failure::error("!"));
    let failed = actually(rejects(), argv![Class::TYPE_ERROR, promise]).unwrap();
    let relayed = actually(Value::from(failed), argv![]).unwrap();

    let message = relayed.await.unwrap_err().to_string();
    assert_eq!(message.matches("Assertion failed.").count(), 1);
}

/// Independent deferred assertions settle on their own subjects only.
#[tokio::test]
async fn test_concurrent_assertions_do_not_interfere() {
    let (tx_a, rx_a) = futures::channel::oneshot::channel::<Value>();
    let (tx_b, rx_b) = futures::channel::oneshot::channel::<Value>();

    let a = Deferred::new(async move { rx_a.await.map_err(|_| Value::from("dropped")) });
    let b = Deferred::new(async move { rx_b.await.map_err(|_| Value::from("dropped")) });

    let first = tokio::spawn(actually(predicate!(|x| x), argv![a]).unwrap().into_future());
    let second = tokio::spawn(actually(predicate!(|x| x), argv![b]).unwrap().into_future());

    tx_b.send(Value::from(false)).unwrap();
    tx_a.send(Value::from("yes")).unwrap();

    assert_eq!(first.await.unwrap(), Ok(Value::from("yes")));
    assert_eq!(
        second.await.unwrap().unwrap_err().to_string(),
        "Assertion failed. |x = [object Promise]| x"
    );
}

#[tokio::test]
async fn test_rejects_with_class_and_pattern() {
    let promise = Deferred::rejected(Failure::new(Class::TYPE_ERROR, "boom"));
    let assertion = assert_rejects(argv![Class::TYPE_ERROR, pattern("boom"), promise]).unwrap();
    assert!(assertion.await.is_ok());
}

#[tokio::test]
async fn test_rejection_with_mismatched_class_names_both() {
    let promise = Deferred::rejected(Failure::new(Class::TYPE_ERROR, "boom"));
    let failed = assert_rejects(argv![Class::RANGE_ERROR, promise]).unwrap();

    assert_eq!(
        failed.await.unwrap_err().to_string(),
        "Assertion failed. Expected promise to reject with reason RangeError(), but caught TypeError()."
    );
}
